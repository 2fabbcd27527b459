use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    float::ApproxEq,
    intersection::{IntersectionState, Intersections},
    light::Light,
    object::Object,
    ray::Ray,
    tuple::Point,
};

/// The scene: objects, lights and the reflection/refraction recursion limit.
#[derive(Debug, Serialize, Deserialize)]
pub struct World {
    objects: Vec<Object>,
    lights: Vec<Light>,
    recursion_limit: u8,
    #[serde(skip)]
    nb_intersections: AtomicUsize,
}

impl World {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_recursion_limit(mut self, limit: u8) -> Self {
        self.recursion_limit = if limit == 0 { 1 } else { limit };

        self
    }

    pub fn with_objects(mut self, objects: Vec<Object>) -> Self {
        self.objects = objects;

        self
    }

    pub fn with_lights(mut self, lights: Vec<Light>) -> Self {
        self.lights = lights;

        self
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Total number of intersections recorded so far. Render statistics
    /// only.
    pub fn nb_intersections(&self) -> usize {
        self.nb_intersections.load(Ordering::Relaxed)
    }

    pub fn color_at(&self, ray: &Ray) -> Color {
        self.color_at_impl(ray, self.recursion_limit)
    }

    fn color_at_impl(&self, ray: &Ray, remaining_recursions: u8) -> Color {
        let intersections = self.intersects(ray);

        match intersections.hit_index() {
            Some(hit_index) => {
                let comps = IntersectionState::new(&intersections, hit_index, ray);
                self.shade_hit(&comps, remaining_recursions)
            }
            None => Color::black(),
        }
    }

    fn intersects(&self, ray: &Ray) -> Intersections {
        let intersections = ray.intersects(&self.objects);
        self.nb_intersections
            .fetch_add(intersections.len(), Ordering::Relaxed);

        intersections
    }

    fn shade_hit(&self, comps: &IntersectionState, remaining_recursions: u8) -> Color {
        self.lights.iter().fold(Color::black(), |acc, light| {
            let light_intensity = light.intensity_at(self, &comps.over_point());

            let surface_color = comps.object().material().lighting(
                comps.object(),
                light,
                &comps.over_point(),
                &comps.eye_v(),
                &comps.normal_v(),
                light_intensity,
            );

            let reflected_color = self.reflected_color(comps, remaining_recursions);
            let refracted_color = self.refracted_color(comps, remaining_recursions);

            let material = comps.object().material();
            if material.reflective > 0.0 && material.transparency > 0.0 {
                let reflectance = comps.schlick();

                acc + surface_color
                    + reflected_color * reflectance
                    + refracted_color * (1.0 - reflectance)
            } else {
                acc + surface_color + reflected_color + refracted_color
            }
        })
    }

    pub fn is_shadowed(&self, light_position: &Point, point: &Point) -> bool {
        let v = *light_position - *point;
        let distance = v.magnitude();

        let ray = Ray {
            origin: *point,
            direction: v.normalize(),
        };

        if let Some(hit) = self.intersects(&ray).hit() {
            if hit.object().has_shadow() && hit.t() < distance {
                return true;
            }
        }

        false
    }

    fn reflected_color(&self, comps: &IntersectionState, remaining_recursions: u8) -> Color {
        if remaining_recursions == 0 || comps.object().material().reflective.approx_eq(0.0) {
            Color::black()
        } else {
            let reflect_ray = Ray {
                origin: comps.over_point(),
                direction: comps.reflect_v(),
            };

            self.color_at_impl(&reflect_ray, remaining_recursions - 1)
                * comps.object().material().reflective
        }
    }

    fn refracted_color(&self, comps: &IntersectionState, remaining_recursions: u8) -> Color {
        if remaining_recursions == 0 || comps.object().material().transparency.approx_eq(0.0) {
            return Color::black();
        }

        // Snell's law, with total internal reflection when sin2_t > 1.
        let (n1, n2) = comps.n();
        let n_ratio = n1 / n2;
        let cos_i = comps.cos_i();
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);

        if sin2_t > 1.0 {
            Color::black()
        } else {
            let cos_t = f64::sqrt(1.0 - sin2_t);
            let direction = comps.normal_v() * (n_ratio * cos_i - cos_t) - comps.eye_v() * n_ratio;

            let refract_ray = Ray {
                origin: comps.under_point(),
                direction,
            };

            self.color_at_impl(&refract_ray, remaining_recursions - 1)
                * comps.object().material().transparency
        }
    }
}

impl Default for World {
    fn default() -> Self {
        World {
            objects: vec![],
            lights: vec![],
            recursion_limit: 4,
            nb_intersections: AtomicUsize::new(0),
        }
    }
}
