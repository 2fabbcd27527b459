use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    float::ApproxEq,
    light::Light,
    object::Object,
    pattern::Pattern,
    tuple::{Point, Vector},
};

/// Phong shading parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: f64,
    pub diffuse: f64,
    pub pattern: Pattern,
    pub reflective: f64,
    pub refractive_index: f64,
    pub shininess: f64,
    pub specular: f64,
    pub transparency: f64,
}

impl Material {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_ambient(mut self, ambient: f64) -> Material {
        self.ambient = ambient;
        self
    }

    pub fn with_color(mut self, color: Color) -> Material {
        self.pattern = Pattern::new_plain(color);
        self
    }

    pub fn with_diffuse(mut self, diffuse: f64) -> Material {
        self.diffuse = diffuse;
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Material {
        self.pattern = pattern;
        self
    }

    pub fn with_reflective(mut self, reflective: f64) -> Material {
        self.reflective = reflective;
        self
    }

    pub fn with_refractive_index(mut self, refractive_index: f64) -> Material {
        self.refractive_index = refractive_index;
        self
    }

    pub fn with_shininess(mut self, shininess: f64) -> Material {
        self.shininess = shininess;
        self
    }

    pub fn with_specular(mut self, specular: f64) -> Material {
        self.specular = specular;
        self
    }

    pub fn with_transparency(mut self, transparency: f64) -> Material {
        self.transparency = transparency;
        self
    }

    /// Phong lighting at `position`. The diffuse and specular terms are
    /// averaged over the light's sample positions and scaled by
    /// `intensity`, the fraction of the light that reaches the point.
    pub fn lighting(
        &self,
        object: &Object,
        light: &Light,
        position: &Point,
        eye_v: &Vector,
        normal_v: &Vector,
        intensity: f64,
    ) -> Color {
        let color = self.pattern.pattern_at_object(object, position);
        let effective_color = color * light.intensity();
        let ambient = effective_color * self.ambient;

        if intensity.approx_eq(0.0) {
            return ambient;
        }

        let mut sum = Color::black();
        let nb_samples = light.positions().len() as f64;

        for light_position in light.positions() {
            let light_v = (*light_position - *position).normalize();
            let light_dot_normal = light_v ^ *normal_v;

            if light_dot_normal >= 0.0 {
                sum = sum + effective_color * self.diffuse * light_dot_normal;

                let reflect_v = (-light_v).reflect(normal_v);
                let reflect_dot_eye = reflect_v ^ *eye_v;

                if reflect_dot_eye > 0.0 {
                    let factor = reflect_dot_eye.powf(self.shininess);
                    sum = sum + light.intensity() * self.specular * factor;
                }
            }
        }

        ambient + (sum / nb_samples) * intensity
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            ambient: 0.1,
            diffuse: 0.9,
            pattern: Pattern::new_plain(Color::white()),
            reflective: 0.0,
            refractive_index: 1.0,
            shininess: 200.0,
            specular: 0.9,
            transparency: 0.0,
        }
    }
}
