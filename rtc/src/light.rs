use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    tuple::{Point, Tuple, Vector},
    world::World,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Light {
    Area(AreaLight),
    Point(PointLight),
}

impl Light {
    pub fn new_area_light(
        intensity: Color,
        corner: Point,
        uvec: Vector,
        usteps: u32,
        vvec: Vector,
        vsteps: u32,
    ) -> Self {
        Light::Area(AreaLight::new(intensity, corner, uvec, usteps, vvec, vsteps))
    }

    pub fn new_point_light(intensity: Color, position: Point) -> Self {
        Light::Point(PointLight::new(intensity, position))
    }

    pub fn intensity(&self) -> Color {
        match self {
            Light::Area(l) => l.intensity,
            Light::Point(l) => l.intensity,
        }
    }

    /// The positions the shading loop samples. A single point for point
    /// lights, the center of each cell for area lights.
    pub fn positions(&self) -> &[Point] {
        match self {
            Light::Area(l) => &l.positions,
            Light::Point(l) => &l.position,
        }
    }

    /// Fraction of the light actually reaching `point`, shadows accounted
    /// for. Between 0.0 and 1.0.
    pub fn intensity_at(&self, world: &World, point: &Point) -> f64 {
        match self {
            Light::Area(l) => l.intensity_at(world, point),
            Light::Point(l) => l.intensity_at(world, point),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PointLight {
    intensity: Color,
    position: [Point; 1],
}

impl PointLight {
    pub fn new(intensity: Color, position: Point) -> Self {
        PointLight {
            intensity,
            position: [position],
        }
    }

    fn intensity_at(&self, world: &World, point: &Point) -> f64 {
        if world.is_shadowed(&self.position[0], point) {
            0.0
        } else {
            1.0
        }
    }
}

/// Rectangular light emitting from a usteps x vsteps grid of cells.
/// Shadow tests jitter the sample position inside each cell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AreaLight {
    intensity: Color,
    corner: Point,
    uvec: Vector,
    usteps: u32,
    vvec: Vector,
    vsteps: u32,
    samples: u32,
    positions: Vec<Point>,
}

impl AreaLight {
    pub fn new(
        intensity: Color,
        corner: Point,
        uvec: Vector,
        usteps: u32,
        vvec: Vector,
        vsteps: u32,
    ) -> Self {
        let uvec = uvec / usteps as f64;
        let vvec = vvec / vsteps as f64;

        let mut positions = Vec::with_capacity((usteps * vsteps) as usize);
        for v in 0..vsteps {
            for u in 0..usteps {
                positions.push(corner + uvec * (u as f64 + 0.5) + vvec * (v as f64 + 0.5));
            }
        }

        AreaLight {
            intensity,
            corner,
            uvec,
            usteps,
            vvec,
            vsteps,
            samples: usteps * vsteps,
            positions,
        }
    }

    fn point_on_light(&self, u: u32, v: u32, mut random: impl FnMut() -> f64) -> Point {
        let jitter = random();
        self.corner + self.uvec * (u as f64 + jitter) + self.vvec * (v as f64 + jitter)
    }

    fn intensity_at(&self, world: &World, point: &Point) -> f64 {
        let mut rng = SmallRng::from_entropy();
        self.intensity_at_impl(world, point, || rng.gen())
    }

    fn intensity_at_impl(
        &self,
        world: &World,
        point: &Point,
        mut random: impl FnMut() -> f64,
    ) -> f64 {
        let mut total = 0.0;

        for v in 0..self.vsteps {
            for u in 0..self.usteps {
                let light_position = self.point_on_light(u, v, &mut random);
                if !world.is_shadowed(&light_position, point) {
                    total += 1.0;
                }
            }
        }

        total / self.samples as f64
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn point_lights_evaluate_the_intensity_at_a_given_point() {
        let w = crate::world::test::default_world();
        let light = &w.lights()[0];

        let tests = vec![
            (Point::new(0.0, 1.0001, 0.0), 1.0),
            (Point::new(-1.0001, 0.0, 0.0), 1.0),
            (Point::new(0.0, 0.0, -1.0001), 1.0),
            (Point::new(0.0, 0.0, 1.0001), 0.0),
            (Point::new(1.0001, 0.0, 0.0), 0.0),
            (Point::new(0.0, -1.0001, 0.0), 0.0),
            (Point::new(0.0, 0.0, 0.0), 0.0),
        ];

        for (point, result) in tests {
            assert_eq!(light.intensity_at(&w, &point), result);
        }
    }

    #[test]
    fn creating_an_area_light() {
        let corner = Point::zero();
        let v1 = Vector::new(2.0, 0.0, 0.0);
        let v2 = Vector::new(0.0, 0.0, 1.0);
        let light = AreaLight::new(Color::white(), corner, v1, 4, v2, 2);

        assert_eq!(light.corner, corner);
        assert_eq!(light.uvec, Vector::new(0.5, 0.0, 0.0));
        assert_eq!(light.usteps, 4);
        assert_eq!(light.vvec, Vector::new(0.0, 0.0, 0.5));
        assert_eq!(light.vsteps, 2);
        assert_eq!(light.samples, 8);
    }

    #[test]
    fn finding_a_single_point_on_an_area_light() {
        let corner = Point::zero();
        let v1 = Vector::new(2.0, 0.0, 0.0);
        let v2 = Vector::new(0.0, 0.0, 1.0);
        let light = AreaLight::new(Color::white(), corner, v1, 4, v2, 2);

        let tests = vec![
            (0, 0, Point::new(0.25, 0.0, 0.25)),
            (1, 0, Point::new(0.75, 0.0, 0.25)),
            (0, 1, Point::new(0.25, 0.0, 0.75)),
            (2, 0, Point::new(1.25, 0.0, 0.25)),
            (3, 1, Point::new(1.75, 0.0, 0.75)),
        ];

        for (u, v, point) in tests {
            assert_eq!(light.point_on_light(u, v, || 0.5), point);
        }
    }

    #[test]
    fn the_area_light_intensity_function() {
        let w = crate::world::test::default_world();

        let corner = Point::new(-0.5, -0.5, -5.0);
        let v1 = Vector::new(1.0, 0.0, 0.0);
        let v2 = Vector::new(0.0, 1.0, 0.0);
        let light = AreaLight::new(Color::white(), corner, v1, 2, v2, 2);

        let tests = vec![
            (Point::new(0.0, 0.0, 2.0), 0.0),
            (Point::new(1.0, -1.0, 2.0), 0.25),
            (Point::new(1.5, 0.0, 2.0), 0.5),
            (Point::new(1.25, 1.25, 3.0), 0.75),
            (Point::new(0.0, 0.0, -2.0), 1.0),
        ];

        for (point, result) in tests {
            assert_eq!(light.intensity_at_impl(&w, &point, || 0.5), result);
        }
    }
}
