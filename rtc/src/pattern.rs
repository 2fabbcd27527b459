use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    float::ApproxEq,
    matrix::Matrix,
    object::Object,
    transform::Transform,
    tuple::{Point, Tuple},
};

/// A surface pattern with its own transformation on top of the object's.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pattern: Patterns,
    transformation: Matrix,
    transformation_inverse: Matrix,
}

impl Pattern {
    pub fn new_checker(c1: Color, c2: Color) -> Self {
        Pattern {
            pattern: Patterns::Checker { c1, c2 },
            ..Default::default()
        }
    }

    pub fn new_gradient(from: Color, to: Color) -> Self {
        Pattern {
            pattern: Patterns::Gradient { from, to },
            ..Default::default()
        }
    }

    pub fn new_plain(color: Color) -> Self {
        Pattern {
            pattern: Patterns::Plain { color },
            ..Default::default()
        }
    }

    pub fn new_ring(colors: Vec<Color>) -> Self {
        Pattern {
            pattern: Patterns::Ring { colors },
            ..Default::default()
        }
    }

    pub fn new_stripe(colors: Vec<Color>) -> Self {
        Pattern {
            pattern: Patterns::Stripe { colors },
            ..Default::default()
        }
    }

    /// A pattern returning the point itself as a color. Only useful to
    /// observe which point a computation ends up sampling.
    pub fn new_xyz() -> Self {
        Pattern {
            pattern: Patterns::Xyz,
            ..Default::default()
        }
    }

    fn pattern_at(&self, point: &Point) -> Color {
        match &self.pattern {
            Patterns::Checker { c1, c2 } => {
                let sum = point.x().floor() + point.y().floor() + point.z().floor();
                if (sum % 2.0).approx_eq(0.0) {
                    *c1
                } else {
                    *c2
                }
            }
            Patterns::Gradient { from, to } => *from + (*to - *from) * point.x(),
            Patterns::Plain { color } => *color,
            Patterns::Ring { colors } => {
                let distance = (point.x() * point.x() + point.z() * point.z()).sqrt();
                let index = distance.floor() as usize % colors.len();

                colors[index]
            }
            Patterns::Stripe { colors } => {
                let scaled_x = point.x() * colors.len() as f64;
                let index = (scaled_x.floor().abs() as usize) % colors.len();

                colors[index]
            }
            Patterns::Xyz => Color::new(point.x(), point.y(), point.z()),
        }
    }

    pub fn pattern_at_object(&self, object: &Object, world_point: &Point) -> Color {
        let object_point = *object.transformation_inverse() * *world_point;
        let pattern_point = self.transformation_inverse * object_point;

        self.pattern_at(&pattern_point)
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern {
            pattern: Patterns::Plain {
                color: Color::white(),
            },
            transformation: Matrix::id(),
            transformation_inverse: Matrix::id(),
        }
    }
}

impl Transform for Pattern {
    fn transform(self, transformation: &Matrix) -> Self {
        let new_transformation = *transformation * self.transformation;

        Pattern {
            transformation: new_transformation,
            transformation_inverse: new_transformation.invert(),
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
enum Patterns {
    Checker { c1: Color, c2: Color },
    Gradient { from: Color, to: Color },
    Plain { color: Color },
    Ring { colors: Vec<Color> },
    Stripe { colors: Vec<Color> },
    Xyz,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn a_stripe_pattern_is_constant_in_y_and_z() {
        let pattern = Pattern::new_stripe(vec![Color::white(), Color::black(), Color::red()]);

        for i in 0..3 {
            assert_eq!(
                pattern.pattern_at(&Point::new(0.0, i as f64, 0.0)),
                Color::white()
            );
            assert_eq!(
                pattern.pattern_at(&Point::new(0.0, 0.0, i as f64)),
                Color::white()
            );
        }
    }

    #[test]
    fn a_stripe_pattern_alternates_in_x() {
        let pattern = Pattern::new_stripe(vec![Color::white(), Color::black(), Color::red()]);

        assert_eq!(
            pattern.pattern_at(&Point::new(-0.2, 0.0, 0.0)),
            Color::black()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.0, 0.0, 0.0)),
            Color::white()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.4, 0.0, 0.0)),
            Color::black()
        );
        assert_eq!(pattern.pattern_at(&Point::new(0.7, 0.0, 0.0)), Color::red());
        assert_eq!(
            pattern.pattern_at(&Point::new(1.0, 0.0, 0.0)),
            Color::white()
        );
    }

    #[test]
    fn stripes_with_an_object_transformation() {
        let object = Object::new_sphere().scale(2.0, 2.0, 2.0).transform();
        let pattern = Pattern::new_stripe(vec![Color::white(), Color::black()]);

        assert_eq!(
            pattern.pattern_at_object(&object, &Point::new(2.5, 0.0, 0.0)),
            Color::white()
        );
    }

    #[test]
    fn stripes_with_a_pattern_transformation() {
        let object = Object::new_sphere();
        let pattern = Pattern::new_stripe(vec![Color::white(), Color::black()])
            .scale(2.0, 2.0, 2.0)
            .transform();

        assert_eq!(
            pattern.pattern_at_object(&object, &Point::new(2.5, 0.0, 0.0)),
            Color::white()
        );
    }

    #[test]
    fn stripes_with_both_an_object_and_a_pattern_transformation() {
        let object = Object::new_sphere().scale(2.0, 2.0, 2.0).transform();
        let pattern = Pattern::new_stripe(vec![Color::white(), Color::black()])
            .scale(2.0, 2.0, 2.0)
            .transform();

        assert_eq!(
            pattern.pattern_at_object(&object, &Point::new(1.5, 0.0, 0.0)),
            Color::white()
        );
    }

    #[test]
    fn a_gradient_linearly_interpolates_between_colors() {
        let pattern = Pattern::new_gradient(Color::white(), Color::black());

        assert_eq!(
            pattern.pattern_at(&Point::new(0.0, 0.0, 0.0)),
            Color::white()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.25, 0.0, 0.0)),
            Color::new(0.75, 0.75, 0.75)
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.5, 0.0, 0.0)),
            Color::new(0.5, 0.5, 0.5)
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.75, 0.0, 0.0)),
            Color::new(0.25, 0.25, 0.25)
        );
    }

    #[test]
    fn a_ring_extends_in_both_x_and_z() {
        let pattern = Pattern::new_ring(vec![Color::white(), Color::black()]);

        assert_eq!(
            pattern.pattern_at(&Point::new(0.0, 0.0, 0.0)),
            Color::white()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(1.0, 0.0, 0.0)),
            Color::black()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.0, 0.0, 1.0)),
            Color::black()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.708, 0.0, 0.708)),
            Color::black()
        );
    }

    #[test]
    fn a_checker_repeats_in_every_dimension() {
        let pattern = Pattern::new_checker(Color::white(), Color::black());

        assert_eq!(
            pattern.pattern_at(&Point::new(0.99, 0.0, 0.0)),
            Color::white()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(1.01, 0.0, 0.0)),
            Color::black()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.0, 0.99, 0.0)),
            Color::white()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.0, 1.01, 0.0)),
            Color::black()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.0, 0.0, 0.99)),
            Color::white()
        );
        assert_eq!(
            pattern.pattern_at(&Point::new(0.0, 0.0, 1.01)),
            Color::black()
        );
    }
}
