use serde::{Deserialize, Serialize};

use crate::{
    intersection::{Intersection, IntersectionPusher, Intersections},
    matrix::Matrix,
    object::Object,
    transform::Transform,
    tuple::{Point, Vector},
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    pub fn position(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Intersects the ray with every object, returning the hits sorted
    /// by distance.
    pub fn intersects<'a>(&self, objects: &'a [Object]) -> Intersections<'a> {
        let intersections = objects.iter().fold(Vec::new(), |acc, object| {
            let mut collector = Collector {
                intersections: acc,
                object,
            };
            object.intersects(self, &mut collector);

            collector.intersections
        });

        Intersections::new(intersections)
    }
}

/// Accumulates `t` values as objects push them, attributing each to the
/// current object. Groups call `set_object` while recursing so hits land
/// on the leaf shape rather than the group.
struct Collector<'a> {
    intersections: Vec<Intersection<'a>>,
    object: &'a Object,
}

impl<'a> IntersectionPusher<'a> for Collector<'a> {
    fn t(&mut self, t: f64) {
        self.intersections.push(Intersection::new(t, self.object));
    }

    fn t_u_v(&mut self, t: f64, u: f64, v: f64) {
        self.intersections
            .push(Intersection::new(t, self.object).with_u_and_v(u, v));
    }

    fn set_object(&mut self, object: &'a Object) {
        self.object = object;
    }
}

impl Transform for Ray {
    fn transform(self, transformation: &Matrix) -> Self {
        Ray {
            origin: *transformation * self.origin,
            direction: *transformation * self.direction,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tuple::Tuple;

    #[test]
    fn computing_a_point_from_a_distance() {
        let ray = Ray {
            origin: Point::new(2.0, 3.0, 4.0),
            direction: Vector::new(1.0, 0.0, 0.0),
        };

        assert_eq!(ray.position(0.0), Point::new(2.0, 3.0, 4.0));
        assert_eq!(ray.position(1.0), Point::new(3.0, 3.0, 4.0));
        assert_eq!(ray.position(-1.0), Point::new(1.0, 3.0, 4.0));
        assert_eq!(ray.position(2.5), Point::new(4.5, 3.0, 4.0));
    }

    #[test]
    fn translating_a_ray() {
        let ray = Ray {
            origin: Point::new(1.0, 2.0, 3.0),
            direction: Vector::new(0.0, 1.0, 0.0),
        };
        let ray2 = ray.translate(3.0, 4.0, 5.0).transform();

        assert_eq!(ray2.origin, Point::new(4.0, 6.0, 8.0));
        assert_eq!(ray2.direction, Vector::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn scaling_a_ray() {
        let ray = Ray {
            origin: Point::new(1.0, 2.0, 3.0),
            direction: Vector::new(0.0, 1.0, 0.0),
        };
        let ray2 = ray.scale(2.0, 3.0, 4.0).transform();

        assert_eq!(ray2.origin, Point::new(2.0, 6.0, 12.0));
        assert_eq!(ray2.direction, Vector::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn intersecting_a_list_of_objects() {
        let objects = vec![
            Object::new_sphere(),
            Object::new_sphere().translate(0.0, 0.0, 10.0).transform(),
        ];
        let ray = Ray {
            origin: Point::new(0.0, 0.0, -5.0),
            direction: Vector::new(0.0, 0.0, 1.0),
        };

        let intersections = ray.intersects(&objects);

        assert_eq!(intersections.len(), 4);
        assert_eq!(intersections[0].t(), 4.0);
        assert_eq!(intersections[1].t(), 6.0);
        assert_eq!(intersections[2].t(), 14.0);
        assert_eq!(intersections[3].t(), 16.0);
    }
}
