//! The xz plane.

use crate::{
    bounds::BoundingBox,
    float::EPSILON,
    intersection::IntersectionPusher,
    ray::Ray,
    tuple::{Point, Tuple, Vector},
};

pub fn intersects<'a>(ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
    if ray.direction.y().abs() >= EPSILON {
        push.t(-ray.origin.y() / ray.direction.y());
    }
}

pub fn normal_at(_object_point: &Point) -> Vector {
    Vector::new(0.0, 1.0, 0.0)
}

pub fn bounds() -> BoundingBox {
    BoundingBox::new()
        .with_min(Point::new(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY))
        .with_max(Point::new(f64::INFINITY, 0.0, f64::INFINITY))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::object::Object;

    struct Push {
        xs: Vec<f64>,
    }

    impl IntersectionPusher<'_> for Push {
        fn t(&mut self, t: f64) {
            self.xs.push(t);
        }
        fn t_u_v(&mut self, _t: f64, _u: f64, _v: f64) {
            panic!();
        }
        fn set_object(&mut self, _object: &'_ Object) {
            panic!();
        }
    }

    #[test]
    fn the_normal_of_a_plane_is_constant_everywhere() {
        assert_eq!(
            normal_at(&Point::new(0.0, 0.0, 0.0)),
            Vector::new(0.0, 1.0, 0.0)
        );
        assert_eq!(
            normal_at(&Point::new(10.0, 0.0, -10.0)),
            Vector::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn intersecting_with_a_parallel_ray() {
        let ray = Ray {
            origin: Point::new(0.0, 10.0, 0.0),
            direction: Vector::new(0.0, 0.0, 1.0),
        };

        let mut push = Push { xs: vec![] };
        intersects(&ray, &mut push);

        assert!(push.xs.is_empty());
    }

    #[test]
    fn intersecting_with_a_coplanar_ray() {
        let ray = Ray {
            origin: Point::zero(),
            direction: Vector::new(0.0, 0.0, 1.0),
        };

        let mut push = Push { xs: vec![] };
        intersects(&ray, &mut push);

        assert!(push.xs.is_empty());
    }

    #[test]
    fn a_ray_intersecting_from_above() {
        let ray = Ray {
            origin: Point::new(0.0, 1.0, 0.0),
            direction: Vector::new(0.0, -1.0, 0.0),
        };

        let mut push = Push { xs: vec![] };
        intersects(&ray, &mut push);

        assert_eq!(push.xs, vec![1.0]);
    }

    #[test]
    fn a_ray_intersecting_from_below() {
        let ray = Ray {
            origin: Point::new(0.0, -1.0, 0.0),
            direction: Vector::new(0.0, 1.0, 0.0),
        };

        let mut push = Push { xs: vec![] };
        intersects(&ray, &mut push);

        assert_eq!(push.xs, vec![1.0]);
    }
}
