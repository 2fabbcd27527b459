//! Axis-aligned cube spanning -1 to 1 on every axis.

use crate::{
    bounds::BoundingBox,
    float::ApproxEq,
    intersection::IntersectionPusher,
    ray::Ray,
    tuple::{Point, Tuple, Vector},
};

pub fn intersects<'a>(ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
    let (xtmin, xtmax) = check_axis(ray.origin.x(), ray.direction.x());
    let (ytmin, ytmax) = check_axis(ray.origin.y(), ray.direction.y());
    let (ztmin, ztmax) = check_axis(ray.origin.z(), ray.direction.z());

    let tmax = xtmax.min(ytmax.min(ztmax));
    if tmax < 0.0 {
        return;
    }

    let tmin = xtmin.max(ytmin.max(ztmin));

    if tmin <= tmax {
        push.t(tmin);
        push.t(tmax);
    }
}

fn check_axis(origin: f64, direction: f64) -> (f64, f64) {
    // Dividing by zero yields the infinities the min/max chain expects, so
    // parallel axes need no special case.
    let tmin = (-1.0 - origin) / direction;
    let tmax = (1.0 - origin) / direction;

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

pub fn normal_at(object_point: &Point) -> Vector {
    let x = object_point.x();
    let y = object_point.y();
    let z = object_point.z();

    let max_c = x.abs().max(y.abs()).max(z.abs());

    if max_c.approx_eq(x.abs()) {
        Vector::new(x, 0.0, 0.0)
    } else if max_c.approx_eq(y.abs()) {
        Vector::new(0.0, y, 0.0)
    } else {
        Vector::new(0.0, 0.0, z)
    }
}

pub fn bounds() -> BoundingBox {
    BoundingBox::new()
        .with_min(Point::new(-1.0, -1.0, -1.0))
        .with_max(Point::new(1.0, 1.0, 1.0))
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
    fn a_ray_intersects_a_cube() {
        let tests = vec![
            (
                Point::new(5.0, 0.5, 0.0),
                Vector::new(-1.0, 0.0, 0.0),
                4.0,
                6.0,
            ),
            (
                Point::new(-5.0, 0.5, 0.0),
                Vector::new(1.0, 0.0, 0.0),
                4.0,
                6.0,
            ),
            (
                Point::new(0.5, 5.0, 0.0),
                Vector::new(0.0, -1.0, 0.0),
                4.0,
                6.0,
            ),
            (
                Point::new(0.5, -5.0, 0.0),
                Vector::new(0.0, 1.0, 0.0),
                4.0,
                6.0,
            ),
            (
                Point::new(0.5, 0.0, 5.0),
                Vector::new(0.0, 0.0, -1.0),
                4.0,
                6.0,
            ),
            (
                Point::new(0.5, 0.0, -5.0),
                Vector::new(0.0, 0.0, 1.0),
                4.0,
                6.0,
            ),
            (
                Point::new(0.0, 0.5, 0.0),
                Vector::new(0.0, 0.0, 1.0),
                -1.0,
                1.0,
            ),
        ];

        for (origin, direction, t1, t2) in tests {
            let ray = Ray { origin, direction };
            let mut push = Push { xs: vec![] };
            intersects(&ray, &mut push);

            assert_eq!(push.xs.len(), 2);
            assert!(push.xs[0].approx_eq(t1));
            assert!(push.xs[1].approx_eq(t2));
        }
    }

    #[test]
    fn a_ray_misses_a_cube() {
        let tests = vec![
            (
                Point::new(-2.0, 0.0, 0.0),
                Vector::new(0.2673, 0.5345, 0.8018),
            ),
            (
                Point::new(0.0, -2.0, 0.0),
                Vector::new(0.8018, 0.2673, 0.5345),
            ),
            (
                Point::new(0.0, 0.0, -2.0),
                Vector::new(0.5345, 0.8018, 0.2673),
            ),
            (Point::new(2.0, 0.0, 2.0), Vector::new(0.0, 0.0, -1.0)),
            (Point::new(0.0, 2.0, 2.0), Vector::new(0.0, -1.0, 0.0)),
            (Point::new(2.0, 2.0, 0.0), Vector::new(-1.0, 0.0, 0.0)),
            (Point::new(0.0, 0.0, 2.0), Vector::new(0.0, 0.0, 1.0)),
        ];

        for (origin, direction) in tests {
            let ray = Ray { origin, direction };
            let mut push = Push { xs: vec![] };
            intersects(&ray, &mut push);

            assert!(push.xs.is_empty());
        }
    }

    #[test]
    fn the_normal_on_the_surface_of_a_cube() {
        let tests = vec![
            (Point::new(1.0, 0.5, -0.8), Vector::new(1.0, 0.0, 0.0)),
            (Point::new(-1.0, -0.2, -0.9), Vector::new(-1.0, 0.0, 0.0)),
            (Point::new(-0.4, 1.0, -0.1), Vector::new(0.0, 1.0, 0.0)),
            (Point::new(0.3, -1.0, -0.7), Vector::new(0.0, -1.0, 0.0)),
            (Point::new(-0.6, 0.3, 1.0), Vector::new(0.0, 0.0, 1.0)),
            (Point::new(0.4, 0.4, -1.0), Vector::new(0.0, 0.0, -1.0)),
            (Point::new(1.0, 1.0, 1.0), Vector::new(1.0, 0.0, 0.0)),
            (Point::new(-1.0, -1.0, -1.0), Vector::new(-1.0, 0.0, 0.0)),
        ];

        for (point, normal) in tests {
            assert_eq!(normal_at(&point), normal);
        }
    }

    #[test]
    fn a_cube_has_a_bounding_box() {
        let c = Object::new_cube();
        assert_eq!(c.shape_bounds().min(), Point::new(-1.0, -1.0, -1.0));
        assert_eq!(c.shape_bounds().max(), Point::new(1.0, 1.0, 1.0));
    }
}
