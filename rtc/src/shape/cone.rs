use serde::{Deserialize, Serialize};

use crate::{
    bounds::BoundingBox,
    float::{ApproxEq, EPSILON},
    intersection::IntersectionPusher,
    ray::Ray,
    tuple::{Point, Tuple, Vector},
};

/// Double-napped cone around the y axis, the radius at height y being |y|.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    min: f64,
    max: f64,
    closed: bool,
}

impl Cone {
    pub fn new(min: f64, max: f64, closed: bool) -> Self {
        let (min, max) = if min < max { (min, max) } else { (max, min) };

        Cone { min, max, closed }
    }

    pub fn intersects<'a>(&self, ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
        let a = ray.direction.x().powi(2) - ray.direction.y().powi(2) + ray.direction.z().powi(2);

        let b = 2.0
            * (ray.origin.x() * ray.direction.x() - ray.origin.y() * ray.direction.y()
                + ray.origin.z() * ray.direction.z());

        let c = ray.origin.x().powi(2) - ray.origin.y().powi(2) + ray.origin.z().powi(2);

        if a.approx_eq(0.0) && !b.approx_eq(0.0) {
            // Parallel to one half of the cone, the ray still hits the other.
            push.t(c / (-2.0 * b));
        } else {
            let discriminant = b.powi(2) - 4.0 * a * c;

            if discriminant < 0.0 {
                return;
            }

            let double_a = 2.0 * a;
            let t0 = (-b - discriminant.sqrt()) / double_a;
            let t1 = (-b + discriminant.sqrt()) / double_a;

            let y0 = ray.origin.y() + t0 * ray.direction.y();
            if self.min < y0 && y0 < self.max {
                push.t(t0);
            }

            let y1 = ray.origin.y() + t1 * ray.direction.y();
            if self.min < y1 && y1 < self.max {
                push.t(t1);
            }
        }

        self.intersects_caps(ray, push);
    }

    fn check_cap(ray: &Ray, t: f64, radius: f64) -> bool {
        let x = ray.origin.x() + t * ray.direction.x();
        let z = ray.origin.z() + t * ray.direction.z();

        (x.powi(2) + z.powi(2)) <= radius.powi(2)
    }

    fn intersects_caps<'a>(&self, ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
        if !self.closed || ray.direction.y().approx_eq(0.0) {
            return;
        }

        let t = (self.min - ray.origin.y()) / ray.direction.y();
        if Self::check_cap(ray, t, self.min) {
            push.t(t);
        }

        let t = (self.max - ray.origin.y()) / ray.direction.y();
        if Self::check_cap(ray, t, self.max) {
            push.t(t);
        }
    }

    pub fn normal_at(&self, object_point: &Point) -> Vector {
        let dist = object_point.x().powi(2) + object_point.z().powi(2);

        if dist < 1.0 && object_point.y() >= (self.max - EPSILON) {
            Vector::new(0.0, 1.0, 0.0)
        } else if dist < 1.0 && object_point.y() <= (self.min + EPSILON) {
            Vector::new(0.0, -1.0, 0.0)
        } else {
            Vector::new(
                object_point.x(),
                if object_point.y() > 0.0 {
                    -dist.sqrt()
                } else {
                    dist.sqrt()
                },
                object_point.z(),
            )
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new()
            .with_min(Point::new(self.min, self.min, self.min))
            .with_max(Point::new(self.max, self.max, self.max))
    }
}

impl Default for Cone {
    fn default() -> Self {
        Cone {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            closed: false,
        }
    }
}
