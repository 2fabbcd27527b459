//! Unit sphere centered on the origin. Position and radius come from the
//! owning object's transformation.

use crate::{
    bounds::BoundingBox,
    intersection::IntersectionPusher,
    ray::Ray,
    tuple::{Point, Tuple, Vector},
};

pub fn intersects<'a>(ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
    let sphere_to_ray = ray.origin - Point::zero();

    let a = ray.direction ^ ray.direction;
    let b = 2.0 * (ray.direction ^ sphere_to_ray);
    let c = (sphere_to_ray ^ sphere_to_ray) - 1.0;
    let discriminant = b.powi(2) - 4.0 * a * c;

    if discriminant >= 0.0 {
        let sqrt_discriminant = discriminant.sqrt();
        let double_a = 2.0 * a;

        push.t((-b - sqrt_discriminant) / double_a);
        push.t((-b + sqrt_discriminant) / double_a);
    }
}

pub fn normal_at(object_point: &Point) -> Vector {
    *object_point - Point::zero()
}

pub fn bounds() -> BoundingBox {
    BoundingBox::new()
        .with_min(Point::new(-1.0, -1.0, -1.0))
        .with_max(Point::new(1.0, 1.0, 1.0))
}
