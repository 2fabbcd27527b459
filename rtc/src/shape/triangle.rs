use serde::{Deserialize, Serialize};

use crate::{
    bounds::BoundingBox,
    float::EPSILON,
    intersection::IntersectionPusher,
    ray::Ray,
    tuple::{Point, Vector},
};

/// Flat triangle with its edges and normal precomputed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    p1: Point,
    p2: Point,
    p3: Point,
    e1: Vector,
    e2: Vector,
    normal: Vector,
}

impl Triangle {
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = (e2 * e1).normalize();

        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal,
        }
    }

    /// Moeller-Trumbore. The barycentric u and v are pushed along with t
    /// because smooth triangles delegate here and need them for normal
    /// interpolation.
    pub fn intersects<'a>(&self, ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
        let dir_cross_e2 = ray.direction * self.e2;
        let det = self.e1 ^ dir_cross_e2;

        if det.abs() < EPSILON {
            return;
        }

        let f = 1.0 / det;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * (p1_to_origin ^ dir_cross_e2);

        if !(0.0..=1.0).contains(&u) {
            return;
        }

        let origin_cross_e1 = p1_to_origin * self.e1;
        let v = f * (ray.direction ^ origin_cross_e1);

        if v < 0.0 || (u + v) > 1.0 {
            return;
        }

        let t = f * (self.e2 ^ origin_cross_e1);

        push.t_u_v(t, u, v);
    }

    pub fn normal_at(&self, _object_point: &Point) -> Vector {
        self.normal
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new()
            .add_point(self.p1)
            .add_point(self.p2)
            .add_point(self.p3)
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn p3(&self) -> Point {
        self.p3
    }
}
