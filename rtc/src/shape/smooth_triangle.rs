use serde::{Deserialize, Serialize};

use crate::{
    bounds::BoundingBox,
    intersection::{Intersection, IntersectionPusher},
    ray::Ray,
    shape::Triangle,
    tuple::{Point, Vector},
};

/// Triangle with a normal per vertex, interpolated at the hit point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmoothTriangle {
    triangle: Triangle,
    n1: Vector,
    n2: Vector,
    n3: Vector,
}

impl SmoothTriangle {
    pub fn new(p1: Point, p2: Point, p3: Point, n1: Vector, n2: Vector, n3: Vector) -> Self {
        Self {
            triangle: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }

    pub fn intersects<'a>(&self, ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
        self.triangle.intersects(ray, push);
    }

    pub fn normal_at(&self, hit: &Intersection) -> Vector {
        self.n2 * hit.u() + self.n3 * hit.v() + self.n1 * (1.0 - hit.u() - hit.v())
    }

    pub fn bounds(&self) -> BoundingBox {
        self.triangle.bounds()
    }

    pub fn p1(&self) -> Point {
        self.triangle.p1()
    }

    pub fn p2(&self) -> Point {
        self.triangle.p2()
    }

    pub fn p3(&self) -> Point {
        self.triangle.p3()
    }

    pub fn n1(&self) -> Vector {
        self.n1
    }

    pub fn n2(&self) -> Vector {
        self.n2
    }

    pub fn n3(&self) -> Vector {
        self.n3
    }
}
