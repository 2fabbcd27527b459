use serde::{Deserialize, Serialize};

use crate::{
    float::ApproxEq,
    matrix::Matrix,
    ray::Ray,
    transform::Transform,
    tuple::{Point, Tuple},
};

/// Axis-aligned bounding box. Starts inverted (min at +inf, max at -inf)
/// so the first `add_point` snaps it to that point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Point,
    max: Point,
}

impl BoundingBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn with_min(mut self, point: Point) -> Self {
        self.min = point;

        self
    }

    pub fn with_max(mut self, point: Point) -> Self {
        self.max = point;

        self
    }

    pub fn add_point(mut self, point: Point) -> Self {
        self.min = Point::new(
            f64::min(self.min.x(), point.x()),
            f64::min(self.min.y(), point.y()),
            f64::min(self.min.z(), point.z()),
        );

        self.max = Point::new(
            f64::max(self.max.x(), point.x()),
            f64::max(self.max.y(), point.y()),
            f64::max(self.max.z(), point.z()),
        );

        self
    }

    pub fn contains_point(&self, point: &Point) -> bool {
        self.min.x() <= point.x()
            && point.x() <= self.max.x()
            && self.min.y() <= point.y()
            && point.y() <= self.max.y()
            && self.min.z() <= point.z()
            && point.z() <= self.max.z()
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    /// Slab test. Only answers whether the ray hits the box at all, the
    /// actual distances are left to the shapes inside.
    pub fn is_intersected(&self, ray: &Ray) -> bool {
        let (xtmin, xtmax) =
            Self::check_axis(ray.origin.x(), ray.direction.x(), self.min.x(), self.max.x());
        let (ytmin, ytmax) =
            Self::check_axis(ray.origin.y(), ray.direction.y(), self.min.y(), self.max.y());
        let (ztmin, ztmax) =
            Self::check_axis(ray.origin.z(), ray.direction.z(), self.min.z(), self.max.z());

        let tmax = xtmax.min(ytmax.min(ztmax));
        if tmax < 0.0 {
            false
        } else {
            let tmin = xtmin.max(ytmin.max(ztmin));

            tmin <= tmax
        }
    }

    fn check_axis(origin: f64, direction: f64, min: f64, max: f64) -> (f64, f64) {
        let tmin = (min - origin) / direction;
        let tmax = (max - origin) / direction;

        if tmin > tmax {
            (tmax, tmin)
        } else {
            (tmin, tmax)
        }
    }

    /// Splits the box in two halves along its longest axis.
    pub fn split(&self) -> (BoundingBox, BoundingBox) {
        let dx = self.max.x() - self.min.x();
        let dy = self.max.y() - self.min.y();
        let dz = self.max.z() - self.min.z();

        let greatest = dx.max(dy.max(dz));

        let (mut x0, mut y0, mut z0) = (self.min.x(), self.min.y(), self.min.z());
        let (mut x1, mut y1, mut z1) = (self.max.x(), self.max.y(), self.max.z());

        if greatest.approx_eq(dx) {
            x0 += dx / 2.0;
            x1 = x0;
        } else if greatest.approx_eq(dy) {
            y0 += dy / 2.0;
            y1 = y0;
        } else {
            z0 += dz / 2.0;
            z1 = z0;
        }

        let mid_min = Point::new(x0, y0, z0);
        let mid_max = Point::new(x1, y1, z1);

        (
            BoundingBox::new().with_min(self.min).with_max(mid_max),
            BoundingBox::new().with_min(mid_min).with_max(self.max),
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox {
            min: Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
}

/// Merges two boxes.
impl std::ops::Add for BoundingBox {
    type Output = BoundingBox;

    fn add(self, rhs: BoundingBox) -> Self::Output {
        self.add_point(rhs.min()).add_point(rhs.max())
    }
}

impl Transform for BoundingBox {
    // Transforming the 8 corners keeps the result axis-aligned.
    fn transform(self, transformation: &Matrix) -> Self {
        let p1 = self.min;
        let p2 = Point::new(self.min.x(), self.min.y(), self.max.z());
        let p3 = Point::new(self.min.x(), self.max.y(), self.min.z());
        let p4 = Point::new(self.min.x(), self.max.y(), self.max.z());
        let p5 = Point::new(self.max.x(), self.min.y(), self.min.z());
        let p6 = Point::new(self.max.x(), self.min.y(), self.max.z());
        let p7 = Point::new(self.max.x(), self.max.y(), self.min.z());
        let p8 = self.max;

        Self::new()
            .add_point(*transformation * p1)
            .add_point(*transformation * p2)
            .add_point(*transformation * p3)
            .add_point(*transformation * p4)
            .add_point(*transformation * p5)
            .add_point(*transformation * p6)
            .add_point(*transformation * p7)
            .add_point(*transformation * p8)
    }
}
