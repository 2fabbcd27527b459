mod cone;
mod cube;
mod cylinder;
mod group;
mod plane;
mod smooth_triangle;
mod sphere;
mod triangle;

pub use cone::Cone;
pub use cylinder::Cylinder;
pub use group::{Group, GroupBuilder};
pub use smooth_triangle::SmoothTriangle;
pub use triangle::Triangle;

use serde::{Deserialize, Serialize};

use crate::{
    bounds::BoundingBox,
    intersection::{Intersection, IntersectionPusher},
    ray::Ray,
    tuple::{Point, Vector},
};

/// The geometry of an object, in its own local space. Stateless shapes are
/// plain variants; the others carry their parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Cone(Cone),
    Cube,
    Cylinder(Cylinder),
    // Placeholder used while assembling groups, never rendered.
    Dummy,
    Group(Group),
    Plane,
    SmoothTriangle(SmoothTriangle),
    Sphere,
    Triangle(Triangle),
}

impl Shape {
    pub fn intersects<'a>(&'a self, ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
        match self {
            Shape::Cone(c) => c.intersects(ray, push),
            Shape::Cube => cube::intersects(ray, push),
            Shape::Cylinder(c) => c.intersects(ray, push),
            Shape::Dummy => panic!("a dummy shape cannot be intersected"),
            Shape::Group(g) => g.intersects(ray, push),
            Shape::Plane => plane::intersects(ray, push),
            Shape::SmoothTriangle(t) => t.intersects(ray, push),
            Shape::Sphere => sphere::intersects(ray, push),
            Shape::Triangle(t) => t.intersects(ray, push),
        }
    }

    pub fn normal_at(&self, object_point: &Point, hit: &Intersection) -> Vector {
        match self {
            Shape::Cone(c) => c.normal_at(object_point),
            Shape::Cube => cube::normal_at(object_point),
            Shape::Cylinder(c) => c.normal_at(object_point),
            Shape::Dummy => panic!("a dummy shape has no normal"),
            Shape::Group(_) => unreachable!("normals are computed on group children"),
            Shape::Plane => plane::normal_at(object_point),
            Shape::SmoothTriangle(t) => t.normal_at(hit),
            Shape::Sphere => sphere::normal_at(object_point),
            Shape::Triangle(t) => t.normal_at(object_point),
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        match self {
            Shape::Cone(c) => c.bounds(),
            Shape::Cube => cube::bounds(),
            Shape::Cylinder(c) => c.bounds(),
            Shape::Dummy => BoundingBox::new(),
            Shape::Group(g) => g.bounds(),
            Shape::Plane => plane::bounds(),
            Shape::SmoothTriangle(t) => t.bounds(),
            Shape::Sphere => sphere::bounds(),
            Shape::Triangle(t) => t.bounds(),
        }
    }

    pub fn divide(self, threshold: usize) -> Self {
        match self {
            Shape::Group(g) => Shape::Group(g.divide(threshold)),
            other => other,
        }
    }

    // Group transformations are baked into children at build time, so the
    // incoming ray must not be converted to local space again.
    pub fn skip_world_to_local(&self) -> bool {
        matches!(self, Shape::Group(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_triangle(&self) -> Option<&Triangle> {
        match self {
            Shape::Triangle(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_smooth_triangle(&self) -> Option<&SmoothTriangle> {
        match self {
            Shape::SmoothTriangle(t) => Some(t),
            _ => None,
        }
    }
}
