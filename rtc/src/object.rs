use serde::{Deserialize, Serialize};

use crate::{
    bounds::BoundingBox,
    intersection::{Intersection, IntersectionPusher},
    material::Material,
    matrix::Matrix,
    ray::Ray,
    shape::{Cone, Cylinder, GroupBuilder, Shape, SmoothTriangle, Triangle},
    transform::Transform,
    tuple::{Point, Vector},
};

/// A shape placed in the world: geometry plus material, transformation and
/// the caches derived from them. The inverse and inverse transpose are
/// computed once when the transformation is set, never per ray.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Object {
    bounding_box: BoundingBox,
    has_shadow: bool,
    material: Material,
    shape: Shape,
    transformation: Matrix,
    transformation_inverse: Matrix,
    transformation_inverse_transpose: Matrix,
}

impl Object {
    pub fn new_cone(min: f64, max: f64, closed: bool) -> Self {
        let shape = Shape::Cone(Cone::new(min, max, closed));
        let bounding_box = shape.bounds();

        Object {
            shape,
            bounding_box,
            ..Default::default()
        }
    }

    pub fn new_cube() -> Self {
        let shape = Shape::Cube;
        let bounding_box = shape.bounds();

        Object {
            shape,
            bounding_box,
            ..Default::default()
        }
    }

    pub fn new_cylinder(min: f64, max: f64, closed: bool) -> Self {
        let shape = Shape::Cylinder(Cylinder::new(min, max, closed));
        let bounding_box = shape.bounds();

        Object {
            shape,
            bounding_box,
            ..Default::default()
        }
    }

    pub(crate) fn new_dummy() -> Self {
        Object {
            shape: Shape::Dummy,
            ..Default::default()
        }
    }

    pub fn new_group(children: Vec<Object>) -> Self {
        let children_builders = children
            .iter()
            .filter_map(|child| match child.shape() {
                Shape::Group(g) if g.children().is_empty() => None,
                _ => Some(GroupBuilder::from_object(child)),
            })
            .collect();

        let object = GroupBuilder::Node(Object::new_dummy(), children_builders).build();

        Object {
            bounding_box: object.shape.bounds(),
            ..object
        }
    }

    pub fn new_plane() -> Self {
        let shape = Shape::Plane;
        let bounding_box = shape.bounds();

        Object {
            shape,
            bounding_box,
            ..Default::default()
        }
    }

    pub fn new_smooth_triangle(
        p1: Point,
        p2: Point,
        p3: Point,
        n1: Vector,
        n2: Vector,
        n3: Vector,
    ) -> Self {
        let shape = Shape::SmoothTriangle(SmoothTriangle::new(p1, p2, p3, n1, n2, n3));
        let bounding_box = shape.bounds();

        Object {
            shape,
            bounding_box,
            ..Default::default()
        }
    }

    pub fn new_sphere() -> Self {
        let shape = Shape::Sphere;
        let bounding_box = shape.bounds();

        Object {
            shape,
            bounding_box,
            ..Default::default()
        }
    }

    pub fn new_triangle(p1: Point, p2: Point, p3: Point) -> Self {
        let shape = Shape::Triangle(Triangle::new(p1, p2, p3));
        let bounding_box = shape.bounds();

        Object {
            shape,
            bounding_box,
            ..Default::default()
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;

        self
    }

    pub fn with_shadow(mut self, has_shadow: bool) -> Self {
        self.has_shadow = has_shadow;

        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self.bounding_box = self.shape.bounds();

        self
    }

    pub fn with_transformation(mut self, transformation: Matrix) -> Self {
        self.transformation = transformation;
        self.transformation_inverse = self.transformation.invert();
        self.transformation_inverse_transpose = self.transformation_inverse.transpose();
        self.bounding_box = self.shape_bounds().transform(&self.transformation);

        self
    }

    pub fn intersects<'a>(&'a self, ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
        if self.shape.skip_world_to_local() {
            self.shape.intersects(ray, push)
        } else {
            let local_ray = ray.transform(&self.transformation_inverse);

            self.shape.intersects(&local_ray, push)
        }
    }

    pub fn normal_at(&self, world_point: &Point, hit: &Intersection) -> Vector {
        let local_point = self.world_to_object(world_point);
        let local_normal = self.shape.normal_at(&local_point, hit);

        self.normal_to_world(&local_normal)
    }

    fn world_to_object(&self, world_point: &Point) -> Point {
        self.transformation_inverse * *world_point
    }

    fn normal_to_world(&self, normal: &Vector) -> Vector {
        (self.transformation_inverse_transpose * *normal).normalize()
    }

    pub fn has_shadow(&self) -> bool {
        self.has_shadow
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn transformation(&self) -> &Matrix {
        &self.transformation
    }

    pub fn transformation_inverse(&self) -> &Matrix {
        &self.transformation_inverse
    }

    /// Bounds of the bare shape, in object space.
    pub fn shape_bounds(&self) -> BoundingBox {
        self.shape.bounds()
    }

    /// Bounds in the parent's space, transformation applied.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    pub fn divide(self, threshold: usize) -> Self {
        Self {
            shape: self.shape.divide(threshold),
            ..self
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        Object {
            bounding_box: Shape::Sphere.bounds(),
            has_shadow: true,
            material: Material::new(),
            shape: Shape::Sphere,
            transformation: Matrix::id(),
            transformation_inverse: Matrix::id(),
            transformation_inverse_transpose: Matrix::id(),
        }
    }
}

impl Transform for Object {
    fn transform(self, transformation: &Matrix) -> Self {
        match self.shape() {
            Shape::Group(g) => {
                // Groups are rebuilt through a GroupBuilder so the new
                // transformation gets pushed down to the children.
                let children_builders = g.children().iter().map(GroupBuilder::from_object).collect();

                GroupBuilder::Node(
                    Object::new_dummy().with_transformation(*transformation),
                    children_builders,
                )
                .build()
            }
            _ => {
                let new_transformation = *transformation * self.transformation;
                self.with_transformation(new_transformation)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tuple::Tuple;

    #[test]
    fn the_default_transformation_is_the_identity() {
        let s = Object::new_sphere();
        assert_eq!(s.transformation, Matrix::id());
    }

    #[test]
    fn converting_a_point_from_world_to_object_space() {
        let s = Object::new_sphere()
            .translate(5.0, 0.0, 0.0)
            .scale(2.0, 2.0, 2.0)
            .rotate_y(std::f64::consts::PI / 2.0)
            .transform();

        assert_eq!(
            s.world_to_object(&Point::new(-2.0, 0.0, -10.0)),
            Point::new(0.0, 0.0, -1.0)
        );
    }

    #[test]
    fn converting_a_point_from_world_to_object_space_within_groups() {
        let s = Object::new_sphere().translate(5.0, 0.0, 0.0).transform();
        let g2 = Object::new_group(vec![s])
            .scale(2.0, 2.0, 2.0)
            .rotate_y(std::f64::consts::PI / 2.0)
            .transform();
        let g1 = Object::new_group(vec![g2]);

        let group_g2 = &g1.shape().as_group().unwrap().children()[0];
        let group_s = &group_g2.shape().as_group().unwrap().children()[0];

        assert_eq!(
            group_s.world_to_object(&Point::new(-2.0, 0.0, -10.0)),
            Point::new(0.0, 0.0, -1.0)
        );
    }

    #[test]
    fn converting_a_normal_from_object_to_world_space() {
        let s = Object::new_sphere().translate(5.0, 0.0, 0.0).transform();
        let g2 = Object::new_group(vec![s]).scale(1.0, 2.0, 3.0).transform();
        let g1 = Object::new_group(vec![g2])
            .rotate_y(std::f64::consts::PI / 2.0)
            .transform();

        let group_g2 = &g1.shape().as_group().unwrap().children()[0];
        let group_s = &group_g2.shape().as_group().unwrap().children()[0];

        let sqrt3div3 = 3.0_f64.sqrt() / 3.0;

        assert_eq!(
            group_s.normal_to_world(&Vector::new(sqrt3div3, sqrt3div3, sqrt3div3)),
            Vector::new(0.2857, 0.4286, -0.8571)
        );
    }

    #[test]
    fn finding_the_normal_on_a_child_object() {
        let s = Object::new_sphere().translate(5.0, 0.0, 0.0).transform();
        let g2 = Object::new_group(vec![s]).scale(1.0, 2.0, 3.0).transform();
        let g1 = Object::new_group(vec![g2])
            .rotate_y(std::f64::consts::PI / 2.0)
            .transform();

        let group_g2 = &g1.shape().as_group().unwrap().children()[0];
        let group_s = &group_g2.shape().as_group().unwrap().children()[0];

        let other = Object::new_sphere();
        let hit = Intersection::new(f64::INFINITY, &other);

        assert_eq!(
            group_s.normal_at(&Point::new(1.7321, 1.1547, -5.5774), &hit),
            Vector::new(0.2857, 0.4286, -0.8571)
        );
    }
}
