use serde::{Deserialize, Serialize};

use crate::{
    bounds::BoundingBox,
    intersection::IntersectionPusher,
    matrix::Matrix,
    object::Object,
    ray::Ray,
    shape::Shape,
    transform::Transform,
};

/// A collection of objects sharing a transformation. The group's own
/// transformation is baked into its children by [GroupBuilder], so at render
/// time a group is only a bounding box plus a list of children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    bounding_box: BoundingBox,
    children: Vec<Object>,
}

impl Group {
    fn new(children: Vec<Object>) -> Self {
        let bounding_box = Self::mk_bounding_box(&children);

        Self {
            bounding_box,
            children,
        }
    }

    pub fn intersects<'a>(&'a self, ray: &Ray, push: &mut impl IntersectionPusher<'a>) {
        if self.bounds().is_intersected(ray) {
            for child in &self.children {
                push.set_object(child);
                child.intersects(ray, push);
            }
        }
    }

    pub fn children(&self) -> &[Object] {
        &self.children
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounding_box
    }

    fn partition(self) -> Self {
        let mut left_children = Vec::with_capacity(self.children.len());
        let mut right_children = Vec::with_capacity(self.children.len());
        let mut children = Vec::with_capacity(self.children.len());

        let (left_bbox, right_bbox) = self.bounding_box.split();
        for child in self.children {
            if left_bbox.contains(&child.bounding_box()) {
                left_children.push(child);
            } else if right_bbox.contains(&child.bounding_box()) {
                right_children.push(child);
            } else {
                // Children straddling the split stay at this level.
                children.push(child);
            }
        }

        if !left_children.is_empty() {
            children.push(Object::new_dummy().with_shape(Shape::Group(Group::new(left_children))));
        }

        if !right_children.is_empty() {
            children.push(Object::new_dummy().with_shape(Shape::Group(Group::new(right_children))));
        }

        Self { children, ..self }
    }

    /// Recursively splits groups with more than `threshold` children into
    /// spatial sub-groups, so ray traversal can prune whole subtrees.
    pub fn divide(self, threshold: usize) -> Self {
        let g = if self.children.len() <= threshold {
            self
        } else {
            self.partition()
        };

        let children = g
            .children
            .into_iter()
            .map(|child| child.divide(threshold))
            .collect();

        Self { children, ..g }
    }

    fn mk_bounding_box(children: &[Object]) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        for child in children {
            bbox = bbox + child.bounding_box();
        }

        bbox
    }
}

/// Intermediate tree used while assembling groups. Building it walks the
/// tree once, multiplying each node's transformation into its children, so
/// the finished objects carry their world transformation directly.
#[derive(Clone, Debug)]
pub enum GroupBuilder {
    Leaf(Object),
    Node(Object, Vec<GroupBuilder>),
}

impl GroupBuilder {
    pub fn build(self) -> Object {
        Self::rec(self, &Matrix::id())
    }

    fn rec(gb: Self, transformation: &Matrix) -> Object {
        match gb {
            GroupBuilder::Leaf(o) => o.transform(transformation),
            GroupBuilder::Node(group, children) => {
                let child_transformation = *transformation * *group.transformation();
                let new_children = children
                    .into_iter()
                    .map(|child| Self::rec(child, &child_transformation))
                    .collect();

                // The node's transformation now lives in its children, so
                // the rebuilt group gets the identity to avoid applying it
                // twice.
                group
                    .with_shape(Shape::Group(Group::new(new_children)))
                    .with_transformation(Matrix::id())
            }
        }
    }

    pub fn from_object(object: &Object) -> Self {
        match object.shape() {
            Shape::Group(g) => GroupBuilder::Node(
                object.clone(),
                g.children()
                    .iter()
                    .filter_map(|child| match child.shape() {
                        Shape::Group(g) if g.children().is_empty() => None,
                        _ => Some(GroupBuilder::from_object(child)),
                    })
                    .collect(),
            ),
            _ => GroupBuilder::Leaf(object.clone()),
        }
    }
}
