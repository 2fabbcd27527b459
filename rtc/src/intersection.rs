use std::cmp::Ordering;

use crate::{
    float::EPSILON,
    object::Object,
    ray::Ray,
    tuple::{Point, Vector},
};

#[derive(Clone, Debug, PartialEq)]
pub struct Intersection<'a> {
    t: f64,
    object: &'a Object,
    // Barycentric coordinates, only meaningful for smooth triangles.
    u: f64,
    v: f64,
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Object) -> Self {
        Self {
            t,
            object,
            u: 0.0,
            v: 0.0,
        }
    }

    pub fn with_u_and_v(mut self, u: f64, v: f64) -> Self {
        self.u = u;
        self.v = v;

        self
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    pub fn u(&self) -> f64 {
        self.u
    }

    pub fn v(&self) -> f64 {
        self.v
    }
}

impl PartialOrd for Intersection<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Intersection<'_> {
    // NaN sorts last so it can never become the hit.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.t.is_nan() {
            Ordering::Greater
        } else if other.t.is_nan() {
            Ordering::Less
        } else if self.t > other.t {
            Ordering::Greater
        } else if self.t < other.t {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

impl Eq for Intersection<'_> {}

/// All intersections of a ray with a world, sorted by `t`.
#[derive(Debug)]
pub struct Intersections<'a>(Vec<Intersection<'a>>);

impl<'a> Intersections<'a> {
    pub fn new(mut intersections: Vec<Intersection<'a>>) -> Self {
        intersections.sort_unstable();
        Intersections(intersections)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The visible intersection: lowest non-negative `t`.
    pub fn hit(&self) -> Option<&Intersection<'a>> {
        self.0.iter().find(|i| i.t >= 0.0)
    }

    pub fn hit_index(&self) -> Option<usize> {
        self.0.iter().position(|i| i.t >= 0.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection<'a>> {
        self.0.iter()
    }
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Self {
        Self::new(intersections)
    }
}

impl<'a> std::ops::Index<usize> for Intersections<'a> {
    type Output = Intersection<'a>;

    fn index(&self, i: usize) -> &Intersection<'a> {
        &self.0[i]
    }
}

/// Sink for the `t` values a shape produces.
///
/// Shapes work in local space and only know distances; the pusher owns the
/// object attribution, which lets groups switch the object as they recurse
/// into their children.
pub trait IntersectionPusher<'a> {
    fn t(&mut self, t: f64);
    fn t_u_v(&mut self, t: f64, u: f64, v: f64);
    fn set_object(&mut self, object: &'a Object);
}

/// Everything `shade_hit` needs, computed once per hit.
#[derive(Debug)]
pub struct IntersectionState<'a> {
    cos_i: f64,
    eye_v: Vector,
    inside: bool,
    n1: f64,
    n2: f64,
    normal_v: Vector,
    object: &'a Object,
    over_point: Point,
    point: Point,
    reflect_v: Vector,
    t: f64,
    under_point: Point,
}

impl<'a> IntersectionState<'a> {
    pub fn new(intersections: &Intersections<'a>, intersection_index: usize, ray: &Ray) -> Self {
        let intersection = &intersections[intersection_index];

        // Walk the intersection list to find the refractive indices on
        // both sides of the hit, tracking which objects the ray is
        // currently inside of.
        let mut containers = Vec::<&Object>::with_capacity(intersections.len());
        let mut n1 = None;
        let mut n2 = None;

        for (index, i) in intersections.iter().enumerate() {
            let is_the_hit = index == intersection_index;

            if is_the_hit {
                n1 = containers
                    .last()
                    .map(|object| object.material().refractive_index);
            }

            match containers
                .iter()
                .position(|&object| std::ptr::eq(object, i.object))
            {
                Some(pos) => {
                    let _ = containers.remove(pos);
                }
                None => containers.push(i.object),
            }

            if is_the_hit {
                n2 = containers
                    .last()
                    .map(|object| object.material().refractive_index);
                break;
            }
        }

        let point = ray.position(intersection.t);
        let eye_v = -ray.direction;
        let normal_v = intersection.object.normal_at(&point, intersection);
        let (inside, normal_v) = if normal_v ^ eye_v < 0.0 {
            (true, -normal_v)
        } else {
            (false, normal_v)
        };
        let reflect_v = ray.direction.reflect(&normal_v);

        Self {
            cos_i: normal_v ^ eye_v,
            eye_v,
            inside,
            n1: n1.unwrap_or(1.0),
            n2: n2.unwrap_or(1.0),
            normal_v,
            object: intersection.object,
            over_point: point + normal_v * EPSILON,
            point,
            reflect_v,
            t: intersection.t,
            under_point: point - normal_v * EPSILON,
        }
    }

    /// Schlick's approximation of the Fresnel reflectance.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.cos_i;

        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1.0 - cos.powi(2));

            if sin2_t > 1.0 {
                // Total internal reflection.
                return 1.0;
            }

            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);

        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn cos_i(&self) -> f64 {
        self.cos_i
    }

    pub fn eye_v(&self) -> Vector {
        self.eye_v
    }

    pub fn inside(&self) -> bool {
        self.inside
    }

    pub fn n(&self) -> (f64, f64) {
        (self.n1, self.n2)
    }

    pub fn normal_v(&self) -> Vector {
        self.normal_v
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn over_point(&self) -> Point {
        self.over_point
    }

    pub fn reflect_v(&self) -> Vector {
        self.reflect_v
    }

    pub fn under_point(&self) -> Point {
        self.under_point
    }
}
