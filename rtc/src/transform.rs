use crate::{
    matrix::Matrix,
    tuple::{Point, Tuple, Vector},
};

pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
    let mut res = Matrix::id();
    res[(0, 3)] = x;
    res[(1, 3)] = y;
    res[(2, 3)] = z;

    res
}

pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
    let mut res = Matrix::id();
    res[(0, 0)] = x;
    res[(1, 1)] = y;
    res[(2, 2)] = z;

    res
}

pub fn rotation_x(angle: f64) -> Matrix {
    let mut res = Matrix::id();
    res[(1, 1)] = f64::cos(angle);
    res[(1, 2)] = -f64::sin(angle);
    res[(2, 1)] = f64::sin(angle);
    res[(2, 2)] = f64::cos(angle);

    res
}

pub fn rotation_y(angle: f64) -> Matrix {
    let mut res = Matrix::id();
    res[(0, 0)] = f64::cos(angle);
    res[(0, 2)] = f64::sin(angle);
    res[(2, 0)] = -f64::sin(angle);
    res[(2, 2)] = f64::cos(angle);

    res
}

pub fn rotation_z(angle: f64) -> Matrix {
    let mut res = Matrix::id();
    res[(0, 0)] = f64::cos(angle);
    res[(0, 1)] = -f64::sin(angle);
    res[(1, 0)] = f64::sin(angle);
    res[(1, 1)] = f64::cos(angle);

    res
}

pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Matrix {
    let mut res = Matrix::id();
    res[(0, 1)] = xy;
    res[(0, 2)] = xz;
    res[(1, 0)] = yx;
    res[(1, 2)] = yz;
    res[(2, 0)] = zx;
    res[(2, 1)] = zy;

    res
}

/// Builds the world-to-camera matrix from an eye position, a target and an
/// up hint.
pub fn view_transform(from: &Point, to: &Point, up: &Vector) -> Matrix {
    let forward = (*to - *from).normalize();
    let left = forward * up.normalize();
    let true_up = left * forward;

    let mut orientation = Matrix::id();
    orientation[(0, 0)] = left.x();
    orientation[(0, 1)] = left.y();
    orientation[(0, 2)] = left.z();
    orientation[(1, 0)] = true_up.x();
    orientation[(1, 1)] = true_up.y();
    orientation[(1, 2)] = true_up.z();
    orientation[(2, 0)] = -forward.x();
    orientation[(2, 1)] = -forward.y();
    orientation[(2, 2)] = -forward.z();

    orientation * translation(-from.x(), -from.y(), -from.z())
}

/// Anything that can have a transformation matrix applied to it.
///
/// The fluent methods return a [TransformationBuilder] so chained calls
/// accumulate into a single matrix; `transform()` applies it. Chained
/// operations compose left-to-right in application order:
/// `obj.scale(..).translate(..)` scales first, then translates.
pub trait Transform {
    fn transform(self, transformation: &Matrix) -> Self;

    fn translate(self, x: f64, y: f64, z: f64) -> TransformationBuilder<Self>
    where
        Self: Sized,
    {
        TransformationBuilder {
            transformation: translation(x, y, z),
            inner: self,
        }
    }

    fn scale(self, x: f64, y: f64, z: f64) -> TransformationBuilder<Self>
    where
        Self: Sized,
    {
        TransformationBuilder {
            transformation: scaling(x, y, z),
            inner: self,
        }
    }

    fn rotate_x(self, angle: f64) -> TransformationBuilder<Self>
    where
        Self: Sized,
    {
        TransformationBuilder {
            transformation: rotation_x(angle),
            inner: self,
        }
    }

    fn rotate_y(self, angle: f64) -> TransformationBuilder<Self>
    where
        Self: Sized,
    {
        TransformationBuilder {
            transformation: rotation_y(angle),
            inner: self,
        }
    }

    fn rotate_z(self, angle: f64) -> TransformationBuilder<Self>
    where
        Self: Sized,
    {
        TransformationBuilder {
            transformation: rotation_z(angle),
            inner: self,
        }
    }

    fn shear(self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> TransformationBuilder<Self>
    where
        Self: Sized,
    {
        TransformationBuilder {
            transformation: shearing(xy, xz, yx, yz, zx, zy),
            inner: self,
        }
    }
}

pub struct TransformationBuilder<T> {
    transformation: Matrix,
    inner: T,
}

impl<T> TransformationBuilder<T>
where
    T: Transform,
{
    pub fn transform(self) -> T {
        self.inner.transform(&self.transformation)
    }

    pub fn translate(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transformation = translation(x, y, z) * self.transformation;
        self
    }

    pub fn scale(mut self, x: f64, y: f64, z: f64) -> Self {
        self.transformation = scaling(x, y, z) * self.transformation;
        self
    }

    pub fn rotate_x(mut self, angle: f64) -> Self {
        self.transformation = rotation_x(angle) * self.transformation;
        self
    }

    pub fn rotate_y(mut self, angle: f64) -> Self {
        self.transformation = rotation_y(angle) * self.transformation;
        self
    }

    pub fn rotate_z(mut self, angle: f64) -> Self {
        self.transformation = rotation_z(angle) * self.transformation;
        self
    }

    pub fn shear(mut self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        self.transformation = shearing(xy, xz, yx, yz, zx, zy) * self.transformation;
        self
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn translating_a_point() {
        let transform = translation(5.0, -3.0, 2.0);
        let p = Point::new(-3.0, 4.0, 5.0);

        assert_eq!(transform * p, Point::new(2.0, 1.0, 7.0));
    }

    #[test]
    fn translating_by_the_inverse_moves_in_reverse() {
        let transform = translation(5.0, -3.0, 2.0);
        let p = Point::new(-3.0, 4.0, 5.0);

        assert_eq!(transform.invert() * p, Point::new(-8.0, 7.0, 3.0));
    }

    #[test]
    fn scaling_a_vector() {
        let transform = scaling(2.0, 3.0, 4.0);
        let v = Vector::new(-4.0, 6.0, 8.0);

        assert_eq!(transform * v, Vector::new(-8.0, 18.0, 32.0));
    }

    #[test]
    fn reflection_is_scaling_by_a_negative_value() {
        let transform = scaling(-1.0, 1.0, 1.0);
        let p = Point::new(2.0, 3.0, 4.0);

        assert_eq!(transform * p, Point::new(-2.0, 3.0, 4.0));
    }

    #[test]
    fn rotating_a_point_around_the_x_axis() {
        let p = Point::new(0.0, 1.0, 0.0);

        assert_eq!(
            rotation_x(PI / 4.0) * p,
            Point::new(0.0, f64::sqrt(2.0) / 2.0, f64::sqrt(2.0) / 2.0)
        );
        assert_eq!(rotation_x(PI / 2.0) * p, Point::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn rotating_a_point_around_the_y_axis() {
        let p = Point::new(0.0, 0.0, 1.0);

        assert_eq!(
            rotation_y(PI / 4.0) * p,
            Point::new(f64::sqrt(2.0) / 2.0, 0.0, f64::sqrt(2.0) / 2.0)
        );
        assert_eq!(rotation_y(PI / 2.0) * p, Point::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rotating_a_point_around_the_z_axis() {
        let p = Point::new(0.0, 1.0, 0.0);

        assert_eq!(
            rotation_z(PI / 4.0) * p,
            Point::new(-f64::sqrt(2.0) / 2.0, f64::sqrt(2.0) / 2.0, 0.0)
        );
        assert_eq!(rotation_z(PI / 2.0) * p, Point::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn shearing_moves_x_in_proportion_to_y() {
        let transform = shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let p = Point::new(2.0, 3.0, 4.0);

        assert_eq!(transform * p, Point::new(5.0, 3.0, 4.0));
    }

    #[test]
    fn the_view_transform_for_the_default_orientation() {
        let t = view_transform(
            &Point::zero(),
            &Point::new(0.0, 0.0, -1.0),
            &Vector::new(0.0, 1.0, 0.0),
        );

        assert_eq!(t, Matrix::id());
    }

    #[test]
    fn the_view_transform_looking_in_the_positive_z_direction() {
        let t = view_transform(
            &Point::zero(),
            &Point::new(0.0, 0.0, 1.0),
            &Vector::new(0.0, 1.0, 0.0),
        );

        assert_eq!(t, scaling(-1.0, 1.0, -1.0));
    }

    #[test]
    fn the_view_transform_moves_the_world() {
        let t = view_transform(
            &Point::new(0.0, 0.0, 8.0),
            &Point::zero(),
            &Vector::new(0.0, 1.0, 0.0),
        );

        assert_eq!(t, translation(0.0, 0.0, -8.0));
    }

    #[test]
    fn an_arbitrary_view_transform() {
        let t = view_transform(
            &Point::new(1.0, 3.0, 2.0),
            &Point::new(4.0, -2.0, 8.0),
            &Vector::new(1.0, 1.0, 0.0),
        );

        let mut expected = Matrix::new();
        expected[(0, 0)] = -0.50709;
        expected[(0, 1)] = 0.50709;
        expected[(0, 2)] = 0.67612;
        expected[(0, 3)] = -2.36643;
        expected[(1, 0)] = 0.76772;
        expected[(1, 1)] = 0.60609;
        expected[(1, 2)] = 0.12122;
        expected[(1, 3)] = -2.82843;
        expected[(2, 0)] = -0.35857;
        expected[(2, 1)] = 0.59761;
        expected[(2, 2)] = -0.71714;
        expected[(2, 3)] = 0.0;
        expected[(3, 3)] = 1.0;

        assert_eq!(t, expected);
    }
}
