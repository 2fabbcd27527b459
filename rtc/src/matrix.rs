use serde::{Deserialize, Serialize};

use crate::{float::ApproxEq, tuple::Tuple};

/// Row-major 4x4 matrix.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Matrix {
    data: [f64; 16],
}

impl Matrix {
    pub fn new() -> Matrix {
        Matrix { data: [0.0; 16] }
    }

    pub fn id() -> Matrix {
        Matrix {
            data: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::new();
        for i in 0..4 {
            for j in 0..4 {
                res[(j, i)] = self[(i, j)];
            }
        }

        res
    }

    /// Inverts the matrix by cofactor expansion.
    ///
    /// Panics on a singular matrix. Every matrix assembled through the
    /// transform constructors is invertible, so hitting the panic means a
    /// programming error rather than bad user input.
    pub fn invert(&self) -> Matrix {
        let determinant = self.determinant();

        if determinant.approx_eq(0.0) {
            panic!("matrix is not invertible");
        }

        let mut res = Matrix::new();
        for row in 0..4 {
            for col in 0..4 {
                res[(col, row)] = self.cofactor(row, col) / determinant;
            }
        }

        res
    }

    pub fn determinant(&self) -> f64 {
        let mut res = 0.0;
        for col in 0..4 {
            res += self[(0, col)] * self.cofactor(0, col);
        }

        res
    }

    fn submatrix(&self, row: usize, col: usize) -> Matrix3 {
        let mut res = Matrix3::new();

        let mut new_row = 0;
        for i in 0..4 {
            if i == row {
                continue;
            }
            let mut new_col = 0;
            for j in 0..4 {
                if j != col {
                    res.data[new_row * 3 + new_col] = self[(i, j)];
                    new_col += 1;
                }
            }
            new_row += 1;
        }

        res
    }

    fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let minor = self.minor(row, col);
        if (row + col) % 2 != 0 {
            -minor
        } else {
            minor
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.approx_eq_low_precision(*b))
    }
}

impl std::ops::Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * 4 + col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * 4 + col]
    }
}

impl std::ops::Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Self::Output {
        let mut res = Matrix::new();

        for row in 0..4 {
            for col in 0..4 {
                res[(row, col)] = self[(row, 0)] * rhs[(0, col)]
                    + self[(row, 1)] * rhs[(1, col)]
                    + self[(row, 2)] * rhs[(2, col)]
                    + self[(row, 3)] * rhs[(3, col)];
            }
        }

        res
    }
}

/// Applies the matrix to a point or vector. The fourth component comes from
/// `Tuple::w()`, so vectors are immune to the translation column.
impl<T> std::ops::Mul<T> for Matrix
where
    T: Tuple,
{
    type Output = T;

    fn mul(self, rhs: T) -> Self::Output {
        Self::Output::new(
            self[(0, 0)] * rhs.x()
                + self[(0, 1)] * rhs.y()
                + self[(0, 2)] * rhs.z()
                + self[(0, 3)] * rhs.w(),
            self[(1, 0)] * rhs.x()
                + self[(1, 1)] * rhs.y()
                + self[(1, 2)] * rhs.z()
                + self[(1, 3)] * rhs.w(),
            self[(2, 0)] * rhs.x()
                + self[(2, 1)] * rhs.y()
                + self[(2, 2)] * rhs.z()
                + self[(2, 3)] * rhs.w(),
        )
    }
}

/// 3x3 helper, only used for cofactor expansion.
struct Matrix3 {
    data: [f64; 9],
}

impl Matrix3 {
    fn new() -> Self {
        Matrix3 { data: [0.0; 9] }
    }

    fn determinant(&self) -> f64 {
        let d = &self.data;

        d[0] * (d[4] * d[8] - d[5] * d[7]) - d[1] * (d[3] * d[8] - d[5] * d[6])
            + d[2] * (d[3] * d[7] - d[4] * d[6])
    }
}
