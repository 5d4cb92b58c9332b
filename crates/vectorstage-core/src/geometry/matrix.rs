//! 3x3 affine transform matrix.

use crate::error::{GeometryError, GeometryResult};
use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

/// Determinant magnitude below which a matrix is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Affine transform stored as `[[a, b, 0], [c, d, 0], [tx, ty, 1]]`.
///
/// Points are row vectors: `x' = x*a + y*c + tx`, `y' = x*b + y*d + ty`.
/// Composition with [`Matrix::multiply`] therefore applies `self` first and
/// the argument second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix(pub [[f64; 3]; 3]);

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    /// The identity transform.
    pub const IDENTITY: Matrix = Matrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Create an identity matrix.
    pub fn new() -> Self {
        Self::IDENTITY
    }

    /// A pure translation.
    pub fn translation(tx: f64, ty: f64) -> Self {
        let mut m = Self::new();
        m.set_translation(tx, ty);
        m
    }

    /// A pure rotation (radians) about the origin.
    pub fn rotation(angle: f64) -> Self {
        let mut m = Self::new();
        m.set_rotation(angle);
        m
    }

    /// A pure scale about the origin.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        let mut m = Self::new();
        m.set_scale(sx, sy);
        m
    }

    /// Reset to identity.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Overwrite with a translation.
    pub fn set_translation(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.reset();
        self.0[2][0] = tx;
        self.0[2][1] = ty;
        self
    }

    /// Overwrite with a rotation.
    pub fn set_rotation(&mut self, angle: f64) -> &mut Self {
        let (sin, cos) = angle.sin_cos();
        self.reset();
        self.0[0][0] = cos;
        self.0[0][1] = sin;
        self.0[1][0] = -sin;
        self.0[1][1] = cos;
        self
    }

    /// Overwrite with a scale.
    pub fn set_scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.reset();
        self.0[0][0] = sx;
        self.0[1][1] = sy;
        self
    }

    /// Overwrite with a skew; angles in radians.
    pub fn set_skew(&mut self, kx: f64, ky: f64) -> &mut Self {
        self.reset();
        self.0[0][1] = kx.tan();
        self.0[1][0] = ky.tan();
        self
    }

    /// Right-multiply in place: `self = self * m`.
    pub fn multiply(&mut self, m: &Matrix) -> &mut Self {
        let a = self.0;
        let b = m.0;
        let mut r = [[0.0; 3]; 3];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        self.0 = r;
        self
    }

    /// Compose a translation.
    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.multiply(&Self::translation(tx, ty))
    }

    /// Compose a rotation about `pivot`.
    pub fn rotate(&mut self, angle: f64, pivot: Point) -> &mut Self {
        self.about(pivot, &Self::rotation(angle))
    }

    /// Compose a scale about `pivot`.
    pub fn scale(&mut self, sx: f64, sy: f64, pivot: Point) -> &mut Self {
        self.about(pivot, &Self::scaling(sx, sy))
    }

    /// Compose a skew about `pivot`.
    pub fn skew(&mut self, kx: f64, ky: f64, pivot: Point) -> &mut Self {
        let mut k = Self::new();
        k.set_skew(kx, ky);
        self.about(pivot, &k)
    }

    fn about(&mut self, pivot: Point, op: &Matrix) -> &mut Self {
        self.translate(-pivot.x, -pivot.y);
        self.multiply(op);
        self.translate(pivot.x, pivot.y)
    }

    /// Determinant of the full 3x3 matrix.
    pub fn det(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Algebraic inverse of the affine transform.
    pub fn inverted(&self) -> GeometryResult<Matrix> {
        let det = self.det();
        if det.abs() < SINGULAR_EPSILON {
            log::warn!("Refusing to invert singular matrix (det {det})");
            return Err(GeometryError::SingularMatrix { det });
        }

        let [[a, b, _], [c, d, _], [e, f, _]] = self.0;
        Ok(Matrix([
            [d / det, -b / det, 0.0],
            [-c / det, a / det, 0.0],
            [(c * f - d * e) / det, (b * e - a * f) / det, 1.0],
        ]))
    }

    /// Apply the transform to a point.
    pub fn transform_point(&self, p: Point) -> Point {
        let m = &self.0;
        Point::new(
            p.x * m[0][0] + p.y * m[1][0] + m[2][0],
            p.x * m[0][1] + p.y * m[1][1] + m[2][1],
        )
    }

    /// Convert to a kurbo affine.
    pub fn to_affine(&self) -> Affine {
        let m = &self.0;
        Affine::new([m[0][0], m[0][1], m[1][0], m[1][1], m[2][0], m[2][1]])
    }

    /// Build from a kurbo affine.
    pub fn from_affine(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Matrix([[a, b, 0.0], [c, d, 0.0], [e, f, 1.0]])
    }

    /// Element-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Matrix, eps: f64) -> bool {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| (a - b).abs() < eps)
    }
}

impl From<Affine> for Matrix {
    fn from(affine: Affine) -> Self {
        Self::from_affine(affine)
    }
}

impl From<Matrix> for Affine {
    fn from(m: Matrix) -> Self {
        m.to_affine()
    }
}
