use crate::geometry::Vec2;

/// A 2D affine transform stored as a 2x3 matrix.
///
/// The linear part is `[[m00, m01], [m10, m11]]` and the translation is
/// `(m20, m21)`. A point maps as
/// `(m00*x + m10*y + m20, m01*x + m11*y + m21)`.
///
/// Components are kept in `f64` so deep transform stacks (plot frames
/// with large scale factors) compose without drifting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub m00: f64,
    pub m01: f64,
    pub m10: f64,
    pub m11: f64,
    pub m20: f64,
    pub m21: f64,
}

impl Transform {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// All-zero matrix, returned by [`Transform::inverse`] for singular input.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64, m20: f64, m21: f64) -> Self {
        Self {
            m00,
            m01,
            m10,
            m11,
            m20,
            m21,
        }
    }

    /// Create an identity transform
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a translation transform
    pub fn translate(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Create a uniform scale transform
    pub fn scale(s: f64) -> Self {
        Self::scale_xy(s, s)
    }

    /// Create a non-uniform scale transform
    pub fn scale_xy(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Create a shear transform: `x' = x + x_shear*y`, `y' = y + y_shear*x`.
    pub fn shear(x_shear: f64, y_shear: f64) -> Self {
        Self::new(1.0, y_shear, x_shear, 1.0, 0.0, 0.0)
    }

    /// Create a counter-clockwise rotation (in y-up terms) by `angle_radians`.
    pub fn rotate(angle_radians: f64) -> Self {
        let (sin, cos) = angle_radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Create a rotation transform from degrees
    pub fn rotate_degrees(angle_degrees: f64) -> Self {
        Self::rotate(angle_degrees.to_radians())
    }

    /// Rotation followed by scaling, placed at `translation`.
    ///
    /// This is the matrix built by the `(translation, rotation, scale)`
    /// overload of `push_transform`.
    pub fn from_parts(translation: (f64, f64), rotation: f64, scale: (f64, f64)) -> Self {
        let mut t = Self::compose(&Self::rotate(rotation), &Self::scale_xy(scale.0, scale.1));
        t.m20 = translation.0;
        t.m21 = translation.1;
        t
    }

    /// Compose two transforms so that `inner` is interpreted inside
    /// `outer`'s frame: the result maps `p` to `outer(inner(p))`.
    pub fn compose(inner: &Transform, outer: &Transform) -> Transform {
        Transform::new(
            inner.m00 * outer.m00 + inner.m01 * outer.m10,
            inner.m00 * outer.m01 + inner.m01 * outer.m11,
            inner.m10 * outer.m00 + inner.m11 * outer.m10,
            inner.m10 * outer.m01 + inner.m11 * outer.m11,
            inner.m20 * outer.m00 + inner.m21 * outer.m10 + outer.m20,
            inner.m20 * outer.m01 + inner.m21 * outer.m11 + outer.m21,
        )
    }

    /// Interpret `self` inside `parent`'s frame. Shorthand for
    /// `Transform::compose(self, parent)`.
    pub fn within(&self, parent: &Transform) -> Transform {
        Self::compose(self, parent)
    }

    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m10 * self.m01
    }

    /// Compute the inverse of this transform.
    ///
    /// A singular matrix (determinant exactly zero) yields
    /// [`Transform::ZERO`] instead of failing.
    pub fn inverse(&self) -> Transform {
        let det = self.determinant();
        if det == 0.0 {
            return Self::ZERO;
        }
        let inv_det = 1.0 / det;

        Transform::new(
            self.m11 * inv_det,
            -self.m01 * inv_det,
            -self.m10 * inv_det,
            self.m00 * inv_det,
            (self.m10 * self.m21 - self.m11 * self.m20) * inv_det,
            (self.m01 * self.m20 - self.m00 * self.m21) * inv_det,
        )
    }

    /// Transform a 2D point by this matrix
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m00 * x + self.m10 * y + self.m20,
            self.m01 * x + self.m11 * y + self.m21,
        )
    }

    /// Transform a vertex position, computing in `f64`.
    #[inline]
    pub fn transform_vec2(&self, p: Vec2) -> Vec2 {
        let (x, y) = self.transform_point(p.x as f64, p.y as f64);
        Vec2::new(x as f32, y as f32)
    }

    pub fn translation(&self) -> (f64, f64) {
        (self.m20, self.m21)
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.m00, self.m01, self.m10, self.m11, self.m20, self.m21]
    }

    /// Check if this is the identity transform
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Transform, eps: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f64; 6]> for Transform {
    fn from([m00, m01, m10, m11, m20, m21]: [f64; 6]) -> Self {
        Self::new(m00, m01, m10, m11, m20, m21)
    }
}
