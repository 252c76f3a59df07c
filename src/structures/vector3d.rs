// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of methods for three-dimensional vector.

use std::ops::{Add, AddAssign, Deref, DerefMut, Mul, Neg, Sub, SubAssign};

use nalgebra::base::Vector3;

/// Describes length and orientation of a vector in space or a position of a point in space.
/// Implemented using `nalgebra`'s Vector3.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3D(pub(crate) Vector3<f64>);

impl From<[f64; 3]> for Vector3D {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Vector3D(Vector3::new(arr[0], arr[1], arr[2]))
    }
}

impl From<Vector3D> for [f64; 3] {
    #[inline]
    fn from(vec: Vector3D) -> Self {
        [vec.0.x, vec.0.y, vec.0.z]
    }
}

/// Allows accessing fields of `Vector3D` as `.x`, `.y`, and `.z`.
pub struct Vector3Raw {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Deref for Vector3D {
    type Target = Vector3Raw;

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { &*(self.0.as_ptr() as *const Vector3Raw) }
    }
}

impl DerefMut for Vector3D {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *(self.0.as_mut_ptr() as *mut Vector3Raw) }
    }
}

impl Vector3D {
    /// Create a new `Vector3D` structure.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D(Vector3::new(x, y, z))
    }

    /// Get the component of the vector with the given index (0 = x, 1 = y, 2 = z).
    ///
    /// ## Panics
    /// Panics if `index` is higher than 2.
    #[inline]
    pub fn component(&self, index: usize) -> f64 {
        match index {
            0 => self.0.x,
            1 => self.0.y,
            2 => self.0.z,
            _ => panic!(
                "FATAL CORRELATION ERROR | Vector3D::component | Index `{}` is out of range.",
                index
            ),
        }
    }

    /// Calculate length of the vector.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let vector = Vector3D::new(1.0, 2.0, 3.0);
    /// assert_approx_eq!(f64, vector.len(), 3.7416573867739413);
    /// ```
    #[inline]
    pub fn len(&self) -> f64 {
        self.0.magnitude()
    }

    /// Convert vector to unit vector.
    ///
    /// ## Notes
    /// - Returns a vector of NaNs when applied to a null vector.
    #[inline]
    pub fn to_unit(self) -> Vector3D {
        Vector3D(self.0.normalize())
    }

    /// Calculate the dot product of two vectors.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let vector1 = Vector3D::new(4.0, 2.0, -1.0);
    /// let vector2 = Vector3D::new(1.0, -3.0, 2.0);
    ///
    /// assert_approx_eq!(f64, vector1.dot(&vector2), -4.0);
    /// ```
    #[inline]
    pub fn dot(&self, vector: &Vector3D) -> f64 {
        self.0.dot(&vector.0)
    }

    /// Calculate the cross product of two vectors.
    #[inline]
    pub fn cross(&self, vector: &Vector3D) -> Vector3D {
        Vector3D(self.0.cross(&vector.0))
    }

    /// Calculate the scalar triple product `self · (b × c)`.
    #[inline]
    pub fn triple(&self, b: &Vector3D, c: &Vector3D) -> f64 {
        self.dot(&b.cross(c))
    }

    /// Calculate the angle between two vectors. Returns angle in radians.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let vector1 = Vector3D::new(1.0, 0.0, 0.0);
    /// let vector2 = Vector3D::new(0.0, 3.0, 0.0);
    ///
    /// assert_approx_eq!(f64, vector1.angle(&vector2), std::f64::consts::FRAC_PI_2);
    /// ```
    ///
    /// ## Notes
    /// - Always returns a value between 0 and π.
    /// - The cosine is clamped to [-1, 1] so that numerically (anti)parallel vectors
    ///   do not produce NaN.
    #[inline]
    pub fn angle(&self, vector: &Vector3D) -> f64 {
        (self.dot(vector) / (self.len() * vector.len()))
            .clamp(-1.0, 1.0)
            .acos()
    }

    /// Calculate the angle at vertex `self` between the points `point1` and `point2`.
    /// Returns angle in radians.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let center = Vector3D::new(1.0, 1.0, 1.0);
    /// let angle = center.vertex_angle(&[2.0, 1.0, 1.0].into(), &[0.0, 1.0, 1.0].into());
    ///
    /// assert_approx_eq!(f64, angle, std::f64::consts::PI);
    /// ```
    #[inline]
    pub fn vertex_angle(&self, point1: &Vector3D, point2: &Vector3D) -> f64 {
        (*point1 - *self).angle(&(*point2 - *self))
    }

    /// Calculate the Euclidean distance between two points. Periodic boundary conditions are **not** applied.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let point1 = Vector3D::new(1.0, 2.0, 3.0);
    /// let point2 = Vector3D::new(3.5, 1.0, 2.0);
    ///
    /// assert_approx_eq!(f64, point1.distance(&point2), 2.8722813232690143);
    /// ```
    #[inline]
    pub fn distance(&self, point: &Vector3D) -> f64 {
        (self.0 - point.0).magnitude()
    }

    /// Returns `true` if all the fields of the vector are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0 && self.0.z == 0.0
    }
}

impl Default for Vector3D {
    /// Create a zero vector.
    fn default() -> Self {
        Vector3D(Vector3::new(0.0, 0.0, 0.0))
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn add(self, rhs: Vector3D) -> Self::Output {
        Vector3D(self.0 + rhs.0)
    }
}

impl AddAssign for Vector3D {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3D) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn sub(self, rhs: Vector3D) -> Self::Output {
        Vector3D(self.0 - rhs.0)
    }
}

impl SubAssign for Vector3D {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector3D) {
        self.0 -= rhs.0;
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Vector3D(self.0 * rhs)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    #[inline]
    fn neg(self) -> Self::Output {
        Vector3D(-self.0)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn len() {
        let vec = Vector3D::new(4.3, 5.6, 1.2);
        assert_approx_eq!(f64, vec.len(), 7.1617037079175505, epsilon = 1e-12);
    }

    #[test]
    fn len_null() {
        let vec = Vector3D::new(0.0, 0.0, 0.0);
        assert_approx_eq!(f64, vec.len(), 0.0);
    }

    #[test]
    fn to_unit() {
        let vec = Vector3D::new(4.3, 5.6, 1.2).to_unit();
        assert_approx_eq!(f64, vec.len(), 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, vec.x, 4.3 / 7.1617037079175505, epsilon = 1e-12);
    }

    #[test]
    fn dot() {
        let vector1 = Vector3D::new(-2.5, 0.3, 5.1);
        let vector2 = Vector3D::new(-3.9, 1.1, -4.2);

        assert_approx_eq!(f64, vector1.dot(&vector2), -11.34, epsilon = 1e-12);
    }

    #[test]
    fn cross() {
        let vector1 = Vector3D::new(-2.0, 0.0, 5.0);
        let vector2 = Vector3D::new(3.0, 1.0, -4.0);

        let cross = vector1.cross(&vector2);
        assert_approx_eq!(f64, cross.x, -5.0);
        assert_approx_eq!(f64, cross.y, 7.0);
        assert_approx_eq!(f64, cross.z, -2.0);
    }

    #[test]
    fn triple() {
        let a = Vector3D::new(2.0, 0.0, 0.0);
        let b = Vector3D::new(1.0, 3.0, 0.0);
        let c = Vector3D::new(0.5, 0.5, 4.0);

        assert_approx_eq!(f64, a.triple(&b, &c), 24.0);
        assert_approx_eq!(f64, b.triple(&a, &c), -24.0);
    }

    #[test]
    fn angle_right() {
        let vector1 = Vector3D::new(2.0, 0.0, 0.0);
        let vector2 = Vector3D::new(0.0, -2.0, 0.0);

        assert_approx_eq!(f64, vector1.angle(&vector2), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn angle_parallel() {
        let vector1 = Vector3D::new(1.0, 1.0, 1.0);
        let vector2 = Vector3D::new(3.0, 3.0, 3.0);

        assert_approx_eq!(f64, vector1.angle(&vector2), 0.0, epsilon = 1e-7);
    }

    #[test]
    fn angle_antiparallel() {
        let vector1 = Vector3D::new(1.0, 1.0, 1.0);
        let vector2 = Vector3D::new(-3.0, -3.0, -3.0);

        let angle = vector1.angle(&vector2);
        assert!(!angle.is_nan());
        assert_approx_eq!(f64, angle, std::f64::consts::PI, epsilon = 1e-7);
    }

    #[test]
    fn angle_general() {
        let vector1 = Vector3D::new(1.0, -1.0, 3.5);
        let vector2 = Vector3D::new(1.2, 2.4, -0.7);

        assert_approx_eq!(f64, vector1.angle(&vector2), 1.9269546, epsilon = 1e-6);
    }

    #[test]
    fn vertex_angle() {
        let center = Vector3D::new(4.0, 4.0, 4.0);
        let angle = center.vertex_angle(&[8.0, 4.0, 4.0].into(), &[4.0, 8.0, 4.0].into());

        assert_approx_eq!(f64, angle, std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn distance() {
        let point1 = Vector3D::new(1.0, 3.9, 2.6);
        let point2 = Vector3D::new(3.5, 0.1, 0.4);

        assert_approx_eq!(f64, point1.distance(&point2), point2.distance(&point1));
        assert_approx_eq!(f64, point1.distance(&point2), 5.052722038663912, epsilon = 1e-12);
    }

    #[test]
    fn operators() {
        let a = Vector3D::new(1.0, 2.0, 3.0);
        let b = Vector3D::new(0.5, -1.0, 2.0);

        let sum = a + b;
        assert_approx_eq!(f64, sum.x, 1.5);
        assert_approx_eq!(f64, sum.y, 1.0);
        assert_approx_eq!(f64, sum.z, 5.0);

        let diff = a - b;
        assert_approx_eq!(f64, diff.x, 0.5);
        assert_approx_eq!(f64, diff.y, 3.0);
        assert_approx_eq!(f64, diff.z, 1.0);

        let scaled = a * 2.0;
        assert_approx_eq!(f64, scaled.z, 6.0);

        let neg = -a;
        assert_approx_eq!(f64, neg.y, -2.0);

        let mut acc = Vector3D::default();
        acc += a;
        acc -= b;
        assert_eq!(acc, diff);
    }

    #[test]
    fn component() {
        let a = Vector3D::new(1.0, 2.0, 3.0);
        assert_eq!(a.component(0), 1.0);
        assert_eq!(a.component(1), 2.0);
        assert_eq!(a.component(2), 3.0);
    }

    #[test]
    #[should_panic(
        expected = "FATAL CORRELATION ERROR | Vector3D::component | Index `3` is out of range."
    )]
    fn component_panics() {
        let a = Vector3D::new(1.0, 2.0, 3.0);
        a.component(3);
    }
}
