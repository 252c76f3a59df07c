// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the Lattice structure and its methods.

use getset::{CopyGetters, Getters};

use crate::errors::LatticeError;
use crate::structures::vector3d::Vector3D;

/// Fractional coordinates at or above this value are truncated towards zero when folding;
/// anything lower is moved to the next lower integer.
const FOLD_THRESHOLD: f64 = -0.000000000000001;

/// Lengths (a, b, c) and angles (alpha, beta, gamma; in degrees) of a lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    /// Angle between vectors b and c.
    pub alpha: f64,
    /// Angle between vectors a and c.
    pub beta: f64,
    /// Angle between vectors a and b.
    pub gamma: f64,
}

impl LatticeParameters {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        LatticeParameters {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// Check that the lengths are positive and the angles lie in the open interval (0°, 180°).
    fn validate(&self) -> Result<(), LatticeError> {
        for length in [self.a, self.b, self.c] {
            if !length.is_finite() || length <= 0.0 {
                return Err(LatticeError::InvalidLength(length));
            }
        }

        for angle in [self.alpha, self.beta, self.gamma] {
            if !angle.is_finite() || angle <= 0.0 || angle >= 180.0 {
                return Err(LatticeError::InvalidAngle(angle));
            }
        }

        Ok(())
    }
}

impl From<[f64; 6]> for LatticeParameters {
    /// Convert `[a, b, c, alpha, beta, gamma]` to `LatticeParameters`.
    fn from(arr: [f64; 6]) -> Self {
        LatticeParameters::new(arr[0], arr[1], arr[2], arr[3], arr[4], arr[5])
    }
}

/// Periodic lattice described by its parameters, vectors and volume.
///
/// The vectors always follow the triclinic convention:
/// `v_a` lies along x, `v_b` lies in the xy-plane, `v_c` is general.
#[derive(Debug, Clone, Copy, PartialEq, Getters, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lattice {
    #[getset(get = "pub")]
    parameters: LatticeParameters,
    #[getset(get_copy = "pub")]
    v_a: Vector3D,
    #[getset(get_copy = "pub")]
    v_b: Vector3D,
    #[getset(get_copy = "pub")]
    v_c: Vector3D,
    volume: f64,
}

impl Lattice {
    /// Create a new lattice from lattice parameters.
    ///
    /// ## Returns
    /// - `Lattice` if the parameters describe a valid cell.
    /// - `LatticeError` if any length is not positive, any angle is outside (0°, 180°),
    ///   or the angles cannot form a cell with positive volume.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let lattice = Lattice::from_parameters([5.0, 4.0, 3.0, 80.0, 70.0, 120.0].into()).unwrap();
    ///
    /// assert_approx_eq!(f64, lattice.v_a().x, 5.0, epsilon = 1e-6);
    /// assert_approx_eq!(f64, lattice.v_b().x, -2.0, epsilon = 1e-6);
    /// assert_approx_eq!(f64, lattice.v_b().y, 3.464102, epsilon = 1e-6);
    /// assert_approx_eq!(f64, lattice.v_c().x, 1.026060, epsilon = 1e-6);
    /// assert_approx_eq!(f64, lattice.v_c().y, 1.193931, epsilon = 1e-6);
    /// assert_approx_eq!(f64, lattice.v_c().z, 2.553768, epsilon = 1e-6);
    /// ```
    pub fn from_parameters(parameters: LatticeParameters) -> Result<Self, LatticeError> {
        let mut lattice = Lattice {
            parameters,
            v_a: Vector3D::default(),
            v_b: Vector3D::default(),
            v_c: Vector3D::default(),
            volume: 0.0,
        };

        lattice.set_parameters(parameters)?;
        Ok(lattice)
    }

    /// Create a new lattice from three lattice vectors.
    ///
    /// The lattice parameters are derived from the norms of the vectors and the angles between them.
    /// The stored vectors are then regenerated from the parameters, i.e. the lattice is rotated
    /// into the standard orientation (`v_a` along x, `v_b` in the xy-plane).
    pub fn from_vectors(v1: Vector3D, v2: Vector3D, v3: Vector3D) -> Result<Self, LatticeError> {
        Lattice::from_parameters(Lattice::parameters_from_vectors(&v1, &v2, &v3)?)
    }

    /// Replace the lattice parameters, recalculating the lattice vectors and volume.
    ///
    /// If an error is returned, the lattice is not modified.
    pub fn set_parameters(&mut self, parameters: LatticeParameters) -> Result<(), LatticeError> {
        parameters.validate()?;

        let (v_a, v_b, v_c) = Lattice::vectors_from_parameters(&parameters);
        let volume = Lattice::triple_product(&v_a, &v_b, &v_c);

        if !volume.is_finite() || volume <= 0.0 {
            return Err(LatticeError::DegenerateVolume(volume));
        }

        self.parameters = parameters;
        self.v_a = v_a;
        self.v_b = v_b;
        self.v_c = v_c;
        self.volume = volume;

        Ok(())
    }

    /// Replace the lattice using three lattice vectors.
    ///
    /// If an error is returned, the lattice is not modified.
    pub fn set_vectors(
        &mut self,
        v1: Vector3D,
        v2: Vector3D,
        v3: Vector3D,
    ) -> Result<(), LatticeError> {
        self.set_parameters(Lattice::parameters_from_vectors(&v1, &v2, &v3)?)
    }

    /// Get the volume of the cell.
    ///
    /// The volume is the scalar triple product of the lattice vectors.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Get the lattice vector with the given index (0 = a, 1 = b, 2 = c).
    ///
    /// ## Panics
    /// Panics if `index` is higher than 2.
    #[inline]
    pub fn vector(&self, index: usize) -> Vector3D {
        match index {
            0 => self.v_a,
            1 => self.v_b,
            2 => self.v_c,
            _ => panic!(
                "FATAL CORRELATION ERROR | Lattice::vector | Index `{}` is out of range.",
                index
            ),
        }
    }

    /// Convert fractional coordinates to cartesian coordinates.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let lattice = Lattice::from_parameters([4.0, 4.0, 4.0, 90.0, 90.0, 90.0].into()).unwrap();
    /// let cartesian = lattice.to_cartesian(&[0.5, 0.25, 1.0].into());
    ///
    /// assert_approx_eq!(f64, cartesian.x, 2.0, epsilon = 1e-12);
    /// assert_approx_eq!(f64, cartesian.y, 1.0, epsilon = 1e-12);
    /// assert_approx_eq!(f64, cartesian.z, 4.0, epsilon = 1e-12);
    /// ```
    #[inline]
    pub fn to_cartesian(&self, fractional: &Vector3D) -> Vector3D {
        let (i, j, k) = (fractional.x, fractional.y, fractional.z);

        Vector3D::new(
            i * self.v_a.x + j * self.v_b.x + k * self.v_c.x,
            i * self.v_a.y + j * self.v_b.y + k * self.v_c.y,
            i * self.v_a.z + j * self.v_b.z + k * self.v_c.z,
        )
    }

    /// Convert cartesian coordinates to fractional coordinates.
    ///
    /// The components are solved in the order c, b, a, subtracting the contribution
    /// of each lattice vector before solving for the next one.
    #[inline]
    pub fn to_fractional(&self, cartesian: &Vector3D) -> Vector3D {
        let mut aux = *cartesian;

        let k = aux.z / self.v_c.z;
        aux -= self.v_c * k;

        let j = aux.y / self.v_b.y;
        aux -= self.v_b * j;

        let i = aux.x / self.v_a.x;

        Vector3D::new(i, j, k)
    }

    /// Fold cartesian coordinates into the primary cell.
    ///
    /// Each fractional coordinate is reduced by an integer so that it lands in [0, 1).
    /// Coordinates that are at least -1e-15 are truncated towards zero; lower coordinates
    /// are moved to the next lower integer (`trunc - 1`).
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let lattice = Lattice::from_parameters([4.0, 4.0, 4.0, 90.0, 90.0, 90.0].into()).unwrap();
    /// let folded = lattice.fold(&[-1.0, 5.0, 9.5].into());
    ///
    /// assert_approx_eq!(f64, folded.x, 3.0, epsilon = 1e-12);
    /// assert_approx_eq!(f64, folded.y, 1.0, epsilon = 1e-12);
    /// assert_approx_eq!(f64, folded.z, 1.5, epsilon = 1e-12);
    /// ```
    #[inline]
    pub fn fold(&self, cartesian: &Vector3D) -> Vector3D {
        let fractional = self.to_fractional(cartesian);

        let i = Lattice::fold_shift(fractional.x);
        let j = Lattice::fold_shift(fractional.y);
        let k = Lattice::fold_shift(fractional.z);

        *cartesian - (self.v_a * i + self.v_b * j + self.v_c * k)
    }

    /// Get the cartesian translation corresponding to the periodic image (i, j, k).
    #[inline]
    pub fn image_shift(&self, offset: [i32; 3]) -> Vector3D {
        let (i, j, k) = (offset[0] as f64, offset[1] as f64, offset[2] as f64);

        Vector3D::new(
            i * self.v_a.x + j * self.v_b.x + k * self.v_c.x,
            j * self.v_b.y + k * self.v_c.y,
            k * self.v_c.z,
        )
    }

    /// Get the number of lattice-vector repetitions along a, b, and c needed to cover
    /// a sphere with radius `cutoff`.
    ///
    /// ## Notes
    /// - Each count is `ceil(cutoff / own-axis component)`, i.e. `v_a.x`, `v_b.y`, and `v_c.z`.
    /// - This is not the perpendicular width between lattice planes and may undercount
    ///   the required images for strongly skewed cells.
    #[inline]
    pub fn replication_counts(&self, cutoff: f64) -> [i32; 3] {
        [
            (cutoff / self.v_a.x).ceil() as i32,
            (cutoff / self.v_b.y).ceil() as i32,
            (cutoff / self.v_c.z).ceil() as i32,
        ]
    }

    /// Number of atoms per unit volume for a cell containing `n_atoms` atoms.
    #[inline]
    pub fn number_density(&self, n_atoms: usize) -> f64 {
        n_atoms as f64 / self.volume
    }

    /// Integer shift applied to a single fractional coordinate when folding.
    #[inline]
    fn fold_shift(coordinate: f64) -> f64 {
        if coordinate >= FOLD_THRESHOLD {
            coordinate.trunc()
        } else {
            coordinate.trunc() - 1.0
        }
    }

    /// Calculate lattice vectors from the lattice parameters.
    fn vectors_from_parameters(parameters: &LatticeParameters) -> (Vector3D, Vector3D, Vector3D) {
        let alpha = parameters.alpha.to_radians();
        let beta = parameters.beta.to_radians();
        let gamma = parameters.gamma.to_radians();

        let v_a = Vector3D::new(parameters.a, 0.0, 0.0);
        let v_b = Vector3D::new(parameters.b * gamma.cos(), parameters.b * gamma.sin(), 0.0);
        let v_c = Vector3D::new(
            parameters.c * beta.cos(),
            parameters.c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin(),
            parameters.c
                * (1.0 - alpha.cos().powi(2) - beta.cos().powi(2) - gamma.cos().powi(2)
                    + 2.0 * alpha.cos() * beta.cos() * gamma.cos())
                .sqrt()
                / gamma.sin(),
        );

        (v_a, v_b, v_c)
    }

    /// Calculate lattice parameters from three lattice vectors.
    fn parameters_from_vectors(
        v1: &Vector3D,
        v2: &Vector3D,
        v3: &Vector3D,
    ) -> Result<LatticeParameters, LatticeError> {
        for (i, v) in [v1, v2, v3].into_iter().enumerate() {
            if v.len() == 0.0 || !v.len().is_finite() {
                return Err(LatticeError::ZeroVector(i));
            }
        }

        Ok(LatticeParameters::new(
            v1.len(),
            v2.len(),
            v3.len(),
            v2.angle(v3).to_degrees(),
            v1.angle(v3).to_degrees(),
            v1.angle(v2).to_degrees(),
        ))
    }

    /// Scalar triple product of the lattice vectors, expanded along `v_c`.
    fn triple_product(v_a: &Vector3D, v_b: &Vector3D, v_c: &Vector3D) -> f64 {
        v_c.x * (v_a.y * v_b.z - v_a.z * v_b.y) - v_c.y * (v_a.x * v_b.z - v_a.z * v_b.x)
            + v_c.z * (v_a.x * v_b.y - v_a.y * v_b.x)
    }
}

impl Default for Lattice {
    /// Create a cubic lattice with unit lengths.
    fn default() -> Self {
        Lattice::from_parameters([1.0, 1.0, 1.0, 90.0, 90.0, 90.0].into()).expect(
            "FATAL CORRELATION ERROR | Lattice::default | Unit cubic lattice should be valid.",
        )
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
