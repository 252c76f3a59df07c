// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the Position structure tagging coordinates with their representation.

use std::fmt;

use crate::structures::vector3d::Vector3D;

/// Representation in which the coordinates of a position are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateKind {
    /// Coefficients of the lattice vectors.
    Fractional,
    /// Absolute coordinates in length units.
    Cartesian,
}

impl fmt::Display for CoordinateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateKind::Fractional => write!(f, "fractional"),
            CoordinateKind::Cartesian => write!(f, "cartesian"),
        }
    }
}

/// Position of an atom together with the representation of its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    coordinates: Vector3D,
    kind: CoordinateKind,
}

impl Position {
    /// Create a position from fractional coordinates.
    #[inline]
    pub fn fractional(coordinates: Vector3D) -> Self {
        Position {
            coordinates,
            kind: CoordinateKind::Fractional,
        }
    }

    /// Create a position from cartesian coordinates.
    #[inline]
    pub fn cartesian(coordinates: Vector3D) -> Self {
        Position {
            coordinates,
            kind: CoordinateKind::Cartesian,
        }
    }

    /// Get the raw coordinates of the position.
    #[inline]
    pub fn coordinates(&self) -> &Vector3D {
        &self.coordinates
    }

    /// Get the representation of the coordinates.
    #[inline]
    pub fn kind(&self) -> CoordinateKind {
        self.kind
    }

    #[inline]
    pub fn is_fractional(&self) -> bool {
        self.kind == CoordinateKind::Fractional
    }

    #[inline]
    pub fn is_cartesian(&self) -> bool {
        self.kind == CoordinateKind::Cartesian
    }

    /// Get the coordinates if they are cartesian.
    #[inline]
    pub fn as_cartesian(&self) -> Option<&Vector3D> {
        match self.kind {
            CoordinateKind::Cartesian => Some(&self.coordinates),
            CoordinateKind::Fractional => None,
        }
    }

    /// Get the coordinates if they are fractional.
    #[inline]
    pub fn as_fractional(&self) -> Option<&Vector3D> {
        match self.kind {
            CoordinateKind::Fractional => Some(&self.coordinates),
            CoordinateKind::Cartesian => None,
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
