// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the Atom structure and its methods.

use getset::CopyGetters;

use crate::errors::PositionError;
use crate::structures::{lattice::Lattice, position::Position, vector3d::Vector3D};

/// Snapshot of a bonded neighbor: which atom, which of its periodic images,
/// and where that image lies.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtomImage {
    /// Number of the neighboring atom.
    #[getset(get_copy = "pub")]
    atom_number: usize,
    /// Element index of the neighboring atom.
    #[getset(get_copy = "pub")]
    element_index: usize,
    /// Multiples of the lattice vectors (a, b, c) by which the neighbor was shifted.
    #[getset(get_copy = "pub")]
    offset: [i32; 3],
    /// Cartesian position of the image.
    #[getset(get_copy = "pub")]
    position: Vector3D,
}

impl AtomImage {
    /// Create a new snapshot of a periodic image of atom `atom_number`
    /// shifted by `offset` lattice vectors and located at cartesian `position`.
    pub fn new(
        atom_number: usize,
        element_index: usize,
        offset: [i32; 3],
        position: Vector3D,
    ) -> Self {
        AtomImage {
            atom_number,
            element_index,
            offset,
            position,
        }
    }
}

/// Atom of a periodic cell.
///
/// The atom number identifies the atom: two atoms with the same number are treated
/// as the same atom when searching for neighbors.
#[derive(Debug, Clone)]
pub struct Atom {
    atom_number: usize,
    element: String,
    element_index: Option<usize>,
    position: Position,
    bonded: Vec<AtomImage>,
}

impl Atom {
    /// Create new Atom structure with the specified properties.
    ///
    /// ## Notes
    /// - The element index is unresolved until the atom is added to a `Cell`.
    /// - The atom has no bonded neighbors.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// #
    /// let atom = Atom::new(1, "Si", Position::fractional([0.25, 0.25, 0.25].into()));
    ///
    /// assert_eq!(atom.get_element(), "Si");
    /// assert!(atom.get_position().is_fractional());
    /// assert!(atom.get_element_index().is_none());
    /// ```
    pub fn new(atom_number: usize, element: &str, position: Position) -> Self {
        Atom {
            atom_number,
            element: element.to_owned(),
            element_index: None,
            position,
            bonded: Vec::new(),
        }
    }

    /// Get the number of the atom.
    #[inline]
    pub fn get_atom_number(&self) -> usize {
        self.atom_number
    }

    /// Get the element symbol of the atom.
    #[inline]
    pub fn get_element(&self) -> &str {
        &self.element
    }

    /// Get the element index of the atom, if it has been resolved.
    #[inline]
    pub fn get_element_index(&self) -> Option<usize> {
        self.element_index
    }

    #[inline]
    pub(crate) fn set_element_index(&mut self, index: usize) {
        self.element_index = Some(index);
    }

    /// Get the position of the atom.
    #[inline]
    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// Set the position of the atom.
    #[inline]
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Get the bonded neighbors of the atom.
    #[inline]
    pub fn get_bonded(&self) -> &[AtomImage] {
        &self.bonded
    }

    #[inline]
    pub(crate) fn set_bonded(&mut self, bonded: Vec<AtomImage>) {
        self.bonded = bonded;
    }

    #[inline]
    pub(crate) fn clear_bonded(&mut self) {
        self.bonded.clear();
    }

    /// Get the cartesian coordinates of the atom, converting them if the position is fractional.
    #[inline]
    pub fn cartesian(&self, lattice: &Lattice) -> Vector3D {
        match self.position.as_cartesian() {
            Some(x) => *x,
            None => lattice.to_cartesian(self.position.coordinates()),
        }
    }

    /// Convert fractional position of the atom into cartesian coordinates.
    ///
    /// ## Returns
    /// `Ok` if the position was fractional. `PositionError::NotFractional` otherwise.
    pub fn fractional_to_cartesian(&mut self, lattice: &Lattice) -> Result<(), PositionError> {
        let fractional = self
            .position
            .as_fractional()
            .ok_or(PositionError::NotFractional(self.atom_number))?;

        self.position = Position::cartesian(lattice.to_cartesian(fractional));
        Ok(())
    }

    /// Convert cartesian position of the atom into fractional coordinates.
    ///
    /// ## Returns
    /// `Ok` if the position was cartesian. `PositionError::NotCartesian` otherwise.
    pub fn cartesian_to_fractional(&mut self, lattice: &Lattice) -> Result<(), PositionError> {
        let cartesian = self
            .position
            .as_cartesian()
            .ok_or(PositionError::NotCartesian(self.atom_number))?;

        self.position = Position::fractional(lattice.to_fractional(cartesian));
        Ok(())
    }

    /// Fold the atom into the primary cell of the lattice.
    /// The resulting position is always cartesian.
    pub fn fold(&mut self, lattice: &Lattice) {
        self.position = Position::cartesian(lattice.fold(&self.cartesian(lattice)));
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn lattice() -> Lattice {
        Lattice::from_parameters([4.0, 5.0, 6.0, 90.0, 90.0, 90.0].into()).unwrap()
    }

    #[test]
    fn fractional_to_cartesian() {
        let mut atom = Atom::new(3, "O", Position::fractional([0.5, 0.2, 1.0].into()));
        atom.fractional_to_cartesian(&lattice()).unwrap();

        let position = atom.get_position().as_cartesian().unwrap();
        assert_approx_eq!(f64, position.x, 2.0, epsilon = 1e-12);
        assert_approx_eq!(f64, position.y, 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, position.z, 6.0, epsilon = 1e-12);

        match atom.fractional_to_cartesian(&lattice()) {
            Err(PositionError::NotFractional(3)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn cartesian_to_fractional() {
        let mut atom = Atom::new(7, "Si", Position::cartesian([1.0, 2.5, 3.0].into()));
        atom.cartesian_to_fractional(&lattice()).unwrap();

        let position = atom.get_position().as_fractional().unwrap();
        assert_approx_eq!(f64, position.x, 0.25, epsilon = 1e-12);
        assert_approx_eq!(f64, position.y, 0.5, epsilon = 1e-12);
        assert_approx_eq!(f64, position.z, 0.5, epsilon = 1e-12);

        match atom.cartesian_to_fractional(&lattice()) {
            Err(PositionError::NotCartesian(7)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn fold_fractional() {
        let mut atom = Atom::new(1, "Si", Position::fractional([1.25, -0.5, 0.0].into()));
        atom.fold(&lattice());

        let position = atom.get_position().as_cartesian().unwrap();
        assert_approx_eq!(f64, position.x, 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, position.y, 2.5, epsilon = 1e-12);
        assert_approx_eq!(f64, position.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn bonded_neighbors() {
        let mut atom = Atom::new(1, "Si", Position::cartesian(Vector3D::default()));
        assert!(atom.get_bonded().is_empty());

        let image = AtomImage::new(2, 1, [0, -1, 0], [0.0, -1.6, 0.0].into());
        atom.set_bonded(vec![image]);

        assert_eq!(atom.get_bonded().len(), 1);
        assert_eq!(atom.get_bonded()[0].atom_number(), 2);
        assert_eq!(atom.get_bonded()[0].offset(), [0, -1, 0]);

        atom.clear_bonded();
        assert!(atom.get_bonded().is_empty());
    }
}
