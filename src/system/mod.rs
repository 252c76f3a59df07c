// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the Cell structure and its methods.

use crate::errors::{LatticeError, PositionError};
use crate::structures::{
    atom::Atom,
    element::ElementTable,
    lattice::{Lattice, LatticeParameters},
    vector3d::Vector3D,
};

pub mod analysis;
pub mod bonds;
#[cfg(any(feature = "parallel", doc))]
mod parallel;
pub mod pipeline;

use bonds::BondLengths;

/// Periodic cell: a lattice together with the atoms of its primary cell.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Name of the cell.
    name: String,
    /// Lattice of the cell.
    lattice: Lattice,
    /// Atoms of the primary cell.
    atoms: Vec<Atom>,
    /// Elements of the atoms in the order of first appearance.
    elements: ElementTable,
    /// Bond-length table from the last bond-length calculation.
    /// Set to `None` whenever the atoms or the lattice change.
    bond_lengths: Option<BondLengths>,
    /// Whether the bonded neighbors of the atoms are up to date.
    neighbors_identified: bool,
}

/// ## Methods for creating `Cell` structures and accessing their properties.
impl Cell {
    /// Create a new Cell with a given name from the provided lattice and atoms.
    ///
    /// ## Notes
    /// - Element indices are assigned to the atoms in the order of first appearance of their elements.
    /// - Bonded neighbors already stored in the atoms are discarded.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// #
    /// let lattice = Lattice::from_parameters([4.0, 4.0, 4.0, 90.0, 90.0, 90.0].into()).unwrap();
    /// let atoms = vec![
    ///     Atom::new(1, "Si", Position::fractional([0.0, 0.0, 0.0].into())),
    ///     Atom::new(2, "O", Position::fractional([0.5, 0.5, 0.5].into())),
    /// ];
    ///
    /// let cell = Cell::new("SiO", lattice, atoms);
    /// assert_eq!(cell.get_n_atoms(), 2);
    /// assert_eq!(cell.get_elements().index_of("O"), Some(1));
    /// ```
    pub fn new(name: &str, lattice: Lattice, atoms: Vec<Atom>) -> Self {
        let mut cell = Cell {
            name: name.to_owned(),
            lattice,
            atoms,
            elements: ElementTable::new(),
            bond_lengths: None,
            neighbors_identified: false,
        };

        cell.resolve_elements();
        cell.atoms.iter_mut().for_each(|atom| atom.clear_bonded());
        cell
    }

    /// Get the name of the cell.
    #[inline]
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Get the lattice of the cell.
    #[inline]
    pub fn get_lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Get the atoms of the cell.
    #[inline]
    pub fn get_atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Get the atom with the given index.
    #[inline]
    pub fn get_atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Get the number of atoms in the cell.
    #[inline]
    pub fn get_n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Get the element table of the cell.
    #[inline]
    pub fn get_elements(&self) -> &ElementTable {
        &self.elements
    }

    /// Get the bond-length table, if it has been calculated.
    #[inline]
    pub fn get_bond_lengths(&self) -> Option<&BondLengths> {
        self.bond_lengths.as_ref()
    }

    /// Returns `true` if the bonded neighbors of the atoms are up to date.
    #[inline]
    pub fn neighbors_identified(&self) -> bool {
        self.neighbors_identified
    }

    /// Add an atom to the cell.
    ///
    /// ## Notes
    /// - A new element is appended to the element table; existing element indices never change.
    /// - Invalidates the bond-length table and all bonded neighbors.
    pub fn add_atom(&mut self, mut atom: Atom) {
        atom.set_element_index(self.elements.insert(atom.get_element()));
        atom.clear_bonded();
        self.atoms.push(atom);
        self.invalidate();
    }

    /// Replace the lattice of the cell.
    ///
    /// Invalidates the bond-length table and all bonded neighbors.
    pub fn set_lattice(&mut self, lattice: Lattice) {
        self.lattice = lattice;
        self.invalidate();
    }

    /// Replace the lattice parameters, recalculating the lattice vectors and volume.
    ///
    /// If an error is returned, the cell is not modified.
    pub fn set_lattice_parameters(
        &mut self,
        parameters: LatticeParameters,
    ) -> Result<(), LatticeError> {
        self.lattice.set_parameters(parameters)?;
        self.invalidate();
        Ok(())
    }

    /// Replace the lattice using three lattice vectors.
    ///
    /// If an error is returned, the cell is not modified.
    pub fn set_lattice_vectors(
        &mut self,
        v1: Vector3D,
        v2: Vector3D,
        v3: Vector3D,
    ) -> Result<(), LatticeError> {
        self.lattice.set_vectors(v1, v2, v3)?;
        self.invalidate();
        Ok(())
    }

    /// Fold all atoms into the primary cell. All positions become cartesian.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let lattice = Lattice::from_parameters([4.0, 4.0, 4.0, 90.0, 90.0, 90.0].into()).unwrap();
    /// let atoms = vec![Atom::new(1, "Si", Position::cartesian([-1.0, 5.0, 2.0].into()))];
    ///
    /// let mut cell = Cell::new("Si", lattice, atoms);
    /// cell.fold_into_cell();
    ///
    /// let position = cell.get_atom(0).unwrap().get_position().as_cartesian().unwrap();
    /// assert_approx_eq!(f64, position.x, 3.0, epsilon = 1e-12);
    /// assert_approx_eq!(f64, position.y, 1.0, epsilon = 1e-12);
    /// ```
    pub fn fold_into_cell(&mut self) {
        let lattice = self.lattice;
        self.atoms.iter_mut().for_each(|atom| atom.fold(&lattice));
    }

    /// Convert positions of all atoms from fractional to cartesian coordinates.
    ///
    /// ## Returns
    /// `Ok` if all positions were fractional.
    /// `PositionError::NotFractional` naming the first atom with a cartesian position otherwise.
    /// If an error is returned, no position is changed.
    pub fn fractional_to_cartesian(&mut self) -> Result<(), PositionError> {
        if let Some(atom) = self.atoms.iter().find(|a| !a.get_position().is_fractional()) {
            return Err(PositionError::NotFractional(atom.get_atom_number()));
        }

        let lattice = self.lattice;
        for atom in self.atoms.iter_mut() {
            atom.fractional_to_cartesian(&lattice)?;
        }

        Ok(())
    }

    /// Convert positions of all atoms from cartesian to fractional coordinates.
    ///
    /// ## Returns
    /// `Ok` if all positions were cartesian.
    /// `PositionError::NotCartesian` naming the first atom with a fractional position otherwise.
    /// If an error is returned, no position is changed.
    pub fn cartesian_to_fractional(&mut self) -> Result<(), PositionError> {
        if let Some(atom) = self.atoms.iter().find(|a| !a.get_position().is_cartesian()) {
            return Err(PositionError::NotCartesian(atom.get_atom_number()));
        }

        let lattice = self.lattice;
        for atom in self.atoms.iter_mut() {
            atom.cartesian_to_fractional(&lattice)?;
        }

        Ok(())
    }

    /// Rebuild the element table from the atoms and assign element indices.
    pub(crate) fn resolve_elements(&mut self) {
        let mut elements = ElementTable::new();
        for atom in self.atoms.iter_mut() {
            atom.set_element_index(elements.insert(atom.get_element()));
        }

        self.elements = elements;
    }

    /// Get the element index of an atom which has already been resolved.
    ///
    /// ## Panics
    /// Panics if the element index of the atom has not been resolved.
    #[inline]
    pub(crate) fn element_index_of(atom: &Atom) -> usize {
        atom.get_element_index().unwrap_or_else(|| {
            panic!(
                "FATAL CORRELATION ERROR | Cell::element_index_of | Element index of atom `{}` has not been resolved.",
                atom.get_atom_number()
            )
        })
    }

    pub(crate) fn invalidate(&mut self) {
        self.bond_lengths = None;
        self.neighbors_identified = false;
        self.atoms.iter_mut().for_each(|atom| atom.clear_bonded());
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::position::Position;
    use crate::test_utilities::utilities::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn new_resolves_elements() {
        let cell = sio2_like_cell();

        assert_eq!(cell.get_elements().len(), 2);
        assert_eq!(cell.get_elements().symbol(0), Some("Si"));
        assert_eq!(cell.get_elements().symbol(1), Some("O"));

        for atom in cell.get_atoms() {
            let expected = cell.get_elements().index_of(atom.get_element()).unwrap();
            assert_eq!(atom.get_element_index(), Some(expected));
        }

        assert!(cell.get_bond_lengths().is_none());
        assert!(!cell.neighbors_identified());
    }

    #[test]
    fn add_atom_keeps_indices() {
        let mut cell = sio2_like_cell();
        cell.add_atom(Atom::new(
            100,
            "Ge",
            Position::fractional([0.1, 0.1, 0.1].into()),
        ));
        cell.add_atom(Atom::new(
            101,
            "O",
            Position::fractional([0.2, 0.1, 0.1].into()),
        ));

        assert_eq!(cell.get_elements().index_of("Si"), Some(0));
        assert_eq!(cell.get_elements().index_of("O"), Some(1));
        assert_eq!(cell.get_elements().index_of("Ge"), Some(2));

        let last = cell.get_atoms().last().unwrap();
        assert_eq!(last.get_element_index(), Some(1));
    }

    #[test]
    fn set_lattice_parameters_invalid() {
        let mut cell = sio2_like_cell();
        let original = *cell.get_lattice();

        assert!(cell
            .set_lattice_parameters([5.0, 5.0, -5.0, 90.0, 90.0, 90.0].into())
            .is_err());
        assert_eq!(*cell.get_lattice(), original);
    }

    #[test]
    fn fractional_cartesian_round_trip() {
        let mut cell = sio2_like_cell();
        let original: Vec<Vector3D> = cell
            .get_atoms()
            .iter()
            .map(|a| *a.get_position().coordinates())
            .collect();

        cell.fractional_to_cartesian().unwrap();
        assert!(cell.get_atoms().iter().all(|a| a.get_position().is_cartesian()));

        match cell.fractional_to_cartesian() {
            Err(PositionError::NotFractional(1)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }

        cell.cartesian_to_fractional().unwrap();
        for (atom, expected) in cell.get_atoms().iter().zip(original.iter()) {
            let position = atom.get_position().as_fractional().unwrap();
            assert_approx_eq!(f64, position.x, expected.x, epsilon = 1e-12);
            assert_approx_eq!(f64, position.y, expected.y, epsilon = 1e-12);
            assert_approx_eq!(f64, position.z, expected.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn mixed_positions_are_rejected() {
        let mut cell = sio2_like_cell();
        cell.add_atom(Atom::new(
            50,
            "O",
            Position::cartesian([1.0, 1.0, 1.0].into()),
        ));

        match cell.fractional_to_cartesian() {
            Err(PositionError::NotFractional(50)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }

        assert!(cell.get_atom(0).unwrap().get_position().is_fractional());
    }

    #[test]
    fn fold_into_cell() {
        let mut cell = sio2_like_cell();
        cell.fold_into_cell();

        let lattice = *cell.get_lattice();
        for atom in cell.get_atoms() {
            let position = atom.get_position().as_cartesian().unwrap();
            let fractional = lattice.to_fractional(position);
            for x in [fractional.x, fractional.y, fractional.z] {
                assert!(x > -1e-12 && x < 1.0);
            }
        }
    }
}
