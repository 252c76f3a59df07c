// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the bond-length table and of the pairwise distance and bonding pass.

use getset::{CopyGetters, Getters};
use ndarray::Array2;

use crate::errors::{CellError, HistogramError};
use crate::histogram::rdf::RdfHistograms;
use crate::structures::{
    atom::{Atom, AtomImage},
    element::{CovalentRadius, ElementTable},
    vector3d::Vector3D,
};
use crate::system::Cell;

/// Maximal center-to-center distances at which two atoms are still considered bonded,
/// for every pair of elements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondLengths {
    table: Array2<f64>,
    bond_factor: f64,
}

impl BondLengths {
    /// Calculate bond lengths as `(radius_i + radius_j) * bond_factor` for all pairs of elements.
    ///
    /// ## Returns
    /// `BondLengths` if all elements have a known covalent radius and `bond_factor` is positive.
    /// `CellError` otherwise.
    pub fn new(
        elements: &ElementTable,
        radii: &impl CovalentRadius,
        bond_factor: f64,
    ) -> Result<Self, CellError> {
        if !bond_factor.is_finite() || bond_factor <= 0.0 {
            return Err(CellError::InvalidBondFactor(bond_factor));
        }

        let radii = elements
            .iter()
            .map(|symbol| radii.covalent_radius(symbol))
            .collect::<Result<Vec<f64>, _>>()?;

        let n = radii.len();
        let table = Array2::from_shape_fn((n, n), |(i, j)| (radii[i] + radii[j]) * bond_factor);

        Ok(BondLengths { table, bond_factor })
    }

    /// Get the bond length between elements with indices `i` and `j`.
    ///
    /// ## Panics
    /// Panics if any of the indices is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.table[[i, j]]
    }

    /// Get the number of elements covered by the table.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.table.nrows()
    }

    /// Get the factor used to scale the summed covalent radii.
    #[inline]
    pub fn bond_factor(&self) -> f64 {
        self.bond_factor
    }
}

/// Raw distances between all pairs of atoms and periodic images.
///
/// Distances are stored in ordered element-pair buckets: bucket `(i, j)` contains
/// distances from atoms of element `i` to images of atoms of element `j`.
#[derive(Debug, Clone, Getters, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairDistances {
    distances: Array2<Vec<f64>>,
    /// Elements of the analyzed cell.
    #[getset(get = "pub")]
    elements: ElementTable,
    /// Cutoff used to determine the periodic images.
    #[getset(get_copy = "pub")]
    cutoff: f64,
    /// Number of atoms in the analyzed cell.
    #[getset(get_copy = "pub")]
    n_atoms: usize,
    /// Volume of the analyzed cell.
    #[getset(get_copy = "pub")]
    volume: f64,
}

impl PairDistances {
    /// Get distances from atoms of element `i` to images of atoms of element `j`.
    ///
    /// ## Panics
    /// Panics if any of the indices is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> &[f64] {
        &self.distances[[i, j]]
    }

    /// Get the number of elements.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Get the total number of recorded distances.
    pub fn n_samples(&self) -> usize {
        self.distances.iter().map(|bucket| bucket.len()).sum()
    }

    /// Bin the distances into J(r) and g(r) histograms.
    pub fn histograms(&self, bin_width: f64) -> Result<RdfHistograms, HistogramError> {
        RdfHistograms::new(self, bin_width)
    }
}

/// Distances and bonded neighbors collected for a contiguous range of central atoms.
#[derive(Debug, Clone)]
pub(crate) struct PairPass {
    pub(crate) distances: Array2<Vec<f64>>,
    pub(crate) bonded: Vec<Vec<AtomImage>>,
}

impl PairPass {
    fn new(n_elements: usize, n_atoms: usize) -> Self {
        PairPass {
            distances: Array2::from_elem((n_elements, n_elements), Vec::new()),
            bonded: vec![Vec::new(); n_atoms],
        }
    }

    /// Append the results of another pass, which must cover the directly following range of atoms.
    pub(crate) fn append(&mut self, other: PairPass) {
        for (bucket, other_bucket) in self.distances.iter_mut().zip(other.distances) {
            bucket.extend(other_bucket);
        }

        self.bonded.extend(other.bonded);
    }
}

/// ## Methods for identifying bonded atoms and calculating pairwise distances.
impl Cell {
    /// Calculate the bond-length table of the cell.
    ///
    /// Rebuilds the element table, assigns element indices to all atoms and
    /// calculates `(radius_i + radius_j) * bond_factor` for all pairs of elements.
    /// Previously identified bonded neighbors are discarded.
    ///
    /// ## Returns
    /// Reference to the calculated `BondLengths` if successful.
    /// `CellError::ElementError` naming the element without a known covalent radius.
    /// `CellError::InvalidBondFactor` if the bond factor is not positive.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let lattice = Lattice::from_parameters([5.0, 5.0, 5.0, 90.0, 90.0, 90.0].into()).unwrap();
    /// let atoms = vec![
    ///     Atom::new(1, "Si", Position::fractional([0.0, 0.0, 0.0].into())),
    ///     Atom::new(2, "O", Position::fractional([0.3, 0.0, 0.0].into())),
    /// ];
    /// let mut cell = Cell::new("SiO", lattice, atoms);
    ///
    /// let bonds = cell.build_bond_lengths(&CovalentRadii::default(), 1.2).unwrap();
    /// assert_approx_eq!(f64, bonds.get(0, 1), (1.11 + 0.66) * 1.2);
    /// ```
    pub fn build_bond_lengths(
        &mut self,
        radii: &impl CovalentRadius,
        bond_factor: f64,
    ) -> Result<&BondLengths, CellError> {
        self.invalidate();
        self.resolve_elements();

        let bond_lengths = BondLengths::new(&self.elements, radii, bond_factor)?;
        log::debug!(
            "Calculated bond lengths for {} element(s) with bond factor {}.",
            bond_lengths.n_elements(),
            bond_factor
        );

        Ok(self.bond_lengths.insert(bond_lengths))
    }

    /// Calculate distances between all atoms and all periodic images within the replication range
    /// and identify bonded neighbors of every atom.
    ///
    /// ## Details
    /// 1. The bond-length table is calculated (see `Cell::build_bond_lengths`).
    /// 2. All atoms are folded into the primary cell. Positions become cartesian.
    /// 3. The number of periodic images along each lattice vector is `ceil(cutoff / own-axis component)`
    ///    (see `Lattice::replication_counts`).
    /// 4. For every ordered pair of distinct atoms (A, B) and every periodic image of B,
    ///    where atoms are distinguished by their atom numbers,
    ///    the distance is recorded into the bucket of the element pair (A, B).
    ///    If the distance is at most the bond length of the pair, the image is
    ///    appended to the bonded neighbors of A.
    ///
    /// Both orderings of every pair are visited. All distances are recorded, even those beyond `cutoff`.
    /// All images within the bond length are recorded, even multiple images of the same atom.
    ///
    /// ## Returns
    /// `PairDistances` if successful. `CellError` if `cutoff` or `bond_factor` is invalid
    /// or if any element has no known covalent radius.
    pub fn compute_rdf(
        &mut self,
        radii: &impl CovalentRadius,
        cutoff: f64,
        bond_factor: f64,
    ) -> Result<PairDistances, CellError> {
        let counts = self.prepare_pair_pass(radii, cutoff, bond_factor)?;
        let pass = self.pair_pass((0, self.atoms.len()), counts);

        Ok(self.finish_pair_pass(pass, cutoff))
    }

    /// Validate the input, calculate bond lengths, fold the atoms and get the replication counts.
    pub(crate) fn prepare_pair_pass(
        &mut self,
        radii: &impl CovalentRadius,
        cutoff: f64,
        bond_factor: f64,
    ) -> Result<[i32; 3], CellError> {
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(CellError::InvalidCutoff(cutoff));
        }

        self.build_bond_lengths(radii, bond_factor)?;
        self.fold_into_cell();

        let counts = self.lattice.replication_counts(cutoff);
        log::debug!(
            "Replicating the cell {}x{}x{} times in each direction for cutoff {}.",
            counts[0],
            counts[1],
            counts[2],
            cutoff
        );

        Ok(counts)
    }

    /// Calculate distances and bonded neighbors for central atoms with indices in `range` (start, end).
    ///
    /// ## Panics
    /// Panics if the bond-length table has not been calculated
    /// or if the atom positions are not cartesian.
    pub(crate) fn pair_pass(&self, range: (usize, usize), counts: [i32; 3]) -> PairPass {
        let bond_lengths = self.bond_lengths.as_ref().expect(
            "FATAL CORRELATION ERROR | Cell::pair_pass | Bond lengths should have been calculated.",
        );

        let (start, end) = range;
        let mut pass = PairPass::new(self.elements.len(), end - start);

        let [i_max, j_max, k_max] = counts;
        let mut shifts = Vec::new();
        for i in -i_max..=i_max {
            for j in -j_max..=j_max {
                for k in -k_max..=k_max {
                    shifts.push(([i, j, k], self.lattice.image_shift([i, j, k])));
                }
            }
        }

        for (a, atom_a) in self.atoms[start..end].iter().enumerate() {
            let id_a = Cell::element_index_of(atom_a);
            let pos_a = Cell::folded_position(atom_a);

            for atom_b in self.atoms.iter() {
                if atom_a.get_atom_number() == atom_b.get_atom_number() {
                    continue;
                }

                let id_b = Cell::element_index_of(atom_b);
                let pos_b = Cell::folded_position(atom_b);
                let bond_length = bond_lengths.get(id_a, id_b);

                for (offset, shift) in shifts.iter() {
                    let image = pos_b + *shift;
                    let distance = pos_a.distance(&image);

                    pass.distances[[id_a, id_b]].push(distance);

                    if distance <= bond_length {
                        pass.bonded[a].push(AtomImage::new(
                            atom_b.get_atom_number(),
                            id_b,
                            *offset,
                            image,
                        ));
                    }
                }
            }
        }

        pass
    }

    /// Store the bonded neighbors into the atoms and package the distances.
    pub(crate) fn finish_pair_pass(&mut self, pass: PairPass, cutoff: f64) -> PairDistances {
        let mut lonely = 0usize;
        for (atom, bonded) in self.atoms.iter_mut().zip(pass.bonded) {
            if bonded.is_empty() {
                lonely += 1;
            }
            atom.set_bonded(bonded);
        }

        if lonely > 0 {
            log::warn!("{} atom(s) have no bonded neighbor.", lonely);
        }

        self.neighbors_identified = true;

        let distances = PairDistances {
            distances: pass.distances,
            elements: self.elements.clone(),
            cutoff,
            n_atoms: self.atoms.len(),
            volume: self.lattice.volume(),
        };

        log::debug!("Recorded {} pairwise distances.", distances.n_samples());
        distances
    }

    /// Get the cartesian position of an atom that has been folded into the cell.
    #[inline]
    fn folded_position(atom: &Atom) -> Vector3D {
        *atom.get_position().as_cartesian().unwrap_or_else(|| {
            panic!(
                "FATAL CORRELATION ERROR | Cell::folded_position | Position of atom `{}` should be cartesian.",
                atom.get_atom_number()
            )
        })
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
