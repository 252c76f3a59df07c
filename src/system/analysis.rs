// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the coordination and bond-angle analyses.

use getset::{CopyGetters, Getters};
use ndarray::{Array3, Axis};

use crate::config::AngleUnit;
use crate::errors::{CellError, HistogramError};
use crate::histogram::Histogram;
use crate::structures::element::ElementTable;
use crate::system::Cell;

/// Coordination tensor: for every (center element, neighbor element) pair,
/// the number of central atoms having exactly `k` bonded neighbors of the neighbor element.
#[derive(Debug, Clone, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordination {
    counts: Array3<usize>,
    /// Elements of the analyzed cell.
    #[getset(get = "pub")]
    elements: ElementTable,
}

impl Coordination {
    /// Get the number of atoms of element `center` having exactly `count` bonded neighbors of element `neighbor`.
    /// Returns 0 for counts beyond the tensor.
    ///
    /// ## Panics
    /// Panics if any of the element indices is out of range.
    #[inline]
    pub fn get(&self, center: usize, neighbor: usize, count: usize) -> usize {
        self.counts
            .get([center, neighbor, count])
            .copied()
            .unwrap_or_else(|| {
                if center >= self.n_elements() || neighbor >= self.n_elements() {
                    panic!(
                        "FATAL CORRELATION ERROR | Coordination::get | Element index out of range ({}, {}).",
                        center, neighbor
                    )
                }
                0
            })
    }

    /// Get the number of elements.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Get the number of count values covered by the tensor (maximal bonded-neighbor count + 2).
    #[inline]
    pub fn n_counts(&self) -> usize {
        self.counts.len_of(Axis(2))
    }

    /// Arrange the coordination tensor into a table.
    ///
    /// Column 0 (`#`) holds the coordination count, followed by one column
    /// for every ordered pair of elements (center-neighbor).
    pub fn histogram(&self) -> Histogram<usize> {
        crate::histogram::cn::coordination_histogram(self)
    }
}

/// Angle tensor: raw angles indexed by [neighbor element][center element][neighbor element].
#[derive(Debug, Clone, Getters, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondAngles {
    angles: Array3<Vec<f64>>,
    /// Elements of the analyzed cell.
    #[getset(get = "pub")]
    elements: ElementTable,
    /// Unit of the recorded angles.
    #[getset(get_copy = "pub")]
    unit: AngleUnit,
}

impl BondAngles {
    /// Get angles at centers of element `center` between neighbors of elements `first` and `second`.
    ///
    /// ## Panics
    /// Panics if any of the indices is out of range.
    #[inline]
    pub fn get(&self, first: usize, center: usize, second: usize) -> &[f64] {
        &self.angles[[first, center, second]]
    }

    /// Get the number of elements.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Get the total number of recorded angles.
    pub fn n_samples(&self) -> usize {
        self.angles.iter().map(|bucket| bucket.len()).sum()
    }

    /// Bin the angles into the bond-angle distribution table.
    pub fn histogram(&self, bin_width: f64) -> Result<Histogram<f64>, HistogramError> {
        crate::histogram::bad::angle_histogram(self, bin_width)
    }
}

/// ## Methods for analyzing bonded neighbors.
impl Cell {
    /// Calculate the coordination tensor from the bonded neighbors of all atoms.
    ///
    /// For every atom, bonded neighbors are counted per element and
    /// `coordination[center element][neighbor element][count]` is incremented.
    /// The tensor covers counts from 0 to the maximal number of bonded neighbors of any atom + 1.
    ///
    /// ## Returns
    /// `Coordination` if successful.
    /// `CellError::BondsNotComputed` if bonded neighbors have not been identified (see `Cell::compute_rdf`).
    pub fn compute_cn(&self) -> Result<Coordination, CellError> {
        if !self.neighbors_identified {
            return Err(CellError::BondsNotComputed);
        }

        let n = self.elements.len();
        let max_bonded = self
            .atoms
            .iter()
            .map(|atom| atom.get_bonded().len())
            .max()
            .unwrap_or(0);

        let mut counts = Array3::<usize>::zeros((n, n, max_bonded + 2));

        for atom in self.atoms.iter() {
            let mut per_element = vec![0usize; n];
            for image in atom.get_bonded() {
                per_element[image.element_index()] += 1;
            }

            let center = Cell::element_index_of(atom);
            for (neighbor, &count) in per_element.iter().enumerate() {
                counts[[center, neighbor, count]] += 1;
            }
        }

        log::debug!(
            "Calculated coordination numbers (maximal number of bonded neighbors: {}).",
            max_bonded
        );

        Ok(Coordination {
            counts,
            elements: self.elements.clone(),
        })
    }

    /// Calculate angles between all ordered pairs of bonded neighbors of every atom.
    ///
    /// For every atom and every ordered pair (X, Y) of its bonded neighbors belonging to different atoms,
    /// the angle X-center-Y is appended to `angles[element(X)][element(center)][element(Y)]`.
    /// Both orderings of every pair are recorded. Two periodic images of the same atom
    /// never form an angle.
    ///
    /// ## Returns
    /// `BondAngles` if successful.
    /// `CellError::BondsNotComputed` if bonded neighbors have not been identified (see `Cell::compute_rdf`).
    pub fn compute_bad(&self, unit: AngleUnit) -> Result<BondAngles, CellError> {
        if !self.neighbors_identified {
            return Err(CellError::BondsNotComputed);
        }

        let n = self.elements.len();
        let factor = unit.factor();
        let mut angles = Array3::from_elem((n, n, n), Vec::new());

        for atom in self.atoms.iter() {
            let center_index = Cell::element_index_of(atom);
            let center = atom.cartesian(&self.lattice);
            let bonded = atom.get_bonded();

            for first in bonded.iter() {
                for second in bonded.iter() {
                    if first.atom_number() == second.atom_number() {
                        continue;
                    }

                    let angle = center.vertex_angle(&first.position(), &second.position());
                    angles[[first.element_index(), center_index, second.element_index()]]
                        .push(angle * factor);
                }
            }
        }

        let angles = BondAngles {
            angles,
            elements: self.elements.clone(),
            unit,
        };

        log::debug!("Calculated {} bond angles.", angles.n_samples());
        Ok(angles)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
