// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Parallel implementation of the pairwise distance and bonding pass.

use crate::errors::CellError;
use crate::structures::element::CovalentRadius;
use crate::system::{
    bonds::{PairDistances, PairPass},
    Cell,
};

impl Cell {
    /// Calculate distances between all atoms and all periodic images within the replication range
    /// and identify bonded neighbors of every atom, using `n_threads` threads.
    ///
    /// Central atoms are split into contiguous ranges, one per thread.
    /// The results of the threads are merged in the order of the ranges, so the output
    /// is identical to the output of `Cell::compute_rdf`.
    ///
    /// ## Returns
    /// `PairDistances` if successful.
    /// `CellError::ZeroThreads` if `n_threads` is zero. Other `CellError` variants as for `Cell::compute_rdf`.
    pub fn compute_rdf_parallel(
        &mut self,
        radii: &impl CovalentRadius,
        cutoff: f64,
        bond_factor: f64,
        n_threads: usize,
    ) -> Result<PairDistances, CellError> {
        if n_threads == 0 {
            return Err(CellError::ZeroThreads);
        }

        let counts = self.prepare_pair_pass(radii, cutoff, bond_factor)?;
        let ranges = Cell::distribute_atoms(self.atoms.len(), n_threads);

        let cell = &*self;
        let pass = std::thread::scope(|s| {
            let handles: Vec<_> = ranges
                .into_iter()
                .map(|range| s.spawn(move || cell.pair_pass(range, counts)))
                .collect();

            let mut merged: Option<PairPass> = None;
            for handle in handles {
                let pass = handle.join().expect(
                    "FATAL CORRELATION ERROR | Cell::compute_rdf_parallel | A thread panicked!",
                );

                match merged.as_mut() {
                    Some(x) => x.append(pass),
                    None => merged = Some(pass),
                }
            }

            merged.expect(
                "FATAL CORRELATION ERROR | Cell::compute_rdf_parallel | At least one thread should have been spawned.",
            )
        });

        log::debug!("Merged pairwise distances from {} thread(s).", n_threads);
        Ok(self.finish_pair_pass(pass, cutoff))
    }

    /// Distribute atoms between threads as contiguous ranges (start, end).
    /// The first `n_atoms % n_threads` threads get one more atom.
    pub(crate) fn distribute_atoms(n_atoms: usize, n_threads: usize) -> Vec<(usize, usize)> {
        let atoms_per_thread = n_atoms / n_threads;
        let mut extra_atoms = n_atoms % n_threads;

        (0..n_threads)
            .scan(0, move |start, _| {
                let additional_atom = if extra_atoms > 0 { 1 } else { 0 };

                extra_atoms = extra_atoms.saturating_sub(1);

                let end = *start + atoms_per_thread + additional_atom;
                let range = (*start, end);
                *start = end;

                Some(range)
            })
            .collect()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
