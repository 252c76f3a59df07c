// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the radial distribution function histograms.

use getset::{CopyGetters, Getters};
use ndarray::{s, Array2};
use std::f64::consts::PI;

use crate::errors::HistogramError;
use crate::histogram::{bin_index, check_bin_width, Histogram};
use crate::system::bonds::PairDistances;

/// Radial distribution of the cell in two normalizations.
///
/// - `j`: the radial distribution J(r), i.e. counts divided by (number of atoms × bin width).
/// - `g`: the pair distribution g(r) = J(r) / (4π ρ₀ r²), where ρ₀ is the number density of the cell.
///
/// Both tables have column `r` holding `i * bin_width` for row `i`, followed by one column
/// for every unordered pair of elements.
#[derive(Debug, Clone, Getters, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RdfHistograms {
    #[getset(get = "pub")]
    j: Histogram<f64>,
    #[getset(get = "pub")]
    g: Histogram<f64>,
    #[getset(get_copy = "pub")]
    bin_width: f64,
}

impl RdfHistograms {
    /// Bin pairwise distances into J(r) and g(r).
    ///
    /// ## Details
    /// - The number of bins is `ceil(cutoff / bin_width) + 1`. Distances falling beyond the last bin are dropped.
    /// - Distances between elements `i` and `j` are read from the bucket (i, j) with `i <= j`.
    ///   For `i != j`, every distance is counted twice to account for the (j, i) ordering.
    /// - Bin 0 of g(r) is left unnormalized (r = 0).
    /// - For a cell without atoms, all values are zero.
    ///
    /// ## Returns
    /// `RdfHistograms` if successful. `HistogramError::InvalidBinWidth` if the bin width is not positive.
    pub fn new(distances: &PairDistances, bin_width: f64) -> Result<Self, HistogramError> {
        check_bin_width(bin_width)?;

        let n = distances.n_elements();
        let n_rows = (distances.cutoff() / bin_width).ceil() as usize + 1;
        let n_cols = n * (n + 1) / 2 + 1;

        let mut header = vec![String::from("r")];
        let mut data = Array2::<f64>::zeros((n_rows, n_cols));

        for row in 0..n_rows {
            data[[row, 0]] = row as f64 * bin_width;
        }

        let mut col = 0;
        let mut dropped = 0usize;
        for i in 0..n {
            for j in i..n {
                col += 1;
                header.push(distances.elements().join(&[i, j]));

                let increment = if i != j { 2.0 } else { 1.0 };
                for &distance in distances.get(i, j) {
                    match bin_index(distance, bin_width, n_rows) {
                        Some(row) => data[[row, col]] += increment,
                        None => dropped += 1,
                    }
                }
            }
        }

        log::debug!(
            "Binned pairwise distances into {} bins ({} distance(s) beyond the last bin).",
            n_rows,
            dropped
        );

        let n_atoms = distances.n_atoms() as f64;
        if distances.n_atoms() > 0 {
            let w_factor = n_atoms * bin_width;
            data.slice_mut(s![.., 1..]).mapv_inplace(|x| x / w_factor);
        }

        let j = Histogram::new(header.clone(), data.clone());

        if distances.n_atoms() > 0 {
            let rho = n_atoms / distances.volume();
            for row in 1..n_rows {
                let r = data[[row, 0]];
                let norm = 4.0 * PI * rho * r * r;
                for col in 1..n_cols {
                    data[[row, col]] /= norm;
                }
            }
        }

        let g = Histogram::new(header, data);

        Ok(RdfHistograms { j, g, bin_width })
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
