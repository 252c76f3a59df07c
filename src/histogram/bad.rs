// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the bond-angle distribution histogram.

use ndarray::Array2;

use crate::errors::HistogramError;
use crate::histogram::{bin_index, check_bin_width, Histogram};
use crate::system::analysis::BondAngles;

/// Number of rows of the bond-angle distribution.
pub const BAD_ROWS: usize = 181;

/// Bin bond angles into a table with `BAD_ROWS` rows.
///
/// Row `h` of the axis column (`theta`) holds `h * bin_width`.
/// For every central element `i`, there is one column for every pair of neighbor elements `j <= k`,
/// filled from the angle bucket (j, i, k) and named `e_j-e_i-e_k`.
/// Columns where all three elements are identical are halved.
/// Angles beyond the last row are dropped.
pub(crate) fn angle_histogram(
    angles: &BondAngles,
    bin_width: f64,
) -> Result<Histogram<f64>, HistogramError> {
    check_bin_width(bin_width)?;

    let n = angles.n_elements();
    let n_cols = 1 + n * n * (n + 1) / 2;

    let mut header = vec![String::from("theta")];
    let mut data = Array2::<f64>::zeros((BAD_ROWS, n_cols));

    for row in 0..BAD_ROWS {
        data[[row, 0]] = row as f64 * bin_width;
    }

    let mut col = 0;
    let mut dropped = 0usize;
    for i in 0..n {
        for j in 0..n {
            for k in j..n {
                col += 1;
                header.push(angles.elements().join(&[j, i, k]));

                for &angle in angles.get(j, i, k) {
                    match bin_index(angle, bin_width, BAD_ROWS) {
                        Some(row) => data[[row, col]] += 1.0,
                        None => dropped += 1,
                    }
                }

                if i == j && i == k {
                    data.column_mut(col).mapv_inplace(|x| x / 2.0);
                }
            }
        }
    }

    if dropped > 0 {
        log::warn!(
            "{} bond angle(s) fall beyond the last bin of the bond-angle distribution.",
            dropped
        );
    }

    Ok(Histogram::new(header, data))
}

/******************************/
/*         UNIT TESTS         */
/******************************/
