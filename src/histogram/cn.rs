// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the coordination number histogram.

use ndarray::Array2;

use crate::histogram::Histogram;
use crate::system::analysis::Coordination;

/// Arrange the coordination tensor into a table with one row per coordination count.
pub(crate) fn coordination_histogram(coordination: &Coordination) -> Histogram<usize> {
    let n = coordination.n_elements();
    let n_rows = coordination.n_counts();

    let mut header = vec![String::from("#")];
    let mut data = Array2::<usize>::zeros((n_rows, n * n + 1));

    for row in 0..n_rows {
        data[[row, 0]] = row;
    }

    let mut col = 0;
    for center in 0..n {
        for neighbor in 0..n {
            col += 1;
            header.push(coordination.elements().join(&[center, neighbor]));

            for row in 0..n_rows {
                data[[row, col]] = coordination.get(center, neighbor, row);
            }
        }
    }

    Histogram::new(header, data)
}

/******************************/
/*         UNIT TESTS         */
/******************************/
