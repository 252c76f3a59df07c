// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of tabulated histograms of distances, coordination numbers and angles.

use ndarray::{Array2, ArrayView1, Axis};

use crate::errors::HistogramError;

pub mod bad;
pub mod cn;
pub mod rdf;

/// Table with named columns. Column 0 holds the axis of the histogram
/// (distance, coordination count or angle), each row corresponds to one bin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram<T> {
    header: Vec<String>,
    data: Array2<T>,
}

impl<T> Histogram<T> {
    /// Create a new histogram.
    ///
    /// ## Panics
    /// Panics if the number of columns of `data` does not match the length of `header`.
    pub(crate) fn new(header: Vec<String>, data: Array2<T>) -> Self {
        if header.len() != data.ncols() {
            panic!(
                "FATAL CORRELATION ERROR | Histogram::new | Header has {} columns but data has {} columns.",
                header.len(),
                data.ncols()
            );
        }

        Histogram { header, data }
    }

    /// Get the names of the columns.
    #[inline]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Get the data of the histogram. Rows are bins, columns follow the header.
    #[inline]
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get the number of bins.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Get the number of columns including the axis column.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.data.ncols()
    }

    /// Get the axis column.
    #[inline]
    pub fn axis(&self) -> ArrayView1<T> {
        self.data.index_axis(Axis(1), 0)
    }

    /// Get the column with the given name.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// #
    /// let lattice = Lattice::from_parameters([4.0, 4.0, 4.0, 90.0, 90.0, 90.0].into()).unwrap();
    /// let atoms = vec![
    ///     Atom::new(1, "Po", Position::fractional([0.0, 0.0, 0.0].into())),
    ///     Atom::new(2, "Po", Position::fractional([0.5, 0.0, 0.0].into())),
    /// ];
    /// let mut cell = Cell::new("Po", lattice, atoms);
    ///
    /// cell.compute_rdf(&CovalentRadii::default(), 3.0, 1.2).unwrap();
    /// let histogram = cell.compute_cn().unwrap().histogram();
    ///
    /// assert!(histogram.column("Po-Po").is_some());
    /// assert!(histogram.column("Po-O").is_none());
    /// ```
    pub fn column(&self, name: &str) -> Option<ArrayView1<T>> {
        self.header
            .iter()
            .position(|column| column == name)
            .map(|index| self.data.index_axis(Axis(1), index))
    }
}

/// Check that the bin width is positive and finite.
pub(crate) fn check_bin_width(bin_width: f64) -> Result<(), HistogramError> {
    if !bin_width.is_finite() || bin_width <= 0.0 {
        Err(HistogramError::InvalidBinWidth(bin_width))
    } else {
        Ok(())
    }
}

/// Get the bin into which `value` falls, if it is lower than `n_bins`.
#[inline]
pub(crate) fn bin_index(value: f64, bin_width: f64, n_bins: usize) -> Option<usize> {
    let bin = (value / bin_width).floor();
    if bin >= 0.0 && bin < n_bins as f64 {
        Some(bin as usize)
    } else {
        None
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
