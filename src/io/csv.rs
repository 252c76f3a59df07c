// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of functions for writing histograms as comma-separated tables.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::HistogramError;
use crate::histogram::Histogram;

impl<T: Display> Histogram<T> {
    /// Write the histogram as a comma-separated table.
    ///
    /// The first line contains the names of the columns, each following line one bin.
    /// Every field, including the last one on a line, is followed by a comma.
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
    /// cell.compute_rdf(&CovalentRadii::default(), 3.0, 1.2).unwrap();
    ///
    /// let mut output = Vec::new();
    /// cell.compute_cn().unwrap().histogram().write_csv(&mut output).unwrap();
    ///
    /// let output = String::from_utf8(output).unwrap();
    /// assert_eq!(output.lines().next().unwrap(), "#,Po-Po,");
    /// ```
    pub fn write_csv(&self, writer: &mut impl Write) -> Result<(), HistogramError> {
        for name in self.header() {
            write!(writer, "{},", name).map_err(|_| HistogramError::CouldNotWrite)?;
        }
        writeln!(writer).map_err(|_| HistogramError::CouldNotWrite)?;

        for row in self.data().rows() {
            for value in row.iter() {
                write!(writer, "{},", value).map_err(|_| HistogramError::CouldNotWrite)?;
            }
            writeln!(writer).map_err(|_| HistogramError::CouldNotWrite)?;
        }

        writer.flush().map_err(|_| HistogramError::CouldNotWrite)?;

        Ok(())
    }

    /// Write the histogram as a comma-separated table into a file.
    ///
    /// ## Returns
    /// `Ok` if successful. `HistogramError` if the file could not be created or written.
    pub fn write_csv_file(&self, filename: impl AsRef<Path>) -> Result<(), HistogramError> {
        let output = File::create(&filename)
            .map_err(|_| HistogramError::CouldNotCreate(Box::from(filename.as_ref())))?;

        let mut writer = BufWriter::new(output);
        self.write_csv(&mut writer)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn write_csv() {
        let histogram = Histogram::new(
            vec!["r".to_owned(), "Si-O".to_owned()],
            array![[0.0, 1.5], [0.5, 2.0]],
        );

        let mut output = Vec::new();
        histogram.write_csv(&mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "r,Si-O,\n0,1.5,\n0.5,2,\n");
    }

    #[test]
    fn write_csv_file() {
        let histogram = Histogram::new(
            vec!["#".to_owned(), "Si-O".to_owned(), "O-Si".to_owned()],
            array![[0, 3, 0], [1, 0, 2]],
        );

        let file = NamedTempFile::new().unwrap();
        histogram.write_csv_file(file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "#,Si-O,O-Si,\n0,3,0,\n1,0,2,\n");
    }

    #[test]
    fn write_csv_file_invalid_path() {
        let histogram = Histogram::new(vec!["r".to_owned()], array![[0.0]]);

        match histogram.write_csv_file("nonexistent_directory/output.csv") {
            Err(HistogramError::CouldNotCreate(_)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
