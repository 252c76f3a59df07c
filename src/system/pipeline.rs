// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the complete structural analysis of a cell.

use getset::Getters;
use std::path::{Path, PathBuf};

use crate::config::AnalysisParams;
use crate::errors::{CellError, HistogramError};
use crate::histogram::{rdf::RdfHistograms, Histogram};
use crate::structures::element::CovalentRadius;
use crate::system::{
    analysis::{BondAngles, Coordination},
    bonds::PairDistances,
    Cell,
};

/// Results of the complete structural analysis of a cell.
#[derive(Debug, Clone, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Parameters of the analysis.
    #[getset(get = "pub")]
    params: AnalysisParams,
    /// Raw pairwise distances.
    #[getset(get = "pub")]
    distances: PairDistances,
    /// Coordination tensor.
    #[getset(get = "pub")]
    coordination: Coordination,
    /// Raw bond angles.
    #[getset(get = "pub")]
    angles: BondAngles,
    /// J(r) and g(r).
    #[getset(get = "pub")]
    rdf: RdfHistograms,
    /// Coordination number histogram.
    #[getset(get = "pub")]
    cn: Histogram<usize>,
    /// Bond-angle distribution.
    #[getset(get = "pub")]
    bad: Histogram<f64>,
}

impl Analysis {
    /// Write all histograms into files `{prefix}_J.csv`, `{prefix}_g.csv`, `{prefix}_CN.csv`, and `{prefix}_BAD.csv`.
    ///
    /// ## Returns
    /// Paths to the written files in the above order, or `HistogramError` if any file could not be written.
    ///
    /// ## Example
    /// ```no_run
    /// # use correlation_rs::prelude::*;
    /// #
    /// # let lattice = Lattice::default();
    /// # let atoms = Vec::new();
    /// let mut cell = Cell::new("Glass", lattice, atoms);
    /// let analysis = cell
    ///     .analyze(&CovalentRadii::default(), &AnalysisParams::default())
    ///     .unwrap();
    ///
    /// // writes `output/glass_J.csv`, `output/glass_g.csv`, `output/glass_CN.csv`, `output/glass_BAD.csv`
    /// analysis.write_files("output/glass").unwrap();
    /// ```
    pub fn write_files(&self, prefix: impl AsRef<Path>) -> Result<Vec<PathBuf>, HistogramError> {
        let j = Analysis::file_name(prefix.as_ref(), "J");
        let g = Analysis::file_name(prefix.as_ref(), "g");
        let cn = Analysis::file_name(prefix.as_ref(), "CN");
        let bad = Analysis::file_name(prefix.as_ref(), "BAD");

        self.rdf.j().write_csv_file(&j)?;
        self.rdf.g().write_csv_file(&g)?;
        self.cn.write_csv_file(&cn)?;
        self.bad.write_csv_file(&bad)?;

        log::info!("Written histograms with prefix '{}'.", prefix.as_ref().display());
        Ok(vec![j, g, cn, bad])
    }

    fn file_name(prefix: &Path, suffix: &str) -> PathBuf {
        let mut name = prefix.as_os_str().to_owned();
        name.push(format!("_{}.csv", suffix));
        PathBuf::from(name)
    }
}

impl Cell {
    /// Perform the complete structural analysis of the cell.
    ///
    /// The analysis proceeds in this order:
    /// 1. bond lengths, pairwise distances and bonded neighbors (`Cell::compute_rdf`),
    /// 2. coordination tensor (`Cell::compute_cn`),
    /// 3. bond angles (`Cell::compute_bad`),
    /// 4. histograms of distances, coordination numbers and angles.
    ///
    /// ## Returns
    /// `Analysis` containing all raw results and histograms.
    /// `CellError` if the parameters are invalid or any element has no known covalent radius.
    ///
    /// ## Example
    /// ```
    /// # use correlation_rs::prelude::*;
    /// #
    /// let lattice = Lattice::from_parameters([4.0, 4.0, 4.0, 90.0, 90.0, 90.0].into()).unwrap();
    /// let atoms = vec![
    ///     Atom::new(1, "Po", Position::fractional([0.0, 0.0, 0.0].into())),
    ///     Atom::new(2, "Po", Position::fractional([0.5, 0.5, 0.5].into())),
    /// ];
    /// let mut cell = Cell::new("Po", lattice, atoms);
    ///
    /// let params = AnalysisParams {
    ///     rdf_cutoff: 6.0,
    ///     ..Default::default()
    /// };
    /// let analysis = cell.analyze(&CovalentRadii::default(), &params).unwrap();
    ///
    /// assert_eq!(analysis.rdf().j().n_rows(), 121);
    /// assert_eq!(analysis.bad().n_rows(), 181);
    /// ```
    pub fn analyze(
        &mut self,
        radii: &impl CovalentRadius,
        params: &AnalysisParams,
    ) -> Result<Analysis, CellError> {
        params.validate()?;

        let distances = self.compute_rdf(radii, params.rdf_cutoff, params.bond_factor)?;
        log::info!(
            "Identified bonded neighbors of {} atom(s) in cell '{}'.",
            self.atoms.len(),
            self.name
        );

        let coordination = self.compute_cn()?;
        let angles = self.compute_bad(params.angle_unit)?;
        log::info!("Calculated coordination numbers and bond angles.");

        let rdf = distances.histograms(params.rdf_bin_width)?;
        let cn = coordination.histogram();
        let bad = angles.histogram(params.bad_bin_width)?;
        log::info!("Calculated histograms.");

        Ok(Analysis {
            params: *params,
            distances,
            coordination,
            angles,
            rdf,
            cn,
            bad,
        })
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AngleUnit;
    use crate::errors::ParamsError;
    use crate::structures::element::CovalentRadii;
    use crate::test_utilities::utilities::*;
    use std::fs;
    use tempfile::TempDir;

    fn params() -> AnalysisParams {
        AnalysisParams {
            bond_factor: 1.2,
            rdf_cutoff: 4.0,
            rdf_bin_width: 0.1,
            bad_bin_width: 1.0,
            angle_unit: AngleUnit::Degrees,
        }
    }

    #[test]
    fn analyze_cristobalite() {
        let mut cell = cristobalite_cell();
        let analysis = cell.analyze(&CovalentRadii::default(), &params()).unwrap();

        assert_eq!(analysis.distances().n_elements(), 2);
        assert_eq!(analysis.coordination().get(0, 1, 4), 8);
        assert_eq!(analysis.angles().n_samples(), 8 * 12 + 16 * 2);

        assert_eq!(analysis.rdf().j().n_rows(), 41);
        assert_eq!(analysis.cn().n_columns(), 5);
        assert_eq!(analysis.bad().n_columns(), 7);
        assert_eq!(analysis.params(), &params());
    }

    #[test]
    fn analyze_invalid_params() {
        let mut cell = cristobalite_cell();
        let mut invalid = params();
        invalid.rdf_cutoff = 0.0;

        match cell.analyze(&CovalentRadii::default(), &invalid) {
            Err(CellError::ParamsError(ParamsError::InvalidValue(name, _))) => {
                assert_eq!(name, "rdf_cutoff")
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn analyze_empty_cell() {
        let mut cell = Cell::new("Empty", Default::default(), Vec::new());
        let analysis = cell.analyze(&CovalentRadii::default(), &params()).unwrap();

        assert_eq!(analysis.rdf().j().n_columns(), 1);
        assert_eq!(analysis.cn().n_columns(), 1);
        assert_eq!(analysis.bad().n_columns(), 1);
    }

    #[test]
    fn write_files() {
        let mut cell = cristobalite_cell();
        let analysis = cell.analyze(&CovalentRadii::default(), &params()).unwrap();

        let directory = TempDir::new().unwrap();
        let prefix = directory.path().join("cristobalite");
        let files = analysis.write_files(&prefix).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap().to_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "cristobalite_J.csv",
                "cristobalite_g.csv",
                "cristobalite_CN.csv",
                "cristobalite_BAD.csv"
            ]
        );

        let j = fs::read_to_string(&files[0]).unwrap();
        assert_eq!(j.lines().next().unwrap(), "r,Si-Si,Si-O,O-O,");
        assert_eq!(j.lines().count(), 42);

        let cn = fs::read_to_string(&files[2]).unwrap();
        assert_eq!(cn.lines().next().unwrap(), "#,Si-Si,Si-O,O-Si,O-O,");
        assert_eq!(cn.lines().nth(5).unwrap(), "4,0,8,0,0,");

        let bad = fs::read_to_string(&files[3]).unwrap();
        assert_eq!(
            bad.lines().next().unwrap(),
            "theta,Si-Si-Si,Si-Si-O,O-Si-O,Si-O-Si,Si-O-O,O-O-O,"
        );
        assert_eq!(bad.lines().count(), 182);
        assert!(bad.lines().all(|line| line.ends_with(',')));
    }
}
