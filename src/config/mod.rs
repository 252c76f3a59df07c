// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of the parameters controlling the structural analysis.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::ParamsError;

/// Unit in which bond angles are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Factor converting an angle in radians to this unit.
    #[inline]
    pub fn factor(&self) -> f64 {
        match self {
            AngleUnit::Degrees => 180.0 / std::f64::consts::PI,
            AngleUnit::Radians => 1.0,
        }
    }
}

/// Numeric parameters of the structural analysis.
///
/// ## Example
/// Parameters can be loaded from a YAML file. Missing fields take their default values:
/// ```yaml
/// ---
/// bond_factor: 1.15
/// rdf_cutoff: 8.0
/// angle_unit: radians
/// ...
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisParams {
    /// Multiplier applied to the sum of covalent radii to obtain the bond length.
    pub bond_factor: f64,
    /// Maximal distance for which the radial distribution function is calculated.
    pub rdf_cutoff: f64,
    /// Width of a bin of the radial distribution function.
    pub rdf_bin_width: f64,
    /// Width of a bin of the bond-angle distribution.
    pub bad_bin_width: f64,
    pub angle_unit: AngleUnit,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        AnalysisParams {
            bond_factor: 1.2,
            rdf_cutoff: 10.0,
            rdf_bin_width: 0.05,
            bad_bin_width: 1.0,
            angle_unit: AngleUnit::Degrees,
        }
    }
}

impl AnalysisParams {
    /// Load analysis parameters from a YAML file.
    ///
    /// ## Returns
    /// `AnalysisParams` if the file could be read and all values are valid.
    /// `ParamsError` otherwise.
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let mut file = match File::open(&filename) {
            Ok(x) => x,
            Err(_) => return Err(ParamsError::FileNotFound(Box::from(filename.as_ref()))),
        };

        let mut yaml = String::new();
        if file.read_to_string(&mut yaml).is_err() {
            return Err(ParamsError::FileCouldNotBeRead(Box::from(filename.as_ref())));
        }

        AnalysisParams::from_yaml(&yaml)
    }

    /// Parse analysis parameters from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParamsError> {
        let params: AnalysisParams =
            serde_yaml::from_str(yaml).map_err(ParamsError::CouldNotParseYaml)?;

        params.validate()?;
        Ok(params)
    }

    /// Check that all numeric parameters are positive and finite.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("bond_factor", self.bond_factor),
            ("rdf_cutoff", self.rdf_cutoff),
            ("rdf_bin_width", self.rdf_bin_width),
            ("bad_bin_width", self.bad_bin_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParamsError::InvalidValue(name.to_owned(), value));
            }
        }

        Ok(())
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
