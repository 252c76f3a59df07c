// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Implementation of errors that can be returned by the `correlation_rs` library.

use colored::Colorize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when constructing or modifying a lattice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    #[error("{} lattice length `{}` is invalid (must be positive and finite)", "error:".red().bold(), .0.to_string().yellow())]
    InvalidLength(f64),
    #[error("{} lattice angle `{}` is invalid (must lie strictly between 0 and 180 degrees)", "error:".red().bold(), .0.to_string().yellow())]
    InvalidAngle(f64),
    #[error("{} lattice parameters produce a degenerate cell (volume `{}`)", "error:".red().bold(), .0.to_string().yellow())]
    DegenerateVolume(f64),
    #[error("{} lattice vector `{}` has zero length", "error:".red().bold(), .0.to_string().yellow())]
    ZeroVector(usize),
}

/// Errors that can occur when working with elements and covalent radii.
#[derive(Error, Debug)]
pub enum ElementError {
    #[error("{} element `{}` has no known covalent radius", "error:".red().bold(), .0.yellow())]
    UnknownElement(String),
    #[error("{} file '{}' was not found", "error:".red().bold(), .0.to_str().unwrap_or("").yellow())]
    FileNotFound(Box<Path>),
    #[error("{} file '{}' could not be read", "error:".red().bold(), .0.to_str().unwrap_or("").yellow())]
    FileCouldNotBeRead(Box<Path>),
    #[error("{} could not parse the yaml table of covalent radii ({})", "error:".red().bold(), .0)]
    CouldNotParseYaml(serde_yaml::Error),
    #[error("{} covalent radius of element `{}` is invalid (`{}`)", "error:".red().bold(), .0.yellow(), .1.to_string().yellow())]
    InvalidRadius(String, f64),
}

/// Errors that can occur when converting positions of atoms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("{} position of atom `{}` is not fractional", "error:".red().bold(), .0.to_string().yellow())]
    NotFractional(usize),
    #[error("{} position of atom `{}` is not cartesian", "error:".red().bold(), .0.to_string().yellow())]
    NotCartesian(usize),
}

/// Errors that can occur when analyzing a cell.
#[derive(Error, Debug)]
pub enum CellError {
    #[error("{} cutoff radius `{}` is invalid (must be positive and finite)", "error:".red().bold(), .0.to_string().yellow())]
    InvalidCutoff(f64),
    #[error("{} bond factor `{}` is invalid (must be positive and finite)", "error:".red().bold(), .0.to_string().yellow())]
    InvalidBondFactor(f64),
    #[error("{} bonded neighbors have not been identified (run the pairwise distance pass first)", "error:".red().bold())]
    BondsNotComputed,
    #[error("{} number of threads must be positive", "error:".red().bold())]
    ZeroThreads,
    #[error("{}", .0)]
    ElementError(ElementError),
    #[error("{}", .0)]
    HistogramError(HistogramError),
    #[error("{}", .0)]
    ParamsError(ParamsError),
}

impl From<ElementError> for CellError {
    fn from(e: ElementError) -> Self {
        CellError::ElementError(e)
    }
}

impl From<HistogramError> for CellError {
    fn from(e: HistogramError) -> Self {
        CellError::HistogramError(e)
    }
}

impl From<ParamsError> for CellError {
    fn from(e: ParamsError) -> Self {
        CellError::ParamsError(e)
    }
}

/// Errors that can occur when constructing or writing histograms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistogramError {
    #[error("{} bin width `{}` is invalid (must be positive and finite)", "error:".red().bold(), .0.to_string().yellow())]
    InvalidBinWidth(f64),
    #[error("{} file '{}' could not be created", "error:".red().bold(), .0.to_str().unwrap_or("").yellow())]
    CouldNotCreate(Box<Path>),
    #[error("{} could not write line into file", "error:".red().bold())]
    CouldNotWrite,
}

/// Errors that can occur when reading analysis parameters.
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("{} file '{}' was not found", "error:".red().bold(), .0.to_str().unwrap_or("").yellow())]
    FileNotFound(Box<Path>),
    #[error("{} file '{}' could not be read", "error:".red().bold(), .0.to_str().unwrap_or("").yellow())]
    FileCouldNotBeRead(Box<Path>),
    #[error("{} could not parse the yaml parameters ({})", "error:".red().bold(), .0)]
    CouldNotParseYaml(serde_yaml::Error),
    #[error("{} parameter `{}` has invalid value `{}`", "error:".red().bold(), .0.yellow(), .1.to_string().yellow())]
    InvalidValue(String, f64),
}
