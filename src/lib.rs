// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! # correlation_rs: Structural Correlations of Periodic Cells
//!
//! Rust library for calculating radial distribution functions, coordination numbers
//! and bond-angle distributions of crystalline and amorphous materials described by a periodic cell.
//!
//! ## Usage
//!
//! Run
//!
//! ```bash
//! $ cargo add correlation_rs
//! ```
//!
//! Import the crate in your Rust code:
//! ```
//! use correlation_rs::prelude::*;
//! ```
//!
//! ## Examples
//!
//! #### Analyzing a cell
//!
//! Construct a cell, perform the complete analysis
//! and write the histograms into csv files.
//!
//! ```no_run
//! use correlation_rs::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let lattice = Lattice::from_parameters([3.35, 3.35, 3.35, 90.0, 90.0, 90.0].into())?;
//!     let atoms = vec![
//!         Atom::new(1, "Po", Position::fractional([0.0, 0.0, 0.0].into())),
//!         Atom::new(2, "Po", Position::fractional([0.5, 0.5, 0.5].into())),
//!     ];
//!     let mut cell = Cell::new("Polonium", lattice, atoms);
//!
//!     let params = AnalysisParams::from_file("params.yaml")?;
//!     let analysis = cell.analyze(&CovalentRadii::default(), &params)?;
//!
//!     // writes `polonium_J.csv`, `polonium_g.csv`, `polonium_CN.csv` and `polonium_BAD.csv`
//!     analysis.write_files("polonium")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! #### Running the individual steps
//!
//! The analysis can also be performed step by step. Bonded neighbors identified by
//! `Cell::compute_rdf` are stored inside the atoms and are used by `Cell::compute_cn`
//! and `Cell::compute_bad`.
//!
//! ```
//! use correlation_rs::prelude::*;
//!
//! // simple cubic structure with spacing of 4 in a 2×2×2 supercell
//! let lattice = Lattice::from_parameters([8.0, 8.0, 8.0, 90.0, 90.0, 90.0].into()).unwrap();
//! let mut cell = Cell::new("Polonium", lattice, Vec::new());
//! for x in [0.0, 0.5] {
//!     for y in [0.0, 0.5] {
//!         for z in [0.0, 0.5] {
//!             let number = cell.get_n_atoms() + 1;
//!             cell.add_atom(Atom::new(number, "Po", Position::fractional([x, y, z].into())));
//!         }
//!     }
//! }
//!
//! // bond length of Po-Po is 1.5 × (1.40 + 1.40) = 4.2
//! let distances = cell.compute_rdf(&CovalentRadii::default(), 5.0, 1.5).unwrap();
//! assert_eq!(distances.get(0, 0).len(), 8 * 6);
//!
//! let coordination = cell.compute_cn().unwrap();
//! assert_eq!(coordination.get(0, 0, 6), 8);
//!
//! let angles = cell.compute_bad(AngleUnit::Degrees).unwrap();
//! // opposite neighbors are images of the same atom and form no angle
//! assert_eq!(angles.n_samples(), 8 * 24);
//! ```
//!
//! #### Supplying covalent radii
//!
//! `CovalentRadii::default()` provides single-bond covalent radii of elements H to Cm.
//! Radii can be overriden from a yaml file or set directly. Any type implementing
//! the `CovalentRadius` trait can be used as a source of radii.
//!
//! ```no_run
//! use correlation_rs::prelude::*;
//!
//! let mut radii = CovalentRadii::default();
//! radii.update_from_file("my_radii.yaml").unwrap();
//! radii.set_radius("Si", 1.16).unwrap();
//! ```
//!
//! ## Output
//! All histograms are written as comma-separated tables with a header line.
//! Every field, including the last one on the line, is followed by a comma.
//!
//! - `{prefix}_J.csv`: radial distribution J(r) for every unordered pair of elements.
//! - `{prefix}_g.csv`: pair distribution g(r) for every unordered pair of elements.
//! - `{prefix}_CN.csv`: number of atoms with a given number of bonded neighbors for every ordered pair of elements.
//! - `{prefix}_BAD.csv`: bond-angle distribution for every triplet of elements.
//!
//! ## Error handling
//! The individual error types provided by `correlation_rs` are not exported into the `prelude` module.
//! If you want to work with a specific error type, include it explicitly from the `errors` module:
//! ```
//! use correlation_rs::errors::CellError;
//! ```
//!
//! ## Features
//! - `serde`: serialization and deserialization of lattices, positions and analysis results.
//! - `parallel`: `Cell::compute_rdf_parallel` distributing the pairwise pass between threads.
//!
//! ## Limitations
//! The number of periodic images searched along each lattice vector is estimated from the
//! diagonal of the lattice matrix. For strongly skewed cells, some neighbors close to the cutoff may be missed.
//!
//! ## License
//! This library is released under the MIT License.

/// Current version of the `correlation_rs` library.
pub const CORRELATION_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod errors;
pub mod histogram;
pub mod io;
pub mod structures;
pub mod system;
mod test_utilities;

/// Reexported basic `correlation_rs` structures and traits.
pub mod prelude {
    pub use crate::config::{AnalysisParams, AngleUnit};
    pub use crate::histogram::{rdf::RdfHistograms, Histogram};
    pub use crate::structures::atom::{Atom, AtomImage};
    pub use crate::structures::element::{CovalentRadii, CovalentRadius, ElementTable};
    pub use crate::structures::lattice::{Lattice, LatticeParameters};
    pub use crate::structures::position::{CoordinateKind, Position};
    pub use crate::structures::vector3d::Vector3D;
    pub use crate::system::analysis::{BondAngles, Coordination};
    pub use crate::system::bonds::{BondLengths, PairDistances};
    pub use crate::system::pipeline::Analysis;
    pub use crate::system::Cell;
}
