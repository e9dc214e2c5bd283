//! A pure Rust exploration core for the WS22 molecular database.
//! It downloads and decodes per-molecule archives of quantum-chemical
//! properties, reshapes them into per-conformation result tables, computes
//! internal coordinates on demand, and summarizes every result by
//! conformation family.
//!
//! # Features
//!
//! - **Dataset loading** — NPZ archive download from the published Zenodo
//!   record (or a local directory), decoded and cached per molecule
//! - **Property extraction** — Energies, forces, Mulliken charges, dipole
//!   and quadrupole moments, polarizability, vibrational frequencies,
//!   thermal energies, HOMO-LUMO gaps, and spatial extents as long-form
//!   tables keyed by conformation family
//! - **Internal coordinates** — Distance, angle, and dihedral series across
//!   all conformations from comma-separated atom-index selections
//! - **Statistics** — Per-family descriptive statistics with interpolated
//!   quartiles
//! - **Exports** — CSV, column-oriented JSON, and single-geometry XYZ
//!
//! # Quick Start
//!
//! Datasets usually come from a [`DatasetStore`]; they can also be built
//! directly from named arrays:
//!
//! ```
//! use std::collections::HashMap;
//!
//! use ndarray::{ArrayD, IxDyn};
//! use ws22_explore::{Dataset, Field, Property, extract, summarize};
//!
//! // Two conformations of a three-atom fragment (H, C, O)
//! let mut arrays = HashMap::new();
//! arrays.insert(
//!     Field::Z,
//!     ArrayD::from_shape_vec(IxDyn(&[1, 3]), vec![1.0, 6.0, 8.0])?,
//! );
//! arrays.insert(
//!     Field::R,
//!     ArrayD::from_shape_vec(
//!         IxDyn(&[2, 3, 3]),
//!         vec![
//!             0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, // conformation 1
//!             0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 0.0, // conformation 2
//!         ],
//!     )?,
//! );
//! arrays.insert(
//!     Field::Conf,
//!     ArrayD::from_shape_vec(IxDyn(&[2, 1]), vec![1.0, 2.0])?,
//! );
//! arrays.insert(
//!     Field::E,
//!     ArrayD::from_shape_vec(IxDyn(&[2, 1]), vec![-5.0, -3.0])?,
//! );
//! let dataset = Dataset::from_arrays(arrays)?;
//!
//! // Potential energy is shifted so the most stable conformation reads zero
//! let table = extract(&dataset, &Property::PotentialEnergy)?;
//! assert_eq!(
//!     table.float_column("Potential energy"),
//!     Some(&[0.0, 2.0][..])
//! );
//!
//! // Per-family summary statistics
//! let stats = summarize(&table, "Potential energy")?;
//! assert_eq!(stats.rows.len(), 2);
//! assert_eq!(stats.rows[0].count, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Archive download, NPZ decoding, and CSV/JSON/XYZ export
//! - [`DatasetStore`] — Cached dataset loading, one fetch per molecule
//! - [`extract`] / [`build_table`] / [`summarize`] — The analysis entry
//!   points
//!
//! # Data Types
//!
//! ## Datasets
//!
//! - [`Dataset`] — Validated per-molecule array collection
//! - [`Field`] — The named arrays an archive carries
//! - [`Molecule`] — The ten-molecule catalog of the published record
//! - [`Element`] — The H/C/N/O lookup used for atom labels
//! - [`Geometry`] — One conformation's element labels and coordinates
//!
//! ## Results
//!
//! - [`DataTable`] — Column-oriented result rows plus the conformation
//!   column
//! - [`StatsTable`] / [`FamilyStats`] — Per-family descriptive statistics
//!
//! ## Selections
//!
//! - [`Property`] — Closed set of extractable properties with their
//!   sub-selections
//! - [`ForceComponent`], [`DipoleComponent`], [`QuadrupoleComponent`],
//!   [`EnergyKind`] — Component filters
//! - [`CoordSpec`] — Parsed distance/angle/dihedral atom-index selection

mod analysis;
mod model;
mod store;

pub mod io;

pub use model::dataset::{Dataset, Field, Geometry};
pub use model::element::{Element, ParseElementError, UnknownElementError};
pub use model::error::ModelError;
pub use model::molecule::{Molecule, ParseMoleculeError};
pub use model::table::{
    CONFORMATION_COLUMN, Column, ColumnData, DataTable, FamilyStats, StatsTable,
};

pub use analysis::{
    CoordSpec, DipoleComponent, EnergyKind, ForceComponent, Property, QuadrupoleComponent,
    build_table, compute, extract, summarize,
};

pub use store::{DatasetSource, DatasetStore};

pub use analysis::Error as AnalysisError;
