//! Core data structures for WS22 molecule datasets and their derived tables.
//!
//! This module provides the types that flow through `ws22-explore`:
//!
//! - [`element`] – The H/C/N/O element set of the catalog, with the fixed
//!   atomic-number lookup.
//! - [`molecule`] – The ten-molecule catalog and its archive-name mapping.
//! - [`dataset`] – Decoded archives as named `f64` arrays with validated
//!   shapes, plus per-conformation geometry extraction.
//! - [`table`] – Column-oriented result tables with the uniform
//!   conformation-id column.
//! - [`error`] – Structural and lookup errors raised by the above.
//!
//! The data model separates the immutable archive contents ([`Dataset`])
//! from derived tabular results ([`DataTable`]), so extraction and geometry
//! analysis can both feed the same statistics and export paths.
//!
//! [`Dataset`]: dataset::Dataset
//! [`DataTable`]: table::DataTable

pub mod dataset;
pub mod element;
pub mod error;
pub mod molecule;
pub mod table;
