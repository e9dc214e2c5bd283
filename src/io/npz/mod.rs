//! Decoder for the NPZ archive layout the WS22 database ships.
//!
//! An `.npz` file is a ZIP container whose members are `.npy` arrays, one
//! per dataset field. Members named after a known field are decoded and
//! widened to `f64`; anything else in the archive is ignored.

pub mod reader;
