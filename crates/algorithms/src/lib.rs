#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]
#![no_std]

//! Algorithms around freehand drawing surfaces: occupancy-grid boundary
//! tracing and polyline simplification.
//!
//! This crate is reexported in [scribble](https://docs.rs/scribble/).

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub extern crate scribble_stroke as stroke;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod hull;
pub mod simplify;

pub use crate::stroke::geom;
