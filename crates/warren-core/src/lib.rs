//! Core types for the Warren layout toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! geometry primitives ([`Vector`], [`VectorD`]), the [`Area`] data model,
//! the injectable [`RandomSource`], and the [`SampleStats`] summary used by
//! the layout engine's convergence check.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod area;
pub mod rng;
pub mod stats;
pub mod vector;

pub use area::{Area, AreaType};
pub use rng::RandomSource;
pub use stats::SampleStats;
pub use vector::{Vector, VectorD, EPSILON};
