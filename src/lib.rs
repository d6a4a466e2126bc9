//! Loop labeling and constrained heat diffusion on 2D grids.
//!
//! [`d2::label_loops`] tags every 4-connected loop of foreground cells with its
//! own label, [`d2::setup`] turns the labeled loops into an initial
//! temperature field, and [`d2::DiffusionField`] steps that field with an
//! explicit FTCS scheme while the loops stay pinned at their temperatures.

pub mod d2;
mod error;

pub use error::{Error, Result};
