//! FILENAME: core/transpose-engine/src/lib.rs
//! Measures-to-rows transform for pivoted query results.
//!
//! A query result normally has one row per dimension tuple with measures as
//! columns. This crate reshapes it into one row per (dimension tuple, measure)
//! pair, keeping pivot values spread across columns, optionally showing them
//! as deltas against the first pivot column.
//!
//! Layers:
//! - `definition`: Host payload and settings (what the transform IS)
//! - `options`: Option schema and visibility for the configuration panel
//! - `overrides`, `sequence`, `transpose`, `delta`: The individual steps
//! - `view`: Renderable output for the chart host (WHAT we display)
//! - `engine`: Orchestration and cell/header building (HOW we calculate)

pub mod definition;
pub mod options;
pub mod overrides;
pub mod sequence;
pub mod transpose;
pub mod delta;
pub mod view;
pub mod engine;
mod error;

pub use definition::*;
pub use view::*;
pub use error::TransposeError;
pub use delta::{compute_delta, format_delta_percent, DeltaArrow, DeltaColor, DeltaResult};
pub use options::{option_visibility, OptionDescriptor, OPTIONS};
pub use engine::{calculate_transpose, calculate_transpose_json, TransposeCalculator};
