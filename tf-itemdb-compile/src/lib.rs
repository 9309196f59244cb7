//! Item aggregate compilation.
//!
//! [`reconcile`] merges the catalog snapshot, the pricing spreadsheet and the
//! locale table into one [`AggregateSnapshot`](tf_itemdb_core::AggregateSnapshot).
//! It is a pure function; [`compile`] wraps it with concurrent input loading
//! and writes the result.

pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod warpaint;

pub use error::CompileError;
pub use pipeline::{CompileReport, compile};
pub use reconcile::{CompileStats, DECORATED_QUALITY, Reconciliation, reconcile};
pub use warpaint::{WarpaintIndex, WarpaintName};
