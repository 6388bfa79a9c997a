//! # rankX Output
//!
//! Output layer for the rankX ranking pipeline.
//!
//! Takes a finalized [`TopKTable`](rankx_core::TopKTable) and writes the
//! single deterministic artifact: comma-delimited `category,item,score`
//! lines in (category asc, score desc, item asc) order, written atomically
//! so a failed run never leaves a truncated file at the destination.

pub mod emit;

pub use emit::{Emitter, FIELD_DELIMITER};
