//! # rankX Source
//!
//! Record source for the rankX ranking pipeline.
//!
//! Turns pagecounts-style dump files (plain or gzipped) into a stream of
//! parsed [`Record`](rankx_core::Record)s: one `category item score [bytes]`
//! line per record, with the trailing bytes column dropped and
//! namespace-prefixed pages filtered out before ranking.
//!
//! Acquisition of the dumps themselves (downloading, caching) is out of
//! scope; this crate reads local files only.

pub mod lines;

pub use lines::{is_namespace_page, LineSource};
