//! # rankX Core
//!
//! Core library for the rankX ranking pipeline.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Record`] - One parsed input record: category, item, score
//! - [`RankedEntry`] - A retained record with its within-category rank
//! - [`BoundedTopK`] - Capacity-K min-heap keeping the K best candidates
//! - [`GroupRanker`] - One bounded structure per category over a single pass
//! - [`TopKTable`] - Per-category results with a deterministic merge
//! - [`rank_sharded`] - Parallel shard-then-merge execution
//!
//! ## Example
//!
//! ```rust
//! use rankx_core::{GroupRanker, Record};
//!
//! let mut ranker = GroupRanker::new(2).unwrap();
//! ranker.feed(vec![
//!     Record::new("en", "Main_Page", 100),
//!     Record::new("en", "Rust", 95),
//!     Record::new("en", "Obscure", 3),
//!     Record::new("fr", "Accueil", 50),
//! ]).unwrap();
//!
//! let table = ranker.finalize();
//! assert_eq!(table.get("en").unwrap().len(), 2);
//! assert_eq!(table.get("fr").unwrap().len(), 1);
//! ```
//!
//! Memory stays at O(distinct categories x K) no matter how long the
//! record stream is; each record costs O(log K).

pub mod error;
pub mod parallel;
pub mod ranker;
pub mod record;
pub mod table;

pub use error::{Error, Result};
pub use parallel::rank_sharded;
pub use ranker::{BoundedTopK, GroupRanker};
pub use record::{Record, RankedEntry};
pub use table::TopKTable;
