//! # rankX
//!
//! Deterministic per-category top-K ranking for large line-oriented datasets.
//!
//! rankX streams a dataset of `{category, item, score}` records once,
//! keeps the K highest-scoring records per category in bounded memory,
//! and writes a single sorted, byte-reproducible CSV artifact.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install rankx
//! rankx pagecounts-20160101-000000.gz --top-k 10 --dest results/top_by_category.csv
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use rankx::prelude::*;
//!
//! // Rank records from any source
//! let mut ranker = GroupRanker::new(10)?;
//! ranker.feed(vec![
//!     Record::new("en", "Main_Page", 242332),
//!     Record::new("fr", "Accueil", 50230),
//! ])?;
//! let table = ranker.finalize();
//!
//! // Emit the deterministic artifact
//! Emitter::new("results/top_by_category.csv").emit(&table)?;
//! # Ok::<(), rankx::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! rankX is composed of several crates:
//!
//! - [`rankx-core`](https://docs.rs/rankx-core) - Bounded top-K selection, table merging, sharded execution
//! - [`rankx-source`](https://docs.rs/rankx-source) - Pagecounts line parsing, namespace filtering, gzip input
//! - [`rankx-output`](https://docs.rs/rankx-output) - Atomic, deterministically ordered artifact emission
//!
//! ## Guarantees
//!
//! - **Bounded memory**: O(distinct categories x K), never O(records)
//! - **Deterministic output**: byte-identical across runs, arrival orders,
//!   and worker counts
//! - **Atomic emission**: the artifact appears complete or not at all

// Re-export core types
pub use rankx_core::{
    rank_sharded, BoundedTopK, Error, GroupRanker, RankedEntry, Record, Result, TopKTable,
};

// Re-export source
pub use rankx_source::{is_namespace_page, LineSource};

// Re-export output
pub use rankx_output::{Emitter, FIELD_DELIMITER};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        rank_sharded, BoundedTopK, Emitter, Error, GroupRanker, LineSource, RankedEntry, Record,
        Result, TopKTable, FIELD_DELIMITER,
    };
}
