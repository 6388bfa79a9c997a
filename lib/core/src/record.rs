use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single input record: a category key, an item name, and a score.
///
/// Records are immutable once produced and live only for one pass through
/// the pipeline. Scores are unsigned, so the upstream contract that scores
/// are never negative holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub category: String,
    pub item: String,
    pub score: u64,
}

impl Record {
    pub fn new(category: impl Into<String>, item: impl Into<String>, score: u64) -> Self {
        Self {
            category: category.into(),
            item: item.into(),
            score,
        }
    }
}

/// A record retained by the ranker, with its rank within its category.
///
/// Ranks start at 1 and are contiguous within a category. Only the ranker
/// produces these; rank is never read from input data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub category: String,
    pub item: String,
    pub score: u64,
    pub rank: u32,
}

/// The ranking order within a category: higher score wins, equal scores
/// fall back to the lexicographically smaller item.
///
/// Returns `Greater` when `a` outranks `b`. Content-based on purpose:
/// selection and merging stay deterministic no matter how the input
/// stream is ordered or sharded.
#[inline]
pub(crate) fn rank_cmp(a_item: &str, a_score: u64, b_item: &str, b_score: u64) -> Ordering {
    a_score.cmp(&b_score).then_with(|| b_item.cmp(a_item))
}
