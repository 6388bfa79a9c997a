use crate::record::rank_cmp;
use crate::table::TopKTable;
use crate::{Error, RankedEntry, Record, Result};
use ahash::AHashMap;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A record retained inside a bounded structure, before ranks are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    item: String,
    score: u64,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_cmp(&self.item, self.score, &other.item, other.score)
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A bounded min-heap that keeps the K best candidates seen so far.
///
/// Capacity is fixed at construction. Each push costs O(log K); the full
/// stream costs O(N log K) with O(K) memory per instance, never O(N).
pub struct BoundedTopK {
    heap: BinaryHeap<Reverse<Candidate>>,
    capacity: usize,
}

impl BoundedTopK {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
        }
    }

    /// Offers a candidate to the retained set.
    ///
    /// Below capacity the candidate is always kept. At capacity it replaces
    /// the current minimum only when it strictly outranks it; a candidate
    /// that compares equal to the minimum is dropped, so the first-seen
    /// record wins between exact duplicates.
    #[inline]
    pub fn push(&mut self, item: String, score: u64) {
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(Candidate { item, score }));
        } else if let Some(Reverse(min)) = self.heap.peek() {
            if rank_cmp(&item, score, &min.item, min.score) == Ordering::Greater {
                self.heap.pop();
                self.heap.push(Reverse(Candidate { item, score }));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drains the retained set, best first.
    fn into_sorted(self) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = self.heap.into_iter().map(|r| r.0).collect();
        candidates.sort_by(|a, b| b.cmp(a));
        candidates
    }
}

/// Streams records once and keeps, per category, the K highest-scoring ones.
///
/// One [`BoundedTopK`] per distinct category, created on first sight.
/// Lifecycle is create, feed records, [`finalize`](GroupRanker::finalize)
/// into a [`TopKTable`]; there is no shared or ambient state.
pub struct GroupRanker {
    k: usize,
    groups: AHashMap<String, BoundedTopK>,
}

impl GroupRanker {
    /// Creates a ranker retaining up to `k` records per category.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidConfig("top-k must be at least 1".to_string()));
        }
        Ok(Self {
            k,
            groups: AHashMap::new(),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of distinct categories seen so far.
    pub fn categories(&self) -> usize {
        self.groups.len()
    }

    /// Offers one record to its category's bounded structure.
    ///
    /// The upstream source is expected to never produce an empty category;
    /// the check here is defensive, and the run aborts rather than emitting
    /// a silently incomplete result.
    pub fn push(&mut self, record: Record) -> Result<()> {
        if record.category.is_empty() {
            return Err(Error::InvalidRecord(format!(
                "empty category for item '{}'",
                record.item
            )));
        }
        let k = self.k;
        self.groups
            .entry(record.category)
            .or_insert_with(|| BoundedTopK::new(k))
            .push(record.item, record.score);
        Ok(())
    }

    /// Feeds every record from an iterator, stopping at the first error.
    pub fn feed<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Record>,
    {
        for record in records {
            self.push(record)?;
        }
        Ok(())
    }

    /// Consumes the ranker and assigns ranks, best first, per category.
    pub fn finalize(self) -> TopKTable {
        let mut groups = AHashMap::with_capacity(self.groups.len());
        for (category, topk) in self.groups {
            let entries: Vec<RankedEntry> = topk
                .into_sorted()
                .into_iter()
                .enumerate()
                .map(|(i, c)| RankedEntry {
                    category: category.clone(),
                    item: c.item,
                    score: c.score,
                    rank: (i + 1) as u32,
                })
                .collect();
            groups.insert(category, entries);
        }
        TopKTable::from_groups(self.k, groups)
    }
}
