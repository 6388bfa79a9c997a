use crate::record::rank_cmp;
use crate::{Error, RankedEntry, Result};
use ahash::AHashMap;
use std::collections::hash_map::Entry;

/// Per-category top-K results: category key to at most K ranked entries,
/// best first.
///
/// The table carries the bound it was built with so that independently
/// computed tables can be merged and re-bounded. Map iteration order is
/// arbitrary; [`sorted_entries`](TopKTable::sorted_entries) imposes the
/// deterministic total order.
#[derive(Debug, Clone)]
pub struct TopKTable {
    k: usize,
    groups: AHashMap<String, Vec<RankedEntry>>,
}

impl TopKTable {
    /// An empty table with the given bound.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidConfig("top-k must be at least 1".to_string()));
        }
        Ok(Self {
            k,
            groups: AHashMap::new(),
        })
    }

    pub(crate) fn from_groups(k: usize, groups: AHashMap<String, Vec<RankedEntry>>) -> Self {
        Self { k, groups }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of retained entries across all categories.
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(|v| v.len()).sum()
    }

    /// Entries for one category, best first.
    pub fn get(&self, category: &str) -> Option<&[RankedEntry]> {
        self.groups.get(category).map(|v| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RankedEntry])> {
        self.groups.iter().map(|(c, v)| (c.as_str(), v.as_slice()))
    }

    /// Merges another table into this one, re-bounding each category to K.
    ///
    /// The operation is pure with respect to content: it is associative and
    /// commutative, so tables built from disjoint shards of one stream merge
    /// into the same table direct ranking would produce. Both tables must
    /// carry the same bound.
    pub fn merge(mut self, other: TopKTable) -> Result<TopKTable> {
        if self.k != other.k {
            return Err(Error::InvalidConfig(format!(
                "cannot merge tables with different bounds ({} vs {})",
                self.k, other.k
            )));
        }
        for (category, entries) in other.groups {
            match self.groups.entry(category) {
                Entry::Occupied(mut slot) => {
                    let combined = slot.get_mut();
                    combined.extend(entries);
                    combined.sort_by(|a, b| rank_cmp(&b.item, b.score, &a.item, a.score));
                    combined.truncate(self.k);
                    for (i, entry) in combined.iter_mut().enumerate() {
                        entry.rank = (i + 1) as u32;
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(entries);
                }
            }
        }
        Ok(self)
    }

    /// All entries under the global emission order: category ascending
    /// (byte-lexicographic), then score descending, then item ascending.
    pub fn sorted_entries(&self) -> Vec<&RankedEntry> {
        let mut entries: Vec<&RankedEntry> = self.groups.values().flatten().collect();
        entries.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| rank_cmp(&b.item, b.score, &a.item, a.score))
        });
        entries
    }
}
