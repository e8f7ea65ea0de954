//! Top-K selection over a finished accumulator.
//!
//! Ordering: utility descending; ties go to the shorter itemset, then to the
//! lexicographically smaller id sequence. Ids follow first appearance in the
//! dataset, so the ranking is fully determined by the input.

use std::cmp::Ordering;

use serde::Serialize;

use crate::itemset::Itemset;
use crate::transaction::Vocabulary;
use crate::utility::UtilityAccumulator;

/// One ranked itemset with its total utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedItemset {
    pub itemset: Itemset,
    pub utility: i64,
}

/// Top-K output, ordered by [`rank_order`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedResult {
    entries: Vec<RankedItemset>,
}

/// Same entry with item ids resolved to their tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedItemset<'a> {
    pub items: Vec<&'a str>,
    pub utility: i64,
}

impl RankedResult {
    pub fn entries(&self) -> &[RankedItemset] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedItemset> {
        self.entries.iter()
    }

    /// Resolve item ids through `vocabulary`. Unknown ids render as `?`.
    pub fn resolve<'a>(&self, vocabulary: &'a Vocabulary) -> Vec<ResolvedItemset<'a>> {
        self.entries
            .iter()
            .map(|e| ResolvedItemset {
                items: e
                    .itemset
                    .items()
                    .iter()
                    .map(|&id| vocabulary.resolve(id).unwrap_or("?"))
                    .collect(),
                utility: e.utility,
            })
            .collect()
    }
}

impl IntoIterator for RankedResult {
    type Item = RankedItemset;
    type IntoIter = std::vec::IntoIter<RankedItemset>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Total order used for ranking.
#[inline]
pub fn rank_order(a: &(Itemset, i64), b: &(Itemset, i64)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| a.0.len().cmp(&b.0.len()))
        .then_with(|| a.0.cmp(&b.0))
}

/// The `k` highest-utility itemsets of `accumulator`.
pub fn top_k(accumulator: &UtilityAccumulator, k: usize) -> RankedResult {
    if k == 0 || accumulator.is_empty() {
        return RankedResult::default();
    }
    let mut entries: Vec<(Itemset, i64)> = accumulator
        .iter()
        .map(|(itemset, total)| (itemset.clone(), total))
        .collect();
    select_top(&mut entries, k);
    into_result(entries)
}

/// Like [`top_k`] but consumes the accumulator instead of cloning keys.
pub fn into_top_k(accumulator: UtilityAccumulator, k: usize) -> RankedResult {
    if k == 0 || accumulator.is_empty() {
        return RankedResult::default();
    }
    let mut entries = accumulator.into_entries();
    select_top(&mut entries, k);
    into_result(entries)
}

fn select_top(entries: &mut Vec<(Itemset, i64)>, k: usize) {
    if k < entries.len() {
        entries.select_nth_unstable_by(k - 1, rank_order);
        entries.truncate(k);
    }
    entries.sort_unstable_by(rank_order);
}

fn into_result(entries: Vec<(Itemset, i64)>) -> RankedResult {
    RankedResult {
        entries: entries
            .into_iter()
            .map(|(itemset, utility)| RankedItemset { itemset, utility })
            .collect(),
    }
}
