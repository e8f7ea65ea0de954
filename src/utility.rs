use ahash::AHashMap;

use crate::error::{HuiError, Result};
use crate::itemset::{subsets, Itemset};
use crate::transaction::Transaction;

/// Utility of `itemset` inside `transaction`: the sum of the member items'
/// utilities. Items absent from the transaction contribute 0.
///
/// Item utilities are `i32`, so a sum over at most 63 of them stays far
/// inside `i64`.
#[inline]
pub fn utility_of(itemset: &Itemset, transaction: &Transaction) -> i64 {
    itemset
        .items()
        .iter()
        .map(|&item| transaction.utility(item).unwrap_or(0))
        .sum()
}

/// Total utility per itemset across the transactions folded into it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UtilityAccumulator {
    totals: AHashMap<Itemset, i64>,
}

impl UtilityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the entry for `itemset`, creating it if missing.
    #[inline]
    pub fn accumulate(&mut self, itemset: Itemset, delta: i64) -> Result<()> {
        add_into(&mut self.totals, itemset, delta)
    }

    /// Build from `(itemset, delta)` pairs, summing repeated itemsets.
    pub fn from_entries(entries: impl IntoIterator<Item = (Itemset, i64)>) -> Result<Self> {
        let mut acc = UtilityAccumulator::new();
        for (itemset, delta) in entries {
            acc.accumulate(itemset, delta)?;
        }
        Ok(acc)
    }

    /// Fold every non-empty subset of `transaction` into the totals.
    pub fn contribute(&mut self, transaction: &Transaction) -> Result<()> {
        for itemset in subsets(transaction)? {
            let u = utility_of(&itemset, transaction);
            self.accumulate(itemset, u)?;
        }
        Ok(())
    }

    /// Sum `other` into `self`. Order of merging never changes the totals.
    pub fn merge(mut self, other: UtilityAccumulator) -> Result<UtilityAccumulator> {
        let (mut big, small) = if self.totals.len() >= other.totals.len() {
            (std::mem::take(&mut self.totals), other.totals)
        } else {
            (other.totals, std::mem::take(&mut self.totals))
        };
        for (itemset, total) in small {
            add_into(&mut big, itemset, total)?;
        }
        Ok(UtilityAccumulator { totals: big })
    }

    pub fn get(&self, itemset: &Itemset) -> Option<i64> {
        self.totals.get(itemset).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, i64)> + '_ {
        self.totals.iter().map(|(k, &v)| (k, v))
    }

    pub fn into_entries(self) -> Vec<(Itemset, i64)> {
        self.totals.into_iter().collect()
    }
}

fn add_into(totals: &mut AHashMap<Itemset, i64>, itemset: Itemset, delta: i64) -> Result<()> {
    match totals.get_mut(&itemset) {
        Some(slot) => {
            *slot = slot
                .checked_add(delta)
                .ok_or_else(|| HuiError::UtilityOverflow { itemset: itemset.to_string() })?;
        }
        None => {
            totals.insert(itemset, delta);
        }
    }
    Ok(())
}
