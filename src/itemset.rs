use std::fmt;

use crate::error::{HuiError, Result};
use crate::transaction::{ItemId, Transaction};

/// Widest transaction whose subsets fit in a `u64` mask.
pub const ABSOLUTE_MAX_WIDTH: usize = 63;

/// A set of items in canonical form: ascending ids, no duplicates.
///
/// Two itemsets built from the same items in any order compare and hash
/// equal, so they land on the same accumulator entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Itemset(Vec<ItemId>);

impl Itemset {
    pub fn empty() -> Self {
        Itemset(Vec::new())
    }

    pub fn from_items(items: impl IntoIterator<Item = ItemId>) -> Self {
        let mut v: Vec<ItemId> = items.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        Itemset(v)
    }

    #[inline]
    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    pub fn into_items(self) -> Vec<ItemId> {
        self.0
    }
}

impl FromIterator<ItemId> for Itemset {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Itemset::from_items(iter)
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("}")
    }
}

/// Lazy power-set walk over one transaction.
///
/// Items are numbered 0..n-1 in the transaction's own order and masks run
/// from 1 to 2^n - 1; bit j of the mask selects `items[j]`.
pub struct Subsets<'a> {
    items: &'a [ItemId],
    mask: u64,
    end: u64,
}

impl Iterator for Subsets<'_> {
    type Item = Itemset;

    fn next(&mut self) -> Option<Itemset> {
        if self.mask >= self.end {
            return None;
        }
        let mask = self.mask;
        self.mask += 1;

        let mut buf = Vec::with_capacity(mask.count_ones() as usize);
        for (j, &item) in self.items.iter().enumerate() {
            if mask & (1u64 << j) != 0 {
                buf.push(item);
            }
        }
        buf.sort_unstable();
        Some(Itemset(buf))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.mask) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Subsets<'_> {}

/// Iterate every non-empty subset of `transaction`'s items.
pub fn subsets(transaction: &Transaction) -> Result<Subsets<'_>> {
    let items = transaction.items();
    if items.len() > ABSOLUTE_MAX_WIDTH {
        return Err(HuiError::WidthExceedsMask {
            width: items.len(),
            max: ABSOLUTE_MAX_WIDTH,
        });
    }
    Ok(Subsets {
        items,
        mask: 1,
        end: 1u64 << items.len(),
    })
}

/// All 2^n - 1 non-empty subsets of `transaction`, in mask order.
pub fn enumerate(transaction: &Transaction) -> Result<Vec<Itemset>> {
    Ok(subsets(transaction)?.collect())
}
