//! Transaction store: parsed transactions and the item vocabulary.
//!
//! Item tokens are interned to dense `u32` ids in first-appearance order, so
//! the rest of the pipeline works on integers the way the other miners in
//! this crate family do. A transaction keeps its items in record order with
//! utilities aligned by position.

use ahash::AHashMap;

/// Dense item identifier, assigned by [`Vocabulary::intern`].
pub type ItemId = u32;

/// Per-item utility as stored in a transaction. Sums are taken in `i64`.
pub type Utility = i32;

/// Bidirectional mapping between item tokens and ids.
#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    tokens: Vec<String>,
    index: AHashMap<String, ItemId>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `token`, allocating the next id on first sight.
    pub fn intern(&mut self, token: &str) -> ItemId {
        if let Some(&id) = self.index.get(token) {
            return id;
        }
        let id = self.tokens.len() as ItemId;
        self.tokens.push(token.to_owned());
        self.index.insert(token.to_owned(), id);
        id
    }

    pub fn get(&self, token: &str) -> Option<ItemId> {
        self.index.get(token).copied()
    }

    pub fn resolve(&self, id: ItemId) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// One transaction: distinct items with their utilities, aligned by index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    items: Vec<ItemId>,
    utilities: Vec<Utility>,
    declared_total: Option<i64>,
}

impl Transaction {
    /// Build from `(item, utility)` pairs. A repeated item keeps its first
    /// position and takes the last utility seen.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ItemId, Utility)>) -> Self {
        let mut tx = Transaction::default();
        for (item, utility) in pairs {
            tx.upsert(item, utility);
        }
        tx
    }

    /// Returns true when `item` was already present and got overwritten.
    fn upsert(&mut self, item: ItemId, utility: Utility) -> bool {
        match self.items.iter().position(|&x| x == item) {
            Some(pos) => {
                self.utilities[pos] = utility;
                true
            }
            None => {
                self.items.push(item);
                self.utilities.push(utility);
                false
            }
        }
    }

    #[inline]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    #[inline]
    pub fn utilities(&self) -> &[Utility] {
        &self.utilities
    }

    /// Number of distinct items.
    #[inline]
    pub fn width(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Utility of `item` in this transaction, if present.
    #[inline]
    pub fn utility(&self, item: ItemId) -> Option<i64> {
        self.items
            .iter()
            .position(|&x| x == item)
            .map(|pos| i64::from(self.utilities[pos]))
    }

    /// Sum of all item utilities.
    pub fn total_utility(&self) -> i64 {
        self.utilities.iter().map(|&u| i64::from(u)).sum()
    }

    /// Transaction total as written in the source record, if any.
    pub fn declared_total(&self) -> Option<i64> {
        self.declared_total
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, Utility)> + '_ {
        self.items.iter().copied().zip(self.utilities.iter().copied())
    }
}

/// Accumulates records and interns their tokens. Consumed by [`build`].
///
/// [`build`]: TransactionStoreBuilder::build
#[derive(Debug, Default)]
pub struct TransactionStoreBuilder {
    vocabulary: Vocabulary,
    transactions: Vec<Transaction>,
}

impl TransactionStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record of `(token, utility)` pairs.
    pub fn push<I, S>(&mut self, record: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, Utility)>,
        S: AsRef<str>,
    {
        self.push_record(record, None);
        self
    }

    /// Append a record together with its declared total. Returns how many
    /// duplicate tokens were overwritten.
    pub fn push_record<I, S>(&mut self, record: I, declared_total: Option<i64>) -> usize
    where
        I: IntoIterator<Item = (S, Utility)>,
        S: AsRef<str>,
    {
        let mut tx = Transaction {
            declared_total,
            ..Transaction::default()
        };
        let mut overwritten = 0;
        for (token, utility) in record {
            let id = self.vocabulary.intern(token.as_ref());
            if tx.upsert(id, utility) {
                overwritten += 1;
            }
        }
        self.transactions.push(tx);
        overwritten
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn build(self) -> TransactionStore {
        TransactionStore {
            vocabulary: self.vocabulary,
            transactions: self.transactions,
        }
    }
}

/// Immutable, input-ordered sequence of transactions.
#[derive(Debug, Default, Clone)]
pub struct TransactionStore {
    vocabulary: Vocabulary,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn builder() -> TransactionStoreBuilder {
        TransactionStoreBuilder::new()
    }

    /// Build a store from in-memory records.
    pub fn from_records<R, I, S>(records: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = (S, Utility)>,
        S: AsRef<str>,
    {
        let mut builder = TransactionStoreBuilder::new();
        for record in records {
            builder.push(record);
        }
        builder.build()
    }

    #[inline]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of distinct items across the dataset.
    pub fn item_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Widest transaction, 0 for an empty store.
    pub fn max_width(&self) -> usize {
        self.transactions.iter().map(Transaction::width).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_first_appearance_order() {
        let store = TransactionStore::from_records(vec![
            vec![("b", 1), ("a", 2)],
            vec![("c", 3), ("b", 4)],
        ]);
        let vocab = store.vocabulary();
        assert_eq!(vocab.get("b"), Some(0));
        assert_eq!(vocab.get("a"), Some(1));
        assert_eq!(vocab.get("c"), Some(2));
        assert_eq!(vocab.resolve(2), Some("c"));
        assert_eq!(vocab.resolve(9), None);
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn transactions_keep_input_order() {
        let store = TransactionStore::from_records(vec![
            vec![("x", 1)],
            vec![("y", 2), ("z", 3)],
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[0].items(), &[0]);
        assert_eq!(store.transactions()[1].items(), &[1, 2]);
        assert_eq!(store.transactions()[1].utilities(), &[2, 3]);
        assert_eq!(store.max_width(), 2);
    }

    #[test]
    fn duplicate_item_last_utility_wins() {
        let mut builder = TransactionStore::builder();
        let overwritten = builder.push_record(vec![("a", 5), ("b", 1), ("a", 9)], Some(15));
        assert_eq!(overwritten, 1);
        let store = builder.build();
        let tx = &store.transactions()[0];
        assert_eq!(tx.width(), 2);
        assert_eq!(tx.items(), &[0, 1]);
        assert_eq!(tx.utility(0), Some(9));
        assert_eq!(tx.total_utility(), 10);
        assert_eq!(tx.declared_total(), Some(15));
    }

    #[test]
    fn utility_lookup_of_absent_item() {
        let tx = Transaction::from_pairs(vec![(0, -3), (4, 7)]);
        assert_eq!(tx.utility(4), Some(7));
        assert_eq!(tx.utility(1), None);
        assert_eq!(tx.iter().collect::<Vec<_>>(), vec![(0, -3), (4, 7)]);
    }

    #[test]
    fn empty_store() {
        let store = TransactionStore::builder().build();
        assert!(store.is_empty());
        assert_eq!(store.max_width(), 0);
        assert!(store.vocabulary().is_empty());
    }
}
