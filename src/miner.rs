//! TopKMiner — exhaustive top-K high-utility itemset miner.
//!
//! Strategy:
//!   • every transaction contributes all 2^n - 1 of its subsets, each with
//!     the sum of its member utilities;
//!   • contributions are folded into one accumulator, either sequentially or
//!     as a rayon fold (one private accumulator per worker) + sum reduction;
//!   • the accumulator is ranked by `topk::into_top_k`.
//!
//! Cost is O(transactions × 2^width); `max_width` bounds the width.
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::error::{HuiError, Result};
use crate::itemset::ABSOLUTE_MAX_WIDTH;
use crate::topk::{into_top_k, RankedResult};
use crate::transaction::TransactionStore;
use crate::utility::UtilityAccumulator;

/// Default transaction width bound: 2^24 subsets per transaction.
pub const DEFAULT_MAX_WIDTH: usize = 24;

/// Default number of itemsets returned.
pub const DEFAULT_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinerConfig {
    /// Number of itemsets to return.
    pub k: usize,
    /// Widest transaction accepted; wider ones fail the run.
    pub max_width: usize,
    /// Fold transactions on the rayon pool.
    pub parallel: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        MinerConfig {
            k: DEFAULT_K,
            max_width: DEFAULT_MAX_WIDTH,
            parallel: false,
        }
    }
}

impl MinerConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Signed K; a negative value means zero results.
    pub fn with_signed_k(mut self, k: i64) -> Self {
        self.k = usize::try_from(k.max(0)).unwrap_or(usize::MAX);
        self
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_width > ABSOLUTE_MAX_WIDTH {
            return Err(HuiError::InvalidConfig(format!(
                "max_width must be within 1..={ABSOLUTE_MAX_WIDTH}, got {}",
                self.max_width
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TopKMiner {
    config: MinerConfig,
}

impl TopKMiner {
    pub fn new(config: MinerConfig) -> Self {
        TopKMiner { config }
    }

    pub fn config(&self) -> &MinerConfig {
        &self.config
    }

    /// Mine the top-K itemsets of `store`.
    pub fn mine(&self, store: &TransactionStore) -> Result<RankedResult> {
        let span = info_span!("mine", k = self.config.k, parallel = self.config.parallel);
        let _guard = span.enter();

        let start = Instant::now();
        let acc = self.accumulate(store)?;
        let distinct = acc.len();
        let result = into_top_k(acc, self.config.k);
        info!(
            transactions = store.len(),
            distinct_itemsets = distinct,
            returned = result.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "mining finished"
        );
        Ok(result)
    }

    /// Fold every transaction of `store` into one accumulator.
    pub fn accumulate(&self, store: &TransactionStore) -> Result<UtilityAccumulator> {
        self.config.validate()?;
        self.check_widths(store)?;

        let txs = store.transactions();
        debug!(
            transactions = txs.len(),
            max_width = store.max_width(),
            "accumulating subset utilities"
        );

        if self.config.parallel {
            txs.par_iter()
                .try_fold(UtilityAccumulator::new, |mut acc, tx| {
                    acc.contribute(tx)?;
                    Ok::<_, HuiError>(acc)
                })
                .try_reduce(UtilityAccumulator::new, UtilityAccumulator::merge)
        } else {
            txs.iter().try_fold(UtilityAccumulator::new(), |mut acc, tx| {
                acc.contribute(tx)?;
                Ok(acc)
            })
        }
    }

    fn check_widths(&self, store: &TransactionStore) -> Result<()> {
        let max = self.config.max_width;
        match store
            .transactions()
            .iter()
            .position(|tx| tx.width() > max)
        {
            Some(index) => Err(HuiError::TransactionTooWide {
                index,
                width: store.transactions()[index].width(),
                max,
            }),
            None => Ok(()),
        }
    }
}

/// Mine with default settings and the given `k`.
pub fn mine_top_k(store: &TransactionStore, k: usize) -> Result<RankedResult> {
    TopKMiner::new(MinerConfig::default().with_k(k)).mine(store)
}
