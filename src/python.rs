use pyo3::prelude::*;

use crate::error::HuiError;
use crate::miner::{MinerConfig, TopKMiner, DEFAULT_MAX_WIDTH};
use crate::transaction::TransactionStore;

impl From<HuiError> for PyErr {
    fn from(err: HuiError) -> PyErr {
        match err {
            HuiError::Io { .. } => pyo3::exceptions::PyIOError::new_err(err.to_string()),
            _ => pyo3::exceptions::PyValueError::new_err(err.to_string()),
        }
    }
}

/// Top-K high-utility itemsets over `(items, utilities)` transaction lists.
///
/// Returns `(utilities, itemsets)`, ranked by utility descending.
#[pyfunction]
#[pyo3(name = "topk_hui", signature = (items_list, utils_list, k, max_width=None, parallel=false))]
pub fn topk_hui_py(
    py: Python<'_>,
    items_list: Vec<Vec<String>>,
    utils_list: Vec<Vec<i32>>,
    k: i64,
    max_width: Option<usize>,
    parallel: bool,
) -> PyResult<(Vec<i64>, Vec<Vec<String>>)> {
    if items_list.len() != utils_list.len() {
        return Err(pyo3::exceptions::PyValueError::new_err(
            "items_list and utils_list must have the same length",
        ));
    }

    let mut builder = TransactionStore::builder();
    for (items, utils) in items_list.iter().zip(utils_list.into_iter()) {
        if items.len() != utils.len() {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "Each inner list of items and utils must have the same length",
            ));
        }
        builder.push(items.iter().zip(utils));
    }
    let store = builder.build();

    let config = MinerConfig::default()
        .with_signed_k(k)
        .with_max_width(max_width.unwrap_or(DEFAULT_MAX_WIDTH))
        .with_parallel(parallel);
    let miner = TopKMiner::new(config);
    let result = py.allow_threads(|| miner.mine(&store))?;

    let mut utilities = Vec::with_capacity(result.len());
    let mut itemsets = Vec::with_capacity(result.len());
    for r in result.resolve(store.vocabulary()) {
        utilities.push(r.utility);
        itemsets.push(r.items.into_iter().map(str::to_owned).collect());
    }

    Ok((utilities, itemsets))
}
