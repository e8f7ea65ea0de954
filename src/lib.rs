//! Top-K high-utility itemset mining.
//!
//! Every transaction contributes all of its non-empty subsets; subset
//! utilities are summed across the dataset and the K largest are returned.

pub mod error;
pub mod itemset;
pub mod miner;
pub mod output;
pub mod parser;
pub mod topk;
pub mod transaction;
pub mod utility;

#[cfg(feature = "python")]
mod python;

pub use error::{HuiError, Result};
pub use itemset::{enumerate, subsets, Itemset, Subsets, ABSOLUTE_MAX_WIDTH};
pub use miner::{mine_top_k, MinerConfig, TopKMiner, DEFAULT_K, DEFAULT_MAX_WIDTH};
pub use output::{render, OutputFormat};
pub use parser::{load_dataset, parse_reader, parse_str};
pub use topk::{into_top_k, top_k, RankedItemset, RankedResult, ResolvedItemset};
pub use transaction::{ItemId, Transaction, TransactionStore, TransactionStoreBuilder, Utility, Vocabulary};
pub use utility::{utility_of, UtilityAccumulator};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn _topk_hui(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::topk_hui_py, m)?)?;
    Ok(())
}
