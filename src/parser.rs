//! Reader for utility datasets in SPMF format.
//!
//! Each record is `<items>:<transaction-total>:<utilities>`, items and
//! utilities space-separated and aligned by position:
//!
//! ```text
//! # comment
//! a b c:9:4 3 2
//! ```
//!
//! Blank lines and lines starting with `#`, `%` or `@` are skipped. A token
//! repeated within one record keeps the last utility. Item utilities must fit
//! in an `i32`; the transaction total is read as `i64`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{HuiError, Result};
use crate::transaction::{TransactionStore, TransactionStoreBuilder, Utility};

/// Parse a whole dataset held in memory.
pub fn parse_str(input: &str) -> Result<TransactionStore> {
    let mut builder = TransactionStore::builder();
    for (idx, line) in input.lines().enumerate() {
        parse_line(&mut builder, idx + 1, line)?;
    }
    Ok(builder.build())
}

/// Parse a dataset from any buffered reader.
pub fn parse_reader<R: BufRead>(reader: R, origin: &Path) -> Result<TransactionStore> {
    let mut builder = TransactionStore::builder();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HuiError::io(origin, e))?;
        parse_line(&mut builder, idx + 1, &line)?;
    }
    Ok(builder.build())
}

/// Open and parse the dataset at `path`.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<TransactionStore> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| HuiError::io(path, e))?;
    let store = parse_reader(BufReader::new(file), path)?;
    debug!(
        path = %path.display(),
        transactions = store.len(),
        items = store.item_count(),
        "dataset loaded"
    );
    Ok(store)
}

fn is_skipped(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(['#', '%', '@'])
}

fn parse_line(builder: &mut TransactionStoreBuilder, line_no: usize, line: &str) -> Result<()> {
    if is_skipped(line) {
        return Ok(());
    }

    let fields: Vec<&str> = line.trim_end().split(':').collect();
    if fields.len() != 3 {
        return Err(HuiError::data_format(
            line_no,
            format!("expected 3 ':'-separated fields, found {}", fields.len()),
        ));
    }

    let items: Vec<&str> = fields[0].split_whitespace().collect();
    if items.is_empty() {
        return Err(HuiError::data_format(line_no, "record has no items"));
    }

    let declared_total: i64 = parse_int(fields[1].trim(), line_no, "transaction total")?;

    let utilities = fields[2]
        .split_whitespace()
        .map(|tok| parse_int(tok, line_no, "utility"))
        .collect::<Result<Vec<Utility>>>()?;
    if utilities.len() != items.len() {
        return Err(HuiError::data_format(
            line_no,
            format!(
                "{} items but {} utilities",
                items.len(),
                utilities.len()
            ),
        ));
    }

    let sum: i64 = utilities.iter().map(|&u| i64::from(u)).sum();
    let overwritten = builder.push_record(items.into_iter().zip(utilities), Some(declared_total));
    if overwritten > 0 {
        debug!(line = line_no, overwritten, "duplicate items in record, last utility kept");
    } else if sum != declared_total {
        warn!(
            line = line_no,
            declared = declared_total,
            computed = sum,
            "transaction total does not match item utilities"
        );
    }
    Ok(())
}

fn parse_int<T>(token: &str, line_no: usize, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    token
        .parse::<T>()
        .map_err(|e| HuiError::data_format(line_no, format!("invalid {what} '{token}': {e}")))
}
