//! Error types for topk-hui.
//!
//! Mining itself is pure computation over validated input; errors come from
//! reading datasets, from the brute-force width bound, and from rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum HuiError {
    #[error("Malformed record at line {line}: {reason}")]
    DataFormat { line: usize, reason: String },

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transaction {index} has {width} items, more than the enumerable maximum of {max}")]
    TransactionTooWide { index: usize, width: usize, max: usize },

    #[error("Transaction has {width} items; subset masks cover at most {max}")]
    WidthExceedsMask { width: usize, max: usize },

    #[error("Total utility of itemset {itemset} overflows i64")]
    UtilityOverflow { itemset: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl HuiError {
    pub(crate) fn data_format(line: usize, reason: impl Into<String>) -> Self {
        Self::DataFormat {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for topk-hui.
pub type Result<T> = std::result::Result<T, HuiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_format_message_names_line() {
        let err = HuiError::data_format(7, "expected 3 fields, found 2");
        assert_eq!(
            err.to_string(),
            "Malformed record at line 7: expected 3 fields, found 2"
        );
    }

    #[test]
    fn fmt_error_converts() {
        let err: HuiError = std::fmt::Error.into();
        assert!(matches!(err, HuiError::Fmt(_)));
    }

    #[test]
    fn too_wide_message() {
        let err = HuiError::TransactionTooWide { index: 3, width: 30, max: 24 };
        assert!(err.to_string().contains("Transaction 3 has 30 items"));
    }
}
