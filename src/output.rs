use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::{HuiError, Result};
use crate::topk::RankedResult;
use crate::transaction::Vocabulary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `Itemset: [A, B], Utility: 8` under a header line.
    #[default]
    Text,
    /// `A B #UTIL: 8`
    Spmf,
    /// `[{"items": ["A", "B"], "utility": 8}]`
    Json,
}

impl FromStr for OutputFormat {
    type Err = HuiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "spmf" => Ok(OutputFormat::Spmf),
            "json" => Ok(OutputFormat::Json),
            other => Err(HuiError::InvalidConfig(format!("unknown output format '{other}'"))),
        }
    }
}

/// Render `result` with item tokens resolved through `vocabulary`.
pub fn render(result: &RankedResult, vocabulary: &Vocabulary, format: OutputFormat) -> Result<String> {
    let resolved = result.resolve(vocabulary);
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            out.push_str("Top-k High Utility Itemsets:\n");
            for r in &resolved {
                writeln!(out, "Itemset: [{}], Utility: {}", r.items.join(", "), r.utility)?;
            }
        }
        OutputFormat::Spmf => {
            for r in &resolved {
                writeln!(out, "{} #UTIL: {}", r.items.join(" "), r.utility)?;
            }
        }
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(&resolved)?;
            out.push('\n');
        }
    }
    Ok(out)
}
