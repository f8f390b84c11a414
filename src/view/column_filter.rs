use crate::data::cell_value::CellValue;
use anyhow::{anyhow, Result};
use regex::Regex;

/// Filter applied to a single column's raw value
#[derive(Debug, Clone)]
pub enum ColumnFilter {
    /// Case-insensitive substring of the value's text
    Contains(String),
    /// Exact text of the value
    Equals(String),
    Pattern(Regex),
}

impl ColumnFilter {
    pub fn contains(text: impl Into<String>) -> Self {
        ColumnFilter::Contains(text.into())
    }

    pub fn equals(text: impl Into<String>) -> Self {
        ColumnFilter::Equals(text.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex =
            Regex::new(pattern).map_err(|e| anyhow!("Invalid filter pattern: {}", e))?;
        Ok(ColumnFilter::Pattern(regex))
    }

    /// A blank `Contains` filter keeps every row
    pub fn is_noop(&self) -> bool {
        matches!(self, ColumnFilter::Contains(text) if text.trim().is_empty())
    }

    pub fn matches(&self, value: &CellValue) -> bool {
        let text = value.to_string();
        match self {
            ColumnFilter::Contains(needle) => {
                text.to_lowercase().contains(&needle.trim().to_lowercase())
            }
            ColumnFilter::Equals(expected) => text == *expected,
            ColumnFilter::Pattern(regex) => regex.is_match(&text),
        }
    }
}

impl PartialEq for ColumnFilter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ColumnFilter::Contains(a), ColumnFilter::Contains(b)) => a == b,
            (ColumnFilter::Equals(a), ColumnFilter::Equals(b)) => a == b,
            (ColumnFilter::Pattern(a), ColumnFilter::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}
