//! Command-line options for the `tabview` binary.

use crate::view::column_filter::ColumnFilter;
use crate::view::sort::SortOrder;
use anyhow::{anyhow, bail, Context, Result};

/// One `--filter` argument
#[derive(Debug, Clone, PartialEq)]
pub struct FilterArg {
    pub column: String,
    pub filter: ColumnFilter,
}

impl FilterArg {
    /// `col=text` (contains), `col==text` (exact) or `col~regex`
    pub fn parse(arg: &str) -> Result<Self> {
        let (column, filter) = if let Some((column, value)) = arg.split_once("==") {
            (column, ColumnFilter::equals(value))
        } else if let Some((column, value)) = arg.split_once('=') {
            (column, ColumnFilter::contains(value))
        } else if let Some((column, pattern)) = arg.split_once('~') {
            (column, ColumnFilter::pattern(pattern)?)
        } else {
            bail!("Invalid filter '{}': expected col=value, col==value or col~regex", arg);
        };

        let column = column.trim();
        if column.is_empty() {
            bail!("Invalid filter '{}': missing column name", arg);
        }

        Ok(Self {
            column: column.to_string(),
            filter,
        })
    }
}

/// `col` or `col:asc` / `col:desc`
pub fn parse_sort(arg: &str) -> Result<(String, SortOrder)> {
    let (column, order) = match arg.rsplit_once(':') {
        Some((column, dir)) => {
            let order = match dir.to_ascii_lowercase().as_str() {
                "asc" => SortOrder::Ascending,
                "desc" => SortOrder::Descending,
                other => bail!("Invalid sort direction '{}': expected asc or desc", other),
            };
            (column, order)
        }
        None => (arg, SortOrder::Ascending),
    };
    Ok((column.to_string(), order))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliOptions {
    pub file: Option<String>,
    pub title: Option<String>,
    pub search: Option<String>,
    pub filters: Vec<FilterArg>,
    pub sort: Option<(String, SortOrder)>,
    /// One-based page number
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    /// Reveal mode: number of "show more" steps
    pub more: Option<usize>,
    /// One-based source row numbers to mark as selected
    pub select: Vec<usize>,
    /// `Some(None)` exports under the table title
    pub export: Option<Option<String>>,
    pub show_help: bool,
    pub init_config: bool,
    pub generate_config: bool,
}

fn is_data_file(arg: &str) -> bool {
    let lower = arg.to_ascii_lowercase();
    lower.ends_with(".csv") || lower.ends_with(".json")
}

fn value_for<'a>(args: &'a [String], idx: usize, flag: &str) -> Result<&'a str> {
    args.get(idx + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing value for {}", flag))
}

fn parse_count(value: &str, flag: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .with_context(|| format!("Invalid number for {}: '{}'", flag, value))
}

impl CliOptions {
    /// Parse arguments, excluding the program name
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut options = CliOptions::default();
        let mut idx = 0;

        while idx < args.len() {
            let arg = args[idx].as_str();
            match arg {
                "-h" | "--help" => options.show_help = true,
                "--init-config" => options.init_config = true,
                "--generate-config" => options.generate_config = true,
                "--title" => {
                    options.title = Some(value_for(args, idx, arg)?.to_string());
                    idx += 1;
                }
                "--search" => {
                    options.search = Some(value_for(args, idx, arg)?.to_string());
                    idx += 1;
                }
                "--filter" => {
                    options
                        .filters
                        .push(FilterArg::parse(value_for(args, idx, arg)?)?);
                    idx += 1;
                }
                "--sort" => {
                    options.sort = Some(parse_sort(value_for(args, idx, arg)?)?);
                    idx += 1;
                }
                "--page" => {
                    let page = parse_count(value_for(args, idx, arg)?, arg)?;
                    if page == 0 {
                        bail!("--page is one-based");
                    }
                    options.page = Some(page);
                    idx += 1;
                }
                "--page-size" => {
                    options.page_size = Some(parse_count(value_for(args, idx, arg)?, arg)?);
                    idx += 1;
                }
                "--more" => {
                    let steps = match args.get(idx + 1) {
                        Some(next) if next.parse::<usize>().is_ok() => {
                            idx += 1;
                            parse_count(next, arg)?
                        }
                        _ => 0,
                    };
                    options.more = Some(steps);
                }
                "--select" => {
                    let row = parse_count(value_for(args, idx, arg)?, arg)?;
                    if row == 0 {
                        bail!("--select takes one-based row numbers");
                    }
                    options.select.push(row);
                    idx += 1;
                }
                "--export" => {
                    let title = match args.get(idx + 1) {
                        Some(next) if !next.starts_with("--") && !is_data_file(next) => {
                            idx += 1;
                            Some(next.clone())
                        }
                        _ => None,
                    };
                    options.export = Some(title);
                }
                other if other.starts_with("--") => bail!("Unknown option: {}", other),
                file => {
                    if options.file.is_some() {
                        bail!("Only one data file can be shown at a time");
                    }
                    options.file = Some(file.to_string());
                }
            }
            idx += 1;
        }

        Ok(options)
    }
}
