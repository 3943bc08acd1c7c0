//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying inventory
//! items in various formats (JSON, table, plain text).

mod json;
mod text;

use std::io::IsTerminal;

use crate::errors::CliError;

pub use text::{print_item, print_item_list, print_status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}

/// Whether human output should be colored: stdout is a terminal, `TERM`
/// is not `dumb` and `NO_COLOR` is unset.
pub fn use_color() -> bool {
    let term_is_dumb = std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false);
    let no_color = std::env::var_os("NO_COLOR").is_some();
    std::io::stdout().is_terminal() && !term_is_dumb && !no_color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(None).unwrap(), None);
        assert_eq!(
            parse_output_format(Some("plain")).unwrap(),
            Some(OutputFormat::Plain)
        );
        assert_eq!(
            parse_output_format(Some("table")).unwrap(),
            Some(OutputFormat::Table)
        );
        assert!(parse_output_format(Some("csv")).is_err());
    }
}
