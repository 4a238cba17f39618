//! Reply formatting.
//!
//! Every reply is one line: a keyword, then a single JSON value or an error
//! kind followed by a human-readable message.

use serde::Serialize;

use crate::error::LedgerError;
use crate::protocol::parser::ParseError;

/// Formats a successful write: `ok <json>`.
pub fn format_ok<T: Serialize>(value: &T) -> serde_json::Result<String> {
    format_query("ok", value)
}

/// Formats a query answer: `<keyword> <json>`.
pub fn format_query<T: Serialize>(keyword: &str, value: &T) -> serde_json::Result<String> {
    Ok(format!("{} {}", keyword, serde_json::to_string(value)?))
}

/// Formats a rejected operation: `error <Kind> <message>`.
pub fn format_error(err: &LedgerError) -> String {
    format!("error {} {}", err.kind(), err)
}

/// Formats a malformed command line: `error Parse <message>`.
pub fn format_parse_error(err: &ParseError) -> String {
    format!("error Parse {}", err)
}
