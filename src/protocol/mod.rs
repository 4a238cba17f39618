//! Text protocol handling.
//!
//! Parses client command lines and formats the replies written back by the
//! engine loop.

pub mod parser;
pub mod reply;

pub use parser::{parse_command, Command, ParseError};
pub use reply::{format_error, format_ok, format_parse_error, format_query};
