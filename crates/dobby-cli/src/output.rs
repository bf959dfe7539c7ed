//! Table and JSON output for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

fn pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

/// Print rows as a table, or as a JSON array
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", pretty_json(rows)),
        OutputFormat::Table if rows.is_empty() => println!("No results found."),
        OutputFormat::Table => println!("{}", Table::new(rows)),
    }
}

/// Print one value. Tables fall back to the debug representation.
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", pretty_json(item)),
        OutputFormat::Table => println!("{item:#?}"),
    }
}

/// Print a success line
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning line
pub fn print_warning(msg: &str) {
    println!("! {msg}");
}

/// Print an error line to stderr
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print an indented key and value
pub fn print_kv(key: &str, value: &str) {
    println!("  {key:<8} {value}");
}
