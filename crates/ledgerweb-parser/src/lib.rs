//! Plain-text ledger parsing
//!
//! Converts semi-structured accounting text into normalized transactions,
//! and renders transactions back to ledger text.

pub mod error;
pub mod parser;
pub mod render;
pub mod types;

pub use error::ParseError;
pub use parser::{parse_entry, parse_ledger};
pub use render::{render_ledger, render_transaction};
pub use types::{Posting, Transaction};

// ==================== Utility Functions ====================

/// Generate a short hash (8 characters) from content
pub fn short_hash(content: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let hash = hasher.finish();

    format!("{:016x}", hash)[..8].to_string()
}

/// Generate a unique transaction ID from the owning file, the header line
/// number and a short content hash
pub fn transaction_id(file_id: i64, line: usize, content: &str) -> String {
    format!("tx-{}:{}:{}", file_id, line, short_hash(content))
}
