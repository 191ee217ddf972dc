//! Core data models for the ledger service

use serde::{Deserialize, Serialize};

/// A stored ledger file: the canonical plain-text source of its transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerFile {
    /// Unique file identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Canonical ledger text
    pub content: String,
    /// Whether this is the primary file for new entries
    pub is_primary: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub last_updated_at: String,
}

impl LedgerFile {
    /// Number of non-blank lines in the file
    pub fn line_count(&self) -> usize {
        self.content.lines().filter(|l| !l.trim().is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count_skips_blank_lines() {
        let file = LedgerFile {
            id: 1,
            name: "main.ledger".into(),
            content: "2025-01-10 A\n  Expenses:Food  1\n\n  \n  Assets:Cash\n".into(),
            is_primary: true,
            created_at: "2025-01-01T00:00:00Z".into(),
            last_updated_at: "2025-01-01T00:00:00Z".into(),
        };
        assert_eq!(file.line_count(), 3);
    }
}
