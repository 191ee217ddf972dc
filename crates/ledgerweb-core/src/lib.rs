//! Ledger orchestration: ties storage, parsing and filtering together
//!
//! `LedgerService` owns the parse-and-replace flow: the plain-text file is
//! the source of truth, and stored transactions are a derived view that is
//! rebuilt wholesale whenever the file changes.

pub mod error;
pub mod fingerprint;
pub mod models;
pub mod store;

pub use error::{CoreError, ErrorCode};
pub use fingerprint::fingerprint;
pub use models::LedgerFile;
pub use store::{LedgerStore, MemoryStore, StoreRef};

use ledgerweb_filter::{filter_transactions, FilterGroup};
use ledgerweb_parser::{parse_entry, parse_ledger, render_ledger, Transaction};

/// High-level ledger operations over a store
pub struct LedgerService {
    store: StoreRef,
}

impl LedgerService {
    pub fn new(store: StoreRef) -> Self {
        Self { store }
    }

    /// All stored ledger files
    pub async fn files(&self) -> Result<Vec<LedgerFile>, CoreError> {
        self.store.files().await
    }

    /// Overwrite a file's content and rebuild its transactions
    pub async fn save_file(&self, id: i64, content: &str) -> Result<usize, CoreError> {
        self.store.save_content(id, content).await?;
        self.parse_and_upsert(id).await
    }

    /// Re-parse a file's content and replace its stored transactions.
    /// Returns the number of transactions parsed.
    pub async fn parse_and_upsert(&self, file_id: i64) -> Result<usize, CoreError> {
        let file = self
            .store
            .file(file_id)
            .await?
            .ok_or(CoreError::FileNotFound { id: file_id })?;
        let transactions = parse_ledger(&file.content, file_id);
        let count = transactions.len();
        log::info!("Parsed {} transactions from file {}", count, file_id);
        self.store.replace_transactions(file_id, transactions).await?;
        Ok(count)
    }

    /// Transactions for a file, optionally narrowed by a filter tree
    pub async fn list_transactions(
        &self,
        file_id: i64,
        filter: Option<&FilterGroup>,
    ) -> Result<Vec<Transaction>, CoreError> {
        let transactions = self.store.transactions(file_id).await?;
        match filter {
            Some(group) => Ok(filter_transactions(&transactions, group)),
            None => Ok(transactions),
        }
    }

    /// Validate a single entry block and append it to the file's text,
    /// then rebuild the file's transactions
    pub async fn append_entry(&self, file_id: i64, block: &str) -> Result<Transaction, CoreError> {
        let parsed = parse_entry(block, file_id)?;
        let file = self
            .store
            .file(file_id)
            .await?
            .ok_or(CoreError::FileNotFound { id: file_id })?;

        let mut content = file.content;
        if !content.is_empty() && !content.ends_with("\n\n") {
            if content.ends_with('\n') {
                content.push('\n');
            } else {
                content.push_str("\n\n");
            }
        }
        content.push_str(block.trim_end());
        content.push('\n');

        self.store.save_content(file_id, &content).await?;
        self.parse_and_upsert(file_id).await?;
        Ok(parsed)
    }

    /// Render a file's stored transactions back to ledger text
    pub async fn export_file(&self, file_id: i64) -> Result<String, CoreError> {
        let transactions = self.store.transactions(file_id).await?;
        Ok(render_ledger(&transactions))
    }
}

// ==================== Tests ====================
