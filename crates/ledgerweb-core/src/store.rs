//! Persistence interface for ledger files and parsed transactions
//!
//! The service treats storage as a simple key-value interface; hosted
//! database details stay behind this trait.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ledgerweb_parser::Transaction;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::models::LedgerFile;

/// Store reference type
pub type StoreRef = Arc<dyn LedgerStore>;

/// Persistence operations the ledger service relies on
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// All stored ledger files
    async fn files(&self) -> Result<Vec<LedgerFile>, CoreError>;

    /// A single ledger file, if present
    async fn file(&self, id: i64) -> Result<Option<LedgerFile>, CoreError>;

    /// Overwrite a file's content (bumps its update timestamp)
    async fn save_content(&self, id: i64, content: &str) -> Result<(), CoreError>;

    /// Replace the parsed transactions for a file (delete-then-insert scope)
    async fn replace_transactions(
        &self,
        file_id: i64,
        transactions: Vec<Transaction>,
    ) -> Result<(), CoreError>;

    /// The parsed transactions stored for a file
    async fn transactions(&self, file_id: i64) -> Result<Vec<Transaction>, CoreError>;
}

#[derive(Default)]
struct MemoryStoreInner {
    files: HashMap<i64, LedgerFile>,
    transactions: HashMap<i64, Vec<Transaction>>,
    next_id: i64,
}

/// In-memory store, used by the CLI and tests
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new ledger file and return it with its assigned id
    pub async fn insert_file(&self, name: &str, content: &str) -> LedgerFile {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let now = Utc::now().to_rfc3339();
        let file = LedgerFile {
            id: inner.next_id,
            name: name.to_string(),
            content: content.to_string(),
            is_primary: inner.files.is_empty(),
            created_at: now.clone(),
            last_updated_at: now,
        };
        inner.files.insert(file.id, file.clone());
        file
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn files(&self) -> Result<Vec<LedgerFile>, CoreError> {
        let inner = self.inner.read().await;
        let mut files: Vec<LedgerFile> = inner.files.values().cloned().collect();
        files.sort_by_key(|f| f.id);
        Ok(files)
    }

    async fn file(&self, id: i64) -> Result<Option<LedgerFile>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner.files.get(&id).cloned())
    }

    async fn save_content(&self, id: i64, content: &str) -> Result<(), CoreError> {
        let mut inner = self.inner.write().await;
        let file = inner
            .files
            .get_mut(&id)
            .ok_or(CoreError::FileNotFound { id })?;
        file.content = content.to_string();
        file.last_updated_at = Utc::now().to_rfc3339();
        Ok(())
    }

    async fn replace_transactions(
        &self,
        file_id: i64,
        transactions: Vec<Transaction>,
    ) -> Result<(), CoreError> {
        let mut inner = self.inner.write().await;
        inner.transactions.insert(file_id, transactions);
        Ok(())
    }

    async fn transactions(&self, file_id: i64) -> Result<Vec<Transaction>, CoreError> {
        let inner = self.inner.read().await;
        Ok(inner.transactions.get(&file_id).cloned().unwrap_or_default())
    }
}
