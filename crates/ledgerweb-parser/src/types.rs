//! Domain types produced by the ledger parser

use serde::{Deserialize, Serialize};

/// One line of a transaction, assigning an amount to an account.
///
/// By convention `amount > 0` is a debit and `amount < 0` a credit; the sign
/// is a display/derivation convention, not enforced anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Account name (e.g. "Expenses:Food")
    pub account: String,
    /// Numeric value of the posting
    pub amount: f64,
    /// Currency code (e.g. "USD") if one was written
    pub currency: Option<String>,
}

impl Posting {
    pub fn is_debit(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_credit(&self) -> bool {
        self.amount < 0.0
    }
}

/// A parsed ledger transaction.
///
/// Immutable output of the parser: one is created per parsed block and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Owning ledger file
    pub file_id: i64,
    /// Transaction date (YYYY-MM-DD)
    pub date: String,
    /// Free-text description from the header line
    pub narration: String,
    /// Counterparty; derived as a copy of the narration
    pub payee: String,
    /// Canonical amount: the sum of all strictly positive postings (total debits)
    pub amount: f64,
    /// Tags extracted from `#tag` tokens in the header
    pub tags: Vec<String>,
    /// Postings, the single source of truth for debits/credits
    pub postings: Vec<Posting>,
    /// Comment lines attached to this transaction
    pub comments: Vec<String>,
}

impl Transaction {
    /// All accounts touched by this transaction, in posting order
    pub fn accounts(&self) -> Vec<&str> {
        self.postings.iter().map(|p| p.account.as_str()).collect()
    }

    /// Check that postings sum to zero within every currency group
    pub fn is_balanced(&self) -> bool {
        let mut totals: Vec<(Option<&str>, f64)> = Vec::new();
        for p in &self.postings {
            let currency = p.currency.as_deref();
            match totals.iter_mut().find(|(c, _)| *c == currency) {
                Some((_, total)) => *total += p.amount,
                None => totals.push((currency, p.amount)),
            }
        }
        totals.iter().all(|(_, total)| total.abs() < 1e-9)
    }
}
