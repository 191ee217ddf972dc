//! Line-based parser for plain-text ledger files
//!
//! Supported transaction block:
//!
//! ```text
//! 2025-08-01 Coffee #food #coffee
//!   Expenses:Food            120 INR
//!   Assets:Cash             -120 INR
//! ```
//!
//! Rules:
//! - Blank line separates transactions.
//! - Lines starting with `;` are comments and attach to the current transaction.
//! - A line with no leading whitespace is a header candidate; one that does not
//!   match the header shape is skipped with a warning.
//! - Currency is optional and detected when the last token is 2-5 uppercase
//!   letters (e.g. INR, USD).
//! - A posting without an amount balances the transaction (per currency).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
use crate::transaction_id;
use crate::types::{Posting, Transaction};

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}[-/]\d{2}[-/]\d{2})\s+(.*)$").unwrap());

// Unicode-aware so tags can carry non-ASCII letters and digits
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[\p{L}\p{N}_-]+").unwrap());

// account (lazy), column gap, signed amount, optional currency code
static POSTING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{2,}(.+?)\s+([+-]?\d[\d.,]*)(?:\s+([A-Z]{2,5}))?\s*$").unwrap());

// fallback: indented account with no amount (elided / balancing posting)
static ELIDED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{2,}(.+?)\s*$").unwrap());

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*;\s?").unwrap());

/// Parsed header line: date, narration and extracted tags
#[derive(Debug, Clone)]
struct Header {
    date: String,
    narration: String,
    tags: Vec<String>,
}

/// Parse a header line: `DATE NARRATION [#tag]*`.
///
/// The date accepts `YYYY-MM-DD` or `YYYY/MM/DD` and is normalized to
/// hyphens. `#tag` tokens are pulled out of the narration.
fn parse_header(line: &str) -> Option<Header> {
    let caps = HEADER_RE.captures(line)?;
    let date = caps[1].replace('/', "-");
    let rest = caps[2].trim();

    let tags = TAG_RE
        .find_iter(rest)
        .map(|m| m.as_str()[1..].to_string())
        .collect();
    let narration = TAG_RE.replace_all(rest, "").trim().to_string();

    Some(Header { date, narration, tags })
}

/// Parse an amount token, tolerating thousands separators.
///
/// An unparseable token degrades to 0 rather than rejecting the posting.
fn parse_amount(token: &str) -> f64 {
    token.replace(',', "").parse().unwrap_or(0.0)
}

/// Parse an indented posting line.
///
/// Falls back to an elided posting (amount 0, no currency) when the
/// account-plus-amount shape does not match. Returns `None` for lines with
/// less than two characters of indentation.
fn parse_posting(line: &str) -> Option<Posting> {
    if let Some(caps) = POSTING_RE.captures(line) {
        return Some(Posting {
            account: caps[1].trim().to_string(),
            amount: parse_amount(&caps[2]),
            currency: caps.get(3).map(|m| m.as_str().to_string()),
        });
    }

    let caps = ELIDED_RE.captures(line)?;
    Some(Posting {
        account: caps[1].trim().to_string(),
        amount: 0.0,
        currency: None,
    })
}

/// Resolve a single elided posting against the per-currency sums of the
/// other postings.
///
/// The elided placeholder is replaced in place by one posting per currency
/// group, in first-seen order, each carrying the negated sum for that
/// currency under the original account name. With zero or more than one
/// elided posting the transaction is left exactly as parsed: ambiguous
/// balancing is not attempted.
fn balance_postings(postings: &mut Vec<Posting>) {
    let elided: Vec<usize> = postings
        .iter()
        .enumerate()
        .filter(|(_, p)| p.amount == 0.0 && p.currency.is_none())
        .map(|(i, _)| i)
        .collect();
    if elided.len() != 1 {
        return;
    }
    let idx = elided[0];

    let mut totals: Vec<(Option<String>, f64)> = Vec::new();
    for (i, p) in postings.iter().enumerate() {
        if i == idx {
            continue;
        }
        match totals.iter_mut().find(|(c, _)| *c == p.currency) {
            Some((_, total)) => *total += p.amount,
            None => totals.push((p.currency.clone(), p.amount)),
        }
    }

    let account = postings[idx].account.clone();
    let replacements: Vec<Posting> = totals
        .into_iter()
        .map(|(currency, total)| Posting {
            account: account.clone(),
            amount: -total,
            currency,
        })
        .collect();
    postings.splice(idx..idx + 1, replacements);
}

/// Accumulator for the transaction block currently being scanned
#[derive(Default)]
struct BlockState {
    header: Option<Header>,
    header_line: usize,
    postings: Vec<Posting>,
    comments: Vec<String>,
}

impl BlockState {
    /// Finalize the pending transaction, if it has a header and at least one
    /// posting. A header with zero postings produces no transaction and the
    /// accumulator is kept, matching the forgiving block separation rules.
    fn flush(&mut self, out: &mut Vec<Transaction>, file_id: i64) {
        let Some(header) = self.header.as_ref() else {
            return;
        };
        if self.postings.is_empty() {
            return;
        }

        let header = header.clone();
        let mut postings = std::mem::take(&mut self.postings);
        balance_postings(&mut postings);

        let amount: f64 = postings.iter().filter(|p| p.amount > 0.0).map(|p| p.amount).sum();

        out.push(Transaction {
            id: transaction_id(file_id, self.header_line, &format!("{} {}", header.date, header.narration)),
            file_id,
            date: header.date,
            narration: header.narration.clone(),
            payee: header.narration,
            amount,
            tags: header.tags,
            postings,
            comments: std::mem::take(&mut self.comments),
        });
        self.header = None;
        self.header_line = 0;
    }
}

/// Parse a whole ledger file into transactions.
///
/// Never fails: malformed blocks are skipped with a warning and scanning
/// continues with the next block. Empty or whitespace-only input yields an
/// empty vector.
pub fn parse_ledger(text: &str, file_id: i64) -> Vec<Transaction> {
    let mut txs = Vec::new();
    let mut state = BlockState::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end();

        // Blank line separates transactions
        if line.is_empty() {
            state.flush(&mut txs, file_id);
            continue;
        }

        // Whole-line comments start with ';'
        if COMMENT_RE.is_match(line) {
            state.comments.push(COMMENT_RE.replace(line, "").to_string());
            continue;
        }

        // A header candidate is a line with no leading whitespace
        if !line.starts_with(char::is_whitespace) {
            state.flush(&mut txs, file_id);
            match parse_header(line) {
                Some(h) => {
                    state.header = Some(h);
                    state.header_line = idx + 1;
                }
                // Not a hard error: skip the line and keep scanning
                None => log::warn!("line {}: skipping unrecognized header line: {}", idx + 1, line),
            }
            continue;
        }

        // Otherwise it should be a posting (indented)
        if let Some(p) = parse_posting(line) {
            state.postings.push(p);
        }
    }

    // Handles files not ending in a blank line
    state.flush(&mut txs, file_id);

    txs
}

/// Parse a single transaction block.
///
/// Unlike [`parse_ledger`], this is the strict entry point: an empty block
/// or an unparseable header line is a hard error. Used when validating a
/// block supplied on its own (e.g. appending a new entry).
pub fn parse_entry(block: &str, file_id: i64) -> Result<Transaction, ParseError> {
    let mut lines = block.trim_end().lines();

    let first = lines
        .find(|l| !l.trim().is_empty())
        .ok_or(ParseError::EmptyEntry)?;
    let first = first.trim();
    let header = parse_header(first).ok_or_else(|| ParseError::InvalidHeader {
        line: first.to_string(),
    })?;

    let mut state = BlockState {
        header: Some(header),
        header_line: 1,
        postings: Vec::new(),
        comments: Vec::new(),
    };

    for raw in lines {
        let line = raw.trim_end();
        if line.is_empty() {
            continue;
        }
        if COMMENT_RE.is_match(line) {
            state.comments.push(COMMENT_RE.replace(line, "").to_string());
            continue;
        }
        if let Some(p) = parse_posting(line) {
            state.postings.push(p);
        }
    }

    let mut txs = Vec::new();
    state.flush(&mut txs, file_id);
    txs.into_iter().next().ok_or(ParseError::EmptyEntry)
}

// ==================== Tests ====================
