//! Render transactions back to ledger text
//!
//! The inverse of parsing, used by the export path. Round-trips through
//! [`crate::parse_ledger`] modulo transaction ids and the placement of
//! comment lines.

use crate::types::{Posting, Transaction};

/// Format an amount the way it would appear in a ledger file.
///
/// Whole numbers drop the fractional part so that `233.0` renders as `233`.
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

fn render_posting(out: &mut String, posting: &Posting) {
    out.push_str("  ");
    out.push_str(&posting.account);
    out.push_str("  ");
    out.push_str(&format_amount(posting.amount));
    if let Some(currency) = &posting.currency {
        out.push(' ');
        out.push_str(currency);
    }
    out.push('\n');
}

/// Render a single transaction as a ledger block (without a trailing blank line)
pub fn render_transaction(tx: &Transaction) -> String {
    let mut out = String::new();

    out.push_str(&tx.date);
    if !tx.narration.is_empty() {
        out.push(' ');
        out.push_str(&tx.narration);
    }
    for tag in &tx.tags {
        out.push_str(" #");
        out.push_str(tag);
    }
    out.push('\n');

    for comment in &tx.comments {
        out.push_str("  ; ");
        out.push_str(comment);
        out.push('\n');
    }

    for posting in &tx.postings {
        render_posting(&mut out, posting);
    }

    out
}

/// Render a sequence of transactions as a full ledger file, blocks separated
/// by blank lines
pub fn render_ledger(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(render_transaction)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_ledger;

    #[test]
    fn test_render_simple_transaction() {
        let txs = parse_ledger("2025-01-10 Groceries\n  Expenses:Food  233\n  Assets:Checking", 1);
        let text = render_transaction(&txs[0]);
        assert_eq!(
            text,
            "2025-01-10 Groceries\n  Expenses:Food  233\n  Assets:Checking  -233\n"
        );
    }

    #[test]
    fn test_render_tags_and_currency() {
        let txs = parse_ledger(
            "2025-03-01 Dinner #food #friends\n  Expenses:Food  80.25 INR\n  Assets:Cash  -80.25 INR",
            1,
        );
        let text = render_transaction(&txs[0]);
        assert_eq!(
            text,
            "2025-03-01 Dinner #food #friends\n  Expenses:Food  80.25 INR\n  Assets:Cash  -80.25 INR\n"
        );
    }

    #[test]
    fn test_reparse_round_trip() {
        let input = "2025-02-01 Trip #travel\n  ; booked online\n  Expenses:Travel  100 USD\n  Expenses:Travel  50 EUR\n  Assets:Cash\n\n2025-02-03 Coffee\n  Expenses:Food  4.5 USD\n  Assets:Cash  -4.5 USD";
        let first = parse_ledger(input, 1);
        let second = parse_ledger(&render_ledger(&first), 1);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.date, b.date);
            assert_eq!(a.narration, b.narration);
            assert_eq!(a.tags, b.tags);
            assert_eq!(a.amount, b.amount);
            assert_eq!(a.postings, b.postings);
        }
    }
}
