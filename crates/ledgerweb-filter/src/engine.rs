//! Filter evaluation
//!
//! A recursive walk over the filter tree. Evaluation never fails:
//! unrecognized field/operator combinations and unparseable values make the
//! condition false (fail closed), so bad input excludes transactions rather
//! than crashing.

use chrono::NaiveDate;
use ledgerweb_parser::Transaction;
use ledgerweb_utils::normalize_text;

use crate::types::{
    Conjunction, FilterCondition, FilterField, FilterGroup, FilterNode, FilterOperator,
};

/// Canonicalize a date string to `YYYY-MM-DD`.
///
/// Accepts hyphenated and slashed dates as well as datetime strings with a
/// date prefix. Returns `None` for anything unparseable.
fn to_iso_date(s: &str) -> Option<String> {
    let t = s.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return Some(d.format("%Y-%m-%d").to_string());
        }
    }
    // datetime forms like "2025-01-10T08:30:00" or "2025-01-10 08:30:00"
    if let Some(prefix) = t.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(d.format("%Y-%m-%d").to_string());
        }
    }
    None
}

fn check_condition(tx: &Transaction, cond: &FilterCondition) -> bool {
    use FilterOperator::*;

    match cond.field {
        FilterField::Date => {
            let (Some(tx_date), Some(val_date)) =
                (to_iso_date(&tx.date), to_iso_date(&cond.value.as_text()))
            else {
                return false;
            };
            match cond.operator {
                IsOn => tx_date == val_date,
                IsNot => tx_date != val_date,
                IsBefore => tx_date < val_date,
                IsAfter => tx_date > val_date,
                _ => false,
            }
        }

        FilterField::Amount => {
            let Some(value) = cond.value.as_number() else {
                return false;
            };
            match cond.operator {
                Is => tx.amount == value,
                IsNot => tx.amount != value,
                GreaterThan => tx.amount > value,
                LessThan => tx.amount < value,
                _ => false,
            }
        }

        FilterField::Narration => {
            let hay = normalize_text(&tx.narration);
            let needle = normalize_text(&cond.value.as_text());
            match cond.operator {
                Is => hay == needle,
                IsNot => hay != needle,
                Contains => hay.contains(&needle),
                DoesNotContain => !hay.contains(&needle),
                StartsWith => hay.starts_with(&needle),
                EndsWith => hay.ends_with(&needle),
                IsBlank => hay.trim().is_empty(),
                IsNotBlank => !hay.trim().is_empty(),
                _ => false,
            }
        }

        FilterField::Account => {
            let needle = normalize_text(&cond.value.as_text());
            // an empty needle never matches, whatever the operator
            if needle.is_empty() {
                return false;
            }
            let mut accounts = tx.postings.iter().map(|p| normalize_text(&p.account));
            match cond.operator {
                Is => accounts.any(|acc| acc == needle),
                IsNot => accounts.all(|acc| acc != needle),
                Contains => accounts.any(|acc| acc.contains(&needle)),
                DoesNotContain => accounts.all(|acc| !acc.contains(&needle)),
                _ => false,
            }
        }

        FilterField::Tag => {
            let needle = normalize_text(&cond.value.as_text());
            let tags: Vec<String> = tx.tags.iter().map(|t| normalize_text(t)).collect();
            match cond.operator {
                Contains => !needle.is_empty() && tags.contains(&needle),
                DoesNotContain => needle.is_empty() || !tags.contains(&needle),
                IsBlank => tags.is_empty(),
                IsNotBlank => !tags.is_empty(),
                _ => false,
            }
        }
    }
}

fn evaluate_group(tx: &Transaction, group: &FilterGroup) -> bool {
    // an empty group doesn't filter anything out
    if group.children.is_empty() {
        return true;
    }
    match group.conjunction {
        Conjunction::And => group.children.iter().all(|child| evaluate_node(tx, child)),
        Conjunction::Or => group.children.iter().any(|child| evaluate_node(tx, child)),
    }
}

/// Evaluate a single filter node against a transaction
pub fn evaluate_node(tx: &Transaction, node: &FilterNode) -> bool {
    match node {
        FilterNode::Condition(cond) => check_condition(tx, cond),
        FilterNode::Group(group) => evaluate_group(tx, group),
    }
}

/// Return the transactions matching the filter, preserving input order
pub fn filter_transactions(transactions: &[Transaction], filter: &FilterGroup) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| evaluate_group(tx, filter))
        .cloned()
        .collect()
}

// ==================== Tests ====================
