//! Utility functions and helpers

use std::sync::atomic::{AtomicU64, Ordering};

use unicode_normalization::UnicodeNormalization;

/// Normalize text for comparisons: NFKC normalization followed by lowercasing.
///
/// Both sides of every text comparison in the filter engine go through this,
/// so composed, decomposed, full-width and upper-case spellings all compare
/// equal.
pub fn normalize_text(s: &str) -> String {
    s.nfkc().collect::<String>().to_lowercase()
}

/// Generate a unique ID (millisecond timestamp plus a process-wide counter)
pub fn generate_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", now, n)
}

/// Format a numeric string with thousands separators in the integer part
pub fn format_number(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(pos) => (&rest[..pos], &rest[pos..]),
        None => (rest, ""),
    };

    let mut grouped = String::new();
    let mut count = 0;
    for c in int_part.chars().rev() {
        if count == 3 {
            grouped.push(',');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    let grouped: String = grouped.chars().rev().collect();

    format!("{}{}{}", sign, grouped, frac_part)
}
