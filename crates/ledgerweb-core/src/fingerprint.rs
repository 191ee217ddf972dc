//! Transaction fingerprinting for similarity matching
//!
//! A fingerprint is a normalized narration plus the absolute amount with a
//! fixed number of decimal places, so near-identical transactions collide.

/// Lowercase and strip everything that is not an ASCII letter or digit
fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Stable fingerprint for a transaction's narration and amount
pub fn fingerprint(narration: &str, amount: f64) -> String {
    format!("{}|{:.2}", normalize(narration), amount.abs())
}
