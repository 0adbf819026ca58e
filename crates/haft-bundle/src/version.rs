//! Ordering of dotted-numeric version strings.
//!
//! Segments are compared numerically when both sides parse as unsigned
//! integers, byte-wise otherwise. A shorter version is right-padded with
//! `"0"` segments, so `"1.2"` and `"1.2.0"` are equal.

use std::cmp::Ordering;

/// Compare two version strings.
///
/// An empty string is treated as `"0"`. Segment counts may differ
/// arbitrarily (`"1.2"` vs `"1.2.0.1"`).
#[must_use]
pub fn compare(first: &str, second: &str) -> Ordering {
    let first = if first.is_empty() { "0" } else { first };
    let second = if second.is_empty() { "0" } else { second };

    if first == second {
        return Ordering::Equal;
    }

    let mut left: Vec<&str> = first.split('.').collect();
    let mut right: Vec<&str> = second.split('.').collect();

    let depth = left.len().max(right.len());
    left.resize(depth, "0");
    right.resize(depth, "0");

    for (a, b) in left.iter().zip(right.iter()) {
        let ordering = match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            // fallback: string comparison
            _ => a.cmp(b),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}
