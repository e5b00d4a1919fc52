//! Aggregate views over the roster.
//!
//! Everything here is recomputed from the slice it is handed; nothing is
//! cached between calls.

use serde::Serialize;

use crate::models::Entry;

/// How many entries the dashboard ranks by default.
pub const DEFAULT_TOP_N: usize = 5;

/// Headline numbers for the roster.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct RosterStats {
    pub sum: i64,
    pub average: i64,
    pub count: usize,
}

impl RosterStats {
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self {
            sum: sum(entries),
            average: average(entries),
            count: entries.len(),
        }
    }
}

fn total(entries: &[Entry]) -> i128 {
    entries.iter().map(|e| i128::from(e.devotion)).sum()
}

/// Sum of every devotion score, saturating at the `i64` bounds. Zero for an empty roster.
pub fn sum(entries: &[Entry]) -> i64 {
    total(entries).clamp(i64::MIN.into(), i64::MAX.into()) as i64
}

/// Mean devotion rounded half up. Zero for an empty roster.
pub fn average(entries: &[Entry]) -> i64 {
    if entries.is_empty() {
        return 0;
    }
    let mean = total(entries) as f64 / entries.len() as f64;
    (mean + 0.5).floor() as i64
}

/// The `n` highest-scoring entries, best first.
///
/// The sort is stable, so entries with equal scores keep roster order.
pub fn top_n(entries: &[Entry], n: usize) -> Vec<&Entry> {
    let mut ranked: Vec<&Entry> = entries.iter().collect();
    ranked.sort_by(|a, b| b.devotion.cmp(&a.devotion));
    ranked.truncate(n);
    ranked
}

/// The entry with the highest score; the earliest one in roster order wins a tie.
pub fn maximum(entries: &[Entry]) -> Option<&Entry> {
    entries.iter().fold(None::<&Entry>, |top, current| match top {
        Some(top) if current.devotion <= top.devotion => Some(top),
        _ => Some(current),
    })
}
