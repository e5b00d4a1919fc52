//! Plain-text rendering of the dashboard.

use std::fmt::Write;

use crate::dashboard::{DashboardView, RankedEntry};
use crate::models::Entry;

const METER_WIDTH: usize = 20;
const METER_FILL: char = '█';
const METER_EMPTY: char = '░';
const EMPTY_ROSTER: &str = "Start the roster by adding a simp target above.";

/// Devotion meter, scaled to [`METER_WIDTH`] cells.
///
/// Scores outside `0..=100` are clamped for display only.
pub fn meter(devotion: i64) -> String {
    let filled = (devotion.clamp(0, 100) as usize * METER_WIDTH + 50) / 100;
    let mut bar = String::with_capacity(METER_WIDTH * 3);
    bar.extend(std::iter::repeat_n(METER_FILL, filled));
    bar.extend(std::iter::repeat_n(METER_EMPTY, METER_WIDTH - filled));
    bar
}

/// Render the whole dashboard.
///
/// Example output (abridged):
/// ```text
/// Total devotion 253 | Average vibe 84 | Active roster 3
///
/// Current mission: Craft a haiku about their most iconic outfit.
///
/// Nova (cosmic streamer)  [entry-nova]
///   She noticed my username during a two minute raid.
///   ██████████████████░░ 92  Cosmic devotion
///   Ritual: Bits in every stream + cosmic compliments
/// ```
pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Total devotion {} | Average vibe {} | Active roster {}",
        view.stats.sum, view.stats.average, view.stats.count
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Current mission: {}", view.mission);
    let _ = writeln!(out);

    if view.top.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_ROSTER);
    }
    for ranked in &view.top {
        render_card(&mut out, ranked);
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Affirmation feed:");
    for line in view.affirmations {
        let _ = writeln!(out, "  * {}", line);
    }

    if let Some(crown) = view.crown {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", crown_line(crown));
    }

    out
}

fn render_card(out: &mut String, ranked: &RankedEntry<'_>) {
    let entry = ranked.entry;
    let _ = writeln!(out, "{} ({})  [{}]", entry.name, entry.vibe, entry.id);
    let _ = writeln!(out, "  {}", entry.reason);
    let _ = writeln!(
        out,
        "  {} {}  {}",
        meter(entry.devotion),
        entry.devotion,
        ranked.status.label
    );
    let _ = writeln!(out, "  Ritual: {}", entry.ritual);
}

/// The "top devotion" line for the current leader.
pub fn crown_line(entry: &Entry) -> String {
    format!(
        "{} currently holds the crown with a devotion score of {}.",
        entry.name, entry.devotion
    )
}

/// One line per entry in roster order.
pub fn render_list(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<38} {:<20} {:>4}  {}",
            entry.id,
            entry.name,
            entry.devotion,
            entry.status().label
        );
    }
    out
}
