//! Ranked standings derived from the player registry.
//!
//! The leaderboard is computed fresh at each broadcast, never stored. Every
//! player that ever joined is listed (departed players keep the points they
//! earned), sorted by descending score with ties keeping slot order.

use log::warn;
use shared::MAX_FRAME_LEN;
use std::cmp::Reverse;

use crate::registry::PlayerRegistry;

/// Ordinal rank label: 1st, 2nd, 3rd, 4th, ... 11th, 12th, 21st.
pub fn ordinal(rank: usize) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", rank, suffix)
}

/// Ranked `(rank, nickname, score)` rows, best first.
pub fn standings(registry: &PlayerRegistry) -> Vec<(usize, &str, u32)> {
    let mut entries: Vec<(&str, u32)> = registry
        .players()
        .map(|(_, player)| (player.nickname.as_str(), player.score))
        .collect();
    // Stable sort: equal scores keep registration (slot) order.
    entries.sort_by_key(|(_, score)| Reverse(*score));
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (nickname, score))| (i + 1, nickname, score))
        .collect()
}

/// Renders the textual report delivered to every player.
///
/// The wire frame carries a one-byte length, so the report cannot exceed 255
/// bytes; rather than overflow, rendering stops at the last line that fits
/// and logs how many entries were dropped.
pub fn build_report(registry: &PlayerRegistry) -> String {
    let rows = standings(registry);
    let mut report = String::from("Leaderboard:\n");

    for (i, (rank, nickname, score)) in rows.iter().enumerate() {
        let line = format!("{} {}: {} points\n", ordinal(*rank), nickname, score);
        if report.len() + line.len() > MAX_FRAME_LEN {
            warn!(
                "leaderboard report truncated after {} of {} entries",
                i,
                rows.len()
            );
            break;
        }
        report.push_str(&line);
    }

    report
}
