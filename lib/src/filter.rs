//! Removes rarely seen positions and rarely played moves from a table.
//!
//! Two thresholds apply, in this order:
//!
//!   - A position reached fewer than `min_games` times is dropped with all its
//!     continuations.
//!   - In the remaining positions, every continuation played fewer than
//!     `max(1, floor(total_games * survival_fraction))` times is dropped.
//!
//! A position that is left without any continuation is dropped as well, even
//! though it passed the first threshold.

use log::info;

use crate::aggregator::PositionTable;
use crate::BookConfig;

/// How much the filter removed. Only used for reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub removed_positions: usize,
    pub removed_continuations: usize,
}

/// Smallest count a continuation needs to stay in the book.
pub fn min_frequency(total_games: u32, survival_fraction: f64) -> u32 {
    let scaled = (f64::from(total_games) * survival_fraction).floor() as u32;
    scaled.max(1)
}

pub fn filter_weak_signal(
    table: &mut PositionTable,
    min_games: u32,
    survival_fraction: f64,
) -> FilterReport {
    let mut report = FilterReport::default();

    table.positions.retain(|_, entry| {
        if entry.total_games < min_games {
            report.removed_positions += 1;
            return false;
        }

        let threshold = min_frequency(entry.total_games, survival_fraction);
        let before = entry.continuations.len();
        entry.continuations.retain(|c| c.count >= threshold);
        report.removed_continuations += before - entry.continuations.len();

        if entry.continuations.is_empty() {
            report.removed_positions += 1;
            false
        } else {
            true
        }
    });

    info!("Removed {} weak positions", report.removed_positions);
    report
}

/// Runs [`filter_weak_signal`] with the thresholds from `config`.
pub fn filter_with_config(table: &mut PositionTable, config: &BookConfig) -> FilterReport {
    filter_weak_signal(table, config.min_games, config.survival_fraction)
}
