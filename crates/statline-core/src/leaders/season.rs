//! The "current season" rule.
//!
//! The season runs roughly April through October. Before the season gets
//! going, leader boards for the new year are empty or meaningless, so any
//! date in January through April maps to the previous calendar year.

use chrono::Datelike;

use crate::clock::Clock;

/// Last calendar month treated as off-season carry-over.
const OFF_SEASON_END_MONTH: u32 = 4;

pub fn current_season(clock: &dyn Clock) -> i32 {
    let now = clock.now();
    if now.month() <= OFF_SEASON_END_MONTH {
        now.year() - 1
    } else {
        now.year()
    }
}

/// The last `n` seasons, current first, counting down.
pub fn last_seasons(clock: &dyn Clock, n: usize) -> Vec<i32> {
    let current = current_season(clock);
    (0..n as i32).map(|i| current - i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn test_early_year_maps_to_previous_season() {
        let clock = FixedClock::at_date(2026, 3, 15);
        assert_eq!(current_season(&clock), 2025);
    }

    #[test]
    fn test_in_season_maps_to_current_year() {
        let clock = FixedClock::at_date(2026, 6, 1);
        assert_eq!(current_season(&clock), 2026);
    }

    #[test]
    fn test_boundary_months() {
        assert_eq!(current_season(&FixedClock::at_date(2026, 4, 30)), 2025);
        assert_eq!(current_season(&FixedClock::at_date(2026, 5, 1)), 2026);
        assert_eq!(current_season(&FixedClock::at_date(2026, 1, 1)), 2025);
        assert_eq!(current_season(&FixedClock::at_date(2026, 12, 31)), 2026);
    }

    #[test]
    fn test_last_seasons_counts_down_from_current() {
        let clock = FixedClock::at_date(2026, 3, 15);
        assert_eq!(last_seasons(&clock, 4), vec![2025, 2024, 2023, 2022]);
        assert_eq!(last_seasons(&clock, 1), vec![2025]);
        assert!(last_seasons(&clock, 0).is_empty());
    }
}
