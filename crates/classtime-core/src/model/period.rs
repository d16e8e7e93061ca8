//! Fixed daily teaching periods and the time-range intersection rule.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Fixed teaching blocks of a day, each with a wall-clock `[start, end)`
/// interval.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Morning1 = 0,
    Morning2 = 1,
    Afternoon1 = 2,
    Afternoon2 = 3,
    Night1 = 4,
    Night2 = 5,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    // All callers pass literals within 00:00..24:00.
    NaiveTime::from_hms_opt(hour, minute, 0).expect("period bound is a valid time")
}

impl Period {
    /// All periods in daily order.
    pub const ALL: [Period; 6] = [
        Period::Morning1,
        Period::Morning2,
        Period::Afternoon1,
        Period::Afternoon2,
        Period::Night1,
        Period::Night2,
    ];

    /// Ordinal used in solver facts.
    pub fn ordinal(self) -> i64 {
        self as i64
    }

    /// Inverse of [`Period::ordinal`].
    pub fn from_ordinal(n: i64) -> Option<Period> {
        Self::ALL.into_iter().find(|p| p.ordinal() == n)
    }

    /// Wall-clock `[start, end)` bounds of the period.
    pub fn bounds(self) -> (NaiveTime, NaiveTime) {
        match self {
            Period::Morning1 => (hm(8, 0), hm(9, 40)),
            Period::Morning2 => (hm(10, 0), hm(11, 40)),
            Period::Afternoon1 => (hm(14, 0), hm(15, 40)),
            Period::Afternoon2 => (hm(16, 0), hm(17, 40)),
            Period::Night1 => (hm(19, 20), hm(21, 0)),
            Period::Night2 => (hm(21, 10), hm(22, 50)),
        }
    }

    /// Returns the periods intersected by the `[start, end)` range, in
    /// daily order. A reversed range is treated as `[end, start)`.
    ///
    /// A period `[ps, pe)` is included iff `start <= ps < end` or
    /// `start < pe <= end`. The asymmetry between the two clauses is
    /// intentional and load-bearing: a range that starts exactly at `ps`
    /// includes the period, while a range that ends exactly at `ps` does
    /// not.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveTime;
    /// use classtime_core::model::Period;
    ///
    /// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
    /// assert_eq!(
    ///     Period::intersections(t(7, 40), t(10, 10)),
    ///     vec![Period::Morning1, Period::Morning2],
    /// );
    /// assert_eq!(Period::intersections(t(12, 0), t(13, 0)), vec![]);
    /// ```
    pub fn intersections(start: NaiveTime, end: NaiveTime) -> Vec<Period> {
        let (start, end) = if end < start { (end, start) } else { (start, end) };

        Self::ALL
            .into_iter()
            .filter(|period| {
                let (ps, pe) = period.bounds();
                (start <= ps && ps < end) || (start < pe && pe <= end)
            })
            .collect()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Period::Morning1 => "8:00 - 9:40",
            Period::Morning2 => "10:00 - 11:40",
            Period::Afternoon1 => "14:00 - 15:40",
            Period::Afternoon2 => "16:00 - 17:40",
            Period::Night1 => "19:20 - 21:00",
            Period::Night2 => "21:10 - 22:50",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_range_inside_a_single_period() {
        assert_eq!(
            Period::intersections(t(8, 0), t(9, 0)),
            vec![Period::Morning1]
        );
    }

    #[test]
    fn test_range_touching_both_morning_periods() {
        assert_eq!(
            Period::intersections(t(7, 40), t(10, 10)),
            vec![Period::Morning1, Period::Morning2]
        );
    }

    #[test]
    fn test_end_exactly_at_next_period_start_is_excluded() {
        // 16:00 is Afternoon2's start; a range ending there must not
        // include Afternoon2.
        assert_eq!(
            Period::intersections(t(13, 0), t(16, 0)),
            vec![Period::Afternoon1]
        );
    }

    #[test]
    fn test_range_covering_only_a_period_tail() {
        assert_eq!(
            Period::intersections(t(11, 30), t(12, 30)),
            vec![Period::Morning2]
        );
    }

    #[test]
    fn test_night_periods() {
        assert_eq!(
            Period::intersections(t(19, 0), t(21, 40)),
            vec![Period::Night1, Period::Night2]
        );
    }

    #[test]
    fn test_degenerate_range_intersects_nothing() {
        assert_eq!(Period::intersections(t(9, 0), t(9, 0)), vec![]);
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        assert_eq!(
            Period::intersections(t(9, 0), t(8, 0)),
            vec![Period::Morning1]
        );
    }
}
