//! The (weekday, period) timeslot value type.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Period, Weekday};

/// One fixed teaching block on the weekly schedule.
///
/// Ordered weekday-major, period-minor, so sets of timeslots iterate in
/// schedule order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ScheduleTimeslot {
    pub weekday: Weekday,
    pub period: Period,
}

impl ScheduleTimeslot {
    pub fn new(weekday: Weekday, period: Period) -> Self {
        Self { weekday, period }
    }
}

impl fmt::Display for ScheduleTimeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weekday, self.period)
    }
}

/// The full weekly timeslot universe: every weekday crossed with every
/// period.
pub fn full_availability() -> BTreeSet<ScheduleTimeslot> {
    Weekday::ALL
        .into_iter()
        .flat_map(|weekday| {
            Period::ALL
                .into_iter()
                .map(move |period| ScheduleTimeslot::new(weekday, period))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_weekday_major() {
        let monday_night = ScheduleTimeslot::new(Weekday::Monday, Period::Night2);
        let tuesday_morning = ScheduleTimeslot::new(Weekday::Tuesday, Period::Morning1);
        assert!(monday_night < tuesday_morning);
    }

    #[test]
    fn test_full_availability_size() {
        assert_eq!(full_availability().len(), 5 * 6);
    }
}
