//! Temporal vocabulary of the timetabler: weekdays, teaching periods,
//! parts of the day and the (weekday, period) timeslot pair.

mod part_of_day;
mod period;
mod timeslot;
mod weekday;

pub use part_of_day::PartOfDay;
pub use period::Period;
pub use timeslot::{full_availability, ScheduleTimeslot};
pub use weekday::Weekday;
