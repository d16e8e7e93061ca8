//! Days of the week as they are represented inside the scheduler.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Days of the week on which classes can be scheduled.
///
/// Ordinal values match the ones used in solver facts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
}

impl Weekday {
    /// All weekdays in schedule order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Ordinal used in solver facts.
    pub fn ordinal(self) -> i64 {
        self as i64
    }

    /// Inverse of [`Weekday::ordinal`].
    pub fn from_ordinal(n: i64) -> Option<Weekday> {
        Self::ALL.into_iter().find(|w| w.ordinal() == n)
    }

    /// Parses a weekday from an English or Portuguese abbreviation.
    ///
    /// Recognized tokens (case and surrounding whitespace insensitive):
    ///
    /// - `mon`, `seg` -> Monday
    /// - `tue`, `ter` -> Tuesday
    /// - `wed`, `qua` -> Wednesday
    /// - `thu`, `qui` -> Thursday
    /// - `fri`, `sex` -> Friday
    pub fn from_token(token: &str) -> Result<Weekday, ParseError> {
        match token.trim().to_lowercase().as_str() {
            "mon" | "seg" => Ok(Weekday::Monday),
            "tue" | "ter" => Ok(Weekday::Tuesday),
            "wed" | "qua" => Ok(Weekday::Wednesday),
            "thu" | "qui" => Ok(Weekday::Thursday),
            "fri" | "sex" => Ok(Weekday::Friday),
            _ => Err(ParseError::InvalidWeekday(token.trim().to_string())),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        };
        f.write_str(name)
    }
}
