//! Field converters used while structuring raw tabular input.
//!
//! Every converter is a pure function from raw text to a typed value.
//! Conversions that depend on institution defaults (offering group,
//! class periods, implied slot length) read them from an explicit
//! [`Conventions`] value threaded through the parse calls — there is no
//! process-wide converter state.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use chrono::{NaiveTime, TimeDelta};
use regex::Regex;

use crate::error::ParseError;
use crate::model::{PartOfDay, Period, ScheduleTimeslot, Weekday};

/// Institution-level defaults applied while structuring input.
#[derive(Debug, Clone)]
pub struct Conventions {
    /// Offering group assumed when the input column is empty.
    pub default_offering_group: String,
    /// Parts of the day a course may occupy when none are given.
    pub default_class_period: BTreeSet<PartOfDay>,
    /// Length assumed for a time range with no end time.
    pub default_slot_length: TimeDelta,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            default_offering_group: "bcc".to_string(),
            default_class_period: [PartOfDay::Morning, PartOfDay::Afternoon].into(),
            default_slot_length: TimeDelta::minutes(100),
        }
    }
}

/// Extracts a teacher id from an email-like string: everything before
/// the first `@`, trimmed. Ids starting with a digit are rejected.
///
/// ```
/// use classtime_core::convert::teacher_id;
///
/// assert_eq!(teacher_id("alan-turing@linux.ime.usp.br").unwrap(), "alan-turing");
/// assert_eq!(teacher_id("adaLovelace").unwrap(), "adaLovelace");
/// ```
pub fn teacher_id(raw: &str) -> Result<String, ParseError> {
    let raw = raw.trim();
    let id = match raw.find('@') {
        Some(at) if at > 0 => &raw[..at],
        _ => raw,
    };
    let id = id.trim();
    if id.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ParseError::InvalidTeacherId {
            id: id.to_string(),
            reason: "teacher ids must not start with a digit",
        });
    }
    Ok(id.to_string())
}

/// Parses a `;`-separated list of teacher emails/ids. Leading and
/// trailing separators are tolerated; an empty input yields an empty
/// list (the caller decides whether that is allowed).
pub fn teacher_ids(raw: &str) -> Result<Vec<String>, ParseError> {
    let raw = raw.trim_matches([' ', ';']);
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(';').map(teacher_id).collect()
}

/// Normalizes a course id: trimmed and lowercased.
pub fn course_id(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parses a `;`-separated list of course ids.
///
/// ```
/// use classtime_core::convert::course_ids;
///
/// assert_eq!(course_ids("MAC0110;mac3210"), vec!["mac0110", "mac3210"]);
/// assert_eq!(course_ids(";mac0470;mac5856"), vec!["mac0470", "mac5856"]);
/// ```
pub fn course_ids(raw: &str) -> Vec<String> {
    let raw = raw.trim_matches([' ', ';']);
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(';').map(course_id).collect()
}

/// Parses a multilingual boolean token.
///
/// Truthy: `True`, `yes`, `y`, `sim`, `s`, `1`. Falsy: the empty
/// string, `False`, `no`, `n`, `nao`, `não`, `0`. Tokens are matched
/// exactly; anything else is an error.
pub fn boolean(raw: &str) -> Result<bool, ParseError> {
    match raw {
        "True" | "yes" | "y" | "sim" | "s" | "1" => Ok(true),
        "False" | "no" | "n" | "nao" | "não" | "0" | "" => Ok(false),
        _ => Err(ParseError::InvalidBoolean(raw.to_string())),
    }
}

/// Normalizes an offering group, falling back to the conventional
/// default when the input is empty.
pub fn offering_group(raw: &str, conventions: &Conventions) -> String {
    if raw.is_empty() {
        conventions.default_offering_group.clone()
    } else {
        raw.trim().to_lowercase()
    }
}

/// Parses a part-of-day token, falling back to the conventional default
/// set when the input is empty.
pub fn class_period(
    raw: &str,
    conventions: &Conventions,
) -> Result<BTreeSet<PartOfDay>, ParseError> {
    if raw.is_empty() {
        Ok(conventions.default_class_period.clone())
    } else {
        PartOfDay::set_from_token(raw)
    }
}

/// Input accepted by [`schedule_timeslots`]: free text in the timeslot
/// mini-language, or an already structured set (passed through
/// unchanged).
#[derive(Debug, Clone)]
pub enum TimeslotInput {
    Text(String),
    Slots(BTreeSet<ScheduleTimeslot>),
}

impl From<&str> for TimeslotInput {
    fn from(s: &str) -> Self {
        TimeslotInput::Text(s.to_string())
    }
}

impl From<String> for TimeslotInput {
    fn from(s: String) -> Self {
        TimeslotInput::Text(s)
    }
}

impl From<BTreeSet<ScheduleTimeslot>> for TimeslotInput {
    fn from(slots: BTreeSet<ScheduleTimeslot>) -> Self {
        TimeslotInput::Slots(slots)
    }
}

fn weekday_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(seg|ter|qua|qui|sex|mon|tue|wed|thu|fri)")
            .expect("weekday regex is valid")
    })
}

fn time_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let time = r"(?:[0-1]?[0-9]|2[0-3]):[0-5][0-9]";
        Regex::new(&format!(r"({time})(?:\s?-\s?)?({time})?"))
            .expect("time range regex is valid")
    })
}

fn parse_time(raw: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| ParseError::InvalidTime(raw.to_string()))
}

/// Parses a timeslot set from the scheduling mini-language.
///
/// Grammar: `slot (";" slot)*` where `slot` is a weekday token followed
/// by one or more `HH:MM` or `HH:MM - HH:MM` ranges. A range without an
/// end time spans the conventional slot length. Each range expands into
/// the periods it intersects; ranges that touch no teaching period
/// contribute nothing. Empty input yields an empty set.
///
/// ```
/// use classtime_core::convert::{schedule_timeslots, Conventions};
/// use classtime_core::model::{Period, ScheduleTimeslot, Weekday};
///
/// let conventions = Conventions::default();
/// let slots = schedule_timeslots("ter 08:00 - 09:40; qui 10:00", &conventions).unwrap();
/// assert_eq!(
///     slots,
///     [
///         ScheduleTimeslot::new(Weekday::Tuesday, Period::Morning1),
///         ScheduleTimeslot::new(Weekday::Thursday, Period::Morning2),
///     ]
///     .into()
/// );
/// ```
pub fn schedule_timeslots(
    input: impl Into<TimeslotInput>,
    conventions: &Conventions,
) -> Result<BTreeSet<ScheduleTimeslot>, ParseError> {
    let text = match input.into() {
        TimeslotInput::Slots(slots) => return Ok(slots),
        TimeslotInput::Text(text) => text,
    };

    let text = text.trim_matches([' ', ';']).to_lowercase();
    if text.is_empty() {
        return Ok(BTreeSet::new());
    }

    let mut slots = BTreeSet::new();
    for segment in text.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let weekday_token = weekday_regex()
            .find(segment)
            .ok_or_else(|| ParseError::MissingWeekday {
                segment: segment.to_string(),
                input: text.clone(),
            })?;
        let weekday = Weekday::from_token(weekday_token.as_str())?;

        let mut matched_range = false;
        for captures in time_range_regex().captures_iter(segment) {
            matched_range = true;
            let start = parse_time(&captures[1])?;
            let end = match captures.get(2) {
                Some(end) => parse_time(end.as_str())?,
                None => start + conventions.default_slot_length,
            };
            for period in Period::intersections(start, end) {
                slots.insert(ScheduleTimeslot::new(weekday, period));
            }
        }
        if !matched_range {
            return Err(ParseError::MissingTimeRange {
                segment: segment.to_string(),
                input: text.clone(),
            });
        }
    }

    Ok(slots)
}
