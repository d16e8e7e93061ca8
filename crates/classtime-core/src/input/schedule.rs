//! Availability and time preferences of a teacher.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::dataset::Row;
use super::{Index, InputRecord};
use crate::convert::{self, Conventions, TimeslotInput};
use crate::error::{RowError, ValidationError};
use crate::fact::{Fact, Term};
use crate::model::{full_availability, ScheduleTimeslot};

/// Weekly availability and preferences of one teacher.
///
/// Only unavailable time is stored; available time is derived as the
/// full weekly universe minus `unavailable` when lowering to facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherScheduleData {
    /// Unique identifier of the teacher (email local part).
    pub teacher_id: String,
    /// Timeslots the teacher prefers to teach in.
    pub preferred: BTreeSet<ScheduleTimeslot>,
    /// Timeslots the teacher cannot teach in.
    pub unavailable: BTreeSet<ScheduleTimeslot>,
}

impl TeacherScheduleData {
    pub fn new(
        teacher_id: &str,
        preferred: impl Into<TimeslotInput>,
        unavailable: impl Into<TimeslotInput>,
        conventions: &Conventions,
    ) -> Result<Self, RowError> {
        let teacher_id = convert::teacher_id(teacher_id)?;
        if teacher_id.is_empty() {
            return Err(ValidationError::new("teacher_id", "must not be empty").into());
        }
        Ok(Self {
            teacher_id,
            preferred: convert::schedule_timeslots(preferred, conventions)?,
            unavailable: convert::schedule_timeslots(unavailable, conventions)?,
        })
    }

    /// A schedule with no preferences and no unavailable time. Used
    /// when synthesizing records for teachers the input never mentions.
    pub fn unrestricted(teacher_id: impl Into<String>) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            preferred: BTreeSet::new(),
            unavailable: BTreeSet::new(),
        }
    }

    pub(crate) fn from_row(row: &Row<'_>, conventions: &Conventions) -> Result<Self, RowError> {
        Self::new(
            row.required("teacher_id")?,
            row.get("preferred"),
            row.get("unavailable"),
            conventions,
        )
    }
}

impl InputRecord for TeacherScheduleData {
    fn index(&self) -> Index {
        vec![self.teacher_id.clone()]
    }

    /// Lowers into `available/3` (universe minus unavailable) and
    /// `preferred/3`.
    fn to_facts(&self) -> Vec<Fact> {
        let timeslot_fact = |predicate: &str, slot: &ScheduleTimeslot| {
            Fact::new(
                predicate,
                [
                    Term::from(self.teacher_id.as_str()),
                    Term::from(slot.weekday.ordinal()),
                    Term::from(slot.period.ordinal()),
                ],
            )
        };

        let mut facts = Vec::new();
        for slot in full_availability().difference(&self.unavailable) {
            facts.push(timeslot_fact("available", slot));
        }
        for slot in &self.preferred {
            facts.push(timeslot_fact("preferred", slot));
        }
        facts
    }
}
