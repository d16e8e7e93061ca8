//! Course offerings: which courses are taught, by whom, and under
//! which scheduling restrictions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::dataset::Row;
use super::{Index, InputRecord};
use crate::convert::{self, Conventions, TimeslotInput};
use crate::error::{RowError, ValidationError};
use crate::fact::{Fact, Term};
use crate::model::{PartOfDay, ScheduleTimeslot};

/// One course offering.
///
/// An offering with more than one course id is a co-taught group: all
/// of its courses are jointly scheduled, expressed as pairwise `joint/3`
/// facts. The list length is unbounded.
///
/// `fixed_classes` may be empty, meaning every class of the offering is
/// placed by the solver. If only part of the weekly classes are fixed,
/// the solver places the remaining ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadData {
    /// Course unique identifiers. Never empty.
    pub courses_id: Vec<String>,
    /// Lecturer unique identifiers. Never empty.
    pub teachers_id: Vec<String>,
    /// Offering group the courses are taught under.
    pub offering_group: String,
    /// Parts of the day in which classes may be scheduled.
    pub class_period: BTreeSet<PartOfDay>,
    /// Classes pinned to fixed timeslots by the input data.
    pub fixed_classes: BTreeSet<ScheduleTimeslot>,
    /// Course long-form written name.
    pub course_name: String,
}

impl WorkloadData {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        courses_id: &str,
        teachers_id: &str,
        offering_group: &str,
        class_period: &str,
        fixed_classes: impl Into<TimeslotInput>,
        course_name: &str,
        conventions: &Conventions,
    ) -> Result<Self, RowError> {
        let courses_id = convert::course_ids(courses_id);
        if courses_id.is_empty() {
            return Err(
                ValidationError::new("courses_id", "expected at least one course id").into(),
            );
        }
        if courses_id.iter().any(String::is_empty) {
            return Err(ValidationError::new("courses_id", "empty course id").into());
        }

        let teachers_id = convert::teacher_ids(teachers_id)?;
        if teachers_id.is_empty() {
            return Err(
                ValidationError::new("teachers_id", "expected at least one teacher id").into(),
            );
        }
        if teachers_id.iter().any(String::is_empty) {
            return Err(ValidationError::new("teachers_id", "empty teacher id").into());
        }

        let class_period = convert::class_period(class_period, conventions)?;
        if class_period.is_empty() {
            return Err(
                ValidationError::new("class_period", "expected at least one part of day").into(),
            );
        }

        Ok(Self {
            courses_id,
            teachers_id,
            offering_group: convert::offering_group(offering_group, conventions),
            class_period,
            fixed_classes: convert::schedule_timeslots(fixed_classes, conventions)?,
            course_name: course_name.to_string(),
        })
    }

    pub(crate) fn from_row(row: &Row<'_>, conventions: &Conventions) -> Result<Self, RowError> {
        Self::new(
            row.required("courses_id")?,
            row.required("teachers_id")?,
            row.get("offering_group"),
            row.get("class_period"),
            row.get("fixed_classes"),
            row.get("course_name"),
            conventions,
        )
    }
}

impl InputRecord for WorkloadData {
    fn index(&self) -> Index {
        let mut index = self.courses_id.clone();
        index.push(self.offering_group.clone());
        index
    }

    /// Lowers into `lecturer/3` per (course, teacher), `class/5` per
    /// fixed timeslot (last term 1 marks the class as fixed), `joint/3`
    /// per unordered course pair, and `schedule_on/3` per allowed part
    /// of day.
    fn to_facts(&self) -> Vec<Fact> {
        let group = self.offering_group.as_str();

        let mut lecturers = Vec::new();
        let mut fixed = Vec::new();
        let mut schedule_on = Vec::new();
        for course in &self.courses_id {
            for teacher in &self.teachers_id {
                lecturers.push(Fact::new(
                    "lecturer",
                    [course.as_str(), group, teacher.as_str()],
                ));
            }
            for slot in &self.fixed_classes {
                fixed.push(Fact::new(
                    "class",
                    [
                        Term::from(course.as_str()),
                        Term::from(group),
                        Term::from(slot.weekday.ordinal()),
                        Term::from(slot.period.ordinal()),
                        Term::from(true),
                    ],
                ));
            }
            for part in &self.class_period {
                schedule_on.push(Fact::new(
                    "schedule_on",
                    [course.as_str(), group, part.to_string().as_str()],
                ));
            }
        }

        let mut joints = Vec::new();
        for (i, course_a) in self.courses_id.iter().enumerate() {
            for course_b in &self.courses_id[i + 1..] {
                joints.push(Fact::new(
                    "joint",
                    [course_a.as_str(), course_b.as_str(), group],
                ));
            }
        }

        let mut facts = lecturers;
        facts.extend(fixed);
        facts.extend(joints);
        facts.extend(schedule_on);
        facts
    }
}
