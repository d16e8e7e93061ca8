//! General information about a course in the educational institution.

use serde::{Deserialize, Serialize};

use super::dataset::{int_field, Row};
use super::{Index, InputRecord};
use crate::convert;
use crate::error::{RowError, ValidationError};
use crate::fact::{Fact, Term};

/// One course as listed in the institution catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseData {
    /// Unique identifier for the course, normalized to lowercase.
    pub course_id: String,
    /// Number of weekly classes to be scheduled. Always positive.
    pub num_classes: u32,
    /// Ideal semester for a student to take the course.
    pub ideal_semester: u32,
    /// Whether the course belongs to the undergraduate program.
    pub is_undergrad: bool,
    /// Whether the weekly classes must be scheduled back to back.
    pub is_double: bool,
}

impl CourseData {
    pub fn new(
        course_id: &str,
        num_classes: i64,
        ideal_semester: i64,
        is_undergrad: bool,
        is_double: bool,
    ) -> Result<Self, ValidationError> {
        let course_id = convert::course_id(course_id);
        if course_id.is_empty() {
            return Err(ValidationError::new("course_id", "must not be empty"));
        }
        if num_classes <= 0 {
            return Err(ValidationError::new(
                "num_classes",
                format!("must be positive, got {num_classes}"),
            ));
        }
        if ideal_semester < 0 {
            return Err(ValidationError::new(
                "ideal_semester",
                format!("must not be negative, got {ideal_semester}"),
            ));
        }
        Ok(Self {
            course_id,
            num_classes: num_classes as u32,
            ideal_semester: ideal_semester as u32,
            is_undergrad,
            is_double,
        })
    }

    pub(crate) fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let course_id = row.required("course_id")?;
        let num_classes = int_field(row.required("num_classes")?, "num_classes")?;
        let ideal_semester = int_field(row.required("ideal_semester")?, "ideal_semester")?;
        let is_undergrad = convert::boolean(row.get("is_undergrad"))?;
        let is_double = convert::boolean(row.get("is_double"))?;
        Ok(Self::new(
            course_id,
            num_classes,
            ideal_semester,
            is_undergrad,
            is_double,
        )?)
    }
}

impl InputRecord for CourseData {
    fn index(&self) -> Index {
        vec![self.course_id.clone()]
    }

    /// Lowers into `is_undergrad/1` and `is_double/1` (only when set),
    /// `num_classes/2` and `ideal_semester/2`.
    fn to_facts(&self) -> Vec<Fact> {
        let id = self.course_id.as_str();
        let mut facts = Vec::new();
        if self.is_undergrad {
            facts.push(Fact::new("is_undergrad", [id]));
        }
        if self.is_double {
            facts.push(Fact::new("is_double", [id]));
        }
        facts.push(Fact::new(
            "num_classes",
            [Term::from(id), Term::from(i64::from(self.num_classes))],
        ));
        facts.push(Fact::new(
            "ideal_semester",
            [Term::from(id), Term::from(i64::from(self.ideal_semester))],
        ));
        facts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fact::facts_to_asp;

    #[test]
    fn test_course_id_is_normalized() {
        let course = CourseData::new(" MAC0110 ", 2, 1, false, false).unwrap();
        assert_eq!(course.course_id, "mac0110");
    }

    #[test]
    fn test_rejects_empty_id_and_bad_ranges() {
        assert!(CourseData::new("", 1, 0, false, false).is_err());
        assert!(CourseData::new("mac111", 0, 0, false, false).is_err());
        assert!(CourseData::new("mac111", -1, 0, false, false).is_err());
        assert!(CourseData::new("mac111", 1, -1, false, false).is_err());
    }

    #[test]
    fn test_lowering() {
        let course = CourseData::new("mac111", 3, 0, true, true).unwrap();
        assert_eq!(
            facts_to_asp(&course.to_facts()),
            "is_undergrad(\"mac111\").\n\
             is_double(\"mac111\").\n\
             num_classes(\"mac111\",3).\n\
             ideal_semester(\"mac111\",0).\n"
        );
    }

    #[test]
    fn test_lowering_omits_unset_flags() {
        let course = CourseData::new("mac222", 2, 3, false, false).unwrap();
        let facts = course.to_facts();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].predicate, "num_classes");
    }
}
