//! Membership of courses in the institution's curricula.

use serde::{Deserialize, Serialize};

use super::dataset::Row;
use super::{Index, InputRecord};
use crate::convert;
use crate::error::{RowError, ValidationError};
use crate::fact::{Fact, Term};

/// One (course, curriculum) membership entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumData {
    /// Unique identifier for the course.
    pub course_id: String,
    /// Unique identifier for the curriculum.
    pub curricula_id: String,
    /// Whether the course is required to complete the curriculum.
    pub is_required: bool,
}

impl CurriculumData {
    pub fn new(
        course_id: &str,
        curricula_id: &str,
        is_required: bool,
    ) -> Result<Self, ValidationError> {
        if course_id.is_empty() {
            return Err(ValidationError::new("course_id", "must not be empty"));
        }
        if curricula_id.is_empty() {
            return Err(ValidationError::new("curricula_id", "must not be empty"));
        }
        Ok(Self {
            course_id: course_id.to_string(),
            curricula_id: curricula_id.to_string(),
            is_required,
        })
    }

    pub(crate) fn from_row(row: &Row<'_>) -> Result<Self, RowError> {
        let is_required = convert::boolean(row.get("is_required"))?;
        Ok(Self::new(
            row.required("course_id")?,
            row.required("curricula_id")?,
            is_required,
        )?)
    }
}

impl InputRecord for CurriculumData {
    fn index(&self) -> Index {
        vec![self.course_id.clone(), self.curricula_id.clone()]
    }

    /// Lowers into a `curriculum/3` fact.
    fn to_facts(&self) -> Vec<Fact> {
        vec![Fact::new(
            "curriculum",
            [
                Term::from(self.curricula_id.as_str()),
                Term::from(self.course_id.as_str()),
                Term::from(self.is_required),
            ],
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowering() {
        let entry = CurriculumData::new("mac111", "ai", true).unwrap();
        assert_eq!(
            entry.to_facts()[0].to_string(),
            r#"curriculum("ai","mac111",1)"#
        );
    }

    #[test]
    fn test_empty_ids_are_rejected() {
        assert!(CurriculumData::new("", "ai", false).is_err());
        assert!(CurriculumData::new("mac111", "", false).is_err());
    }

    #[test]
    fn test_index_is_course_and_curriculum() {
        let entry = CurriculumData::new("mac111", "systems", false).unwrap();
        assert_eq!(entry.index(), vec!["mac111", "systems"]);
    }
}
