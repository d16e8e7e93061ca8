//! The aggregate input dataset: loading from tabular files,
//! cross-entity validation, and lowering to solver program text.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::path::Path;

use tracing::warn;

use super::{CourseData, CurriculumData, Index, InputRecord, TeacherScheduleData, WorkloadData};
use crate::convert::Conventions;
use crate::error::{
    DataError, FileTreeError, InconsistentInputError, ParsingError, RowError, ValidationError,
};
use crate::fact::{facts_to_asp, Fact};

/// One tabular record paired with its (trimmed) header.
pub(crate) struct Row<'a> {
    headers: &'a [String],
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    /// Value of the named column, or the empty string when the column
    /// is absent. Absent and empty cells are equivalent for every
    /// defaultable field.
    pub(crate) fn get(&self, name: &str) -> &'a str {
        self.headers
            .iter()
            .position(|h| h == name)
            .and_then(|i| self.record.get(i))
            .unwrap_or("")
    }

    /// Value of a column that must exist in the header.
    pub(crate) fn required(&self, name: &'static str) -> Result<&'a str, RowError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .and_then(|i| self.record.get(i))
            .ok_or(RowError::MissingColumn(name))
    }
}

/// Parses an integer cell, reporting the field name on failure.
pub(crate) fn int_field(raw: &str, field: &'static str) -> Result<i64, RowError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::new(field, format!("'{raw}' is not an integer")).into())
}

/// A non-fatal repair applied by [`InputDataset::validate_and_normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairNote {
    /// Teacher for whom a default full-availability schedule was
    /// synthesized.
    pub teacher_id: String,
}

impl fmt::Display for RepairNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no availability information for teacher '{}', assuming full availability",
            self.teacher_id
        )
    }
}

/// The four entity lists required to run the scheduler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputDataset {
    pub courses: Vec<CourseData>,
    pub schedules: Vec<TeacherScheduleData>,
    pub workload: Vec<WorkloadData>,
    pub curriculum: Vec<CurriculumData>,
}

/// Logical input files and the columns their header must carry.
const INPUT_FILES: [(&str, &[&str]); 4] = [
    ("courses", &["course_id", "num_classes", "ideal_semester"]),
    ("schedules", &["teacher_id"]),
    ("workload", &["courses_id", "teachers_id"]),
    ("curriculum", &["course_id", "curricula_id"]),
];

impl InputDataset {
    /// Loads the dataset from the four fixed-name CSV files under
    /// `dir`: `courses.csv`, `schedules.csv`, `workload.csv` and
    /// `curriculum.csv`.
    ///
    /// Every failing row of a file is collected and reported together;
    /// a missing or unreadable file is a [`FileTreeError`]; a header
    /// missing required columns fails before any row is read.
    pub fn from_dir(dir: impl AsRef<Path>, conventions: &Conventions) -> Result<Self, DataError> {
        let dir = dir.as_ref();
        let mut dataset = InputDataset::default();
        for (name, required_columns) in INPUT_FILES {
            let path = dir.join(name).with_extension("csv");
            let file = File::open(&path).map_err(|source| FileTreeError {
                role: "input",
                path: path.clone(),
                source,
            })?;
            let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

            let headers: Vec<String> = reader
                .headers()
                .map_err(|source| DataError::Malformed {
                    file: name.to_string(),
                    source,
                })?
                .iter()
                .map(|h| h.trim().to_string())
                .collect();
            let missing: Vec<&'static str> = required_columns
                .iter()
                .copied()
                .filter(|c| !headers.iter().any(|h| h == c))
                .collect();
            if !missing.is_empty() {
                return Err(DataError::Header {
                    file: name.to_string(),
                    missing,
                });
            }

            let mut errors = Vec::new();
            for (i, record) in reader.records().enumerate() {
                let record = record.map_err(|source| DataError::Malformed {
                    file: name.to_string(),
                    source,
                })?;
                if record.iter().all(|cell| cell.trim().is_empty()) {
                    continue;
                }
                let row = Row {
                    headers: &headers,
                    record: &record,
                };
                let outcome = match name {
                    "courses" => CourseData::from_row(&row).map(|c| dataset.courses.push(c)),
                    "schedules" => TeacherScheduleData::from_row(&row, conventions)
                        .map(|s| dataset.schedules.push(s)),
                    "workload" => WorkloadData::from_row(&row, conventions)
                        .map(|w| dataset.workload.push(w)),
                    _ => CurriculumData::from_row(&row).map(|c| dataset.curriculum.push(c)),
                };
                if let Err(err) = outcome {
                    errors.push((i + 1, err));
                }
            }
            if !errors.is_empty() {
                return Err(ParsingError {
                    file: name.to_string(),
                    errors,
                }
                .into());
            }
        }
        Ok(dataset)
    }

    /// Checks the consistency of the dataset, repairing what can be
    /// repaired.
    ///
    /// Fatal checks run first and are reported together, listing every
    /// offender: duplicate indexes within each entity kind, then
    /// workload references to unknown courses. The only self-healing
    /// step runs last: a workload teacher with no schedule record gets
    /// a synthesized full-availability schedule, and the repair is both
    /// logged and returned.
    pub fn validate_and_normalize(&mut self) -> Result<Vec<RepairNote>, InconsistentInputError> {
        let mut issues = Vec::new();

        let kinds: [(&str, Vec<Index>); 4] = [
            ("courses", self.courses.iter().map(|c| c.index()).collect()),
            ("schedules", self.schedules.iter().map(|s| s.index()).collect()),
            ("workload", self.workload.iter().map(|w| w.index()).collect()),
            ("curriculum", self.curriculum.iter().map(|c| c.index()).collect()),
        ];
        for (kind, indexes) in kinds {
            let mut seen: BTreeMap<Index, usize> = BTreeMap::new();
            for index in indexes {
                *seen.entry(index).or_insert(0) += 1;
            }
            for (index, count) in seen {
                if count > 1 {
                    issues.push(format!(
                        "repeated {kind} index '{}' ({count} occurrences)",
                        index.join("/")
                    ));
                }
            }
        }

        let known_courses: BTreeSet<&str> =
            self.courses.iter().map(|c| c.course_id.as_str()).collect();
        let mut missing_courses = BTreeSet::new();
        for workload in &self.workload {
            for course_id in &workload.courses_id {
                if !known_courses.contains(course_id.as_str()) {
                    missing_courses.insert(course_id.clone());
                }
            }
        }
        for course_id in missing_courses {
            issues.push(format!(
                "workload references course '{course_id}' with no course information"
            ));
        }

        if !issues.is_empty() {
            return Err(InconsistentInputError { issues });
        }

        let mut known_teachers: BTreeSet<String> = self
            .schedules
            .iter()
            .map(|s| s.teacher_id.clone())
            .collect();
        let mut repairs = Vec::new();
        for workload in &self.workload {
            for teacher_id in &workload.teachers_id {
                if known_teachers.insert(teacher_id.clone()) {
                    let note = RepairNote {
                        teacher_id: teacher_id.clone(),
                    };
                    warn!("{note}");
                    repairs.push(note);
                }
            }
        }
        for note in &repairs {
            self.schedules
                .push(TeacherScheduleData::unrestricted(&note.teacher_id));
        }
        Ok(repairs)
    }

    /// Lowers every entity into facts, in input order: courses,
    /// schedules, workload, curriculum.
    pub fn to_facts(&self) -> Vec<Fact> {
        let records = self
            .courses
            .iter()
            .map(|c| c as &dyn InputRecord)
            .chain(self.schedules.iter().map(|s| s as &dyn InputRecord))
            .chain(self.workload.iter().map(|w| w as &dyn InputRecord))
            .chain(self.curriculum.iter().map(|c| c as &dyn InputRecord));
        records.flat_map(|record| record.to_facts()).collect()
    }

    /// Renders the dataset as solver program text.
    pub fn to_asp(&self) -> String {
        facts_to_asp(&self.to_facts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::full_availability;
    use std::io::Write;

    fn write_inputs(dir: &Path, files: &[(&str, &str)]) {
        for (name, contents) in files {
            let mut file = File::create(dir.join(name).with_extension("csv")).unwrap();
            write!(file, "{contents}").unwrap();
        }
    }

    fn default_files() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                "courses",
                "course_id,num_classes,ideal_semester,is_undergrad,is_double\n\
                 mac111,3,0,y,sim\n\
                 mac222,2,3,,não\n",
            ),
            (
                "schedules",
                "teacher_id,preferred,unavailable\n\
                 profX,mon 10:00;ter 8:00,wed 10:00-16:00\n",
            ),
            (
                "workload",
                "courses_id,course_name,offering_group,fixed_classes,teachers_id\n\
                 mac111;mac222,Computer science intro,ime,mon 8:00; wed 14:00,profA@ime.usp.br;profB@google.com\n",
            ),
            (
                "curriculum",
                "course_id,curricula_id,is_required\n\
                 mac111,systems,não\n\
                 mac111,ai,sim\n",
            ),
        ]
    }

    #[test]
    fn test_from_dir_parses_all_files() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path(), &default_files());

        let dataset = InputDataset::from_dir(dir.path(), &Conventions::default()).unwrap();
        assert_eq!(dataset.courses.len(), 2);
        assert_eq!(dataset.schedules.len(), 1);
        assert_eq!(dataset.workload.len(), 1);
        assert_eq!(dataset.curriculum.len(), 2);

        let course = &dataset.courses[0];
        assert_eq!(course.course_id, "mac111");
        assert_eq!(course.num_classes, 3);
        assert_eq!(course.ideal_semester, 0);
        assert!(course.is_undergrad);
        assert!(course.is_double);
    }

    #[test]
    fn test_missing_file_is_a_file_tree_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = InputDataset::from_dir(dir.path(), &Conventions::default()).unwrap_err();
        assert!(matches!(err, DataError::FileTree(_)));
        assert!(err.is_io());
    }

    #[test]
    fn test_header_mismatch_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = default_files();
        files[0] = ("courses", "id,classes\nmac111,3\n");
        write_inputs(dir.path(), &files);

        let err = InputDataset::from_dir(dir.path(), &Conventions::default()).unwrap_err();
        match err {
            DataError::Header { file, missing } => {
                assert_eq!(file, "courses");
                assert_eq!(
                    missing,
                    vec!["course_id", "num_classes", "ideal_semester"]
                );
            }
            other => panic!("expected header error, got {other:?}"),
        }
    }

    #[test]
    fn test_every_failing_row_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = default_files();
        files[0] = (
            "courses",
            "course_id,num_classes,ideal_semester\n\
             mac111,0,0\n\
             mac222,2,1\n\
             ,1,0\n",
        );
        write_inputs(dir.path(), &files);

        let err = InputDataset::from_dir(dir.path(), &Conventions::default()).unwrap_err();
        match err {
            DataError::Parsing(parsing) => {
                assert_eq!(parsing.file, "courses");
                let rows: Vec<usize> = parsing.errors.iter().map(|(row, _)| *row).collect();
                assert_eq!(rows, vec![1, 3]);
            }
            other => panic!("expected parsing error, got {other:?}"),
        }
    }

    fn small_dataset() -> InputDataset {
        let conventions = Conventions::default();
        InputDataset {
            courses: vec![
                CourseData::new("mac111", 2, 1, true, false).unwrap(),
                CourseData::new("mac222", 2, 1, true, false).unwrap(),
            ],
            schedules: vec![],
            workload: vec![WorkloadData::new(
                "mac111;mac222",
                "profZ",
                "",
                "",
                "",
                "",
                &conventions,
            )
            .unwrap()],
            curriculum: vec![],
        }
    }

    #[test]
    fn test_duplicate_indexes_are_all_listed() {
        let mut dataset = small_dataset();
        dataset
            .courses
            .push(CourseData::new("mac111", 1, 0, false, false).unwrap());
        dataset
            .curriculum
            .push(CurriculumData::new("mac111", "ai", true).unwrap());
        dataset
            .curriculum
            .push(CurriculumData::new("mac111", "ai", false).unwrap());

        let err = dataset.validate_and_normalize().unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert!(err.issues[0].contains("courses index 'mac111'"));
        assert!(err.issues[1].contains("curriculum index 'mac111/ai'"));
    }

    #[test]
    fn test_missing_course_reference_is_fatal() {
        let mut dataset = small_dataset();
        dataset.courses.remove(1);

        let err = dataset.validate_and_normalize().unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.issues[0].contains("'mac222'"));
    }

    #[test]
    fn test_missing_teacher_schedule_is_repaired() {
        let mut dataset = small_dataset();
        let repairs = dataset.validate_and_normalize().unwrap();

        assert_eq!(
            repairs,
            vec![RepairNote {
                teacher_id: "profZ".to_string()
            }]
        );
        assert_eq!(dataset.schedules.len(), 1);
        let synthesized = &dataset.schedules[0];
        assert_eq!(synthesized.teacher_id, "profZ");
        assert!(synthesized.preferred.is_empty());
        assert!(synthesized.unavailable.is_empty());

        // The synthesized schedule lowers to full availability.
        let available = synthesized
            .to_facts()
            .iter()
            .filter(|f| f.predicate == "available")
            .count();
        assert_eq!(available, full_availability().len());

        // Re-validation performs no further repair.
        assert!(dataset.validate_and_normalize().unwrap().is_empty());
    }

    #[test]
    fn test_lowering_round_trips_through_fact_parser() {
        let mut dataset = small_dataset();
        dataset.validate_and_normalize().unwrap();

        for line in dataset.to_asp().lines() {
            let fact = Fact::parse(line).unwrap();
            assert!(!fact.predicate.is_empty());
        }
    }
}
