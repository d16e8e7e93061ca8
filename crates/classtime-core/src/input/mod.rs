//! Validated input entities and the aggregate dataset handed to the
//! solver.
//!
//! Each entity is an immutable record built once from parsed text. All
//! of them lower themselves into solver facts through [`InputRecord`]
//! and expose the index used for duplicate detection at the dataset
//! level.

mod course;
mod curriculum;
mod dataset;
mod schedule;
mod workload;

pub use course::CourseData;
pub use curriculum::CurriculumData;
pub use dataset::{InputDataset, RepairNote};
pub use schedule::TeacherScheduleData;
pub use workload::WorkloadData;

use crate::fact::Fact;

/// Identity of an input record within its entity kind. Records with
/// equal indexes are duplicates.
pub type Index = Vec<String>;

/// An input record that can lower itself into solver facts.
pub trait InputRecord {
    /// Index used for duplicate detection within the record's kind.
    fn index(&self) -> Index;

    /// Pure lowering of the record into ground facts.
    fn to_facts(&self) -> Vec<Fact>;
}
