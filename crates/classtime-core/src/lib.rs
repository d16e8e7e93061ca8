//! Classtime Core - data model and input/output pipeline of the
//! class scheduler
//!
//! This crate provides everything between raw input files and the
//! external solver:
//! - Calendar types (weekdays, teaching periods, timeslots)
//! - Field converters for the free-text input mini-languages
//! - Validated input entities and the aggregate dataset
//! - Lowering of entities into solver facts
//! - Reconstruction of candidate solutions into schedule grids

pub mod convert;
pub mod error;
pub mod fact;
pub mod input;
pub mod model;
pub mod output;

pub use convert::Conventions;
pub use error::{
    DataError, FileTreeError, InconsistentInputError, ParseError, ParsingError, RowError,
    ValidationError,
};
pub use fact::{facts_to_asp, Fact, FactSyntaxError, Term};
pub use input::{
    CourseData, CurriculumData, InputDataset, InputRecord, RepairNote, TeacherScheduleData,
    WorkloadData,
};
pub use model::{full_availability, PartOfDay, Period, ScheduleTimeslot, Weekday};
pub use output::{ClassData, ConflictData, JointedData, ScheduleGrid, SolutionView};
