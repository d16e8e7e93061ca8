//! Classtime - university class timetabling around a black-box ASP
//! solver
//!
//! The umbrella crate ties the workspace together:
//! - re-exports of the core data model, configuration, and solver
//!   boundary
//! - a single [`Error`] with conventional process exit codes
//! - [`logging`] initialization
//! - [`Session`] orchestration: preset → dataset → program → search

pub mod logging;
mod session;

use thiserror::Error as ThisError;

pub use classtime_config::{
    ConfigError, ConstraintSpecification, FileTree, HardConstraint, Preset, SoftConstraint,
    SolverOptions,
};
pub use classtime_core::{
    convert, error, fact, input, model, output, ClassData, ConflictData, Conventions, CourseData,
    CurriculumData, DataError, Fact, InputDataset, JointedData, RepairNote, ScheduleGrid,
    ScheduleTimeslot, SolutionView, TeacherScheduleData, Weekday, WorkloadData,
};
pub use classtime_solver::{
    AspSolver, BestSolutions, CandidateSolution, ProgramBuilder, SolveEventSink, SolveStatus,
    SolverError,
};
pub use session::Session;

/// Conventional exit code for bad user-supplied data (`EX_DATAERR`).
pub const EXIT_DATA_ERROR: i32 = 65;
/// Conventional exit code for an internal failure (`EX_SOFTWARE`).
pub const EXIT_SOFTWARE_ERROR: i32 = 70;
/// Conventional exit code for an operating system failure (`EX_OSERR`).
pub const EXIT_OS_ERROR: i32 = 71;

/// Any fatal error raised by a scheduling run.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    FileTree(error::FileTreeError),
}

impl Error {
    /// Process exit code for this failure: bad input data maps to
    /// `EX_DATAERR`, missing/unreadable files to `EX_OSERR`, backend
    /// failures to `EX_SOFTWARE`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Data(e) if e.is_io() => EXIT_OS_ERROR,
            Error::Data(_) => EXIT_DATA_ERROR,
            Error::Config(ConfigError::ConstraintFile(_)) => EXIT_OS_ERROR,
            Error::Config(_) => EXIT_DATA_ERROR,
            Error::Solver(_) => EXIT_SOFTWARE_ERROR,
            Error::FileTree(_) => EXIT_OS_ERROR,
        }
    }
}
