//! End-to-end orchestration of one scheduling run.
//!
//! A [`Session`] loads the preset and the input dataset from a
//! [`FileTree`], validates and repairs the data, assembles the full
//! program text, and drives a solver backend, buffering the best
//! candidate solutions as they stream in.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use classtime_config::{FileTree, Preset};
use classtime_core::error::FileTreeError;
use classtime_core::input::{InputDataset, RepairNote};
use classtime_core::Conventions;
use classtime_solver::{
    AspSolver, BestSolutions, CandidateSolution, ProgramBuilder, SolveEventSink, SolveStatus,
    SolverError,
};

use crate::Error;

/// One prepared scheduling run.
#[derive(Debug)]
pub struct Session {
    preset: Preset,
    dataset: InputDataset,
    repairs: Vec<RepairNote>,
    program: String,
}

impl Session {
    /// Prepares a run: loads the input dataset from the tree, validates
    /// and repairs it, and assembles the program text.
    pub fn open(
        tree: &FileTree,
        preset: Preset,
        conventions: &Conventions,
    ) -> Result<Self, Error> {
        preset.log_summary();

        let mut dataset = InputDataset::from_dir(tree.inputs_dir(), conventions)?;
        let repairs = dataset
            .validate_and_normalize()
            .map_err(classtime_core::DataError::from)?;

        let program = ProgramBuilder::new()
            .inputs(dataset.to_asp())
            .base_model(tree)?
            .constraints(&preset.constraints, tree)?
            .build();

        Ok(Self {
            preset,
            dataset,
            repairs,
            program,
        })
    }

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    pub fn dataset(&self) -> &InputDataset {
        &self.dataset
    }

    /// Repairs applied while normalizing the dataset.
    pub fn repairs(&self) -> &[RepairNote] {
        &self.repairs
    }

    /// The assembled program text.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Writes the assembled program to a file.
    pub fn save_program(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        fs::write(path, &self.program).map_err(|source| {
            Error::FileTree(FileTreeError {
                role: "program dump",
                path: path.to_path_buf(),
                source,
            })
        })
    }

    /// Runs the backend over the assembled program, keeping the best
    /// `num_models` candidate solutions.
    pub fn solve(
        &self,
        solver: &mut dyn AspSolver,
    ) -> Result<(BestSolutions, SolveStatus), Error> {
        let mut sink = SessionSink {
            best: BestSolutions::new(self.preset.options.num_models as usize),
            status: None,
        };
        solver.solve(&self.program, &self.preset.options, &mut sink)?;

        let status = sink.status.ok_or_else(|| {
            SolverError::Backend("search finished without reporting a status".into())
        })?;
        Ok((sink.best, status))
    }
}

struct SessionSink {
    best: BestSolutions,
    status: Option<SolveStatus>,
}

impl SolveEventSink for SessionSink {
    fn on_model(&mut self, solution: CandidateSolution) {
        info!("current optimization: {:?}", solution.cost);
        self.best.push(solution);
    }

    fn on_finish(&mut self, status: SolveStatus) {
        match status {
            SolveStatus::Satisfiable => info!("solving status: {status:?}"),
            _ => warn!("solving status: {status:?}"),
        }
        self.status = Some(status);
    }
}
