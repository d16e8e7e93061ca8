//! Classtime Solver - the adapter boundary around the external ASP
//! engine
//!
//! This crate defines the contract between the scheduling core and
//! whatever solver backend executes the search:
//! - [`ProgramBuilder`] assembles the full program text
//! - [`AspSolver`] is the backend trait, driven by [`SolveEventSink`]
//!   callbacks
//! - [`BestSolutions`] buffers the best candidate solutions by cost
//!
//! The engine itself ships separately; anything that can take program
//! text plus [`SolverOptions`](classtime_config::SolverOptions) and
//! stream models back qualifies.

pub mod event;
pub mod program;

use thiserror::Error;

use classtime_config::SolverOptions;

pub use event::{BestSolutions, CandidateSolution, SolveEventSink, SolveStatus};
pub use program::ProgramBuilder;

/// Failure inside the solver backend.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("solver backend error: {0}")]
    Backend(String),
}

/// A solver backend capable of searching a program for models.
///
/// Implementations must call `sink.on_model` zero or more times, then
/// `sink.on_finish` exactly once. The sink may be driven from the
/// backend's own search threads; its methods are bounded and safe to
/// call from any thread.
pub trait AspSolver {
    fn solve(
        &mut self,
        program: &str,
        options: &SolverOptions,
        sink: &mut dyn SolveEventSink,
    ) -> Result<(), SolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use classtime_core::fact::Fact;

    /// Backend that replays a scripted stream of models.
    struct ScriptedSolver {
        models: Vec<CandidateSolution>,
        status: SolveStatus,
    }

    impl AspSolver for ScriptedSolver {
        fn solve(
            &mut self,
            _program: &str,
            _options: &SolverOptions,
            sink: &mut dyn SolveEventSink,
        ) -> Result<(), SolverError> {
            for model in self.models.drain(..) {
                sink.on_model(model);
            }
            sink.on_finish(self.status);
            Ok(())
        }
    }

    struct Recorder {
        best: BestSolutions,
        status: Option<SolveStatus>,
    }

    impl SolveEventSink for Recorder {
        fn on_model(&mut self, solution: CandidateSolution) {
            self.best.push(solution);
        }

        fn on_finish(&mut self, status: SolveStatus) {
            self.status = Some(status);
        }
    }

    #[test]
    fn test_sink_receives_models_then_status() {
        let model = |cost: i64| CandidateSolution {
            facts: vec![Fact::parse(r#"class("mac111","bcc",0,0)"#).unwrap()],
            cost: vec![cost],
        };
        let mut solver = ScriptedSolver {
            models: vec![model(4), model(2), model(7)],
            status: SolveStatus::Satisfiable,
        };

        let mut recorder = Recorder {
            best: BestSolutions::new(2),
            status: None,
        };
        solver
            .solve("", &SolverOptions::default(), &mut recorder)
            .unwrap();

        assert_eq!(recorder.status, Some(SolveStatus::Satisfiable));
        assert_eq!(recorder.best.len(), 2);
        assert_eq!(recorder.best.best().unwrap().cost, [2]);

        // Streamed models reconstruct without waiting for the search.
        let view = recorder.best.best().unwrap().view();
        assert_eq!(view.classes.len(), 1);
    }
}
