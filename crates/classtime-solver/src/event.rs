//! Solve events and the bounded buffer of best candidate solutions.
//!
//! The external solver streams zero or more candidate solutions through
//! a [`SolveEventSink`] before announcing a terminal [`SolveStatus`].
//! Sinks may be called from whatever thread the solver search runs on
//! and must not block it for unbounded time; everything this crate
//! ships as a sink does bounded, in-memory work only.

use classtime_core::fact::Fact;
use classtime_core::output::SolutionView;

/// Terminal outcome of a solver search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The search found at least one model.
    Satisfiable,
    /// The program is proven to have no model.
    Unsatisfiable,
    /// The wall-clock budget expired before the search concluded.
    TimedOut,
    /// The search was cancelled from outside.
    Cancelled,
}

impl SolveStatus {
    pub fn is_satisfiable(self) -> bool {
        matches!(self, SolveStatus::Satisfiable)
    }
}

/// One candidate solution streamed out of the solver.
///
/// `cost` is the solver's optimization vector, ordered most significant
/// first; lexicographically smaller is better.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSolution {
    pub facts: Vec<Fact>,
    pub cost: Vec<i64>,
}

impl CandidateSolution {
    /// Reconstructs the typed view of this solution.
    pub fn view(&self) -> SolutionView {
        SolutionView::from_facts(&self.facts)
    }
}

/// Receiver for solve events.
pub trait SolveEventSink: Send {
    /// Called for every candidate solution the search finds, best last
    /// is not guaranteed.
    fn on_model(&mut self, solution: CandidateSolution);

    /// Called exactly once, after the last `on_model`.
    fn on_finish(&mut self, status: SolveStatus);
}

/// A bounded buffer keeping the best candidate solutions seen so far,
/// ordered best first by lexicographic cost.
///
/// On overflow the worst entry is evicted; among equal-cost entries the
/// oldest goes first.
#[derive(Debug, Clone)]
pub struct BestSolutions {
    capacity: usize,
    solutions: Vec<CandidateSolution>,
}

impl BestSolutions {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            solutions: Vec::new(),
        }
    }

    pub fn push(&mut self, solution: CandidateSolution) {
        let at = self
            .solutions
            .partition_point(|kept| kept.cost < solution.cost);
        self.solutions.insert(at, solution);
        self.solutions.truncate(self.capacity);
    }

    /// Best-first iteration over the kept solutions.
    pub fn iter(&self) -> impl Iterator<Item = &CandidateSolution> {
        self.solutions.iter()
    }

    pub fn best(&self) -> Option<&CandidateSolution> {
        self.solutions.first()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}
