//! The boundary to an external answer set solver.
//!
//! The rest of the crate only sees the [`AnswerSetSolver`] trait, which turns a
//! [`LogicProgram`] into a closed [`SolverOutcome`] and a list of [`Witness`] objects.
//! Process handling and exit codes stay inside the implementations (see [`Clingo`]).

mod clingo;

#[cfg(test)]
mod tests;

use crate::program::{Encoding, LogicProgram};
use std::collections::BTreeSet;
use thiserror::Error;

pub use clingo::Clingo;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("solver I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot start solver `{executable}`: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: std::io::Error,
    },
    #[error("solver terminated with unexpected status {code:?}:\n{diagnostic}")]
    UnexpectedExit {
        code: Option<i32>,
        diagnostic: String,
    },
    #[error("cannot parse solver output: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

/// Limits and heuristics passed to the solver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximal number of answers (default: `0`, meaning all of them).
    pub max_results: usize,
    /// Time budget in seconds, enforced by the solver itself (default: `0`, meaning none).
    pub time_limit: u64,
    /// The encoding of the program. It only affects solver heuristics.
    pub encoding: Encoding,
}

impl SolverConfig {
    pub fn new(encoding: Encoding) -> SolverConfig {
        SolverConfig {
            max_results: 0,
            time_limit: 0,
            encoding,
        }
    }
}

/// How the enumeration ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolverOutcome {
    AllSatEnumerated,
    SatTruncatedByCount,
    SatTruncatedByTime,
    Unsatisfiable,
}

impl SolverOutcome {
    /// True if the returned witnesses are all answers of the program.
    pub fn is_complete(self) -> bool {
        matches!(
            self,
            SolverOutcome::AllSatEnumerated | SolverOutcome::Unsatisfiable
        )
    }
}

/// The set of atoms that are true in one answer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Witness {
    atoms: BTreeSet<String>,
}

impl Witness {
    pub fn contains(&self, atom: &str) -> bool {
        self.atoms.contains(atom)
    }

    pub fn atoms(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|it| it.as_str())
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Witness {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Witness {
            atoms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverResult {
    pub outcome: SolverOutcome,
    pub witnesses: Vec<Witness>,
}

impl SolverResult {
    pub fn unsatisfiable() -> SolverResult {
        SolverResult {
            outcome: SolverOutcome::Unsatisfiable,
            witnesses: Vec::new(),
        }
    }
}

/// An external capability that enumerates the answers of a logic program.
pub trait AnswerSetSolver {
    fn solve(
        &self,
        program: &LogicProgram,
        config: &SolverConfig,
    ) -> Result<SolverResult, SolverError>;
}
