use crate::program::Encoding;
use crate::solver::SolverConfig;

/// What to do with a witness that cannot be decoded (see
/// [`DecodeError`](crate::decoder::DecodeError)).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InconsistencyPolicy {
    /// Fail the whole computation.
    #[default]
    Abort,
    /// Log the witness and leave it out of the result.
    Skip,
}

/// A configuration object for fixed-point computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedPointConfig {
    /// The encoding of the logic program (default: conjunctive).
    pub encoding: Encoding,
    /// Stop after the given number of solver answers (default: `0`, meaning all).
    ///
    /// Note that with the source encoding, one answer can stand for many fixed points.
    pub max_results: usize,
    /// Time budget of the solver in seconds (default: `0`, meaning unlimited).
    ///
    /// The limit is enforced by the solver. To also bound the rest of the computation,
    /// run it inside `cancel_this::on_timeout`.
    pub time_limit: u64,
    /// Handling of witnesses that do not decode into a coherent state (default: abort).
    pub inconsistency: InconsistencyPolicy,
}

impl Default for FixedPointConfig {
    fn default() -> Self {
        FixedPointConfig::new(Encoding::default())
    }
}

impl From<Encoding> for FixedPointConfig {
    fn from(value: Encoding) -> Self {
        FixedPointConfig::new(value)
    }
}

impl From<&FixedPointConfig> for SolverConfig {
    fn from(value: &FixedPointConfig) -> Self {
        SolverConfig {
            max_results: value.max_results,
            time_limit: value.time_limit,
            encoding: value.encoding,
        }
    }
}

impl FixedPointConfig {
    /// Create a new instance of [`FixedPointConfig`] without any limits.
    pub fn new(encoding: Encoding) -> FixedPointConfig {
        FixedPointConfig {
            encoding,
            max_results: 0,
            time_limit: 0,
            inconsistency: InconsistencyPolicy::default(),
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> FixedPointConfig {
        self.max_results = max_results;
        self
    }

    pub fn with_time_limit(mut self, seconds: u64) -> FixedPointConfig {
        self.time_limit = seconds;
        self
    }

    pub fn with_inconsistency(mut self, policy: InconsistencyPolicy) -> FixedPointConfig {
        self.inconsistency = policy;
        self
    }
}
