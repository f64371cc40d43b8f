//! The end-to-end fixed-point computation: compile, solve, decode, aggregate.
//!
//! ```no_run
//! use biodivine_algo_asp_fixed_points::fixed_points::{FixedPointConfig, FixedPoints};
//! use biodivine_algo_asp_fixed_points::network::PlaceTable;
//! use biodivine_algo_asp_fixed_points::program::Encoding;
//! use biodivine_algo_asp_fixed_points::solver::Clingo;
//!
//! let places = PlaceTable::try_from_file("model.bnet").unwrap();
//! let config = FixedPointConfig::new(Encoding::Source).with_time_limit(60);
//! let result = FixedPoints::compute(&places, &config, &Clingo::new()).unwrap();
//! println!("{} fixed points", result.count());
//! ```

mod fixed_point_config;


use crate::aggregator::{AggregationConfig, SourceAggregate, SourceAggregation};
use crate::decoder::{DecodeError, FixedPoint, SourceDecoder, decode_fixed_point};
use crate::network::PlaceTable;
use crate::program::{Encoding, LogicProgram};
use crate::simple_type_name;
use crate::solver::{AnswerSetSolver, SolverConfig, SolverError, SolverOutcome, Witness};
use cancel_this::Cancelled;
use computation_process::Algorithm;
use log::{info, warn};
use num_bigint::BigUint;
use thiserror::Error;

pub use fixed_point_config::{FixedPointConfig, InconsistencyPolicy};

#[derive(Debug, Error)]
pub enum FixedPointError {
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("cannot decode witness #{index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: DecodeError,
    },
    #[error("computation cancelled: {0}")]
    Cancelled(Cancelled),
}

/// The fixed points found by [`FixedPoints::compute`].
#[derive(Clone)]
pub enum FixedPointResult {
    /// One fixed point per solver answer (conjunctive and disjunctive encodings).
    Enumerated {
        outcome: SolverOutcome,
        fixed_points: Vec<FixedPoint>,
    },
    /// Fixed points grouped by the values of normal variables (source encoding).
    Aggregated {
        outcome: SolverOutcome,
        witnesses: usize,
        decoder: SourceDecoder,
        aggregate: SourceAggregate,
    },
}

impl FixedPointResult {
    pub fn outcome(&self) -> SolverOutcome {
        match self {
            FixedPointResult::Enumerated { outcome, .. }
            | FixedPointResult::Aggregated { outcome, .. } => *outcome,
        }
    }

    /// The number of fixed points. This is exact only if the outcome is complete.
    pub fn count(&self) -> BigUint {
        match self {
            FixedPointResult::Enumerated { fixed_points, .. } => BigUint::from(fixed_points.len()),
            FixedPointResult::Aggregated { aggregate, .. } => aggregate.count().clone(),
        }
    }
}

/// An "algorithm struct" which computes fixed points through an [`AnswerSetSolver`].
pub struct FixedPoints;

impl FixedPoints {
    /// Compute the fixed points of the network described by `places`.
    ///
    /// An unsatisfiable program is a valid result with zero fixed points.
    pub fn compute<S: AnswerSetSolver>(
        places: &PlaceTable,
        config: &FixedPointConfig,
        solver: &S,
    ) -> Result<FixedPointResult, FixedPointError> {
        info!(
            "Computing fixed points of {} variables ({} sources) using `{}` encoding.",
            places.num_vars(),
            places.sources().len(),
            config.encoding
        );

        let program = LogicProgram::assemble(places, config.encoding);
        let result = solver.solve(&program, &SolverConfig::from(config))?;
        info!(
            "{} returned {} witnesses ({:?}).",
            simple_type_name::<S>(),
            result.witnesses.len(),
            result.outcome
        );

        if config.encoding == Encoding::Source {
            let decoder = SourceDecoder::new(places);
            let decoded = decode_all(&result.witnesses, config.inconsistency, |witness| {
                decoder.decode(witness)
            })?;
            let aggregate = SourceAggregation::run(AggregationConfig::from(&decoder), decoded)
                .map_err(FixedPointError::Cancelled)?;
            Ok(FixedPointResult::Aggregated {
                outcome: result.outcome,
                witnesses: result.witnesses.len(),
                decoder,
                aggregate,
            })
        } else {
            let fixed_points = decode_all(&result.witnesses, config.inconsistency, |witness| {
                decode_fixed_point(places, witness)
            })?;
            Ok(FixedPointResult::Enumerated {
                outcome: result.outcome,
                fixed_points,
            })
        }
    }
}

/// Decode every witness, applying the inconsistency `policy` to the failures.
fn decode_all<T, F>(
    witnesses: &[Witness],
    policy: InconsistencyPolicy,
    decode: F,
) -> Result<Vec<T>, FixedPointError>
where
    F: Fn(&Witness) -> Result<T, DecodeError>,
{
    let mut decoded = Vec::with_capacity(witnesses.len());
    for (index, witness) in witnesses.iter().enumerate() {
        match (decode(witness), policy) {
            (Ok(value), _) => decoded.push(value),
            (Err(source), InconsistencyPolicy::Abort) => {
                return Err(FixedPointError::Decode { index, source });
            }
            (Err(error), InconsistencyPolicy::Skip) => {
                warn!("Skipping witness #{}: {}.", index, error);
            }
        }
    }
    Ok(decoded)
}
