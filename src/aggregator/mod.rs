//! Symbolic aggregation of source-encoding witnesses.
//!
//! Witnesses that agree on every normal variable are merged: their source cubes are
//! unioned into one BDD (the *source function* of the key). The number of fixed points is
//! then the sum of model counts of all source functions, computed from the disjoint
//! cover given by the BDD paths (`Bdd::sat_clauses`) without enumerating valuations.
//!
//! ```no_run
//! use biodivine_algo_asp_fixed_points::aggregator::{AggregationConfig, SourceAggregation};
//! use biodivine_algo_asp_fixed_points::decoder::{SourceDecoder, SourceWitness};
//! use biodivine_algo_asp_fixed_points::network::PlaceTable;
//! use computation_process::Algorithm;
//!
//! let places = PlaceTable::try_from_bnet("A, A\nB, A").unwrap();
//! let decoder = SourceDecoder::new(&places);
//! let witnesses: Vec<SourceWitness> = Vec::new(); // Decoded solver witnesses.
//! let config = AggregationConfig::from(&decoder);
//! let aggregate = SourceAggregation::run(config, witnesses).unwrap();
//! println!("{} fixed points", aggregate.count());
//! ```


use crate::decoder::{SourceDecoder, SourceWitness};
use crate::log_function;
use biodivine_lib_bdd::{Bdd, BddVariableSet};
use cancel_this::is_cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, Computation, ComputationStep};
use log::{debug, info};
use num_bigint::BigUint;
use std::collections::BTreeMap;
use std::collections::VecDeque;

/// Aggregate witnesses one by one, see [`AggregationStep`].
pub type SourceAggregation =
    Computation<AggregationConfig, AggregationState, SourceAggregate, AggregationStep>;

/// The symbolic context of the aggregation: one BDD variable per source variable.
#[derive(Clone)]
pub struct AggregationConfig {
    pub variables: BddVariableSet,
}

impl From<&SourceDecoder> for AggregationConfig {
    fn from(value: &SourceDecoder) -> Self {
        AggregationConfig {
            variables: value.variables().clone(),
        }
    }
}

impl From<BddVariableSet> for AggregationConfig {
    fn from(value: BddVariableSet) -> Self {
        AggregationConfig { variables: value }
    }
}

#[derive(Clone)]
pub struct AggregationState {
    pending: VecDeque<SourceWitness>,
    processed: usize,
    functions: BTreeMap<String, Bdd>,
}

impl From<Vec<SourceWitness>> for AggregationState {
    fn from(value: Vec<SourceWitness>) -> Self {
        AggregationState {
            pending: value.into(),
            processed: 0,
            functions: BTreeMap::new(),
        }
    }
}

impl AggregationState {
    /// Number of witnesses merged so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

/// Merges one pending witness per step; completes once no witness is pending.
pub struct AggregationStep;

impl ComputationStep<AggregationConfig, AggregationState, SourceAggregate> for AggregationStep {
    fn step(
        context: &AggregationConfig,
        state: &mut AggregationState,
    ) -> Completable<SourceAggregate> {
        is_cancelled!()?;

        let Some(witness) = state.pending.pop_front() else {
            let aggregate = SourceAggregate::new(&context.variables, state.functions.clone());
            info!(
                "Aggregated {} witnesses into {} keys with {} fixed points.",
                state.processed,
                aggregate.num_keys(),
                aggregate.count()
            );
            return Ok(aggregate);
        };

        let cube = context.variables.mk_conjunctive_clause(&witness.cube);
        let function = state
            .functions
            .entry(witness.key)
            .and_modify(|function| *function = function.or(&cube))
            .or_insert(cube);
        state.processed += 1;

        debug!(
            "[witness:{}] Source function updated to ({}).",
            state.processed,
            log_function(function)
        );

        Err(Suspended)
    }
}

/// Model count of `function`, assuming it ranges over `num_sources` variables.
///
/// Every BDD path fixes a subset of variables; the remaining ones are free, so a path
/// fixing `k` variables contributes `2^(num_sources - k)` valuations. BDD paths are
/// pairwise disjoint, hence the sum is exact.
pub fn count_valuations(function: &Bdd, num_sources: usize) -> BigUint {
    function
        .sat_clauses()
        .map(|clause| BigUint::from(1u8) << (num_sources - clause.to_values().len()))
        .sum()
}

/// The source functions of all keys, together with the total fixed-point count.
#[derive(Clone)]
pub struct SourceAggregate {
    num_sources: usize,
    functions: BTreeMap<String, Bdd>,
    count: BigUint,
}

impl SourceAggregate {
    pub fn new(variables: &BddVariableSet, functions: BTreeMap<String, Bdd>) -> SourceAggregate {
        let num_sources = usize::from(variables.num_vars());
        let count = functions
            .values()
            .map(|function| count_valuations(function, num_sources))
            .sum();
        SourceAggregate {
            num_sources,
            functions,
            count,
        }
    }

    /// Total number of fixed points.
    pub fn count(&self) -> &BigUint {
        &self.count
    }

    pub fn num_sources(&self) -> usize {
        self.num_sources
    }

    pub fn num_keys(&self) -> usize {
        self.functions.len()
    }

    /// Source function of every key (keys are ordered lexicographically).
    pub fn functions(&self) -> &BTreeMap<String, Bdd> {
        &self.functions
    }

    /// Number of fixed points sharing the given key.
    pub fn count_key(&self, key: &str) -> BigUint {
        self.functions
            .get(key)
            .map(|function| count_valuations(function, self.num_sources))
            .unwrap_or_default()
    }
}
