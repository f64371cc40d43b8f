//! Decoding of solver witnesses back into network states.


use crate::network::{PlaceTable, atom_name};
use crate::solver::Witness;
use biodivine_lib_bdd::{BddPartialValuation, BddVariable, BddVariableSet};
use log::trace;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A witness that does not describe a coherent network state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("witness assigns no value to `{0}`")]
    MissingPlace(String),
    #[error("witness assigns both values to `{0}`")]
    ContradictoryPlace(String),
}

/// The value of one variable as seen in a witness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaceValue {
    True,
    False,
    /// Neither polarity is present.
    Unset,
    /// Both polarities are present.
    Conflict,
}

impl PlaceValue {
    pub fn of(witness: &Witness, variable: &str) -> PlaceValue {
        let positive = witness.contains(&atom_name(variable, false));
        let negative = witness.contains(&atom_name(variable, true));
        match (positive, negative) {
            (true, false) => PlaceValue::True,
            (false, true) => PlaceValue::False,
            (false, false) => PlaceValue::Unset,
            (true, true) => PlaceValue::Conflict,
        }
    }

    /// Convert to a Boolean value, reporting unset and conflicting values as errors.
    pub fn try_as_bool(self, variable: &str) -> Result<bool, DecodeError> {
        match self {
            PlaceValue::True => Ok(true),
            PlaceValue::False => Ok(false),
            PlaceValue::Unset => Err(DecodeError::MissingPlace(variable.to_string())),
            PlaceValue::Conflict => Err(DecodeError::ContradictoryPlace(variable.to_string())),
        }
    }
}

/// A full assignment of network variables, in place order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    values: Vec<(String, bool)>,
}

impl FixedPoint {
    pub fn new(values: Vec<(String, bool)>) -> FixedPoint {
        FixedPoint { values }
    }

    pub fn get(&self, variable: &str) -> Option<bool> {
        self.values
            .iter()
            .find(|(name, _)| name == variable)
            .map(|(_, value)| *value)
    }

    pub fn values(&self) -> &[(String, bool)] {
        &self.values
    }
}

impl Display for FixedPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {}", name, u8::from(*value))?;
        }
        Ok(())
    }
}

/// Decode a witness into a value of every network variable.
pub fn decode_fixed_point(places: &PlaceTable, witness: &Witness) -> Result<FixedPoint, DecodeError> {
    let values = places
        .variables()
        .map(|var| {
            let value = PlaceValue::of(witness, var).try_as_bool(var)?;
            Ok((var.to_string(), value))
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;
    Ok(FixedPoint::new(values))
}

/// A witness of the source encoding, split into the values of normal variables (the `key`)
/// and the constraints on source variables (the `cube`).
#[derive(Clone)]
pub struct SourceWitness {
    /// One `0`/`1` character per normal variable, in place order.
    pub key: String,
    pub cube: BddPartialValuation,
}

/// Decodes witnesses of the source encoding.
///
/// Each source variable is represented by one BDD variable of the same name.
#[derive(Clone)]
pub struct SourceDecoder {
    normal: Vec<String>,
    sources: Vec<(String, BddVariable)>,
    variables: BddVariableSet,
}

impl SourceDecoder {
    pub fn new(places: &PlaceTable) -> SourceDecoder {
        let names = places
            .sources()
            .iter()
            .map(|it| it.as_str())
            .collect::<Vec<_>>();
        let variables = BddVariableSet::new(&names);
        let sources = places
            .sources()
            .iter()
            .cloned()
            .zip(variables.variables())
            .collect();
        SourceDecoder {
            normal: places.normal_variables().map(|it| it.to_string()).collect(),
            sources,
            variables,
        }
    }

    /// The BDD variables of all source variables.
    pub fn variables(&self) -> &BddVariableSet {
        &self.variables
    }

    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    /// Decode a single witness.
    ///
    /// Every normal variable must have exactly one value. A source variable is only
    /// constrained if exactly one of its atoms is present; otherwise it is a don't-care.
    pub fn decode(&self, witness: &Witness) -> Result<SourceWitness, DecodeError> {
        let mut key = String::with_capacity(self.normal.len());
        for var in &self.normal {
            let value = PlaceValue::of(witness, var).try_as_bool(var)?;
            key.push(if value { '1' } else { '0' });
        }

        let mut cube = Vec::new();
        for (name, bdd_var) in &self.sources {
            match PlaceValue::of(witness, name) {
                PlaceValue::True => cube.push((*bdd_var, true)),
                PlaceValue::False => cube.push((*bdd_var, false)),
                PlaceValue::Unset => {}
                PlaceValue::Conflict => {
                    trace!("Source `{}` has both values; treated as don't-care.", name);
                }
            }
        }

        Ok(SourceWitness {
            key,
            cube: BddPartialValuation::from_values(&cube),
        })
    }

    /// Translate a key back into named values of normal variables.
    pub fn key_values(&self, key: &str) -> Vec<(String, bool)> {
        self.normal
            .iter()
            .cloned()
            .zip(key.chars().map(|it| it == '1'))
            .collect()
    }

    /// Translate a source cube into named values (unlisted sources are don't-cares).
    pub fn cube_values(&self, cube: &BddPartialValuation) -> Vec<(String, bool)> {
        self.sources
            .iter()
            .filter_map(|(name, var)| cube.get_value(*var).map(|value| (name.clone(), value)))
            .collect()
    }

    /// Render a source cube as `'C': 1, 'D': *`, listing every source variable.
    pub fn format_cube(&self, cube: &BddPartialValuation) -> String {
        self.sources
            .iter()
            .map(|(name, var)| match cube.get_value(*var) {
                Some(value) => format!("'{}': {}", name, u8::from(value)),
                None => format!("'{}': *", name),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
