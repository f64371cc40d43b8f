//! The place table: every network variable split into a positive and a negative place.
//!
//! A place is the atom "variable `x` is true" (`px`) or "variable `x` is false" (`nx`).
//! Each place owns its defining function in negation normal form. The table is an ordered
//! list of places (`x, -x, y, -y, ...`) with a name index; no regulatory graph is kept,
//! since nothing downstream needs adjacency.


use crate::compiler::CompileError;
use crate::expression::Expression;
use biodivine_lib_param_bn::BooleanNetwork;
use log::debug;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("cannot load network: {0}")]
    Parse(String),
    #[error("duplicate variable `{0}`")]
    DuplicateVariable(String),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// The logic program atom of the place of `variable` with the given polarity.
pub fn atom_name(variable: &str, negated: bool) -> String {
    if negated {
        format!("n{}", variable)
    } else {
        format!("p{}", variable)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Place {
    variable: String,
    negated: bool,
    function: Expression,
}

impl Place {
    pub fn new(variable: &str, negated: bool, function: Expression) -> Place {
        Place {
            variable: variable.to_string(),
            negated,
            function,
        }
    }

    /// Name of the underlying network variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// True if this place stands for "variable is false".
    pub fn is_negation(&self) -> bool {
        self.negated
    }

    pub fn function(&self) -> &Expression {
        &self.function
    }

    /// Place name as used in the network description: `x` or `-x`.
    pub fn name(&self) -> String {
        if self.negated {
            format!("-{}", self.variable)
        } else {
            self.variable.clone()
        }
    }

    pub fn atom(&self) -> String {
        atom_name(&self.variable, self.negated)
    }

    /// A positive place whose function is exactly its own variable.
    fn is_self_referential(&self) -> bool {
        !self.negated && self.function.as_literal() == Some((self.variable.as_str(), false))
    }
}

/// Ordered table of all places of one network.
#[derive(Clone, Debug)]
pub struct PlaceTable {
    places: Vec<Place>,
    index: HashMap<String, usize>,
    sources: Vec<String>,
}

impl PlaceTable {
    /// Build the table from `(variable, update function)` pairs. The function of the
    /// negative place is derived by negating the given function.
    pub fn try_from_functions(
        functions: Vec<(String, Expression)>,
    ) -> Result<PlaceTable, NetworkError> {
        let mut places = Vec::with_capacity(2 * functions.len());
        let mut index = HashMap::new();
        for (variable, function) in functions {
            if index.contains_key(&variable) {
                return Err(NetworkError::DuplicateVariable(variable));
            }
            index.insert(variable.clone(), places.len());
            let negated = function.negate();
            places.push(Place::new(&variable, false, function));
            places.push(Place::new(&variable, true, negated));
        }

        // Source status can only be decided once every place exists.
        let sources = places
            .iter()
            .filter(|place| place.is_self_referential())
            .map(|place| place.variable.clone())
            .collect::<Vec<_>>();

        debug!(
            "Created {} places ({} source variables).",
            places.len(),
            sources.len()
        );

        Ok(PlaceTable {
            places,
            index,
            sources,
        })
    }

    /// Lower all update functions of `network` into places.
    ///
    /// Variables without an explicit update function (implicit parameters) are rejected,
    /// as are functions containing explicit parameters.
    pub fn try_from_network(network: &BooleanNetwork) -> Result<PlaceTable, NetworkError> {
        let mut functions = Vec::with_capacity(network.num_vars());
        for var in network.variables() {
            let name = network.get_variable_name(var).clone();
            let Some(update) = network.get_update_function(var) else {
                return Err(CompileError::MissingFunction { variable: name }.into());
            };
            let function = Expression::try_from_update(network, var, update)?;
            functions.push((name, function));
        }
        Self::try_from_functions(functions)
    }

    /// Load a network in any format supported by [`BooleanNetwork::try_from_file`].
    pub fn try_from_file<T: AsRef<Path>>(path: T) -> Result<PlaceTable, NetworkError> {
        let network = BooleanNetwork::try_from_file(path).map_err(NetworkError::Parse)?;
        Self::try_from_network(&network)
    }

    pub fn try_from_bnet(model: &str) -> Result<PlaceTable, NetworkError> {
        let network = BooleanNetwork::try_from_bnet(model).map_err(NetworkError::Parse)?;
        Self::try_from_network(&network)
    }

    /// All places in the stable enumeration order `x, -x, y, -y, ...`.
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Names of all network variables (i.e. positive places), in order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.places
            .iter()
            .filter(|place| !place.is_negation())
            .map(|place| place.variable())
    }

    /// Variables that are not sources, in order.
    pub fn normal_variables(&self) -> impl Iterator<Item = &str> {
        self.variables().filter(|var| !self.is_source(var))
    }

    /// Source variables, in order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn is_source(&self, variable: &str) -> bool {
        self.sources.iter().any(|it| it == variable)
    }

    pub fn num_vars(&self) -> usize {
        self.index.len()
    }

    /// The positive or negative place of `variable`.
    pub fn find_place(&self, variable: &str, negated: bool) -> Option<&Place> {
        let position = *self.index.get(variable)?;
        self.places.get(position + usize::from(negated))
    }
}
