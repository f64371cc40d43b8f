use crate::compiler::CompilerMode;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("unsupported encoding `{0}` (expected `conj`, `disj` or `source`)")]
    Unsupported(String),
}

/// The encoding policy used to build a fixed-point program.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Every place is derived from its function.
    #[default]
    Conjunctive,
    /// Every place implies its function.
    Disjunctive,
    /// Like [`Encoding::Conjunctive`], but source variables are free choices and the
    /// results are aggregated symbolically.
    Source,
}

impl Encoding {
    pub fn compiler_mode(self) -> CompilerMode {
        match self {
            Encoding::Conjunctive | Encoding::Source => CompilerMode::Conjunctive,
            Encoding::Disjunctive => CompilerMode::Disjunctive,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Conjunctive => "conj",
            Encoding::Disjunctive => "disj",
            Encoding::Source => "source",
        }
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "conj" => Ok(Encoding::Conjunctive),
            "disj" => Ok(Encoding::Disjunctive),
            "source" => Ok(Encoding::Source),
            other => Err(EncodingError::Unsupported(other.to_string())),
        }
    }
}
