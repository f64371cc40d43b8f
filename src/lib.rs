//! Fixed points of Boolean networks computed through answer set programming.
//!
//! The network is split into places (see [`network`]), every place function is compiled
//! into logic program rules (see [`compiler`] and [`program`]), an external solver
//! enumerates the answers (see [`solver`]) and the answers are decoded back into fixed
//! points (see [`decoder`]). With the source encoding, fixed points that only differ in
//! the values of source variables are aggregated symbolically (see [`aggregator`]).
//!
//! [`fixed_points::FixedPoints`] connects all of these steps.

use biodivine_lib_bdd::Bdd;

#[cfg(test)]
mod test_utils;

pub mod aggregator;
pub mod compiler;
pub mod decoder;
pub mod expression;
pub mod fixed_points;
pub mod network;
pub mod program;
pub mod solver;

/// A utility method for printing useful metadata of source functions.
fn log_function(function: &Bdd) -> String {
    format!(
        "valuations={}; BDD nodes={}",
        function.exact_cardinality(),
        function.size()
    )
}

/// Extract the "simple name" of a type argument at compile time.
///
/// In the future, this should be a `const fn`, but `type_name` and `unwrap_or` are not
/// yet stabilized as `const` functions (even thought they probably are).
fn simple_type_name<T>() -> &'static str {
    std::any::type_name::<T>().split("::").last().unwrap_or("?")
}
