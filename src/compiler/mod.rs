//! Translation of place functions into logic program statements.
//!
//! Two dual modes are available:
//!
//!  - [`CompilerMode::Conjunctive`]: the target is *derived* from its function. Every
//!    conjunction becomes one rule body, every disjunction becomes several rules with the
//!    same head.
//!  - [`CompilerMode::Disjunctive`]: the target *implies* its function. Heads and bodies swap,
//!    and so do the roles of conjunctions and disjunctions.
//!
//! Auxiliary atoms (`aux_<k>`) are only introduced for non-literal operands of the operator
//! that cannot be expressed by repeating rules (conjunction in conjunctive mode, disjunction
//! in disjunctive mode). The generated program is therefore linear in the size of the
//! expression. The counter `k` is threaded through the calls explicitly, so that auxiliary
//! atoms are unique across the whole program as long as the caller keeps passing the
//! returned counter on.
//!
//! Constants nested inside an operator are folded away instead of being compiled, since
//! `:- aux_k.` for a false disjunct would forbid the whole disjunction.


use crate::expression::Expression;
use crate::network::atom_name;
use crate::program::Statement;
use thiserror::Error;

/// A network function that cannot be turned into clauses.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("update function of `{variable}` contains unsupported node `{node}`")]
    UnsupportedNode { variable: String, node: String },
    #[error("variable `{variable}` has no update function")]
    MissingFunction { variable: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompilerMode {
    Conjunctive,
    Disjunctive,
}

/// Name of the `counter`-th auxiliary atom.
pub fn aux_atom(counter: usize) -> String {
    format!("aux_{}", counter)
}

impl CompilerMode {
    /// Compile `expression` as the definition of `target`, starting with the auxiliary
    /// atom counter at `counter`.
    ///
    /// Returns the emitted statements and the next unused counter value.
    pub fn compile(
        self,
        expression: &Expression,
        target: &str,
        counter: usize,
    ) -> (Vec<Statement>, usize) {
        let mut statements = Vec::new();
        let counter = match self {
            CompilerMode::Conjunctive => {
                compile_conjunctive(expression, target, counter, &mut statements)
            }
            CompilerMode::Disjunctive => {
                compile_disjunctive(expression, target, counter, &mut statements)
            }
        };
        (statements, counter)
    }
}

fn literal_atom(literal: &Expression) -> Option<String> {
    literal
        .as_literal()
        .map(|(name, negated)| atom_name(name, negated))
}

fn compile_constant(value: bool, target: &str, output: &mut Vec<Statement>) {
    if value {
        output.push(Statement::fact(target));
    } else {
        output.push(Statement::Constraint(vec![target.to_string()]));
    }
}

fn compile_conjunctive(
    expression: &Expression,
    target: &str,
    mut counter: usize,
    output: &mut Vec<Statement>,
) -> usize {
    match expression {
        Expression::Literal { name, negated } => {
            output.push(Statement::rule(target, vec![atom_name(name, *negated)]));
        }
        Expression::Constant(value) => compile_constant(*value, target, output),
        Expression::And(children) => {
            if children.contains(&Expression::Constant(false)) {
                // The rule could never fire.
                return counter;
            }
            let mut body = Vec::with_capacity(children.len());
            for child in children {
                if let Some(atom) = literal_atom(child) {
                    body.push(atom);
                } else if child != &Expression::Constant(true) {
                    let aux = aux_atom(counter);
                    counter = compile_conjunctive(child, &aux, counter + 1, output);
                    body.push(aux);
                }
            }
            if body.is_empty() {
                output.push(Statement::fact(target));
            } else {
                output.push(Statement::rule(target, body));
            }
        }
        Expression::Or(children) => {
            for child in children {
                match child {
                    Expression::Constant(true) => output.push(Statement::fact(target)),
                    Expression::Constant(false) => (),
                    _ => {
                        if let Some(atom) = literal_atom(child) {
                            output.push(Statement::rule(target, vec![atom]));
                        } else {
                            counter = compile_conjunctive(child, target, counter, output);
                        }
                    }
                }
            }
        }
    }
    counter
}

fn compile_disjunctive(
    expression: &Expression,
    target: &str,
    mut counter: usize,
    output: &mut Vec<Statement>,
) -> usize {
    match expression {
        Expression::Literal { name, negated } => {
            output.push(Statement::rule(&atom_name(name, *negated), vec![target.to_string()]));
        }
        Expression::Constant(value) => compile_constant(*value, target, output),
        Expression::Or(children) => {
            if children.contains(&Expression::Constant(true)) {
                // The implication is trivially satisfied.
                return counter;
            }
            let mut head = Vec::with_capacity(children.len());
            for child in children {
                if let Some(atom) = literal_atom(child) {
                    head.push(atom);
                } else if child != &Expression::Constant(false) {
                    let aux = aux_atom(counter);
                    counter = compile_disjunctive(child, &aux, counter + 1, output);
                    head.push(aux);
                }
            }
            if head.is_empty() {
                output.push(Statement::Constraint(vec![target.to_string()]));
            } else {
                output.push(Statement::Rule {
                    head,
                    body: vec![target.to_string()],
                });
            }
        }
        Expression::And(children) => {
            for child in children {
                match child {
                    Expression::Constant(false) => {
                        output.push(Statement::Constraint(vec![target.to_string()]))
                    }
                    Expression::Constant(true) => (),
                    _ => {
                        if let Some(atom) = literal_atom(child) {
                            output.push(Statement::rule(&atom, vec![target.to_string()]));
                        } else {
                            counter = compile_disjunctive(child, target, counter, output);
                        }
                    }
                }
            }
        }
    }
    counter
}
