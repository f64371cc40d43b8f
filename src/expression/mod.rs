//! A closed model of Boolean update functions in negation normal form.
//!
//! [`Expression`] is the only input the clause compiler understands. Update functions of
//! a [`BooleanNetwork`](biodivine_lib_param_bn::BooleanNetwork) are converted into it using
//! [`Expression::try_from_update`], which pushes negation down to literals, expands
//! derived operators (`=>`, `<=>`, `^`) and flattens nested conjunctions/disjunctions.

mod lowering;


use std::fmt::{Display, Formatter};

/// A Boolean expression in negation normal form.
///
/// Children of [`Expression::And`] and [`Expression::Or`] are ordered. The order never
/// changes the meaning of the expression, but it determines the naming of auxiliary atoms
/// introduced by the compiler.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    /// A (possibly negated) reference to a network variable.
    Literal { name: String, negated: bool },
    Constant(bool),
    And(Vec<Expression>),
    Or(Vec<Expression>),
}

impl Expression {
    pub fn mk_literal(name: &str, negated: bool) -> Expression {
        Expression::Literal {
            name: name.to_string(),
            negated,
        }
    }

    pub fn mk_var(name: &str) -> Expression {
        Self::mk_literal(name, false)
    }

    pub fn mk_not_var(name: &str) -> Expression {
        Self::mk_literal(name, true)
    }

    /// Create a conjunction of the given `children`.
    ///
    /// Nested conjunctions are merged into the result, `true` operands are dropped and a
    /// `false` operand turns the whole conjunction into `false`. A conjunction with a single
    /// operand is just that operand.
    pub fn mk_and(children: Vec<Expression>) -> Expression {
        Self::mk_operator(children, true)
    }

    /// Create a disjunction of the given `children` (dual of [`Expression::mk_and`]).
    pub fn mk_or(children: Vec<Expression>) -> Expression {
        Self::mk_operator(children, false)
    }

    fn mk_operator(children: Vec<Expression>, is_and: bool) -> Expression {
        // `neutral` is the constant that can be dropped, `!neutral` absorbs everything.
        let neutral = is_and;
        let mut operands = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Expression::Constant(value) if value == neutral => continue,
                Expression::Constant(value) => return Expression::Constant(value),
                Expression::And(nested) if is_and => operands.extend(nested),
                Expression::Or(nested) if !is_and => operands.extend(nested),
                other => operands.push(other),
            }
        }
        match operands.len() {
            0 => Expression::Constant(neutral),
            1 => operands.remove(0),
            _ if is_and => Expression::And(operands),
            _ => Expression::Or(operands),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expression::Literal { .. })
    }

    /// Return the variable name and polarity if this is a literal.
    pub fn as_literal(&self) -> Option<(&str, bool)> {
        match self {
            Expression::Literal { name, negated } => Some((name.as_str(), *negated)),
            _ => None,
        }
    }

    /// Compute the negation normal form of `!self` using De Morgan's laws.
    ///
    /// The child order of the original expression is preserved.
    pub fn negate(&self) -> Expression {
        match self {
            Expression::Literal { name, negated } => Self::mk_literal(name, !negated),
            Expression::Constant(value) => Expression::Constant(!value),
            Expression::And(children) => {
                Expression::Or(children.iter().map(|it| it.negate()).collect())
            }
            Expression::Or(children) => {
                Expression::And(children.iter().map(|it| it.negate()).collect())
            }
        }
    }

    /// Evaluate the expression in the given valuation of variables.
    pub fn evaluate<F: Fn(&str) -> bool>(&self, valuation: &F) -> bool {
        match self {
            Expression::Literal { name, negated } => valuation(name) != *negated,
            Expression::Constant(value) => *value,
            Expression::And(children) => children.iter().all(|it| it.evaluate(valuation)),
            Expression::Or(children) => children.iter().any(|it| it.evaluate(valuation)),
        }
    }

    /// Number of nodes in the expression tree.
    pub fn size(&self) -> usize {
        match self {
            Expression::Literal { .. } | Expression::Constant(_) => 1,
            Expression::And(children) | Expression::Or(children) => {
                1 + children.iter().map(|it| it.size()).sum::<usize>()
            }
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn write_operator(
            f: &mut Formatter<'_>,
            children: &[Expression],
            separator: &str,
        ) -> std::fmt::Result {
            write!(f, "(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", separator)?;
                }
                write!(f, "{}", child)?;
            }
            write!(f, ")")
        }

        match self {
            Expression::Literal { name, negated: false } => write!(f, "{}", name),
            Expression::Literal { name, negated: true } => write!(f, "!{}", name),
            Expression::Constant(value) => write!(f, "{}", u8::from(*value)),
            Expression::And(children) => write_operator(f, children, "&"),
            Expression::Or(children) => write_operator(f, children, "|"),
        }
    }
}
