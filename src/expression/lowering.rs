use crate::compiler::CompileError;
use crate::expression::Expression;
use biodivine_lib_param_bn::{BinaryOp, BooleanNetwork, FnUpdate, VariableId};

impl Expression {
    /// Convert the update `function` of `variable` into an [`Expression`] in negation
    /// normal form.
    ///
    /// Returns [`CompileError::UnsupportedNode`] when the function contains an uninterpreted
    /// parameter, since such a node has no fixed Boolean meaning.
    pub fn try_from_update(
        network: &BooleanNetwork,
        variable: VariableId,
        function: &FnUpdate,
    ) -> Result<Expression, CompileError> {
        lower(network, variable, function, false)
    }
}

/// Lower `function` into NNF. If `negated` is set, the result represents `!function`.
fn lower(
    network: &BooleanNetwork,
    variable: VariableId,
    function: &FnUpdate,
    negated: bool,
) -> Result<Expression, CompileError> {
    match function {
        FnUpdate::Const(value) => Ok(Expression::Constant(*value != negated)),
        FnUpdate::Var(id) => Ok(Expression::mk_literal(
            network.get_variable_name(*id),
            negated,
        )),
        FnUpdate::Not(inner) => lower(network, variable, inner, !negated),
        FnUpdate::Param(..) => Err(CompileError::UnsupportedNode {
            variable: network.get_variable_name(variable).clone(),
            node: function.to_string(network),
        }),
        FnUpdate::Binary(op, left, right) => {
            let (left, right) = (left.as_ref(), right.as_ref());
            let operand =
                |f: &FnUpdate, negated: bool| lower(network, variable, f, negated);
            let result = match (op, negated) {
                (BinaryOp::And, false) | (BinaryOp::Or, true) => {
                    Expression::mk_and(vec![operand(left, negated)?, operand(right, negated)?])
                }
                (BinaryOp::Or, false) | (BinaryOp::And, true) => {
                    Expression::mk_or(vec![operand(left, negated)?, operand(right, negated)?])
                }
                (BinaryOp::Imp, false) => {
                    Expression::mk_or(vec![operand(left, true)?, operand(right, false)?])
                }
                (BinaryOp::Imp, true) => {
                    Expression::mk_and(vec![operand(left, false)?, operand(right, true)?])
                }
                // `l <=> r` and `!(l ^ r)`
                (BinaryOp::Iff, false) | (BinaryOp::Xor, true) => Expression::mk_or(vec![
                    Expression::mk_and(vec![operand(left, false)?, operand(right, false)?]),
                    Expression::mk_and(vec![operand(left, true)?, operand(right, true)?]),
                ]),
                // `l ^ r` and `!(l <=> r)`
                (BinaryOp::Xor, false) | (BinaryOp::Iff, true) => Expression::mk_or(vec![
                    Expression::mk_and(vec![operand(left, false)?, operand(right, true)?]),
                    Expression::mk_and(vec![operand(left, true)?, operand(right, false)?]),
                ]),
            };
            Ok(result)
        }
    }
}
