//! The expression micro-language used by string-valued node properties.
//!
//! The grammar is a single level of checks applied in a fixed order:
//!
//! 1. `$name` is a variable reference and `$object/property` a member access, as long as
//!    the token carries no operator.
//! 2. `left + right`, split on the first `+`.
//! 3. `left === right`, split on the first `===`.
//! 4. Anything that coerces cleanly to a finite number is a numeric literal.
//! 5. Everything else is an opaque literal, kept verbatim.
//!
//! There is no precedence and no grouping: `a + b === c` is `a + (b === c)` simply
//! because `+` is checked first.

use crate::ast::{BinaryOperator, Expression};
use crate::error::ExpressionError;
use serde_json::Value;

/// Marks a property value as a reference rather than a literal.
pub const SIGIL: char = '$';
const PATH_SEPARATOR: char = '/';

/// Parses a raw property value into an expression.
pub fn parse_expression(value: &Value) -> Result<Expression, ExpressionError> {
    match value {
        Value::String(text) => parse_str(text),
        Value::Number(n) => Ok(Expression::literal(Value::Number(n.clone()))),
        Value::Bool(_) | Value::Null => Ok(Expression::literal(value.clone())),
        Value::Array(_) | Value::Object(_) => Err(unparsable(
            &value.to_string(),
            "expected a string or a number",
        )),
    }
}

/// Parses the left-hand side of an assignment.
///
/// A bare identifier names the variable directly; anything else goes through
/// [`parse_expression`].
pub fn parse_assignment_target(value: &Value) -> Result<Expression, ExpressionError> {
    if let Value::String(text) = value {
        let name = text.trim();
        if !name.starts_with(SIGIL) && is_identifier(name) {
            return Ok(Expression::identifier(name));
        }
    }
    parse_expression(value)
}

/// Parses a micro-language string.
pub fn parse_str(input: &str) -> Result<Expression, ExpressionError> {
    tracing::trace!(input, "parsing expression");

    if let Some(reference) = input.strip_prefix(SIGIL) {
        if !has_operator(reference) {
            return parse_reference(input, reference);
        }
    }

    if let Some((left, right)) = input.split_once(BinaryOperator::Add.symbol()) {
        return parse_binary(input, BinaryOperator::Add, left, right);
    }

    if let Some((left, right)) = input.split_once(BinaryOperator::StrictEqual.symbol()) {
        return parse_binary(input, BinaryOperator::StrictEqual, left, right);
    }

    if let Some(n) = coerce_number(input) {
        return Ok(Expression::number(n));
    }

    Ok(Expression::literal(input))
}

/// Whether `name` is a plain JavaScript identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn has_operator(text: &str) -> bool {
    text.contains(BinaryOperator::Add.symbol()) || text.contains(BinaryOperator::StrictEqual.symbol())
}

fn parse_reference(input: &str, reference: &str) -> Result<Expression, ExpressionError> {
    if reference.is_empty() {
        return Err(unparsable(input, "the reference sigil is not followed by a name"));
    }
    if reference.chars().any(char::is_whitespace) {
        return Err(unparsable(input, "a reference cannot contain whitespace"));
    }

    let mut parts = reference.split(PATH_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, _) => Ok(Expression::identifier(name)),
        (Some(object), Some(property), None) => {
            if object.is_empty() || property.is_empty() {
                return Err(unparsable(input, "a member reference needs both an object and a property"));
            }
            Ok(Expression::member(Expression::identifier(object), property))
        }
        _ => Err(unparsable(input, "only a single '/' separator is supported in a reference")),
    }
}

fn parse_binary(
    input: &str,
    operator: BinaryOperator,
    left: &str,
    right: &str,
) -> Result<Expression, ExpressionError> {
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return Err(unparsable(
            input,
            &format!("the '{}' operator needs an operand on both sides", operator),
        ));
    }
    Ok(Expression::binary(operator, parse_str(left)?, parse_str(right)?))
}

fn coerce_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn unparsable(input: &str, reason: &str) -> ExpressionError {
    ExpressionError::UnparsablePattern {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
