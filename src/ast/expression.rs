use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// An expression node of the intermediate tree.
///
/// Expressions render inline; the parent statement adds any punctuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier {
        name: String,
    },
    /// A numeric or opaque literal. Numbers come from clean numeric coercion; any other
    /// value is kept as written, with no quoting decision made at parse time.
    Literal {
        value: Value,
    },
    #[serde(rename = "MemberExpression")]
    Member {
        object: Box<Expression>,
        property: String,
    },
    #[serde(rename = "BinaryExpression")]
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    #[serde(rename = "AssignmentExpression")]
    Assignment {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// `await <callee>(<arguments>)`.
    #[serde(rename = "AsyncCallExpression")]
    AsyncCall {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    #[serde(rename = "ObjectExpression")]
    Object { properties: Vec<Property> },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier { name: name.into() }
    }

    pub fn member(object: Expression, property: impl Into<String>) -> Self {
        Expression::Member {
            object: Box::new(object),
            property: property.into(),
        }
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assignment(left: Expression, right: Expression) -> Self {
        Expression::Assignment {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// A numeric literal. Integral values are stored as integers so they print without
    /// a fractional part.
    pub fn number(n: f64) -> Self {
        let number = if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            Number::from(n as i64)
        } else {
            // Callers only pass finite values, for which `from_f64` always succeeds.
            Number::from_f64(n).unwrap_or_else(|| Number::from(0))
        };
        Expression::Literal {
            value: Value::Number(number),
        }
    }

    /// An opaque literal holding `value` exactly as given.
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal {
            value: value.into(),
        }
    }

    /// Short node-type label, matching the serialized `type` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Identifier { .. } => "Identifier",
            Expression::Literal { .. } => "Literal",
            Expression::Member { .. } => "MemberExpression",
            Expression::Binary { .. } => "BinaryExpression",
            Expression::Assignment { .. } => "AssignmentExpression",
            Expression::AsyncCall { .. } => "AsyncCallExpression",
            Expression::Object { .. } => "ObjectExpression",
        }
    }
}

/// The operators of the micro-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "===")]
    StrictEqual,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::StrictEqual => "===",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A `key: value` entry of an object expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: Expression,
}
