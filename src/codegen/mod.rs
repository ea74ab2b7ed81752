//! Renders an intermediate tree as JavaScript source.
//!
//! Statements are written line by line into an output buffer; expressions are rendered
//! inline and composed by their parent. The output is a pure function of the tree and
//! the [`RenderOptions`].

use crate::ast::{Expression, Program, Property, Statement};
use crate::compiler::parsing::is_identifier;
use crate::error::RenderError;
use itertools::Itertools;
use serde_json::Value;

/// Every `type` tag a serialized tree may carry.
const KNOWN_KINDS: &[&str] = &[
    "Program",
    "BlockStatement",
    "ExpressionStatement",
    "VariableDeclaration",
    "IfStatement",
    "ForEachStatement",
    "ReturnStatement",
    "AssignmentExpression",
    "AsyncCallExpression",
    "MemberExpression",
    "BinaryExpression",
    "Identifier",
    "Literal",
    "ObjectExpression",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub function_name: String,
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            function_name: "flow".to_string(),
            indent_width: 2,
        }
    }
}

pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders the program as an `async function` declaration.
    pub fn render(&self, program: &Program) -> String {
        let mut out = format!("async function {}() {{\n", self.options.function_name);
        self.statements(&program.body, 1, &mut out);
        out.push_str("}\n");
        out
    }

    /// Renders a tree previously serialized to JSON.
    pub fn render_json(&self, json: &str) -> Result<String, RenderError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| RenderError::MalformedTree(e.to_string()))?;
        check_kinds(&value)?;
        let program: Program =
            serde_json::from_value(value).map_err(|e| RenderError::MalformedTree(e.to_string()))?;
        Ok(self.render(&program))
    }

    fn statements(&self, body: &[Statement], depth: usize, out: &mut String) {
        for stmt in body {
            self.statement(stmt, depth, out);
        }
    }

    fn statement(&self, stmt: &Statement, depth: usize, out: &mut String) {
        let pad = " ".repeat(depth * self.options.indent_width);
        match stmt {
            Statement::Expression { expression } => {
                out.push_str(&format!("{}{};\n", pad, self.expression(expression)));
            }
            Statement::VariableDeclaration { name, init } => {
                out.push_str(&format!("{}const {} = {};\n", pad, name, self.expression(init)));
            }
            Statement::If {
                test,
                consequent,
                alternate,
            } => {
                out.push_str(&format!("{}if ({}) {{\n", pad, self.expression(test)));
                self.statements(&consequent.body, depth + 1, out);
                out.push_str(&format!("{}}} else {{\n", pad));
                self.statements(&alternate.body, depth + 1, out);
                out.push_str(&format!("{}}}\n", pad));
            }
            Statement::ForEach {
                variable,
                iterable,
                body,
            } => {
                out.push_str(&format!(
                    "{}for (let {} of {}) {{\n",
                    pad,
                    variable,
                    self.expression(iterable)
                ));
                self.statements(&body.body, depth + 1, out);
                out.push_str(&format!("{}}}\n", pad));
            }
            Statement::Return { argument } => {
                out.push_str(&format!("{}return {};\n", pad, self.expression(argument)));
            }
        }
    }

    fn expression(&self, expr: &Expression) -> String {
        match expr {
            Expression::Identifier { name } => name.clone(),
            Expression::Literal { value } => value.to_string(),
            Expression::Member { object, property } => match object.as_ref() {
                Expression::AsyncCall { .. }
                | Expression::Binary { .. }
                | Expression::Assignment { .. } => {
                    format!("({}).{}", self.expression(object), property)
                }
                _ => format!("{}.{}", self.expression(object), property),
            },
            Expression::Binary {
                operator,
                left,
                right,
            } => format!(
                "{} {} {}",
                self.expression(left),
                operator,
                self.expression(right)
            ),
            Expression::Assignment { left, right } => {
                format!("{} = {}", self.expression(left), self.expression(right))
            }
            Expression::AsyncCall { callee, arguments } => format!(
                "await {}({})",
                self.expression(callee),
                arguments.iter().map(|arg| self.expression(arg)).join(", ")
            ),
            Expression::Object { properties } if properties.is_empty() => "{}".to_string(),
            Expression::Object { properties } => format!(
                "{{ {} }}",
                properties.iter().map(|p| self.property(p)).join(", ")
            ),
        }
    }

    fn property(&self, property: &Property) -> String {
        let key = if is_identifier(&property.key) {
            property.key.clone()
        } else {
            Value::String(property.key.clone()).to_string()
        };
        format!("{}: {}", key, self.expression(&property.value))
    }
}

/// Rejects any `type` tag the renderer does not know, before deserializing the tree.
fn check_kinds(value: &Value) -> Result<(), RenderError> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(kind)) = map.get("type") {
                if !KNOWN_KINDS.contains(&kind.as_str()) {
                    return Err(RenderError::UnknownNodeKind { kind: kind.clone() });
                }
                // A literal's value is data, not tree.
                if kind == "Literal" {
                    return Ok(());
                }
            }
            map.values().try_for_each(check_kinds)
        }
        Value::Array(items) => items.iter().try_for_each(check_kinds),
        _ => Ok(()),
    }
}
