use super::{Block, Expression, Program, Statement};
use std::fmt;

/// A wrapper to display a program as an indented tree.
/// Useful for eyeballing what the tree builder produced before rendering.
pub struct DisplayProgram<'a>(pub &'a Program);

impl fmt::Display for DisplayProgram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program")?;
        fmt_statements(&self.0.body, f, "")
    }
}

fn fmt_statements(statements: &[Statement], f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
    for (i, stmt) in statements.iter().enumerate() {
        fmt_statement(stmt, f, prefix, i + 1 == statements.len())?;
    }
    Ok(())
}

fn branch(prefix: &str, is_last: bool) -> (&'static str, String) {
    let node_marker = if is_last { "└── " } else { "├── " };
    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    (node_marker, child_prefix)
}

fn fmt_statement(
    stmt: &Statement,
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    is_last: bool,
) -> fmt::Result {
    let (marker, child_prefix) = branch(prefix, is_last);
    write!(f, "{}{}", prefix, marker)?;

    match stmt {
        Statement::Expression { expression } => {
            writeln!(f, "ExpressionStatement")?;
            fmt_expression(expression, f, &child_prefix, true, None)?;
        }
        Statement::VariableDeclaration { name, init } => {
            writeln!(f, "VariableDeclaration (const {})", name)?;
            fmt_expression(init, f, &child_prefix, true, None)?;
        }
        Statement::If {
            test,
            consequent,
            alternate,
        } => {
            writeln!(f, "IfStatement")?;
            fmt_expression(test, f, &child_prefix, false, Some("test"))?;
            fmt_block(consequent, f, &child_prefix, false, "consequent")?;
            fmt_block(alternate, f, &child_prefix, true, "alternate")?;
        }
        Statement::ForEach {
            variable,
            iterable,
            body,
        } => {
            writeln!(f, "ForEachStatement ({})", variable)?;
            fmt_expression(iterable, f, &child_prefix, false, Some("of"))?;
            fmt_block(body, f, &child_prefix, true, "body")?;
        }
        Statement::Return { argument } => {
            writeln!(f, "ReturnStatement")?;
            fmt_expression(argument, f, &child_prefix, true, None)?;
        }
    }
    Ok(())
}

fn fmt_block(
    block: &Block,
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    is_last: bool,
    label: &str,
) -> fmt::Result {
    let (marker, child_prefix) = branch(prefix, is_last);
    if block.is_empty() {
        return writeln!(f, "{}{}{}: BlockStatement (empty)", prefix, marker, label);
    }
    writeln!(f, "{}{}{}: BlockStatement", prefix, marker, label)?;
    fmt_statements(&block.body, f, &child_prefix)
}

fn fmt_expression(
    expr: &Expression,
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    is_last: bool,
    label: Option<&str>,
) -> fmt::Result {
    let (marker, child_prefix) = branch(prefix, is_last);
    write!(f, "{}{}", prefix, marker)?;
    if let Some(label) = label {
        write!(f, "{}: ", label)?;
    }

    match expr {
        Expression::Identifier { name } => writeln!(f, "Identifier: {}", name)?,
        Expression::Literal { value } => writeln!(f, "Literal: {}", value)?,
        Expression::Member { object, property } => {
            writeln!(f, "MemberExpression (.{})", property)?;
            fmt_expression(object, f, &child_prefix, true, None)?;
        }
        Expression::Binary {
            operator,
            left,
            right,
        } => {
            writeln!(f, "BinaryExpression ({})", operator)?;
            fmt_expression(left, f, &child_prefix, false, None)?;
            fmt_expression(right, f, &child_prefix, true, None)?;
        }
        Expression::Assignment { left, right } => {
            writeln!(f, "AssignmentExpression (=)")?;
            fmt_expression(left, f, &child_prefix, false, None)?;
            fmt_expression(right, f, &child_prefix, true, None)?;
        }
        Expression::AsyncCall { callee, arguments } => {
            writeln!(f, "AsyncCallExpression")?;
            fmt_expression(callee, f, &child_prefix, arguments.is_empty(), Some("callee"))?;
            for (i, arg) in arguments.iter().enumerate() {
                fmt_expression(arg, f, &child_prefix, i + 1 == arguments.len(), None)?;
            }
        }
        Expression::Object { properties } => {
            writeln!(f, "ObjectExpression")?;
            for (i, prop) in properties.iter().enumerate() {
                fmt_expression(
                    &prop.value,
                    f,
                    &child_prefix,
                    i + 1 == properties.len(),
                    Some(prop.key.as_str()),
                )?;
            }
        }
    }
    Ok(())
}
