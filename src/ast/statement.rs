use super::Expression;
use serde::{Deserialize, Serialize};

/// The root of the intermediate tree: the body of the generated async function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Program")]
pub struct Program {
    pub body: Vec<Statement>,
}

/// An ordered statement sequence nested inside a conditional or a loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "BlockStatement")]
pub struct Block {
    pub body: Vec<Statement>,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// A statement node of the intermediate tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    #[serde(rename = "ExpressionStatement")]
    Expression { expression: Expression },
    /// `const <name> = <init>;`
    VariableDeclaration { name: String, init: Expression },
    #[serde(rename = "IfStatement")]
    If {
        test: Expression,
        consequent: Block,
        alternate: Block,
    },
    #[serde(rename = "ForEachStatement")]
    ForEach {
        variable: String,
        iterable: Expression,
        body: Block,
    },
    #[serde(rename = "ReturnStatement")]
    Return { argument: Expression },
}

impl Statement {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Expression { .. } => "ExpressionStatement",
            Statement::VariableDeclaration { .. } => "VariableDeclaration",
            Statement::If { .. } => "IfStatement",
            Statement::ForEach { .. } => "ForEachStatement",
            Statement::Return { .. } => "ReturnStatement",
        }
    }
}

impl Program {
    /// Visits every statement of the tree depth-first, in source order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Statement)) {
        walk_statements(&self.body, visit);
    }

    /// Counts statements anywhere in the tree matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Statement) -> bool) -> usize {
        let mut count = 0;
        self.walk(&mut |stmt| {
            if predicate(stmt) {
                count += 1;
            }
        });
        count
    }
}

fn walk_statements<'a>(statements: &'a [Statement], visit: &mut impl FnMut(&'a Statement)) {
    for stmt in statements {
        visit(stmt);
        match stmt {
            Statement::If {
                consequent,
                alternate,
                ..
            } => {
                walk_statements(&consequent.body, visit);
                walk_statements(&alternate.body, visit);
            }
            Statement::ForEach { body, .. } => walk_statements(&body.body, visit),
            Statement::Expression { .. }
            | Statement::VariableDeclaration { .. }
            | Statement::Return { .. } => {}
        }
    }
}
