use super::parsing::{SIGIL, is_identifier, parse_assignment_target, parse_expression};
use super::{CompilerOptions, ConditionalPlacement};
use crate::ast::{Block, Expression, Program, Property, Statement};
use crate::error::{ExpressionError, FlowError, GraphError};
use crate::flow::{FlowGraph, FlowNode, HttpParam, NodeKind};
use ahash::AHashSet;
use serde_json::Value;

/// Handle to the statement container that receives newly produced statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlockId(usize);

impl BlockId {
    const ROOT: BlockId = BlockId(0);
}

/// A statement under construction. Nested blocks are referenced by handle until the
/// traversal finishes and the tree is assembled.
enum Slot {
    Done(Statement),
    If {
        test: Expression,
        consequent: BlockId,
        alternate: BlockId,
    },
    ForEach {
        variable: String,
        iterable: Expression,
        body: BlockId,
    },
}

/// Whether the walk continues along a node's unconditioned outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Follow,
    /// Loop children are compiled as single nodes.
    Stop,
}

/// Builds the intermediate tree from a [`FlowGraph`] in a single depth-first pass.
pub(super) struct TreeBuilder<'a> {
    graph: &'a FlowGraph,
    options: &'a CompilerOptions,
    blocks: Vec<Vec<Slot>>,
    /// Nodes on the current traversal path.
    active: AHashSet<&'a str>,
    returned: bool,
}

impl<'a> TreeBuilder<'a> {
    pub(super) fn new(graph: &'a FlowGraph, options: &'a CompilerOptions) -> Self {
        Self {
            graph,
            options,
            blocks: vec![Vec::new()],
            active: AHashSet::new(),
            returned: false,
        }
    }

    pub(super) fn build(mut self) -> Result<Program, FlowError> {
        let graph = self.graph;
        let start = graph.start()?;
        tracing::debug!(start = %start.id, "building tree");
        self.visit(&start.id, &start.id, BlockId::ROOT, Continuation::Follow)?;
        Ok(Program {
            body: self.assemble(BlockId::ROOT),
        })
    }

    fn visit(
        &mut self,
        node_id: &'a str,
        entered_from: &'a str,
        target: BlockId,
        continuation: Continuation,
    ) -> Result<(), FlowError> {
        let graph = self.graph;
        let node = graph.node(node_id, entered_from)?;
        if !self.active.insert(node.id.as_str()) {
            return Err(GraphError::CyclicGraph {
                node_id: node.id.clone(),
                entered_from: entered_from.to_string(),
            }
            .into());
        }
        let result = self.lower(node, target, continuation);
        self.active.remove(node.id.as_str());
        result
    }

    fn lower(
        &mut self,
        node: &'a FlowNode,
        target: BlockId,
        continuation: Continuation,
    ) -> Result<(), FlowError> {
        tracing::debug!(node_id = %node.id, kind = node.kind.as_str(), "lowering node");

        match node.kind {
            NodeKind::Start => {}
            NodeKind::SetVariable => {
                let key = self.required(node, &["key"])?;
                let left = parse_assignment_target(key).map_err(|e| expression_error(node, "key", e))?;
                let right = self.expression(node, &["value"])?;
                self.push(
                    target,
                    Slot::Done(Statement::Expression {
                        expression: Expression::assignment(left, right),
                    }),
                );
            }
            NodeKind::If => return self.lower_if(node, target),
            NodeKind::HttpCall => {
                let declaration = self.http_call(node)?;
                self.push(target, Slot::Done(declaration));
            }
            NodeKind::Loop => self.lower_loop(node, target)?,
            NodeKind::End => return self.lower_end(node),
        }

        if continuation == Continuation::Follow {
            let graph = self.graph;
            if let Some(edge) = graph.next(&node.id) {
                self.visit(&edge.target, &node.id, target, Continuation::Follow)?;
            }
        }
        Ok(())
    }

    fn lower_if(&mut self, node: &'a FlowNode, target: BlockId) -> Result<(), FlowError> {
        let test = self.expression(node, &["expression"])?;
        let consequent = self.new_block();
        let alternate = self.new_block();
        let placement = match self.options.conditional_placement {
            ConditionalPlacement::Nested => target,
            ConditionalPlacement::Hoisted => BlockId::ROOT,
        };
        self.push(
            placement,
            Slot::If {
                test,
                consequent,
                alternate,
            },
        );

        let graph = self.graph;
        for (flag, block) in [(true, consequent), (false, alternate)] {
            match graph.branch(&node.id, flag) {
                Some(edge) => self.visit(&edge.target, &node.id, block, Continuation::Follow)?,
                None => tracing::debug!(node_id = %node.id, branch = flag, "branch has no outgoing edge"),
            }
        }
        Ok(())
    }

    fn lower_loop(&mut self, node: &'a FlowNode, target: BlockId) -> Result<(), FlowError> {
        let iterable = self.expression(node, &["loopArray"])?;
        let variable = self.binding_name(node, &["currentItemName", "currentItem"])?;
        let body = self.new_block();
        self.push(
            target,
            Slot::ForEach {
                variable,
                iterable,
                body,
            },
        );

        for child in &node.children {
            self.visit(child, &node.id, body, Continuation::Stop)?;
        }
        Ok(())
    }

    fn lower_end(&mut self, node: &'a FlowNode) -> Result<(), FlowError> {
        if self.returned {
            tracing::debug!(node_id = %node.id, "return already emitted, skipping end node");
            return Ok(());
        }
        let argument = self.expression(node, &["output"])?;
        self.push(BlockId::ROOT, Slot::Done(Statement::Return { argument }));
        self.returned = true;
        Ok(())
    }

    /// `const <saveAs> = (await <client>.<method>(<url>, { <params> })).data;`
    fn http_call(&self, node: &'a FlowNode) -> Result<Statement, FlowError> {
        let url = Expression::literal(self.required(node, &["url"])?.clone());

        let method = match node.property(&["method"]) {
            None | Some(Value::Null) => "get",
            Some(Value::String(method)) if is_identifier(method.trim()) => method.trim(),
            Some(other) => {
                return Err(expression_error(
                    node,
                    "method",
                    invalid(other, "the HTTP method must be a plain identifier"),
                ));
            }
        };

        let params: Vec<HttpParam> = match node.property(&["params"]) {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => serde_json::from_value(raw.clone()).map_err(|_| {
                expression_error(
                    node,
                    "params",
                    invalid(raw, "expected a list of {key, value} entries"),
                )
            })?,
        };
        let properties = params
            .into_iter()
            .map(|param| -> Result<Property, FlowError> {
                let value = parse_expression(&param.value)
                    .map_err(|e| expression_error(node, &format!("params.{}", param.key), e))?;
                Ok(Property {
                    key: param.key,
                    value,
                })
            })
            .collect::<Result<Vec<_>, FlowError>>()?;

        let callee = Expression::member(Expression::identifier(&self.options.http_client), method);
        let call = Expression::AsyncCall {
            callee: Box::new(callee),
            arguments: vec![url, Expression::Object { properties }],
        };

        Ok(Statement::VariableDeclaration {
            name: self.binding_name(node, &["saveAs", "saveResponseAsVariableName"])?,
            init: Expression::member(call, "data"),
        })
    }

    fn required(&self, node: &'a FlowNode, names: &[&str]) -> Result<&'a Value, FlowError> {
        node.property(names).ok_or_else(|| {
            GraphError::MissingProperty {
                node_id: node.id.clone(),
                property: names[0].to_string(),
            }
            .into()
        })
    }

    fn expression(&self, node: &'a FlowNode, names: &[&str]) -> Result<Expression, FlowError> {
        parse_expression(self.required(node, names)?).map_err(|e| expression_error(node, names[0], e))
    }

    /// A variable name introduced by the node. A leading sigil is tolerated.
    fn binding_name(&self, node: &'a FlowNode, names: &[&str]) -> Result<String, FlowError> {
        let raw = self.required(node, names)?;
        let name = raw
            .as_str()
            .map(|s| s.trim())
            .map(|s| s.strip_prefix(SIGIL).unwrap_or(s))
            .filter(|s| is_identifier(s))
            .ok_or_else(|| {
                expression_error(node, names[0], invalid(raw, "expected a variable name"))
            })?;
        Ok(name.to_string())
    }

    fn new_block(&mut self) -> BlockId {
        self.blocks.push(Vec::new());
        BlockId(self.blocks.len() - 1)
    }

    fn push(&mut self, target: BlockId, slot: Slot) {
        self.blocks[target.0].push(slot);
    }

    /// Turns the block arena into the owned tree. Every block is taken exactly once.
    fn assemble(&mut self, id: BlockId) -> Vec<Statement> {
        let slots = std::mem::take(&mut self.blocks[id.0]);
        slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Done(stmt) => stmt,
                Slot::If {
                    test,
                    consequent,
                    alternate,
                } => Statement::If {
                    test,
                    consequent: Block {
                        body: self.assemble(consequent),
                    },
                    alternate: Block {
                        body: self.assemble(alternate),
                    },
                },
                Slot::ForEach {
                    variable,
                    iterable,
                    body,
                } => Statement::ForEach {
                    variable,
                    iterable,
                    body: Block {
                        body: self.assemble(body),
                    },
                },
            })
            .collect()
    }
}

fn expression_error(node: &FlowNode, property: &str, source: ExpressionError) -> FlowError {
    FlowError::Expression {
        node_id: node.id.clone(),
        property: property.to_string(),
        source,
    }
}

fn invalid(value: &Value, reason: &str) -> ExpressionError {
    ExpressionError::UnparsablePattern {
        input: value.to_string(),
        reason: reason.to_string(),
    }
}
