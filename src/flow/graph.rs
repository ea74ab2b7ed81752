use super::definition::{FlowDocument, FlowEdge, FlowNode, NodeKind};
use crate::error::GraphError;
use ahash::AHashMap;

/// A read-only index over a [`FlowDocument`].
///
/// Nodes are keyed by identifier and edges by source identifier, keeping document order
/// for both so that every lookup is deterministic.
#[derive(Debug)]
pub struct FlowGraph {
    nodes: Vec<FlowNode>,
    index: AHashMap<String, usize>,
    outgoing: AHashMap<String, Vec<FlowEdge>>,
}

impl FlowGraph {
    /// Indexes the document, rejecting duplicate node ids and edges that point nowhere.
    pub fn new(document: FlowDocument) -> Result<Self, GraphError> {
        let FlowDocument { nodes, edges } = document;

        let mut index = AHashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), position).is_some() {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        let mut outgoing: AHashMap<String, Vec<FlowEdge>> = AHashMap::new();
        for edge in edges {
            for endpoint in [&edge.source, &edge.target] {
                if !index.contains_key(endpoint) {
                    return Err(GraphError::DanglingEdge {
                        source_id: edge.source.clone(),
                        target_id: edge.target.clone(),
                        missing_id: endpoint.clone(),
                    });
                }
            }
            outgoing.entry(edge.source.clone()).or_default().push(edge);
        }

        tracing::debug!(
            nodes = nodes.len(),
            sources = outgoing.len(),
            "indexed flow graph"
        );

        Ok(Self {
            nodes,
            index,
            outgoing,
        })
    }

    /// Resolves a node by id. `required_by` names the node that asked for it.
    pub fn node(&self, node_id: &str, required_by: &str) -> Result<&FlowNode, GraphError> {
        self.index
            .get(node_id)
            .map(|&position| &self.nodes[position])
            .ok_or_else(|| GraphError::MissingNode {
                node_id: node_id.to_string(),
                required_by: required_by.to_string(),
            })
    }

    /// Locates the unique `start` node.
    pub fn start(&self) -> Result<&FlowNode, GraphError> {
        let mut starts = self.nodes.iter().filter(|n| n.kind == NodeKind::Start);
        match (starts.next(), starts.count()) {
            (Some(start), 0) => Ok(start),
            (None, _) => Err(GraphError::MissingStart { found: 0 }),
            (Some(_), rest) => Err(GraphError::MissingStart { found: rest + 1 }),
        }
    }

    /// The unconditioned edge leaving `node_id`, if any.
    pub fn next(&self, node_id: &str) -> Option<&FlowEdge> {
        let mut plain = self
            .edges_from(node_id)
            .iter()
            .filter(|e| e.condition.is_none());
        let first = plain.next()?;
        let ignored = plain.count();
        if ignored > 0 {
            tracing::warn!(
                node_id,
                taken = %first.target,
                ignored,
                "node has several unconditioned outgoing edges, following the first"
            );
        }
        Some(first)
    }

    /// The edge leaving `node_id` on the branch selected by `flag`, if any.
    pub fn branch(&self, node_id: &str, flag: bool) -> Option<&FlowEdge> {
        self.edges_from(node_id)
            .iter()
            .find(|e| e.condition == Some(flag))
    }

    /// All edges leaving `node_id`, in document order.
    pub fn edges_from(&self, node_id: &str) -> &[FlowEdge] {
        self.outgoing.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All nodes, in document order.
    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }
}
