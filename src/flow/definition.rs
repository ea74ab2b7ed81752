use crate::error::FlowError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// The complete flow document as authored by the visual editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowDocument {
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl FlowDocument {
    /// Parses a flow document from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a flow document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FlowError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| FlowError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

/// The closed vocabulary of node kinds.
///
/// Both the short names and the editor's `-node` suffixed names are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    #[serde(alias = "start-node")]
    Start,
    #[serde(alias = "set-variable-node")]
    SetVariable,
    #[serde(alias = "if-node")]
    If,
    #[serde(alias = "http-node")]
    HttpCall,
    #[serde(alias = "loop-node")]
    Loop,
    #[serde(alias = "end-node")]
    End,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::SetVariable => "set-variable",
            NodeKind::If => "if",
            NodeKind::HttpCall => "http-call",
            NodeKind::Loop => "loop",
            NodeKind::End => "end",
        }
    }
}

/// A single node of the flow graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Loop body members, in execution order. Only meaningful for `loop` nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl FlowNode {
    /// Looks a property up under its canonical name or any accepted alias.
    pub fn property(&self, names: &[&str]) -> Option<&Value> {
        names.iter().find_map(|name| self.properties.get(*name))
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    /// Selects the taken branch out of an `if` node. Absent on plain edges.
    #[serde(
        default,
        rename = "conditionValue",
        alias = "condition",
        skip_serializing_if = "Option::is_none"
    )]
    pub condition: Option<bool>,
}

/// One entry of an `http-call` node's ordered `params` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpParam {
    pub key: String,
    pub value: Value,
}
