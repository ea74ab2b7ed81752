use thiserror::Error;

/// Errors raised while indexing or walking the flow graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Expected exactly one start node, but the flow contains {found}")]
    MissingStart { found: usize },

    #[error("Node '{node_id}' not found, which is required by node '{required_by}'")]
    MissingNode {
        node_id: String,
        required_by: String,
    },

    #[error("Edge '{source_id}' -> '{target_id}' references node '{missing_id}', which does not exist")]
    DanglingEdge {
        source_id: String,
        target_id: String,
        missing_id: String,
    },

    #[error("Node '{node_id}' is reached again while it is still being compiled (cycle via '{entered_from}')")]
    CyclicGraph {
        node_id: String,
        entered_from: String,
    },

    #[error("Node id '{0}' is used by more than one node")]
    DuplicateNode(String),

    #[error("Node '{node_id}' is missing its required '{property}' property")]
    MissingProperty { node_id: String, property: String },
}

/// Errors raised by the expression micro-parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("Cannot parse expression '{input}': {reason}")]
    UnparsablePattern { input: String, reason: String },
}

/// Errors raised while rendering an intermediate tree into source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Unknown tree node kind '{kind}'")]
    UnknownNodeKind { kind: String },

    #[error("Malformed tree: {0}")]
    MalformedTree(String),
}

/// The top-level error returned by the compiler facade.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse flow document: {0}")]
    Document(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Invalid '{property}' on node '{node_id}': {source}")]
    Expression {
        node_id: String,
        property: String,
        #[source]
        source: ExpressionError,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl FlowError {
    /// Process exit code for this error. `0` is reserved for success.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlowError::Io { .. } => 1,
            FlowError::Document(_) => 2,
            FlowError::Graph(err) => match err {
                GraphError::MissingStart { .. } => 10,
                GraphError::MissingNode { .. } => 11,
                GraphError::DanglingEdge { .. } => 12,
                GraphError::CyclicGraph { .. } => 13,
                GraphError::DuplicateNode(_) => 14,
                GraphError::MissingProperty { .. } => 15,
            },
            FlowError::Expression { .. } => 20,
            FlowError::Render(err) => match err {
                RenderError::UnknownNodeKind { .. } => 30,
                RenderError::MalformedTree(_) => 31,
            },
        }
    }
}
