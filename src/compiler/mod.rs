use crate::ast::Program;
use crate::codegen::{RenderOptions, Renderer};
use crate::error::FlowError;
use crate::flow::{FlowDocument, FlowGraph};

mod builder;
pub mod parsing;

use builder::TreeBuilder;

/// Where an `if` node's statement lands in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConditionalPlacement {
    /// Appended to the block the traversal is currently filling.
    #[default]
    Nested,
    /// Always appended to the program root, even when reached from inside a branch or
    /// a loop body. Matches the layout of the legacy JavaScript exporter.
    Hoisted,
}

/// Settings shared by the tree builder and the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Name of the generated async function.
    pub function_name: String,
    /// Identifier of the HTTP client object `http-call` nodes invoke.
    pub http_client: String,
    /// Spaces per nesting level in the generated source.
    pub indent_width: usize,
    pub conditional_placement: ConditionalPlacement,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            function_name: "flow".to_string(),
            http_client: "axios".to_string(),
            indent_width: 2,
            conditional_placement: ConditionalPlacement::Nested,
        }
    }
}

impl CompilerOptions {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            function_name: self.function_name.clone(),
            indent_width: self.indent_width,
        }
    }
}

/// The two artifacts of a successful compilation.
#[derive(Debug, Clone)]
pub struct CompilationArtifacts {
    pub program: Program,
    pub source: String,
}

impl CompilationArtifacts {
    /// The intermediate tree as compact JSON.
    pub fn tree_json(&self) -> Result<String, FlowError> {
        Ok(serde_json::to_string(&self.program)?)
    }

    /// The intermediate tree as indented JSON.
    pub fn tree_json_pretty(&self) -> Result<String, FlowError> {
        Ok(serde_json::to_string_pretty(&self.program)?)
    }
}

/// Compiles a flow document into an intermediate tree and source text.
pub struct Compiler {
    document: FlowDocument,
    options: CompilerOptions,
}

pub struct CompilerBuilder {
    document: FlowDocument,
    options: CompilerOptions,
}

impl CompilerBuilder {
    pub fn new(document: FlowDocument) -> Self {
        Self {
            document,
            options: CompilerOptions::default(),
        }
    }
    pub fn with_options(mut self, options: CompilerOptions) -> Self {
        self.options = options;
        self
    }
    pub fn with_function_name(mut self, name: &str) -> Self {
        self.options.function_name = name.to_string();
        self
    }
    pub fn with_http_client(mut self, client: &str) -> Self {
        self.options.http_client = client.to_string();
        self
    }
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.options.indent_width = width;
        self
    }
    pub fn with_conditional_placement(mut self, placement: ConditionalPlacement) -> Self {
        self.options.conditional_placement = placement;
        self
    }
    pub fn build(self) -> Compiler {
        Compiler {
            document: self.document,
            options: self.options,
        }
    }
}

impl Compiler {
    pub fn builder(document: FlowDocument) -> CompilerBuilder {
        CompilerBuilder::new(document)
    }

    /// Parses `json` and creates a compiler with default options.
    pub fn new(json: &str) -> Result<Self, FlowError> {
        Ok(Self::builder(FlowDocument::from_json(json)?).build())
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Runs the traversal stage only.
    pub fn build_tree(self) -> Result<Program, FlowError> {
        let graph = FlowGraph::new(self.document)?;
        TreeBuilder::new(&graph, &self.options).build()
    }

    /// Runs the full pipeline: graph indexing, tree construction and rendering.
    pub fn compile(self) -> Result<CompilationArtifacts, FlowError> {
        let render_options = self.options.render_options();
        let program = self.build_tree()?;
        let source = Renderer::new(render_options).render(&program);
        tracing::debug!(
            statements = program.body.len(),
            bytes = source.len(),
            "compilation finished"
        );
        Ok(CompilationArtifacts { program, source })
    }
}
