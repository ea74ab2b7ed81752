//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the flowgen crate.

// Core compilation and rendering
pub use crate::codegen::{RenderOptions, Renderer};
pub use crate::compiler::{
    CompilationArtifacts, Compiler, CompilerBuilder, CompilerOptions, ConditionalPlacement,
};

// Tree types
pub use crate::ast::{BinaryOperator, Block, DisplayProgram, Expression, Program, Property, Statement};

// Input model
pub use crate::flow::{FlowDocument, FlowEdge, FlowGraph, FlowNode, HttpParam, NodeKind};

// Error types
pub use crate::error::{ExpressionError, FlowError, GraphError, RenderError};
