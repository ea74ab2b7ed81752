//! # flowgen - Flow Graph to Source Compiler
//!
//! **flowgen** turns the node/edge documents produced by a low-code visual editor into an
//! intermediate tree and then into the body of an `async` JavaScript function.
//!
//! ## Pipeline
//!
//! 1.  **Load**: Parse the editor's JSON into a [`flow::FlowDocument`].
//! 2.  **Index**: [`flow::FlowGraph`] validates the document and indexes nodes by id and
//!     edges by source.
//! 3.  **Build**: the compiler walks the graph depth-first from the unique `start` node,
//!     parsing string properties with the expression micro-language
//!     ([`compiler::parsing`]) and producing an [`ast::Program`].
//! 4.  **Render**: [`codegen::Renderer`] writes the program out as source text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowgen::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let document = FlowDocument::from_file("data/sample_flow.json")?;
//!
//!     let compiler = Compiler::builder(document)
//!         .with_function_name("checkOrders")
//!         .build();
//!
//!     let artifacts = compiler.compile()?;
//!     println!("{}", DisplayProgram(&artifacts.program));
//!     println!("{}", artifacts.source);
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod codegen;
pub mod compiler;
pub mod error;
pub mod flow;
pub mod prelude;
