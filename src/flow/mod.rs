pub mod definition;
pub mod graph;

pub use definition::*;
pub use graph::*;
