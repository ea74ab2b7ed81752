pub mod display;
pub mod expression;
pub mod statement;

pub use display::*;
pub use expression::*;
pub use statement::*;
