pub mod date_trunc;
pub use date_trunc::*;

pub mod column_index;
pub use column_index::*;

pub mod expr_rewriter;
pub use expr_rewriter::*;

pub mod clauses;
pub use clauses::*;

pub mod evaluator;
pub use evaluator::*;
