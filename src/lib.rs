pub mod ast;
pub use ast::{Analysis, ColumnRef, Expr, FunctionCall, Literal, OrderBy, Selection, SoqlType};

pub mod analyzer;
pub use analyzer::{AnalyzeFailure, ParseError, RollupAnalyzer, RollupInfo, RollupParser, Schema};

pub mod rewriter;
pub use rewriter::{QueryRewriter, RollupColumnIndex};
