pub mod parse_error;
pub use parse_error::*;

pub mod rollup_parser;
pub use rollup_parser::*;

pub mod rollup_info;
pub use rollup_info::*;

pub mod rollup_analyzer;
pub use rollup_analyzer::*;
