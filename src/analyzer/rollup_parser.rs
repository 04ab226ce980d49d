use indexmap::IndexMap;

use crate::analyzer::AnalyzeFailure;
use crate::ast::{Analysis, SoqlType};

/// Column identifier -> type, the parsing context handed to the parser. Kept
/// ordered so context construction is reproducible.
pub type ParseContext = IndexMap<String, SoqlType>;

/// The external SoQL parser/type-checker, injected so the engine stays
/// independently testable against a fake.
pub trait RollupParser {
    fn analyze(&self, soql: &str, context: &ParseContext) -> Result<Analysis, AnalyzeFailure>;
}
