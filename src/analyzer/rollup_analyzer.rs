use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::analyzer::{AnalyzeFailure, ParseContext, RollupInfo, RollupParser};
use crate::ast::{Analysis, SoqlType};

/// Base dataset column identifier -> type.
pub type Schema = IndexMap<String, SoqlType>;

/// Marker prepended to non-system column identifiers before parsing rollup
/// text: keeps numeric-leading identifiers syntactically valid and cannot
/// collide with a real column. System columns already lead with `:` and are
/// left alone.
pub const ROLLUP_COLUMN_PREFIX: char = '_';
pub const SYSTEM_COLUMN_MARKER: char = ':';

/// Turns stored rollup query text into the same `Analysis` representation as
/// the incoming query, reconciling the rollup text's column-naming context
/// with the base schema.
pub struct RollupAnalyzer<'a> {
    parser: &'a dyn RollupParser,
    schema: &'a Schema,
    reprojection: Option<&'a HashMap<String, String>>,
}

impl<'a> RollupAnalyzer<'a> {
    pub fn new(parser: &'a dyn RollupParser, schema: &'a Schema) -> Self {
        Self { parser, schema, reprojection: None }
    }

    /// Old -> new column identifiers, for datasets whose columns were renamed
    /// after the rollups were defined.
    pub fn with_reprojection(mut self, reprojection: &'a HashMap<String, String>) -> Self {
        self.reprojection = Some(reprojection);
        self
    }

    /// The schema as the rollup text sees it: every non-system column
    /// prefixed.
    pub fn parse_context(&self) -> ParseContext {
        self.schema
            .iter()
            .map(|(name, ty)| (add_prefix(name), *ty))
            .collect()
    }

    /// Analyzes every definition, dropping the ones that fail. A malformed
    /// or stale rollup never aborts evaluation of the others.
    pub fn analyze_all(&self, rollups: &[RollupInfo]) -> IndexMap<String, Analysis> {
        let context = self.parse_context();

        rollups
            .iter()
            .filter_map(|rollup| {
                self.analyze_one(rollup, &context)
                    .map(|analysis| (rollup.name.clone(), analysis))
            })
            .collect()
    }

    fn analyze_one(&self, rollup: &RollupInfo, context: &ParseContext) -> Option<Analysis> {
        match self.parser.analyze(&rollup.soql, context) {
            Ok(analysis) => Some(self.reconcile(analysis)),
            Err(AnalyzeFailure::Parse(err)) => {
                info!(rollup = %rollup.name, error = %err, "skipping rollup with unparsable definition");
                None
            }
            Err(AnalyzeFailure::Other(message)) => {
                warn!(rollup = %rollup.name, error = %message, "skipping rollup after unexpected analysis failure");
                None
            }
        }
    }

    /// Strips the parsing prefix from every column reference, then applies
    /// the reprojection map to column references and output names.
    fn reconcile(&self, analysis: Analysis) -> Analysis {
        let reprojection = self.reprojection;
        let mut reconciled = analysis.map_columns(&|name| {
            let base = strip_prefix(name);
            match reprojection.and_then(|map| map.get(base)) {
                Some(renamed) => renamed.clone(),
                None => base.to_string(),
            }
        });

        if let Some(map) = reprojection {
            reconciled.selection = reconciled
                .selection
                .into_iter()
                .map(|(name, expr)| {
                    let base = strip_prefix(&name);
                    match map.get(base) {
                        Some(renamed) => (renamed.clone(), expr),
                        None => (name, expr),
                    }
                })
                .collect();
        }

        reconciled
    }
}

pub fn add_prefix(name: &str) -> String {
    if name.starts_with(SYSTEM_COLUMN_MARKER) {
        name.to_string()
    } else {
        format!("{}{}", ROLLUP_COLUMN_PREFIX, name)
    }
}

pub fn strip_prefix(name: &str) -> &str {
    if name.starts_with(SYSTEM_COLUMN_MARKER) {
        name
    } else {
        name.strip_prefix(ROLLUP_COLUMN_PREFIX).unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use indexmap::IndexMap;

    use crate::analyzer::{
        add_prefix, strip_prefix, AnalyzeFailure, ParseContext, ParseError, RollupAnalyzer,
        RollupInfo, RollupParser, Schema,
    };
    use crate::ast::{Analysis, ColumnRef, Expr, Selection, SoqlType};

    fn schema() -> Schema {
        let mut schema = IndexMap::new();
        schema.insert("crime_type".to_string(), SoqlType::Text);
        schema.insert("9lives".to_string(), SoqlType::Number);
        schema.insert(":created_at".to_string(), SoqlType::FloatingTimestamp);
        schema
    }

    fn col(name: &str, ty: SoqlType) -> Expr {
        Expr::Column(ColumnRef::new(name, ty))
    }

    /// Fake parser: hands back a canned analysis per rollup text, the way
    /// the real parser would, with prefixed column references.
    struct FakeParser {
        responses: HashMap<String, Result<Analysis, AnalyzeFailure>>,
    }

    impl RollupParser for FakeParser {
        fn analyze(&self, soql: &str, context: &ParseContext) -> Result<Analysis, AnalyzeFailure> {
            assert!(context.contains_key("_crime_type"));
            assert!(context.contains_key("_9lives"));
            assert!(context.contains_key(":created_at"));

            self.responses
                .get(soql)
                .cloned()
                .unwrap_or_else(|| Err(AnalyzeFailure::Other(format!("unexpected text: {}", soql))))
        }
    }

    fn prefixed_analysis() -> Analysis {
        let mut selection: Selection = IndexMap::new();
        selection.insert("_crime_type".to_string(), col("_crime_type", SoqlType::Text));
        selection.insert("created".to_string(), col(":created_at", SoqlType::FloatingTimestamp));
        Analysis::of_selection(selection)
    }

    #[test]
    pub fn test_prefix_marks_non_system_columns_only() {
        assert_eq!(add_prefix("crime_type"), "_crime_type");
        assert_eq!(add_prefix("9lives"), "_9lives");
        assert_eq!(add_prefix(":created_at"), ":created_at");

        assert_eq!(strip_prefix("_9lives"), "9lives");
        assert_eq!(strip_prefix(":created_at"), ":created_at");
        assert_eq!(strip_prefix("plain"), "plain");
    }

    #[test]
    pub fn test_analyze_all_strips_prefixes() {
        let schema = schema();
        let parser = FakeParser {
            responses: HashMap::from([("select ...".to_string(), Ok(prefixed_analysis()))]),
        };
        let analyzer = RollupAnalyzer::new(&parser, &schema);

        let analyzed = analyzer.analyze_all(&[RollupInfo::new("r1", "select ...")]);

        assert_eq!(analyzed.len(), 1);
        let rollup = &analyzed["r1"];
        assert_eq!(rollup.selection["_crime_type"], col("crime_type", SoqlType::Text));
        assert_eq!(
            rollup.selection["created"],
            col(":created_at", SoqlType::FloatingTimestamp)
        );
    }

    #[test]
    pub fn test_reprojection_renames_refs_and_output_names() {
        let schema = schema();
        let parser = FakeParser {
            responses: HashMap::from([("select ...".to_string(), Ok(prefixed_analysis()))]),
        };
        let reprojection = HashMap::from([("crime_type".to_string(), "offence_type".to_string())]);
        let analyzer = RollupAnalyzer::new(&parser, &schema).with_reprojection(&reprojection);

        let analyzed = analyzer.analyze_all(&[RollupInfo::new("r1", "select ...")]);
        let rollup = &analyzed["r1"];

        // the output name matched on its unprefixed form and was renamed
        assert!(rollup.selection.contains_key("offence_type"));
        assert_eq!(
            rollup.selection["offence_type"],
            col("offence_type", SoqlType::Text)
        );
        // untouched names keep their original spelling
        assert!(rollup.selection.contains_key("created"));
    }

    #[test]
    pub fn test_failed_rollups_are_dropped_not_fatal() {
        let schema = schema();
        let parser = FakeParser {
            responses: HashMap::from([
                ("good".to_string(), Ok(prefixed_analysis())),
                (
                    "bad".to_string(),
                    Err(AnalyzeFailure::Parse(ParseError::new("Invalid select", "selct", 0, 5))),
                ),
                ("ugly".to_string(), Err(AnalyzeFailure::Other("boom".to_string()))),
            ]),
        };
        let analyzer = RollupAnalyzer::new(&parser, &schema);

        let analyzed = analyzer.analyze_all(&[
            RollupInfo::new("r_bad", "bad"),
            RollupInfo::new("r_good", "good"),
            RollupInfo::new("r_ugly", "ugly"),
        ]);

        assert_eq!(analyzed.len(), 1);
        assert!(analyzed.contains_key("r_good"));
    }
}
