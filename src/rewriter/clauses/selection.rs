use crate::ast::Selection;
use crate::rewriter::{ExprRewriter, RollupColumnIndex};

pub struct SelectionRewriter;

impl SelectionRewriter {
    /// Every selected expression must rewrite; one failure rejects the whole
    /// selection. Output column names and order are preserved.
    pub fn rewrite(selection: &Selection, idx: &RollupColumnIndex) -> Option<Selection> {
        selection
            .iter()
            .map(|(name, expr)| {
                ExprRewriter::rewrite(expr, idx).map(|rewritten| (name.clone(), rewritten))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::ast::{ColumnRef, Expr, Selection, SoqlType};
    use crate::rewriter::{RollupColumnIndex, SelectionRewriter};

    fn col(name: &str) -> Expr {
        Expr::Column(ColumnRef::new(name, SoqlType::Text))
    }

    fn selection(columns: Vec<(&str, Expr)>) -> Selection {
        columns
            .into_iter()
            .map(|(name, expr)| (name.to_string(), expr))
            .collect::<IndexMap<_, _>>()
    }

    #[test]
    pub fn test_selection_preserves_names_and_order() {
        let rollup = selection(vec![("a", col("kind")), ("b", col("ward"))]);
        let idx = RollupColumnIndex::build(&rollup);

        let query = selection(vec![("ward_out", col("ward")), ("kind_out", col("kind"))]);
        let rewritten = SelectionRewriter::rewrite(&query, &idx).expect("selection should rewrite");

        let names: Vec<_> = rewritten.keys().cloned().collect();
        assert_eq!(names, vec!["ward_out", "kind_out"]);
        assert_eq!(rewritten["ward_out"], col("c2"));
        assert_eq!(rewritten["kind_out"], col("c1"));
    }

    #[test]
    pub fn test_selection_is_all_or_nothing() {
        let rollup = selection(vec![("a", col("kind"))]);
        let idx = RollupColumnIndex::build(&rollup);

        let query = selection(vec![("kind_out", col("kind")), ("ward_out", col("ward"))]);
        assert_eq!(SelectionRewriter::rewrite(&query, &idx), None);
    }
}
