use indexmap::IndexMap;

use crate::ast::{Expr, OrderBy};

/// Output column name -> defining expression, in output order.
pub type Selection = IndexMap<String, Expr>;

/// An analyzed query: the representation shared by the incoming query and by
/// every parsed rollup definition. Produced once by analysis or by a rewrite,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub selection: Selection,
    pub where_clause: Option<Expr>,
    pub group_by: Option<Vec<Expr>>,
    pub is_grouped: bool,
    pub having: Option<Expr>,
    pub order_by: Option<Vec<OrderBy>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub distinct: bool,
}

impl Analysis {
    pub fn of_selection(selection: Selection) -> Self {
        Self {
            selection,
            where_clause: None,
            group_by: None,
            is_grouped: false,
            having: None,
            order_by: None,
            limit: None,
            offset: None,
            search: None,
            distinct: false,
        }
    }

    /// Rebuilds every expression in the query with column names passed
    /// through `f`. Selection output names are left alone.
    pub fn map_columns(&self, f: &impl Fn(&str) -> String) -> Analysis {
        Analysis {
            selection: self
                .selection
                .iter()
                .map(|(name, expr)| (name.clone(), expr.map_columns(f)))
                .collect(),
            where_clause: self.where_clause.as_ref().map(|e| e.map_columns(f)),
            group_by: self
                .group_by
                .as_ref()
                .map(|exprs| exprs.iter().map(|e| e.map_columns(f)).collect()),
            is_grouped: self.is_grouped,
            having: self.having.as_ref().map(|e| e.map_columns(f)),
            order_by: self
                .order_by
                .as_ref()
                .map(|obs| obs.iter().map(|ob| ob.with_expr(ob.expr.map_columns(f))).collect()),
            limit: self.limit,
            offset: self.offset,
            search: self.search.clone(),
            distinct: self.distinct,
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::ast::{Analysis, ColumnRef, Expr, OrderBy, SoqlType};

    #[test]
    pub fn test_map_columns_touches_every_clause() {
        let col = |name: &str| Expr::Column(ColumnRef::new(name, SoqlType::Text));

        let mut selection = IndexMap::new();
        selection.insert("kind".to_string(), col("_kind"));

        let mut query = Analysis::of_selection(selection);
        query.where_clause = Some(col("_kind"));
        query.group_by = Some(vec![col("_kind")]);
        query.is_grouped = true;
        query.order_by = Some(vec![OrderBy::asc(col("_kind"))]);

        let mapped = query.map_columns(&|name| name.trim_start_matches('_').to_string());

        assert_eq!(mapped.selection["kind"], col("kind"));
        assert_eq!(mapped.where_clause, Some(col("kind")));
        assert_eq!(mapped.group_by, Some(vec![col("kind")]));
        assert_eq!(mapped.order_by.unwrap()[0].expr, col("kind"));
    }
}
