use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::ast::{functions, Analysis, Expr, FunctionCall, OrderBy, Selection};
use crate::rewriter::{
    AggregateRemover, FilterRewriter, GroupByRewriter, OrderByRewriter, RollupColumnIndex,
    SelectionRewriter,
};

/// Tries every analyzed rollup against the query and returns a rewritten
/// query for each rollup that can answer it. No ranking: choosing among
/// matches is the caller's concern.
pub struct QueryRewriter;

macro_rules! try_clause {
    ($rollup:expr, $check:expr, $result:expr) => {
        match $result {
            Some(value) => value,
            None => {
                debug!(rollup = $rollup, mismatch = $check, "rollup rejected");
                return None;
            }
        }
    };
}

impl QueryRewriter {
    pub fn possible_rewrites(
        query: &Analysis,
        rollups: &IndexMap<String, Analysis>,
    ) -> HashMap<String, Analysis> {
        rollups
            .iter()
            .filter_map(|(name, rollup)| {
                Self::rewrite_one(name, query, rollup).map(|rewritten| (name.clone(), rewritten))
            })
            .collect()
    }

    /// The per-candidate pipeline. The check order only matters for which
    /// mismatch gets reported; each candidate's outcome is independent of
    /// every other candidate.
    fn rewrite_one(name: &str, query: &Analysis, rollup: &Analysis) -> Option<Analysis> {
        let idx = RollupColumnIndex::build(&rollup.selection);

        let selection = try_clause!(
            name,
            "selection",
            SelectionRewriter::rewrite(&query.selection, &idx)
        );
        let where_clause = try_clause!(
            name,
            "where",
            FilterRewriter::rewrite(query.where_clause.as_ref(), rollup.where_clause.as_ref(), &idx)
        );
        let group = try_clause!(name, "group-by", GroupByRewriter::rewrite(query, rollup, &idx));
        let having = try_clause!(
            name,
            "having",
            FilterRewriter::rewrite(query.having.as_ref(), rollup.having.as_ref(), &idx)
        );
        let order_by = try_clause!(
            name,
            "order-by",
            OrderByRewriter::rewrite(query.order_by.as_ref(), &idx)
        );

        try_clause!(name, "rollup limit", rollup.limit.is_none().then_some(()));
        try_clause!(name, "rollup offset", rollup.offset.is_none().then_some(()));
        try_clause!(name, "search", query.search.is_none().then_some(()));
        try_clause!(
            name,
            "distinct",
            (query.distinct == rollup.distinct).then_some(())
        );

        Some(Self::assemble(
            query,
            selection,
            where_clause,
            group.group_by,
            having,
            order_by,
            group.should_remove_aggregates,
        ))
    }

    fn assemble(
        query: &Analysis,
        selection: Selection,
        where_clause: Option<Expr>,
        group_by: Option<Vec<Expr>>,
        having: Option<Expr>,
        order_by: Option<Vec<OrderBy>>,
        should_remove_aggregates: bool,
    ) -> Analysis {
        if should_remove_aggregates {
            // The rollup rows are the query's groups: aggregates become
            // column reads and the having predicate folds into where.
            let selection = AggregateRemover::strip_selection(&selection);
            let order_by = order_by.map(|entries| AggregateRemover::strip_order_by(&entries));
            let having = having.map(|expr| AggregateRemover::strip_expr(&expr));
            let where_clause = match (where_clause, having) {
                (Some(w), Some(h)) => Some(and(w, h)),
                (None, Some(h)) => Some(h),
                (w, None) => w,
            };
            Analysis {
                selection,
                where_clause,
                group_by: None,
                is_grouped: false,
                having: None,
                order_by,
                limit: query.limit,
                offset: query.offset,
                search: query.search.clone(),
                distinct: query.distinct,
            }
        } else {
            Analysis {
                selection,
                where_clause,
                group_by,
                is_grouped: query.is_grouped,
                having,
                order_by,
                limit: query.limit,
                offset: query.offset,
                search: query.search.clone(),
                distinct: query.distinct,
            }
        }
    }
}

fn and(left: Expr, right: Expr) -> Expr {
    Expr::FunctionCall(FunctionCall::new(functions::AND, vec![left, right]))
}
