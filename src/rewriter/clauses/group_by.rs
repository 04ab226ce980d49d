use std::collections::HashSet;

use crate::ast::{Analysis, Expr};
use crate::rewriter::{ExprRewriter, RollupColumnIndex};

#[derive(Debug, Clone, PartialEq)]
pub struct GroupByRewrite {
    pub group_by: Option<Vec<Expr>>,
    /// True exactly when the query groups by the same expression set the
    /// rollup does: the rollup rows already are the query's groups, so the
    /// query's aggregates must be stripped down to plain column reads.
    pub should_remove_aggregates: bool,
}

pub struct GroupByRewriter;

impl GroupByRewriter {
    pub fn rewrite(
        query: &Analysis,
        rollup: &Analysis,
        idx: &RollupColumnIndex,
    ) -> Option<GroupByRewrite> {
        match (&query.group_by, &rollup.group_by) {
            // Neither groups: nothing to reconcile.
            (None, None) => Some(GroupByRewrite { group_by: None, should_remove_aggregates: false }),

            // Same grouping as sets, order ignored: one rollup row per query
            // group, so grouping again is redundant.
            (Some(query_groups), Some(rollup_groups)) if same_set(query_groups, rollup_groups) => {
                Some(GroupByRewrite { group_by: None, should_remove_aggregates: true })
            }

            // Rollup groups, query does not: only compatible when the whole
            // selection re-aggregates, i.e. every selected expression is an
            // aggregate call.
            (None, Some(_)) => query
                .selection
                .values()
                .all(Expr::is_aggregate_call)
                .then_some(GroupByRewrite { group_by: None, should_remove_aggregates: false }),

            // Query groups: every group expression must rewrite on its own.
            (Some(query_groups), _) => query_groups
                .iter()
                .map(|expr| ExprRewriter::rewrite(expr, idx))
                .collect::<Option<Vec<Expr>>>()
                .map(|rewritten| GroupByRewrite {
                    group_by: Some(rewritten),
                    should_remove_aggregates: false,
                }),
        }
    }
}

fn same_set(left: &[Expr], right: &[Expr]) -> bool {
    let left: HashSet<&Expr> = left.iter().collect();
    let right: HashSet<&Expr> = right.iter().collect();
    left == right
}
