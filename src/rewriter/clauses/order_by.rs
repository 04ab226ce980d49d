use crate::ast::OrderBy;
use crate::rewriter::{ExprRewriter, RollupColumnIndex};

pub struct OrderByRewriter;

impl OrderByRewriter {
    /// Each entry's expression rewrites independently; one failure rejects
    /// the whole clause. Direction and null ordering pass through unchanged.
    pub fn rewrite(
        order_by: Option<&Vec<OrderBy>>,
        idx: &RollupColumnIndex,
    ) -> Option<Option<Vec<OrderBy>>> {
        match order_by {
            None => Some(None),
            Some(entries) => entries
                .iter()
                .map(|entry| {
                    ExprRewriter::rewrite(&entry.expr, idx).map(|expr| entry.with_expr(expr))
                })
                .collect::<Option<Vec<OrderBy>>>()
                .map(Some),
        }
    }
}
