use crate::ast::Expr;
use crate::rewriter::{ExprRewriter, RollupColumnIndex};

/// Rewrites a where or having clause. A rollup carrying its own filter is
/// never usable: proving the query's predicate is contained in the rollup's
/// is not attempted.
pub struct FilterRewriter;

impl FilterRewriter {
    /// Outer `None` means incompatible; `Some(None)` means no clause either
    /// side; `Some(Some(_))` is the rewritten predicate.
    pub fn rewrite(
        query_filter: Option<&Expr>,
        rollup_filter: Option<&Expr>,
        idx: &RollupColumnIndex,
    ) -> Option<Option<Expr>> {
        if rollup_filter.is_some() {
            return None;
        }
        match query_filter {
            None => Some(None),
            Some(expr) => ExprRewriter::rewrite(expr, idx).map(Some),
        }
    }
}
