use crate::ast::{Expr, FunctionCall, OrderBy, Selection};

/// Strips aggregate calls once grouping has become redundant: when the query
/// groups exactly as the rollup does, each rollup row already holds one
/// group's aggregate, so `sum(x)` reads as plain `x`.
pub struct AggregateRemover;

impl AggregateRemover {
    /// Single-argument aggregates collapse to their argument; non-aggregate
    /// calls keep their place with stripped arguments. Aggregates of any
    /// other arity are left alone: no current aggregate has one, and this
    /// rule does not generalize to one.
    pub fn strip_expr(expr: &Expr) -> Expr {
        match expr {
            Expr::FunctionCall(fc) if fc.is_aggregate() && fc.args.len() == 1 => {
                Self::strip_expr(&fc.args[0])
            }
            Expr::FunctionCall(fc) => Expr::FunctionCall(FunctionCall {
                name: fc.name.clone(),
                bindings: fc.bindings.clone(),
                args: fc.args.iter().map(Self::strip_expr).collect(),
                position: fc.position,
            }),
            _ => expr.clone(),
        }
    }

    pub fn strip_selection(selection: &Selection) -> Selection {
        selection
            .iter()
            .map(|(name, expr)| (name.clone(), Self::strip_expr(expr)))
            .collect()
    }

    pub fn strip_order_by(order_by: &[OrderBy]) -> Vec<OrderBy> {
        order_by
            .iter()
            .map(|entry| entry.with_expr(Self::strip_expr(&entry.expr)))
            .collect()
    }
}
