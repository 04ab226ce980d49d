use std::collections::HashMap;

use crate::ast::{functions, ColumnRef, Expr, FunctionCall, Literal, Selection, SoqlType};
use crate::rewriter::TruncLevel;

/// Per-candidate map from a rollup column's defining expression to its
/// zero-based position in the rollup selection. Built fresh for every
/// evaluation and discarded afterward.
pub struct RollupColumnIndex {
    entries: HashMap<Expr, usize>,
}

impl RollupColumnIndex {
    /// When several rollup columns share an identical defining expression the
    /// last one wins; they are defined identically, so either answers the
    /// query the same way.
    pub fn build(selection: &Selection) -> Self {
        let mut entries = HashMap::with_capacity(selection.len());
        for (position, expr) in selection.values().enumerate() {
            entries.insert(expr.clone(), position);
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position_of(&self, expr: &Expr) -> Option<usize> {
        self.entries.get(expr).copied()
    }

    /// Synthetic name of the rollup table's column at `position`, 1-based.
    pub fn synthetic_column(position: usize, ty: SoqlType) -> ColumnRef {
        ColumnRef::new(format!("c{}", position + 1), ty)
    }

    /// The rollup column standing in for `expr`, typed as `expr` is.
    pub fn column_for(&self, expr: &Expr) -> Option<ColumnRef> {
        self.position_of(expr)
            .map(|position| Self::synthetic_column(position, expr.soql_type()))
    }

    /// Any rollup column defined as `count(*)` or `count(<literal>)`, lowest
    /// position first. `count(NULL)` counts nothing and is excluded.
    pub fn find_count_column(&self) -> Option<usize> {
        self.entries
            .iter()
            .filter(|(expr, _)| match expr {
                Expr::FunctionCall(fc) if fc.name == functions::COUNT_STAR => true,
                Expr::FunctionCall(fc) if fc.name == functions::COUNT => matches!(
                    fc.args.as_slice(),
                    [Expr::Literal(lit)] if *lit != Literal::Null
                ),
                _ => false,
            })
            .map(|(_, position)| *position)
            .min()
    }

    /// A rollup column defined as a truncation of `arg` at `level` or finer,
    /// coarsest level first, lowest position first within a level.
    pub fn find_truncated_column(&self, level: TruncLevel, arg: &Expr) -> Option<usize> {
        level.and_finer().find_map(|candidate| {
            self.entries
                .iter()
                .filter(|(expr, _)| Self::is_truncation_of(expr, candidate, arg))
                .map(|(_, position)| *position)
                .min()
        })
    }

    /// A rollup column defined as any truncation of `arg`, coarsest first.
    pub fn find_any_truncated_column(&self, arg: &Expr) -> Option<usize> {
        self.find_truncated_column(TruncLevel::Year, arg)
    }

    fn is_truncation_of(expr: &Expr, level: TruncLevel, arg: &Expr) -> bool {
        match expr {
            Expr::FunctionCall(fc) => {
                fc.name == level.function_name() && fc.args.as_slice() == std::slice::from_ref(arg)
            }
            _ => false,
        }
    }
}

/// `sum(<rollup column at position>)` as a SoQL number; the rewritten form of
/// a matched `count`, exploiting count-to-sum re-aggregation.
pub fn sum_of_column(position: usize) -> Expr {
    let column = RollupColumnIndex::synthetic_column(position, SoqlType::Number);
    Expr::FunctionCall(
        FunctionCall::new(functions::SUM, vec![Expr::Column(column)])
            .with_binding("a", SoqlType::Number),
    )
}
