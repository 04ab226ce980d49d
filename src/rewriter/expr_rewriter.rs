use crate::ast::{functions, Expr, FunctionCall, Literal, SoqlType};
use crate::rewriter::{sum_of_column, RollupColumnIndex, TruncLevel};

/// Maps a query expression onto an equivalent expression over rollup columns.
/// Absence is the only failure signal; nothing here panics or errors.
pub struct ExprRewriter;

impl ExprRewriter {
    pub fn rewrite(expr: &Expr, idx: &RollupColumnIndex) -> Option<Expr> {
        match expr {
            Expr::Literal(_) => Some(expr.clone()),
            Expr::Column(_) => idx.column_for(expr).map(Expr::Column),
            Expr::FunctionCall(fc) => Self::rewrite_call(fc, idx),
        }
    }

    fn rewrite_call(fc: &FunctionCall, idx: &RollupColumnIndex) -> Option<Expr> {
        // count(*) / count(<non-null literal>) re-aggregate as a sum over any
        // rollup count column.
        if Self::counts_every_row(fc) {
            return idx.find_count_column().map(sum_of_column);
        }

        // Other counts re-aggregate only when the whole call exists verbatim.
        if fc.name == functions::COUNT {
            return idx
                .position_of(&Expr::FunctionCall(fc.clone()))
                .map(sum_of_column);
        }

        // Specialized date-truncation shapes. When the shape fits but no
        // eligible rollup column exists, fall through to the general rules.
        if Self::is_between_over_timestamps(fc) {
            if let Some(rewritten) = Self::rewrite_between_date_trunc(fc, idx) {
                return Some(rewritten);
            }
        }
        if Self::is_compare_over_timestamps(fc) {
            if let Some(rewritten) = Self::rewrite_compare_date_trunc(fc, idx) {
                return Some(rewritten);
            }
        }
        if fc.name == functions::IS_NOT_NULL {
            if let Some(rewritten) = Self::rewrite_is_not_null(fc, idx) {
                return Some(rewritten);
            }
        }

        if !fc.is_aggregate() {
            // An exact match replaces the whole call; otherwise every
            // argument must rewrite on its own. Partial success is rejected.
            let whole = Expr::FunctionCall(fc.clone());
            if let Some(column) = idx.column_for(&whole) {
                return Some(Expr::Column(column));
            }
            let args: Option<Vec<Expr>> =
                fc.args.iter().map(|arg| Self::rewrite(arg, idx)).collect();
            return args.map(|args| Expr::FunctionCall(Self::with_args(fc, args)));
        }

        // max/min/sum re-aggregate their own grouped output; count and avg do
        // not, so only an exact whole-call match qualifies here.
        if functions::is_self_aggregatable(&fc.name) {
            let whole = Expr::FunctionCall(fc.clone());
            return idx.position_of(&whole).map(|position| {
                let column = RollupColumnIndex::synthetic_column(position, fc.soql_type());
                Expr::FunctionCall(Self::with_args(fc, vec![Expr::Column(column)]))
            });
        }

        None
    }

    /// `count(*)` or `count(<literal>)` with a non-null literal: the count of
    /// every row in the group, whatever the literal is.
    fn counts_every_row(fc: &FunctionCall) -> bool {
        match fc.name.as_str() {
            functions::COUNT_STAR => true,
            functions::COUNT => matches!(
                fc.args.as_slice(),
                [Expr::Literal(lit)] if *lit != Literal::Null
            ),
            _ => false,
        }
    }

    fn is_between_over_timestamps(fc: &FunctionCall) -> bool {
        matches!(fc.name.as_str(), functions::BETWEEN | functions::NOT_BETWEEN)
            && fc.args.len() == 3
            && fc.args.iter().all(|arg| arg.soql_type() == SoqlType::FloatingTimestamp)
    }

    fn is_compare_over_timestamps(fc: &FunctionCall) -> bool {
        matches!(fc.name.as_str(), functions::LT | functions::GTE)
            && fc.args.len() == 2
            && fc.args.iter().all(|arg| arg.soql_type() == SoqlType::FloatingTimestamp)
    }

    /// `x between date_trunc_T(a) and date_trunc_T(b)`: a rollup column
    /// truncated at T or finer over `x` can stand in for `x`, since the
    /// bounds carry no detail below T. Coarser columns cannot distinguish
    /// values T can, so they are ineligible.
    fn rewrite_between_date_trunc(fc: &FunctionCall, idx: &RollupColumnIndex) -> Option<Expr> {
        let lower_level = Self::trunc_level_of(&fc.args[1])?;
        let upper_level = Self::trunc_level_of(&fc.args[2])?;
        if lower_level != upper_level {
            return None;
        }

        let scrutinee = &fc.args[0];
        let position = idx.find_truncated_column(lower_level, scrutinee)?;
        let column = RollupColumnIndex::synthetic_column(position, SoqlType::FloatingTimestamp);

        let lower = Self::rewrite(&fc.args[1], idx)?;
        let upper = Self::rewrite(&fc.args[2], idx)?;
        Some(Expr::FunctionCall(Self::with_args(
            fc,
            vec![Expr::Column(column), lower, upper],
        )))
    }

    /// `<timestamp column> {<, >=} to_floating_timestamp('<literal>')`: when
    /// the literal sits exactly on a truncation boundary, truncation is a
    /// floor function and the comparison survives it, so a rollup column at
    /// that level or finer can stand in for the raw column. The literal side
    /// is left untouched.
    fn rewrite_compare_date_trunc(fc: &FunctionCall, idx: &RollupColumnIndex) -> Option<Expr> {
        let scrutinee = &fc.args[0];
        scrutinee.as_column()?;

        let literal = Self::timestamp_cast_literal(&fc.args[1])?;
        let level = TruncLevel::classify_timestamp(literal)?;

        let position = idx.find_truncated_column(level, scrutinee)?;
        let column = RollupColumnIndex::synthetic_column(position, SoqlType::FloatingTimestamp);

        Some(Expr::FunctionCall(Self::with_args(
            fc,
            vec![Expr::Column(column), fc.args[1].clone()],
        )))
    }

    /// `is not null` over a bare column: truncation preserves nullness, so
    /// any truncated rollup column over it serves, coarsest first.
    fn rewrite_is_not_null(fc: &FunctionCall, idx: &RollupColumnIndex) -> Option<Expr> {
        let scrutinee = match fc.args.as_slice() {
            [arg @ Expr::Column(_)] => arg,
            _ => return None,
        };

        let position = idx.find_any_truncated_column(scrutinee)?;
        let column = RollupColumnIndex::synthetic_column(position, SoqlType::FloatingTimestamp);
        Some(Expr::FunctionCall(Self::with_args(fc, vec![Expr::Column(column)])))
    }

    fn trunc_level_of(expr: &Expr) -> Option<TruncLevel> {
        TruncLevel::from_function_name(&expr.as_function_call()?.name)
    }

    fn timestamp_cast_literal(expr: &Expr) -> Option<&str> {
        let fc = expr.as_function_call()?;
        if fc.name != functions::TO_FLOATING_TIMESTAMP {
            return None;
        }
        match fc.args.as_slice() {
            [Expr::Literal(Literal::Text(text))] => Some(text),
            _ => None,
        }
    }

    fn with_args(fc: &FunctionCall, args: Vec<Expr>) -> FunctionCall {
        FunctionCall {
            name: fc.name.clone(),
            bindings: fc.bindings.clone(),
            args,
            position: fc.position,
        }
    }
}
