use std::fmt;

use crate::ast::Expr;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OrderBy {
    pub expr: Expr,
    pub ascending: bool,
    pub nulls_last: bool,
}

impl OrderBy {
    pub fn asc(expr: Expr) -> Self {
        Self { expr, ascending: true, nulls_last: true }
    }

    pub fn desc(expr: Expr) -> Self {
        Self { expr, ascending: false, nulls_last: true }
    }

    /// Same sort entry over a different expression; direction and null
    /// ordering ride through a rewrite unchanged.
    pub fn with_expr(&self, expr: Expr) -> Self {
        Self { expr, ascending: self.ascending, nulls_last: self.nulls_last }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} nulls {}",
            self.expr,
            if self.ascending { "asc" } else { "desc" },
            if self.nulls_last { "last" } else { "first" },
        )
    }
}

impl fmt::Debug for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderBy({})", self)
    }
}
