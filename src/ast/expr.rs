use std::fmt;

use crate::ast::{ColumnRef, FunctionCall, Literal, SoqlType};

/// A SoQL scalar expression. Structural equality (position metadata excluded)
/// is what decides whether an expression exists verbatim in a rollup.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    Column(ColumnRef),
    FunctionCall(FunctionCall),
}

impl Expr {
    pub fn soql_type(&self) -> SoqlType {
        match self {
            Expr::Literal(lit) => lit.soql_type(),
            Expr::Column(col) => col.ty,
            Expr::FunctionCall(fc) => fc.soql_type(),
        }
    }

    pub fn as_column(&self) -> Option<&ColumnRef> {
        match self {
            Expr::Column(col) => Some(col),
            _ => None,
        }
    }

    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Expr::FunctionCall(fc) => Some(fc),
            _ => None,
        }
    }

    pub fn is_aggregate_call(&self) -> bool {
        matches!(self, Expr::FunctionCall(fc) if fc.is_aggregate())
    }

    /// Rebuilds the tree with every column name passed through `f`.
    /// Qualifiers, types and everything else are preserved.
    pub fn map_columns(&self, f: &impl Fn(&str) -> String) -> Expr {
        match self {
            Expr::Literal(_) => self.clone(),
            Expr::Column(col) => Expr::Column(ColumnRef {
                qualifier: col.qualifier.clone(),
                name: f(&col.name),
                ty: col.ty,
            }),
            Expr::FunctionCall(fc) => Expr::FunctionCall(FunctionCall {
                name: fc.name.clone(),
                bindings: fc.bindings.clone(),
                args: fc.args.iter().map(|arg| arg.map_columns(f)).collect(),
                position: fc.position,
            }),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{}", lit),
            Expr::Column(col) => write!(f, "{}", col),
            Expr::FunctionCall(fc) => write!(f, "{}", fc),
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(_) => write!(f, "Literal({})", self),
            Expr::Column(_) => write!(f, "Column({})", self),
            Expr::FunctionCall(_) => write!(f, "FunctionCall({})", self),
        }
    }
}
