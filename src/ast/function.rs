use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ast::{Expr, SoqlType};

/// Source span of a call in the original query text. Excluded from equality and
/// hashing: two calls are the same expression no matter where they were typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub start: usize,
    pub end: usize,
}

/// Well-known SoQL function identifiers used by the rewrite rules.
pub mod functions {
    pub const COUNT: &str = "count";
    pub const COUNT_STAR: &str = "count(*)";
    pub const SUM: &str = "sum";
    pub const MAX: &str = "max";
    pub const MIN: &str = "min";
    pub const AVG: &str = "avg";

    pub const EQ: &str = "=";
    pub const LT: &str = "<";
    pub const GTE: &str = ">=";
    pub const AND: &str = "and";
    pub const BETWEEN: &str = "between";
    pub const NOT_BETWEEN: &str = "not between";
    pub const IS_NOT_NULL: &str = "is not null";

    pub const DATE_TRUNC_Y: &str = "date_trunc_y";
    pub const DATE_TRUNC_YM: &str = "date_trunc_ym";
    pub const DATE_TRUNC_YMD: &str = "date_trunc_ymd";
    pub const TO_FLOATING_TIMESTAMP: &str = "to_floating_timestamp";

    pub fn is_aggregate(name: &str) -> bool {
        matches!(name, COUNT | COUNT_STAR | SUM | MAX | MIN | AVG)
    }

    /// Aggregates that can be re-applied to their own grouped output:
    /// max of per-group maxes is the overall max, same for min and sum.
    /// count and avg do not have this property.
    pub fn is_self_aggregatable(name: &str) -> bool {
        matches!(name, MAX | MIN | SUM)
    }
}

#[derive(Clone)]
pub struct FunctionCall {
    pub name: String,
    /// Type-variable bindings of the monomorphic instance, e.g. `a -> number`.
    pub bindings: BTreeMap<String, SoqlType>,
    pub args: Vec<Expr>,
    pub position: Position,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self { name: name.into(), bindings: BTreeMap::new(), args, position: Position::default() }
    }

    pub fn with_binding(mut self, var: impl Into<String>, ty: SoqlType) -> Self {
        self.bindings.insert(var.into(), ty);
        self
    }

    pub fn is_aggregate(&self) -> bool {
        functions::is_aggregate(&self.name)
    }

    pub fn soql_type(&self) -> SoqlType {
        match self.name.as_str() {
            functions::COUNT | functions::COUNT_STAR | functions::SUM | functions::AVG => SoqlType::Number,
            functions::MAX | functions::MIN => self.args.first().map_or(SoqlType::Null, Expr::soql_type),
            functions::DATE_TRUNC_Y
            | functions::DATE_TRUNC_YM
            | functions::DATE_TRUNC_YMD
            | functions::TO_FLOATING_TIMESTAMP => SoqlType::FloatingTimestamp,
            functions::EQ
            | functions::LT
            | functions::GTE
            | functions::AND
            | functions::BETWEEN
            | functions::NOT_BETWEEN
            | functions::IS_NOT_NULL => SoqlType::Boolean,
            _ => self.bindings.get("a").copied().unwrap_or(SoqlType::Null),
        }
    }
}

impl PartialEq for FunctionCall {
    fn eq(&self, other: &Self) -> bool {
        // position deliberately ignored
        self.name == other.name && self.bindings == other.bindings && self.args == other.args
    }
}

impl Eq for FunctionCall {}

impl Hash for FunctionCall {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.bindings.hash(state);
        self.args.hash(state);
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == functions::COUNT_STAR {
            return write!(f, "count(*)");
        }
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionCall({})", self)
    }
}
