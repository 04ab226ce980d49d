use std::fmt;

use crate::ast::SoqlType;

/// A reference to a column of the dataset (or rollup table) being queried.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub qualifier: Option<String>,
    pub name: String,
    pub ty: SoqlType,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, ty: SoqlType) -> Self {
        Self { qualifier: None, name: name.into(), ty }
    }

    pub fn with_qualifier(qualifier: impl Into<String>, name: impl Into<String>, ty: SoqlType) -> Self {
        Self { qualifier: Some(qualifier.into()), name: name.into(), ty }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{}.{}", q, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Debug for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnRef({}: {})", self, self.ty)
    }
}
