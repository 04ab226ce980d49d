use ordered_float::NotNan;
use std::fmt::{self, Display};

use crate::ast::SoqlType;

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Text(String),
    Number(NotNan<f64>),
    Boolean(bool),
    Null,
}

impl Literal {
    pub fn number(value: f64) -> Self {
        Literal::Number(NotNan::new(value).unwrap_or_default())
    }

    pub fn soql_type(&self) -> SoqlType {
        match self {
            Literal::Text(_) => SoqlType::Text,
            Literal::Number(_) => SoqlType::Number,
            Literal::Boolean(_) => SoqlType::Boolean,
            Literal::Null => SoqlType::Null,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(s) => write!(f, "'{}'", s),
            Literal::Number(n) => write!(f, "{}", n.into_inner()),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "NULL"),
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(_) => write!(f, "Text({})", self),
            Literal::Number(_) => write!(f, "Number({})", self),
            Literal::Boolean(_) => write!(f, "Boolean({})", self),
            Literal::Null => write!(f, "Null"),
        }
    }
}
