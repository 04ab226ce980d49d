use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored rollup definition: a name unique within its dataset and the SoQL
/// text that defines the rollup's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupInfo {
    pub name: String,
    pub soql: String,
}

impl RollupInfo {
    pub fn new(name: impl Into<String>, soql: impl Into<String>) -> Self {
        Self { name: name.into(), soql: soql.into() }
    }
}

impl fmt::Display for RollupInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.soql)
    }
}
