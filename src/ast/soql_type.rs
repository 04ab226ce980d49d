use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoqlType {
    Text,
    Number,
    Boolean,
    FloatingTimestamp,
    Null,
}

impl SoqlType {
    pub fn name(&self) -> &'static str {
        match self {
            SoqlType::Text => "text",
            SoqlType::Number => "number",
            SoqlType::Boolean => "boolean",
            SoqlType::FloatingTimestamp => "floating_timestamp",
            SoqlType::Null => "null",
        }
    }
}

impl fmt::Display for SoqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
