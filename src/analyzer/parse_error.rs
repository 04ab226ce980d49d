use std::fmt::Display;

/// A structured parse error from the external SoQL parser: the message plus
/// the offending slice of the rollup's query text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self { message: message.into(), text: text.into(), start, end }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ParseError: {}\n  at [{}:{}] -> '{}'",
            self.message, self.start, self.end, self.text
        )
    }
}

/// Why a rollup definition could not be analyzed. `Parse` is the expected,
/// domain-level failure; `Other` is anything the parser did not anticipate.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeFailure {
    Parse(ParseError),
    Other(String),
}

impl Display for AnalyzeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeFailure::Parse(err) => write!(f, "{}", err),
            AnalyzeFailure::Other(message) => write!(f, "AnalyzeFailure: {}", message),
        }
    }
}
