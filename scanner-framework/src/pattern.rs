use common_framework::{Result, ScanError};
use regex::Regex;
use std::fmt;

/// A compiled regular expression that only matches at the cursor.
///
/// Compile these once (typically in a `Lazy` static) and borrow them as a
/// [`Pattern`] at every call site.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    source: String,
    regex: Regex,
}

impl RegexPattern {
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{})", source)).map_err(|err| {
            ScanError::invalid_argument(format!("invalid pattern /{}/: {}", source, err))
        })?;
        Ok(Self { source, regex })
    }

    /// The expression as written, without the anchoring wrapper.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Length in bytes of the match at the start of `input`, if any.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.regex.find(input).map(|m| m.end())
    }
}

impl fmt::Display for RegexPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

/// What a lookahead or token primitive should look for at the cursor.
#[derive(Debug, Clone, Copy)]
pub enum Pattern<'a> {
    /// Exact prefix of the remaining input.
    Literal(&'a str),
    /// Regular expression anchored at the cursor.
    Regex(&'a RegexPattern),
    /// A node type registered with a driver, by name. Only a driver can
    /// resolve these; the bare cursor rejects them.
    Node(&'static str),
}

impl Pattern<'_> {
    /// Length in bytes of the match at the start of `input`, if any.
    pub fn match_len(&self, input: &str) -> Result<Option<usize>> {
        match self {
            Pattern::Literal(literal) => Ok(input.starts_with(*literal).then_some(literal.len())),
            Pattern::Regex(regex) => Ok(regex.match_len(input)),
            Pattern::Node(name) => Err(ScanError::invalid_argument(format!(
                "node pattern {} needs a driver, use a literal or regex pattern here",
                name
            ))),
        }
    }
}

impl fmt::Display for Pattern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(literal) => f.write_str(literal),
            Pattern::Regex(regex) => write!(f, "{}", regex),
            Pattern::Node(name) => f.write_str(name),
        }
    }
}

impl<'a> From<&'a str> for Pattern<'a> {
    fn from(literal: &'a str) -> Self {
        Pattern::Literal(literal)
    }
}

impl<'a> From<&'a String> for Pattern<'a> {
    fn from(literal: &'a String) -> Self {
        Pattern::Literal(literal)
    }
}

impl<'a> From<&'a RegexPattern> for Pattern<'a> {
    fn from(regex: &'a RegexPattern) -> Self {
        Pattern::Regex(regex)
    }
}
