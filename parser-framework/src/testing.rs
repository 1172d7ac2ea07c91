//! Fixture harness for grammar authors.
//!
//! A [`Fixture`] pairs a source text with either the fields the parse must
//! produce or a pattern the parse error must match. [`Fixture::check`] runs
//! the node type through recognition, parsing, and a render/re-parse round
//! trip, each on a fresh driver.

use crate::driver::Driver;
use crate::registry::Grammar;
use crate::traits::Syntax;
use common_framework::ScanError;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum Expectation {
    /// The parsed node's JSON must contain these fields.
    Fields(Value),
    /// Parsing must fail with an error whose text matches.
    Error(Regex),
}

#[derive(Debug, Clone)]
pub struct Fixture {
    input: String,
    options: Option<Value>,
    expectation: Expectation,
}

/// Why a fixture did not hold.
#[derive(Error, Debug)]
pub enum HarnessFailure {
    #[error("grammar setup failed: {0}")]
    Setup(ScanError),

    #[error("{node} did not recognize {input:?}")]
    NotRecognized { node: &'static str, input: String },

    #[error("parsing {input:?} as {node} failed: {error}")]
    ParseFailed {
        node: &'static str,
        input: String,
        error: ScanError,
    },

    #[error("{node} parsed from {input:?} has unexpected fields\nexpected: {expected}\n  actual: {actual}")]
    FieldsMismatch {
        node: &'static str,
        input: String,
        expected: Value,
        actual: Value,
    },

    #[error("{node} rendered as {rendered:?} which does not parse back: {error}")]
    RenderNotParsable {
        node: &'static str,
        rendered: String,
        error: ScanError,
    },

    #[error("{node} rendered as {rendered:?} parses back to different fields\nexpected: {expected}\n  actual: {actual}")]
    RenderMismatch {
        node: &'static str,
        rendered: String,
        expected: Value,
        actual: Value,
    },

    #[error("expected {node} to fail on {input:?} with /{pattern}/, but it parsed")]
    UnexpectedSuccess {
        node: &'static str,
        input: String,
        pattern: String,
    },

    #[error("{node} failed on {input:?} but not with /{pattern}/: {error}")]
    ErrorMismatch {
        node: &'static str,
        input: String,
        pattern: String,
        error: ScanError,
    },
}

impl Fixture {
    pub fn fields(input: impl Into<String>, expected: Value) -> Self {
        Self {
            input: input.into(),
            options: None,
            expectation: Expectation::Fields(expected),
        }
    }

    pub fn error(input: impl Into<String>, pattern: Regex) -> Self {
        Self {
            input: input.into(),
            options: None,
            expectation: Expectation::Error(pattern),
        }
    }

    /// Options passed to every recognize, parse and render call.
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    /// Runs the fixture against node type `T` of grammar `G`.
    pub fn check<G: Grammar, T: Syntax>(&self) -> Result<(), HarnessFailure> {
        debug!(node = T::NAME, input = %self.input, "check fixture");
        match &self.expectation {
            Expectation::Fields(expected) => self.check_fields::<G, T>(expected),
            Expectation::Error(pattern) => self.check_error::<G, T>(pattern),
        }
    }

    fn driver<G: Grammar>(text: &str) -> Result<Driver, HarnessFailure> {
        Driver::new::<G>(text).map_err(HarnessFailure::Setup)
    }

    fn check_fields<G: Grammar, T: Syntax>(&self, expected: &Value) -> Result<(), HarnessFailure> {
        let options = self.options.as_ref();

        let driver = Self::driver::<G>(&self.input)?;
        if !driver.is_node::<T>(options).map_err(|error| self.parse_failed::<T>(error))? {
            return Err(HarnessFailure::NotRecognized {
                node: T::NAME,
                input: self.input.clone(),
            });
        }

        let mut driver = Self::driver::<G>(&self.input)?;
        let id = driver
            .parse::<T>(options)
            .map_err(|error| self.parse_failed::<T>(error))?;
        let actual = driver.node(id).to_json();
        if !fields_match(expected, &actual) {
            return Err(HarnessFailure::FieldsMismatch {
                node: T::NAME,
                input: self.input.clone(),
                expected: expected.clone(),
                actual,
            });
        }

        // render a detached copy so the original node is left untouched
        let copy = driver
            .tree_mut()
            .duplicate(id)
            .map_err(HarnessFailure::Setup)?;
        let rendered = driver.node(copy).render(options);
        let mut driver = Self::driver::<G>(rendered.as_str())?;
        let id = driver
            .parse::<T>(options)
            .map_err(|error| HarnessFailure::RenderNotParsable {
                node: T::NAME,
                rendered: rendered.clone(),
                error,
            })?;
        let actual = driver.node(id).to_json();
        if !fields_match(expected, &actual) {
            return Err(HarnessFailure::RenderMismatch {
                node: T::NAME,
                rendered,
                expected: expected.clone(),
                actual,
            });
        }
        Ok(())
    }

    fn check_error<G: Grammar, T: Syntax>(&self, pattern: &Regex) -> Result<(), HarnessFailure> {
        let mut driver = Self::driver::<G>(&self.input)?;
        match driver.parse::<T>(self.options.as_ref()) {
            Ok(_) => Err(HarnessFailure::UnexpectedSuccess {
                node: T::NAME,
                input: self.input.clone(),
                pattern: pattern.as_str().to_string(),
            }),
            Err(error) if pattern.is_match(&error.to_string()) => Ok(()),
            Err(error) => Err(HarnessFailure::ErrorMismatch {
                node: T::NAME,
                input: self.input.clone(),
                pattern: pattern.as_str().to_string(),
                error,
            }),
        }
    }

    fn parse_failed<T: Syntax>(&self, error: ScanError) -> HarnessFailure {
        HarnessFailure::ParseFailed {
            node: T::NAME,
            input: self.input.clone(),
            error,
        }
    }
}

/// Partial structural comparison: every key of an expected object must be
/// present in `actual` and match recursively. Arrays must have the same
/// length; other values must be equal.
pub fn fields_match(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => expected.iter().all(|(key, value)| {
            actual
                .get(key)
                .is_some_and(|actual| fields_match(value, actual))
        }),
        (Value::Array(expected), Value::Array(actual)) => {
            expected.len() == actual.len()
                && expected
                    .iter()
                    .zip(actual)
                    .all(|(expected, actual)| fields_match(expected, actual))
        }
        _ => expected == actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_match_is_partial() {
        let actual = json!({"name": "x", "args": [{"v": 1, "w": 2}], "extra": true});
        assert!(fields_match(&json!({"name": "x"}), &actual));
        assert!(fields_match(&json!({"args": [{"v": 1}]}), &actual));
        assert!(!fields_match(&json!({"args": []}), &actual));
        assert!(!fields_match(&json!({"missing": null}), &actual));
        assert!(!fields_match(&json!({"name": "y"}), &actual));
    }
}
