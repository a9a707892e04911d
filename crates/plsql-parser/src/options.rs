//! Parse options and the cooperative cancellation budget.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Knobs for a single parse.
///
/// ```yaml
/// max_tokens: 50000
/// timeout_ms: 250
/// mark_error_nodes: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Stop after consuming this many non-trivia tokens.
    pub max_tokens: Option<usize>,
    /// Stop once this much wall-clock time has elapsed.
    pub timeout_ms: Option<u64>,
    /// Wrap statement-level productions that produced diagnostics in an
    /// `ERROR` node.
    pub mark_error_nodes: bool,
}

impl ParseOptions {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_error_nodes(mut self) -> Self {
        self.mark_error_nodes = true;
        self
    }
}

/// Limits checked between statement-level productions.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget {
    max_tokens: Option<usize>,
    deadline: Option<Instant>,
}

impl Budget {
    pub(crate) fn new(options: &ParseOptions) -> Self {
        Self {
            max_tokens: options.max_tokens,
            deadline: options
                .timeout_ms
                .and_then(|ms| Instant::now().checked_add(Duration::from_millis(ms))),
        }
    }

    /// Why the parse must stop, if it must.
    pub(crate) fn exceeded(&self, consumed: usize) -> Option<&'static str> {
        if self.max_tokens.is_some_and(|max| consumed >= max) {
            return Some("token budget exhausted");
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some("deadline passed");
        }
        None
    }
}
