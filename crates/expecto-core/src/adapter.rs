//! Routing matcher outcomes to an error logger.

use crate::config::ExpectConfig;
use crate::matcher::Matcher;
use crate::message::Message;
use crate::value::Value;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, trace, warn};

/// Source position of an expectation. Carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    file: String,
    line: u32,
    column: u32,
}

impl Location {
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location of the code calling this function.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let here = std::panic::Location::caller();
        Self::new(here.file(), here.line(), here.column())
    }

    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A failed expectation, ready for the error logger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{location}: {message}")]
pub struct ExpectationError {
    pub message: String,
    pub location: Location,
}

/// Sink for failed expectations.
///
/// Implementations own their storage and their synchronization; the adapter
/// makes at most one call per expectation.
pub trait ErrorLogger {
    fn add_error(&self, error: ExpectationError);
}

/// An [`ErrorLogger`] that keeps every error in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    errors: Mutex<Vec<ExpectationError>>,
}

impl RecordingLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded errors, oldest first.
    #[must_use]
    pub fn errors(&self) -> Vec<ExpectationError> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorLogger for RecordingLogger {
    fn add_error(&self, error: ExpectationError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
    }
}

/// Evaluates expectations at one location and reports failures.
pub struct MatcherAdapter<'l, L: ErrorLogger + ?Sized> {
    location: &'l Location,
    log: &'l L,
    config: ExpectConfig,
}

impl<'l, L: ErrorLogger + ?Sized> MatcherAdapter<'l, L> {
    #[must_use]
    pub fn new(location: &'l Location, log: &'l L) -> Self {
        Self {
            location,
            log,
            config: ExpectConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ExpectConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn location(&self) -> &Location {
        self.location
    }

    /// Check `actual` against `matcher`, with `None` standing for a missing
    /// expected value.
    ///
    /// A matcher error is reported in preference to the verdict. A failed
    /// verdict reports its failure message. A passing expectation has no
    /// effect, and no message is rendered for it.
    pub fn expect<M: Matcher + ?Sized>(
        &self,
        actual: &Value,
        matcher: &M,
        expected: Option<&Value>,
    ) {
        match matcher.match_optional(actual, expected) {
            Err(err) => {
                warn!(location = %self.location, "matcher error");
                self.add_error(&err.0);
            }
            Ok(verdict) if !verdict.ok => {
                debug!(location = %self.location, "expectation failed");
                self.add_error(verdict.failure_message());
            }
            Ok(_) => {
                if self.config.log_successes {
                    trace!(location = %self.location, "expectation passed");
                }
            }
        }
    }

    fn add_error(&self, message: &Message<'_>) {
        let message = self.config.limit_message(message.render());
        self.log.add_error(ExpectationError {
            message,
            location: self.location.clone(),
        });
    }
}

/// Evaluate an expectation through a [`MatcherAdapter`], converting the
/// actual and expected operands with `Value::from`.
///
/// ```
/// use expecto_core::{expect, matchers::equals, Location, MatcherAdapter, RecordingLogger};
///
/// let log = RecordingLogger::new();
/// let here = Location::caller();
/// let adapter = MatcherAdapter::new(&here, &log);
///
/// expect!(adapter, 2 + 2, equals, 4);
/// expect!(adapter, "four", equals, 4);
/// assert_eq!(log.len(), 1);
/// ```
#[macro_export]
macro_rules! expect {
    ($adapter:expr, $actual:expr, $matcher:expr $(,)?) => {
        $adapter.expect(&$crate::Value::from($actual), &$matcher, ::std::option::Option::None)
    };
    ($adapter:expr, $actual:expr, $matcher:expr, $expected:expr $(,)?) => {
        $adapter.expect(
            &$crate::Value::from($actual),
            &$matcher,
            ::std::option::Option::Some(&$crate::Value::from($expected)),
        )
    };
}
