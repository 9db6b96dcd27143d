//! Composable matchers for expectation-style tests.
//!
//! This crate provides the evaluation kernel beneath an
//! `expect(actual, matcher, expected)` call:
//! - A dynamic [`Value`] model and the coercions matchers rely on
//! - Lazily rendered failure [`Message`]s
//! - The [`Matcher`] contract and the [`not`] combinator
//! - Built-in matchers: equality, identity, nil, booleans, criteria,
//!   float tolerance and collection membership
//! - A [`MatcherAdapter`] that reports failures to an [`ErrorLogger`]
//! - Adapter configuration loaded from YAML
//!
//! ```
//! use expecto_core::matchers::{contains, is_within};
//! use expecto_core::{expect, not, Location, MatcherAdapter, RecordingLogger};
//!
//! let log = RecordingLogger::new();
//! let here = Location::caller();
//! let adapter = MatcherAdapter::new(&here, &log);
//!
//! expect!(adapter, vec![1, 2, 3], contains, 2);
//! expect!(adapter, vec![1, 2, 3], not(contains), 5);
//! expect!(adapter, 0.1 + 0.2, is_within(1e-9), 0.3);
//! assert!(log.is_empty());
//! ```

pub mod adapter;
pub mod coerce;
pub mod config;
pub mod matcher;
pub mod matchers;
pub mod message;
pub mod value;

pub use adapter::{ErrorLogger, ExpectationError, Location, MatcherAdapter, RecordingLogger};
pub use config::{
    CONFIG_FILE_NAME, ConfigError, ConfigOverrides, ExpectConfig, apply_overrides, load_config,
};
pub use matcher::{MatchError, MatchResult, Matcher, Not, Verdict, not, values};
pub use matchers::{
    IsWithin, contains, contains_all, equals, is_false, is_nil, is_same, is_true, is_within,
    satisfies,
};
pub use message::Message;
pub use value::{DisplayList, DrainError, Equality, Iterable, Ref, Stream, Value};
