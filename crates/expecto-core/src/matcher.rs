//! The matcher contract.
//!
//! A matcher compares an actual value against an expected one and answers
//! with either a [`Verdict`] or a [`MatchError`]:
//!
//! - `Verdict::ok`: whether the values match.
//! - `Verdict::pos`: message for a failed expectation.
//! - `Verdict::neg`: message for a failed expectation when the matcher is
//!   wrapped in [`Not`].
//! - `MatchError`: an unrecoverable problem, such as an argument of the
//!   wrong type. It takes priority over any verdict.

use crate::message::Message;
use crate::value::Value;
use thiserror::Error;

static NIL: Value = Value::Nil;

/// An unrecoverable matcher error. Rendered lazily.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct MatchError<'a>(pub Message<'a>);

impl<'a> From<Message<'a>> for MatchError<'a> {
    fn from(message: Message<'a>) -> Self {
        Self(message)
    }
}

/// Outcome of a matcher that did not error.
///
/// Both messages are always populated so that negation only has to swap
/// them.
#[derive(Debug, Clone)]
pub struct Verdict<'a> {
    pub ok: bool,
    pub pos: Message<'a>,
    pub neg: Message<'a>,
}

impl<'a> Verdict<'a> {
    #[must_use]
    pub const fn new(ok: bool, pos: Message<'a>, neg: Message<'a>) -> Self {
        Self { ok, pos, neg }
    }

    /// Flip `ok` and swap the two messages.
    #[must_use]
    pub fn negate(self) -> Self {
        Self {
            ok: !self.ok,
            pos: self.neg,
            neg: self.pos,
        }
    }

    /// The message to report when this verdict is a failure.
    #[must_use]
    pub const fn failure_message(&self) -> &Message<'a> {
        &self.pos
    }
}

/// Result of invoking a matcher.
pub type MatchResult<'a> = Result<Verdict<'a>, MatchError<'a>>;

/// A predicate over an actual and an expected value.
///
/// Matchers hold no mutable state and may be shared across threads. Any
/// function with the signature of [`Matcher::matches`] is a matcher, so the
/// predicates in `crate::matchers` are plain functions.
pub trait Matcher: Send + Sync {
    /// Compare `actual` with `expected`.
    ///
    /// # Errors
    /// Returns a `MatchError` when the operands cannot be compared, for
    /// example because one has the wrong runtime type.
    fn matches<'a>(&self, actual: &'a Value, expected: &'a Value) -> MatchResult<'a>;

    /// Compare with an optional expected value; `None` is matched as
    /// [`Value::Nil`].
    ///
    /// # Errors
    /// Same as [`Matcher::matches`].
    fn match_optional<'a>(
        &self,
        actual: &'a Value,
        expected: Option<&'a Value>,
    ) -> MatchResult<'a> {
        self.matches(actual, expected.unwrap_or(&NIL))
    }
}

impl<F> Matcher for F
where
    F: for<'a> Fn(&'a Value, &'a Value) -> MatchResult<'a> + Send + Sync,
{
    fn matches<'a>(&self, actual: &'a Value, expected: &'a Value) -> MatchResult<'a> {
        self(actual, expected)
    }
}

/// Negation of a matcher. See [`not`].
#[derive(Debug, Clone, Copy)]
pub struct Not<M>(M);

impl<M: Matcher> Matcher for Not<M> {
    fn matches<'a>(&self, actual: &'a Value, expected: &'a Value) -> MatchResult<'a> {
        self.0.matches(actual, expected).map(Verdict::negate)
    }
}

/// Negates the meaning of a matcher: matches when `matcher` does not, and
/// the other way around. Errors pass through unchanged.
#[must_use]
pub const fn not<M: Matcher>(matcher: M) -> Not<M> {
    Not(matcher)
}

/// Pack several expected values into one list, for matchers such as
/// `contains_all` that take a collection.
#[must_use]
pub fn values<I>(items: I) -> Value
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    items.into_iter().collect()
}

/// Macro form of [`values`] that accepts mixed element types.
///
/// ```
/// use expecto_core::{values, Value};
///
/// let v = values![1, "two", 3.0];
/// assert_eq!(v.to_string(), "[1 two 3]");
/// ```
#[macro_export]
macro_rules! values {
    ($($item:expr),* $(,)?) => {
        $crate::Value::List(::std::vec![$($crate::Value::from($item)),*])
    };
}
