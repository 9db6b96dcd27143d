//! Coercion of dynamic values into the canonical forms matchers compare.
//!
//! Each helper either returns the canonical form or a [`MatchError`] naming
//! the offending runtime type. Nothing here panics on a type mismatch.

use crate::errorf;
use crate::matcher::MatchError;
use crate::value::{DisplayList, Equality, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// Equality as used by every matcher.
///
/// An actual value with a custom equality capability decides for itself;
/// everything else falls back to structural equality.
#[must_use]
pub fn are_equal(actual: &Value, expected: &Value) -> bool {
    match actual {
        Value::Object(obj) => object_equals(obj, expected),
        _ => actual == expected,
    }
}

/// An object always equals itself; otherwise its capability decides.
pub(crate) fn object_equals(obj: &Arc<dyn Equality>, other: &Value) -> bool {
    match other {
        Value::Object(o) if Arc::ptr_eq(obj, o) => true,
        _ => obj.equals(other),
    }
}

/// A null value, or a typed null pointer.
#[must_use]
pub fn is_nil(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Ref(r) => r.is_null(),
        _ => false,
    }
}

/// Any floating-point value as `f64`.
///
/// # Errors
/// Returns an error for every non-float value, integers included.
pub fn to_f64(value: &Value) -> Result<f64, MatchError<'_>> {
    match value {
        Value::F32(v) => Ok(f64::from(*v)),
        Value::F64(v) => Ok(*v),
        other => Err(errorf!(
            "Expected a float, but was '{other}' of type '{}'",
            other.type_name()
        )
        .into()),
    }
}

/// The address a pointer-like value refers to; `0` for a typed null.
///
/// # Errors
/// Returns an error if the value is not pointer-like.
pub fn pointer_of(value: &Value) -> Result<usize, MatchError<'_>> {
    match value {
        Value::Ref(r) => Ok(r.addr()),
        other => Err(errorf!(
            "Expected a pointer, but was '{other}' of type '{}'",
            other.type_name()
        )
        .into()),
    }
}

/// The elements of a sequence-like value, in order.
///
/// Lists are borrowed as they are. Streams are drained until closed, and
/// iterables are iterated once with the result coerced again.
///
/// # Errors
/// Returns an error if the value is not sequence-like or a bounded stream
/// times out.
pub fn to_list(value: &Value) -> Result<Cow<'_, [Value]>, MatchError<'_>> {
    match value {
        Value::List(items) => Ok(Cow::Borrowed(items)),
        Value::Stream(stream) => stream
            .drain()
            .map(Cow::Owned)
            .map_err(|e| errorf!("{e}").into()),
        Value::Iter(it) => expand(it.iterate()).map(Cow::Owned),
        other => Err(not_iterable(other)),
    }
}

fn expand(value: Value) -> Result<Vec<Value>, MatchError<'static>> {
    match value {
        Value::List(items) => Ok(items),
        Value::Stream(stream) => stream.drain().map_err(|e| errorf!("{e}").into()),
        Value::Iter(it) => expand(it.iterate()),
        other => Err(errorf!(
            "Unknown type '{}', not iterable: {other}",
            other.type_name()
        )
        .into()),
    }
}

fn not_iterable(value: &Value) -> MatchError<'_> {
    errorf!(
        "Unknown type '{}', not iterable: {value}",
        value.type_name()
    )
    .into()
}

/// Whether any element of `haystack` equals `needle`.
#[must_use]
pub fn list_contains(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|item| are_equal(item, needle))
}

/// Renders a coerced list; shared by the collection matchers' messages.
pub(crate) fn render_list(items: &[Value]) -> String {
    DisplayList(items).to_string()
}
