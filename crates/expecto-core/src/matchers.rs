//! Built-in matchers.
//!
//! Every matcher here is usable wherever a [`Matcher`] is expected. The
//! predicates without parameters are plain functions; [`IsWithin`] carries
//! its tolerance.
//!
//! Not provided yet: "contains any", "contains exactly", "contains in
//! order" and "contains in partial order". They can be built on
//! [`coerce::to_list`](crate::coerce::to_list) and
//! [`coerce::list_contains`](crate::coerce::list_contains).

use crate::coerce::{
    are_equal, is_nil as nil_like, list_contains, pointer_of, render_list, to_f64, to_list,
};
use crate::errorf;
use crate::matcher::{MatchResult, Matcher, Verdict};
use crate::value::Value;
use std::rc::Rc;

static TRUE: Value = Value::Bool(true);
static FALSE: Value = Value::Bool(false);

/// The actual value must equal the expected value.
///
/// An actual value with custom equality decides for itself; otherwise
/// structural equality applies. Never errors.
///
/// Numbers compare by value within their family: `3_i32` equals `3_u64` and
/// `0.5_f32` equals `0.5_f64`, while an integer never equals a float. Code
/// that distinguishes widths or signedness must check the type separately.
pub fn equals<'a>(actual: &'a Value, expected: &'a Value) -> MatchResult<'a> {
    Ok(Verdict::new(
        are_equal(actual, expected),
        errorf!("Expected '{expected}' but was '{actual}'"),
        errorf!("Did not expect '{expected}' but was '{actual}'"),
    ))
}

/// The actual value must point to the same location as the expected value.
///
/// # Errors
/// Either operand not being pointer-like is an error.
pub fn is_same<'a>(actual: &'a Value, expected: &'a Value) -> MatchResult<'a> {
    let actual_ptr = pointer_of(actual)?;
    let expected_ptr = pointer_of(expected)?;
    Ok(Verdict::new(
        actual_ptr == expected_ptr,
        errorf!("Expected '{expected}' but was '{actual}'"),
        errorf!("Did not expect '{expected}' but was '{actual}'"),
    ))
}

/// The actual value must be nil, or a typed null pointer. The expected
/// value is ignored.
pub fn is_nil<'a>(actual: &'a Value, _expected: &'a Value) -> MatchResult<'a> {
    Ok(Verdict::new(
        nil_like(actual),
        errorf!("Expected <nil> but was '{actual}'"),
        errorf!("Did not expect <nil> but was '{actual}'"),
    ))
}

/// The actual value must be `true`.
pub fn is_true<'a>(actual: &'a Value, _expected: &'a Value) -> MatchResult<'a> {
    equals(actual, &TRUE)
}

/// The actual value must be `false`.
pub fn is_false<'a>(actual: &'a Value, _expected: &'a Value) -> MatchResult<'a> {
    equals(actual, &FALSE)
}

/// The actual value must satisfy the given criteria, a boolean computed by
/// the caller.
///
/// Both messages are the same text: there is no better phrasing for the
/// negated case.
///
/// # Errors
/// A criteria that is not a boolean is an error.
pub fn satisfies<'a>(actual: &'a Value, criteria: &'a Value) -> MatchResult<'a> {
    let Value::Bool(satisfied) = criteria else {
        return Err(errorf!(
            "Expected criteria to be a bool, but was '{criteria}' of type '{}'",
            criteria.type_name()
        )
        .into());
    };
    let message = errorf!("Criteria not satisfied by '{actual}'");
    Ok(Verdict::new(*satisfied, message.clone(), message))
}

/// Float comparison with a tolerance. See [`is_within`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsWithin {
    delta: f64,
}

impl IsWithin {
    #[must_use]
    pub const fn new(delta: f64) -> Self {
        Self { delta }
    }

    /// Strictly inside the band: a difference equal to `delta` fails.
    #[must_use]
    pub fn accepts(&self, actual: f64, expected: f64) -> bool {
        (expected - actual).abs() < self.delta
    }
}

impl Matcher for IsWithin {
    fn matches<'a>(&self, actual: &'a Value, expected: &'a Value) -> MatchResult<'a> {
        let actual = to_f64(actual)?;
        let expected = to_f64(expected)?;
        let delta = self.delta;
        Ok(Verdict::new(
            self.accepts(actual, expected),
            errorf!("Expected '{expected}' ± {delta} but was '{actual}'"),
            errorf!("Did not expect '{expected}' ± {delta} but was '{actual}'"),
        ))
    }
}

/// The actual value must be within `delta` of the expected value. Both must
/// be floats.
#[must_use]
pub const fn is_within(delta: f64) -> IsWithin {
    IsWithin::new(delta)
}

/// The actual collection must contain the expected value.
///
/// # Errors
/// An actual value that is not sequence-like is an error.
pub fn contains<'a>(actual: &'a Value, expected: &'a Value) -> MatchResult<'a> {
    let items = Rc::new(to_list(actual)?);
    let ok = list_contains(&items, expected);
    let shown = Rc::clone(&items);
    Ok(Verdict::new(
        ok,
        errorf!(
            "Expected '{expected}' to be in '{}' but it was not",
            render_list(&shown)
        ),
        errorf!(
            "Did not expect '{expected}' to be in '{}' but it was",
            render_list(&items)
        ),
    ))
}

/// The actual collection must contain every element of the expected
/// collection. Order does not matter, and one actual element may satisfy
/// several expected ones.
///
/// # Errors
/// Either operand not being sequence-like is an error.
pub fn contains_all<'a>(actual: &'a Value, expected: &'a Value) -> MatchResult<'a> {
    let haystack = Rc::new(to_list(actual)?);
    let needles = Rc::new(to_list(expected)?);
    let ok = needles.iter().all(|needle| list_contains(&haystack, needle));

    let (pos_haystack, pos_needles) = (Rc::clone(&haystack), Rc::clone(&needles));
    Ok(Verdict::new(
        ok,
        errorf!(
            "Expected all of '{}' to be in '{}' but they were not",
            render_list(&pos_needles),
            render_list(&pos_haystack)
        ),
        errorf!(
            "Did not expect all of '{}' to be in '{}' but they were",
            render_list(&needles),
            render_list(&haystack)
        ),
    ))
}
