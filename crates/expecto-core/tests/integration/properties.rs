//! Laws every matcher obeys, checked over generated inputs

use expecto_core::matchers::{
    contains, contains_all, equals, is_false, is_nil, is_same, is_true, is_within, satisfies,
};
use expecto_core::{MatchResult, Matcher, Value, not};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
        (-1.0e6..1.0e6_f64).prop_map(Value::from),
        (-1.0e3..1.0e3_f32).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
        any::<char>().prop_map(Value::from),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(2, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Value::List)
    })
}

/// `(ok, pos, neg)` or the error text.
fn observe(result: MatchResult<'_>) -> Result<(bool, String, String), String> {
    result
        .map(|v| (v.ok, v.pos.to_string(), v.neg.to_string()))
        .map_err(|e| e.to_string())
}

/// `not(m)` must flip `ok`, swap the messages, and keep errors as they are.
fn check_negation<M: Matcher + Copy>(
    name: &str,
    m: M,
    a: &Value,
    e: &Value,
) -> Result<(), TestCaseError> {
    match (observe(m.matches(a, e)), observe(not(m).matches(a, e))) {
        (Ok((ok, pos, neg)), Ok((nok, npos, nneg))) => {
            prop_assert_eq!(nok, !ok, "{}", name);
            prop_assert_eq!(npos, neg, "{}", name);
            prop_assert_eq!(nneg, pos, "{}", name);
        }
        (Err(err), Err(nerr)) => prop_assert_eq!(err, nerr, "{}", name),
        (p, n) => prop_assert!(false, "{}: {:?} vs {:?}", name, p, n),
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_not_inverts_ok_and_keeps_errors(a in value(), e in value()) {
        check_negation("equals", equals, &a, &e)?;
        check_negation("is_same", is_same, &a, &e)?;
        check_negation("is_nil", is_nil, &a, &e)?;
        check_negation("is_true", is_true, &a, &e)?;
        check_negation("is_false", is_false, &a, &e)?;
        check_negation("satisfies", satisfies, &a, &e)?;
        check_negation("is_within", is_within(0.5), &a, &e)?;
        check_negation("contains", contains, &a, &e)?;
        check_negation("contains_all", contains_all, &a, &e)?;
    }

    #[test]
    fn prop_double_negation_is_identity(a in value(), e in value()) {
        prop_assert_eq!(observe(not(not(equals)).matches(&a, &e)), observe(equals(&a, &e)));
        prop_assert_eq!(observe(not(not(contains)).matches(&a, &e)), observe(contains(&a, &e)));
        prop_assert_eq!(
            observe(not(not(is_within(0.1))).matches(&a, &e)),
            observe(is_within(0.1).matches(&a, &e))
        );
    }

    #[test]
    fn prop_equals_is_reflexive(x in value()) {
        prop_assert_eq!(equals(&x, &x).ok().map(|v| v.ok), Some(true));
        let copy = x.clone();
        prop_assert_eq!(equals(&x, &copy).ok().map(|v| v.ok), Some(true));
    }

    #[test]
    fn prop_is_within_accepts_equal_values(x in -1.0e9..1.0e9_f64, delta in 1.0e-12..1.0e3_f64) {
        let v = Value::from(x);
        prop_assert_eq!(is_within(delta).matches(&v, &v).ok().map(|r| r.ok), Some(true));
    }

    #[test]
    fn prop_zero_tolerance_never_passes(x in -1.0e9..1.0e9_f64) {
        let v = Value::from(x);
        prop_assert_eq!(is_within(0.0).matches(&v, &v).ok().map(|r| r.ok), Some(false));
    }

    #[test]
    fn prop_list_contains_each_of_its_elements(items in prop::collection::vec(scalar(), 1..6)) {
        let list = Value::List(items.clone());
        for item in &items {
            prop_assert_eq!(contains(&list, item).ok().map(|r| r.ok), Some(true));
        }
        let all = Value::List(items);
        prop_assert_eq!(contains_all(&list, &all).ok().map(|r| r.ok), Some(true));
    }

    #[test]
    fn prop_is_nil_only_for_nil(x in scalar()) {
        let ok = is_nil(&x, &Value::Nil).ok().map(|r| r.ok);
        prop_assert_eq!(ok, Some(matches!(x, Value::Nil)));
    }
}
