//! Sharing matchers and loggers across threads

use expecto_core::matchers::{contains, equals, is_within};
use expecto_core::{Location, Matcher, MatcherAdapter, RecordingLogger, Value, not};
use std::sync::Arc;
use std::thread;

fn assert_send_sync<T: Send + Sync>(_: &T) {}

#[test]
fn test_matchers_are_send_and_sync() {
    assert_send_sync(&equals);
    assert_send_sync(&is_within(0.1));
    assert_send_sync(&not(contains));
    assert_send_sync(&Value::from(vec![1, 2]));
}

#[test]
fn test_one_matcher_many_threads() {
    let matcher = Arc::new(not(is_within(0.01)));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || {
                let actual = Value::from(f64::from(i));
                let expected = Value::from(f64::from(i) + 0.5);
                matcher.matches(&actual, &expected).ok().map(|v| v.ok)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().ok().flatten(), Some(true));
    }
}

#[test]
fn test_shared_logger_collects_from_every_thread() {
    let log = Arc::new(RecordingLogger::new());
    let handles: Vec<_> = (0..4_i64)
        .map(|i| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                let here = Location::new("worker.rs", u32::try_from(i).unwrap_or(0), 1);
                let adapter = MatcherAdapter::new(&here, log.as_ref());
                adapter.expect(&Value::from(i), &equals, Some(&Value::from(-1)));
                adapter.expect(&Value::from(i), &equals, Some(&Value::from(i)));
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().is_ok());
    }

    let mut lines: Vec<u32> = log.errors().iter().map(|e| e.location.line()).collect();
    lines.sort_unstable();
    assert_eq!(lines, vec![0, 1, 2, 3]);
}
