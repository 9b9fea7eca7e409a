use super::*;

#[test]
fn backoff_grows_linearly_with_the_attempt_number() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.backoff(1), Duration::from_millis(1000));
    assert_eq!(policy.backoff(2), Duration::from_millis(2000));
    assert_eq!(policy.backoff(3), Duration::from_millis(3000));
}

#[test]
fn attempt_zero_waits_one_step() {
    let policy = RetryPolicy::new(3, Duration::from_millis(250));
    assert_eq!(policy.backoff(0), Duration::from_millis(250));
}

#[test]
fn last_attempt_is_the_budget() {
    let policy = RetryPolicy::new(3, Duration::from_millis(1));
    assert!(!policy.is_last(1));
    assert!(!policy.is_last(2));
    assert!(policy.is_last(3));
}

#[test]
fn budget_is_never_zero() {
    let policy = RetryPolicy::new(0, Duration::from_millis(1));
    assert_eq!(policy.max_attempts, 1);
    assert!(policy.is_last(1));
}
