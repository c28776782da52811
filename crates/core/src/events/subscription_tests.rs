// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn exact_pattern_matches_exact_event() {
    let pattern = EventPattern::new("job:completed");
    assert!(pattern.matches("job:completed"));
    assert!(!pattern.matches("job:updated"));
    assert!(!pattern.matches("job"));
    assert!(!pattern.matches("job:completed:extra"));
}

#[test]
fn wildcard_matches_single_segment() {
    let pattern = EventPattern::new("job:*");
    assert!(pattern.matches("job:completed"));
    assert!(pattern.matches("job:transitioned"));
    assert!(!pattern.matches("worker:started"));
    assert!(!pattern.matches("job:state:changed"));
}

#[test]
fn double_wildcard_matches_everything_after() {
    let pattern = EventPattern::new("job:**");
    assert!(pattern.matches("job:updated"));
    assert!(pattern.matches("job:state:changed"));
    assert!(!pattern.matches("worker:started"));
}

#[test]
fn global_wildcards() {
    assert!(EventPattern::new("*").matches("anything"));
    assert!(EventPattern::new("**").matches("anything:here:too"));
    assert!(!EventPattern::new("").matches("job:updated"));
}

#[test]
fn subscription_matches_any_pattern() {
    let sub = Subscription::new(
        "listener",
        vec![
            EventPattern::new("job:completed"),
            EventPattern::new("job:transitioned"),
        ],
        "Completion and state changes",
    );

    assert!(sub.matches("job:completed"));
    assert!(sub.matches("job:transitioned"));
    assert!(!sub.matches("job:updated"));
}

#[test]
fn single_pattern_shorthand() {
    let sub = Subscription::to("publish-worker", "job:completed");
    assert_eq!(sub.id, SubscriberId("publish-worker".to_string()));
    assert_eq!(sub.patterns, vec![EventPattern::new("job:completed")]);
}
