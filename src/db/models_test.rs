//! Tests for domain models.

use std::str::FromStr;

use crate::db::{BreakingStatus, TaskStatus};

#[test]
fn breaking_status_round_trips() {
    for status in [
        BreakingStatus::Queued,
        BreakingStatus::Stripping,
        BreakingStatus::Done,
    ] {
        let parsed = BreakingStatus::from_str(&status.to_string()).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn breaking_status_rejects_unknown() {
    assert!(BreakingStatus::from_str("crushed").is_err());
}

#[test]
fn task_status_round_trips() {
    for status in [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Done] {
        let parsed = TaskStatus::from_str(&status.to_string()).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn task_status_defaults_to_open() {
    assert_eq!(TaskStatus::default(), TaskStatus::Open);
}
