//! Unit tests for the in-memory verification code store

use std::sync::Arc;

use chrono::Duration;

use crate::domain::clock::ManualClock;
use crate::domain::entities::verification_code::{IssueOutcome, VerifyOutcome};
use crate::repositories::verification_code::{
    InMemoryVerificationCodeRepository, VerificationCodeRepository,
};

const PHONE: &str = "13800138000";

fn ttl() -> Duration {
    Duration::seconds(60)
}

fn store_with_clock() -> (InMemoryVerificationCodeRepository, ManualClock) {
    let clock = ManualClock::default();
    let repo = InMemoryVerificationCodeRepository::with_clock(Arc::new(clock.clone()));
    (repo, clock)
}

#[tokio::test]
async fn test_issue_then_peek() {
    let (repo, _) = store_with_clock();

    let record = repo.issue(PHONE, ttl()).await.unwrap();
    let active = repo.peek_active(PHONE).await.unwrap().unwrap();

    assert_eq!(active, record);
    assert!(repo.peek_active("13900139000").await.unwrap().is_none());
}

#[tokio::test]
async fn test_issue_replaces_previous_record() {
    let (repo, _) = store_with_clock();

    let first = repo.issue(PHONE, ttl()).await.unwrap();
    let second = repo.issue(PHONE, ttl()).await.unwrap();

    assert_eq!(repo.len().await, 1);
    assert_eq!(repo.peek_active(PHONE).await.unwrap().unwrap().id, second.id);
    if first.code != second.code {
        assert_eq!(
            repo.verify(PHONE, &first.code).await.unwrap(),
            VerifyOutcome::Incorrect
        );
    }
}

#[tokio::test]
async fn test_verify_without_record() {
    let (repo, _) = store_with_clock();
    assert_eq!(
        repo.verify(PHONE, "123456").await.unwrap(),
        VerifyOutcome::NotFound
    );
}

#[tokio::test]
async fn test_successful_verify_consumes_code() {
    let (repo, _) = store_with_clock();
    let record = repo.issue(PHONE, ttl()).await.unwrap();

    assert_eq!(
        repo.verify(PHONE, &record.code).await.unwrap(),
        VerifyOutcome::Valid
    );
    assert_eq!(
        repo.verify(PHONE, &record.code).await.unwrap(),
        VerifyOutcome::NotFound
    );
    assert!(repo.peek_active(PHONE).await.unwrap().is_none());
}

#[tokio::test]
async fn test_wrong_code_leaves_record_live() {
    let (repo, _) = store_with_clock();
    let record = repo.issue(PHONE, ttl()).await.unwrap();
    let wrong = if record.code == "000000" { "000001" } else { "000000" };

    assert_eq!(
        repo.verify(PHONE, wrong).await.unwrap(),
        VerifyOutcome::Incorrect
    );
    assert!(repo.peek_active(PHONE).await.unwrap().is_some());
    assert_eq!(
        repo.verify(PHONE, &record.code).await.unwrap(),
        VerifyOutcome::Valid
    );
}

#[tokio::test]
async fn test_expired_code() {
    let (repo, clock) = store_with_clock();
    let record = repo.issue(PHONE, ttl()).await.unwrap();

    clock.advance(Duration::seconds(61));

    assert!(repo.peek_active(PHONE).await.unwrap().is_none());
    assert_eq!(
        repo.verify(PHONE, &record.code).await.unwrap(),
        VerifyOutcome::Expired
    );
}

#[tokio::test]
async fn test_concurrent_verify_single_success() {
    let (repo, _) = store_with_clock();
    let repo = Arc::new(repo);
    let record = repo.issue(PHONE, ttl()).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repo = repo.clone();
            let code = record.code.clone();
            tokio::spawn(async move { repo.verify(PHONE, &code).await.unwrap() })
        })
        .collect();

    let mut valid = 0;
    for handle in handles {
        if handle.await.unwrap().is_valid() {
            valid += 1;
        }
    }
    assert_eq!(valid, 1);
}

#[tokio::test]
async fn test_purge_removes_expired_and_used() {
    let (repo, clock) = store_with_clock();

    let used = repo.issue("13800138001", ttl()).await.unwrap();
    repo.verify("13800138001", &used.code).await.unwrap();
    repo.issue("13800138002", Duration::seconds(10)).await.unwrap();
    repo.issue("13800138003", ttl()).await.unwrap();

    clock.advance(Duration::seconds(30));

    assert_eq!(repo.purge_expired().await.unwrap(), 2);
    assert_eq!(repo.len().await, 1);
    assert!(repo.peek_active("13800138003").await.unwrap().is_some());
}

#[tokio::test]
async fn test_issue_unless_active_keeps_live_record() {
    let (repo, clock) = store_with_clock();

    let first = match repo.issue_unless_active(PHONE, ttl()).await.unwrap() {
        IssueOutcome::Issued(record) => record,
        other => panic!("unexpected {:?}", other),
    };
    match repo.issue_unless_active(PHONE, ttl()).await.unwrap() {
        IssueOutcome::Active(record) => assert_eq!(record, first),
        other => panic!("unexpected {:?}", other),
    }

    clock.advance(Duration::seconds(60));
    match repo.issue_unless_active(PHONE, ttl()).await.unwrap() {
        IssueOutcome::Issued(record) => assert_ne!(record.id, first.id),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_issue_unless_active_replaces_consumed_record() {
    let (repo, _) = store_with_clock();
    let record = repo.issue(PHONE, ttl()).await.unwrap();
    repo.verify(PHONE, &record.code).await.unwrap();

    assert!(matches!(
        repo.issue_unless_active(PHONE, ttl()).await.unwrap(),
        IssueOutcome::Issued(_)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_issue_unless_active_single_issue() {
    let (repo, _) = store_with_clock();
    let repo = Arc::new(repo);

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.issue_unless_active(PHONE, ttl()).await.unwrap() })
        })
        .collect();

    let mut issued = Vec::new();
    let mut active = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            IssueOutcome::Issued(record) => issued.push(record),
            IssueOutcome::Active(record) => active.push(record),
        }
    }

    assert_eq!(issued.len(), 1);
    assert!(active.iter().all(|record| record.id == issued[0].id));
}
