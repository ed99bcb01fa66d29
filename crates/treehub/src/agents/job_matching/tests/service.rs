use super::common::*;
use crate::agents::job_matching::{
    DirectoryError, JobMatchingService, MatchRecommendation, MatchingConfig, MatchingError,
    MatchingServiceError, PublishError,
};
use crate::catalog::ContractorId;
use std::sync::Arc;

#[test]
fn match_job_ranks_and_notifies_strong_matches() {
    let mut fair = contractor("c-fair", 30.0);
    fair.active_jobs = 3;
    let (service, publisher) = build_service(vec![
        contractor("c-near", 2.0),
        fair,
        contractor("c-remote", 120.0),
    ]);

    let report = service.match_job(&job(), today()).expect("matching succeeds");

    assert_eq!(report.job_id, job().id);
    assert_eq!(report.evaluated, 2, "remote crew is filtered by the directory");
    assert_eq!(report.matches.len(), 2);
    assert_eq!(
        report.best().map(|best| best.contractor_id.as_str()),
        Some("c-near")
    );

    let events = publisher.events();
    assert_eq!(events.len(), report.notified);
    assert!(events
        .iter()
        .all(|event| event.recommendation >= MatchRecommendation::Strong));
    assert!(events
        .iter()
        .any(|event| event.contractor_id == ContractorId::new("c-near")));
    assert!(events
        .iter()
        .all(|event| event.contractor_id != ContractorId::new("c-fair")));
}

#[test]
fn match_job_with_no_candidates_returns_empty_report() {
    let (service, publisher) = build_service(Vec::new());

    let report = service.match_job(&job(), today()).expect("matching succeeds");

    assert!(report.matches.is_empty());
    assert_eq!(report.notified, 0);
    assert!(publisher.events().is_empty());
}

#[test]
fn match_job_propagates_directory_outages() {
    let service = JobMatchingService::new(
        Arc::new(OfflineDirectory),
        Arc::new(MemoryPublisher::default()),
        matching_config(),
    )
    .expect("service builds");

    match service.match_job(&job(), today()) {
        Err(MatchingServiceError::Directory(DirectoryError::Unavailable(_))) => {}
        other => panic!("expected directory outage, got {other:?}"),
    }
}

#[test]
fn match_job_propagates_publisher_failures() {
    let service = JobMatchingService::new(
        Arc::new(MemoryDirectory::with(vec![contractor("c-near", 1.0)])),
        Arc::new(FailingPublisher),
        matching_config(),
    )
    .expect("service builds");

    match service.match_job(&job(), today()) {
        Err(MatchingServiceError::Publish(PublishError::Transport(_))) => {}
        other => panic!("expected publish failure, got {other:?}"),
    }
}

#[test]
fn publish_failure_midway_leaves_earlier_notifications_delivered() {
    let crews = vec![contractor("c-near", 1.0), contractor("c-next", 2.0)];
    let (baseline, _) = build_service(crews.clone());
    let strong = baseline
        .match_job(&job(), today())
        .expect("matching succeeds")
        .notified;
    assert!(strong >= 2, "both crews should be notifiable");

    let publisher = Arc::new(FlakyPublisher {
        capacity: 1,
        ..FlakyPublisher::default()
    });
    let service = JobMatchingService::new(
        Arc::new(MemoryDirectory::with(crews)),
        publisher.clone(),
        matching_config(),
    )
    .expect("service builds");

    assert!(matches!(
        service.match_job(&job(), today()),
        Err(MatchingServiceError::Publish(_))
    ));
    // A retry of the request will notify the first crew again.
    let delivered = publisher.delivered.events();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].contractor_id, ContractorId::new("c-near"));
}

#[test]
fn new_rejects_invalid_config() {
    let config = MatchingConfig {
        max_candidates: 0,
        ..MatchingConfig::default()
    };

    let result = JobMatchingService::new(
        Arc::new(MemoryDirectory::default()),
        Arc::new(MemoryPublisher::default()),
        config,
    );

    assert!(matches!(
        result,
        Err(MatchingServiceError::Matching(MatchingError::InvalidConfig(_)))
    ));
}

#[test]
fn explain_scores_a_known_contractor() {
    let (service, publisher) = build_service(vec![contractor("c-near", 2.0)]);

    let result = service
        .explain(&job(), &ContractorId::new("c-near"), today())
        .expect("explain succeeds")
        .expect("in range");

    assert_eq!(result.contractor_id.as_str(), "c-near");
    assert!(publisher.events().is_empty());

    match service.explain(&job(), &ContractorId::new("ghost"), today()) {
        Err(MatchingServiceError::UnknownContractor(id)) => assert_eq!(id.as_str(), "ghost"),
        other => panic!("expected unknown contractor, got {other:?}"),
    }
}
