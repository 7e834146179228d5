//! Tests for the travel request service lifecycle rules.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockTravelRequestNotifier, MockTravelRequestRepository};
use crate::domain::{
    ErrorCode, TravelRequestDraft, TravelRequestFilter, TravelRequestParts, UserId,
};
use crate::test_support::MutableClock;

const CREATOR: i64 = 1;
const REVIEWER: i64 = 2;

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-08-01T09:00:00Z")
        .expect("fixture timestamp")
        .with_timezone(&Utc)
}

fn user(raw: i64) -> UserId {
    UserId::new(raw).expect("user id")
}

fn request_id() -> TravelRequestId {
    TravelRequestId::new(7).expect("request id")
}

fn stored(status: TravelStatus) -> TravelRequest {
    let draft = draft();
    TravelRequest::new(TravelRequestParts {
        id: request_id(),
        requester_name: draft.requester_name().to_owned(),
        destination: draft.destination().to_owned(),
        dates: draft.dates(),
        status,
        owner_id: user(CREATOR),
        creator_id: user(CREATOR),
        created_at: now(),
        updated_at: now(),
    })
}

fn draft() -> TravelRequestDraft {
    TravelRequestDraft::try_from_parts("Ada", "X", "2025-08-15", "2025-08-20").expect("draft")
}

fn quiet_notifier() -> MockTravelRequestNotifier {
    let mut notifier = MockTravelRequestNotifier::new();
    notifier.expect_created().times(0);
    notifier.expect_status_changed().times(0);
    notifier.expect_cancelled().times(0);
    notifier
}

fn service(
    repo: MockTravelRequestRepository,
    notifier: MockTravelRequestNotifier,
) -> TravelRequestService<MockTravelRequestRepository> {
    TravelRequestService::new(
        Arc::new(repo),
        Arc::new(notifier),
        Arc::new(MutableClock::new(now() + TimeDelta::hours(1))),
    )
}

#[fixture]
fn repo_with_update() -> MockTravelRequestRepository {
    let mut repo = MockTravelRequestRepository::new();
    repo.expect_update_status()
        .times(1)
        .returning(|_, status, updated_at| {
            Ok(Some(stored(TravelStatus::Requested).with_status(status, updated_at)))
        });
    repo
}

fn expect_find(repo: &mut MockTravelRequestRepository, status: TravelStatus) {
    repo.expect_find_by_id()
        .with(eq(request_id()))
        .times(1)
        .return_once(move |_| Ok(Some(stored(status))));
}

#[rstest]
#[tokio::test]
async fn create_sets_creator_and_notifies() {
    let mut repo = MockTravelRequestRepository::new();
    repo.expect_insert()
        .withf(|new_request| {
            new_request.creator_id == user(CREATOR)
                && new_request.created_at == now() + TimeDelta::hours(1)
        })
        .times(1)
        .return_once(|_| Ok(stored(TravelStatus::Requested)));
    let mut notifier = MockTravelRequestNotifier::new();
    notifier.expect_created().times(1).return_const(());

    let created = service(repo, notifier)
        .create(CreateTravelRequest {
            actor: user(CREATOR),
            draft: draft(),
        })
        .await
        .expect("create succeeds");

    assert_eq!(created.status(), TravelStatus::Requested);
    assert_eq!(created.owner_id(), user(CREATOR));
    assert_eq!(created.creator_id(), user(CREATOR));
}

#[rstest]
#[case(TravelStatus::Requested, Some("approved"))]
#[case(TravelStatus::Approved, Some("cancelled"))]
#[case(TravelStatus::Cancelled, Some("requested"))]
#[case(TravelStatus::Requested, Some("not-a-status"))]
#[case(TravelStatus::Requested, None)]
#[tokio::test]
async fn creator_is_always_forbidden(
    #[case] current: TravelStatus,
    #[case] target: Option<&str>,
) {
    let mut repo = MockTravelRequestRepository::new();
    expect_find(&mut repo, current);
    repo.expect_update_status().times(0);

    let error = service(repo, quiet_notifier())
        .update_status(UpdateTravelStatusRequest {
            actor: user(CREATOR),
            id: request_id(),
            status: target.map(str::to_owned),
        })
        .await
        .expect_err("creator must be rejected");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn unknown_request_is_not_found_before_ownership() {
    let mut repo = MockTravelRequestRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_update_status().times(0);

    let error = service(repo, quiet_notifier())
        .update_status(UpdateTravelStatusRequest {
            actor: user(CREATOR),
            id: request_id(),
            status: Some("approved".to_owned()),
        })
        .await
        .expect_err("missing request");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(Some(""))]
#[case(Some("APPROVED"))]
#[case(Some("pending"))]
#[case(None)]
#[tokio::test]
async fn reviewer_with_invalid_status_is_rejected(#[case] target: Option<&str>) {
    let mut repo = MockTravelRequestRepository::new();
    expect_find(&mut repo, TravelStatus::Requested);
    repo.expect_update_status().times(0);

    let error = service(repo, quiet_notifier())
        .update_status(UpdateTravelStatusRequest {
            actor: user(REVIEWER),
            id: request_id(),
            status: target.map(str::to_owned),
        })
        .await
        .expect_err("invalid status");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|details| details.get("code")),
        Some(&serde_json::json!("invalid_status"))
    );
}

#[rstest]
#[case(TravelStatus::Requested, TravelStatus::Approved)]
#[case(TravelStatus::Requested, TravelStatus::Cancelled)]
#[case(TravelStatus::Approved, TravelStatus::Requested)]
#[case(TravelStatus::Cancelled, TravelStatus::Approved)]
#[tokio::test]
async fn reviewer_can_set_any_recognised_status(
    mut repo_with_update: MockTravelRequestRepository,
    #[case] current: TravelStatus,
    #[case] target: TravelStatus,
) {
    expect_find(&mut repo_with_update, current);
    let mut notifier = MockTravelRequestNotifier::new();
    notifier
        .expect_status_changed()
        .withf(move |request, previous, actor| {
            request.status() == target && *previous == current && *actor == user(REVIEWER)
        })
        .times(1)
        .return_const(());

    let updated = service(repo_with_update, notifier)
        .update_status(UpdateTravelStatusRequest {
            actor: user(REVIEWER),
            id: request_id(),
            status: Some(target.as_str().to_owned()),
        })
        .await
        .expect("reviewer update succeeds");

    assert_eq!(updated.status(), target);
    assert_eq!(updated.updated_at(), now() + TimeDelta::hours(1));
    assert_eq!(updated.creator_id(), user(CREATOR));
}

#[rstest]
#[case(TravelStatus::Requested, CREATOR)]
#[case(TravelStatus::Approved, REVIEWER)]
#[tokio::test]
async fn anyone_can_cancel_an_open_request(
    mut repo_with_update: MockTravelRequestRepository,
    #[case] current: TravelStatus,
    #[case] actor: i64,
) {
    expect_find(&mut repo_with_update, current);
    let mut notifier = MockTravelRequestNotifier::new();
    notifier.expect_cancelled().times(1).return_const(());

    let cancelled = service(repo_with_update, notifier)
        .cancel(CancelTravelRequest {
            actor: user(actor),
            id: request_id(),
        })
        .await
        .expect("cancel succeeds");

    assert_eq!(cancelled.status(), TravelStatus::Cancelled);
}

#[rstest]
#[tokio::test]
async fn cancelling_twice_is_rejected() {
    let mut repo = MockTravelRequestRepository::new();
    expect_find(&mut repo, TravelStatus::Cancelled);
    repo.expect_update_status().times(0);

    let error = service(repo, quiet_notifier())
        .cancel(CancelTravelRequest {
            actor: user(REVIEWER),
            id: request_id(),
        })
        .await
        .expect_err("already cancelled");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|details| details.get("code")),
        Some(&serde_json::json!("already_cancelled"))
    );
}

#[rstest]
#[tokio::test]
async fn get_ignores_ownership() {
    let mut repo = MockTravelRequestRepository::new();
    expect_find(&mut repo, TravelStatus::Requested);

    let found = service(repo, quiet_notifier())
        .get(request_id())
        .await
        .expect("any caller can read");

    assert_eq!(found.owner_id(), user(CREATOR));
}

#[rstest]
#[tokio::test]
async fn list_with_unknown_status_skips_the_store() {
    let mut repo = MockTravelRequestRepository::new();
    repo.expect_list().times(0);

    let listed = service(repo, quiet_notifier())
        .list(TravelRequestSearch {
            status: Some("pending".to_owned()),
            ..TravelRequestSearch::default()
        })
        .await
        .expect("list succeeds");

    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn list_forwards_parsed_filter() {
    let expected = TravelRequestFilter {
        status: Some(TravelStatus::Approved),
        destination_contains: Some("lis".to_owned()),
        ..TravelRequestFilter::default()
    };
    let mut repo = MockTravelRequestRepository::new();
    repo.expect_list()
        .with(eq(expected))
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let listed = service(repo, quiet_notifier())
        .list(TravelRequestSearch {
            status: Some("approved".to_owned()),
            destination: Some(" lis ".to_owned()),
            start_date: Some("not-a-date".to_owned()),
            ..TravelRequestSearch::default()
        })
        .await
        .expect("list succeeds");

    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn store_failures_are_internal() {
    let mut repo = MockTravelRequestRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(TravelRequestRepositoryError::query("relation missing")));

    let error = service(repo, quiet_notifier())
        .get(request_id())
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
