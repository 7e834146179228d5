//! Travel request domain service.
//!
//! Enforces the status lifecycle and who may drive it:
//!
//! - the creator of a request can never change its status, whatever the
//!   current status is;
//! - any recognised status may be set by anyone else, including backward
//!   moves out of `approved` or `cancelled`;
//! - anyone may cancel a request that is not already cancelled.
//!
//! Reads are unrestricted for authenticated callers.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    CancelTravelRequest, CreateTravelRequest, TravelRequestCommand, TravelRequestNotifier,
    TravelRequestQuery, TravelRequestRepository, TravelRequestRepositoryError,
    UpdateTravelStatusRequest,
};
use crate::domain::{
    Error, NewTravelRequest, TravelRequest, TravelRequestId, TravelRequestSearch, TravelStatus,
};

fn map_repository_error(error: TravelRequestRepositoryError) -> Error {
    match error {
        TravelRequestRepositoryError::Connection { message } => {
            Error::internal(format!("travel request repository unavailable: {message}"))
        }
        TravelRequestRepositoryError::Query { message } => {
            Error::internal(format!("travel request repository error: {message}"))
        }
    }
}

fn not_found(id: TravelRequestId) -> Error {
    Error::not_found(format!("travel request {id} not found"))
}

/// Service implementing the travel request command and query ports.
#[derive(Clone)]
pub struct TravelRequestService<R> {
    repo: Arc<R>,
    notifier: Arc<dyn TravelRequestNotifier>,
    clock: Arc<dyn Clock>,
}

impl<R> TravelRequestService<R> {
    /// Create a new service.
    pub fn new(
        repo: Arc<R>,
        notifier: Arc<dyn TravelRequestNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            notifier,
            clock,
        }
    }
}

impl<R> TravelRequestService<R>
where
    R: TravelRequestRepository,
{
    async fn load(&self, id: TravelRequestId) -> Result<TravelRequest, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn store_status(
        &self,
        id: TravelRequestId,
        status: TravelStatus,
    ) -> Result<TravelRequest, Error> {
        self.repo
            .update_status(id, status, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            // Nothing is ever deleted, so this only fires on a store anomaly.
            .ok_or_else(|| not_found(id))
    }
}

fn parse_status(raw: Option<&str>) -> Result<TravelStatus, Error> {
    let invalid = |message: String| {
        Error::invalid_request(message)
            .with_details(json!({ "field": "status", "code": "invalid_status" }))
    };
    raw.ok_or_else(|| invalid("status is required".to_owned()))?
        .parse::<TravelStatus>()
        .map_err(|err| invalid(err.to_string()))
}

#[async_trait]
impl<R> TravelRequestCommand for TravelRequestService<R>
where
    R: TravelRequestRepository,
{
    async fn create(&self, request: CreateTravelRequest) -> Result<TravelRequest, Error> {
        let created = self
            .repo
            .insert(&NewTravelRequest {
                draft: request.draft,
                creator_id: request.actor,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_repository_error)?;

        info!(travel_request_id = %created.id(), creator_id = %created.creator_id(), "travel request created");
        self.notifier.created(&created);
        Ok(created)
    }

    async fn update_status(
        &self,
        request: UpdateTravelStatusRequest,
    ) -> Result<TravelRequest, Error> {
        let current = self.load(request.id).await?;
        if current.is_created_by(request.actor) {
            return Err(
                Error::forbidden("you cannot change the status of your own travel request")
                    .with_details(json!({ "code": "creator_cannot_change_status" })),
            );
        }

        let status = parse_status(request.status.as_deref())?;

        let previous = current.status();
        let updated = self.store_status(request.id, status).await?;
        info!(
            travel_request_id = %updated.id(),
            actor_id = %request.actor,
            from = %previous,
            to = %updated.status(),
            "travel request status changed"
        );
        self.notifier
            .status_changed(&updated, previous, request.actor);
        Ok(updated)
    }

    async fn cancel(&self, request: CancelTravelRequest) -> Result<TravelRequest, Error> {
        let current = self.load(request.id).await?;
        if current.status() == TravelStatus::Cancelled {
            return Err(Error::invalid_request("travel request is already cancelled")
                .with_details(json!({ "code": "already_cancelled" })));
        }

        let cancelled = self
            .store_status(request.id, TravelStatus::Cancelled)
            .await?;
        info!(travel_request_id = %cancelled.id(), actor_id = %request.actor, "travel request cancelled");
        self.notifier.cancelled(&cancelled, request.actor);
        Ok(cancelled)
    }
}

#[async_trait]
impl<R> TravelRequestQuery for TravelRequestService<R>
where
    R: TravelRequestRepository,
{
    async fn get(&self, id: TravelRequestId) -> Result<TravelRequest, Error> {
        self.load(id).await
    }

    async fn list(&self, search: TravelRequestSearch) -> Result<Vec<TravelRequest>, Error> {
        let Some(filter) = search.into_filter() else {
            return Ok(Vec::new());
        };
        self.repo.list(&filter).await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "travel_request_service_tests.rs"]
mod tests;
