//! Driving port for travel request mutations.
//!
//! Every mutation names the acting user resolved from a verified token.

use async_trait::async_trait;

use crate::domain::{Error, TravelRequest, TravelRequestDraft, TravelRequestId, UserId};

/// Request to submit a new travel request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTravelRequest {
    pub actor: UserId,
    pub draft: TravelRequestDraft,
}

/// Request to overwrite a travel request's status.
///
/// `status` is the raw caller value, `None` when the body carried no usable
/// status. It is validated only after the self-approval check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTravelStatusRequest {
    pub actor: UserId,
    pub id: TravelRequestId,
    pub status: Option<String>,
}

/// Request to cancel a travel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelTravelRequest {
    pub actor: UserId,
    pub id: TravelRequestId,
}

/// Driving port for travel request lifecycle changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelRequestCommand: Send + Sync {
    /// Persist a new request in status `requested`, owned and created by the actor.
    async fn create(&self, request: CreateTravelRequest) -> Result<TravelRequest, Error>;

    /// Change the status of a request.
    ///
    /// Fails with not found for unknown ids, then forbidden when the actor
    /// created the request (whatever its current status), then invalid
    /// request for an unrecognised status. Any recognised status is accepted,
    /// including backward moves.
    async fn update_status(&self, request: UpdateTravelStatusRequest)
    -> Result<TravelRequest, Error>;

    /// Cancel a request. Any authenticated actor may cancel; a request that
    /// is already cancelled is rejected.
    async fn cancel(&self, request: CancelTravelRequest) -> Result<TravelRequest, Error>;
}
