//! Port for travel request persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    NewTravelRequest, TravelRequest, TravelRequestFilter, TravelRequestId, TravelStatus,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by travel request repository adapters.
    pub enum TravelRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "travel request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "travel request repository query failed: {message}",
    }
}

/// Request store: writes and filtered reads of travel requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelRequestRepository: Send + Sync {
    /// Persist a new request with status `requested` and owner = creator.
    async fn insert(
        &self,
        request: &NewTravelRequest,
    ) -> Result<TravelRequest, TravelRequestRepositoryError>;

    /// Find a request by id.
    async fn find_by_id(
        &self,
        id: TravelRequestId,
    ) -> Result<Option<TravelRequest>, TravelRequestRepositoryError>;

    /// List requests matching `filter`, newest first.
    async fn list(
        &self,
        filter: &TravelRequestFilter,
    ) -> Result<Vec<TravelRequest>, TravelRequestRepositoryError>;

    /// Overwrite the status of a request. Returns `None` if the id is unknown.
    ///
    /// Last writer wins; no version check is performed.
    async fn update_status(
        &self,
        id: TravelRequestId,
        status: TravelStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TravelRequest>, TravelRequestRepositoryError>;
}
