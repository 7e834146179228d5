//! Driving port for travel request reads.
//!
//! Reads are not scoped to the record owner: any authenticated caller may
//! fetch or list every request.

use async_trait::async_trait;

use crate::domain::{Error, TravelRequest, TravelRequestId, TravelRequestSearch};

/// Driving port for travel request read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TravelRequestQuery: Send + Sync {
    /// Fetch one request by id.
    async fn get(&self, id: TravelRequestId) -> Result<TravelRequest, Error>;

    /// List requests matching `search`, newest first.
    async fn list(&self, search: TravelRequestSearch) -> Result<Vec<TravelRequest>, Error>;
}
