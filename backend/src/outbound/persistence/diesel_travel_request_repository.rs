//! PostgreSQL-backed `TravelRequestRepository` implementation using Diesel ORM.
//!
//! Listing builds a boxed query from whichever filter criteria are present.
//! Status updates are a single `UPDATE ... RETURNING`, so concurrent writers
//! resolve as last-writer-wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TravelRequestRepository, TravelRequestRepositoryError};
use crate::domain::{
    NewTravelRequest, TravelDates, TravelRequest, TravelRequestFilter, TravelRequestId,
    TravelRequestParts, TravelStatus, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTravelRequestRow, TravelRequestRow, TravelStatusUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::travel_requests;

/// Diesel-backed implementation of the request store.
#[derive(Clone)]
pub struct DieselTravelRequestRepository {
    pool: DbPool,
}

impl DieselTravelRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TravelRequestRepositoryError {
    map_basic_pool_error(error, TravelRequestRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TravelRequestRepositoryError {
    map_basic_diesel_error(
        error,
        TravelRequestRepositoryError::query,
        TravelRequestRepositoryError::connection,
    )
}

/// Escape `LIKE` metacharacters so the needle matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn row_to_travel_request(
    row: TravelRequestRow,
) -> Result<TravelRequest, TravelRequestRepositoryError> {
    let TravelRequestRow {
        id,
        requester_name,
        destination,
        departure_date,
        return_date,
        status,
        owner_id,
        creator_id,
        created_at,
        updated_at,
    } = row;
    let corrupt = |err: &dyn std::fmt::Display| {
        TravelRequestRepositoryError::query(format!("corrupted travel request row {id}: {err}"))
    };

    Ok(TravelRequest::new(TravelRequestParts {
        id: TravelRequestId::new(id).map_err(|err| corrupt(&err))?,
        requester_name,
        destination,
        dates: TravelDates::new(departure_date, return_date).map_err(|err| corrupt(&err))?,
        status: status
            .parse::<TravelStatus>()
            .map_err(|err| corrupt(&err))?,
        owner_id: UserId::new(owner_id).map_err(|err| corrupt(&err))?,
        creator_id: UserId::new(creator_id).map_err(|err| corrupt(&err))?,
        created_at,
        updated_at,
    }))
}

#[async_trait]
impl TravelRequestRepository for DieselTravelRequestRepository {
    async fn insert(
        &self,
        request: &NewTravelRequest,
    ) -> Result<TravelRequest, TravelRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let dates = request.draft.dates();
        let creator = request.creator_id.get();
        let row = NewTravelRequestRow {
            requester_name: request.draft.requester_name(),
            destination: request.draft.destination(),
            departure_date: dates.departure_date(),
            return_date: dates.return_date(),
            status: TravelStatus::Requested.as_str(),
            owner_id: creator,
            creator_id: creator,
            created_at: request.created_at,
            updated_at: request.created_at,
        };

        let stored = diesel::insert_into(travel_requests::table)
            .values(&row)
            .returning(TravelRequestRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_travel_request(stored)
    }

    async fn find_by_id(
        &self,
        id: TravelRequestId,
    ) -> Result<Option<TravelRequest>, TravelRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = travel_requests::table
            .find(id.get())
            .select(TravelRequestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_travel_request).transpose()
    }

    async fn list(
        &self,
        filter: &TravelRequestFilter,
    ) -> Result<Vec<TravelRequest>, TravelRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = travel_requests::table
            .select(TravelRequestRow::as_select())
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(travel_requests::status.eq(status.as_str()));
        }
        if let Some(needle) = filter.destination_contains.as_deref() {
            query = query.filter(travel_requests::destination.ilike(like_pattern(needle)));
        }
        if let Some(from) = filter.departure_from {
            query = query.filter(travel_requests::departure_date.ge(from));
        }
        if let Some(until) = filter.return_until {
            query = query.filter(travel_requests::return_date.le(until));
        }
        if let Some(from) = filter.created_from {
            query = query.filter(travel_requests::created_at.ge(from));
        }
        if let Some(until) = filter.created_until {
            query = query.filter(travel_requests::created_at.lt(until));
        }

        let rows: Vec<TravelRequestRow> = query
            .order((travel_requests::created_at.desc(), travel_requests::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_travel_request).collect()
    }

    async fn update_status(
        &self,
        id: TravelRequestId,
        status: TravelStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TravelRequest>, TravelRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(travel_requests::table.find(id.get()))
            .set(&TravelStatusUpdate {
                status: status.as_str(),
                updated_at,
            })
            .returning(TravelRequestRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_travel_request).transpose()
    }
}
