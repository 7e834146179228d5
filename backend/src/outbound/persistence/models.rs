//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{travel_requests, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the travel_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = travel_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TravelRequestRow {
    pub id: i64,
    pub requester_name: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: String,
    pub owner_id: i64,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new travel request records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = travel_requests)]
pub(crate) struct NewTravelRequestRow<'a> {
    pub requester_name: &'a str,
    pub destination: &'a str,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: &'a str,
    pub owner_id: i64,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied by status updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = travel_requests)]
pub(crate) struct TravelStatusUpdate<'a> {
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}
