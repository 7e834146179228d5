//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` carries a unique constraint; lookups are case-sensitive.
    users (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        /// bcrypt-encoded password hash.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Travel requests and their lifecycle status.
    ///
    /// `status` is constrained to `requested`, `approved` or `cancelled`.
    travel_requests (id) {
        id -> Int8,
        requester_name -> Text,
        destination -> Text,
        departure_date -> Date,
        return_date -> Date,
        status -> Varchar,
        /// User the record is meant to be visible to.
        owner_id -> Int8,
        /// User who created the record; never reassigned.
        creator_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, travel_requests);
