//! Travel request aggregate, its status lifecycle and listing filters.
//!
//! A travel request is created in [`TravelStatus::Requested`] with both the
//! owner and the creator set to the acting user. Afterwards only its status
//! (and update timestamp) ever changes; records are never deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::UserId;

/// Calendar date format accepted on the wire (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date in [`DATE_FORMAT`].
///
/// # Examples
/// ```
/// use travel_requests::domain::parse_calendar_date;
///
/// assert!(parse_calendar_date("2025-08-15").is_some());
/// assert!(parse_calendar_date("15/08/2025").is_none());
/// ```
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Validation errors for travel request inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelRequestValidationError {
    NonPositiveId,
    EmptyRequesterName,
    EmptyDestination,
    InvalidDateFormat { field: &'static str },
    ReturnBeforeDeparture,
}

impl fmt::Display for TravelRequestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "travel request id must be a positive integer"),
            Self::EmptyRequesterName => write!(f, "requester name must not be empty"),
            Self::EmptyDestination => write!(f, "destination must not be empty"),
            Self::InvalidDateFormat { field } => {
                write!(f, "{field} must be a date formatted as YYYY-MM-DD")
            }
            Self::ReturnBeforeDeparture => {
                write!(f, "return date must not be before departure date")
            }
        }
    }
}

impl std::error::Error for TravelRequestValidationError {}

/// Store-assigned numeric travel request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TravelRequestId(i64);

impl TravelRequestId {
    pub fn new(id: i64) -> Result<Self, TravelRequestValidationError> {
        if id <= 0 {
            return Err(TravelRequestValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TravelRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TravelRequestId> for i64 {
    fn from(value: TravelRequestId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for TravelRequestId {
    type Error = TravelRequestValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Lifecycle status of a travel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TravelStatus {
    Requested,
    Approved,
    Cancelled,
}

impl TravelStatus {
    /// Every recognised status, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Requested, Self::Approved, Self::Cancelled];

    /// Stable wire and storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TravelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the recognised statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of requested, approved, cancelled (got {value:?})")]
pub struct UnknownTravelStatus {
    pub value: String,
}

impl FromStr for TravelStatus {
    type Err = UnknownTravelStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownTravelStatus {
                value: s.to_owned(),
            })
    }
}

/// Departure and return dates.
///
/// ## Invariants
/// - `return_date >= departure_date`; equal dates describe a same-day trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelDates {
    departure_date: NaiveDate,
    return_date: NaiveDate,
}

impl TravelDates {
    /// Validate the date ordering.
    pub fn new(
        departure_date: NaiveDate,
        return_date: NaiveDate,
    ) -> Result<Self, TravelRequestValidationError> {
        if return_date < departure_date {
            return Err(TravelRequestValidationError::ReturnBeforeDeparture);
        }
        Ok(Self {
            departure_date,
            return_date,
        })
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    pub fn return_date(&self) -> NaiveDate {
        self.return_date
    }
}

/// Validated input for creating a travel request.
///
/// # Examples
/// ```
/// use travel_requests::domain::TravelRequestDraft;
///
/// let draft = TravelRequestDraft::try_from_parts("Ada", "Lisbon", "2025-08-15", "2025-08-20")
///     .expect("valid draft");
/// assert_eq!(draft.destination(), "Lisbon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelRequestDraft {
    requester_name: String,
    destination: String,
    dates: TravelDates,
}

impl TravelRequestDraft {
    /// Validate raw inputs; both dates must be `YYYY-MM-DD`.
    pub fn try_from_parts(
        requester_name: &str,
        destination: &str,
        departure_date: &str,
        return_date: &str,
    ) -> Result<Self, TravelRequestValidationError> {
        let requester_name = requester_name.trim();
        if requester_name.is_empty() {
            return Err(TravelRequestValidationError::EmptyRequesterName);
        }
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(TravelRequestValidationError::EmptyDestination);
        }
        let departure = parse_calendar_date(departure_date).ok_or(
            TravelRequestValidationError::InvalidDateFormat {
                field: "departure_date",
            },
        )?;
        let ret = parse_calendar_date(return_date).ok_or(
            TravelRequestValidationError::InvalidDateFormat {
                field: "return_date",
            },
        )?;

        Ok(Self {
            requester_name: requester_name.to_owned(),
            destination: destination.to_owned(),
            dates: TravelDates::new(departure, ret)?,
        })
    }

    pub fn requester_name(&self) -> &str {
        self.requester_name.as_str()
    }

    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    pub fn dates(&self) -> TravelDates {
        self.dates
    }
}

/// A travel request ready for insertion; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTravelRequest {
    pub draft: TravelRequestDraft,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Field values used to rebuild a persisted [`TravelRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelRequestParts {
    pub id: TravelRequestId,
    pub requester_name: String,
    pub destination: String,
    pub dates: TravelDates,
    pub status: TravelStatus,
    pub owner_id: UserId,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persisted travel request.
///
/// `owner_id` names the user the record is meant to be visible to; reads do
/// not filter on it. `creator_id` never changes once set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TravelRequest {
    #[schema(value_type = i64, example = 1)]
    id: TravelRequestId,
    #[schema(example = "Ada Lovelace")]
    requester_name: String,
    #[schema(example = "Lisbon")]
    destination: String,
    #[schema(value_type = String, format = Date, example = "2025-08-15")]
    departure_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-08-20")]
    return_date: NaiveDate,
    status: TravelStatus,
    #[schema(value_type = i64, example = 1)]
    owner_id: UserId,
    #[schema(value_type = i64, example = 1)]
    creator_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TravelRequest {
    pub fn new(parts: TravelRequestParts) -> Self {
        let TravelRequestParts {
            id,
            requester_name,
            destination,
            dates,
            status,
            owner_id,
            creator_id,
            created_at,
            updated_at,
        } = parts;
        Self {
            id,
            requester_name,
            destination,
            departure_date: dates.departure_date(),
            return_date: dates.return_date(),
            status,
            owner_id,
            creator_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> TravelRequestId {
        self.id
    }

    pub fn requester_name(&self) -> &str {
        self.requester_name.as_str()
    }

    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    pub fn return_date(&self) -> NaiveDate {
        self.return_date
    }

    pub fn status(&self) -> TravelStatus {
        self.status
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn creator_id(&self) -> UserId {
        self.creator_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `user` created this request.
    pub fn is_created_by(&self, user: UserId) -> bool {
        self.creator_id == user
    }

    /// Copy of this request with a new status and update timestamp.
    #[must_use]
    pub fn with_status(mut self, status: TravelStatus, updated_at: DateTime<Utc>) -> Self {
        self.status = status;
        self.updated_at = updated_at;
        self
    }
}

/// Raw, optional listing parameters as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelRequestSearch {
    pub status: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
}

/// Parsed listing filter. All present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelRequestFilter {
    /// Exact status match.
    pub status: Option<TravelStatus>,
    /// Case-insensitive substring of the destination.
    pub destination_contains: Option<String>,
    /// Inclusive lower bound on the departure date.
    pub departure_from: Option<NaiveDate>,
    /// Inclusive upper bound on the return date.
    pub return_until: Option<NaiveDate>,
    /// Inclusive lower bound on the creation timestamp.
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the creation timestamp.
    pub created_until: Option<DateTime<Utc>>,
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn lenient_date(name: &'static str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = non_blank(raw)?;
    let parsed = parse_calendar_date(raw);
    if parsed.is_none() {
        debug!(filter = name, value = raw, "ignoring malformed date filter");
    }
    parsed
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

impl TravelRequestSearch {
    /// Convert raw parameters into a filter.
    ///
    /// Blank values and malformed dates are ignored. Returns `None` when the
    /// status is not a recognised value, meaning no record can match.
    /// `created_before` covers the whole named day.
    pub fn into_filter(self) -> Option<TravelRequestFilter> {
        let status = match non_blank(self.status.as_deref()) {
            Some(raw) => match raw.parse::<TravelStatus>() {
                Ok(status) => Some(status),
                Err(err) => {
                    debug!(%err, "status filter matches no records");
                    return None;
                }
            },
            None => None,
        };

        Some(TravelRequestFilter {
            status,
            destination_contains: non_blank(self.destination.as_deref()).map(str::to_owned),
            departure_from: lenient_date("start_date", self.start_date.as_deref()),
            return_until: lenient_date("end_date", self.end_date.as_deref()),
            created_from: lenient_date("created_after", self.created_after.as_deref())
                .map(start_of_day),
            created_until: lenient_date("created_before", self.created_before.as_deref())
                .and_then(|date| date.succ_opt())
                .map(start_of_day),
        })
    }
}

impl TravelRequestFilter {
    /// Evaluate the filter against a single record.
    pub fn matches(&self, request: &TravelRequest) -> bool {
        let status_ok = self.status.is_none_or(|status| request.status() == status);
        let destination_ok = self.destination_contains.as_deref().is_none_or(|needle| {
            request
                .destination()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let departure_ok = self
            .departure_from
            .is_none_or(|from| request.departure_date() >= from);
        let return_ok = self
            .return_until
            .is_none_or(|until| request.return_date() <= until);
        let created_from_ok = self
            .created_from
            .is_none_or(|from| request.created_at() >= from);
        let created_until_ok = self
            .created_until
            .is_none_or(|until| request.created_at() < until);

        status_ok && destination_ok && departure_ok && return_ok && created_from_ok && created_until_ok
    }
}
