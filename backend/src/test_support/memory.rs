//! In-memory adapters for the driven ports.
//!
//! They follow the same contracts as the Diesel adapters: identifiers are
//! assigned sequentially from 1, email lookups are case-sensitive, and
//! listings are ordered newest first.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    TravelRequestNotifier, TravelRequestRepository, TravelRequestRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, NewTravelRequest, NewUser, TravelRequest, TravelRequestFilter, TravelRequestId,
    TravelRequestParts, TravelStatus, User, UserCredentials, UserId,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |count| count.saturating_add(1))
}

/// Credential store held in a vector.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<UserCredentials>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        lock(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut users = lock(&self.users);
        if users.iter().any(|stored| stored.user.email() == &user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let id = UserId::new(next_id(users.len()))
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let created = User::new(id, user.name.clone(), user.email.clone(), user.created_at);
        users.push(UserCredentials {
            user: created.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .find(|stored| stored.user.email() == email)
            .cloned())
    }
}

/// Request store held in a vector.
#[derive(Debug, Default)]
pub struct InMemoryTravelRequestRepository {
    requests: Mutex<Vec<TravelRequest>>,
}

impl InMemoryTravelRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored request in insertion order.
    pub fn all(&self) -> Vec<TravelRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl TravelRequestRepository for InMemoryTravelRequestRepository {
    async fn insert(
        &self,
        request: &NewTravelRequest,
    ) -> Result<TravelRequest, TravelRequestRepositoryError> {
        let mut requests = lock(&self.requests);
        let id = TravelRequestId::new(next_id(requests.len()))
            .map_err(|err| TravelRequestRepositoryError::query(err.to_string()))?;
        let created = TravelRequest::new(TravelRequestParts {
            id,
            requester_name: request.draft.requester_name().to_owned(),
            destination: request.draft.destination().to_owned(),
            dates: request.draft.dates(),
            status: TravelStatus::Requested,
            owner_id: request.creator_id,
            creator_id: request.creator_id,
            created_at: request.created_at,
            updated_at: request.created_at,
        });
        requests.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(
        &self,
        id: TravelRequestId,
    ) -> Result<Option<TravelRequest>, TravelRequestRepositoryError> {
        Ok(lock(&self.requests)
            .iter()
            .find(|request| request.id() == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &TravelRequestFilter,
    ) -> Result<Vec<TravelRequest>, TravelRequestRepositoryError> {
        let mut matched: Vec<TravelRequest> = lock(&self.requests)
            .iter()
            .filter(|request| filter.matches(request))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(matched)
    }

    async fn update_status(
        &self,
        id: TravelRequestId,
        status: TravelStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<TravelRequest>, TravelRequestRepositoryError> {
        let mut requests = lock(&self.requests);
        let Some(slot) = requests.iter_mut().find(|request| request.id() == id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_status(status, updated_at);
        Ok(Some(slot.clone()))
    }
}

/// Lifecycle event captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Created {
        id: TravelRequestId,
    },
    StatusChanged {
        id: TravelRequestId,
        from: TravelStatus,
        to: TravelStatus,
        actor: UserId,
    },
    Cancelled {
        id: TravelRequestId,
        actor: UserId,
    },
}

/// Notifier that records every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        lock(&self.events).clone()
    }
}

impl TravelRequestNotifier for RecordingNotifier {
    fn created(&self, request: &TravelRequest) {
        lock(&self.events).push(NotificationEvent::Created { id: request.id() });
    }

    fn status_changed(&self, request: &TravelRequest, previous: TravelStatus, actor: UserId) {
        lock(&self.events).push(NotificationEvent::StatusChanged {
            id: request.id(),
            from: previous,
            to: request.status(),
            actor,
        });
    }

    fn cancelled(&self, request: &TravelRequest, actor: UserId) {
        lock(&self.events).push(NotificationEvent::Cancelled {
            id: request.id(),
            actor,
        });
    }
}
