//! Startup database preparation.
//!
//! The store may come up after the service (for example under Compose), so the
//! first connection is retried a bounded number of times with a fixed delay.
//! Once connected, embedded migrations are applied and the async pool is built.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};

use super::pool::{DbPool, PoolConfig, PoolError};

/// Migrations compiled from the crate's `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors that abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapError {
    /// Every connection attempt failed.
    #[error("database unreachable after {attempts} attempts: {message}")]
    Connect { attempts: u32, message: String },
    /// Applying migrations failed.
    #[error("database migration failed: {message}")]
    Migrate { message: String },
    /// The async pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Bounded, fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy; at least one attempt is always made.
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Abstraction over waiting between attempts so tests need not sleep.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the Tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Run `attempt` until it succeeds or the policy is exhausted.
///
/// The sleeper is only consulted between attempts, never after the last one.
pub async fn retry_with_delay<T, F, Fut>(
    policy: RetryPolicy,
    sleeper: &dyn RetrySleeper,
    mut attempt: F,
) -> Result<T, BootstrapError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, String>>,
{
    let mut last_error = String::new();
    for number in 1..=policy.attempts() {
        match attempt().await {
            Ok(value) => {
                info!(attempt = number, "database connection established");
                return Ok(value);
            }
            Err(message) => {
                warn!(
                    attempt = number,
                    max_attempts = policy.attempts(),
                    error = %message,
                    "database connection attempt failed"
                );
                last_error = message;
            }
        }
        if number < policy.attempts() {
            sleeper.sleep(policy.delay()).await;
        }
    }

    Err(BootstrapError::Connect {
        attempts: policy.attempts(),
        message: last_error,
    })
}

async fn establish(database_url: String) -> Result<PgConnection, String> {
    tokio::task::spawn_blocking(move || PgConnection::establish(&database_url))
        .await
        .map_err(|err| format!("connection task failed: {err}"))?
        .map_err(|err| err.to_string())
}

async fn run_migrations(mut conn: PgConnection) -> Result<usize, BootstrapError> {
    tokio::task::spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| applied.len())
            .map_err(|err| err.to_string())
    })
    .await
    .map_err(|err| BootstrapError::Migrate {
        message: format!("migration task failed: {err}"),
    })?
    .map_err(|message| BootstrapError::Migrate { message })
}

/// Connect with retries, apply pending migrations and build the pool.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the store stays unreachable, a migration
/// fails or the pool cannot be built.
pub async fn prepare_database(
    config: PoolConfig,
    policy: RetryPolicy,
    sleeper: &dyn RetrySleeper,
) -> Result<DbPool, BootstrapError> {
    let url = config.database_url().to_owned();
    let conn = retry_with_delay(policy, sleeper, || establish(url.clone())).await?;

    let applied = run_migrations(conn).await?;
    info!(applied, "database migrations complete");

    Ok(DbPool::new(config).await?)
}
