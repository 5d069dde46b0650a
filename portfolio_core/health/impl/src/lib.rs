use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use portfolio_core_health_contracts::{HealthFeatureService, HealthStatus};
use portfolio_email_contracts::EmailService;
use portfolio_persistence_contracts::Database;
use portfolio_shared_contracts::time::TimeService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Default)]
pub struct HealthFeatureServiceImpl<Time, Db, Email> {
    time: Time,
    db: Db,
    email: Option<Email>,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

impl Default for HealthFeatureConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl<Time, Db, Email> HealthFeatureServiceImpl<Time, Db, Email> {
    pub fn new(time: Time, db: Db, email: Option<Email>, config: HealthFeatureConfig) -> Self {
        Self {
            time,
            db,
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Time, Db, Email> HealthFeatureService for HealthFeatureServiceImpl<Time, Db, Email>
where
    Time: TimeService,
    Db: Database,
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let database = self
            .db
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping database: {err}"))
            .is_ok();

        let email = match &self.email {
            Some(email) => Some(
                email
                    .ping()
                    .await
                    .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
                    .is_ok(),
            ),
            None => None,
        };

        let status = HealthStatus { database, email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
