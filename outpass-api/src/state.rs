use std::sync::Arc;
use outpass_core::booking::BookingLookup;
use outpass_core::clock::SystemClock;
use outpass_core::memory::{InMemoryBookingStore, InMemoryScanLog};
use outpass_core::repository::{LeaveBookingSource, ScanLog};
use outpass_core::ScanValidator;
use outpass_store::app_config::Config;
use outpass_store::{DbClient, StoreBookingRepository, StoreScanLog};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub allowed_roles: Vec<String>,
}

#[derive(Clone, Copy)]
pub struct PagingConfig {
    pub default_limit: u32,
    pub max_limit: u32,
}

#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<ScanValidator>,
    pub auth: AuthConfig,
    pub paging: PagingConfig,
}

impl AppState {
    /// Wire stores and the validator from configuration. Falls back to
    /// process-local stores when no database URL is set.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let bookings: Arc<dyn LeaveBookingSource>;
        let scans: Arc<dyn ScanLog>;
        match &config.database.url {
            Some(url) => {
                let db = DbClient::new(url, &config.database).await?;
                if config.database.run_migrations {
                    db.migrate().await?;
                }
                bookings = Arc::new(StoreBookingRepository::new(db.pool.clone()));
                scans = Arc::new(StoreScanLog::new(db.pool.clone()));
            }
            None => {
                tracing::warn!("database.url not set, using in-memory stores; scans will not survive a restart");
                bookings = Arc::new(InMemoryBookingStore::default());
                scans = Arc::new(InMemoryScanLog::default());
            }
        }

        let validator = ScanValidator::new(
            BookingLookup::new(bookings),
            scans,
            Arc::new(SystemClock),
            config.campus.offset()?,
        );

        Ok(Self {
            validator: Arc::new(validator),
            auth: AuthConfig {
                secret: config.auth.jwt_secret.clone(),
                allowed_roles: config.auth.allowed_roles.clone(),
            },
            paging: PagingConfig {
                default_limit: config.pagination.default_limit,
                max_limit: config.pagination.max_limit,
            },
        })
    }
}
