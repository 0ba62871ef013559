pub mod app_config;
pub mod database;
pub mod booking_repo;
pub mod scan_repo;

pub use database::DbClient;
pub use booking_repo::StoreBookingRepository;
pub use scan_repo::StoreScanLog;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unreadable row in {table}: {reason}")]
    CorruptRow { table: &'static str, reason: String },
}
