pub mod outing;
pub mod repository;
pub mod booking;
pub mod clock;
pub mod validator;
pub mod memory;

pub use outing::{BookingRecord, BookingSummary, BookingType, ScanEvent, ScanPage, ScanType};
pub use validator::{RecordedScan, ScanRejection, ScanValidator};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Rejected(#[from] ScanRejection),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Storage failure: {0}")]
    StorageError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type CoreResult<T> = Result<T, CoreError>;
