use async_trait::async_trait;
use outpass_shared::PageRequest;

use crate::outing::{BookingRecord, BookingType, ScanEvent, ScanPage};

pub type RepoResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Read access to one kind of leave booking.
#[async_trait]
pub trait LeaveBookingSource: Send + Sync {
    async fn find_booking(&self, booking_id: &str) -> RepoResult<Option<BookingRecord>>;
}

/// Result of appending to the scan log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Recorded,
    /// A non-revoked event with the same (booking id, booking type, scan type)
    /// already exists; nothing was written.
    Duplicate,
}

/// Append-only log of gate scans.
///
/// Implementations must reject an append that would create a second
/// non-revoked event for the same (booking id, booking type, scan type)
/// atomically with the insert, returning [`AppendOutcome::Duplicate`].
#[async_trait]
pub trait ScanLog: Send + Sync {
    /// All events (revoked included) for a booking.
    async fn scans_for_booking(
        &self,
        booking_id: &str,
        booking_type: BookingType,
    ) -> RepoResult<Vec<ScanEvent>>;

    async fn append(&self, scan: &ScanEvent) -> RepoResult<AppendOutcome>;

    /// Newest first.
    async fn list_scans(&self, page: PageRequest) -> RepoResult<ScanPage>;
}
