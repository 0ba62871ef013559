//! Process-local stores, used when no database is configured and in tests.

use async_trait::async_trait;
use outpass_shared::PageRequest;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::outing::{BookingRecord, BookingType, ScanEvent, ScanPage};
use crate::repository::{AppendOutcome, LeaveBookingSource, RepoResult, ScanLog};

#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: RwLock<HashMap<String, BookingRecord>>,
}

impl InMemoryBookingStore {
    pub async fn insert(&self, booking: BookingRecord) {
        self.bookings
            .write()
            .await
            .insert(booking.booking_id.clone(), booking);
    }
}

#[async_trait]
impl LeaveBookingSource for InMemoryBookingStore {
    async fn find_booking(&self, booking_id: &str) -> RepoResult<Option<BookingRecord>> {
        Ok(self.bookings.read().await.get(booking_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryScanLog {
    scans: RwLock<Vec<ScanEvent>>,
}

impl InMemoryScanLog {
    pub async fn len(&self) -> usize {
        self.scans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.scans.read().await.is_empty()
    }
}

#[async_trait]
impl ScanLog for InMemoryScanLog {
    async fn scans_for_booking(
        &self,
        booking_id: &str,
        booking_type: BookingType,
    ) -> RepoResult<Vec<ScanEvent>> {
        Ok(self
            .scans
            .read()
            .await
            .iter()
            .filter(|s| s.booking_id == booking_id && s.booking_type == booking_type)
            .cloned()
            .collect())
    }

    async fn append(&self, scan: &ScanEvent) -> RepoResult<AppendOutcome> {
        // Check and insert under one write guard.
        let mut scans = self.scans.write().await;
        let taken = scan.is_active()
            && scans.iter().any(|s| {
                s.is_active()
                    && s.booking_id == scan.booking_id
                    && s.booking_type == scan.booking_type
                    && s.scan_type == scan.scan_type
            });
        if taken {
            return Ok(AppendOutcome::Duplicate);
        }
        scans.push(scan.clone());
        Ok(AppendOutcome::Recorded)
    }

    async fn list_scans(&self, page: PageRequest) -> RepoResult<ScanPage> {
        let scans = self.scans.read().await;
        let mut ordered: Vec<&ScanEvent> = scans.iter().collect();
        ordered.sort_by(|a, b| b.scan_time.cmp(&a.scan_time));

        let window = ordered
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(ScanPage {
            scans: window,
            count: scans.len() as u64,
        })
    }
}
