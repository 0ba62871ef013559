use chrono::FixedOffset;
use outpass_shared::PageRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::booking::BookingLookup;
use crate::clock::Clock;
use crate::outing::{BookingRecord, BookingSummary, BookingType, ScanEvent, ScanPage, ScanType};
use crate::repository::{AppendOutcome, ScanLog};
use crate::{CoreError, CoreResult};

/// Why a scan was refused. Every variant is a user-facing, non-retriable
/// bad request; the message is shown to the operator as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanRejection {
    #[error("The hostel pass is invalid.")]
    InvalidPass,
    #[error("The hostel pass is not scanned for exit.")]
    NotExited,
    #[error("The hostel pass is already scanned for return.")]
    AlreadyReturned,
    #[error("The hostel pass is already scanned for exit.")]
    AlreadyExited,
    #[error("The hostel pass is not valid for today.")]
    NotValidToday,
}

impl ScanRejection {
    pub fn code(&self) -> &'static str {
        match self {
            ScanRejection::InvalidPass => "INVALID_PASS",
            ScanRejection::NotExited => "NOT_EXITED",
            ScanRejection::AlreadyReturned => "ALREADY_RETURNED",
            ScanRejection::AlreadyExited => "ALREADY_EXITED",
            ScanRejection::NotValidToday => "NOT_VALID_TODAY",
        }
    }

    /// Rejection reported when the scan log's uniqueness guard fires.
    fn duplicate_of(scan_type: ScanType) -> Self {
        match scan_type {
            ScanType::Exit => ScanRejection::AlreadyExited,
            ScanType::Return => ScanRejection::AlreadyReturned,
        }
    }
}

/// Decides whether `scan_type` may follow the booking's prior scans.
/// Revoked events are ignored.
///
/// An EXIT is refused once *any* scan exists, not just a prior EXIT. That is
/// the behaviour gate staff rely on today; whether a booking with a stray
/// RETURN should be exit-able is an open product question.
pub fn check_sequence(prior: &[ScanEvent], scan_type: ScanType) -> Result<(), ScanRejection> {
    let mut active = prior.iter().filter(|scan| scan.is_active());

    match scan_type {
        ScanType::Return => {
            let (exited, returned) = active.fold((false, false), |(exited, returned), scan| {
                (
                    exited || scan.scan_type == ScanType::Exit,
                    returned || scan.scan_type == ScanType::Return,
                )
            });
            if !exited {
                return Err(ScanRejection::NotExited);
            }
            if returned {
                return Err(ScanRejection::AlreadyReturned);
            }
            Ok(())
        }
        ScanType::Exit => {
            if active.next().is_some() {
                return Err(ScanRejection::AlreadyExited);
            }
            Ok(())
        }
    }
}

/// Payload of an accepted scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedScan {
    pub outing: ScanEvent,
    pub student: BookingSummary,
}

/// The outing pass state machine: validates scans against the booking
/// record and the scan log, and records accepted ones.
///
/// The sequence check and the insert are separate round trips. Two
/// concurrent scans of the same kind can both pass the check; the scan log's
/// uniqueness guard decides the winner and the loser is reported with the
/// same rejection the check would have produced.
pub struct ScanValidator {
    bookings: BookingLookup,
    scans: Arc<dyn ScanLog>,
    clock: Arc<dyn Clock>,
    campus_offset: FixedOffset,
}

impl ScanValidator {
    pub fn new(
        bookings: BookingLookup,
        scans: Arc<dyn ScanLog>,
        clock: Arc<dyn Clock>,
        campus_offset: FixedOffset,
    ) -> Self {
        Self {
            bookings,
            scans,
            clock,
            campus_offset,
        }
    }

    /// Validate a gate scan and, if permitted, append it to the scan log.
    pub async fn record_scan(
        &self,
        booking_id: &str,
        booking_type: BookingType,
        scan_type: ScanType,
        operator: &str,
    ) -> CoreResult<RecordedScan> {
        let booking = self.existing_booking(booking_id, booking_type).await?;

        let prior = self.scans.scans_for_booking(booking_id, booking_type).await?;
        if let Err(reason) = check_sequence(&prior, scan_type) {
            info!(booking_id, %booking_type, %scan_type, reason = reason.code(), "scan rejected");
            return Err(reason.into());
        }

        let now = self.clock.now();
        let today = now.with_timezone(&self.campus_offset).date_naive();
        if booking.outing_date != today {
            info!(
                booking_id,
                outing_date = %booking.outing_date,
                %today,
                "scan rejected, pass is for another day"
            );
            return Err(ScanRejection::NotValidToday.into());
        }

        let outing = ScanEvent::new(booking_id, booking_type, scan_type, operator, now);
        match self.scans.append(&outing).await? {
            AppendOutcome::Recorded => {}
            AppendOutcome::Duplicate => {
                warn!(booking_id, %scan_type, "concurrent scan already recorded for this pass");
                return Err(ScanRejection::duplicate_of(scan_type).into());
            }
        }

        info!(
            scan_id = %outing.id,
            booking_id,
            %booking_type,
            %scan_type,
            operator,
            "scan recorded"
        );

        Ok(RecordedScan {
            outing,
            student: booking.summary(),
        })
    }

    /// Holder details for a pass without recording anything.
    pub async fn booking_details(
        &self,
        booking_id: &str,
        booking_type: BookingType,
    ) -> CoreResult<BookingSummary> {
        let booking = self.existing_booking(booking_id, booking_type).await?;
        Ok(booking.summary())
    }

    pub async fn list_scans(&self, page: PageRequest) -> CoreResult<ScanPage> {
        debug!(page = page.page(), limit = page.limit(), "listing scans");
        Ok(self.scans.list_scans(page).await?)
    }

    async fn existing_booking(
        &self,
        booking_id: &str,
        booking_type: BookingType,
    ) -> CoreResult<BookingRecord> {
        if booking_id.is_empty() {
            return Err(CoreError::ValidationError("Booking ID is required".to_string()));
        }

        match self.bookings.find(booking_id, booking_type).await? {
            Some(booking) => Ok(booking),
            None => {
                info!(booking_id, %booking_type, "no booking for pass");
                Err(ScanRejection::InvalidPass.into())
            }
        }
    }
}
