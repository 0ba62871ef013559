use std::sync::Arc;
use tracing::debug;

use crate::outing::{BookingRecord, BookingType};
use crate::repository::{LeaveBookingSource, RepoResult};

/// Routes a booking lookup to the source that owns its leave kind.
#[derive(Clone)]
pub struct BookingLookup {
    weekend_leave: Arc<dyn LeaveBookingSource>,
}

impl BookingLookup {
    pub fn new(weekend_leave: Arc<dyn LeaveBookingSource>) -> Self {
        Self { weekend_leave }
    }

    pub async fn find(
        &self,
        booking_id: &str,
        booking_type: BookingType,
    ) -> RepoResult<Option<BookingRecord>> {
        match booking_type {
            BookingType::WeekendLeave => {
                let record = self.weekend_leave.find_booking(booking_id).await?;
                // A source only ever answers for its own leave kind.
                Ok(record.filter(|r| r.booking_type == BookingType::WeekendLeave))
            }
            BookingType::GeneralLeave => {
                // TODO: wire the hostel leave application table once approved
                // general leaves are exported to this service.
                debug!(booking_id, "general leave lookup has no source, treating as not found");
                Ok(None)
            }
        }
    }
}
