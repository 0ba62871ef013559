use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use outpass_core::outing::{BookingRecord, BookingType};
use outpass_core::repository::{LeaveBookingSource, RepoResult};
use outpass_shared::Masked;
use sqlx::PgPool;

/// Weekend leave passes, read from the table the approval system fills.
pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct WeekendLeaveRow {
    booking_id: String,
    reg_no: String,
    name: String,
    gender: String,
    hostel_block_no: String,
    hostel_room_no: String,
    place_of_visit: String,
    purpose_of_visit: String,
    outing_date: NaiveDate,
    time: String,
    contact_number: String,
    friend_contact_number: Option<String>,
    parent_contact_number: String,
    application_no: i64,
    outing_eligibility_status: bool,
    booking_status: i32,
    warden_remarks: Option<String>,
    log_timestamp: DateTime<Utc>,
}

impl From<WeekendLeaveRow> for BookingRecord {
    fn from(row: WeekendLeaveRow) -> Self {
        BookingRecord {
            booking_id: row.booking_id,
            booking_type: BookingType::WeekendLeave,
            reg_no: row.reg_no,
            name: row.name,
            gender: row.gender,
            hostel_block_no: row.hostel_block_no,
            hostel_room_no: row.hostel_room_no,
            place_of_visit: row.place_of_visit,
            purpose_of_visit: row.purpose_of_visit,
            outing_date: row.outing_date,
            time: row.time,
            contact_number: Masked(row.contact_number),
            friend_contact_number: row.friend_contact_number.map(Masked),
            parent_contact_number: Masked(row.parent_contact_number),
            application_no: row.application_no,
            outing_eligibility_status: row.outing_eligibility_status,
            booking_status: row.booking_status,
            warden_remarks: row.warden_remarks,
            log_timestamp: row.log_timestamp,
        }
    }
}

#[async_trait]
impl LeaveBookingSource for StoreBookingRepository {
    async fn find_booking(&self, booking_id: &str) -> RepoResult<Option<BookingRecord>> {
        let row = sqlx::query_as::<_, WeekendLeaveRow>(
            r#"
            SELECT booking_id, reg_no, name, gender, hostel_block_no, hostel_room_no,
                   place_of_visit, purpose_of_visit, outing_date, "time", contact_number,
                   friend_contact_number, parent_contact_number, application_no,
                   outing_eligibility_status, booking_status, warden_remarks, log_timestamp
            FROM weekend_leave_bookings
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookingRecord::from))
    }
}
