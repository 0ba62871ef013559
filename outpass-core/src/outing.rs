use chrono::{DateTime, NaiveDate, Utc};
use outpass_shared::Masked;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of leave a pass was issued under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingType {
    WeekendLeave,
    GeneralLeave,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::WeekendLeave => "WEEKEND_LEAVE",
            BookingType::GeneralLeave => "GENERAL_LEAVE",
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEEKEND_LEAVE" => Ok(BookingType::WeekendLeave),
            "GENERAL_LEAVE" => Ok(BookingType::GeneralLeave),
            other => Err(format!("unknown booking type: {}", other)),
        }
    }
}

/// Direction of a gate scan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanType {
    Exit,
    Return,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Exit => "EXIT",
            ScanType::Return => "RETURN",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXIT" => Ok(ScanType::Exit),
            "RETURN" => Ok(ScanType::Return),
            other => Err(format!("unknown scan type: {}", other)),
        }
    }
}

/// An approved leave pass as issued by the booking-approval system.
/// Read-only from this service's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub booking_id: String,
    pub booking_type: BookingType,
    pub reg_no: String,
    pub name: String,
    pub gender: String,
    pub hostel_block_no: String,
    pub hostel_room_no: String,
    pub place_of_visit: String,
    pub purpose_of_visit: String,
    pub outing_date: NaiveDate,
    /// Scheduled window as entered at booking time, e.g. "10:00 AM - 12:00 PM".
    pub time: String,
    pub contact_number: Masked<String>,
    pub friend_contact_number: Option<Masked<String>>,
    pub parent_contact_number: Masked<String>,
    pub application_no: i64,
    pub outing_eligibility_status: bool,
    pub booking_status: i32,
    pub warden_remarks: Option<String>,
    pub log_timestamp: DateTime<Utc>,
}

impl BookingRecord {
    pub fn summary(&self) -> BookingSummary {
        BookingSummary {
            reg_no: self.reg_no.clone(),
            name: self.name.clone(),
            gender: self.gender.clone(),
            hostel_block_no: self.hostel_block_no.clone(),
            hostel_room_no: self.hostel_room_no.clone(),
            place_of_visit: self.place_of_visit.clone(),
            purpose_of_visit: self.purpose_of_visit.clone(),
            outing_date: self.outing_date,
            time: self.time.clone(),
            parent_contact_number: self.parent_contact_number.clone(),
        }
    }
}

/// Holder details shown to the operator at the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub reg_no: String,
    pub name: String,
    pub gender: String,
    pub hostel_block_no: String,
    pub hostel_room_no: String,
    pub place_of_visit: String,
    pub purpose_of_visit: String,
    pub outing_date: NaiveDate,
    pub time: String,
    pub parent_contact_number: Masked<String>,
}

/// One physical EXIT or RETURN scan against a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    pub id: Uuid,
    pub booking_id: String,
    pub booking_type: BookingType,
    pub scan_type: ScanType,
    pub scanned_by: String,
    pub scan_time: DateTime<Utc>,
    pub revoked: bool,
    pub revoked_by: Option<String>,
    pub revoked_time: Option<DateTime<Utc>>,
}

impl ScanEvent {
    pub fn new(
        booking_id: &str,
        booking_type: BookingType,
        scan_type: ScanType,
        scanned_by: &str,
        scan_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id: booking_id.to_string(),
            booking_type,
            scan_type,
            scanned_by: scanned_by.to_string(),
            scan_time,
            revoked: false,
            revoked_by: None,
            revoked_time: None,
        }
    }

    /// Whether this event counts towards the (EXIT, RETURN) sequence.
    pub fn is_active(&self) -> bool {
        !self.revoked
    }
}

/// A window of the scan log plus the total number of events in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanPage {
    pub scans: Vec<ScanEvent>,
    pub count: u64,
}
