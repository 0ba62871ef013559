use async_trait::async_trait;
use chrono::{DateTime, Utc};
use outpass_core::outing::{BookingType, ScanEvent, ScanPage, ScanType};
use outpass_core::repository::{AppendOutcome, RepoResult, ScanLog};
use outpass_shared::PageRequest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::StoreError;

/// Gate scan log in the `outings` table.
///
/// The partial unique index `uq_outings_live_scan` is what actually keeps a
/// pass to one live EXIT and one live RETURN; inserts go through
/// `ON CONFLICT DO NOTHING` against it.
pub struct StoreScanLog {
    pool: PgPool,
}

impl StoreScanLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OutingRow {
    id: Uuid,
    booking_id: String,
    booking_type: String,
    scan_type: String,
    scanned_by: String,
    scan_time: DateTime<Utc>,
    revoked: bool,
    revoked_by: Option<String>,
    revoked_time: Option<DateTime<Utc>>,
}

impl TryFrom<OutingRow> for ScanEvent {
    type Error = StoreError;

    fn try_from(row: OutingRow) -> Result<Self, Self::Error> {
        let booking_type = row
            .booking_type
            .parse::<BookingType>()
            .map_err(|reason| StoreError::CorruptRow { table: "outings", reason })?;
        let scan_type = row
            .scan_type
            .parse::<ScanType>()
            .map_err(|reason| StoreError::CorruptRow { table: "outings", reason })?;

        Ok(ScanEvent {
            id: row.id,
            booking_id: row.booking_id,
            booking_type,
            scan_type,
            scanned_by: row.scanned_by,
            scan_time: row.scan_time,
            revoked: row.revoked,
            revoked_by: row.revoked_by,
            revoked_time: row.revoked_time,
        })
    }
}

fn into_events(rows: Vec<OutingRow>) -> Result<Vec<ScanEvent>, StoreError> {
    rows.into_iter().map(ScanEvent::try_from).collect()
}

#[async_trait]
impl ScanLog for StoreScanLog {
    async fn scans_for_booking(
        &self,
        booking_id: &str,
        booking_type: BookingType,
    ) -> RepoResult<Vec<ScanEvent>> {
        let rows = sqlx::query_as::<_, OutingRow>(
            r#"
            SELECT id, booking_id, booking_type, scan_type, scanned_by, scan_time,
                   revoked, revoked_by, revoked_time
            FROM outings
            WHERE booking_id = $1 AND booking_type = $2
            "#,
        )
        .bind(booking_id)
        .bind(booking_type.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_events(rows)?)
    }

    async fn append(&self, scan: &ScanEvent) -> RepoResult<AppendOutcome> {
        // One statement; the partial unique index arbitrates concurrent inserts.
        let inserted = sqlx::query(
            r#"
            INSERT INTO outings (id, booking_id, booking_type, scan_type, scanned_by, scan_time,
                                 revoked, revoked_by, revoked_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (booking_id, booking_type, scan_type) WHERE NOT revoked DO NOTHING
            "#,
        )
        .bind(scan.id)
        .bind(&scan.booking_id)
        .bind(scan.booking_type.as_str())
        .bind(scan.scan_type.as_str())
        .bind(&scan.scanned_by)
        .bind(scan.scan_time)
        .bind(scan.revoked)
        .bind(&scan.revoked_by)
        .bind(scan.revoked_time)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 0 {
            return Ok(AppendOutcome::Duplicate);
        }
        Ok(AppendOutcome::Recorded)
    }

    async fn list_scans(&self, page: PageRequest) -> RepoResult<ScanPage> {
        // Page and count read the same snapshot.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let rows = sqlx::query_as::<_, OutingRow>(
            r#"
            SELECT id, booking_id, booking_type, scan_type, scanned_by, scan_time,
                   revoked, revoked_by, revoked_time
            FROM outings
            ORDER BY scan_time DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&mut *tx)
        .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM outings")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(ScanPage {
            scans: into_events(rows)?,
            count: count as u64,
        })
    }
}
