// Postgres-backed scan log tests.
// Run with: OUTPASS__DATABASE__URL=postgres://... cargo test -p outpass-store -- --ignored

use chrono::{Duration, Utc};
use outpass_core::repository::{AppendOutcome, ScanLog};
use outpass_core::{BookingType, ScanEvent, ScanType};
use outpass_shared::PageRequest;
use outpass_store::app_config::DatabaseConfig;
use outpass_store::{DbClient, StoreScanLog};
use uuid::Uuid;

async fn scan_log() -> StoreScanLog {
    let url = std::env::var("OUTPASS__DATABASE__URL").expect("OUTPASS__DATABASE__URL must be set");
    let config = DatabaseConfig {
        url: Some(url.clone()),
        max_connections: 2,
        acquire_timeout_seconds: 5,
        run_migrations: true,
    };
    let db = DbClient::new(&url, &config).await.expect("connect");
    db.migrate().await.expect("migrate");
    StoreScanLog::new(db.pool)
}

fn booking_id() -> String {
    format!("TEST-{}", Uuid::new_v4())
}

#[tokio::test]
#[ignore]
async fn test_live_scan_index_rejects_second_exit() {
    let log = scan_log().await;
    let id = booking_id();
    let now = Utc::now();

    let exit = ScanEvent::new(&id, BookingType::WeekendLeave, ScanType::Exit, "guard-1", now);
    assert_eq!(log.append(&exit).await.unwrap(), AppendOutcome::Recorded);

    let again = ScanEvent::new(&id, BookingType::WeekendLeave, ScanType::Exit, "guard-2", now);
    assert_eq!(log.append(&again).await.unwrap(), AppendOutcome::Duplicate);

    let ret = ScanEvent::new(&id, BookingType::WeekendLeave, ScanType::Return, "guard-2", now);
    assert_eq!(log.append(&ret).await.unwrap(), AppendOutcome::Recorded);

    let scans = log.scans_for_booking(&id, BookingType::WeekendLeave).await.unwrap();
    assert_eq!(scans.len(), 2);
}

#[tokio::test]
#[ignore]
async fn test_revoked_exit_frees_the_slot() {
    let log = scan_log().await;
    let id = booking_id();
    let now = Utc::now();

    let mut revoked = ScanEvent::new(
        &id,
        BookingType::WeekendLeave,
        ScanType::Exit,
        "guard-1",
        now - Duration::minutes(10),
    );
    revoked.revoked = true;
    revoked.revoked_by = Some("warden-1".to_string());
    revoked.revoked_time = Some(now);
    assert_eq!(log.append(&revoked).await.unwrap(), AppendOutcome::Recorded);

    let exit = ScanEvent::new(&id, BookingType::WeekendLeave, ScanType::Exit, "guard-1", now);
    assert_eq!(log.append(&exit).await.unwrap(), AppendOutcome::Recorded);

    let scans = log.scans_for_booking(&id, BookingType::WeekendLeave).await.unwrap();
    assert_eq!(scans.iter().filter(|s| s.is_active()).count(), 1);
    assert_eq!(scans.len(), 2);
}

#[tokio::test]
#[ignore]
async fn test_listing_count_covers_page() {
    let log = scan_log().await;
    let id = booking_id();
    let now = Utc::now();

    let exit = ScanEvent::new(&id, BookingType::WeekendLeave, ScanType::Exit, "guard-1", now);
    log.append(&exit).await.unwrap();

    let page = log
        .list_scans(PageRequest::from_query(Some(1), Some(5), 10, 100).unwrap())
        .await
        .unwrap();
    assert!(!page.scans.is_empty());
    assert!(page.scans.len() <= 5);
    assert!(page.count >= page.scans.len() as u64);
    assert!(page
        .scans
        .windows(2)
        .all(|pair| pair[0].scan_time >= pair[1].scan_time));
}
