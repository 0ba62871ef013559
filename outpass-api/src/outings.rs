use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use outpass_core::{BookingSummary, BookingType, RecordedScan, ScanEvent, ScanType};
use outpass_shared::PageRequest;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;
use crate::middleware::{operator_auth_middleware, OperatorClaims};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Enum fields arrive as plain strings and are parsed by the handler.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordScanRequest {
    // Missing and empty ids get the same "Booking ID is required" answer.
    pub booking_id: String,
    pub booking_type: Option<String>,
    pub scan_type: Option<String>,
}

impl RecordScanRequest {
    fn booking_type(&self) -> Result<BookingType, AppError> {
        required(self.booking_type.as_deref(), "Booking type is required")
    }

    fn scan_type(&self) -> Result<ScanType, AppError> {
        required(self.scan_type.as_deref(), "Scan type is required")
    }
}

fn required<T>(value: Option<&str>, missing: &str) -> Result<T, AppError>
where
    T: FromStr<Err = String>,
{
    value
        .ok_or_else(|| AppError::ValidationError(missing.to_string()))?
        .parse()
        .map_err(AppError::ValidationError)
}

#[derive(Debug, Serialize)]
pub struct BookingDetailsResponse {
    pub student: BookingSummary,
}

#[derive(Debug, Deserialize)]
pub struct ListScansQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ScansResponse {
    pub scans: Vec<ScanEvent>,
    pub count: u64,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/v1/outings/scans", post(record_scan).get(list_scans))
        .route(
            "/v1/outings/bookings/{booking_type}/{booking_id}",
            get(get_booking_details),
        )
        .route_layer(middleware::from_fn_with_state(state, operator_auth_middleware))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/outings/scans
/// Validate a gate scan and record it
async fn record_scan(
    State(state): State<AppState>,
    Extension(operator): Extension<OperatorClaims>,
    payload: Result<Json<RecordScanRequest>, JsonRejection>,
) -> Result<Json<RecordedScan>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let booking_type = req.booking_type()?;
    let scan_type = req.scan_type()?;

    let recorded = state
        .validator
        .record_scan(&req.booking_id, booking_type, scan_type, &operator.sub)
        .await
        .map_err(AppError::from_core)?;

    Ok(Json(recorded))
}

/// GET /v1/outings/bookings/{booking_type}/{booking_id}
/// Holder details for a pass, nothing recorded
async fn get_booking_details(
    State(state): State<AppState>,
    Path((booking_type, booking_id)): Path<(String, String)>,
) -> Result<Json<BookingDetailsResponse>, AppError> {
    let booking_type = booking_type
        .parse::<BookingType>()
        .map_err(AppError::ValidationError)?;

    let student = state
        .validator
        .booking_details(&booking_id, booking_type)
        .await
        .map_err(AppError::from_core)?;

    Ok(Json(BookingDetailsResponse { student }))
}

/// GET /v1/outings/scans?page=&limit=
/// Scan log, newest first
async fn list_scans(
    State(state): State<AppState>,
    query: Result<Query<ListScansQuery>, QueryRejection>,
) -> Result<Json<ScansResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let page = PageRequest::from_query(
        query.page,
        query.limit,
        state.paging.default_limit,
        state.paging.max_limit,
    )
    .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let result = state
        .validator
        .list_scans(page)
        .await
        .map_err(AppError::from_core)?;

    Ok(Json(ScansResponse {
        scans: result.scans,
        count: result.count,
    }))
}
