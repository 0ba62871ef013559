use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// JWT Claims
// ============================================================================

/// Claims carried by an operator's session token. Tokens are minted by the
/// campus sign-in service; this service only verifies them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OperatorClaims {
    /// Operator id, recorded as `scannedBy` on every scan.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub role: String,
    pub exp: usize,
}

// ============================================================================
// Operator Authentication Middleware
// ============================================================================

pub async fn operator_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from Authorization header
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

    // 2. Decode and validate JWT
    let token_data = decode::<OperatorClaims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected operator token");
        AppError::AuthenticationError("Invalid or expired token".to_string())
    })?;

    // 3. Check role may operate the gate
    if !state.auth.allowed_roles.iter().any(|r| r == &token_data.claims.role) {
        return Err(AppError::AuthorizationError(format!(
            "Role {} may not record scans",
            token_data.claims.role
        )));
    }

    // 4. Inject claims into request extensions
    req.extensions_mut().insert(token_data.claims);

    Ok(next.run(req).await)
}
