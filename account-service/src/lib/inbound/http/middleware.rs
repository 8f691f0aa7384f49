use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified token claims into the handler.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub status: UserStatus,
}

/// Middleware that validates bearer tokens and requires an ACTIVE status
/// claim.
///
/// Malformed tokens, bad signatures, and expired tokens all collapse to the
/// same 401 response so a caller cannot tell which check failed. The status
/// check uses the claim embedded at issuance, not a fresh store lookup.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        unauthorized("Invalid or expired token")
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse user ID from token");
        unauthorized("Invalid or expired token")
    })?;

    let status: UserStatus = claims.status.parse().map_err(|_| {
        tracing::warn!(status = %claims.status, "Unknown status claim in token");
        unauthorized("Invalid or expired token")
    })?;

    if status != UserStatus::Active {
        tracing::warn!(user_id = %user_id, status = %status, "Account is not active");
        return Err(unauthorized("Account is not active"));
    }

    req.extensions_mut()
        .insert(AuthenticatedUser { user_id, status });

    Ok(next.run(req).await)
}

// Same {status_code, data: {message}} envelope as every other error response.
fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
