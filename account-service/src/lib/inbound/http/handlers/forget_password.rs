use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Start the OTP recovery flow.
///
/// Responds NotFound for unknown emails, which reveals account existence;
/// kept as-is rather than silently papering over it with a uniform response.
pub async fn forget_password(
    State(state): State<AppState>,
    Json(body): Json<ForgetPasswordRequest>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    state.auth_service.forget_password(&body.email).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: "OTP sent successfully".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgetPasswordRequest {
    email: String,
}
