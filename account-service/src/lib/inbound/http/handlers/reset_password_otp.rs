use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn reset_password_otp(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordOtpRequest>,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    state
        .auth_service
        .reset_password_with_otp(
            &body.email,
            &body.otp,
            &body.new_password,
            &body.confirm_password,
        )
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData {
            message: "Password reset successfully. Please login.".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordOtpRequest {
    email: String,
    otp: String,
    new_password: String,
    confirm_password: String,
}
