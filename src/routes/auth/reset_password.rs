use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        AuthAPIError, Email, Password, UserPasswordHash, UserStoreError,
        ValidationError,
    },
};

// The same generic rejection covers a malformed email and an unknown one,
// so the endpoint cannot be used to enumerate accounts.
fn invalid_request() -> ValidationError {
    ValidationError::new("Invalid request".to_string())
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<(StatusCode, Json<ResetPasswordResponse>), AuthAPIError> {
    let email = request.email.ok_or_else(|| {
        ValidationError::new("Email is required".to_string())
    })?;
    let new_password = request.new_password.ok_or_else(|| {
        ValidationError::new("New password is required".to_string())
    })?;

    let email =
        Email::parse(Secret::new(email)).map_err(|_| invalid_request())?;
    let new_password = Password::parse(new_password)?;

    let hash = UserPasswordHash::from_password(new_password)
        .await
        .map_err(AuthAPIError::UnexpectedError)?;

    state
        .user_store
        .write()
        .await
        .update_password(&email, hash, false)
        .await
        .map_err(|e| match e {
            UserStoreError::UserNotFound => {
                AuthAPIError::ValidationError(invalid_request())
            }
            err => AuthAPIError::UnexpectedError(eyre!(err)),
        })?;

    let response = Json(ResetPasswordResponse {
        message: "Password has been reset".to_string(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub new_password: Option<Secret<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    pub message: String,
}
