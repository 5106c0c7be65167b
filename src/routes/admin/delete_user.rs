use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{AdminAPIError, UserId, UserStoreError, ValidationError},
    utils::auth::require_admin,
};

/// Hard delete. Repeating the call yields 404, never a silent success.
#[tracing::instrument(name = "Delete user", skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<DeleteUserResponse>), AdminAPIError> {
    require_admin(&jar, &state.banned_token_store).await?;

    let id = UserId::parse(&id).map_err(|_| {
        ValidationError::new("Invalid user ID".to_string())
    })?;

    state
        .user_store
        .write()
        .await
        .delete_user(&id)
        .await
        .map_err(|e| match e {
            UserStoreError::UserNotFound => AdminAPIError::UserNotFound,
            err => AdminAPIError::UnexpectedError(eyre!(err)),
        })?;

    let response = Json(DeleteUserResponse {
        message: "User deleted successfully".to_string(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub message: String,
}
