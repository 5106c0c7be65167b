use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        AdminAPIError, Email, PersonName, Role, UserChanges, UserId,
        UserStoreError, ValidationError,
    },
    utils::auth::require_admin,
};

use super::list_users::UserResponse;

#[tracing::instrument(name = "Update user", skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<(StatusCode, Json<UpdateUserResponse>), AdminAPIError> {
    require_admin(&jar, &state.banned_token_store).await?;

    let id = UserId::parse(&id).map_err(|_| {
        ValidationError::new("Invalid user ID".to_string())
    })?;

    let changes = UserChanges {
        first_name: request
            .first_name
            .map(PersonName::parse)
            .transpose()?,
        last_name: request.last_name.map(PersonName::parse).transpose()?,
        email: request
            .email
            .map(|e| {
                Email::parse(Secret::new(e)).map_err(|_| {
                    ValidationError::new("Invalid email address".to_string())
                })
            })
            .transpose()?,
        role: request.role.as_deref().map(Role::parse).transpose()?,
    };

    if changes.is_empty() {
        return Err(ValidationError::new(
            "No fields to update".to_string(),
        )
        .into());
    }

    let user = state
        .user_store
        .write()
        .await
        .update_user(&id, &changes)
        .await
        .map_err(|e| match e {
            UserStoreError::UserNotFound => AdminAPIError::UserNotFound,
            UserStoreError::UserAlreadyExists => {
                AdminAPIError::UserAlreadyExists
            }
            err => AdminAPIError::UnexpectedError(eyre!(err)),
        })?;

    let response = Json(UpdateUserResponse {
        message: "User updated successfully".to_string(),
        user: UserResponse::from(&user),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub message: String,
    pub user: UserResponse,
}
