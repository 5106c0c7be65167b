use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{AdminAPIError, Role, User},
    utils::auth::require_admin,
};

#[tracing::instrument(name = "List users", skip_all)]
pub async fn get_user_list(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, Json<UserListResponse>), AdminAPIError> {
    require_admin(&jar, &state.banned_token_store).await?;

    let users = state
        .user_store
        .read()
        .await
        .list_users()
        .await
        .map_err(|e| AdminAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(UserListResponse {
        users: users.iter().map(UserResponse::from).collect(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
}

/// The password hash deliberately has no field here, so it can never cross
/// the serialization boundary.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub department: Option<String>,
    pub date_of_birth: Option<String>,
    pub student_id: Option<String>,
    pub batch: Option<String>,
    pub password_reset_required: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_ref().to_string(),
            email: user.email.as_ref().expose_secret().to_owned(),
            role: user.role,
            first_name: user.first_name.as_ref().to_owned(),
            last_name: user.last_name.as_ref().to_owned(),
            phone_number: user
                .profile
                .phone_number
                .as_ref()
                .map(|p| p.as_ref().to_owned()),
            department: user.profile.department.clone(),
            date_of_birth: user
                .profile
                .date_of_birth
                .map(|d| d.to_string()),
            student_id: user.profile.student_id.clone(),
            batch: user.profile.batch.as_ref().map(|b| b.as_ref().to_owned()),
            password_reset_required: user.password_reset_required,
        }
    }
}
