use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        AdminAPIError, Batch, Email, PersonName, PhoneNumber, Role,
        TemporaryPassword, User, UserPasswordHash, UserProfile,
        UserStoreError, ValidationError,
    },
    utils::auth::require_admin,
};

#[tracing::instrument(name = "Create user", skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), AdminAPIError> {
    require_admin(&jar, &state.banned_token_store).await?;

    let first_name = request.first_name.ok_or_else(|| {
        ValidationError::new("First name is required".to_string())
    })?;
    let last_name = request.last_name.ok_or_else(|| {
        ValidationError::new("Last name is required".to_string())
    })?;
    let email = request.email.ok_or_else(|| {
        ValidationError::new("Email is required".to_string())
    })?;
    let role = request.role.ok_or_else(|| {
        ValidationError::new("Role is required".to_string())
    })?;

    let first_name = PersonName::parse(first_name)?;
    let last_name = PersonName::parse(last_name)?;
    let role = Role::parse(&role)?;
    let email = Email::parse(Secret::new(email)).map_err(|_| {
        ValidationError::new("Invalid email address".to_string())
    })?;

    let profile = UserProfile {
        phone_number: request
            .phone_number
            .map(PhoneNumber::parse)
            .transpose()?,
        department: request.department,
        date_of_birth: request
            .date_of_birth
            .map(|d| parse_date_of_birth(&d))
            .transpose()?,
        student_id: request.student_id,
        batch: request.batch.map(Batch::parse_year).transpose()?,
    };

    let temporary_password = TemporaryPassword::generate();
    let hash =
        UserPasswordHash::from_password(temporary_password.as_password()?)
            .await
            .map_err(AdminAPIError::UnexpectedError)?;

    // A fresh account is unusable until its owner replaces the one-time
    // credential.
    let user = User::new(
        email, hash, role, first_name, last_name, profile, true,
    );
    let user_id = user.id.as_ref().to_string();
    let email = user.email.as_ref().expose_secret().to_owned();

    state
        .user_store
        .write()
        .await
        .add_user(user)
        .await
        .map_err(|e| match e {
            UserStoreError::UserAlreadyExists => {
                AdminAPIError::UserAlreadyExists
            }
            err => AdminAPIError::UnexpectedError(eyre!(err)),
        })?;

    // The plaintext appears here exactly once. It is never logged and no
    // other response carries it.
    let response = Json(CreateUserResponse {
        user_id,
        email,
        temporary_password: temporary_password
            .as_ref()
            .expose_secret()
            .to_owned(),
    });

    Ok((StatusCode::CREATED, response))
}

fn parse_date_of_birth(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        ValidationError::new(
            "Invalid date of birth, expected YYYY-MM-DD".to_string(),
        )
    })
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub batch: Option<i32>,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user_id: String,
    pub email: String,
    pub temporary_password: String,
}
