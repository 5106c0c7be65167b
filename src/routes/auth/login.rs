use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        verify_dummy_password_hash, AuthAPIError, Email, Password, Role,
        UserStoreError, ValidationError,
    },
    utils::auth::generate_auth_cookie,
};

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>), AuthAPIError> {
    let email = request.email.ok_or_else(|| {
        ValidationError::new("Email is required".to_string())
    })?;
    let password = request.password.ok_or_else(|| {
        ValidationError::new("Password is required".to_string())
    })?;

    let email = Email::parse(Secret::new(email)).map_err(|_| {
        ValidationError::new("Invalid email address".to_string())
    })?;
    let password = Password::parse(password)?;

    let user_store = state.user_store.read().await;

    let user = match user_store.validate_user(&email, &password).await {
        Ok(user) => user,
        Err(UserStoreError::UserNotFound) => {
            // Unknown emails still pay for one hash verification, so this
            // path is not measurably faster than a wrong password.
            verify_dummy_password_hash(password.as_ref().to_owned()).await;
            return Err(AuthAPIError::IncorrectCredentials);
        }
        Err(UserStoreError::InvalidCredentials) => {
            return Err(AuthAPIError::IncorrectCredentials);
        }
        Err(e) => return Err(AuthAPIError::UnexpectedError(eyre!(e))),
    };

    let auth_cookie = generate_auth_cookie(&user.email, &user.id, user.role)
        .map_err(AuthAPIError::UnexpectedError)?;
    let updated_jar = jar.add(auth_cookie);

    let response = Json(LoginResponse {
        user_id: user.id.as_ref().to_string(),
        role: user.role,
        password_reset_required: user.password_reset_required,
    });

    Ok((StatusCode::OK, updated_jar, response))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub role: Role,
    pub password_reset_required: bool,
}
