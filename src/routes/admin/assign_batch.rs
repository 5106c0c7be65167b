use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        AdminAPIError, Batch, UserId, UserStoreError, ValidationError,
    },
    utils::auth::require_admin,
};

#[tracing::instrument(name = "Assign batch", skip_all)]
pub async fn assign_batch(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<AssignBatchRequest>,
) -> Result<(StatusCode, Json<AssignBatchResponse>), AdminAPIError> {
    require_admin(&jar, &state.banned_token_store).await?;

    let batch_name = request.batch_name.ok_or_else(|| {
        ValidationError::new("Batch name is required".to_string())
    })?;
    let user_ids = request.user_ids.ok_or_else(|| {
        ValidationError::new("User IDs are required".to_string())
    })?;

    if user_ids.is_empty() {
        return Err(ValidationError::new(
            "At least one user ID is required".to_string(),
        )
        .into());
    }

    let batch = Batch::parse_label(batch_name)?;
    let user_ids = user_ids
        .iter()
        .map(|id| {
            UserId::parse(id).map_err(|_| {
                ValidationError::new(format!("Invalid user ID: {}", id))
            })
        })
        .collect::<Result<Vec<UserId>, ValidationError>>()?;

    // All-or-nothing: an unknown id in the list assigns nothing.
    state
        .user_store
        .write()
        .await
        .assign_batch(&batch, &user_ids)
        .await
        .map_err(|e| match e {
            UserStoreError::UserNotFound => AdminAPIError::UserNotFound,
            err => AdminAPIError::UnexpectedError(eyre!(err)),
        })?;

    let response = Json(AssignBatchResponse {
        message: "Batch assigned successfully".to_string(),
    });

    Ok((StatusCode::OK, response))
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AssignBatchRequest {
    pub batch_name: Option<String>,
    pub user_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignBatchResponse {
    pub message: String,
}
