use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        AdminAPIError, Batch, Course, CourseName, CourseStoreError, UserId,
        UserStoreError, ValidationError,
    },
    utils::auth::require_admin,
};

#[tracing::instrument(name = "List courses", skip_all)]
pub async fn get_course_list(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, Json<CourseListResponse>), AdminAPIError> {
    require_admin(&jar, &state.banned_token_store).await?;

    let courses = state
        .course_store
        .read()
        .await
        .list_courses()
        .await
        .map_err(|e| AdminAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(CourseListResponse {
        courses: courses.iter().map(CourseResponse::from).collect(),
    });

    Ok((StatusCode::OK, response))
}

#[tracing::instrument(name = "Create course", skip_all)]
pub async fn create_course(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CreateCourseResponse>), AdminAPIError> {
    require_admin(&jar, &state.banned_token_store).await?;

    let name = request.name.ok_or_else(|| {
        ValidationError::new("Course name is required".to_string())
    })?;
    let name = CourseName::parse(name)?;

    let teacher_id = request
        .teacher_id
        .map(|id| {
            UserId::parse(&id).map_err(|_| {
                ValidationError::new(format!("Invalid teacher ID: {}", id))
            })
        })
        .transpose()?;
    let student_ids = request
        .student_ids
        .unwrap_or_default()
        .iter()
        .map(|id| {
            UserId::parse(id).map_err(|_| {
                ValidationError::new(format!("Invalid student ID: {}", id))
            })
        })
        .collect::<Result<Vec<UserId>, ValidationError>>()?;
    let batch = request.batch.map(Batch::parse_label).transpose()?;

    // Dangling references are a validation failure, not a storage error.
    {
        let user_store = state.user_store.read().await;
        if let Some(teacher_id) = &teacher_id {
            check_reference(
                user_store.get_user_by_id(teacher_id).await,
                "Unknown teacher reference",
            )?;
        }
        for student_id in &student_ids {
            check_reference(
                user_store.get_user_by_id(student_id).await,
                "Unknown student reference",
            )?;
        }
    }

    let course =
        Course::new(name, request.description, teacher_id, batch, student_ids);
    let response_course = CourseResponse::from(&course);

    state
        .course_store
        .write()
        .await
        .add_course(course)
        .await
        .map_err(|e| match e {
            CourseStoreError::UnknownUserReference => {
                AdminAPIError::ValidationError(ValidationError::new(
                    "Unknown user reference".to_string(),
                ))
            }
            err => AdminAPIError::UnexpectedError(eyre!(err)),
        })?;

    let response = Json(CreateCourseResponse {
        course: response_course,
    });

    Ok((StatusCode::CREATED, response))
}

fn check_reference<T>(
    result: Result<T, UserStoreError>,
    message: &str,
) -> Result<(), AdminAPIError> {
    match result {
        Ok(_) => Ok(()),
        Err(UserStoreError::UserNotFound) => Err(
            AdminAPIError::ValidationError(ValidationError::new(
                message.to_string(),
            )),
        ),
        Err(e) => Err(AdminAPIError::UnexpectedError(eyre!(e))),
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<String>,
    pub student_ids: Option<Vec<String>>,
    pub batch: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCourseResponse {
    pub course: CourseResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: Option<String>,
    pub batch: Option<String>,
    pub student_ids: Vec<String>,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.as_ref().to_string(),
            name: course.name.as_ref().to_owned(),
            description: course.description.clone(),
            teacher_id: course.teacher_id.map(|id| id.as_ref().to_string()),
            batch: course.batch.as_ref().map(|b| b.as_ref().to_owned()),
            student_ids: course
                .student_ids
                .iter()
                .map(|id| id.as_ref().to_string())
                .collect(),
        }
    }
}
