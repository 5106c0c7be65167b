use super::{
    Batch, Course, Email, Password, User, UserChanges, UserId,
    UserPasswordHash,
};
use color_eyre::eyre::{Report, Result};
use secrecy::Secret;
use thiserror::Error;

#[async_trait::async_trait]
pub trait UserStore {
    async fn add_user(&mut self, user: User) -> Result<(), UserStoreError>;
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn get_user_by_id(
        &self,
        id: &UserId,
    ) -> Result<User, UserStoreError>;
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError>;
    async fn validate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError>;
    async fn update_user(
        &mut self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<User, UserStoreError>;
    async fn update_password(
        &mut self,
        email: &Email,
        hash: UserPasswordHash,
        password_reset_required: bool,
    ) -> Result<(), UserStoreError>;
    async fn delete_user(&mut self, id: &UserId)
        -> Result<(), UserStoreError>;
    /// All-or-nothing: either every listed account gets the batch label or
    /// none does.
    async fn assign_batch(
        &mut self,
        batch: &Batch,
        user_ids: &[UserId],
    ) -> Result<(), UserStoreError>;
}

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::InvalidCredentials, Self::InvalidCredentials)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait CourseStore {
    async fn add_course(
        &mut self,
        course: Course,
    ) -> Result<(), CourseStoreError>;
    async fn list_courses(&self) -> Result<Vec<Course>, CourseStoreError>;
}

#[derive(Debug, Error)]
pub enum CourseStoreError {
    #[error("Referenced user not found")]
    UnknownUserReference,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for CourseStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UnknownUserReference, Self::UnknownUserReference)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait::async_trait]
pub trait BannedTokenStore {
    async fn add_token(&mut self, token: &Secret<String>) -> Result<()>;
    async fn check_token(
        &self,
        token: &Secret<String>,
    ) -> Result<(), BannedTokenStoreError>;
}

#[derive(Debug, Error)]
pub enum BannedTokenStoreError {
    #[error("Token is banned")]
    BannedToken,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for BannedTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::BannedToken, Self::BannedToken)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
