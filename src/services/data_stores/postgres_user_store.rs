use color_eyre::eyre::{eyre, Result};
use secrecy::{ExposeSecret, Secret};
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::domain::{
    verify_password_hash, Batch, Email, Password, PersonName, PhoneNumber,
    Role, User, UserChanges, UserId, UserPasswordHash, UserProfile,
    UserStore, UserStoreError,
};

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, role, first_name, \
     last_name, phone_number, department, date_of_birth, student_id, batch, \
     password_reset_required";

fn user_from_row(row: &PgRow) -> Result<User, UserStoreError> {
    let unexpected = UserStoreError::UnexpectedError;

    let email: String =
        row.try_get("email").map_err(|e| unexpected(eyre!(e)))?;
    let hash: String = row
        .try_get("password_hash")
        .map_err(|e| unexpected(eyre!(e)))?;
    let role: String = row.try_get("role").map_err(|e| unexpected(eyre!(e)))?;
    let first_name: String =
        row.try_get("first_name").map_err(|e| unexpected(eyre!(e)))?;
    let last_name: String =
        row.try_get("last_name").map_err(|e| unexpected(eyre!(e)))?;
    let phone_number: Option<String> = row
        .try_get("phone_number")
        .map_err(|e| unexpected(eyre!(e)))?;
    let batch: Option<String> =
        row.try_get("batch").map_err(|e| unexpected(eyre!(e)))?;

    Ok(User {
        id: UserId::new(
            row.try_get("id").map_err(|e| unexpected(eyre!(e)))?,
        ),
        email: Email::parse(Secret::new(email))
            .map_err(|e| unexpected(eyre!(e)))?,
        hash: UserPasswordHash::parse(Secret::new(hash))
            .map_err(|e| unexpected(eyre!(e)))?,
        role: Role::parse(&role).map_err(|e| unexpected(eyre!(e)))?,
        first_name: PersonName::parse(first_name)
            .map_err(|e| unexpected(eyre!(e)))?,
        last_name: PersonName::parse(last_name)
            .map_err(|e| unexpected(eyre!(e)))?,
        profile: UserProfile {
            phone_number: phone_number
                .map(PhoneNumber::parse)
                .transpose()
                .map_err(|e| unexpected(eyre!(e)))?,
            department: row
                .try_get("department")
                .map_err(|e| unexpected(eyre!(e)))?,
            date_of_birth: row
                .try_get("date_of_birth")
                .map_err(|e| unexpected(eyre!(e)))?,
            student_id: row
                .try_get("student_id")
                .map_err(|e| unexpected(eyre!(e)))?,
            batch: batch
                .map(Batch::parse_label)
                .transpose()
                .map_err(|e| unexpected(eyre!(e)))?,
        },
        password_reset_required: row
            .try_get("password_reset_required")
            .map_err(|e| unexpected(eyre!(e)))?,
    })
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&mut self, user: User) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, first_name,
                last_name, phone_number, department, date_of_birth,
                student_id, batch, password_reset_required)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.as_ref())
        .bind(user.email.as_ref().expose_secret())
        .bind(user.hash.as_ref().expose_secret())
        .bind(user.role.as_str())
        .bind(user.first_name.as_ref())
        .bind(user.last_name.as_ref())
        .bind(user.profile.phone_number.as_ref().map(|p| p.as_ref()))
        .bind(user.profile.department.as_ref())
        .bind(user.profile.date_of_birth)
        .bind(user.profile.student_id.as_ref())
        .bind(user.profile.batch.as_ref().map(|b| b.as_ref()))
        .bind(user.password_reset_required)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                UserStoreError::UserAlreadyExists
            }
            err => UserStoreError::UnexpectedError(eyre!(err)),
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_ref().expose_secret())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => UserStoreError::UserNotFound,
            err => UserStoreError::UnexpectedError(eyre!(err)),
        })?;

        user_from_row(&row)
    }

    #[tracing::instrument(
        name = "Retrieving user by ID from PostgreSQL",
        skip_all
    )]
    async fn get_user_by_id(
        &self,
        id: &UserId,
    ) -> Result<User, UserStoreError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => UserStoreError::UserNotFound,
            err => UserStoreError::UnexpectedError(eyre!(err)),
        })?;

        user_from_row(&row)
    }

    #[tracing::instrument(name = "Listing users from PostgreSQL", skip_all)]
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, email"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        rows.iter().map(user_from_row).collect()
    }

    #[tracing::instrument(
        name = "Validating user credentials in PostgreSQL",
        skip_all
    )]
    async fn validate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let user = self.get_user(email).await?;
        verify_password_hash(
            user.hash.as_ref().to_owned(),
            password.as_ref().to_owned(),
        )
        .await
        .map_err(|_| UserStoreError::InvalidCredentials)?;
        Ok(user)
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip_all)]
    async fn update_user(
        &mut self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<User, UserStoreError> {
        let mut user = self.get_user_by_id(id).await?;
        changes.apply(&mut user);

        sqlx::query(
            r#"
            UPDATE users
            SET email = $2, role = $3, first_name = $4, last_name = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_ref())
        .bind(user.email.as_ref().expose_secret())
        .bind(user.role.as_str())
        .bind(user.first_name.as_ref())
        .bind(user.last_name.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                UserStoreError::UserAlreadyExists
            }
            err => UserStoreError::UnexpectedError(eyre!(err)),
        })?;

        Ok(user)
    }

    #[tracing::instrument(name = "Updating password in PostgreSQL", skip_all)]
    async fn update_password(
        &mut self,
        email: &Email,
        hash: UserPasswordHash,
        password_reset_required: bool,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, password_reset_required = $3
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .bind(hash.as_ref().expose_secret())
        .bind(password_reset_required)
        .execute(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Deleting user from PostgreSQL", skip_all)]
    async fn delete_user(
        &mut self,
        id: &UserId,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Assigning batch in PostgreSQL", skip_all)]
    async fn assign_batch(
        &mut self,
        batch: &Batch,
        user_ids: &[UserId],
    ) -> Result<(), UserStoreError> {
        let mut ids: Vec<uuid::Uuid> =
            user_ids.iter().map(|id| *id.as_ref()).collect();
        ids.sort();
        ids.dedup();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        let result =
            sqlx::query("UPDATE users SET batch = $1 WHERE id = ANY($2)")
                .bind(batch.as_ref())
                .bind(&ids)
                .execute(&mut *tx)
                .await
                .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        // Any unknown id leaves the whole batch unassigned.
        if result.rows_affected() != ids.len() as u64 {
            tx.rollback()
                .await
                .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;
            return Err(UserStoreError::UserNotFound);
        }

        tx.commit()
            .await
            .map_err(|e| UserStoreError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }
}
