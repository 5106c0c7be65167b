use std::collections::HashMap;

use secrecy::ExposeSecret;

use crate::domain::{
    verify_password_hash, Batch, Email, Password, User, UserChanges, UserId,
    UserPasswordHash, UserStore, UserStoreError,
};

#[derive(Default)]
pub struct HashmapUserStore {
    users: HashMap<UserId, User>,
}

#[async_trait::async_trait]
impl UserStore for HashmapUserStore {
    async fn add_user(&mut self, user: User) -> Result<(), UserStoreError> {
        if self.users.values().any(|u| u.email == user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        self.users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        match self.users.values().find(|u| &u.email == email) {
            Some(user) => Ok(user.clone()),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    async fn get_user_by_id(
        &self,
        id: &UserId,
    ) -> Result<User, UserStoreError> {
        match self.users.get(id) {
            Some(user) => Ok(user.clone()),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by(|a, b| {
            a.email
                .as_ref()
                .expose_secret()
                .cmp(b.email.as_ref().expose_secret())
        });
        Ok(users)
    }

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

    async fn update_user(
        &mut self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<User, UserStoreError> {
        if let Some(email) = &changes.email {
            let collision = self
                .users
                .values()
                .any(|u| &u.email == email && &u.id != id);
            if collision {
                return Err(UserStoreError::UserAlreadyExists);
            }
        }

        let user = self
            .users
            .get_mut(id)
            .ok_or(UserStoreError::UserNotFound)?;
        changes.apply(user);
        Ok(user.clone())
    }

    async fn update_password(
        &mut self,
        email: &Email,
        hash: UserPasswordHash,
        password_reset_required: bool,
    ) -> Result<(), UserStoreError> {
        let user = self
            .users
            .values_mut()
            .find(|u| &u.email == email)
            .ok_or(UserStoreError::UserNotFound)?;
        user.hash = hash;
        user.password_reset_required = password_reset_required;
        Ok(())
    }

    async fn delete_user(
        &mut self,
        id: &UserId,
    ) -> Result<(), UserStoreError> {
        match self.users.remove(id) {
            Some(_) => Ok(()),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    async fn assign_batch(
        &mut self,
        batch: &Batch,
        user_ids: &[UserId],
    ) -> Result<(), UserStoreError> {
        // Check every id up front so a miss leaves the map untouched.
        if user_ids.iter().any(|id| !self.users.contains_key(id)) {
            return Err(UserStoreError::UserNotFound);
        }

        for id in user_ids {
            if let Some(user) = self.users.get_mut(id) {
                user.profile.batch = Some(batch.clone());
            }
        }
        Ok(())
    }
}
