use chrono::NaiveDate;

use super::{
    Batch, Email, PersonName, PhoneNumber, Role, UserId, UserPasswordHash,
};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub hash: UserPasswordHash,
    pub role: Role,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub profile: UserProfile,
    pub password_reset_required: bool,
}

/// Optional profile attributes. `department` and `student_id` are
/// conventionally populated for TEACHER/STUDENT accounts respectively, but
/// nothing enforces that exclusively.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserProfile {
    pub phone_number: Option<PhoneNumber>,
    pub department: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub student_id: Option<String>,
    pub batch: Option<Batch>,
}

impl User {
    pub fn new(
        email: Email,
        hash: UserPasswordHash,
        role: Role,
        first_name: PersonName,
        last_name: PersonName,
        profile: UserProfile,
        password_reset_required: bool,
    ) -> Self {
        Self {
            id: UserId::default(),
            email,
            hash,
            role,
            first_name,
            last_name,
            profile,
            password_reset_required,
        }
    }
}

/// Partial update issued by an administrator. Absent fields keep their
/// prior values.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub email: Option<Email>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}
