use color_eyre::eyre::{Context, Result};
use uuid::Uuid;

use super::{Batch, UserId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CourseId(Uuid);

impl CourseId {
    pub fn parse(id: &str) -> Result<Self> {
        let parsed = uuid::Uuid::try_parse(id).wrap_err("Invalid course ID")?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for CourseId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseName(String);

impl CourseName {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        match name.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Course name cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max course name length is 255 characters".to_string(),
            )),
            _ => Ok(Self(name)),
        }
    }
}

impl AsRef<String> for CourseName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

/// `teacher_id` is optional so hard-deleting a teacher account leaves the
/// course behind with no owner instead of blocking the delete.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: CourseName,
    pub description: Option<String>,
    pub teacher_id: Option<UserId>,
    pub batch: Option<Batch>,
    pub student_ids: Vec<UserId>,
}

impl Course {
    pub fn new(
        name: CourseName,
        description: Option<String>,
        teacher_id: Option<UserId>,
        batch: Option<Batch>,
        student_ids: Vec<UserId>,
    ) -> Self {
        Self {
            id: CourseId::default(),
            name,
            description,
            teacher_id,
            batch,
            student_ids,
        }
    }
}
