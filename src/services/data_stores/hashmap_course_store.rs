use std::collections::HashMap;

use crate::domain::{Course, CourseId, CourseStore, CourseStoreError};

#[derive(Default)]
pub struct HashmapCourseStore {
    courses: HashMap<CourseId, Course>,
}

#[async_trait::async_trait]
impl CourseStore for HashmapCourseStore {
    async fn add_course(
        &mut self,
        course: Course,
    ) -> Result<(), CourseStoreError> {
        self.courses.insert(course.id, course);
        Ok(())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, CourseStoreError> {
        let mut courses: Vec<Course> =
            self.courses.values().cloned().collect();
        courses.sort_by(|a, b| a.name.as_ref().cmp(b.name.as_ref()));
        Ok(courses)
    }
}
