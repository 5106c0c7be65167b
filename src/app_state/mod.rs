use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{BannedTokenStore, CourseStore, UserStore};

pub type UserStoreType = Arc<RwLock<dyn UserStore + Send + Sync>>;
pub type BannedTokenStoreType = Arc<RwLock<dyn BannedTokenStore + Send + Sync>>;
pub type CourseStoreType = Arc<RwLock<dyn CourseStore + Send + Sync>>;

#[derive(Clone)]
pub struct AppState {
    pub user_store: UserStoreType,
    pub banned_token_store: BannedTokenStoreType,
    pub course_store: CourseStoreType,
}

impl AppState {
    pub fn new(
        user_store: UserStoreType,
        banned_token_store: BannedTokenStoreType,
        course_store: CourseStoreType,
    ) -> Self {
        Self {
            user_store,
            banned_token_store,
            course_store,
        }
    }
}
