mod assign_batch;
mod courses;
mod create_user;
mod delete_user;
mod list_users;
mod update_user;

pub use assign_batch::*;
pub use courses::*;
pub use create_user::*;
pub use delete_user::*;
pub use list_users::*;
pub use update_user::*;
