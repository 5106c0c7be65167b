mod batch;
mod course;
mod data_stores;
mod email;
mod error;
mod password;
mod person_name;
mod phone_number;
mod role;
mod temporary_password;
mod user;
mod user_id;
mod user_password_hash;

pub use batch::*;
pub use course::*;
pub use data_stores::*;
pub use email::*;
pub use error::*;
pub use password::*;
pub use person_name::*;
pub use phone_number::*;
pub use role::*;
pub use temporary_password::*;
pub use user::*;
pub use user_id::*;
pub use user_password_hash::*;
