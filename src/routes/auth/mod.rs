mod login;
mod logout;
mod reset_password;

pub use login::*;
pub use logout::*;
pub use reset_password::*;
