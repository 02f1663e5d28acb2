//! User and session handlers

pub mod login;
pub mod users;

pub use login::{login, logout};
pub use users::{create_user, list_users};
