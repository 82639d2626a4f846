//! Registration and login are switched off until permanent membership opens.
//! Both endpoints reject every submission and never touch the store.
use crate::{error::AppError, utils::FormFields};

pub const REGISTRATION_SUSPENDED: &str = "Permanent registration is currently suspended. Please fill the survey form to get a temporary registration number.";
pub const CREDENTIALS_REQUIRED: &str = "Both email and password are required!";
pub const ACCESS_RESTRICTED: &str =
    "Access restricted. Wrong credentials or Permanent Membership required to log in.";

pub fn register() -> AppError {
    AppError::Rejected(REGISTRATION_SUSPENDED)
}

pub fn login(fields: &FormFields) -> AppError {
    match (fields.value("email"), fields.value("password")) {
        (Some(_), Some(_)) => AppError::Rejected(ACCESS_RESTRICTED),
        _ => AppError::bad_input(CREDENTIALS_REQUIRED),
    }
}
