//! Authentication route handlers

pub mod activate;
pub mod login;
pub mod reset_password;
pub mod sign_up;
