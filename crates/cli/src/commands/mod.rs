//! CLI commands.

pub mod areas;
pub mod login;
pub mod validate;
