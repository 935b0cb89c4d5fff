//! Core types for the CMS admin.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod token;

pub use email::{Email, EmailError};
pub use id::ListItemId;
pub use role::UserRole;
pub use token::{SessionToken, TokenError};
