//! Site CMS admin core - shared types library.
//!
//! This crate provides the types used by every part of the admin panel:
//! - `cms-admin` - the staff-facing admin server
//! - `cms-cli` - command-line tools for schema checks and login diagnostics
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no sessions. Everything here can be unit tested in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, session tokens, roles and list item ids
//! - [`content`] - Content areas, field schemas, content records and validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod content;
pub mod types;

pub use content::*;
pub use types::*;
