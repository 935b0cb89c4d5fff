//! Business logic services for admin.
//!
//! # Services
//!
//! - `login` - Sign-in against the CMS backend, with token fallbacks
//! - `sections` - Load and save editable content sections
//! - `listings` - Load inbound record listings
//! - `fixtures` - Demo content served when no genuine token is present

pub mod fixtures;
pub mod listings;
pub mod login;
pub mod sections;

pub use listings::{ListingService, LoadedListing};
pub use login::{LoginError, LoginService};
pub use sections::{LoadedSection, SaveOutcome, SectionService};

/// The backend refused the session token on a live request.
///
/// Handlers answer it by signing the user out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session token was refused by the CMS API")]
pub struct SessionExpired;
