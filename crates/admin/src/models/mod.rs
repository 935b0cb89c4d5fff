//! Domain models for the admin panel.

pub mod session;
pub mod toast;

pub use session::{
    AdminSession, DataMode, SessionCredential, SessionUser, Verification, keys as session_keys,
};
pub use toast::{Toast, ToastKind};
