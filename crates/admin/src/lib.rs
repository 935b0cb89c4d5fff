//! Site CMS admin library.
//!
//! Server-rendered staff panel for editing the public website's content
//! through the remote CMS HTTP API. Exposed as a library so the binary,
//! the CLI and the route-level tests share one implementation.
//!
//! # Security
//!
//! Sessions hold the backend token server-side; the browser only sees an
//! HTTP-only, SameSite=Strict session cookie. Without a genuine token the
//! panel serves fixture data and sends nothing to the backend.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
