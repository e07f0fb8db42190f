//! Playback Service
//!
//! Authorization endpoint for the site's video archive: given a viewer
//! identity (or an explicit public-access flag) and a video id, it decides
//! whether playback is allowed and mints a signed, expiring playable URL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
