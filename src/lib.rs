//! Contacts - contact book with pluggable file formats and display views
//!
//! Formats and views register themselves with a registry and are notified
//! through it. This library exports the core modules for testing and reuse.

pub mod app;
pub mod error;
pub mod formats;
pub mod logging;
pub mod models;
pub mod storage;
pub mod views;

pub use error::{ContactsError, Result};
