//! Session management module
//!
//! This module contains:
//! - Session state owned by the UI thread
//! - Message types for the application
//! - The interaction controller for pan, zoom and node clicks

pub mod interaction;
pub mod messages;
pub mod state;

pub use state::Session;
