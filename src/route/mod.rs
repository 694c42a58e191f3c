//! Route document loading and live reload

pub mod loader;
pub mod watcher;

pub use watcher::WatchEvent;
