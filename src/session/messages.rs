//! Application messages

use crate::route::WatchEvent;

use super::interaction::Gesture;

#[derive(Debug, Clone)]
pub enum Msg {
    /// Pointer input translated by the floorplan widget
    Gesture(Gesture),
    /// Event from the route file watcher
    Watch(WatchEvent),
}
