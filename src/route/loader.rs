//! Route document decoding
//!
//! The route document is a JSON object with three optional keys:
//! `current` (`{x, y}`), `path` (array of `{x, y}`) and `allNodes`
//! (array of `{id, x, y}`). Missing keys decode to empty values. A value of
//! the wrong type fails the whole load, leaving the caller's previous
//! snapshot in place.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::domain::{CadPoint, Node, RouteModel, RouteSnapshot};
use crate::error::RouteError;

/// Result of one load attempt
#[derive(Debug, PartialEq)]
pub enum LoadOutcome {
    /// A complete new snapshot was decoded
    Loaded(RouteSnapshot),
    /// Nothing to publish; keep whatever is displayed
    NoChange,
}

/// A JSON object decoded as `T`
///
/// Derived struct impls also accept arrays matched by position; records in
/// the route document must be objects.
#[derive(Debug)]
struct Record<T>(T);

impl<'de, T: DeserializeOwned> Deserialize<'de> for Record<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        T::deserialize(Value::Object(map))
            .map(Record)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RouteDocument {
    current: Option<Record<PointEntry>>,
    path: Option<Vec<Record<PointEntry>>>,
    #[serde(rename = "allNodes")]
    all_nodes: Option<Vec<Record<NodeEntry>>>,
}

#[derive(Debug, Deserialize)]
struct PointEntry {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    #[serde(default)]
    id: Option<NodeId>,
    x: f64,
    y: f64,
}

/// Node ids are text, but numeric ids are accepted and kept as written
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeId {
    Text(String),
    Number(serde_json::Number),
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        match id {
            NodeId::Text(s) => s,
            NodeId::Number(n) => n.to_string(),
        }
    }
}

impl From<Record<PointEntry>> for CadPoint {
    fn from(Record(p): Record<PointEntry>) -> Self {
        CadPoint::new(p.x, p.y)
    }
}

impl From<RouteDocument> for RouteSnapshot {
    fn from(doc: RouteDocument) -> Self {
        RouteSnapshot {
            current: doc.current.map(CadPoint::from),
            path: doc
                .path
                .unwrap_or_default()
                .into_iter()
                .map(CadPoint::from)
                .collect(),
            nodes: doc
                .all_nodes
                .unwrap_or_default()
                .into_iter()
                .map(|Record(n)| Node {
                    id: n.id.map(String::from).unwrap_or_default(),
                    position: CadPoint::new(n.x, n.y),
                })
                .collect(),
        }
    }
}

/// Decode a route document from its JSON text
pub fn parse(text: &str) -> Result<RouteSnapshot, RouteError> {
    let Record(doc) = serde_json::from_str::<Record<RouteDocument>>(text)?;
    Ok(doc.into())
}

/// Read and decode the route document, `Ok(None)` if the file does not exist
pub fn try_load(path: &Path) -> Result<Option<RouteSnapshot>, RouteError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(RouteError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    parse(&text).map(Some)
}

/// Load the route document, logging and swallowing every failure
pub fn load(path: &Path) -> LoadOutcome {
    match try_load(path) {
        Ok(Some(snapshot)) => {
            log::info!(
                "Loaded route from {}: {} path points, {} nodes, current {}",
                path.display(),
                snapshot.path.len(),
                snapshot.nodes.len(),
                if snapshot.current.is_some() { "set" } else { "unset" }
            );
            LoadOutcome::Loaded(snapshot)
        }
        Ok(None) => {
            log::debug!("Route document {} does not exist yet", path.display());
            LoadOutcome::NoChange
        }
        Err(err) => {
            log::error!("Keeping previous route, load of {} failed: {}", path.display(), err);
            LoadOutcome::NoChange
        }
    }
}

impl RouteModel {
    /// Reload from disk; returns true if a new snapshot was published
    pub fn reload(&mut self, path: &Path) -> bool {
        match load(path) {
            LoadOutcome::Loaded(snapshot) => {
                self.replace(snapshot);
                true
            }
            LoadOutcome::NoChange => false,
        }
    }
}
