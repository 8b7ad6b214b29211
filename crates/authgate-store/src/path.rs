//! Dotted-path addressing into a nested session document.
//!
//! A session is one JSON object. Keys like `"Auth.User.id"` walk into it
//! one segment at a time:
//!
//! ```text
//! write("Auth.User", {"id": 42, "username": "alice"})
//!
//!   { "Auth": { "User": { "id": 42, "username": "alice" } } }
//!
//! read("Auth.User.id")   → 42
//! read("Auth.Missing")   → None
//! delete("Auth.User")    → { "Auth": {} }
//! ```
//!
//! Writes create intermediate objects and overwrite any non-object value
//! standing in the way. Reads and deletes never create anything.

use serde_json::{Map, Value};

use crate::StoreError;

/// A parsed session key: one or more non-empty segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPath {
    segments: Vec<String>,
}

impl SessionPath {
    /// Parses a dotted key.
    ///
    /// # Errors
    /// [`StoreError::InvalidKey`] if the key is empty or has an empty
    /// segment (`"Auth..id"`, `".Auth"`, `"Auth."`).
    pub fn parse(key: &str) -> Result<Self, StoreError> {
        let segments: Vec<String> = key.split('.').map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(Self { segments })
    }

    /// The individual segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Looks up the value this path points at.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| node.get(segment.as_str()))
    }

    /// Stores `value` at this path, creating objects along the way.
    pub fn insert(&self, root: &mut Value, value: Value) {
        let Some((last, parents)) = self.segments.split_last() else {
            return;
        };

        let mut node = root;
        for segment in parents {
            let Some(map) = ensure_object(node) else {
                return;
            };
            node = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        if let Some(map) = ensure_object(node) {
            map.insert(last.clone(), value);
        }
    }

    /// Removes and returns the value at this path, if any.
    pub fn remove(&self, root: &mut Value) -> Option<Value> {
        let (last, parents) = self.segments.split_last()?;

        let mut node = root;
        for segment in parents {
            node = node.get_mut(segment.as_str())?;
        }
        node.as_object_mut()?.remove(last.as_str())
    }
}

/// Turns `node` into an object (if it isn't one) and returns its map.
/// Scalars and arrays in the way are replaced.
fn ensure_object(node: &mut Value) -> Option<&mut Map<String, Value>> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    node.as_object_mut()
}
