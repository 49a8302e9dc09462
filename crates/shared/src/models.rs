use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScriptLoadError;
use crate::geo::Coordinate;

/// Session-unique marker identifier, assigned in creation order starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dropped pin. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub coordinate: Coordinate,
    pub created_at: DateTime<Utc>,
}

/// Append-only list of markers for the page session.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerList {
    markers: Vec<Marker>,
    next_id: u64,
}

impl Default for MarkerList {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerList {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a marker and return it.
    pub fn push(&mut self, coordinate: Coordinate, created_at: DateTime<Utc>) -> &Marker {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.push(Marker {
            id,
            coordinate,
            created_at,
        });
        &self.markers[self.markers.len() - 1]
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        // Ids are assigned in push order, so the list is sorted by id.
        self.markers
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|i| &self.markers[i])
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// One autocomplete prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub description: String,
}

/// Script-loading gate for the mapping library.
///
/// `Failed` is terminal: only a page reload starts over. `Loaded` only
/// leaves for `Failed` when the service rejects the API key, which Google
/// reports after the script has already run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(ScriptLoadError),
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }

    /// Resolve the gate. Returns `false` if it was already resolved.
    pub fn resolve(&mut self, result: Result<(), ScriptLoadError>) -> bool {
        if *self != LoadState::Loading {
            return false;
        }
        *self = match result {
            Ok(()) => LoadState::Loaded,
            Err(e) => LoadState::Failed(e),
        };
        true
    }

    /// The service refused the API key. Returns `false` if already failed.
    pub fn reject_credentials(&mut self) -> bool {
        if matches!(self, LoadState::Failed(_)) {
            return false;
        }
        *self = LoadState::Failed(ScriptLoadError::InvalidApiKey);
        true
    }
}
