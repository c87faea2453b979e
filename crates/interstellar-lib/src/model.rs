//! Plain entities supplied by the record store.
//!
//! Edges and traffic records reference planets by string identifier rather
//! than by pointer. Identifiers are compared case-insensitively everywhere;
//! [`same_id`] and [`id_key`] are the only places that rule is encoded.

use serde::{Deserialize, Serialize};

/// A named location ("planet") identified by a string id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: String,
    pub name: String,
}

impl Vertex {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Placeholder for an edge endpoint that is absent from the vertex
    /// collection. Islands only exist for the duration of a single run.
    pub fn island(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Island {id}"),
        }
    }
}

/// A directed weighted route between two planet ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub destination: String,
    pub distance: f64,
    #[serde(default)]
    pub time_delay: f64,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        distance: f64,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            destination: destination.into(),
            distance,
            time_delay: 0.0,
        }
    }

    /// Builder-style setter for the time delay.
    pub fn with_time_delay(mut self, time_delay: f64) -> Self {
        self.time_delay = time_delay;
        self
    }

    /// Cost of traversing this edge: base distance plus time delay.
    pub fn effective_weight(&self) -> f64 {
        self.distance + self.time_delay
    }

    /// Copy of this edge travelling in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            id: self.id.clone(),
            source: self.destination.clone(),
            destination: self.source.clone(),
            distance: self.distance,
            time_delay: self.time_delay,
        }
    }

    /// Whether this edge connects `source` to `destination` (case-insensitive).
    pub fn connects(&self, source: &str, destination: &str) -> bool {
        same_id(&self.source, source) && same_id(&self.destination, destination)
    }
}

/// Traffic overlay keyed by route id and matching endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficRecord {
    pub route_id: String,
    pub source: String,
    pub destination: String,
    pub delay: f64,
}

impl TrafficRecord {
    pub fn new(
        route_id: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        delay: f64,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            source: source.into(),
            destination: destination.into(),
            delay,
        }
    }

    /// Whether this record targets `edge`: same id and same endpoints.
    pub fn matches(&self, edge: &Edge) -> bool {
        same_id(&edge.id, &self.route_id) && edge.connects(&self.source, &self.destination)
    }
}

/// Per-character lowercase fold; the one definition of id equality.
///
/// `str::to_lowercase` is context-sensitive (a trailing `Σ` becomes `ς`),
/// so it must not be used for identifiers.
fn fold_id(id: &str) -> impl Iterator<Item = char> + '_ {
    id.chars().flat_map(char::to_lowercase)
}

/// Case-insensitive identifier comparison.
pub fn same_id(a: &str, b: &str) -> bool {
    fold_id(a).eq(fold_id(b))
}

/// Canonical lookup key for an identifier; `same_id(a, b)` holds exactly
/// when `id_key(a) == id_key(b)`.
pub fn id_key(id: &str) -> String {
    fold_id(id).collect()
}

/// Minimum Jaro-Winkler similarity for a planet to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Planet ids and names that look similar to `query`, best match first.
pub fn fuzzy_matches(vertices: &[Vertex], query: &str, limit: usize) -> Vec<String> {
    let needle = id_key(query);
    let mut scored: Vec<(f64, &str)> = Vec::new();
    for vertex in vertices {
        for candidate in [vertex.name.as_str(), vertex.id.as_str()] {
            let score = strsim::jaro_winkler(&needle, &id_key(candidate));
            if score >= SUGGESTION_THRESHOLD && !scored.iter().any(|(_, c)| *c == candidate) {
                scored.push((score, candidate));
            }
        }
    }
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
