use std::cmp::Ordering;
use std::fmt::Write;

use serde::Serialize;

use crate::model::{same_id, Vertex};
use crate::path::ShortestPaths;
use crate::routing::RoutePlan;

/// Text shown when no path exists.
pub const PATH_UNAVAILABLE: &str = "Unavailable.";

/// Prefix shown when start and goal are the same planet.
const PATH_NOT_NEEDED: &str = "Not needed. You are already on planet ";

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Tab-separated `Name (id)` segments.
    Plain,
    /// Numbered steps with accumulated weights.
    Text,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: String,
    pub name: String,
}

impl From<&Vertex> for RouteEndpoint {
    fn from(vertex: &Vertex) -> Self {
        Self {
            id: vertex.id.clone(),
            name: vertex.name.clone(),
        }
    }
}

impl RouteEndpoint {
    fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: String,
    pub name: String,
    /// Accumulated weight from the start.
    pub distance: f64,
    /// Weight of the hop into this step; absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg: Option<f64>,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub hops: usize,
    pub total_weight: f64,
    pub undirected: bool,
    pub traffic: bool,
    pub already_there: bool,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    pub fn from_plan(plan: &RoutePlan) -> Self {
        let mut previous: Option<f64> = None;
        let steps = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, stop)| {
                let leg = previous.map(|before| stop.distance - before);
                previous = Some(stop.distance);
                RouteStep {
                    index,
                    id: stop.vertex.id.clone(),
                    name: stop.vertex.name.clone(),
                    distance: stop.distance,
                    leg,
                }
            })
            .collect();

        Self {
            start: RouteEndpoint::from(&plan.start),
            goal: RouteEndpoint::from(&plan.goal),
            hops: plan.hop_count(),
            total_weight: plan.total_weight,
            undirected: plan.undirected,
            traffic: plan.traffic,
            already_there: plan.already_there(),
            steps,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::Plain => self.render_plain(),
            RouteRenderMode::Text => self.render_text(),
        }
    }

    fn render_plain(&self) -> String {
        if self.already_there {
            return format!("{PATH_NOT_NEEDED}{}", self.start.name);
        }
        let mut buffer = String::new();
        for step in &self.steps {
            let _ = write!(buffer, "{} ({})\t", step.name, step.id);
        }
        buffer
    }

    fn render_text(&self) -> String {
        let mut buffer = String::new();
        if self.already_there {
            let _ = writeln!(buffer, "{PATH_NOT_NEEDED}{}", self.start.name);
            return buffer;
        }

        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, total weight {:.2}, {}, traffic {})",
            self.start.label(),
            self.goal.label(),
            self.hops,
            self.total_weight,
            if self.undirected { "undirected" } else { "directed" },
            if self.traffic { "applied" } else { "ignored" },
        );
        for step in &self.steps {
            match step.leg {
                Some(leg) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({}) [{:.2}] ({:+.2})",
                        step.index, step.name, step.id, step.distance, leg
                    );
                }
                None => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({}) [{:.2}]",
                        step.index, step.name, step.id, step.distance
                    );
                }
            }
        }
        buffer
    }
}

/// Distance from the run source to one planet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceEntry {
    pub id: String,
    pub name: String,
    /// `None` when the planet is unreachable.
    pub distance: Option<f64>,
    /// Reached through an edge endpoint that is not a known planet.
    pub island: bool,
}

/// Distances from one source to every known planet and every island reached.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceTable {
    pub source: RouteEndpoint,
    pub entries: Vec<DistanceEntry>,
}

impl DistanceTable {
    /// Sorted by distance (unreachable last), then id.
    pub fn from_paths(vertices: &[Vertex], paths: &ShortestPaths) -> Self {
        let mut entries: Vec<DistanceEntry> = Vec::with_capacity(vertices.len());
        for vertex in vertices {
            if entries.iter().any(|entry| same_id(&entry.id, &vertex.id)) {
                continue;
            }
            let distance = paths.distance_of(&vertex.id);
            entries.push(DistanceEntry {
                id: vertex.id.clone(),
                name: vertex.name.clone(),
                distance: distance.is_finite().then_some(distance),
                island: false,
            });
        }
        for (vertex, distance) in paths.reached_vertices() {
            if entries.iter().any(|entry| same_id(&entry.id, &vertex.id)) {
                continue;
            }
            entries.push(DistanceEntry {
                id: vertex.id.clone(),
                name: vertex.name.clone(),
                distance: distance.is_finite().then_some(distance),
                island: true,
            });
        }

        entries.sort_by(|a, b| {
            compare_distance(a.distance, b.distance).then_with(|| a.id.cmp(&b.id))
        });

        Self {
            source: RouteEndpoint::from(paths.source()),
            entries,
        }
    }

    pub fn render(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Distances from {}:", self.source.label());
        for entry in &self.entries {
            let distance = entry
                .distance
                .map(|d| format!("{d:.2}"))
                .unwrap_or_else(|| "unreachable".to_string());
            let marker = if entry.island { " [island]" } else { "" };
            let _ = writeln!(
                buffer,
                "{:>12}  {} ({}){}",
                distance, entry.name, entry.id, marker
            );
        }
        buffer
    }
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
