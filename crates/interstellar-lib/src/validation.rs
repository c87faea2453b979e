//! Advisory checks for records before they enter the store.
//!
//! The path engine accepts any snapshot; these checks exist for the callers
//! that create records and for auditing an existing dataset.

use std::fmt;

use serde::Serialize;

use crate::db::Snapshot;
use crate::error::{Error, Result};
use crate::model::{same_id, Edge, TrafficRecord, Vertex};

/// Reasons a route or traffic record is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    RouteExists,
    RouteToSelf,
    TrafficExists,
    TrafficToSelf,
}

impl ValidationCode {
    const ALL: [ValidationCode; 4] = [
        ValidationCode::RouteExists,
        ValidationCode::RouteToSelf,
        ValidationCode::TrafficExists,
        ValidationCode::TrafficToSelf,
    ];

    /// Stable numeric identifier.
    pub fn id(self) -> u8 {
        match self {
            ValidationCode::RouteExists => 1,
            ValidationCode::RouteToSelf => 2,
            ValidationCode::TrafficExists => 3,
            ValidationCode::TrafficToSelf => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ValidationCode::RouteExists => "ROUTE EXISTS",
            ValidationCode::RouteToSelf => "ROUTE TO SELF",
            ValidationCode::TrafficExists => "TRAFFIC EXISTS",
            ValidationCode::TrafficToSelf => "TRAFFIC TO SELF",
        }
    }

    /// Parse a label, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reject a vertex whose id is already taken.
pub fn validate_vertex(existing: &[Vertex], candidate: &Vertex) -> Result<()> {
    match existing.iter().find(|vertex| same_id(&vertex.id, &candidate.id)) {
        Some(vertex) => Err(Error::VertexExists {
            id: candidate.id.clone(),
            name: vertex.name.clone(),
        }),
        None => Ok(()),
    }
}

/// Reject a self-route or a second route between the same ordered pair.
pub fn validate_edge(snapshot: &Snapshot, candidate: &Edge) -> Result<()> {
    check_edge(&snapshot.vertices, &snapshot.edges, candidate)
}

/// Reject self-traffic or a second traffic record on the same ordered pair.
pub fn validate_traffic(snapshot: &Snapshot, candidate: &TrafficRecord) -> Result<()> {
    check_traffic(&snapshot.vertices, &snapshot.traffic, candidate)
}

fn check_edge(vertices: &[Vertex], edges: &[Edge], candidate: &Edge) -> Result<()> {
    if same_id(&candidate.source, &candidate.destination) {
        return Err(Error::Validation {
            code: ValidationCode::RouteToSelf,
            message: "You cannot link a route to itself.".to_string(),
        });
    }

    let duplicate = edges.iter().any(|edge| {
        !same_id(&edge.id, &candidate.id)
            && edge.connects(&candidate.source, &candidate.destination)
    });
    if duplicate {
        return Err(Error::Validation {
            code: ValidationCode::RouteExists,
            message: format!(
                "The route from {} to {} exists already.",
                describe(vertices, &candidate.source),
                describe(vertices, &candidate.destination)
            ),
        });
    }
    Ok(())
}

fn check_traffic(
    vertices: &[Vertex],
    traffic: &[TrafficRecord],
    candidate: &TrafficRecord,
) -> Result<()> {
    if same_id(&candidate.source, &candidate.destination) {
        return Err(Error::Validation {
            code: ValidationCode::TrafficToSelf,
            message: "You cannot add traffic on the same route origin and destination."
                .to_string(),
        });
    }

    let duplicate = traffic.iter().any(|record| {
        !same_id(&record.route_id, &candidate.route_id)
            && same_id(&record.source, &candidate.source)
            && same_id(&record.destination, &candidate.destination)
    });
    if duplicate {
        return Err(Error::Validation {
            code: ValidationCode::TrafficExists,
            message: format!(
                "The traffic from {} to {} exists already.",
                describe(vertices, &candidate.source),
                describe(vertices, &candidate.destination)
            ),
        });
    }
    Ok(())
}

fn describe(vertices: &[Vertex], id: &str) -> String {
    match vertices.iter().find(|vertex| same_id(&vertex.id, id)) {
        Some(vertex) => format!("{} ({})", vertex.name, vertex.id),
        None => format!("({id})"),
    }
}

/// How serious an audit finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// One problem found while auditing a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ValidationCode>,
    pub message: String,
}

impl Finding {
    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            code: None,
            message,
        }
    }

    fn from_error(err: Error) -> Self {
        let code = match &err {
            Error::Validation { code, .. } => Some(*code),
            _ => None,
        };
        Self {
            severity: Severity::Error,
            code,
            message: err.to_string(),
        }
    }
}

/// Run every record check over `snapshot` in collection order.
///
/// Each record is checked against the records before it, so the first of a
/// duplicate pair passes and the second is reported. Edge endpoints that are
/// not known planets and traffic records that target no route are reported
/// as warnings.
pub fn audit_snapshot(snapshot: &Snapshot) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (position, vertex) in snapshot.vertices.iter().enumerate() {
        if let Err(err) = validate_vertex(&snapshot.vertices[..position], vertex) {
            findings.push(Finding::from_error(err));
        }
    }

    for (position, edge) in snapshot.edges.iter().enumerate() {
        if let Err(err) = check_edge(&snapshot.vertices, &snapshot.edges[..position], edge) {
            findings.push(Finding::from_error(err));
        }
        for endpoint in [&edge.source, &edge.destination] {
            if snapshot.planet_by_id(endpoint).is_none() {
                findings.push(Finding::warning(format!(
                    "route {} references unknown planet {}; it will be reached as an island",
                    edge.id, endpoint
                )));
            }
        }
    }

    for (position, record) in snapshot.traffic.iter().enumerate() {
        if let Err(err) = check_traffic(&snapshot.vertices, &snapshot.traffic[..position], record)
        {
            findings.push(Finding::from_error(err));
        }
        if !snapshot.edges.iter().any(|edge| record.matches(edge)) {
            findings.push(Finding::warning(format!(
                "traffic {} matches no route from {} to {}",
                record.route_id, record.source, record.destination
            )));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_ignoring_case() {
        assert_eq!(
            ValidationCode::from_label("route to self"),
            Some(ValidationCode::RouteToSelf)
        );
        assert_eq!(ValidationCode::from_label("nonsense"), None);
        assert_eq!(ValidationCode::TrafficToSelf.id(), 4);
        assert_eq!(ValidationCode::RouteExists.to_string(), "ROUTE EXISTS");
    }

    #[test]
    fn duplicate_vertex_reports_existing_name() {
        let existing = vec![Vertex::new("A", "Earth")];
        let err = validate_vertex(&existing, &Vertex::new("a", "Terra")).expect_err("duplicate");
        assert_eq!(err.to_string(), "planet a already exists as Earth");
    }
}
