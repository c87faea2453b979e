use std::fs;
use std::path::Path;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{fuzzy_matches, same_id, Edge, TrafficRecord, Vertex};

/// Immutable copy of the record store's three collections.
///
/// Collection order is preserved exactly as read; the traffic overlay and
/// the undirected expansion both depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub traffic: Vec<TrafficRecord>,
}

impl Snapshot {
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>, traffic: Vec<TrafficRecord>) -> Self {
        Self {
            vertices,
            edges,
            traffic,
        }
    }

    /// Lookup a planet by id (case-insensitive).
    pub fn planet_by_id(&self, id: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|vertex| same_id(&vertex.id, id))
    }

    /// Lookup a planet by name (case-insensitive).
    pub fn planet_by_name(&self, name: &str) -> Option<&Vertex> {
        self.vertices
            .iter()
            .find(|vertex| same_id(&vertex.name, name))
    }

    /// Ids and names similar to `query`, for "did you mean" hints.
    pub fn fuzzy_planet_matches(&self, query: &str, limit: usize) -> Vec<String> {
        fuzzy_matches(&self.vertices, query, limit)
    }
}

/// Parse a JSON snapshot of the form
/// `{"vertices": [...], "edges": [...], "traffic": [...]}`.
pub fn load_json_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    debug!(
        path = %path.display(),
        vertices = snapshot.vertices.len(),
        edges = snapshot.edges.len(),
        traffic = snapshot.traffic.len(),
        "loaded json snapshot"
    );
    Ok(snapshot)
}

/// Read vertices, edges, and traffic records from a SQLite database.
///
/// Expects `vertex(vertex_id, name)` and
/// `edge(edge_id, source, destination, distance[, time_delay][, record_id])`.
/// The `traffic(route_id, source, destination, delay)` table is optional.
/// The database is opened read-only.
pub fn load_snapshot(db_path: &Path) -> Result<Snapshot> {
    let connection = Connection::open_with_flags(
        db_path,
        rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    let schema = detect_schema(&connection)?;
    debug!(path = %db_path.display(), ?schema, "loading snapshot");

    let vertices = load_vertices(&connection)?;
    let edges = load_edges(&connection, &schema)?;
    let traffic = if schema.has_traffic {
        load_traffic(&connection)?
    } else {
        Vec::new()
    };

    debug!(
        vertices = vertices.len(),
        edges = edges.len(),
        traffic = traffic.len(),
        "loaded sqlite snapshot"
    );

    Ok(Snapshot {
        vertices,
        edges,
        traffic,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SchemaDefinition {
    has_time_delay: bool,
    has_record_id: bool,
    has_traffic: bool,
}

fn detect_schema(connection: &Connection) -> Result<SchemaDefinition> {
    if !table_exists(connection, "vertex")? || !table_exists(connection, "edge")? {
        return Err(Error::UnsupportedSchema);
    }
    if !table_has_columns(connection, "vertex", &["vertex_id", "name"])? {
        return Err(Error::UnsupportedSchema);
    }
    if !table_has_columns(
        connection,
        "edge",
        &["edge_id", "source", "destination", "distance"],
    )? {
        return Err(Error::UnsupportedSchema);
    }

    let has_traffic = table_exists(connection, "traffic")?
        && table_has_columns(
            connection,
            "traffic",
            &["route_id", "source", "destination", "delay"],
        )?;

    Ok(SchemaDefinition {
        has_time_delay: table_has_columns(connection, "edge", &["time_delay"])?,
        has_record_id: table_has_columns(connection, "edge", &["record_id"])?,
        has_traffic,
    })
}

fn load_vertices(connection: &Connection) -> Result<Vec<Vertex>> {
    let mut stmt = connection.prepare(
        "SELECT CAST(vertex_id AS TEXT), name FROM vertex ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Vertex {
            id: row.get(0)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        })
    })?;

    let mut vertices = Vec::new();
    for entry in rows {
        vertices.push(entry?);
    }
    Ok(vertices)
}

fn load_edges(connection: &Connection, schema: &SchemaDefinition) -> Result<Vec<Edge>> {
    let time_delay = if schema.has_time_delay {
        "time_delay"
    } else {
        "NULL"
    };
    let order = if schema.has_record_id {
        "record_id, rowid"
    } else {
        "rowid"
    };
    let sql = format!(
        "SELECT CAST(edge_id AS TEXT), CAST(source AS TEXT), CAST(destination AS TEXT), \
         distance, {time_delay} FROM edge ORDER BY {order}"
    );

    let mut stmt = connection.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_edge)?;

    let mut edges = Vec::new();
    for entry in rows {
        edges.push(entry?);
    }
    Ok(edges)
}

fn load_traffic(connection: &Connection) -> Result<Vec<TrafficRecord>> {
    let mut stmt = connection.prepare(
        "SELECT CAST(route_id AS TEXT), CAST(source AS TEXT), CAST(destination AS TEXT), delay \
         FROM traffic ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(TrafficRecord {
            route_id: row.get(0)?,
            source: row.get(1)?,
            destination: row.get(2)?,
            delay: row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
        })
    })?;

    let mut traffic = Vec::new();
    for entry in rows {
        traffic.push(entry?);
    }
    Ok(traffic)
}

fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<Edge> {
    Ok(Edge {
        id: row.get(0)?,
        source: row.get(1)?,
        destination: row.get(2)?,
        distance: row.get(3)?,
        time_delay: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
    })
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}
