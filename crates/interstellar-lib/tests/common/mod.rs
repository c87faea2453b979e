//! Common test utilities and fixture helpers.
//!
//! The solar system fixture used across the integration tests:
//!
//! ```text
//! A Earth --5--> B Moon --3--> C Jupiter --1 (+6 traffic)--> D Venus --2--> E Mars --4--> G (island)
//!    \------10------------------^   \-----------9-------------^                  G --1--> A
//! F Pluto is isolated.
//! ```

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use interstellar_lib::{Edge, Snapshot, TrafficRecord, Vertex};
use rusqlite::{params, Connection};
use tempfile::TempDir;

/// Path to fixtures directory used by tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the checked-in JSON copy of [`solar_snapshot`].
pub fn fixture_json_path() -> PathBuf {
    fixtures_dir().join("solar_system.json")
}

pub fn solar_snapshot() -> Snapshot {
    Snapshot::new(
        vec![
            Vertex::new("A", "Earth"),
            Vertex::new("B", "Moon"),
            Vertex::new("C", "Jupiter"),
            Vertex::new("D", "Venus"),
            Vertex::new("E", "Mars"),
            Vertex::new("F", "Pluto"),
        ],
        vec![
            Edge::new("1", "A", "B", 5.0),
            Edge::new("2", "A", "C", 10.0),
            Edge::new("3", "B", "C", 3.0),
            Edge::new("4", "C", "D", 1.0),
            Edge::new("5", "B", "D", 9.0),
            Edge::new("6", "D", "E", 2.0),
            Edge::new("7", "E", "G", 4.0),
            Edge::new("8", "G", "A", 1.0),
        ],
        vec![TrafficRecord::new("4", "C", "D", 6.0)],
    )
}

/// Two planets and one route: Earth (A) -> Moon (B), distance 5.
pub fn earth_moon() -> Snapshot {
    Snapshot::new(
        vec![Vertex::new("A", "Earth"), Vertex::new("B", "Moon")],
        vec![Edge::new("e1", "A", "B", 5.0)],
        Vec::new(),
    )
}

pub fn ids(vertices: &[Vertex]) -> Vec<&str> {
    vertices.iter().map(|vertex| vertex.id.as_str()).collect()
}

/// Temporary SQLite dataset populated from a snapshot.
pub struct SqliteFixture {
    _temp_dir: TempDir,
    pub db_path: PathBuf,
}

impl SqliteFixture {
    /// Write `snapshot` using the full schema, including the traffic table.
    pub fn new(snapshot: &Snapshot) -> Self {
        let fixture = Self::empty();
        let connection = Connection::open(&fixture.db_path).expect("open fixture db");
        create_schema(&connection, true);
        insert_snapshot(&connection, snapshot, true);
        fixture
    }

    /// Write `snapshot` without a traffic table.
    pub fn without_traffic(snapshot: &Snapshot) -> Self {
        let fixture = Self::empty();
        let connection = Connection::open(&fixture.db_path).expect("open fixture db");
        create_schema(&connection, false);
        insert_snapshot(&connection, snapshot, false);
        fixture
    }

    /// Temporary directory with no database written yet.
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("interstellar.db");
        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    pub fn dir(&self) -> &Path {
        self._temp_dir.path()
    }

    pub fn connection(&self) -> Connection {
        Connection::open(&self.db_path).expect("open fixture db")
    }
}

fn create_schema(connection: &Connection, with_traffic: bool) {
    connection
        .execute_batch(
            "CREATE TABLE vertex (vertex_id TEXT PRIMARY KEY, name TEXT NOT NULL);
             CREATE TABLE edge (
                 record_id INTEGER PRIMARY KEY,
                 edge_id TEXT NOT NULL,
                 source TEXT NOT NULL,
                 destination TEXT NOT NULL,
                 distance REAL NOT NULL,
                 time_delay REAL
             );",
        )
        .expect("create schema");
    if with_traffic {
        connection
            .execute_batch(
                "CREATE TABLE traffic (
                     route_id TEXT PRIMARY KEY,
                     source TEXT NOT NULL,
                     destination TEXT NOT NULL,
                     delay REAL NOT NULL
                 );",
            )
            .expect("create traffic table");
    }
}

fn insert_snapshot(connection: &Connection, snapshot: &Snapshot, with_traffic: bool) {
    for vertex in &snapshot.vertices {
        connection
            .execute(
                "INSERT INTO vertex (vertex_id, name) VALUES (?1, ?2)",
                params![vertex.id, vertex.name],
            )
            .expect("insert vertex");
    }
    for (record_id, edge) in snapshot.edges.iter().enumerate() {
        connection
            .execute(
                "INSERT INTO edge (record_id, edge_id, source, destination, distance, time_delay)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record_id as i64 + 1,
                    edge.id,
                    edge.source,
                    edge.destination,
                    edge.distance,
                    edge.time_delay
                ],
            )
            .expect("insert edge");
    }
    if !with_traffic {
        return;
    }
    for record in &snapshot.traffic {
        connection
            .execute(
                "INSERT INTO traffic (route_id, source, destination, delay) VALUES (?1, ?2, ?3, ?4)",
                params![record.route_id, record.source, record.destination, record.delay],
            )
            .expect("insert traffic");
    }
}
