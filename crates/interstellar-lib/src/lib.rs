//! Interstellar route graph library entry points.
//!
//! This crate turns plain planet/route/traffic collections into a
//! traversal-ready graph and answers single-source shortest-path queries over
//! it. It also exposes helpers to locate and read a dataset snapshot, audit
//! records, plan a route between two planets, and render the result. Higher
//! level consumers (the CLI) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod db;
pub mod error;
pub mod graph;
pub mod model;
pub mod output;
pub mod path;
pub mod routing;
pub mod validation;

pub use dataset::{default_dataset_path, load_dataset, load_dataset_file, resolve_dataset_path};
pub use db::{load_json_snapshot, load_snapshot, Snapshot};
pub use error::{Error, Result};
pub use graph::{GraphModel, RouteGraph};
pub use model::{Edge, TrafficRecord, Vertex};
pub use output::{DistanceTable, RouteRenderMode, RouteSummary, PATH_UNAVAILABLE};
pub use path::{PathEngine, ShortestPaths};
pub use routing::{plan_route, resolve_planet, shortest_paths_from, RoutePlan, RouteRequest};
pub use validation::{audit_snapshot, Finding, Severity, ValidationCode};
