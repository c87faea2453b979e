use serde::Serialize;
use tracing::debug;

use crate::db::Snapshot;
use crate::error::{Error, Result};
use crate::graph::GraphModel;
use crate::model::{same_id, Vertex};
use crate::path::{PathEngine, ShortestPaths};

/// High-level route planning request.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// Starting planet id or name.
    pub start: String,
    /// Destination planet id or name.
    pub goal: String,
    /// Treat every stored route as traversable in both directions.
    pub undirected: bool,
    /// Apply traffic delays before searching.
    pub traffic: bool,
}

impl RouteRequest {
    /// Directed request without traffic.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            undirected: false,
            traffic: false,
        }
    }

    pub fn with_undirected(mut self, undirected: bool) -> Self {
        self.undirected = undirected;
        self
    }

    pub fn with_traffic(mut self, traffic: bool) -> Self {
        self.traffic = traffic;
        self
    }
}

/// A planet on a planned route with the accumulated weight to reach it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub vertex: Vertex,
    pub distance: f64,
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub start: Vertex,
    pub goal: Vertex,
    pub steps: Vec<RouteStop>,
    pub total_weight: f64,
    pub undirected: bool,
    pub traffic: bool,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Whether start and goal are the same planet.
    pub fn already_there(&self) -> bool {
        same_id(&self.start.id, &self.goal.id)
    }
}

/// Resolve a planet by id first, then by name, both case-insensitive.
pub fn resolve_planet(snapshot: &Snapshot, query: &str) -> Result<Vertex> {
    snapshot
        .planet_by_id(query)
        .or_else(|| snapshot.planet_by_name(query))
        .cloned()
        .ok_or_else(|| Error::UnknownPlanet {
            name: query.to_string(),
            suggestions: snapshot.fuzzy_planet_matches(query, 3),
        })
}

/// Fresh graph model for one query over `snapshot`.
pub fn build_model(snapshot: &Snapshot, undirected: bool, traffic: bool) -> GraphModel {
    let mut model = GraphModel::from_snapshot(snapshot);
    model.set_undirected(undirected);
    model.set_traffic_allowed(traffic);
    model
}

/// Run a full search from `source` (id or name).
pub fn shortest_paths_from(
    snapshot: &Snapshot,
    source: &str,
    undirected: bool,
    traffic: bool,
) -> Result<ShortestPaths> {
    let origin = resolve_planet(snapshot, source)?;
    let engine = PathEngine::new(&build_model(snapshot, undirected, traffic));
    engine.run(&origin.id)
}

/// Compute the cheapest route between the two planets of `request`.
///
/// A request whose start and goal are the same planet yields a single-stop
/// plan rather than an error.
pub fn plan_route(snapshot: &Snapshot, request: &RouteRequest) -> Result<RoutePlan> {
    let start = resolve_planet(snapshot, &request.start)?;
    let goal = resolve_planet(snapshot, &request.goal)?;

    if same_id(&start.id, &goal.id) {
        return Ok(RoutePlan {
            steps: vec![RouteStop {
                vertex: start.clone(),
                distance: 0.0,
            }],
            start,
            goal,
            total_weight: 0.0,
            undirected: request.undirected,
            traffic: request.traffic,
        });
    }

    let paths = shortest_paths_from(snapshot, &start.id, request.undirected, request.traffic)?;
    let Some(route) = paths.path_to(&goal.id) else {
        return Err(Error::RouteNotFound {
            start: request.start.clone(),
            goal: request.goal.clone(),
        });
    };

    let steps: Vec<RouteStop> = route
        .into_iter()
        .map(|vertex| RouteStop {
            distance: paths.distance_of(&vertex.id),
            vertex,
        })
        .collect();
    let total_weight = paths.distance_of(&goal.id);
    debug!(
        start = %start.id,
        goal = %goal.id,
        hops = steps.len().saturating_sub(1),
        total_weight,
        "planned route"
    );

    Ok(RoutePlan {
        start,
        goal,
        steps,
        total_weight,
        undirected: request.undirected,
        traffic: request.traffic,
    })
}
