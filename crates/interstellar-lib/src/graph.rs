use std::collections::HashMap;

use tracing::{debug, warn};

use crate::db::Snapshot;
use crate::model::{id_key, Edge, TrafficRecord, Vertex};

/// Stored entities plus the two mode flags that shape traversal.
///
/// A `GraphModel` owns its own copies of the collections, so a query never
/// observes changes made to the record store after the model was built.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    traffic: Vec<TrafficRecord>,
    undirected: bool,
    traffic_allowed: bool,
}

impl GraphModel {
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>, traffic: Vec<TrafficRecord>) -> Self {
        Self {
            vertices,
            edges,
            traffic,
            undirected: false,
            traffic_allowed: false,
        }
    }

    /// Build a model from a loaded snapshot, copying its collections.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::new(
            snapshot.vertices.clone(),
            snapshot.edges.clone(),
            snapshot.traffic.clone(),
        )
    }

    pub fn set_traffic_allowed(&mut self, allowed: bool) {
        self.traffic_allowed = allowed;
    }

    pub fn set_undirected(&mut self, undirected: bool) {
        self.undirected = undirected;
    }

    pub fn traffic_allowed(&self) -> bool {
        self.traffic_allowed
    }

    pub fn undirected(&self) -> bool {
        self.undirected
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn traffic(&self) -> &[TrafficRecord] {
        &self.traffic
    }

    /// Overwrite the time delay of every edge targeted by a traffic record.
    ///
    /// Records are applied in collection order, so when several records match
    /// the same edge the last one wins. Records that match nothing are
    /// ignored. Returns the number of edge updates performed.
    pub fn apply_traffic_overlay(&mut self) -> usize {
        let mut updates = 0;
        for record in &self.traffic {
            let mut matched = false;
            for edge in self.edges.iter_mut().filter(|edge| record.matches(edge)) {
                edge.time_delay = record.delay;
                matched = true;
                updates += 1;
            }
            if !matched {
                warn!(
                    route_id = %record.route_id,
                    source = %record.source,
                    destination = %record.destination,
                    "traffic record matches no edge"
                );
            }
        }
        debug!(records = self.traffic.len(), updates, "applied traffic overlay");
        updates
    }

    /// Edge set the engine traverses.
    ///
    /// Directed models return the stored edges unchanged. Undirected models
    /// place a reversed copy immediately after each stored edge.
    pub fn materialize_edges(&self) -> Vec<Edge> {
        if !self.undirected {
            return self.edges.clone();
        }

        let mut edges = Vec::with_capacity(self.edges.len() * 2);
        for edge in &self.edges {
            edges.push(edge.clone());
            edges.push(edge.reversed());
        }
        edges
    }

    /// Produce the traversal-ready graph for one query.
    ///
    /// Works on a private copy: the traffic overlay (when allowed) is applied
    /// to that copy, so repeated calls yield identical weights.
    pub fn build_route_graph(&self) -> RouteGraph {
        let mut working = self.clone();
        if working.traffic_allowed {
            working.apply_traffic_overlay();
        }
        let edges = working.materialize_edges();
        debug!(
            vertices = working.vertices.len(),
            edges = edges.len(),
            undirected = working.undirected,
            traffic = working.traffic_allowed,
            "materialized route graph"
        );
        RouteGraph::new(working.vertices, edges)
    }
}

/// Materialized edge set plus an id-indexed vertex table.
///
/// Vertices live in an arena; edges keep referring to endpoints by id and are
/// resolved through the index at traversal time.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    vertices: Vec<Vertex>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    adjacency: HashMap<String, Vec<usize>>,
}

impl RouteGraph {
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        let mut index = HashMap::with_capacity(vertices.len());
        for (position, vertex) in vertices.iter().enumerate() {
            // First occurrence wins for duplicated ids.
            index.entry(id_key(&vertex.id)).or_insert(position);
        }

        let mut adjacency: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, edge) in edges.iter().enumerate() {
            adjacency
                .entry(id_key(&edge.source))
                .or_default()
                .push(position);
        }

        Self {
            vertices,
            index,
            edges,
            adjacency,
        }
    }

    /// Known vertices in collection order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Materialized edges in traversal order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Lookup a known vertex by id.
    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.index.get(&id_key(id)).map(|&pos| &self.vertices[pos])
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.index.contains_key(&id_key(id))
    }

    /// Resolve an edge endpoint to a known vertex or a synthetic island.
    pub fn resolve(&self, id: &str) -> Vertex {
        self.vertex(id)
            .cloned()
            .unwrap_or_else(|| Vertex::island(id))
    }

    /// Outgoing edges of `id` in materialized order.
    pub fn outgoing<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.adjacency
            .get(&id_key(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|&pos| &self.edges[pos])
    }

    /// Distinct neighbour ids of `id`, in order of first appearance.
    pub fn neighbours(&self, id: &str) -> Vec<&str> {
        let mut seen: Vec<String> = Vec::new();
        let mut neighbours = Vec::new();
        for edge in self.outgoing(id) {
            let key = id_key(&edge.destination);
            if !seen.contains(&key) {
                seen.push(key);
                neighbours.push(edge.destination.as_str());
            }
        }
        neighbours
    }

    /// Lowest effective weight among the edges from `from` to `to`.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.outgoing(from)
            .filter(|edge| edge.connects(from, to))
            .map(Edge::effective_weight)
            .min_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth_moon() -> GraphModel {
        GraphModel::new(
            vec![Vertex::new("A", "Earth"), Vertex::new("B", "Moon")],
            vec![Edge::new("e1", "A", "B", 5.0)],
            vec![TrafficRecord::new("e1", "A", "B", 2.0)],
        )
    }

    #[test]
    fn flags_default_to_false() {
        let model = earth_moon();
        assert!(!model.undirected());
        assert!(!model.traffic_allowed());
    }

    #[test]
    fn overlay_counts_updates() {
        let mut model = earth_moon();
        assert_eq!(model.apply_traffic_overlay(), 1);
        assert_eq!(model.edges()[0].time_delay, 2.0);
    }

    #[test]
    fn route_graph_leaves_model_untouched() {
        let mut model = earth_moon();
        model.set_traffic_allowed(true);
        let graph = model.build_route_graph();

        assert_eq!(graph.edge_weight("A", "B"), Some(7.0));
        assert_eq!(model.edges()[0].time_delay, 0.0);
    }

    #[test]
    fn neighbours_are_distinct() {
        let graph = RouteGraph::new(
            vec![Vertex::new("A", "Earth"), Vertex::new("B", "Moon")],
            vec![
                Edge::new("e1", "A", "B", 5.0),
                Edge::new("e2", "a", "b", 3.0),
            ],
        );
        assert_eq!(graph.neighbours("A"), vec!["B"]);
        assert_eq!(graph.edge_weight("A", "B"), Some(3.0));
        assert_eq!(graph.edge_weight("B", "A"), None);
    }

    #[test]
    fn duplicate_vertex_ids_resolve_to_first() {
        let graph = RouteGraph::new(
            vec![Vertex::new("A", "Earth"), Vertex::new("a", "Terra")],
            Vec::new(),
        );
        assert_eq!(graph.resolve("A").name, "Earth");
        assert_eq!(graph.resolve("Z").name, "Island Z");
    }
}
