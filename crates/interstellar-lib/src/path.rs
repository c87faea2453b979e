//! Single-source shortest paths over a materialized route graph.
//!
//! [`PathEngine::run`] explores everything reachable from the source and
//! returns a [`ShortestPaths`] value holding the settled distances and
//! predecessors. Nothing is cached between runs; each call builds fresh
//! search state, so independent queries can run concurrently on clones of
//! the same engine.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{GraphModel, RouteGraph};
use crate::model::{fuzzy_matches, id_key, Vertex};

/// Dijkstra search engine bound to one materialized graph.
#[derive(Debug, Clone)]
pub struct PathEngine {
    graph: RouteGraph,
}

impl PathEngine {
    /// Materialize `model` (traffic overlay and direction expansion) and
    /// bind the engine to the result.
    pub fn new(model: &GraphModel) -> Self {
        Self {
            graph: model.build_route_graph(),
        }
    }

    pub fn from_graph(graph: RouteGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    /// Compute shortest distances from `source` to every reachable vertex.
    ///
    /// The source must be a known vertex. Edge endpoints missing from the
    /// vertex collection are reached as island vertices and never expanded.
    pub fn run(&self, source: &str) -> Result<ShortestPaths> {
        let origin = self
            .graph
            .vertex(source)
            .cloned()
            .ok_or_else(|| Error::UnknownPlanet {
                name: source.to_string(),
                suggestions: fuzzy_matches(self.graph.vertices(), source, 3),
            })?;

        let mut state = SearchState::new(origin);
        while let Some(current) = state.next_frontier() {
            self.relax_neighbours(&mut state, &current)?;
        }

        debug!(
            source = %state.source.id,
            settled = state.visited.len(),
            reached = state.distance.len(),
            "shortest path run settled"
        );
        Ok(state.into_paths())
    }

    fn relax_neighbours(&self, state: &mut SearchState, current: &str) -> Result<()> {
        let Some(vertex) = state.resolved.get(current) else {
            return Ok(());
        };
        if !self.graph.is_known(&vertex.id) {
            // Islands are terminal.
            return Ok(());
        }
        let from = vertex.id.clone();
        let base = state.distance_of_key(current);

        for neighbour in self.graph.neighbours(&from) {
            let key = id_key(neighbour);
            if state.visited.contains(&key) {
                continue;
            }

            let weight =
                self.graph
                    .edge_weight(&from, neighbour)
                    .ok_or_else(|| Error::MissingEdge {
                        from: from.clone(),
                        to: neighbour.to_string(),
                    })?;

            let candidate = base + weight;
            if candidate < state.distance_of_key(&key) {
                if !state.resolved.contains_key(&key) {
                    let resolved = self.graph.resolve(neighbour);
                    if !self.graph.is_known(neighbour) {
                        warn!(
                            id = %neighbour,
                            "edge endpoint is not a known planet; using island vertex"
                        );
                    }
                    state.resolved.insert(key.clone(), resolved);
                }
                state.distance.insert(key.clone(), candidate);
                state.predecessor.insert(key.clone(), current.to_string());
                state.frontier.push(QueueEntry::new(key, candidate));
            }
        }
        Ok(())
    }
}

/// Mutable state of a single run, keyed by canonical vertex id.
#[derive(Debug)]
struct SearchState {
    source: Vertex,
    distance: HashMap<String, f64>,
    predecessor: HashMap<String, String>,
    visited: HashSet<String>,
    frontier: BinaryHeap<QueueEntry>,
    resolved: HashMap<String, Vertex>,
}

impl SearchState {
    fn new(source: Vertex) -> Self {
        let key = id_key(&source.id);
        let mut state = Self {
            source: source.clone(),
            distance: HashMap::new(),
            predecessor: HashMap::new(),
            visited: HashSet::new(),
            frontier: BinaryHeap::new(),
            resolved: HashMap::new(),
        };
        state.distance.insert(key.clone(), 0.0);
        state.resolved.insert(key.clone(), source);
        state.frontier.push(QueueEntry::new(key, 0.0));
        state
    }

    fn distance_of_key(&self, key: &str) -> f64 {
        self.distance.get(key).copied().unwrap_or(f64::INFINITY)
    }

    /// Settle the unvisited frontier vertex with the lowest distance, ties
    /// broken by ascending canonical id.
    fn next_frontier(&mut self) -> Option<String> {
        while let Some(entry) = self.frontier.pop() {
            if self.visited.contains(&entry.node) {
                continue;
            }
            if entry.cost.0 > self.distance_of_key(&entry.node) {
                continue;
            }
            self.visited.insert(entry.node.clone());
            return Some(entry.node);
        }
        None
    }

    fn into_paths(self) -> ShortestPaths {
        ShortestPaths {
            source: self.source,
            distance: self.distance,
            predecessor: self.predecessor,
            resolved: self.resolved,
        }
    }
}

/// Settled result of a run: distances and predecessors from one source.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: Vertex,
    distance: HashMap<String, f64>,
    predecessor: HashMap<String, String>,
    resolved: HashMap<String, Vertex>,
}

impl ShortestPaths {
    pub fn source(&self) -> &Vertex {
        &self.source
    }

    /// Shortest distance to `id`; `f64::INFINITY` when unreachable.
    pub fn distance_of(&self, id: &str) -> f64 {
        self.distance
            .get(&id_key(id))
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, id: &str) -> bool {
        self.distance_of(id).is_finite()
    }

    /// Vertex reached under `id`, including synthesized islands.
    pub fn reached(&self, id: &str) -> Option<&Vertex> {
        self.resolved.get(&id_key(id))
    }

    /// Every vertex reached during the run, islands included, with its distance.
    pub fn reached_vertices(&self) -> impl Iterator<Item = (&Vertex, f64)> + '_ {
        self.resolved.iter().map(|(key, vertex)| {
            (
                vertex,
                self.distance.get(key).copied().unwrap_or(f64::INFINITY),
            )
        })
    }

    /// Ordered path from the source to `target`, both inclusive.
    ///
    /// Returns `None` when `target` never received a predecessor. That
    /// includes the source itself: callers that need to tell "already there"
    /// apart from "unreachable" must compare ids before interpreting `None`.
    pub fn path_to(&self, target: &str) -> Option<Vec<Vertex>> {
        let key = id_key(target);
        if !self.predecessor.contains_key(&key) {
            return None;
        }

        reconstruct_path(&self.predecessor, &key)
            .iter()
            .map(|step| self.resolved.get(step).cloned())
            .collect()
    }
}

fn reconstruct_path(predecessor: &HashMap<String, String>, goal: &str) -> Vec<String> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;
    while let Some(previous) = predecessor.get(current) {
        path.push(previous.clone());
        current = previous.as_str();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: String,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: String, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then id.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Edge;

    #[test]
    fn heap_pops_lowest_cost_then_lowest_id() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry::new("b".to_string(), 1.0));
        heap.push(QueueEntry::new("c".to_string(), 0.5));
        heap.push(QueueEntry::new("a".to_string(), 1.0));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn reconstruct_walks_back_to_source() {
        let predecessor = HashMap::from([
            ("c".to_string(), "b".to_string()),
            ("b".to_string(), "a".to_string()),
        ]);
        assert_eq!(reconstruct_path(&predecessor, "c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_cost_ties_settle_in_id_order() {
        // Two equal routes to D; the predecessor must come from the
        // lexicographically smaller intermediate.
        let graph = RouteGraph::new(
            vec![
                Vertex::new("A", "Alpha"),
                Vertex::new("B", "Beta"),
                Vertex::new("C", "Gamma"),
                Vertex::new("D", "Delta"),
            ],
            vec![
                Edge::new("1", "A", "C", 1.0),
                Edge::new("2", "A", "B", 1.0),
                Edge::new("3", "C", "D", 1.0),
                Edge::new("4", "B", "D", 1.0),
            ],
        );
        let paths = PathEngine::from_graph(graph).run("A").expect("run succeeds");
        let ids: Vec<_> = paths
            .path_to("D")
            .expect("path exists")
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec!["A", "B", "D"]);
        assert_eq!(paths.distance_of("D"), 2.0);
    }
}
