//! Navigation engine
//!
//! Owns the built graph, the entity indexes and the routing options.
//! Explicit lifecycle: construct once from facility data, then share by
//! reference — there is no process-wide singleton. All query paths take
//! `&self` and are safe for unlimited concurrent reads; the restricted
//! set is the only interior mutability.

use tracing::debug;

use crate::config::FacilityData;
use crate::error::ConfigError;
use crate::graph::Graph;
use crate::index::EntityIndexes;
use crate::types::{
    DepartmentHit, FacultyRecord, LocationHit, NavigationResponse, Node, PathResult, SearchResults,
};
use crate::{narrator, router, solver};

/// Routing options fixed at construction time.
#[derive(Clone, Debug)]
pub struct NavOptions {
    /// When on, stair edges are never added to the graph, forcing
    /// step-free routes; stair-only destinations become unreachable.
    pub accessibility_mode: bool,
    /// Start used when a query names no origin and the caller supplies
    /// no hint.
    pub default_origin: String,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            accessibility_mode: false,
            default_origin: "mis".to_string(),
        }
    }
}

/// The campus location/route resolution engine.
pub struct NavEngine {
    graph: Graph,
    indexes: EntityIndexes,
    options: NavOptions,
}

impl NavEngine {
    /// Build an engine from a facility description.
    ///
    /// Construction is strictly sequential and validates the whole
    /// description; any dangling reference aborts with a [`ConfigError`]
    /// rather than deferring the fault to query time.
    pub fn new(data: FacilityData, options: NavOptions) -> Result<Self, ConfigError> {
        let graph = Graph::build(&data, options.accessibility_mode)?;
        let indexes = EntityIndexes::build(&data, &graph)?;
        Ok(Self {
            graph,
            indexes,
            options,
        })
    }

    /// Build an engine with default options.
    pub fn from_facility(data: FacilityData) -> Result<Self, ConfigError> {
        Self::new(data, NavOptions::default())
    }

    pub fn accessibility_mode(&self) -> bool {
        self.options.accessibility_mode
    }

    pub fn default_origin(&self) -> &str {
        &self.options.default_origin
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.graph.node(id)
    }

    /// Resolve a free-text location name to a node id.
    pub fn resolve_location(&self, query: &str) -> Option<&str> {
        self.indexes.resolve(query).map(String::as_str)
    }

    /// Resolve a faculty name to its record.
    pub fn find_faculty(&self, query: &str) -> Option<&FacultyRecord> {
        self.indexes.resolve_faculty(query)
    }

    /// Shortest path between two node ids, narrated.
    ///
    /// Snapshots the restricted set once, so an administrative toggle
    /// during the run cannot corrupt the traversal.
    pub fn solve(&self, start_id: &str, end_id: &str) -> Option<PathResult> {
        let restricted = self.graph.restricted_snapshot();
        let hit = solver::shortest_path(&self.graph, start_id, end_id, &restricted)?;
        let nodes: Option<Vec<Node>> = hit
            .node_ids
            .iter()
            .map(|id| self.graph.node(id).cloned())
            .collect();
        Some(narrator::narrate(
            nodes?,
            hit.distance,
            self.options.accessibility_mode,
        ))
    }

    /// Route between two free-text location names.
    pub fn navigate(&self, start: &str, destination: &str) -> Option<PathResult> {
        let start_id = self.resolve_location(start)?;
        let dest_id = self.resolve_location(destination)?;
        self.solve(start_id, dest_id)
    }

    /// Route from a start node to whichever of the faculty member's known
    /// rooms is nearest.
    pub fn route_to_faculty(&self, start_id: &str, record: &FacultyRecord) -> Option<PathResult> {
        let mut best: Option<PathResult> = None;
        for room in record.candidate_rooms() {
            if let Some(result) = self.solve(start_id, room) {
                let better = best
                    .as_ref()
                    .map_or(true, |current| result.distance < current.distance);
                if better {
                    best = Some(result);
                }
            }
        }
        best
    }

    /// Route from a free-text start to a faculty member's nearest room.
    pub fn navigate_to_faculty(&self, start: &str, name: &str) -> Option<PathResult> {
        let start_id = self.resolve_location(start)?;
        let record = self.find_faculty(name)?.clone();
        self.route_to_faculty(start_id, &record)
    }

    /// Substring search across all four indexes. Results are uncapped;
    /// the presentation layer trims each category for display.
    pub fn search_all(&self, query: &str) -> SearchResults {
        let mut results = SearchResults::default();

        for node_id in self.indexes.locations_matching(query) {
            if let Some(node) = self.graph.node(node_id) {
                results.locations.push(LocationHit {
                    name: node.name.clone(),
                    full_name: node.full_name.clone(),
                    floor: node.floor.clone(),
                    kind: node.kind,
                    description: node.description.clone(),
                });
            }
        }

        for record in self.indexes.faculty_matching(query) {
            results.faculty.push(record.clone());
        }

        for node_id in self.indexes.departments_matching(query) {
            if let Some(node) = self.graph.node(node_id) {
                results.departments.push(DepartmentHit {
                    name: node.name.clone(),
                    floor: node.floor.clone(),
                });
            }
        }

        for entry in self.indexes.services_matching(query) {
            results.services.push(entry.service.clone());
        }

        results
    }

    /// Mark or clear a location as restricted, resolving free-text names.
    /// Returns false when the name resolves to nothing.
    ///
    /// Restricted nodes are excluded as intermediate hops but stay
    /// reachable as a final destination.
    pub fn mark_restricted(&self, name_or_id: &str, restricted: bool) -> bool {
        let id = if self.graph.contains(name_or_id) {
            name_or_id
        } else {
            match self.resolve_location(name_or_id) {
                Some(id) => id,
                None => return false,
            }
        };
        debug!(id, restricted, "restricted set updated");
        self.graph.set_restricted(id, restricted);
        true
    }

    pub fn is_restricted(&self, id: &str) -> bool {
        self.graph.is_restricted(id)
    }

    /// Resolve one free-text query into a structured response.
    ///
    /// `start_hint` overrides the configured default origin for route
    /// and faculty queries that name no explicit start.
    pub fn handle_query(&self, query: &str, start_hint: Option<&str>) -> NavigationResponse {
        router::handle(self, query, start_hint)
    }
}
