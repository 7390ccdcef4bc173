//! Graph store
//!
//! Nodes and weighted undirected adjacency for one facility, built once
//! from the static description and never mutated afterwards. The
//! restricted set is the only mutable graph-adjacent state; it is
//! lock-protected so concurrent queries always observe a consistent
//! snapshot.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::config::FacilityData;
use crate::error::ConfigError;
use crate::types::{Node, NodeId};

/// Weight between consecutive same-floor locations.
const SEQUENTIAL_WEIGHT: f64 = 1.0;

/// The facility graph: node table plus adjacency lists.
#[derive(Debug)]
pub struct Graph {
    nodes: HashMap<NodeId, Node>,
    adjacency: HashMap<NodeId, Vec<(NodeId, f64)>>,
    restricted: RwLock<HashSet<NodeId>>,
}

impl Graph {
    /// Construct the graph from facility data.
    ///
    /// Nodes come from every floor's location list; consecutive locations
    /// on a floor are connected sequentially at unit weight, and the
    /// explicit stair connectors are added afterwards — unless
    /// accessibility mode is on, in which case stair edges are omitted
    /// entirely and stair-only cross-floor routes become unreachable.
    ///
    /// Any edge referencing an unknown node id, a duplicate location id,
    /// or a non-positive connector weight is a fatal configuration error.
    pub fn build(data: &FacilityData, accessibility_mode: bool) -> Result<Self, ConfigError> {
        let mut nodes = HashMap::new();
        let mut adjacency: HashMap<NodeId, Vec<(NodeId, f64)>> = HashMap::new();

        for floor in &data.floors {
            for loc in &floor.locations {
                if nodes.contains_key(&loc.id) {
                    return Err(ConfigError::DuplicateNode(loc.id.clone()));
                }
                nodes.insert(
                    loc.id.clone(),
                    Node {
                        id: loc.id.clone(),
                        name: loc.name.clone(),
                        floor: floor.name.clone(),
                        floor_level: floor.level,
                        kind: loc.kind,
                        full_name: loc.full_name.clone(),
                        description: loc.description.clone(),
                    },
                );
                adjacency.insert(loc.id.clone(), Vec::new());
            }
        }

        let mut graph = Self {
            nodes,
            adjacency,
            restricted: RwLock::new(HashSet::new()),
        };

        for floor in &data.floors {
            for pair in floor.locations.windows(2) {
                graph.connect(&pair[0].id, &pair[1].id, SEQUENTIAL_WEIGHT)?;
            }
        }

        // Stair connections are validated even when accessibility mode
        // leaves them out of the graph: dangling ids are fatal at build
        // time, not at query time.
        for conn in &data.stair_connections {
            if conn.weight <= 0.0 {
                return Err(ConfigError::BadWeight {
                    from: conn.from.clone(),
                    to: conn.to.clone(),
                    weight: conn.weight,
                });
            }
            for id in [&conn.from, &conn.to] {
                if !graph.nodes.contains_key(id.as_str()) {
                    return Err(ConfigError::UnknownNode {
                        id: id.clone(),
                        context: format!("{} <-> {}", conn.from, conn.to),
                    });
                }
            }
            if !accessibility_mode {
                graph.connect(&conn.from, &conn.to, conn.weight)?;
            }
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            accessibility_mode,
            "facility graph built"
        );
        Ok(graph)
    }

    /// Add an undirected edge. Both endpoints must already exist.
    fn connect(&mut self, a: &str, b: &str, weight: f64) -> Result<(), ConfigError> {
        for id in [a, b] {
            if !self.nodes.contains_key(id) {
                return Err(ConfigError::UnknownNode {
                    id: id.to_string(),
                    context: format!("{a} <-> {b}"),
                });
            }
        }
        // Endpoints verified above, so the entries are present.
        if let Some(edges) = self.adjacency.get_mut(a) {
            edges.push((b.to_string(), weight));
        }
        if let Some(edges) = self.adjacency.get_mut(b) {
            edges.push((a.to_string(), weight));
        }
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Neighbors of `id` with edge weights; empty for unknown ids.
    pub fn neighbors(&self, id: &str) -> &[(NodeId, f64)] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Undirected edge count.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Mark or clear a node as administratively restricted. Restricted
    /// nodes are skipped as intermediate hops but stay reachable as a
    /// final destination.
    pub fn set_restricted(&self, id: &str, restricted: bool) {
        let mut set = self
            .restricted
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if restricted {
            set.insert(id.to_string());
        } else {
            set.remove(id);
        }
    }

    pub fn is_restricted(&self, id: &str) -> bool {
        self.restricted
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }

    /// Snapshot of the restricted set for one solver run. A toggle during
    /// an in-flight run affects later runs, never a traversal in progress.
    pub fn restricted_snapshot(&self) -> HashSet<NodeId> {
        self.restricted
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FloorDef, LocationDef, StairConnection};
    use crate::types::NodeKind;

    fn location(id: &str, kind: NodeKind) -> LocationDef {
        LocationDef {
            id: id.to_string(),
            name: id.to_uppercase(),
            kind,
            full_name: None,
            description: None,
            services: Vec::new(),
        }
    }

    fn two_floor_facility() -> FacilityData {
        FacilityData {
            floors: vec![
                FloorDef {
                    name: "Ground Floor".to_string(),
                    level: 0,
                    locations: vec![
                        location("lobby", NodeKind::Room),
                        location("stairs-gf", NodeKind::Navigation),
                        location("office", NodeKind::Office),
                    ],
                },
                FloorDef {
                    name: "Second Floor".to_string(),
                    level: 1,
                    locations: vec![
                        location("stairs-2f", NodeKind::Navigation),
                        location("library", NodeKind::Facility),
                    ],
                },
            ],
            stair_connections: vec![StairConnection {
                from: "stairs-gf".to_string(),
                to: "stairs-2f".to_string(),
                weight: 3.0,
            }],
            faculty: Vec::new(),
        }
    }

    // ── Construction ─────────────────────────────────────────────

    #[test]
    fn builds_sequential_and_stair_edges() {
        let graph = Graph::build(&two_floor_facility(), false).unwrap();
        assert_eq!(graph.node_count(), 5);
        // lobby-stairs-gf, stairs-gf-office, stairs-2f-library, plus the connector
        assert_eq!(graph.edge_count(), 4);
        assert!(graph
            .neighbors("stairs-gf")
            .iter()
            .any(|(id, w)| id == "stairs-2f" && *w == 3.0));
    }

    #[test]
    fn accessibility_mode_omits_stair_edges() {
        let graph = Graph::build(&two_floor_facility(), true).unwrap();
        assert_eq!(graph.edge_count(), 3);
        assert!(!graph
            .neighbors("stairs-gf")
            .iter()
            .any(|(id, _)| id == "stairs-2f"));
    }

    #[test]
    fn node_captures_floor_metadata() {
        let graph = Graph::build(&two_floor_facility(), false).unwrap();
        let library = graph.node("library").unwrap();
        assert_eq!(library.floor, "Second Floor");
        assert_eq!(library.floor_level, 1);
    }

    // ── Configuration faults ─────────────────────────────────────

    #[test]
    fn dangling_stair_endpoint_is_fatal() {
        let mut data = two_floor_facility();
        data.stair_connections.push(StairConnection {
            from: "stairs-2f".to_string(),
            to: "stairs-3f".to_string(),
            weight: 3.0,
        });
        let err = Graph::build(&data, false).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNode { id, .. } if id == "stairs-3f"));
    }

    #[test]
    fn dangling_stair_endpoint_is_fatal_even_in_accessibility_mode() {
        let mut data = two_floor_facility();
        data.stair_connections.push(StairConnection {
            from: "stairs-2f".to_string(),
            to: "stairs-3f".to_string(),
            weight: 3.0,
        });
        let err = Graph::build(&data, true).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNode { id, .. } if id == "stairs-3f"));
    }

    #[test]
    fn duplicate_location_id_is_fatal() {
        let mut data = two_floor_facility();
        data.floors[1].locations.push(location("lobby", NodeKind::Room));
        let err = Graph::build(&data, false).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateNode(id) if id == "lobby"));
    }

    #[test]
    fn non_positive_connector_weight_is_fatal() {
        let mut data = two_floor_facility();
        data.stair_connections[0].weight = -1.0;
        let err = Graph::build(&data, false).unwrap_err();
        assert!(matches!(err, ConfigError::BadWeight { .. }));
    }

    // ── Restricted set ───────────────────────────────────────────

    #[test]
    fn restricted_set_toggles_and_snapshots() {
        let graph = Graph::build(&two_floor_facility(), false).unwrap();
        assert!(!graph.is_restricted("office"));

        graph.set_restricted("office", true);
        assert!(graph.is_restricted("office"));

        let snapshot = graph.restricted_snapshot();
        graph.set_restricted("office", false);
        // The snapshot is decoupled from later toggles.
        assert!(snapshot.contains("office"));
        assert!(!graph.is_restricted("office"));
    }
}
