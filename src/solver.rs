//! Shortest-path solver
//!
//! Dijkstra over the facility graph with non-negative edge weights.
//! Ties between equal tentative distances resolve to the first-enqueued
//! candidate, so repeated runs over a fixed graph return the identical
//! path, not merely an equally short one.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::graph::Graph;
use crate::types::NodeId;

/// Raw solver output: node ids along the path and the total edge weight.
#[derive(Clone, Debug, PartialEq)]
pub struct PathHit {
    pub node_ids: Vec<NodeId>,
    pub distance: f64,
}

/// Heap entry ordered by (distance, enqueue sequence), smallest first.
struct QueueEntry {
    dist: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest distance; among equal
        // distances the smaller sequence number (enqueued earlier) wins.
        // Distances are finite sums of positive weights.
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimum-weight path from `start` to `end`.
///
/// Nodes in `restricted` are never used as intermediate hops; `end`
/// itself stays reachable even when restricted. Returns `None` when
/// either endpoint is absent or no path survives the restrictions.
pub fn shortest_path(
    graph: &Graph,
    start: &str,
    end: &str,
    restricted: &HashSet<NodeId>,
) -> Option<PathHit> {
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }

    let mut dist: HashMap<NodeId, f64> = HashMap::new();
    let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut heap = BinaryHeap::new();
    let mut seq: u64 = 0;

    dist.insert(start.to_string(), 0.0);
    heap.push(QueueEntry {
        dist: 0.0,
        seq,
        node: start.to_string(),
    });

    while let Some(QueueEntry { dist: d, node, .. }) = heap.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }

        if node == end {
            let mut ids = vec![node.clone()];
            let mut cursor = node;
            while let Some(p) = prev.get(&cursor) {
                cursor = p.clone();
                ids.push(cursor.clone());
            }
            ids.reverse();
            return Some(PathHit {
                node_ids: ids,
                distance: d,
            });
        }

        for (neighbor, weight) in graph.neighbors(&node) {
            if visited.contains(neighbor) {
                continue;
            }
            if restricted.contains(neighbor) && neighbor != end {
                continue;
            }

            let candidate = d + weight;
            let improves = dist
                .get(neighbor)
                .map_or(true, |&current| candidate < current);
            if improves {
                dist.insert(neighbor.clone(), candidate);
                prev.insert(neighbor.clone(), node.clone());
                seq += 1;
                heap.push(QueueEntry {
                    dist: candidate,
                    seq,
                    node: neighbor.clone(),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FacilityData, FloorDef, LocationDef, StairConnection};
    use crate::types::NodeKind;

    fn location(id: &str) -> LocationDef {
        LocationDef {
            id: id.to_string(),
            name: id.to_uppercase(),
            kind: NodeKind::Room,
            full_name: None,
            description: None,
            services: Vec::new(),
        }
    }

    /// Linear floor a-b-c at unit weight.
    fn linear_graph() -> Graph {
        let data = FacilityData {
            floors: vec![FloorDef {
                name: "Ground Floor".to_string(),
                level: 0,
                locations: vec![location("a"), location("b"), location("c")],
            }],
            stair_connections: Vec::new(),
            faculty: Vec::new(),
        };
        Graph::build(&data, false).unwrap()
    }

    /// Diamond: a-b-d and a-c-d, both of total weight 2, plus a slow
    /// direct a-d connector of weight 5.
    fn diamond_graph() -> Graph {
        let data = FacilityData {
            floors: vec![
                FloorDef {
                    name: "Ground Floor".to_string(),
                    level: 0,
                    locations: vec![location("a"), location("b"), location("d")],
                },
                FloorDef {
                    name: "Annex".to_string(),
                    level: 0,
                    locations: vec![location("c")],
                },
            ],
            stair_connections: vec![
                StairConnection {
                    from: "a".to_string(),
                    to: "c".to_string(),
                    weight: 1.0,
                },
                StairConnection {
                    from: "c".to_string(),
                    to: "d".to_string(),
                    weight: 1.0,
                },
                StairConnection {
                    from: "a".to_string(),
                    to: "d".to_string(),
                    weight: 5.0,
                },
            ],
            faculty: Vec::new(),
        };
        Graph::build(&data, false).unwrap()
    }

    fn ids(hit: &PathHit) -> Vec<&str> {
        hit.node_ids.iter().map(String::as_str).collect()
    }

    // ── Basic properties ─────────────────────────────────────────

    #[test]
    fn finds_minimum_weight_path() {
        let graph = linear_graph();
        let hit = shortest_path(&graph, "a", "c", &HashSet::new()).unwrap();
        assert_eq!(ids(&hit), vec!["a", "b", "c"]);
        assert_eq!(hit.distance, 2.0);
    }

    #[test]
    fn start_equals_end_is_a_single_node_path() {
        let graph = linear_graph();
        let hit = shortest_path(&graph, "b", "b", &HashSet::new()).unwrap();
        assert_eq!(ids(&hit), vec!["b"]);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn unknown_endpoints_yield_none() {
        let graph = linear_graph();
        assert!(shortest_path(&graph, "a", "zzz", &HashSet::new()).is_none());
        assert!(shortest_path(&graph, "zzz", "a", &HashSet::new()).is_none());
    }

    #[test]
    fn prefers_cheap_two_hop_over_direct_edge() {
        let graph = diamond_graph();
        let hit = shortest_path(&graph, "a", "d", &HashSet::new()).unwrap();
        assert_eq!(hit.distance, 2.0);
        assert_eq!(hit.node_ids.len(), 3);
    }

    // ── Determinism ──────────────────────────────────────────────

    #[test]
    fn equal_length_paths_resolve_to_first_discovered() {
        let graph = diamond_graph();
        // b is relaxed before c (a's sequential edge precedes its stair
        // connectors), so the a-b-d branch must win every time.
        for _ in 0..20 {
            let hit = shortest_path(&graph, "a", "d", &HashSet::new()).unwrap();
            assert_eq!(ids(&hit), vec!["a", "b", "d"]);
        }
    }

    // ── Restricted set ───────────────────────────────────────────

    #[test]
    fn restricted_intermediate_forces_alternative() {
        let graph = diamond_graph();
        let restricted: HashSet<NodeId> = ["b".to_string(), "c".to_string()].into();
        let hit = shortest_path(&graph, "a", "d", &restricted).unwrap();
        // Only the weight-5 direct connector survives.
        assert_eq!(ids(&hit), vec!["a", "d"]);
        assert_eq!(hit.distance, 5.0);
    }

    #[test]
    fn restricted_node_never_appears_as_intermediate_hop() {
        let graph = linear_graph();
        let restricted: HashSet<NodeId> = ["b".to_string()].into();
        // b is the only bridge between a and c.
        assert!(shortest_path(&graph, "a", "c", &restricted).is_none());
    }

    #[test]
    fn restricted_destination_stays_reachable() {
        let graph = linear_graph();
        let restricted: HashSet<NodeId> = ["c".to_string()].into();
        let hit = shortest_path(&graph, "a", "c", &restricted).unwrap();
        assert_eq!(ids(&hit), vec!["a", "b", "c"]);
    }

    #[test]
    fn disconnected_endpoints_yield_none() {
        let data = FacilityData {
            floors: vec![
                FloorDef {
                    name: "G".to_string(),
                    level: 0,
                    locations: vec![location("a")],
                },
                FloorDef {
                    name: "H".to_string(),
                    level: 1,
                    locations: vec![location("b")],
                },
            ],
            stair_connections: Vec::new(),
            faculty: Vec::new(),
        };
        let graph = Graph::build(&data, false).unwrap();
        assert!(shortest_path(&graph, "a", "b", &HashSet::new()).is_none());
    }
}
