//! Route narration
//!
//! Turns a solved node path into an ordered list of human-readable
//! directions plus derived travel metadata. Output is deterministic for
//! a fixed path, which the integration tests rely on.

use crate::types::{Node, NodeKind, PathResult};

/// Minutes of walking per distance unit.
const MINUTES_PER_UNIT: f64 = 0.5;
/// Minutes added per floor change.
const MINUTES_PER_FLOOR_CHANGE: f64 = 1.0;

/// Narrate a path into a complete [`PathResult`].
///
/// `accessibility_mode` selects elevator wording for floor transitions
/// and marks stair-free verdicts for routes solved without stair edges.
pub fn narrate(path: Vec<Node>, distance: f64, accessibility_mode: bool) -> PathResult {
    let directions = directions_for(&path, accessibility_mode);
    let floor_changes = count_floor_changes(&path);
    // With stair edges omitted from the graph, a stair connector in the
    // path is walked past on its own floor, never climbed.
    let uses_stairs = !accessibility_mode && path.iter().any(Node::is_stair_connector);

    PathResult {
        distance,
        directions,
        floor_changes,
        uses_stairs,
        estimated_time_minutes: estimate_minutes(distance, floor_changes),
        accessibility_friendly: !uses_stairs || accessibility_mode,
        path,
    }
}

fn directions_for(path: &[Node], accessibility_mode: bool) -> Vec<String> {
    if path.len() <= 1 {
        return vec!["You are already at your destination.".to_string()];
    }

    let mut directions = Vec::with_capacity(path.len() + 1);
    let mut current_level = path[0].floor_level;

    directions.push(format!(
        "📍 Start at {} ({})",
        path[0].display_name(),
        path[0].floor
    ));

    let last = path.len() - 1;
    for (i, node) in path.iter().enumerate().skip(1) {
        if node.floor_level != current_level {
            let vertical = if node.floor_level > current_level {
                "up"
            } else {
                "down"
            };
            let mode = if accessibility_mode {
                "🛗 Take the elevator"
            } else {
                "🪜 Take the stairs"
            };
            directions.push(format!("{mode} {vertical} to {}", node.floor));
            current_level = node.floor_level;
        } else if i == last {
            directions.push(format!("🎯 Arrive at {} ({})", node.display_name(), node.floor));
            if let Some(desc) = &node.description {
                directions.push(format!("ℹ️ {desc}"));
            }
        } else if node.kind == NodeKind::Navigation {
            directions.push("➡️ Head to the stairs".to_string());
        } else {
            directions.push(format!("➡️ Pass by {}", node.name));
        }
    }

    directions
}

fn count_floor_changes(path: &[Node]) -> u32 {
    path.windows(2)
        .filter(|pair| pair[0].floor_level != pair[1].floor_level)
        .count() as u32
}

/// Fixed linear travel-time model, rounded to one decimal place.
fn estimate_minutes(distance: f64, floor_changes: u32) -> f64 {
    let raw = distance * MINUTES_PER_UNIT + f64::from(floor_changes) * MINUTES_PER_FLOOR_CHANGE;
    (raw * 10.0).round() / 10.0
}
