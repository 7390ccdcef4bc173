use serde::{Deserialize, Serialize};

// ─── Scalar aliases ───────────────────────────────────────────

/// Identifier of a facility graph node, unique within the graph.
pub type NodeId = String;

// ─── Nodes ────────────────────────────────────────────────────

/// Where a node sits in the facility taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Room,
    /// Stairwell or other connector used purely for routing.
    Navigation,
    Department,
    Office,
    Facility,
}

/// A single addressable location in the facility graph.
///
/// Immutable after graph construction; identity is `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub floor: String,
    pub floor_level: i32,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Node {
    /// Display name, preferring the expanded form when one is configured.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    /// True for stairwell connector nodes.
    pub fn is_stair_connector(&self) -> bool {
        self.kind == NodeKind::Navigation && self.id.contains("stairs")
    }
}

// ─── Faculty ──────────────────────────────────────────────────

/// Reference to a room a faculty member can be found in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomRef {
    pub room: NodeId,
}

/// A faculty member, reachable via one or more rooms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FacultyRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_location: Option<RoomRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<RoomRef>,
}

impl FacultyRecord {
    /// All candidate rooms for this member, primary location first.
    pub fn candidate_rooms(&self) -> Vec<&str> {
        let mut rooms: Vec<&str> = Vec::new();
        if let Some(primary) = &self.primary_location {
            rooms.push(&primary.room);
        }
        for loc in &self.locations {
            rooms.push(&loc.room);
        }
        rooms
    }
}

// ─── Services ─────────────────────────────────────────────────

/// A service offered by a department (e.g. "Transcript of Records").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ─── Path results ─────────────────────────────────────────────

/// Structured output of a shortest-path query. Created fresh per query.
#[derive(Clone, Debug, Serialize)]
pub struct PathResult {
    /// Ordered nodes from start to destination, inclusive.
    pub path: Vec<Node>,
    /// Sum of edge weights along `path`.
    pub distance: f64,
    /// Ordered human-readable direction lines.
    pub directions: Vec<String>,
    /// Count of consecutive node pairs with differing floor levels.
    pub floor_changes: u32,
    pub uses_stairs: bool,
    pub estimated_time_minutes: f64,
    pub accessibility_friendly: bool,
}

// ─── Search results ───────────────────────────────────────────

/// A location matched by a free-text search.
#[derive(Clone, Debug, Serialize)]
pub struct LocationHit {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub floor: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A department matched by a free-text search.
#[derive(Clone, Debug, Serialize)]
pub struct DepartmentHit {
    pub name: String,
    pub floor: String,
}

/// Per-category matches for a general search query. Uncapped; the
/// presentation layer trims each category for display.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SearchResults {
    pub locations: Vec<LocationHit>,
    pub faculty: Vec<FacultyRecord>,
    pub departments: Vec<DepartmentHit>,
    pub services: Vec<ServiceDef>,
}

impl SearchResults {
    /// True when every category came back empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.faculty.is_empty()
            && self.departments.is_empty()
            && self.services.is_empty()
    }
}

// ─── Responses ────────────────────────────────────────────────

/// Response discriminant consumed by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Route,
    Search,
    Error,
}

/// One structured answer to a free-text query.
///
/// Per-query failures surface here as `Error` responses with guidance
/// text; they are never raised across the engine boundary.
#[derive(Clone, Debug, Serialize)]
pub struct NavigationResponse {
    pub kind: ResponseKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_result: Option<PathResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_results: Option<SearchResults>,
}

impl NavigationResponse {
    pub fn route(message: impl Into<String>, path_result: PathResult) -> Self {
        Self {
            kind: ResponseKind::Route,
            message: message.into(),
            path_result: Some(path_result),
            search_results: None,
        }
    }

    pub fn search(message: impl Into<String>, results: SearchResults) -> Self {
        Self {
            kind: ResponseKind::Search,
            message: message.into(),
            path_result: None,
            search_results: Some(results),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Error,
            message: message.into(),
            path_result: None,
            search_results: None,
        }
    }
}
