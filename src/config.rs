//! Facility configuration
//!
//! Serde model of the static facility description plus file loaders.
//! The description is loaded once at startup; schema violations are
//! fatal here or at graph construction, never deferred to query time.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::types::{FacultyRecord, NodeKind, ServiceDef};

/// One location entry within a floor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocationDef {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only meaningful on department-kind locations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceDef>,
}

/// One floor: display name, integer level, and its locations in walking
/// order. Consecutive locations are connected sequentially at unit weight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FloorDef {
    pub name: String,
    pub level: i32,
    pub locations: Vec<LocationDef>,
}

/// Explicit stair connector between two nodes, usually across floors.
/// Omitted from the graph entirely when accessibility mode is enabled.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StairConnection {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// The whole static facility description.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FacilityData {
    pub floors: Vec<FloorDef>,
    #[serde(default)]
    pub stair_connections: Vec<StairConnection>,
    #[serde(default)]
    pub faculty: Vec<FacultyRecord>,
}

impl FacilityData {
    /// Parse a facility description from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse a facility description from a YAML document.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a facility description from disk, dispatching on extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let data = match extension {
            "json" => Self::from_json(&raw)?,
            "yaml" | "yml" => Self::from_yaml(&raw)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        info!(
            path = %path.display(),
            floors = data.floors.len(),
            faculty = data.faculty.len(),
            "facility description loaded"
        );
        Ok(data)
    }

    /// Total number of locations across all floors.
    pub fn location_count(&self) -> usize {
        self.floors.iter().map(|f| f.locations.len()).sum()
    }
}
