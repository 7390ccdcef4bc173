//! campus-nav: campus location/route resolution engine
//!
//! Turns a free-text query ("how do I get to the Library?", "where is
//! Ma'am Jennifer Magbanlac?", "printing services") into either a
//! computed path across a multi-floor building graph or a ranked set of
//! search matches. Pure in-memory logic with NO I/O on the query path:
//! - Facility configuration model and JSON/YAML loaders
//! - Graph store: nodes plus weighted undirected adjacency, built once
//! - Entity indexes: case-insensitive exact and substring name lookup
//! - Path solver: deterministic Dijkstra with restricted-node support
//! - Route narrator: human-readable directions and travel metadata
//! - Query router: regex intent classification and dispatch
//!
//! The chat/presentation layer is out of scope: it consumes the
//! structured [`NavigationResponse`] values this crate produces.

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod index;
pub mod narrator;
pub mod router;
pub mod solver;
pub mod types;

// Re-export commonly used types
pub use config::{FacilityData, FloorDef, LocationDef, StairConnection};
pub use engine::{NavEngine, NavOptions};
pub use error::ConfigError;
pub use router::{classify, is_navigation_query, Intent};
pub use types::{
    FacultyRecord, NavigationResponse, Node, NodeId, NodeKind, PathResult, ResponseKind, RoomRef,
    SearchResults, ServiceDef,
};
