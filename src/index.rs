//! Entity indexes
//!
//! Case-insensitive name lookup for locations, faculty, departments and
//! services. Exact matches always outrank substring matches, and fuzzy
//! scans walk entries in insertion order (floors in file order, locations
//! in floor order, short name before full name), so resolution is
//! reproducible across runs.

use std::collections::HashMap;

use crate::config::FacilityData;
use crate::error::ConfigError;
use crate::graph::Graph;
use crate::types::{FacultyRecord, NodeId, NodeKind, ServiceDef};

/// A service offered by a department, resolved back to the department node.
#[derive(Clone, Debug)]
pub struct ServiceEntry {
    pub department_id: NodeId,
    pub service: ServiceDef,
}

/// Insertion-ordered index with lower-cased trimmed keys.
///
/// Exact lookup goes through the hash map (last write wins on a duplicate
/// key); substring scans walk the entry list front to back, so the first
/// inserted match wins.
#[derive(Debug)]
struct OrderedIndex<T> {
    entries: Vec<(String, T)>,
    exact: HashMap<String, usize>,
}

impl<T> OrderedIndex<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            exact: HashMap::new(),
        }
    }

    fn insert(&mut self, key: &str, value: T) {
        let key = normalize(key);
        self.entries.push((key.clone(), value));
        self.exact.insert(key, self.entries.len() - 1);
    }

    fn get_exact(&self, key: &str) -> Option<&T> {
        self.exact.get(key).map(|&i| &self.entries[i].1)
    }

    /// First entry whose key contains `query`.
    fn first_containing(&self, query: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| key.contains(query))
            .map(|(_, value)| value)
    }

    /// First entry where the key contains `query` or `query` contains the key.
    fn first_overlapping(&self, query: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(key, _)| key.contains(query) || query.contains(key.as_str()))
            .map(|(_, value)| value)
    }

    /// All entries whose key contains `query`, in insertion order.
    fn all_containing<'a>(&'a self, query: &str) -> Vec<&'a T> {
        self.entries
            .iter()
            .filter(|(key, _)| key.contains(query))
            .map(|(_, value)| value)
            .collect()
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The four lookup structures built over one facility.
#[derive(Debug)]
pub struct EntityIndexes {
    locations: OrderedIndex<NodeId>,
    faculty: OrderedIndex<FacultyRecord>,
    departments: OrderedIndex<NodeId>,
    services: OrderedIndex<ServiceEntry>,
}

impl EntityIndexes {
    /// Build all indexes from the facility description and the built graph.
    ///
    /// Faculty room references are validated here: a record pointing at a
    /// room absent from the graph is a fatal configuration error.
    pub fn build(data: &FacilityData, graph: &Graph) -> Result<Self, ConfigError> {
        let mut locations = OrderedIndex::new();
        let mut departments = OrderedIndex::new();
        let mut services = OrderedIndex::new();

        for floor in &data.floors {
            for loc in &floor.locations {
                locations.insert(&loc.name, loc.id.clone());
                if let Some(full_name) = &loc.full_name {
                    locations.insert(full_name, loc.id.clone());
                }

                if loc.kind == NodeKind::Department {
                    departments.insert(&loc.name, loc.id.clone());
                    for service in &loc.services {
                        services.insert(
                            &service.name,
                            ServiceEntry {
                                department_id: loc.id.clone(),
                                service: service.clone(),
                            },
                        );
                    }
                }
            }
        }

        let mut faculty = OrderedIndex::new();
        for record in &data.faculty {
            for room in record.candidate_rooms() {
                if !graph.contains(room) {
                    return Err(ConfigError::UnknownFacultyRoom {
                        name: record.name.clone(),
                        room: room.to_string(),
                    });
                }
            }
            faculty.insert(&record.name, record.clone());
        }

        Ok(Self {
            locations,
            faculty,
            departments,
            services,
        })
    }

    /// Resolve a free-text name to a node id.
    ///
    /// Precision over recall: exact location, then exact department, then
    /// exact service (yielding its department), and only then a substring
    /// scan over the location entries.
    pub fn resolve(&self, query: &str) -> Option<&NodeId> {
        let query = normalize(query);

        if let Some(id) = self.locations.get_exact(&query) {
            return Some(id);
        }
        if let Some(id) = self.departments.get_exact(&query) {
            return Some(id);
        }
        if let Some(entry) = self.services.get_exact(&query) {
            return Some(&entry.department_id);
        }
        self.locations.first_overlapping(&query)
    }

    /// Resolve a faculty name: exact first, then first substring hit.
    pub fn resolve_faculty(&self, query: &str) -> Option<&FacultyRecord> {
        let query = normalize(query);

        if let Some(record) = self.faculty.get_exact(&query) {
            return Some(record);
        }
        self.faculty.first_containing(&query)
    }

    // ── Substring scans for general search ──

    pub fn locations_matching(&self, query: &str) -> Vec<&NodeId> {
        self.locations.all_containing(&normalize(query))
    }

    pub fn faculty_matching(&self, query: &str) -> Vec<&FacultyRecord> {
        self.faculty.all_containing(&normalize(query))
    }

    pub fn departments_matching(&self, query: &str) -> Vec<&NodeId> {
        self.departments.all_containing(&normalize(query))
    }

    pub fn services_matching(&self, query: &str) -> Vec<&ServiceEntry> {
        self.services.all_containing(&normalize(query))
    }
}
