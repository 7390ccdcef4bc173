use thiserror::Error;

/// Fatal facility-configuration faults.
///
/// These only occur at load/construction time. The engine refuses to start
/// serving queries over an inconsistent graph; per-query failures are
/// ordinary `Option`/response values, never errors of this type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read facility file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed facility data: {0}")]
    Parse(String),

    #[error("unsupported facility file extension '{0}' (expected .json, .yaml, or .yml)")]
    UnsupportedFormat(String),

    #[error("duplicate location id '{0}'")]
    DuplicateNode(String),

    #[error("edge {context} references unknown location id '{id}'")]
    UnknownNode { id: String, context: String },

    #[error("connection {from} <-> {to} has non-positive weight {weight}")]
    BadWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("faculty member '{name}' references unknown room '{room}'")]
    UnknownFacultyRoom { name: String, room: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_node() {
        let err = ConfigError::UnknownNode {
            id: "stairs-4f".to_string(),
            context: "stairs-3f <-> stairs-4f".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "edge stairs-3f <-> stairs-4f references unknown location id 'stairs-4f'"
        );
    }

    #[test]
    fn display_duplicate_node() {
        let err = ConfigError::DuplicateNode("library".to_string());
        assert_eq!(err.to_string(), "duplicate location id 'library'");
    }

    #[test]
    fn display_bad_weight() {
        let err = ConfigError::BadWeight {
            from: "stairs-1f".to_string(),
            to: "stairs-2f".to_string(),
            weight: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "connection stairs-1f <-> stairs-2f has non-positive weight 0"
        );
    }

    #[test]
    fn display_unknown_faculty_room() {
        let err = ConfigError::UnknownFacultyRoom {
            name: "Jennifer Magbanlac".to_string(),
            room: "mb999".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "faculty member 'Jennifer Magbanlac' references unknown room 'mb999'"
        );
    }
}
