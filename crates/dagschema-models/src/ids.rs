//! Type-safe ID wrappers for registry entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtypes with common functionality.
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new random ID.
            pub fn new() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4()))
            }

            /// Creates an ID from an existing string (for registry lookups/testing).
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Returns the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProjectId, "proj");
define_id!(PhaseId, "phase");
define_id!(WorkerId, "wrk");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_prefix() {
        let id = ProjectId::new();
        assert!(id.as_str().starts_with("proj-"));
    }

    #[test]
    fn test_worker_id_prefix() {
        let id = WorkerId::new();
        assert!(id.as_str().starts_with("wrk-"));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(PhaseId::new(), PhaseId::new());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = ProjectId::from_string("proj-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"proj-1\"");
        assert_eq!(id.to_string(), "proj-1");
    }
}
