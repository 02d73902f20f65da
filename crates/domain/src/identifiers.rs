//! Strongly-typed identifier types for the Feedback Desk domain.
//!
//! Identifiers use UUID v7 so that they sort in creation order and can be
//! generated without coordinating with the database.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new ID with a time-ordered UUID v7
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create an ID from an existing UUID
            #[inline]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get a reference to the underlying UUID
            #[inline]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Convert to the underlying UUID
            #[inline]
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(
    FeedbackId,
    "Unique identifier for feedback records (UUID v7 for time-ordering)"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = FeedbackId::new();
        assert_ne!(id.to_string(), "");
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let first = FeedbackId::new();
        let second = FeedbackId::new();
        assert_ne!(first, second);
        assert!(first < second);
    }

    #[test]
    fn test_id_from_string() {
        let id1 = FeedbackId::new();
        let id2: FeedbackId = id1.to_string().parse().unwrap();
        assert_eq!(id1, id2);

        assert!("not-a-uuid".parse::<FeedbackId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = FeedbackId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
