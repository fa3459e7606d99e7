//! Identifier newtypes
//!
//! Ids are opaque strings. Freshly created items get a ULID so they sort by
//! creation time, but any string coming back from storage is accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new unique id
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing id
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the inner string value
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
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Id of a card or a list
    ItemId
);

string_id!(
    /// Id of a sibling scope: a list (holding cards) or a board (holding lists)
    ScopeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(ItemId::new(), ItemId::new());
    }

    #[test]
    fn test_from_string_roundtrip() {
        let id = ScopeId::from_string("list-todo");
        assert_eq!(id.as_str(), "list-todo");
        assert_eq!(id.to_string(), "list-todo");
        assert_eq!(ScopeId::from("list-todo"), id);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ItemId::from_string("card-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"card-7\"");
    }
}
