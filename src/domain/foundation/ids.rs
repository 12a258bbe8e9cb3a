//! Identifiers for chat sessions and their messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a UUID-backed identifier with random construction, parsing
/// and transparent serialization.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
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
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

uuid_id!(
    /// One chat session on one dashboard surface.
    SessionId
);

uuid_id!(
    /// One entry in a session's message log. A pending placeholder and the
    /// reply that replaces it share the same id.
    MessageId
);

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(SessionId::new(), SessionId::new());
        assert_ne!(MessageId::default(), MessageId::default());
    }

    #[test]
    fn parse_and_display_agree() {
        let id: MessageId = format!(" {KNOWN} ").parse().unwrap();
        assert_eq!(id.to_string(), KNOWN);
        assert!("msg-1".parse::<SessionId>().is_err());
    }

    #[test]
    fn wraps_given_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(SessionId::from_uuid(uuid).as_uuid(), &uuid);
    }

    #[test]
    fn serializes_as_bare_string() {
        let id: MessageId = KNOWN.parse().unwrap();
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(KNOWN));
    }
}
