//! Strongly-typed identifiers for catalog entries and game records.
//!
//! Star systems are keyed by small integers (the catalog index used by the
//! UI and the event seeds), upgrades and quirks by stable string keys from
//! the reference data, and each game by a UUID v7.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identifier of a star system in the static catalog.
///
/// The numeric value is part of every event seed (`event_{type}_{id}_{day}`),
/// so it must stay stable across releases of the catalog.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct SystemId(pub u32);

impl SystemId {
    /// Return the raw catalog number.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for SystemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SystemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for a single game (one new-game initialisation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct GameId(pub Uuid);

impl GameId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for GameId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a newtype wrapper around a reference-data string key.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create a key from anything string-like.
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }
    };
}

define_key! {
    /// Key of an upgrade definition (e.g. `"extended_tank"`).
    UpgradeId
}

define_key! {
    /// Key of a ship quirk definition (e.g. `"leaky_seals"`).
    QuirkId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&SystemId(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));
    }

    #[test]
    fn system_id_works_as_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(SystemId(3), 10_u32);
        let json = serde_json::to_string(&map).unwrap_or_default();
        assert_eq!(json, r#"{"3":10}"#);
        let back: std::collections::BTreeMap<SystemId, u32> =
            serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(back.get(&SystemId(3)), Some(&10));
    }

    #[test]
    fn upgrade_key_display_matches_inner() {
        let id = UpgradeId::new("extended_tank");
        assert_eq!(id.to_string(), "extended_tank");
        assert_eq!(id.as_str(), "extended_tank");
    }

    #[test]
    fn game_ids_are_unique() {
        assert_ne!(GameId::new(), GameId::new());
    }
}
