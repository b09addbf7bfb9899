//! Strongly-typed ID types for domain entities.
//!
//! Rows in the hotel's relational store are keyed by UUIDs, so every ID here
//! wraps a `Uuid`. IDs display with a short type prefix (`usr_…`) for logs and
//! parse from either the prefixed or the raw form the store hands back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to generate a strongly-typed ID wrapper around a UUID.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new ID with a random (v4) UUID.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from a UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Creates an ID from a fixed 128-bit value.
            ///
            /// Used for seeded showcase records that need stable IDs.
            #[must_use]
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }

            /// Returns the prefix used for display formatting.
            #[must_use]
            pub const fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let prefix_with_underscore = concat!($prefix, "_");
                let raw = s.strip_prefix(prefix_with_underscore).unwrap_or(s);

                Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        reason: e.to_string(),
                    })
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
    };
}

define_id!(
    /// Unique identifier for a staff user (the `profiles.id` column).
    UserId,
    "usr"
);

define_id!(
    /// Unique identifier for a room.
    RoomId,
    "room"
);

define_id!(
    /// Unique identifier for a booking.
    BookingId,
    "bkg"
);

define_id!(
    /// Unique identifier for a drink on the bar menu.
    DrinkId,
    "drink"
);

define_id!(
    /// Unique identifier for a recorded bar sale.
    DrinkSaleId,
    "sale"
);

define_id!(
    /// Unique identifier for a gallery image.
    GalleryItemId,
    "gal"
);

define_id!(
    /// Unique identifier for a social media link.
    SocialLinkId,
    "social"
);

define_id!(
    /// Handle for an accepted sign-in whose token has not been stored yet.
    SignInGrantId,
    "grant"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_display_format() {
        let id = UserId::new();
        assert!(id.to_string().starts_with("usr_"));
    }

    #[test]
    fn parse_with_prefix() {
        let id = BookingId::new();
        let parsed: BookingId = id.to_string().parse().expect("should parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_raw_uuid_from_store() {
        let parsed: UserId = "6f1c2a4e-8f3b-4d7a-9a51-0c2e5b7d9e10"
            .parse()
            .expect("should parse");
        assert_eq!(
            parsed.as_uuid().to_string(),
            "6f1c2a4e-8f3b-4d7a-9a51-0c2e5b7d9e10"
        );
    }

    #[test]
    fn parse_invalid_uuid() {
        let err = "usr_not-a-uuid".parse::<UserId>().unwrap_err();
        assert_eq!(err.id_type, "UserId");
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let room = RoomId::new();
        let result: Result<UserId, _> = room.to_string().parse();
        assert!(result.is_err());
    }

    #[test]
    fn seeded_ids_are_stable() {
        assert_eq!(GalleryItemId::from_u128(7), GalleryItemId::from_u128(7));
        assert_ne!(GalleryItemId::from_u128(7), GalleryItemId::from_u128(8));
    }

    #[test]
    fn serializes_as_raw_uuid() {
        let id = UserId::from_u128(1);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000001\"");
        let parsed: UserId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, id);
    }
}
