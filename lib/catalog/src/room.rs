//! Guest rooms.

use chrono::{DateTime, Utc};
use hotel_portal_core::RoomId;
use serde::{Deserialize, Serialize};

use crate::money::Cents;

/// A bookable room, as stored in the `rooms` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    /// Nightly rate.
    pub price: Cents,
    pub max_guests: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Image URLs, first one is the cover.
    #[serde(default)]
    pub images: Vec<String>,
    pub is_available: bool,
    pub room_number: String,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Returns the cover image, if any.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Returns true if the room is available and fits `guests`.
    #[must_use]
    pub fn accommodates(&self, guests: u32) -> bool {
        self.is_available && guests > 0 && guests <= self.max_guests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_store_row() {
        let json = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000101",
            "name": "Deluxe Suite",
            "description": "Corner suite with city views",
            "price": 45000,
            "max_guests": 3,
            "amenities": ["wifi", "minibar"],
            "images": ["https://images.pexels.com/photos/271624/pexels-photo-271624.jpeg"],
            "is_available": true,
            "room_number": "1201",
            "created_at": "2024-01-02T10:00:00Z",
        });
        let room: Room = serde_json::from_value(json).expect("deserialize");

        assert_eq!(room.id, RoomId::from_u128(0x101));
        assert_eq!(room.price.to_string(), "$450");
        assert!(room.cover_image().is_some());
        assert!(room.accommodates(3));
        assert!(!room.accommodates(4));
        assert!(!room.accommodates(0));
    }

    #[test]
    fn unavailable_room_accommodates_nobody() {
        let json = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000102",
            "name": "Standard Room",
            "description": "",
            "price": 28000,
            "max_guests": 2,
            "is_available": false,
            "room_number": "0304",
            "created_at": "2024-01-02T10:00:00Z",
        });
        let room: Room = serde_json::from_value(json).expect("deserialize");
        assert!(room.amenities.is_empty());
        assert_eq!(room.cover_image(), None);
        assert!(!room.accommodates(1));
    }
}
