//! Gallery items, category filtering and lightbox navigation.

use chrono::{DateTime, Utc};
use hotel_portal_core::GalleryItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a gallery picture shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryCategory {
    Rooms,
    Facilities,
    Exterior,
    Restaurant,
    Events,
}

impl GalleryCategory {
    /// Categories in the order the filter bar lists them.
    pub const ALL: [GalleryCategory; 5] = [
        GalleryCategory::Rooms,
        GalleryCategory::Facilities,
        GalleryCategory::Restaurant,
        GalleryCategory::Exterior,
        GalleryCategory::Events,
    ];

    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rooms => "rooms",
            Self::Facilities => "facilities",
            Self::Exterior => "exterior",
            Self::Restaurant => "restaurant",
            Self::Events => "events",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rooms => "Rooms",
            Self::Facilities => "Facilities",
            Self::Exterior => "Exterior",
            Self::Restaurant => "Restaurant",
            Self::Events => "Events",
        }
    }
}

impl fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gallery picture, as stored in the `gallery` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: GalleryItemId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub category: GalleryCategory,
    /// Shown in the landing page preview.
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Category selection on the gallery page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GalleryFilter {
    #[default]
    All,
    Only(GalleryCategory),
}

impl GalleryFilter {
    /// Every filter, in filter-bar order.
    #[must_use]
    pub fn options() -> Vec<GalleryFilter> {
        std::iter::once(Self::All)
            .chain(GalleryCategory::ALL.into_iter().map(Self::Only))
            .collect()
    }

    /// Returns the value used in the `category` query parameter.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    /// Returns the filter bar label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.label(),
        }
    }

    /// Returns true if `item` passes this filter.
    #[must_use]
    pub fn matches(&self, item: &GalleryItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == *category,
        }
    }

    /// Returns the items that pass this filter, keeping their order.
    #[must_use]
    pub fn apply<'a>(&self, items: &'a [GalleryItem]) -> Vec<&'a GalleryItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

impl FromStr for GalleryFilter {
    type Err = std::convert::Infallible;

    /// Unknown values fall back to `All`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::options()
            .into_iter()
            .find(|filter| filter.as_str() == s)
            .unwrap_or_default())
    }
}

/// Index of the picture after `current` in a list of `len`, wrapping to the
/// first.
#[must_use]
pub fn next_index(current: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(if current + 1 >= len { 0 } else { current + 1 })
}

/// Index of the picture before `current` in a list of `len`, wrapping to the
/// last.
#[must_use]
pub fn prev_index(current: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(if current == 0 || current >= len {
        len - 1
    } else {
        current - 1
    })
}
