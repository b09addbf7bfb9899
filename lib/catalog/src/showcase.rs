//! Fixed content rendered by the public pages and the super-admin dashboard.
//!
//! Nothing here is computed. The figures on the dashboard are illustrative
//! until the reporting queries against the hotel store exist.

use chrono::{DateTime, NaiveDate, Utc};
use hotel_portal_core::{GalleryItemId, SocialLinkId};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::booking::{BookingStatus, BookingSummary};
use crate::gallery::{GalleryCategory, GalleryItem};
use crate::money::{Cents, group_thousands};
use crate::social::{SocialLink, SocialPlatform};

/// Name of the hotel.
pub const HOTEL_NAME: &str = "Hotel Grandeur";

/// Landing page tagline.
pub const TAGLINE: &str =
    "Experience luxury, comfort, and exceptional service in the heart of the city";

/// Landing page hero image.
pub const HERO_IMAGE: &str = "https://images.pexels.com/photos/258154/pexels-photo-258154.jpeg";

fn pexels(photo: u32) -> String {
    format!("https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg")
}

fn seeded_at() -> DateTime<Utc> {
    // 2024-01-01T00:00:00Z
    DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default()
}

/// The gallery, in display order.
#[must_use]
pub fn gallery() -> Vec<GalleryItem> {
    let entries = [
        (1, "Luxury Suite", "Our premium luxury suite with panoramic city views", 271624, GalleryCategory::Rooms, true),
        (2, "Hotel Exterior", "Beautiful exterior architecture of Hotel Grandeur", 261102, GalleryCategory::Exterior, true),
        (3, "Fine Dining Restaurant", "Elegant dining experience with world-class cuisine", 271639, GalleryCategory::Restaurant, true),
        (4, "Infinity Pool", "Rooftop infinity pool with stunning views", 271694, GalleryCategory::Facilities, true),
        (5, "Deluxe Room", "Comfortable and elegantly designed deluxe room", 164595, GalleryCategory::Rooms, false),
        (6, "Spa & Wellness", "Relaxing spa treatments and wellness facilities", 271618, GalleryCategory::Facilities, false),
        (7, "Wedding Reception", "Perfect venue for weddings and special events", 1579253, GalleryCategory::Events, false),
        (8, "Business Center", "Modern business center and meeting facilities", 1134176, GalleryCategory::Facilities, false),
    ];

    entries
        .into_iter()
        .map(
            |(id, title, description, photo, category, is_featured)| GalleryItem {
                id: GalleryItemId::from_u128(id),
                title: title.to_string(),
                description: description.to_string(),
                image_url: pexels(photo),
                category,
                is_featured,
                created_at: seeded_at(),
            },
        )
        .collect()
}

/// The gallery items previewed on the landing page.
#[must_use]
pub fn featured_gallery() -> Vec<GalleryItem> {
    gallery().into_iter().filter(|item| item.is_featured).collect()
}

/// A guest review shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    /// Stars out of five.
    pub rating: u8,
    pub comment: String,
    pub avatar_url: String,
}

/// Guest reviews for the landing page.
#[must_use]
pub fn testimonials() -> Vec<Testimonial> {
    [
        ("Sarah Johnson", "Absolutely stunning hotel with exceptional service. The rooms are beautiful and the staff is incredibly friendly.", 1239291),
        ("Michael Chen", "Perfect location and amazing amenities. The restaurant serves delicious food and the spa is very relaxing.", 614810),
        ("Emily Davis", "Had the most wonderful stay here. Everything was perfect from check-in to check-out. Highly recommended!", 1181686),
    ]
    .into_iter()
    .map(|(name, comment, photo)| Testimonial {
        name: name.to_string(),
        rating: 5,
        comment: comment.to_string(),
        avatar_url: pexels(photo),
    })
    .collect()
}

/// The hotel's social accounts.
#[must_use]
pub fn social_links() -> Vec<SocialLink> {
    [
        (1, SocialPlatform::Instagram, "https://instagram.com/hotelgrandeur", "@hotelgrandeur", "12.5K"),
        (2, SocialPlatform::Facebook, "https://facebook.com/hotelgrandeur", "Hotel Grandeur", "8.2K"),
        (3, SocialPlatform::Twitter, "https://twitter.com/grandeurhotel", "@grandeurhotel", "5.1K"),
    ]
    .into_iter()
    .map(|(id, platform, url, handle, followers)| SocialLink {
        id: SocialLinkId::from_u128(id),
        platform,
        url: url.to_string(),
        handle: handle.to_string(),
        is_active: true,
        followers: Some(followers.to_string()),
        created_at: seeded_at(),
    })
    .collect()
}

/// The value of a dashboard stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StatValue {
    Count(u64),
    Money(Cents),
    Percent(u8),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => f.write_str(&group_thousands(*count)),
            Self::Money(amount) => write!(f, "{amount}"),
            Self::Percent(percent) => write!(f, "{percent}%"),
        }
    }
}

/// A stat card on the super-admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStat {
    pub label: String,
    pub value: StatValue,
    /// Change against the previous period, in percent.
    pub change_percent: i32,
}

impl DashboardStat {
    /// Returns the change formatted with its sign, e.g. "+12%".
    #[must_use]
    pub fn change_label(&self) -> String {
        format!("{:+}%", self.change_percent)
    }
}

/// Stat cards for the super-admin dashboard.
#[must_use]
pub fn dashboard_stats() -> Vec<DashboardStat> {
    [
        ("Total Bookings", StatValue::Count(156), 12),
        ("Revenue", StatValue::Money(Cents::dollars(45_280)), 8),
        ("Occupancy Rate", StatValue::Percent(78), 5),
        ("Bar Sales", StatValue::Money(Cents::dollars(8_940)), 15),
    ]
    .into_iter()
    .map(|(label, value, change_percent)| DashboardStat {
        label: label.to_string(),
        value,
        change_percent,
    })
    .collect()
}

/// Latest bookings for the super-admin dashboard.
#[must_use]
pub fn recent_bookings() -> Vec<BookingSummary> {
    [
        ("John Smith", "Deluxe Suite", 15, BookingStatus::Confirmed, 450),
        ("Sarah Johnson", "Standard Room", 16, BookingStatus::Pending, 280),
        ("Michael Brown", "Executive Suite", 17, BookingStatus::Confirmed, 680),
    ]
    .into_iter()
    .filter_map(|(guest, room, day, status, dollars)| {
        Some(BookingSummary {
            guest_name: guest.to_string(),
            room_name: room.to_string(),
            check_in: NaiveDate::from_ymd_opt(2024, 1, day)?,
            status,
            amount: Cents::dollars(dollars),
        })
    })
    .collect()
}

/// A shortcut on the super-admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: String,
    pub description: String,
}

/// Shortcuts for the super-admin dashboard.
#[must_use]
pub fn quick_actions() -> Vec<QuickAction> {
    [
        ("Add New Room", "List a room for booking"),
        ("Manage Staff", "Accounts and roles"),
        ("View Analytics", "Occupancy and revenue trends"),
        ("Inventory", "Bar stock levels"),
    ]
    .into_iter()
    .map(|(label, description)| QuickAction {
        label: label.to_string(),
        description: description.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn gallery_has_unique_ids() {
        let items = gallery();
        assert_eq!(items.len(), 8);
        let ids: HashSet<_> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn featured_gallery_is_first_four() {
        let titles: Vec<_> = featured_gallery().into_iter().map(|item| item.title).collect();
        assert_eq!(
            titles,
            [
                "Luxury Suite",
                "Hotel Exterior",
                "Fine Dining Restaurant",
                "Infinity Pool"
            ]
        );
    }

    #[test]
    fn image_urls_point_at_pexels() {
        let item = &gallery()[0];
        assert_eq!(
            item.image_url,
            "https://images.pexels.com/photos/271624/pexels-photo-271624.jpeg"
        );
    }

    #[test]
    fn stats_format_like_the_cards() {
        let rendered: Vec<_> = dashboard_stats()
            .iter()
            .map(|stat| (stat.value.to_string(), stat.change_label()))
            .collect();
        assert_eq!(
            rendered,
            [
                ("156".to_string(), "+12%".to_string()),
                ("$45,280".to_string(), "+8%".to_string()),
                ("78%".to_string(), "+5%".to_string()),
                ("$8,940".to_string(), "+15%".to_string()),
            ]
        );
    }

    #[test]
    fn negative_change_keeps_sign() {
        let stat = DashboardStat {
            label: "Cancellations".to_string(),
            value: StatValue::Count(4),
            change_percent: -3,
        };
        assert_eq!(stat.change_label(), "-3%");
    }

    #[test]
    fn recent_bookings_rows() {
        let rows = recent_bookings();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].guest_name, "John Smith");
        assert_eq!(rows[1].status, BookingStatus::Pending);
        assert_eq!(rows[2].amount.to_string(), "$680");
        assert_eq!(rows[2].check_in.to_string(), "2024-01-17");
    }

    #[test]
    fn every_testimonial_is_five_stars() {
        assert!(testimonials().iter().all(|t| t.rating == 5));
    }

    #[test]
    fn social_links_are_active() {
        let links = social_links();
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|link| link.is_active));
        assert_eq!(links[0].handle, "@hotelgrandeur");
    }

    #[test]
    fn quick_action_labels() {
        let labels: Vec<_> = quick_actions().into_iter().map(|a| a.label).collect();
        assert_eq!(
            labels,
            ["Add New Room", "Manage Staff", "View Analytics", "Inventory"]
        );
    }
}
