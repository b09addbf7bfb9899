//! The hotel's social media accounts.

use chrono::{DateTime, Utc};
use hotel_portal_core::SocialLinkId;
use serde::{Deserialize, Serialize};

/// A social network the hotel posts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Youtube,
}

impl SocialPlatform {
    /// Returns the display name.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::Linkedin => "LinkedIn",
            Self::Youtube => "YouTube",
        }
    }
}

/// A link to one of the hotel's accounts, as stored in the `social_media`
/// table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: SocialLinkId,
    pub platform: SocialPlatform,
    pub url: String,
    pub handle: String,
    pub is_active: bool,
    /// Follower count as shown on the page (e.g. "12.5K").
    #[serde(default)]
    pub followers: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Returns the active links, keeping their order.
#[must_use]
pub fn active(links: &[SocialLink]) -> Vec<&SocialLink> {
    links.iter().filter(|link| link.is_active).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_wire_names() {
        let parsed: SocialPlatform = serde_json::from_str("\"linkedin\"").expect("parse");
        assert_eq!(parsed, SocialPlatform::Linkedin);
        assert_eq!(parsed.label(), "LinkedIn");
    }

    #[test]
    fn inactive_links_are_hidden() {
        let mut links = crate::showcase::social_links();
        let total = links.len();
        links[0].is_active = false;
        assert_eq!(active(&links).len(), total - 1);
    }
}
