//! Core domain identifiers and error handling for the hotel portal.
//!
//! This crate provides the foundational ID types and the `Result` alias
//! shared by the catalog, platform-access and server crates.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{
    BookingId, DrinkId, DrinkSaleId, GalleryItemId, ParseIdError, RoomId, SignInGrantId,
    SocialLinkId, UserId,
};
