//! Hotel records and the content shown on the portal's pages.
//!
//! The record types mirror the tables of the external hotel store: rooms,
//! bookings, the bar's drinks and sales, gallery items and social links.
//! The portal only reads and displays them.
//!
//! The `showcase` module holds the fixed content the public pages and the
//! super-admin dashboard render today.

pub mod bar;
pub mod booking;
pub mod gallery;
pub mod money;
pub mod room;
pub mod showcase;
pub mod social;

pub use bar::{DrinkItem, DrinkSale};
pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use gallery::{GalleryCategory, GalleryFilter, GalleryItem};
pub use money::Cents;
pub use room::Room;
pub use social::{SocialLink, SocialPlatform};
