//! Page components for the application.
//!
//! Public pages need no session; the dashboards are mounted behind
//! [`crate::guard::ProtectedRoute`].

pub mod dashboards;
pub mod gallery;
pub mod landing;
pub mod login;
pub mod social;
pub mod unauthorized;

pub use dashboards::{StaffPlaceholder, SuperAdminDashboard};
pub use gallery::GalleryPage;
pub use landing::LandingPage;
pub use login::LoginPage;
pub use social::SocialPage;
pub use unauthorized::UnauthorizedPage;
