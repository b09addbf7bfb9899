//! Room bookings.

use chrono::{DateTime, NaiveDate, Utc};
use hotel_portal_core::{BookingId, RoomId};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Cents;

/// Where a booking is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    /// Returns the wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "Checked in",
            Self::CheckedOut => "Checked out",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true if the guest is expected or currently staying.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::CheckedIn)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// A booking, as stored in the `bookings` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: Cents,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    /// Reference quoted to the guest.
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Returns the number of nights booked, zero if the dates are inverted.
    #[must_use]
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days();
        u32::try_from(days).unwrap_or(0)
    }
}

/// One row of the dashboard's recent bookings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub guest_name: String,
    pub room_name: String,
    pub check_in: NaiveDate,
    pub status: BookingStatus,
    pub amount: Cents,
}
