//! Monetary amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// An amount in US cents.
///
/// Displays as dollars with thousands separators. Whole-dollar amounts omit
/// the cents: `$45,280`, `$12.50`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(u64);

impl Cents {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from cents.
    #[must_use]
    pub const fn new(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates an amount from whole dollars.
    #[must_use]
    pub const fn dollars(dollars: u64) -> Self {
        Self(dollars * 100)
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn as_cents(&self) -> u64 {
        self.0
    }

    /// Multiplies a unit price by a quantity.
    #[must_use]
    pub const fn times(&self, quantity: u32) -> Self {
        Self(self.0 * quantity as u64)
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = self.0 % 100;
        write!(f, "${}", group_thousands(dollars))?;
        if cents != 0 {
            write!(f, ".{cents:02}")?;
        }
        Ok(())
    }
}

/// Formats an integer with comma thousands separators.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_whole_dollars_with_separators() {
        assert_eq!(Cents::dollars(45_280).to_string(), "$45,280");
        assert_eq!(Cents::dollars(450).to_string(), "$450");
        assert_eq!(Cents::dollars(1_234_567).to_string(), "$1,234,567");
        assert_eq!(Cents::ZERO.to_string(), "$0");
    }

    #[test]
    fn displays_cents_when_present() {
        assert_eq!(Cents::new(1250).to_string(), "$12.50");
        assert_eq!(Cents::new(100_005).to_string(), "$1,000.05");
    }

    #[test]
    fn arithmetic() {
        let price = Cents::new(850);
        assert_eq!(price.times(3), Cents::new(2550));
        let total: Cents = [Cents::dollars(1), Cents::new(50)].into_iter().sum();
        assert_eq!(total, Cents::new(150));
    }

    #[test]
    fn group_thousands_edges() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(100_000), "100,000");
    }
}
