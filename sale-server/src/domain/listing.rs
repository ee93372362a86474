//! Sale listing types.
//!
//! A `Listing` is one garage sale as published on the hosting platform:
//! where it is, when it runs, and what kind of sale it is. Identifier
//! and hours types validate at construction, so a `Listing` in hand is
//! ready for filtering and routing without further checks.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use super::{Coordinate, DomainError};

/// A validated, non-empty listing identifier.
///
/// Identifiers are opaque strings minted by the hosting platform. The
/// only invariant enforced here is that they contain visible characters;
/// surrounding whitespace is stripped.
///
/// # Examples
///
/// ```
/// use sale_server::domain::ListingId;
///
/// let id = ListingId::parse("sale-1042").unwrap();
/// assert_eq!(id.as_str(), "sale-1042");
/// assert!(ListingId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingId(String);

impl ListingId {
    /// Parse an identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyField("listing id"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, non-empty user account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    /// Parse an identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyField("user id"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a listing on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingStatus {
    /// Published and upcoming (or underway)
    Active,
    /// The sale has happened
    Completed,
    /// Withdrawn by the seller
    Cancelled,
}

impl ListingStatus {
    /// Parse a status string as the platform sends it, ignoring case.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening hours on the sale day.
///
/// The end is strictly after the start; a sale that "runs" from 15:00
/// to 09:00 is rejected rather than silently reordered.
///
/// # Examples
///
/// ```
/// use sale_server::domain::SaleHours;
/// use chrono::NaiveTime;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
/// let hours = SaleHours::new(start, end).unwrap();
/// assert_eq!(hours.to_string(), "09:00-15:00");
///
/// assert!(SaleHours::new(end, start).is_err());
/// assert!(SaleHours::new(start, start).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleHours {
    start: NaiveTime,
    end: NaiveTime,
}

impl SaleHours {
    /// Validate an opening window on the sale day.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, DomainError> {
        if end <= start {
            return Err(DomainError::InvalidSaleHours { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of the opening window.
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

impl fmt::Display for SaleHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// One garage sale as published on the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Stable identifier minted by the platform
    pub id: ListingId,
    /// Short headline, e.g. "Three-family garage sale"
    pub title: String,
    /// Free-text description of what is on offer
    pub description: String,
    /// Street address as entered by the seller
    pub address: String,
    /// Geocoded position of the sale
    pub location: Coordinate,
    /// Day the sale takes place
    pub sale_date: NaiveDate,
    /// Opening hours on the sale day
    pub hours: SaleHours,
    /// Category tags such as "furniture" or "tools"
    pub tags: Vec<String>,
    /// Seller accepts cash only
    pub cash_only: bool,
    /// Early-bird shoppers are welcome before the listed start
    pub early_birds: bool,
    /// Lifecycle status on the platform
    pub status: ListingStatus,
    /// Seller's account id
    pub owner: UserId,
}

impl Listing {
    /// Whether the listing is still discoverable (not completed or
    /// cancelled).
    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }

    /// Case-insensitive tag membership (ASCII case only).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Any string with a visible character parses to its trimmed form
        #[test]
        fn ids_roundtrip_trimmed(core in "[a-z0-9-]{1,12}", pad in "[ \t]{0,3}") {
            let raw = format!("{pad}{core}{pad}");
            let id = ListingId::parse(&raw).unwrap();
            prop_assert_eq!(id.as_str(), core.as_str());
        }

        /// Status strings roundtrip through parse and as_str
        #[test]
        fn status_roundtrip(idx in 0usize..3) {
            let status = [
                ListingStatus::Active,
                ListingStatus::Completed,
                ListingStatus::Cancelled,
            ][idx];
            prop_assert_eq!(ListingStatus::parse(status.as_str()).unwrap(), status);
        }

        /// Hours accept exactly the start < end orderings
        #[test]
        fn hours_accept_iff_ordered(h1 in 0u32..24, m1 in 0u32..60, h2 in 0u32..24, m2 in 0u32..60) {
            let a = NaiveTime::from_hms_opt(h1, m1, 0).unwrap();
            let b = NaiveTime::from_hms_opt(h2, m2, 0).unwrap();
            let result = SaleHours::new(a, b);
            if a < b {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }
    }
}
