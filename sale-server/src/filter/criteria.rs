//! Filter criteria and their validation.

use chrono::NaiveDate;

/// Error from an unsatisfiable or contradictory filter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidFilter {
    /// A distance cap was given without a point to measure from
    #[error("distance filter requires an origin")]
    MissingOrigin,

    /// The distance cap does not describe a circle
    #[error("max distance must be a positive number of kilometres, got {given}")]
    NonPositiveRadius { given: f64 },

    /// The date range contains no days
    #[error("date range is empty: {from} is after {to}")]
    EmptyDateRange { from: NaiveDate, to: NaiveDate },
}

/// A shopper's filter settings, all optional.
///
/// Unset fields impose no constraint. The one implicit rule: when
/// neither date bound is set, sales whose day has already passed are
/// excluded, so a blank form shows upcoming sales rather than history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive text search over title, description, address
    /// and tags
    pub search: Option<String>,
    /// Earliest sale date to include (inclusive)
    pub date_from: Option<NaiveDate>,
    /// Latest sale date to include (inclusive)
    pub date_to: Option<NaiveDate>,
    /// Keep listings carrying at least one of these tags
    pub tags: Option<Vec<String>>,
    /// Keep listings within this many kilometres of the origin
    pub max_distance_km: Option<f64>,
    /// Keep listings whose cash-only flag equals this value
    pub cash_only: Option<bool>,
    /// Keep listings whose early-birds flag equals this value
    pub early_birds: Option<bool>,
}

impl FilterCriteria {
    /// Check the criteria against each other and against the presence
    /// of an origin point.
    ///
    /// A distance cap needs an origin to measure from, must be a
    /// positive number, and a date range must contain at least one day.
    pub fn validate(&self, has_origin: bool) -> Result<(), InvalidFilter> {
        if let Some(given) = self.max_distance_km {
            if !given.is_finite() || given <= 0.0 {
                return Err(InvalidFilter::NonPositiveRadius { given });
            }
            if !has_origin {
                return Err(InvalidFilter::MissingOrigin);
            }
        }

        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(InvalidFilter::EmptyDateRange { from, to });
            }
        }

        Ok(())
    }

    /// The search needle with surrounding whitespace removed, if any
    /// text survives.
    pub fn normalized_search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Trimmed, non-blank tags, if any remain after cleaning.
    pub fn normalized_tags(&self) -> Option<Vec<String>> {
        let tags: Vec<String> = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if tags.is_empty() { None } else { Some(tags) }
    }
}
