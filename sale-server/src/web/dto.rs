//! Data transfer objects for web requests and responses.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, DomainError, Listing, ListingId};
use crate::filter::FilterCriteria;
use crate::route::Itinerary;

/// A latitude/longitude pair as clients send it.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Validate into a domain coordinate.
    pub fn to_coordinate(self) -> Result<Coordinate, DomainError> {
        Coordinate::new(self.lat, self.lon)
    }
}

/// Request to filter sale listings.
#[derive(Debug, Default, Deserialize)]
pub struct FilterRequest {
    /// Free-text search over title, description, address, and tags
    pub search: Option<String>,

    /// Earliest sale date to include (YYYY-MM-DD)
    pub date_from: Option<NaiveDate>,

    /// Latest sale date to include
    pub date_to: Option<NaiveDate>,

    /// Keep listings carrying at least one of these tags
    pub tags: Option<Vec<String>>,

    /// Maximum distance from `origin` in kilometres
    pub max_distance_km: Option<f64>,

    /// True keeps only cash-only sales; false keeps only the rest
    pub cash_only: Option<bool>,

    /// True keeps only sales welcoming early birds; false only the rest
    pub early_birds: Option<bool>,

    /// Where distances are measured from. Required for distance
    /// filtering; also switches the result order to nearest-first
    pub origin: Option<LatLon>,

    /// Marks each result with this user's favorite state when present
    pub user_id: Option<String>,

    /// Client-chosen sequence number, echoed back so a client firing
    /// rapid requests can discard replies that arrive out of order
    pub sequence: Option<u64>,
}

impl FilterRequest {
    /// The filtering criteria this request carries.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone(),
            date_from: self.date_from,
            date_to: self.date_to,
            tags: self.tags.clone(),
            max_distance_km: self.max_distance_km,
            cash_only: self.cash_only,
            early_birds: self.early_birds,
        }
    }
}

/// A listing in filter results.
#[derive(Debug, Serialize)]
pub struct ListingDto {
    pub id: String,

    pub title: String,

    pub description: String,

    pub address: String,

    pub lat: f64,

    pub lon: f64,

    /// Sale date (YYYY-MM-DD)
    pub sale_date: NaiveDate,

    /// Opening time (HH:MM)
    pub start_time: String,

    /// Closing time (HH:MM)
    pub end_time: String,

    pub tags: Vec<String>,

    pub cash_only: bool,

    pub early_birds: bool,

    /// Kilometres from the request origin, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,

    /// Whether the requesting user has favorited this listing;
    /// omitted when the request named no user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

/// Response for listing filtering.
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    /// Matching listings, already ordered
    pub listings: Vec<ListingDto>,

    /// Where the data came from: "live", "cached", or "seed"
    pub freshness: &'static str,

    /// Echo of the request's sequence number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
}

/// A stop named in a route request.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRequest {
    /// Listing id of the sale
    pub id: String,

    pub lat: f64,

    pub lon: f64,
}

/// Request to plan a route over chosen sales.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Starting point, usually the user's location
    pub start: LatLon,

    /// Day of the trip; defaults to today
    pub date: Option<NaiveDate>,

    /// Departure clock time (HH:MM)
    pub depart: String,

    /// Sales to visit
    pub stops: Vec<StopRequest>,

    /// Minutes to spend at each stop; defaults to the server's config
    pub dwell_mins: Option<i64>,

    /// Client-chosen sequence number, echoed back
    pub sequence: Option<u64>,
}

/// A scheduled visit in a planned route.
#[derive(Debug, Serialize)]
pub struct WaypointDto {
    /// Listing id of the sale
    pub id: String,

    /// 1-based visit order
    pub position: u32,

    pub lat: f64,

    pub lon: f64,

    /// Arrival clock time (HH:MM)
    pub arrival: String,

    /// Kilometres driven from the previous point
    pub leg_distance_km: f64,

    /// Minutes driven from the previous point
    pub leg_duration_mins: i64,
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Visits in driving order
    pub waypoints: Vec<WaypointDto>,

    /// Kilometres driven over the whole route
    pub total_distance_km: f64,

    /// Minutes from departure to leaving the last stop
    pub total_duration_mins: i64,

    /// Minutes budgeted at each stop
    pub dwell_mins: i64,

    /// Echo of the request's sequence number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
}

/// Request to toggle a favorite.
#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteRequest {
    pub listing_id: String,

    pub user_id: String,
}

/// Result of a favorite toggle.
#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub listing_id: String,

    /// State after the toggle: true means now favorited
    pub is_favorite: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl ListingDto {
    /// Create from a domain listing.
    ///
    /// `origin` adds a rounded distance; `favorites` marks the
    /// requesting user's favorite state.
    pub fn from_listing(
        listing: &Listing,
        origin: Option<Coordinate>,
        favorites: Option<&HashSet<ListingId>>,
    ) -> Self {
        Self {
            id: listing.id.as_str().to_string(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            address: listing.address.clone(),
            lat: listing.location.lat(),
            lon: listing.location.lon(),
            sale_date: listing.sale_date,
            start_time: listing.hours.start().format("%H:%M").to_string(),
            end_time: listing.hours.end().format("%H:%M").to_string(),
            tags: listing.tags.clone(),
            cash_only: listing.cash_only,
            early_birds: listing.early_birds,
            distance_km: origin.map(|o| round2(o.distance_km(listing.location))),
            is_favorite: favorites.map(|f| f.contains(&listing.id)),
        }
    }
}

impl RouteResponse {
    /// Create from a scheduled itinerary.
    pub fn from_itinerary(itinerary: &Itinerary, sequence: Option<u64>) -> Self {
        let waypoints = itinerary
            .waypoints()
            .iter()
            .map(|w| WaypointDto {
                id: w.listing_id.as_str().to_string(),
                position: w.position,
                lat: w.location.lat(),
                lon: w.location.lon(),
                arrival: w.arrival.to_string(),
                leg_distance_km: round2(w.leg_distance_km),
                leg_duration_mins: w.leg_duration.num_minutes(),
            })
            .collect();

        Self {
            waypoints,
            total_distance_km: round2(itinerary.total_distance_km()),
            total_duration_mins: itinerary.total_duration().num_minutes(),
            dwell_mins: itinerary.dwell().num_minutes(),
            sequence,
        }
    }
}

/// Round to two decimal places for display.
fn round2(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
