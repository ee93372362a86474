//! Seed listings for offline and degraded operation.

use std::path::Path;

use chrono::{Duration, NaiveDate};

use crate::domain::Listing;

use super::client::{ListingRecord, convert_records};
use super::error::StoreError;

/// Load listings from a JSON seed file: an array of listing records in
/// the platform's wire format. Records that fail validation are
/// skipped; a file with no usable records is an error.
pub fn load_seed(path: impl AsRef<Path>) -> Result<Vec<Listing>, StoreError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| StoreError::Seed {
        message: format!("{}: {e}", path.display()),
    })?;
    let records: Vec<ListingRecord> = serde_json::from_str(&raw).map_err(|e| StoreError::Seed {
        message: format!("{}: {e}", path.display()),
    })?;

    let listings = convert_records(records);
    if listings.is_empty() {
        return Err(StoreError::Seed {
            message: format!("no usable listings in {}", path.display()),
        });
    }
    Ok(listings)
}

/// A small bundled dataset around Fairbanks, Alaska, used when no seed
/// file is configured. Sale dates are rewritten to land on `today` and
/// the two days after it, so the bundled sales never age out.
pub fn built_in_listings(today: NaiveDate) -> Vec<Listing> {
    let records: Vec<ListingRecord> = serde_json::from_str(BUILT_IN_JSON).unwrap_or_default();
    let mut listings = convert_records(records);
    for (i, listing) in listings.iter_mut().enumerate() {
        listing.sale_date = today + Duration::days((i % 3) as i64);
    }
    listings
}

const BUILT_IN_JSON: &str = r#"[
    {
        "id": "seed-college-1",
        "title": "Moving sale, everything must go",
        "description": "Furniture, kitchenware, and a chest freezer. Thirty years in one house.",
        "address": "1814 Carr Ave, Fairbanks",
        "lat": 64.8563,
        "lon": -147.8208,
        "saleDate": "2025-06-14",
        "startTime": "09:00",
        "endTime": "16:00",
        "tags": ["furniture", "appliances"],
        "cashOnly": true,
        "ownerId": "seed-user-1"
    },
    {
        "id": "seed-downtown-1",
        "title": "Downtown multi-family yard sale",
        "description": "Four households. Kids clothes, toys, bikes, paperbacks.",
        "address": "612 5th Ave, Fairbanks",
        "lat": 64.8401,
        "lon": -147.7086,
        "saleDate": "2025-06-14",
        "startTime": "08:00",
        "endTime": "14:00",
        "tags": ["toys", "clothing", "books"],
        "ownerId": "seed-user-2"
    },
    {
        "id": "seed-farmersloop-1",
        "title": "Garage cleanout: tools and fishing gear",
        "description": "Hand tools, a table saw, rods, tackle, two canoes.",
        "address": "2990 Farmers Loop Rd, Fairbanks",
        "lat": 64.8932,
        "lon": -147.6846,
        "saleDate": "2025-06-15",
        "startTime": "10:00",
        "endTime": "17:00",
        "tags": ["tools", "outdoors"],
        "cashOnly": true,
        "earlyBirds": true,
        "ownerId": "seed-user-3"
    },
    {
        "id": "seed-chenapump-1",
        "title": "Estate sale, antiques and quilts",
        "description": "Hand-stitched quilts, oak furniture, cast iron cookware.",
        "address": "4501 Chena Pump Rd, Fairbanks",
        "lat": 64.8225,
        "lon": -147.8768,
        "saleDate": "2025-06-15",
        "startTime": "09:00",
        "endTime": "15:00",
        "tags": ["antiques", "furniture"],
        "ownerId": "seed-user-4"
    },
    {
        "id": "seed-northpole-1",
        "title": "North Pole driveway sale",
        "description": "Snowmachine parts, studded tires, holiday decorations.",
        "address": "125 St Nicholas Dr, North Pole",
        "lat": 64.7511,
        "lon": -147.3494,
        "saleDate": "2025-06-16",
        "startTime": "10:00",
        "endTime": "16:00",
        "tags": ["automotive", "outdoors"],
        "earlyBirds": true,
        "ownerId": "seed-user-5"
    },
    {
        "id": "seed-southside-1",
        "title": "Baby gear and book sale",
        "description": "Crib, stroller, high chair, and six boxes of novels.",
        "address": "37 Persinger Dr, Fairbanks",
        "lat": 64.8278,
        "lon": -147.6473,
        "saleDate": "2025-06-16",
        "startTime": "08:30",
        "endTime": "13:30",
        "tags": ["baby", "books"],
        "ownerId": "seed-user-6"
    }
]"#;
