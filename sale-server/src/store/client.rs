//! HTTP client for the platform's listings API.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::warn;

use crate::domain::{
    Coordinate, DomainError, Listing, ListingId, ListingStatus, SaleHours, UserId,
};

use super::error::StoreError;

/// Default base URL for the platform's listings API.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Cap on in-flight requests to the listings API.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Cap on pages fetched for one query.
///
/// The upstream's reported total is not trusted: the fan-out stays
/// bounded no matter what `totalPages` claims.
const MAX_PAGES: u32 = 50;

/// Server-side narrowing applied when querying the listings API.
///
/// Only the date window is pushed down; every other criterion is
/// applied in memory. Also serves as the cache key for responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StoreQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// A listing as the platform API serializes it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
    pub sale_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub cash_only: bool,
    #[serde(default)]
    pub early_birds: bool,
    #[serde(default = "default_status")]
    pub status: String,
    pub owner_id: String,
}

fn default_status() -> String {
    "active".to_string()
}

/// Paged envelope the listings API wraps results in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsPage {
    pub listings: Vec<ListingRecord>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

impl ListingRecord {
    /// Convert into a validated domain listing.
    ///
    /// Tags are trimmed, lowercased, and blanks dropped.
    pub fn into_listing(self) -> Result<Listing, DomainError> {
        let id = ListingId::parse(&self.id)?;
        let owner = UserId::parse(&self.owner_id)?;
        let location = Coordinate::new(self.lat, self.lon)?;
        let hours = SaleHours::new(
            parse_time_of_day(&self.start_time)?,
            parse_time_of_day(&self.end_time)?,
        )?;
        let status = ListingStatus::parse(&self.status)?;
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::EmptyField("title"));
        }
        let tags = self
            .tags
            .iter()
            .map(|tag| tag.trim().to_ascii_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect();
        Ok(Listing {
            id,
            title,
            description: self.description.trim().to_string(),
            address: self.address.trim().to_string(),
            location,
            sale_date: self.sale_date,
            hours,
            tags,
            cash_only: self.cash_only,
            early_birds: self.early_birds,
            status,
            owner,
        })
    }
}

/// Parse a time of day in the platform's `HH:MM` format, tolerating
/// a seconds part.
fn parse_time_of_day(s: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| DomainError::BadTimeOfDay(s.to_string()))
}

/// Convert wire records into domain listings, skipping any that fail
/// validation rather than poisoning the whole batch.
pub(super) fn convert_records(records: Vec<ListingRecord>) -> Vec<Listing> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match record.into_listing() {
                Ok(listing) => Some(listing),
                Err(error) => {
                    warn!(listing = %id, error = %error, "skipping invalid listing record");
                    None
                }
            }
        })
        .collect()
}

/// Bound the page walk by [`MAX_PAGES`], whatever the upstream claims.
fn capped_total_pages(reported: u32) -> u32 {
    if reported > MAX_PAGES {
        warn!(
            reported,
            cap = MAX_PAGES,
            "implausible page count from the listings API, capping fetch"
        );
        MAX_PAGES
    } else {
        reported
    }
}

/// Configuration for the listings API client.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// API key sent on every request
    pub api_key: String,
    /// Base URL of the listings API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
}

impl StoreConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }
}

/// Client for the platform's listings API.
///
/// Fetches are paged; a semaphore keeps concurrent page requests
/// within the configured limit.
pub struct ListingStoreClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl ListingStoreClient {
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&config.api_key).map_err(|_| StoreError::Api {
            status: 0,
            message: "API key contains invalid header characters".to_string(),
        })?;
        headers.insert("x-api-key", value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch every active listing matching `query`, walking all pages.
    ///
    /// Walks at most [`MAX_PAGES`] pages per query regardless of the
    /// reported total.
    pub async fn fetch_listings(&self, query: &StoreQuery) -> Result<Vec<Listing>, StoreError> {
        let first = self.fetch_page(query, 1).await?;
        let mut records = first.listings;

        let total_pages = capped_total_pages(first.total_pages);
        if total_pages > 1 {
            let rest = futures::future::join_all(
                (2..=total_pages).map(|page| self.fetch_page(query, page)),
            )
            .await;
            for page in rest {
                records.extend(page?.listings);
            }
        }

        Ok(convert_records(records))
    }

    async fn fetch_page(&self, query: &StoreQuery, page: u32) -> Result<ListingsPage, StoreError> {
        let _permit = self.semaphore.acquire().await.map_err(|_| StoreError::Api {
            status: 0,
            message: "semaphore closed".to_string(),
        })?;

        let mut params = vec![
            ("status", "active".to_string()),
            ("page", page.to_string()),
        ];
        if let Some(from) = query.date_from {
            params.push(("from", from.to_string()));
        }
        if let Some(to) = query.date_to {
            params.push(("to", to.to_string()));
        }

        let url = format!("{}/listings", self.base_url);
        let response = self.http.get(&url).query(&params).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Json {
            message: format!("{e}; body: {}", body.chars().take(500).collect::<String>()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn record_json() -> &'static str {
        r#"{
            "id": "sale-42",
            "title": "Moving sale",
            "description": "Three decades of garage shelves",
            "address": "123 Birch Ln, Fairbanks",
            "lat": 64.8378,
            "lon": -147.7164,
            "saleDate": "2025-06-14",
            "startTime": "09:00",
            "endTime": "15:00",
            "tags": [" Tools ", "FURNITURE", ""],
            "cashOnly": true,
            "earlyBirds": false,
            "status": "Active",
            "ownerId": "user-7"
        }"#
    }

    #[test]
    fn record_parses_and_converts() {
        let record: ListingRecord = serde_json::from_str(record_json()).unwrap();
        let listing = record.into_listing().unwrap();

        assert_eq!(listing.id.as_str(), "sale-42");
        assert_eq!(listing.title, "Moving sale");
        assert_eq!(listing.sale_date, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
        assert_eq!(listing.hours.to_string(), "09:00-15:00");
        assert_eq!(listing.tags, vec!["tools", "furniture"]);
        assert!(listing.cash_only);
        assert!(!listing.early_birds);
        assert!(listing.is_active());
        assert_eq!(listing.owner.as_str(), "user-7");
    }

    #[test]
    fn record_defaults_apply() {
        let json = r#"{
            "id": "sale-1",
            "title": "Yard sale",
            "address": "5 Spruce Ct",
            "lat": 64.8,
            "lon": -147.7,
            "saleDate": "2025-06-14",
            "startTime": "08:00",
            "endTime": "12:00",
            "ownerId": "user-1"
        }"#;
        let record: ListingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.description, "");
        assert!(record.tags.is_empty());
        assert!(!record.cash_only);
        assert!(!record.early_birds);
        assert_eq!(record.status, "active");

        let listing = record.into_listing().unwrap();
        assert!(listing.is_active());
    }

    #[test]
    fn record_tolerates_seconds_in_times() {
        let mut record: ListingRecord = serde_json::from_str(record_json()).unwrap();
        record.start_time = "09:00:00".to_string();
        record.end_time = "15:30:00".to_string();
        let listing = record.into_listing().unwrap();
        assert_eq!(listing.hours.to_string(), "09:00-15:30");
    }

    #[test]
    fn record_rejects_bad_fields() {
        let base: ListingRecord = serde_json::from_str(record_json()).unwrap();

        let mut record = base.clone();
        record.lat = 95.0;
        assert!(record.into_listing().is_err());

        let mut record = base.clone();
        record.start_time = "15:00".to_string();
        record.end_time = "09:00".to_string();
        assert!(record.into_listing().is_err());

        let mut record = base.clone();
        record.id = "   ".to_string();
        assert!(record.into_listing().is_err());

        let mut record = base.clone();
        record.status = "paused".to_string();
        assert!(record.into_listing().is_err());

        let mut record = base.clone();
        record.start_time = "9am".to_string();
        assert!(record.into_listing().is_err());

        let mut record = base;
        record.title = "  ".to_string();
        assert!(record.into_listing().is_err());
    }

    #[test]
    fn page_envelope_defaults_to_single_page() {
        let json = r#"{"listings": []}"#;
        let page: ListingsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.listings.is_empty());
    }

    #[test]
    fn page_envelope_parses_counts() {
        let json = format!(
            r#"{{"listings": [{}], "page": 2, "totalPages": 7}}"#,
            record_json()
        );
        let page: ListingsPage = serde_json::from_str(&json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 7);
        assert_eq!(page.listings.len(), 1);
    }

    #[test]
    fn page_walk_is_capped() {
        assert_eq!(capped_total_pages(1), 1);
        assert_eq!(capped_total_pages(MAX_PAGES), MAX_PAGES);
        assert_eq!(capped_total_pages(MAX_PAGES + 1), MAX_PAGES);
        assert_eq!(capped_total_pages(u32::MAX), MAX_PAGES);

        // The remaining-page range stays small even for a hostile total
        assert_eq!((2..=capped_total_pages(u32::MAX)).count() as u32, MAX_PAGES - 1);
    }

    #[test]
    fn convert_records_skips_invalid() {
        let good: ListingRecord = serde_json::from_str(record_json()).unwrap();
        let mut bad = good.clone();
        bad.lon = 200.0;

        let listings = convert_records(vec![bad, good]);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id.as_str(), "sale-42");
    }

    #[test]
    fn query_is_usable_as_cache_key() {
        let from = NaiveDate::from_ymd_opt(2025, 6, 14);
        let a = StoreQuery { date_from: from, date_to: None };
        let b = StoreQuery { date_from: from, date_to: None };
        let c = StoreQuery::default();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut keys = HashSet::new();
        keys.insert(a);
        assert!(keys.contains(&b));
        assert!(!keys.contains(&c));
    }

    #[test]
    fn config_defaults_and_builders() {
        let config = StoreConfig::new("key-123");
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);

        let config = StoreConfig::new("key-123")
            .with_base_url("http://listings.internal:9000/api")
            .with_max_concurrent(10);
        assert_eq!(config.base_url, "http://listings.internal:9000/api");
        assert_eq!(config.max_concurrent, 10);
    }

    #[test]
    fn client_rejects_unprintable_api_key() {
        let result = ListingStoreClient::new(StoreConfig::new("bad\nkey"));
        assert!(result.is_err());
    }
}
