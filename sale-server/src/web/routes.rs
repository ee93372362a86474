//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{ClockTime, Coordinate, DomainError, ListingId, UserId};
use crate::filter::{InvalidFilter, filter_listings};
use crate::route::{RouteConfig, RouteError, RouteStop, plan};
use crate::store::{FavoriteStore, StoreError, StoreQuery};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/filter", post(filter_sales))
        .route("/route", post(plan_route))
        .route("/favorites/toggle", post(toggle_favorite))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Filter and order sale listings.
///
/// Results come back nearest-first when the request has an origin,
/// soonest-first otherwise. The response discloses the data's
/// freshness and echoes the request's sequence number so clients
/// firing rapid requests can drop replies that arrive out of order.
async fn filter_sales(
    State(state): State<AppState>,
    Json(req): Json<FilterRequest>,
) -> Result<Json<FilterResponse>, AppError> {
    let origin = req
        .origin
        .map(|o| o.to_coordinate())
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: format!("invalid origin: {e}"),
        })?;

    // Reject bad criteria before going anywhere near the store.
    let criteria = req.criteria();
    criteria.validate(origin.is_some())?;

    let user = req.user_id.as_deref().map(UserId::parse).transpose()?;

    let query = StoreQuery {
        date_from: req.date_from,
        date_to: req.date_to,
    };
    let batch = state.listings.fetch(&query).await?;

    let today = Local::now().date_naive();
    let matched = filter_listings(&batch.listings, &criteria, origin, today)?;

    let favorite_ids = match &user {
        Some(user) => Some(state.favorites.ids_for(user).await),
        None => None,
    };

    let listings = matched
        .iter()
        .map(|listing| ListingDto::from_listing(listing, origin, favorite_ids.as_ref()))
        .collect();

    Ok(Json(FilterResponse {
        listings,
        freshness: batch.freshness.as_str(),
        sequence: req.sequence,
    }))
}

/// Plan a driving route over chosen sales and schedule the arrivals.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let start = req.start.to_coordinate().map_err(|e| AppError::BadRequest {
        message: format!("invalid start: {e}"),
    })?;

    let date = req.date.unwrap_or_else(|| Local::now().date_naive());
    let depart = ClockTime::parse_hhmm(&req.depart, date).map_err(|e| AppError::BadRequest {
        message: format!("invalid depart time: {e}"),
    })?;

    let mut stops = Vec::with_capacity(req.stops.len());
    for stop in &req.stops {
        let id = ListingId::parse(&stop.id)?;
        let location = Coordinate::new(stop.lat, stop.lon).map_err(|e| AppError::BadRequest {
            message: format!("invalid location for stop {id}: {e}"),
        })?;
        stops.push(RouteStop::new(id, location));
    }

    let config = dwell_config(&state.route_config, req.dwell_mins)?;

    let itinerary = plan(start, &stops, depart, &config)?;

    Ok(Json(RouteResponse::from_itinerary(&itinerary, req.sequence)))
}

/// Ceiling on a request's dwell override: a full day per stop.
const MAX_DWELL_MINS: i64 = 24 * 60;

/// Apply a request's dwell override to the server's route config.
///
/// Out-of-range values are rejected here, before any Duration is built
/// from them.
fn dwell_config(base: &RouteConfig, override_mins: Option<i64>) -> Result<RouteConfig, AppError> {
    let Some(mins) = override_mins else {
        return Ok(base.clone());
    };
    if !(0..=MAX_DWELL_MINS).contains(&mins) {
        return Err(AppError::BadRequest {
            message: format!("dwell_mins must be between 0 and {MAX_DWELL_MINS}, got {mins}"),
        });
    }
    Ok(RouteConfig {
        dwell_mins: mins,
        ..base.clone()
    })
}

/// Toggle a favorite for a user.
async fn toggle_favorite(
    State(state): State<AppState>,
    Json(req): Json<ToggleFavoriteRequest>,
) -> Result<Json<ToggleFavoriteResponse>, AppError> {
    let listing = ListingId::parse(&req.listing_id)?;
    let user = UserId::parse(&req.user_id)?;

    let is_favorite = state.favorites.toggle(&listing, &user).await?;

    Ok(Json(ToggleFavoriteResponse {
        listing_id: listing.as_str().to_string(),
        is_favorite,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<InvalidFilter> for AppError {
    fn from(e: InvalidFilter) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            // Overflow can only come from the request's clock or dwell
            // once the server's own config is sane, so it shares the
            // bad-request arm.
            RouteError::InsufficientStops { .. }
            | RouteError::DuplicateStop(_)
            | RouteError::TimeOverflow => AppError::BadRequest {
                message: e.to_string(),
            },
            // Anything else means the scheduler built a bad itinerary.
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Seed { .. } | StoreError::NoData(_) => AppError::Internal {
                message: e.to_string(),
            },
            _ => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
