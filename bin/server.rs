// Liturgical Calendar - Web Server
// Read-only JSON API over the calendar engine

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDate;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use liturgical_calendar::{
    CalendarConfig, CalendarError, LiturgicalCalendar, MovableFeasts, SqliteProvider,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    calendar: Arc<Mutex<LiturgicalCalendar<SqliteProvider>>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Deserialize)]
struct LimitParams {
    limit: Option<usize>,
}

/// Movable feast listing for one year
#[derive(Serialize)]
struct EasterResponse {
    year: i32,
    easter: NaiveDate,
    feasts: Vec<MovableFeastEntry>,
}

#[derive(Serialize)]
struct MovableFeastEntry {
    name: &'static str,
    date: NaiveDate,
}

impl From<MovableFeasts> for EasterResponse {
    fn from(feasts: MovableFeasts) -> Self {
        Self {
            year: feasts.year,
            easter: feasts.easter,
            feasts: feasts
                .iter()
                .map(|(feast, date)| MovableFeastEntry { name: feast.name(), date })
                .collect(),
        }
    }
}

// ============================================================================
// Response helpers
// ============================================================================

fn respond<T: Serialize>(result: Result<T, CalendarError>) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))).into_response(),
        Err(e) => {
            let status = match e {
                CalendarError::InvalidDateInput(_) => StatusCode::BAD_REQUEST,
                CalendarError::DataProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            error!("request failed: {}", e);
            (status, Json(ApiResponse::<()>::err(e.to_string()))).into_response()
        }
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| CalendarError::invalid(format!("expected YYYY-MM-DD, got {:?}", text)))
}

fn with_calendar<T>(
    state: &AppState,
    f: impl FnOnce(&LiturgicalCalendar<SqliteProvider>) -> Result<T, CalendarError>,
) -> Result<T, CalendarError> {
    let calendar = state
        .calendar
        .lock()
        .map_err(|_| CalendarError::unavailable("calendar lock poisoned"))?;
    f(&calendar)
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/today - Today's liturgical date
async fn get_today(State(state): State<AppState>) -> Response {
    respond(with_calendar(&state, |cal| cal.get_today_liturgical_date()))
}

/// GET /api/date/:date - Liturgical date for YYYY-MM-DD
async fn get_date(State(state): State<AppState>, Path(date): Path<String>) -> Response {
    respond(parse_date(&date).and_then(|d| with_calendar(&state, |cal| cal.get_liturgical_date(d))))
}

/// GET /api/range/:start/:end - Every liturgical date in the inclusive range
async fn get_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    let result = parse_date(&start).and_then(|s| {
        let e = parse_date(&end)?;
        with_calendar(&state, |cal| cal.get_liturgical_dates(s, e))
    });
    respond(result)
}

/// GET /api/easter/:year - Easter and the movable feasts
async fn get_easter(Path(year): Path<i32>) -> Response {
    respond(MovableFeasts::for_year(year).map(EasterResponse::from))
}

/// GET /api/saints/date/:date - Saints sharing the date's feast-day key
async fn get_saints_for_date(State(state): State<AppState>, Path(date): Path<String>) -> Response {
    respond(parse_date(&date).and_then(|d| with_calendar(&state, |cal| cal.get_saints_for_date(d))))
}

/// GET /api/saints/search/:query - Case-insensitive name search
async fn search_saints(State(state): State<AppState>, Path(query): Path<String>) -> Response {
    respond(with_calendar(&state, |cal| cal.search_saints(&query)))
}

/// GET /api/saints - All saints
async fn get_all_saints(State(state): State<AppState>) -> Response {
    respond(with_calendar(&state, |cal| cal.get_all_saints()))
}

/// GET /api/feasts/upcoming?limit=N - Upcoming fixed feasts
async fn get_upcoming(State(state): State<AppState>, Query(params): Query<LimitParams>) -> Response {
    respond(with_calendar(&state, |cal| {
        let limit = params.limit.unwrap_or_else(|| cal.default_upcoming_limit());
        cal.get_upcoming_feast_days(limit)
    }))
}

/// GET /api/feasts/order - Feasts of the Order
async fn get_order_feasts(State(state): State<AppState>) -> Response {
    respond(with_calendar(&state, |cal| cal.get_order_feast_days()))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("🌐 Liturgical Calendar - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = CalendarConfig::load()?;
    let provider = SqliteProvider::open(&config.database_path)?;
    println!("✓ Database opened: {:?}", config.database_path);

    // Create shared state
    let state = AppState {
        calendar: Arc::new(Mutex::new(LiturgicalCalendar::with_config(provider, &config))),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/today", get(get_today))
        .route("/date/:date", get(get_date))
        .route("/range/:start/:end", get(get_range))
        .route("/easter/:year", get(get_easter))
        .route("/saints", get(get_all_saints))
        .route("/saints/date/:date", get(get_saints_for_date))
        .route("/saints/search/:query", get(search_saints))
        .route("/feasts/upcoming", get(get_upcoming))
        .route("/feasts/order", get(get_order_feasts))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("listening on {}", config.bind_address);

    println!("\n🚀 Server running on http://{}", config.bind_address);
    println!("   API: http://{}/api/today", config.bind_address);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await?;
    Ok(())
}
