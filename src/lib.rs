// Liturgical Calendar - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod color;
pub mod movable;        // Easter + Easter-relative feasts
pub mod season;         // Six-season partition of the civil year
pub mod feast;          // Fixed feasts, saints, color precedence
pub mod provider;       // Feast/Saint Data Provider trait + in-memory registry
pub mod db;             // SQLite provider
pub mod calendar;       // Query facade
pub mod config;
pub mod seed;

// Re-export commonly used types
pub use error::{CalendarError, Result};
pub use color::LiturgicalColor;
pub use movable::{
    compute_easter, is_movable_feast, movable_feast_on,
    MovableFeast, MovableFeasts, MIN_YEAR, MAX_YEAR,
};
pub use season::{
    resolve_season, season_gap_count,
    LiturgicalSeason, SeasonId, SeasonTable,
};
pub use feast::{
    resolve_color, resolve_feast,
    FeastDay, FeastRank, FeastType, MonthDay, Saint,
};
pub use provider::{FeastProvider, InMemoryProvider};
pub use db::{
    SqliteProvider, FeastRecord, SaintRecord,
    setup_database, insert_feast_days, insert_saints,
    load_feasts_csv, load_saints_csv, count_feast_days, count_saints,
};
pub use calendar::{LiturgicalCalendar, LiturgicalDate, today};
pub use config::CalendarConfig;
pub use seed::{default_feasts, default_saints, default_provider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
