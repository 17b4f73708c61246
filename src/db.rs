// 🗄️ SQLite Feast/Saint Store
// The app's local database: feast_days + saints tables, WAL journal.
//
// Column names (is_dominican, liturgical_color, ...) match the mobile app's
// schema so the same database file can be shared.

use crate::color::LiturgicalColor;
use crate::error::{CalendarError, Result};
use crate::feast::{FeastDay, MonthDay, Saint};
use crate::provider::FeastProvider;
use anyhow::Context;
use log::{debug, info, warn};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

const FEAST_COLUMNS: &str =
    "id, name, type, rank, date, description, is_dominican, liturgical_color, saint_id";

const SAINT_COLUMNS: &str = "id, name, feast_day, birth_year, death_year, canonization_year,
     description, biography, patronage, is_dominican, religious_order, province, image_url";

// ============================================================================
// RECORDS (CSV rows + raw database rows)
// ============================================================================

/// Feast row as stored: every enum still text
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FeastRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub feast_type: String,
    pub rank: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_flag", default)]
    pub is_dominican: bool,
    #[serde(default)]
    pub liturgical_color: Option<String>,
    #[serde(default)]
    pub saint_id: Option<String>,
}

impl TryFrom<FeastRecord> for FeastDay {
    type Error = CalendarError;

    fn try_from(rec: FeastRecord) -> Result<FeastDay> {
        let date: MonthDay = rec
            .date
            .parse()
            .map_err(|e| CalendarError::record(format!("feast {}: {}", rec.id, e)))?;
        let liturgical_color = match rec.liturgical_color.as_deref().map(str::trim) {
            None | Some("") => None,
            // Unreadable colors fall back to the season color
            Some(text) => match text.parse::<LiturgicalColor>() {
                Ok(color) => Some(color),
                Err(e) => {
                    warn!("feast {}: {}; using season color", rec.id, e);
                    None
                }
            },
        };

        Ok(FeastDay {
            feast_type: rec.feast_type.parse()?,
            rank: rec.rank.parse()?,
            date,
            description: rec.description,
            liturgical_color,
            is_order: rec.is_dominican,
            saint_id: rec.saint_id.filter(|s| !s.trim().is_empty()),
            saint: None,
            id: rec.id,
            name: rec.name,
        })
    }
}

/// Saint row as it appears in an import CSV (patronage is `;`-separated)
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SaintRecord {
    pub id: String,
    pub name: String,
    pub feast_day: String,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
    #[serde(default)]
    pub canonization_year: Option<i32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub patronage: String,
    #[serde(deserialize_with = "deserialize_flag", default)]
    pub is_dominican: bool,
    #[serde(default)]
    pub religious_order: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<SaintRecord> for Saint {
    type Error = CalendarError;

    fn try_from(rec: SaintRecord) -> Result<Saint> {
        let feast_day: MonthDay = rec
            .feast_day
            .parse()
            .map_err(|e| CalendarError::record(format!("saint {}: {}", rec.id, e)))?;
        let patronage = rec
            .patronage
            .split(';')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();

        Ok(Saint {
            id: rec.id,
            name: rec.name,
            feast_day,
            birth_year: rec.birth_year,
            death_year: rec.death_year,
            canonization_year: rec.canonization_year,
            description: rec.description,
            biography: rec.biography,
            patronage,
            is_order: rec.is_dominican,
            religious_order: rec.religious_order,
            province: rec.province,
            image_url: rec.image_url,
        })
    }
}

/// Accepts 0/1, true/false, yes/no (case-insensitive); empty is false
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        other => Err(serde::de::Error::custom(format!("invalid flag: {:?}", other))),
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS feast_days (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            rank TEXT NOT NULL,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            is_dominican INTEGER NOT NULL DEFAULT 0,
            liturgical_color TEXT NOT NULL,
            saint_id TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS saints (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            feast_day TEXT NOT NULL,
            birth_year INTEGER,
            death_year INTEGER,
            canonization_year INTEGER,
            description TEXT NOT NULL,
            biography TEXT NOT NULL,
            patronage TEXT NOT NULL,
            is_dominican INTEGER NOT NULL DEFAULT 0,
            religious_order TEXT,
            province TEXT,
            image_url TEXT
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_feast_days_date ON feast_days(date)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_feast_days_dominican ON feast_days(is_dominican)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_saints_feast_day ON saints(feast_day)",
        [],
    )?;

    conn.execute("CREATE INDEX IF NOT EXISTS idx_saints_name ON saints(name)", [])?;

    Ok(())
}

// ============================================================================
// IMPORT
// ============================================================================

pub fn load_feasts_csv(csv_path: &Path) -> anyhow::Result<Vec<FeastDay>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open feast CSV file")?;

    let mut feasts = Vec::new();
    for (line, result) in rdr.deserialize::<FeastRecord>().enumerate() {
        let record = result.with_context(|| format!("Failed to deserialize feast row {}", line + 1))?;
        feasts.push(FeastDay::try_from(record).with_context(|| format!("Invalid feast row {}", line + 1))?);
    }

    Ok(feasts)
}

pub fn load_saints_csv(csv_path: &Path) -> anyhow::Result<Vec<Saint>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open saint CSV file")?;

    let mut saints = Vec::new();
    for (line, result) in rdr.deserialize::<SaintRecord>().enumerate() {
        let record = result.with_context(|| format!("Failed to deserialize saint row {}", line + 1))?;
        saints.push(Saint::try_from(record).with_context(|| format!("Invalid saint row {}", line + 1))?);
    }

    Ok(saints)
}

/// Insert or replace feasts by id; returns rows written
pub fn insert_feast_days(conn: &Connection, feasts: &[FeastDay]) -> Result<usize> {
    let mut written = 0;

    for feast in feasts {
        written += conn.execute(
            "INSERT OR REPLACE INTO feast_days (
                id, name, type, rank, date, description, is_dominican, liturgical_color, saint_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                feast.id,
                feast.name,
                feast.feast_type.as_str(),
                feast.rank.as_str(),
                feast.date.to_string(),
                feast.description,
                feast.is_order,
                feast.liturgical_color.map(|c| c.hex()).unwrap_or_default(),
                feast.saint_id,
            ],
        )?;
    }

    info!("stored {} feast days", written);
    Ok(written)
}

/// Insert or replace saints by id; returns rows written
pub fn insert_saints(conn: &Connection, saints: &[Saint]) -> Result<usize> {
    let mut written = 0;

    for saint in saints {
        let patronage_json = serde_json::to_string(&saint.patronage)
            .map_err(|e| CalendarError::record(format!("saint {}: {}", saint.id, e)))?;

        written += conn.execute(
            "INSERT OR REPLACE INTO saints (
                id, name, feast_day, birth_year, death_year, canonization_year,
                description, biography, patronage, is_dominican, religious_order, province, image_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                saint.id,
                saint.name,
                saint.feast_day.to_string(),
                saint.birth_year,
                saint.death_year,
                saint.canonization_year,
                saint.description,
                saint.biography,
                patronage_json,
                saint.is_order,
                saint.religious_order,
                saint.province,
                saint.image_url,
            ],
        )?;
    }

    info!("stored {} saints", written);
    Ok(written)
}

pub fn count_feast_days(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM feast_days", [], |row| row.get(0))?)
}

pub fn count_saints(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM saints", [], |row| row.get(0))?)
}

// ============================================================================
// ROW MAPPING
// ============================================================================

fn feast_record(row: &Row<'_>) -> rusqlite::Result<FeastRecord> {
    Ok(FeastRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        feast_type: row.get(2)?,
        rank: row.get(3)?,
        date: row.get(4)?,
        description: row.get(5)?,
        is_dominican: row.get::<_, i64>(6)? != 0,
        liturgical_color: row.get(7)?,
        saint_id: row.get(8)?,
    })
}

/// Raw saint row; patronage still JSON text
struct SaintRow {
    saint: SaintRecord,
}

fn saint_row(row: &Row<'_>) -> rusqlite::Result<SaintRow> {
    Ok(SaintRow {
        saint: SaintRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            feast_day: row.get(2)?,
            birth_year: row.get(3)?,
            death_year: row.get(4)?,
            canonization_year: row.get(5)?,
            description: row.get(6)?,
            biography: row.get(7)?,
            patronage: row.get(8)?,
            is_dominican: row.get::<_, i64>(9)? != 0,
            religious_order: row.get(10)?,
            province: row.get(11)?,
            image_url: row.get(12)?,
        },
    })
}

impl TryFrom<SaintRow> for Saint {
    type Error = CalendarError;

    fn try_from(row: SaintRow) -> Result<Saint> {
        let mut rec = row.saint;
        let patronage: Vec<String> = if rec.patronage.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&rec.patronage)
                .map_err(|e| CalendarError::record(format!("saint {} patronage: {}", rec.id, e)))?
        };
        rec.patronage = String::new();
        let mut saint = Saint::try_from(rec)?;
        saint.patronage = patronage;
        Ok(saint)
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Unicode lowercase as a SQL function, so search folds more than ASCII
fn register_fold_case(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
    )?;
    Ok(())
}

/// Escape LIKE wildcards so the query is matched literally
fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

// ============================================================================
// SQLITE PROVIDER
// ============================================================================

/// FeastProvider over a rusqlite connection
#[derive(Debug)]
pub struct SqliteProvider {
    conn: Connection,
}

impl SqliteProvider {
    /// Open (or create) the database file and make sure the tables exist
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        setup_database(&conn)?;
        debug!("opened feast database {:?}", path);
        Self::from_connection(conn)
    }

    /// Fresh in-memory database with the schema in place
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Self::from_connection(conn)
    }

    /// Wrap an existing connection (no schema setup)
    pub fn from_connection(conn: Connection) -> Result<Self> {
        register_fold_case(&conn)?;
        Ok(SqliteProvider { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn query_feasts(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<FeastDay>> {
        let mut stmt = self.conn.prepare(sql)?;
        let records = stmt
            .query_map(params, feast_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        records.into_iter().map(FeastDay::try_from).collect()
    }

    fn query_saints(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Saint>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, saint_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(Saint::try_from).collect()
    }
}

impl FeastProvider for SqliteProvider {
    fn feast_by_month_day(&self, key: MonthDay) -> Result<Option<FeastDay>> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {} FROM feast_days WHERE date = ?1 ORDER BY rowid LIMIT 1", FEAST_COLUMNS),
                [key.to_string()],
                feast_record,
            )
            .optional()?;
        record.map(FeastDay::try_from).transpose()
    }

    fn feasts_from(&self, key: MonthDay, limit: usize) -> Result<Vec<FeastDay>> {
        self.query_feasts(
            &format!("SELECT {} FROM feast_days WHERE date >= ?1 ORDER BY date ASC, rowid ASC LIMIT ?2", FEAST_COLUMNS),
            params![key.to_string(), sql_limit(limit)],
        )
    }

    fn feasts_before(&self, key: MonthDay, limit: usize) -> Result<Vec<FeastDay>> {
        self.query_feasts(
            &format!("SELECT {} FROM feast_days WHERE date < ?1 ORDER BY date ASC, rowid ASC LIMIT ?2", FEAST_COLUMNS),
            params![key.to_string(), sql_limit(limit)],
        )
    }

    fn order_feasts(&self) -> Result<Vec<FeastDay>> {
        self.query_feasts(
            &format!("SELECT {} FROM feast_days WHERE is_dominican = 1 ORDER BY date ASC, rowid ASC", FEAST_COLUMNS),
            [],
        )
    }

    fn saint_by_id(&self, id: &str) -> Result<Option<Saint>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM saints WHERE id = ?1", SAINT_COLUMNS),
                [id],
                saint_row,
            )
            .optional()?;
        row.map(Saint::try_from).transpose()
    }

    fn saints_by_month_day(&self, key: MonthDay) -> Result<Vec<Saint>> {
        self.query_saints(
            &format!("SELECT {} FROM saints WHERE feast_day = ?1 ORDER BY name ASC", SAINT_COLUMNS),
            [key.to_string()],
        )
    }

    fn search_saints(&self, query: &str) -> Result<Vec<Saint>> {
        self.query_saints(
            &format!(
                "SELECT {} FROM saints WHERE fold_case(name) LIKE fold_case(?1) ESCAPE '\\' ORDER BY name ASC",
                SAINT_COLUMNS
            ),
            [like_pattern(query)],
        )
    }

    fn all_saints(&self) -> Result<Vec<Saint>> {
        self.query_saints(&format!("SELECT {} FROM saints ORDER BY name ASC", SAINT_COLUMNS), [])
    }

    fn order_saints(&self) -> Result<Vec<Saint>> {
        self.query_saints(
            &format!("SELECT {} FROM saints WHERE is_dominican = 1 ORDER BY name ASC", SAINT_COLUMNS),
            [],
        )
    }
}
