// 🕯️ Fixed Feasts & Saints
// Static reference data keyed by month-day, plus the color precedence rule.
//
// A fixed feast is keyed "MM-DD" and recurs every year on that key.
// Several saints may share a key; at most one FeastDay is looked up per key.

use crate::color::LiturgicalColor;
use crate::error::{CalendarError, Result};
use crate::provider::FeastProvider;
use crate::season::LiturgicalSeason;
use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// MONTH-DAY KEY
// ============================================================================

/// Year-independent "MM-DD" key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub const FIRST: MonthDay = MonthDay { month: 1, day: 1 };

    pub fn new(month: u32, day: u32) -> Result<Self> {
        // Leap year so 02-29 is a valid key
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(CalendarError::invalid(format!(
                "{:02}-{:02} is not a calendar day",
                month, day
            )));
        }
        Ok(MonthDay { month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthDay {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// This key in a given year (None for 02-29 outside leap years)
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || CalendarError::invalid(format!("expected MM-DD, got {:?}", s));
        let (m, d) = s.trim().split_once('-').ok_or_else(bad)?;
        if m.len() != 2 || d.len() != 2 {
            return Err(bad());
        }
        let month = m.parse::<u32>().map_err(|_| bad())?;
        let day = d.parse::<u32>().map_err(|_| bad())?;
        MonthDay::new(month, day)
    }
}

impl TryFrom<String> for MonthDay {
    type Error = CalendarError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MonthDay> for String {
    fn from(key: MonthDay) -> String {
        key.to_string()
    }
}

// ============================================================================
// FEAST TYPE & RANK
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeastType {
    Solemnity,
    Feast,
    Memorial,
    OptionalMemorial,
    Commemoration,
}

impl FeastType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeastType::Solemnity => "SOLEMNITY",
            FeastType::Feast => "FEAST",
            FeastType::Memorial => "MEMORIAL",
            FeastType::OptionalMemorial => "OPTIONAL_MEMORIAL",
            FeastType::Commemoration => "COMMEMORATION",
        }
    }
}

impl FromStr for FeastType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOLEMNITY" => Ok(FeastType::Solemnity),
            "FEAST" => Ok(FeastType::Feast),
            "MEMORIAL" => Ok(FeastType::Memorial),
            "OPTIONAL_MEMORIAL" => Ok(FeastType::OptionalMemorial),
            "COMMEMORATION" => Ok(FeastType::Commemoration),
            _ => Err(CalendarError::record(format!("unknown feast type: {:?}", s))),
        }
    }
}

/// Precedence rank. Carried with the feast; resolution ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeastRank {
    HigherRank,
    HighRank,
    MediumRank,
    LowRank,
}

impl FeastRank {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeastRank::HigherRank => "HIGHER_RANK",
            FeastRank::HighRank => "HIGH_RANK",
            FeastRank::MediumRank => "MEDIUM_RANK",
            FeastRank::LowRank => "LOW_RANK",
        }
    }
}

impl FromStr for FeastRank {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGHER_RANK" => Ok(FeastRank::HigherRank),
            "HIGH_RANK" => Ok(FeastRank::HighRank),
            "MEDIUM_RANK" => Ok(FeastRank::MediumRank),
            "LOW_RANK" => Ok(FeastRank::LowRank),
            _ => Err(CalendarError::record(format!("unknown feast rank: {:?}", s))),
        }
    }
}

// ============================================================================
// SAINT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saint {
    pub id: String,
    pub name: String,
    pub feast_day: MonthDay,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub canonization_year: Option<i32>,
    pub description: String,
    pub biography: String,
    pub patronage: Vec<String>,

    /// Belongs to the order the app serves
    pub is_order: bool,
    pub religious_order: Option<String>,
    pub province: Option<String>,
    pub image_url: Option<String>,
}

impl Saint {
    /// Saint with only the required fields filled
    pub fn new(id: &str, name: &str, feast_day: MonthDay) -> Self {
        Saint {
            id: id.to_string(),
            name: name.to_string(),
            feast_day,
            birth_year: None,
            death_year: None,
            canonization_year: None,
            description: String::new(),
            biography: String::new(),
            patronage: Vec::new(),
            is_order: false,
            religious_order: None,
            province: None,
            image_url: None,
        }
    }

    pub fn with_order(mut self, religious_order: &str) -> Self {
        self.is_order = true;
        self.religious_order = Some(religious_order.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_patronage(mut self, patronage: &[&str]) -> Self {
        self.patronage = patronage.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_years(mut self, birth: Option<i32>, death: Option<i32>, canonization: Option<i32>) -> Self {
        self.birth_year = birth;
        self.death_year = death;
        self.canonization_year = canonization;
        self
    }

    /// Case-insensitive substring match on the name
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

// ============================================================================
// FEAST DAY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeastDay {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub feast_type: FeastType,
    pub rank: FeastRank,
    pub date: MonthDay,
    pub description: String,

    /// Overrides the season color when set
    pub liturgical_color: Option<LiturgicalColor>,
    pub is_order: bool,
    pub saint_id: Option<String>,

    /// Attached by `resolve_feast`, never stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saint: Option<Saint>,
}

impl FeastDay {
    pub fn new(id: &str, name: &str, feast_type: FeastType, rank: FeastRank, date: MonthDay) -> Self {
        FeastDay {
            id: id.to_string(),
            name: name.to_string(),
            feast_type,
            rank,
            date,
            description: String::new(),
            liturgical_color: None,
            is_order: false,
            saint_id: None,
            saint: None,
        }
    }

    pub fn with_color(mut self, color: LiturgicalColor) -> Self {
        self.liturgical_color = Some(color);
        self
    }

    pub fn with_saint(mut self, saint_id: &str) -> Self {
        self.saint_id = Some(saint_id.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn order_feast(mut self) -> Self {
        self.is_order = true;
        self
    }
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Fixed feast for the date's month-day, with its saint attached
pub fn resolve_feast<P: FeastProvider + ?Sized>(provider: &P, date: NaiveDate) -> Result<Option<FeastDay>> {
    let key = MonthDay::from_date(date);
    let Some(mut feast) = provider.feast_by_month_day(key)? else {
        return Ok(None);
    };

    if let Some(saint_id) = feast.saint_id.clone() {
        feast.saint = provider.saint_by_id(&saint_id)?;
        if feast.saint.is_none() {
            debug!("feast {} references missing saint {}", feast.id, saint_id);
        }
    }

    Ok(Some(feast))
}

/// Feast color wins when set, otherwise the season's
pub fn resolve_color(season: &LiturgicalSeason, feast: Option<&FeastDay>) -> LiturgicalColor {
    feast
        .and_then(|f| f.liturgical_color)
        .unwrap_or(season.color)
}

// ============================================================================
// TESTS
// ============================================================================
