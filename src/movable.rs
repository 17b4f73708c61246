// ✝️ Movable Feasts - Easter and everything hung off it
//
// Easter Sunday comes from the anonymous Gregorian algorithm
// (Meeus/Jones/Butcher): golden number for the 19-year epact cycle,
// century corrections for the solar and lunar equations, then the
// Sunday after the Paschal full moon.
//
// Every other movable feast is a fixed day offset from Easter.

use crate::error::{CalendarError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// First year of the Gregorian calendar
pub const MIN_YEAR: i32 = 1583;

/// Last year with a four-digit ISO representation
pub const MAX_YEAR: i32 = 9999;

/// Reject years the Gregorian computus does not cover
pub fn check_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::invalid(format!(
            "year {} outside supported range {}..={}",
            year, MIN_YEAR, MAX_YEAR
        )))
    }
}

// ============================================================================
// EASTER
// ============================================================================

/// Date of Easter Sunday in the Gregorian calendar
pub fn compute_easter(year: i32) -> Result<NaiveDate> {
    check_year(year)?;

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    // month is always 3 or 4, day 1..=31
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .ok_or_else(|| CalendarError::invalid(format!("no Easter date for {}", year)))
}

// ============================================================================
// MOVABLE FEAST
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovableFeast {
    AshWednesday,
    PalmSunday,
    EasterSunday,
    DivineMercySunday,
    Ascension,
    Pentecost,
    CorpusChristi,
}

impl MovableFeast {
    /// Calendar order
    pub const ALL: [MovableFeast; 7] = [
        MovableFeast::AshWednesday,
        MovableFeast::PalmSunday,
        MovableFeast::EasterSunday,
        MovableFeast::DivineMercySunday,
        MovableFeast::Ascension,
        MovableFeast::Pentecost,
        MovableFeast::CorpusChristi,
    ];

    /// Days from Easter Sunday
    pub fn offset_days(&self) -> i64 {
        match self {
            MovableFeast::AshWednesday => -46,
            MovableFeast::PalmSunday => -7,
            MovableFeast::EasterSunday => 0,
            MovableFeast::DivineMercySunday => 7,
            MovableFeast::Ascension => 40,
            MovableFeast::Pentecost => 49,
            MovableFeast::CorpusChristi => 60,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MovableFeast::AshWednesday => "Ash Wednesday",
            MovableFeast::PalmSunday => "Palm Sunday",
            MovableFeast::EasterSunday => "Easter Sunday",
            MovableFeast::DivineMercySunday => "Divine Mercy Sunday",
            MovableFeast::Ascension => "Ascension",
            MovableFeast::Pentecost => "Pentecost",
            MovableFeast::CorpusChristi => "Corpus Christi",
        }
    }

    pub fn date_from_easter(&self, easter: NaiveDate) -> NaiveDate {
        easter + Duration::days(self.offset_days())
    }
}

// ============================================================================
// MOVABLE FEASTS FOR A YEAR
// ============================================================================

/// All movable feast dates of one civil year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovableFeasts {
    pub year: i32,
    pub easter: NaiveDate,
}

impl MovableFeasts {
    pub fn for_year(year: i32) -> Result<Self> {
        Ok(MovableFeasts {
            year,
            easter: compute_easter(year)?,
        })
    }

    pub fn date_of(&self, feast: MovableFeast) -> NaiveDate {
        feast.date_from_easter(self.easter)
    }

    pub fn ash_wednesday(&self) -> NaiveDate {
        self.date_of(MovableFeast::AshWednesday)
    }

    pub fn pentecost(&self) -> NaiveDate {
        self.date_of(MovableFeast::Pentecost)
    }

    /// Movable feast falling on `date`, if any
    pub fn feast_on(&self, date: NaiveDate) -> Option<MovableFeast> {
        MovableFeast::ALL
            .into_iter()
            .find(|feast| self.date_of(*feast) == date)
    }

    /// (feast, date) pairs in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (MovableFeast, NaiveDate)> + '_ {
        MovableFeast::ALL
            .into_iter()
            .map(move |feast| (feast, self.date_of(feast)))
    }
}

/// Movable feast on this date, computed against the date's own year
pub fn movable_feast_on(date: NaiveDate) -> Result<Option<MovableFeast>> {
    Ok(MovableFeasts::for_year(date.year())?.feast_on(date))
}

pub fn is_movable_feast(date: NaiveDate) -> Result<bool> {
    Ok(movable_feast_on(date)?.is_some())
}

// ============================================================================
// TESTS
// ============================================================================
