// 🗓️ Season Resolver
// Splits one civil year into the six liturgical seasons and finds the one
// holding a given date.
//
// Boundaries for civil year Y (E = Easter, AW = Ash Wednesday, P = Pentecost):
//   Advent           Dec 1  .. Dec 24
//   Christmastide    Dec 25 .. Jan 5   (wraps the year end)
//   Ordinary Time I  Jan 6  .. AW - 1
//   Lent             AW     .. E - 1
//   Eastertide       E      .. P - 1
//   Ordinary Time II P      .. Nov 30

use crate::color::LiturgicalColor;
use crate::error::{CalendarError, Result};
use crate::movable::{check_year, MovableFeasts};
use chrono::{Datelike, Duration, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Dates that fell through every season range (should stay at zero)
static SEASON_GAPS: AtomicU64 = AtomicU64::new(0);

pub fn season_gap_count() -> u64 {
    SEASON_GAPS.load(Ordering::Relaxed)
}

// ============================================================================
// SEASON ID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonId {
    #[serde(rename = "advent")]
    Advent,
    #[serde(rename = "christmas")]
    Christmastide,
    #[serde(rename = "ordinary_time_1")]
    OrdinaryTimeI,
    #[serde(rename = "lent")]
    Lent,
    #[serde(rename = "easter")]
    Eastertide,
    #[serde(rename = "ordinary_time_2")]
    OrdinaryTimeII,
}

impl SeasonId {
    /// Resolution priority order
    pub const ALL: [SeasonId; 6] = [
        SeasonId::Advent,
        SeasonId::Christmastide,
        SeasonId::OrdinaryTimeI,
        SeasonId::Lent,
        SeasonId::Eastertide,
        SeasonId::OrdinaryTimeII,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonId::Advent => "advent",
            SeasonId::Christmastide => "christmas",
            SeasonId::OrdinaryTimeI => "ordinary_time_1",
            SeasonId::Lent => "lent",
            SeasonId::Eastertide => "easter",
            SeasonId::OrdinaryTimeII => "ordinary_time_2",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SeasonId::Advent => "Advent",
            SeasonId::Christmastide => "Christmas",
            SeasonId::OrdinaryTimeI | SeasonId::OrdinaryTimeII => "Ordinary Time",
            SeasonId::Lent => "Lent",
            SeasonId::Eastertide => "Easter",
        }
    }

    pub fn color(&self) -> LiturgicalColor {
        match self {
            SeasonId::Advent => LiturgicalColor::Purple,
            SeasonId::Christmastide | SeasonId::Eastertide => LiturgicalColor::White,
            SeasonId::OrdinaryTimeI | SeasonId::OrdinaryTimeII => LiturgicalColor::Green,
            SeasonId::Lent => LiturgicalColor::Violet,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SeasonId::Advent => "A time of preparation for the coming of Christ",
            SeasonId::Christmastide => "Celebration of the birth of Jesus Christ",
            SeasonId::OrdinaryTimeI => "The first period of Ordinary Time",
            SeasonId::Lent => "A time of penance and preparation for Easter",
            SeasonId::Eastertide => "Celebration of the Resurrection of Christ",
            SeasonId::OrdinaryTimeII => "The second period of Ordinary Time",
        }
    }
}

// ============================================================================
// LITURGICAL SEASON
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiturgicalSeason {
    pub id: SeasonId,
    pub name: String,
    pub color: LiturgicalColor,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
}

impl LiturgicalSeason {
    pub fn new(id: SeasonId, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        LiturgicalSeason {
            id,
            name: id.name().to_string(),
            color: id.color(),
            start_date,
            end_date,
            description: id.description().to_string(),
        }
    }

    /// Inclusive range test; only meaningful for non-wrapping seasons
    pub fn spans(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of days in the season
    pub fn length_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

// ============================================================================
// SEASON TABLE
// ============================================================================

/// The six seasons of one civil year, movable boundaries resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonTable {
    year: i32,
    movable: MovableFeasts,
    seasons: [LiturgicalSeason; 6],
}

impl SeasonTable {
    pub fn for_year(year: i32) -> Result<Self> {
        check_year(year)?;
        let movable = MovableFeasts::for_year(year)?;
        let ash_wednesday = movable.ash_wednesday();
        let easter = movable.easter;
        let pentecost = movable.pentecost();
        let one_day = Duration::days(1);

        let seasons = [
            LiturgicalSeason::new(SeasonId::Advent, ymd(year, 12, 1)?, ymd(year, 12, 24)?),
            christmastide_starting(year)?,
            LiturgicalSeason::new(SeasonId::OrdinaryTimeI, ymd(year, 1, 6)?, ash_wednesday - one_day),
            LiturgicalSeason::new(SeasonId::Lent, ash_wednesday, easter - one_day),
            LiturgicalSeason::new(SeasonId::Eastertide, easter, pentecost - one_day),
            LiturgicalSeason::new(SeasonId::OrdinaryTimeII, pentecost, ymd(year, 11, 30)?),
        ];

        Ok(SeasonTable {
            year,
            movable,
            seasons,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn movable_feasts(&self) -> &MovableFeasts {
        &self.movable
    }

    /// Seasons in resolution priority order
    pub fn seasons(&self) -> &[LiturgicalSeason] {
        &self.seasons
    }

    pub fn get(&self, id: SeasonId) -> &LiturgicalSeason {
        let idx = SeasonId::ALL
            .iter()
            .position(|s| *s == id)
            .unwrap_or_default();
        &self.seasons[idx]
    }

    /// First season (priority order) whose inclusive range holds `date`.
    /// Dates from another civil year never match.
    pub fn find(&self, date: NaiveDate) -> Option<LiturgicalSeason> {
        if date.year() != self.year {
            return None;
        }

        for season in &self.seasons {
            if season.id == SeasonId::Christmastide {
                // Disjoint halves: the tail of this year or the head carried over
                if date >= season.start_date {
                    return Some(season.clone());
                }
                if (date.month(), date.day()) <= (1, 5) {
                    return christmastide_starting(self.year - 1).ok();
                }
            } else if season.spans(date) {
                return Some(season.clone());
            }
        }

        None
    }

    /// `find`, falling back to Ordinary Time I and recording the gap
    pub fn resolve(&self, date: NaiveDate) -> LiturgicalSeason {
        match self.find(date) {
            Some(season) => season,
            None => {
                SEASON_GAPS.fetch_add(1, Ordering::Relaxed);
                warn!(
                    "{}; defaulting to Ordinary Time (table year {})",
                    CalendarError::SeasonResolutionGap { date },
                    self.year
                );
                self.get(SeasonId::OrdinaryTimeI).clone()
            }
        }
    }
}

/// Season for a date, computed against the date's own civil year
pub fn resolve_season(date: NaiveDate) -> Result<LiturgicalSeason> {
    Ok(SeasonTable::for_year(date.year())?.resolve(date))
}

fn christmastide_starting(year: i32) -> Result<LiturgicalSeason> {
    Ok(LiturgicalSeason::new(
        SeasonId::Christmastide,
        ymd(year, 12, 25)?,
        ymd(year + 1, 1, 5)?,
    ))
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CalendarError::invalid(format!("{}-{:02}-{:02} is not a date", year, month, day)))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn season_of(d: NaiveDate) -> SeasonId {
        resolve_season(d).unwrap().id
    }

    #[test]
    fn test_boundaries_2025() {
        assert_eq!(season_of(date(2025, 1, 5)), SeasonId::Christmastide);
        assert_eq!(season_of(date(2025, 1, 6)), SeasonId::OrdinaryTimeI);
        assert_eq!(season_of(date(2025, 3, 4)), SeasonId::OrdinaryTimeI);
        assert_eq!(season_of(date(2025, 3, 5)), SeasonId::Lent);
        assert_eq!(season_of(date(2025, 4, 19)), SeasonId::Lent);
        assert_eq!(season_of(date(2025, 4, 20)), SeasonId::Eastertide);
        assert_eq!(season_of(date(2025, 6, 7)), SeasonId::Eastertide);
        assert_eq!(season_of(date(2025, 6, 8)), SeasonId::OrdinaryTimeII);
        assert_eq!(season_of(date(2025, 11, 30)), SeasonId::OrdinaryTimeII);
        assert_eq!(season_of(date(2025, 12, 1)), SeasonId::Advent);
        assert_eq!(season_of(date(2025, 12, 24)), SeasonId::Advent);
        assert_eq!(season_of(date(2025, 12, 25)), SeasonId::Christmastide);
        assert_eq!(season_of(date(2025, 12, 31)), SeasonId::Christmastide);
    }

    #[test]
    fn test_christmastide_range_matches_query_side_of_year_end() {
        let early = resolve_season(date(2025, 1, 2)).unwrap();
        assert_eq!(early.start_date, date(2024, 12, 25));
        assert_eq!(early.end_date, date(2025, 1, 5));

        let late = resolve_season(date(2025, 12, 28)).unwrap();
        assert_eq!(late.start_date, date(2025, 12, 25));
        assert_eq!(late.end_date, date(2026, 1, 5));
    }

    #[test]
    fn test_full_year_walk_is_contiguous_partition() {
        let expected = [
            SeasonId::Christmastide,
            SeasonId::OrdinaryTimeI,
            SeasonId::Lent,
            SeasonId::Eastertide,
            SeasonId::OrdinaryTimeII,
            SeasonId::Advent,
            SeasonId::Christmastide,
        ];

        for year in [1583, 1900, 2000, 2008, 2011, 2024, 2025, 2038, 2285, 9999] {
            let table = SeasonTable::for_year(year).unwrap();
            let mut runs: Vec<SeasonId> = Vec::new();
            let mut day = date(year, 1, 1);
            let mut count = 0;

            while day.year() == year {
                let season = table.find(day).expect("every date has a season");
                assert!(season.start_date <= day && day <= season.end_date);
                if runs.last() != Some(&season.id) {
                    runs.push(season.id);
                }
                count += 1;
                day = match day.succ_opt() {
                    Some(next) => next,
                    None => break,
                };
            }

            assert_eq!(runs, expected, "season order for {}", year);
            let days_in_year = if date(year, 12, 31).ordinal() == 366 { 366 } else { 365 };
            assert_eq!(count, days_in_year);
        }
    }

    #[test]
    fn test_table_ranges_do_not_overlap() {
        let table = SeasonTable::for_year(2024).unwrap();
        let linear: Vec<&LiturgicalSeason> = table
            .seasons()
            .iter()
            .filter(|s| s.id != SeasonId::Christmastide)
            .collect();
        for (i, a) in linear.iter().enumerate() {
            for b in linear.iter().skip(i + 1) {
                assert!(a.end_date < b.start_date || b.end_date < a.start_date);
            }
        }
        let total: i64 = linear.iter().map(|s| s.length_days()).sum();
        // 2024 is a leap year: 366 days minus Dec 25 .. Dec 31 and Jan 1 .. Jan 5
        assert_eq!(total, 366 - 7 - 5);
    }

    #[test]
    fn test_gap_falls_back_to_ordinary_time_one() {
        let table = SeasonTable::for_year(2025).unwrap();
        let before = season_gap_count();
        let season = table.resolve(date(2031, 7, 1));
        assert_eq!(season.id, SeasonId::OrdinaryTimeI);
        assert!(season_gap_count() > before);
    }

    #[test]
    fn test_season_colors() {
        let table = SeasonTable::for_year(2025).unwrap();
        assert_eq!(table.get(SeasonId::Advent).color, LiturgicalColor::Purple);
        assert_eq!(table.get(SeasonId::Lent).color, LiturgicalColor::Violet);
        assert_eq!(table.get(SeasonId::Eastertide).color, LiturgicalColor::White);
        assert_eq!(table.get(SeasonId::OrdinaryTimeII).color, LiturgicalColor::Green);
    }

    #[test]
    fn test_pre_gregorian_rejected() {
        assert!(matches!(
            resolve_season(date(1500, 6, 1)),
            Err(CalendarError::InvalidDateInput(_))
        ));
    }
}
