// 📅 Liturgical Calendar - query facade
// Combines movable feasts, season resolution and fixed-feast lookup into
// one LiturgicalDate per civil date, plus the listing queries the app uses.

use crate::color::LiturgicalColor;
use crate::config::CalendarConfig;
use crate::error::{CalendarError, Result};
use crate::feast::{resolve_color, resolve_feast, FeastDay, MonthDay, Saint};
use crate::movable::{check_year, MovableFeast, MovableFeasts};
use crate::provider::FeastProvider;
use crate::season::{LiturgicalSeason, SeasonTable};
use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::iter::successors;

// ============================================================================
// LITURGICAL DATE
// ============================================================================

/// Classification of one civil date. Built fresh per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiturgicalDate {
    pub date: NaiveDate,

    /// English weekday name ("Sunday")
    pub day_of_week: String,
    pub season: LiturgicalSeason,

    /// Feast color if the feast sets one, else the season color
    pub color: LiturgicalColor,
    pub feast_day: Option<FeastDay>,

    /// The resolved feast is order-affiliated
    pub is_order_feast: bool,
    pub is_movable_feast: bool,

    /// Which movable feast, when is_movable_feast
    pub movable_feast: Option<MovableFeast>,
}

impl LiturgicalDate {
    /// Feast name, else movable feast name, else season name
    pub fn title(&self) -> &str {
        if let Some(feast) = &self.feast_day {
            return &feast.name;
        }
        if let Some(movable) = self.movable_feast {
            return movable.name();
        }
        &self.season.name
    }
}

// ============================================================================
// CALENDAR
// ============================================================================

pub struct LiturgicalCalendar<P> {
    provider: P,
    max_range_days: i64,
    upcoming_limit: usize,
    wrap_upcoming: bool,
}

impl<P: FeastProvider> LiturgicalCalendar<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, &CalendarConfig::default())
    }

    pub fn with_config(provider: P, config: &CalendarConfig) -> Self {
        LiturgicalCalendar {
            provider,
            max_range_days: config.max_range_days,
            upcoming_limit: config.upcoming_limit,
            wrap_upcoming: config.wrap_upcoming_feasts,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn default_upcoming_limit(&self) -> usize {
        self.upcoming_limit
    }

    // ========================================================================
    // CLASSIFICATION
    // ========================================================================

    pub fn get_liturgical_date(&self, date: NaiveDate) -> Result<LiturgicalDate> {
        let table = SeasonTable::for_year(date.year())?;
        let season = table.resolve(date);
        let movable_feast = table.movable_feasts().feast_on(date);
        let feast_day = resolve_feast(&self.provider, date)?;
        let color = resolve_color(&season, feast_day.as_ref());
        let is_order_feast = feast_day.as_ref().is_some_and(|f| f.is_order);

        Ok(LiturgicalDate {
            date,
            day_of_week: date.format("%A").to_string(),
            season,
            color,
            feast_day,
            is_order_feast,
            is_movable_feast: movable_feast.is_some(),
            movable_feast,
        })
    }

    /// One entry per day, `start` and `end` included, ascending
    pub fn get_liturgical_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<LiturgicalDate>> {
        if start > end {
            return Err(CalendarError::invalid(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        check_year(start.year())?;
        check_year(end.year())?;

        let span = (end - start).num_days() + 1;
        if span > self.max_range_days {
            return Err(CalendarError::invalid(format!(
                "range of {} days exceeds limit of {}",
                span, self.max_range_days
            )));
        }
        debug!("expanding {} .. {} ({} days)", start, end, span);

        successors(Some(start), |day| day.succ_opt())
            .take_while(|day| *day <= end)
            .map(|day| self.get_liturgical_date(day))
            .collect()
    }

    pub fn get_today_liturgical_date(&self) -> Result<LiturgicalDate> {
        self.get_liturgical_date(today())
    }

    // ========================================================================
    // LISTINGS
    // ========================================================================

    /// Saints whose feast day falls on this month-day, by name
    pub fn get_saints_for_date(&self, date: NaiveDate) -> Result<Vec<Saint>> {
        self.provider.saints_by_month_day(MonthDay::from_date(date))
    }

    /// Fixed feasts from `today`'s month-day onward, ascending, at most `limit`.
    ///
    /// Without wraparound, feasts earlier in the calendar year are left out
    /// even though they recur next year.
    pub fn get_upcoming_feast_days_from(&self, today: NaiveDate, limit: usize) -> Result<Vec<FeastDay>> {
        let key = MonthDay::from_date(today);
        let mut feasts = self.provider.feasts_from(key, limit)?;

        if self.wrap_upcoming && feasts.len() < limit {
            let remaining = limit - feasts.len();
            feasts.extend(self.provider.feasts_before(key, remaining)?);
        }

        Ok(feasts)
    }

    pub fn get_upcoming_feast_days(&self, limit: usize) -> Result<Vec<FeastDay>> {
        self.get_upcoming_feast_days_from(today(), limit)
    }

    pub fn get_order_feast_days(&self) -> Result<Vec<FeastDay>> {
        self.provider.order_feasts()
    }

    pub fn search_saints(&self, query: &str) -> Result<Vec<Saint>> {
        self.provider.search_saints(query)
    }

    pub fn get_all_saints(&self) -> Result<Vec<Saint>> {
        self.provider.all_saints()
    }

    pub fn get_order_saints(&self) -> Result<Vec<Saint>> {
        self.provider.order_saints()
    }

    // ========================================================================
    // YEAR VIEWS
    // ========================================================================

    pub fn movable_feasts(&self, year: i32) -> Result<MovableFeasts> {
        MovableFeasts::for_year(year)
    }

    pub fn season_table(&self, year: i32) -> Result<SeasonTable> {
        SeasonTable::for_year(year)
    }
}

/// Local civil date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feast::{FeastRank, FeastType};
    use crate::provider::InMemoryProvider;
    use crate::season::SeasonId;

    fn key(s: &str) -> MonthDay {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn provider() -> InMemoryProvider {
        InMemoryProvider::with_data(
            vec![
                FeastDay::new("f-holy-name", "Most Holy Name of Jesus", FeastType::OptionalMemorial, FeastRank::LowRank, key("01-03")),
                FeastDay::new("f-aquinas", "St. Thomas Aquinas", FeastType::Memorial, FeastRank::MediumRank, key("01-28"))
                    .with_saint("s-aquinas")
                    .order_feast(),
                FeastDay::new("f-joseph", "St. Joseph", FeastType::Solemnity, FeastRank::HigherRank, key("03-19"))
                    .with_color(LiturgicalColor::White),
                FeastDay::new("f-dominic", "St. Dominic", FeastType::Feast, FeastRank::HighRank, key("08-08"))
                    .with_color(LiturgicalColor::White)
                    .order_feast(),
                FeastDay::new("f-stephen", "St. Stephen", FeastType::Feast, FeastRank::HighRank, key("12-26"))
                    .with_color(LiturgicalColor::Red),
            ],
            vec![
                Saint::new("s-aquinas", "St. Thomas Aquinas", key("01-28")).with_order("Order of Preachers"),
                Saint::new("s-dominic", "St. Dominic", key("08-08")).with_order("Order of Preachers"),
                Saint::new("s-altman", "St. Altman", key("08-08")),
            ],
        )
        .unwrap()
    }

    fn calendar() -> LiturgicalCalendar<InMemoryProvider> {
        LiturgicalCalendar::new(provider())
    }

    #[test]
    fn test_plain_day_takes_season_color() {
        let day = calendar().get_liturgical_date(date(2025, 7, 15)).unwrap();
        assert_eq!(day.season.id, SeasonId::OrdinaryTimeII);
        assert_eq!(day.color, LiturgicalColor::Green);
        assert!(day.feast_day.is_none());
        assert!(!day.is_order_feast);
        assert!(!day.is_movable_feast);
        assert_eq!(day.day_of_week, "Tuesday");
        assert_eq!(day.title(), "Ordinary Time");
    }

    #[test]
    fn test_feast_color_overrides_lent() {
        let day = calendar().get_liturgical_date(date(2025, 3, 19)).unwrap();
        assert_eq!(day.season.id, SeasonId::Lent);
        assert_eq!(day.color, LiturgicalColor::White);
        assert_eq!(day.title(), "St. Joseph");
    }

    #[test]
    fn test_order_feast_with_saint() {
        let day = calendar().get_liturgical_date(date(2025, 1, 28)).unwrap();
        assert!(day.is_order_feast);
        let feast = day.feast_day.unwrap();
        assert_eq!(feast.saint.unwrap().id, "s-aquinas");
        // No feast color: season color stands
        assert_eq!(day.color, LiturgicalColor::Green);
    }

    #[test]
    fn test_movable_feast_flagged() {
        let day = calendar().get_liturgical_date(date(2024, 3, 31)).unwrap();
        assert!(day.is_movable_feast);
        assert_eq!(day.movable_feast, Some(MovableFeast::EasterSunday));
        assert_eq!(day.season.id, SeasonId::Eastertide);
        assert_eq!(day.day_of_week, "Sunday");
        assert_eq!(day.title(), "Easter Sunday");
    }

    #[test]
    fn test_range_is_inclusive_and_ordered() {
        let cal = calendar();
        let days = cal.get_liturgical_dates(date(2024, 12, 20), date(2025, 1, 10)).unwrap();
        assert_eq!(days.len(), 22);
        assert_eq!(days.first().unwrap().date, date(2024, 12, 20));
        assert_eq!(days.last().unwrap().date, date(2025, 1, 10));
        assert!(days.windows(2).all(|w| w[0].date.succ_opt() == Some(w[1].date)));

        let stephen = days.iter().find(|d| d.date == date(2024, 12, 26)).unwrap();
        assert_eq!(stephen.color, LiturgicalColor::Red);
        assert_eq!(stephen.season.id, SeasonId::Christmastide);
    }

    #[test]
    fn test_single_day_range_matches_point_query() {
        let cal = calendar();
        let d = date(2025, 8, 8);
        let days = cal.get_liturgical_dates(d, d).unwrap();
        assert_eq!(days, vec![cal.get_liturgical_date(d).unwrap()]);
    }

    #[test]
    fn test_reversed_and_oversized_ranges_rejected() {
        let cal = calendar();
        assert!(matches!(
            cal.get_liturgical_dates(date(2025, 2, 1), date(2025, 1, 1)),
            Err(CalendarError::InvalidDateInput(_))
        ));

        let tight = LiturgicalCalendar::with_config(
            provider(),
            &CalendarConfig {
                max_range_days: 7,
                ..CalendarConfig::default()
            },
        );
        assert!(tight.get_liturgical_dates(date(2025, 1, 1), date(2025, 1, 7)).is_ok());
        assert!(tight.get_liturgical_dates(date(2025, 1, 1), date(2025, 1, 8)).is_err());
    }

    #[test]
    fn test_pre_gregorian_date_rejected() {
        assert!(matches!(
            calendar().get_liturgical_date(date(1492, 10, 12)),
            Err(CalendarError::InvalidDateInput(_))
        ));
    }

    #[test]
    fn test_upcoming_without_wrap() {
        let cal = calendar();
        let ids: Vec<String> = cal
            .get_upcoming_feast_days_from(date(2025, 8, 1), 10)
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["f-dominic", "f-stephen"]);

        let limited = cal.get_upcoming_feast_days_from(date(2025, 1, 1), 2).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, "f-holy-name");

        // Today's own feast counts as upcoming
        let on_day = cal.get_upcoming_feast_days_from(date(2025, 8, 8), 1).unwrap();
        assert_eq!(on_day[0].id, "f-dominic");
    }

    #[test]
    fn test_upcoming_with_wrap() {
        let cal = LiturgicalCalendar::with_config(
            provider(),
            &CalendarConfig {
                wrap_upcoming_feasts: true,
                ..CalendarConfig::default()
            },
        );
        let ids: Vec<String> = cal
            .get_upcoming_feast_days_from(date(2025, 12, 1), 3)
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["f-stephen", "f-holy-name", "f-aquinas"]);
    }

    #[test]
    fn test_saints_for_date_sorted() {
        let names: Vec<String> = calendar()
            .get_saints_for_date(date(2030, 8, 8))
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["St. Altman", "St. Dominic"]);
        assert!(calendar().get_saints_for_date(date(2030, 8, 9)).unwrap().is_empty());
    }

    #[test]
    fn test_order_listings() {
        let cal = calendar();
        let feasts: Vec<String> = cal.get_order_feast_days().unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(feasts, vec!["f-aquinas", "f-dominic"]);
        assert_eq!(cal.get_order_saints().unwrap().len(), 2);
        assert_eq!(cal.get_all_saints().unwrap().len(), 3);
    }

    #[test]
    fn test_search_ignores_case() {
        let cal = calendar();
        assert_eq!(cal.search_saints("aquinas").unwrap(), cal.search_saints("AQUINAS").unwrap());
        assert_eq!(cal.search_saints("aquinas").unwrap().len(), 1);
    }
}
