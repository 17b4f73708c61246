// 📚 Feast/Saint Data Provider
// The engine never touches storage directly; it asks a FeastProvider.
//
// Two implementations:
// - InMemoryProvider (this file): registry held in memory, used for
//   fixtures and embedding
// - SqliteProvider (db.rs): the app's local SQLite store

use crate::error::{CalendarError, Result};
use crate::feast::{FeastDay, MonthDay, Saint};
use std::sync::{Arc, RwLock};

// ============================================================================
// PROVIDER TRAIT
// ============================================================================

/// Point and prefix queries the calendar engine needs. Read-only.
pub trait FeastProvider {
    /// Fixed feast keyed to this month-day (first one if several)
    fn feast_by_month_day(&self, key: MonthDay) -> Result<Option<FeastDay>>;

    /// Feasts with key >= `key`, ascending, at most `limit`
    fn feasts_from(&self, key: MonthDay, limit: usize) -> Result<Vec<FeastDay>>;

    /// Feasts with key < `key`, ascending, at most `limit`
    fn feasts_before(&self, key: MonthDay, limit: usize) -> Result<Vec<FeastDay>>;

    /// Order-affiliated feasts, ascending by key
    fn order_feasts(&self) -> Result<Vec<FeastDay>>;

    fn saint_by_id(&self, id: &str) -> Result<Option<Saint>>;

    /// Saints sharing this feast-day key, by name
    fn saints_by_month_day(&self, key: MonthDay) -> Result<Vec<Saint>>;

    /// Case-insensitive substring match on name, by name
    fn search_saints(&self, query: &str) -> Result<Vec<Saint>>;

    /// Every saint, by name
    fn all_saints(&self) -> Result<Vec<Saint>>;

    /// Order-affiliated saints, by name
    fn order_saints(&self) -> Result<Vec<Saint>>;
}

impl<P: FeastProvider + ?Sized> FeastProvider for &P {
    fn feast_by_month_day(&self, key: MonthDay) -> Result<Option<FeastDay>> {
        (**self).feast_by_month_day(key)
    }

    fn feasts_from(&self, key: MonthDay, limit: usize) -> Result<Vec<FeastDay>> {
        (**self).feasts_from(key, limit)
    }

    fn feasts_before(&self, key: MonthDay, limit: usize) -> Result<Vec<FeastDay>> {
        (**self).feasts_before(key, limit)
    }

    fn order_feasts(&self) -> Result<Vec<FeastDay>> {
        (**self).order_feasts()
    }

    fn saint_by_id(&self, id: &str) -> Result<Option<Saint>> {
        (**self).saint_by_id(id)
    }

    fn saints_by_month_day(&self, key: MonthDay) -> Result<Vec<Saint>> {
        (**self).saints_by_month_day(key)
    }

    fn search_saints(&self, query: &str) -> Result<Vec<Saint>> {
        (**self).search_saints(query)
    }

    fn all_saints(&self) -> Result<Vec<Saint>> {
        (**self).all_saints()
    }

    fn order_saints(&self) -> Result<Vec<Saint>> {
        (**self).order_saints()
    }
}

// ============================================================================
// IN-MEMORY PROVIDER
// ============================================================================

/// Registry of feasts and saints kept in memory.
///
/// Registration replaces any record with the same id. Lookups return
/// clones; nothing handed out is shared with the registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    feasts: Arc<RwLock<Vec<FeastDay>>>,
    saints: Arc<RwLock<Vec<Saint>>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(feasts: Vec<FeastDay>, saints: Vec<Saint>) -> Result<Self> {
        let provider = Self::new();
        for saint in saints {
            provider.register_saint(saint)?;
        }
        for feast in feasts {
            provider.register_feast(feast)?;
        }
        Ok(provider)
    }

    pub fn register_feast(&self, feast: FeastDay) -> Result<()> {
        let mut feasts = self.feasts.write().map_err(|_| poisoned("feasts"))?;
        feasts.retain(|f| f.id != feast.id);
        feasts.push(feast);
        // Stable: earlier registrations win ties on the same key
        feasts.sort_by_key(|f| f.date);
        Ok(())
    }

    pub fn register_saint(&self, saint: Saint) -> Result<()> {
        let mut saints = self.saints.write().map_err(|_| poisoned("saints"))?;
        saints.retain(|s| s.id != saint.id);
        saints.push(saint);
        saints.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(())
    }

    pub fn feast_count(&self) -> Result<usize> {
        Ok(self.feasts.read().map_err(|_| poisoned("feasts"))?.len())
    }

    pub fn saint_count(&self) -> Result<usize> {
        Ok(self.saints.read().map_err(|_| poisoned("saints"))?.len())
    }

    fn feasts_where<F>(&self, pred: F, limit: usize) -> Result<Vec<FeastDay>>
    where
        F: Fn(&FeastDay) -> bool,
    {
        let feasts = self.feasts.read().map_err(|_| poisoned("feasts"))?;
        Ok(feasts.iter().filter(|f| pred(f)).take(limit).cloned().collect())
    }

    fn saints_where<F>(&self, pred: F) -> Result<Vec<Saint>>
    where
        F: Fn(&Saint) -> bool,
    {
        let saints = self.saints.read().map_err(|_| poisoned("saints"))?;
        Ok(saints.iter().filter(|s| pred(s)).cloned().collect())
    }
}

fn poisoned(what: &str) -> CalendarError {
    CalendarError::unavailable(format!("{} registry lock poisoned", what))
}

impl FeastProvider for InMemoryProvider {
    fn feast_by_month_day(&self, key: MonthDay) -> Result<Option<FeastDay>> {
        Ok(self.feasts_where(|f| f.date == key, 1)?.into_iter().next())
    }

    fn feasts_from(&self, key: MonthDay, limit: usize) -> Result<Vec<FeastDay>> {
        self.feasts_where(|f| f.date >= key, limit)
    }

    fn feasts_before(&self, key: MonthDay, limit: usize) -> Result<Vec<FeastDay>> {
        self.feasts_where(|f| f.date < key, limit)
    }

    fn order_feasts(&self) -> Result<Vec<FeastDay>> {
        self.feasts_where(|f| f.is_order, usize::MAX)
    }

    fn saint_by_id(&self, id: &str) -> Result<Option<Saint>> {
        Ok(self.saints_where(|s| s.id == id)?.into_iter().next())
    }

    fn saints_by_month_day(&self, key: MonthDay) -> Result<Vec<Saint>> {
        self.saints_where(|s| s.feast_day == key)
    }

    fn search_saints(&self, query: &str) -> Result<Vec<Saint>> {
        self.saints_where(|s| s.name_matches(query))
    }

    fn all_saints(&self) -> Result<Vec<Saint>> {
        self.saints_where(|_| true)
    }

    fn order_saints(&self) -> Result<Vec<Saint>> {
        self.saints_where(|s| s.is_order)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feast::{FeastRank, FeastType};

    fn key(s: &str) -> MonthDay {
        s.parse().unwrap()
    }

    fn feast(id: &str, date: &str) -> FeastDay {
        FeastDay::new(id, id, FeastType::Memorial, FeastRank::MediumRank, key(date))
    }

    fn fixture() -> InMemoryProvider {
        InMemoryProvider::with_data(
            vec![
                feast("dominic", "08-08").order_feast(),
                feast("aquinas", "01-28").order_feast(),
                feast("francis", "10-04"),
            ],
            vec![
                Saint::new("s-dominic", "St. Dominic", key("08-08")).with_order("Order of Preachers"),
                Saint::new("s-zeno", "St. Zeno", key("04-12")),
                Saint::new("s-aquinas", "St. Thomas Aquinas", key("01-28")).with_order("Order of Preachers"),
                Saint::new("s-agnes", "St. Agnes of Montepulciano", key("04-20")).with_order("Order of Preachers"),
                Saint::new("s-julius", "St. Julius", key("04-12")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_feasts_sorted_by_key() {
        let p = fixture();
        let all = p.feasts_from(MonthDay::FIRST, usize::MAX).unwrap();
        let ids: Vec<&str> = all.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["aquinas", "dominic", "francis"]);
    }

    #[test]
    fn test_feasts_from_and_before_split_at_key() {
        let p = fixture();
        let from = p.feasts_from(key("08-08"), 10).unwrap();
        assert_eq!(from.len(), 2);
        assert_eq!(from[0].id, "dominic");
        let before = p.feasts_before(key("08-08"), 10).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].id, "aquinas");
        assert_eq!(p.feasts_from(MonthDay::FIRST, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_saints_share_key_sorted_by_name() {
        let p = fixture();
        let names: Vec<String> = p
            .saints_by_month_day(key("04-12"))
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["St. Julius", "St. Zeno"]);
    }

    #[test]
    fn test_register_replaces_same_id() {
        let p = fixture();
        p.register_saint(Saint::new("s-zeno", "St. Zeno of Verona", key("04-12"))).unwrap();
        assert_eq!(p.saint_count().unwrap(), 5);
        assert_eq!(p.saint_by_id("s-zeno").unwrap().unwrap().name, "St. Zeno of Verona");
    }

    #[test]
    fn test_order_filters() {
        let p = fixture();
        assert_eq!(p.order_feasts().unwrap().len(), 2);
        let saints: Vec<String> = p.order_saints().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(saints, vec!["s-agnes", "s-dominic", "s-aquinas"]);
    }

    #[test]
    fn test_search_case_insensitive() {
        let p = fixture();
        let lower = p.search_saints("aquinas").unwrap();
        let upper = p.search_saints("AQUINAS").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 1);
        assert_eq!(p.search_saints("").unwrap().len(), 5);
    }

    #[test]
    fn test_poisoned_lock_is_unavailable() {
        let p = fixture();
        let shared = p.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.saints.write().unwrap();
            panic!("poison the saints registry");
        })
        .join();

        assert!(matches!(
            p.all_saints(),
            Err(CalendarError::DataProviderUnavailable(_))
        ));
    }
}
