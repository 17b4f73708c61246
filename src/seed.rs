// 🌱 Default Reference Data
// Core saints and fixed feasts of the Dominican proper calendar, plus a
// handful of universal solemnities, so a fresh database is usable.

use crate::color::LiturgicalColor;
use crate::error::Result;
use crate::feast::{FeastDay, FeastRank, FeastType, MonthDay, Saint};
use crate::provider::InMemoryProvider;

const ORDER: &str = "Order of Preachers";

fn key(month: u32, day: u32) -> MonthDay {
    // Constant keys below are all real calendar days
    MonthDay::new(month, day).unwrap_or(MonthDay::FIRST)
}

pub fn default_saints() -> Vec<Saint> {
    vec![
        Saint::new("raymond-penyafort", "St. Raymond of Penyafort", key(1, 7))
            .with_order(ORDER)
            .with_years(Some(1175), Some(1275), Some(1601))
            .with_description("Canonist, compiler of the Decretals, third Master of the Order")
            .with_patronage(&["canon lawyers"]),
        Saint::new("thomas-aquinas", "St. Thomas Aquinas", key(1, 28))
            .with_order(ORDER)
            .with_years(Some(1225), Some(1274), Some(1323))
            .with_description("Priest, Doctor of the Church, author of the Summa Theologiae")
            .with_patronage(&["students", "universities", "theologians"]),
        Saint::new("joseph", "St. Joseph", key(3, 19))
            .with_description("Spouse of the Blessed Virgin Mary")
            .with_patronage(&["the universal Church", "workers", "fathers"]),
        Saint::new("vincent-ferrer", "St. Vincent Ferrer", key(4, 5))
            .with_order(ORDER)
            .with_years(Some(1350), Some(1419), Some(1455))
            .with_description("Priest and itinerant preacher")
            .with_patronage(&["builders"]),
        Saint::new("agnes-montepulciano", "St. Agnes of Montepulciano", key(4, 20))
            .with_order(ORDER)
            .with_years(Some(1268), Some(1317), Some(1726))
            .with_description("Virgin and prioress"),
        Saint::new("catherine-siena", "St. Catherine of Siena", key(4, 29))
            .with_order(ORDER)
            .with_years(Some(1347), Some(1380), Some(1461))
            .with_description("Virgin, Doctor of the Church, Dominican tertiary")
            .with_patronage(&["Italy", "Europe", "nurses"]),
        Saint::new("pius-v", "St. Pius V", key(4, 30))
            .with_order(ORDER)
            .with_years(Some(1504), Some(1572), Some(1712))
            .with_description("Pope"),
        Saint::new("peter-verona", "St. Peter of Verona", key(6, 4))
            .with_order(ORDER)
            .with_years(Some(1205), Some(1252), Some(1253))
            .with_description("Priest and martyr")
            .with_patronage(&["inquisitors"]),
        Saint::new("peter-apostle", "St. Peter", key(6, 29))
            .with_description("Apostle")
            .with_patronage(&["popes", "fishermen"]),
        Saint::new("paul-apostle", "St. Paul", key(6, 29))
            .with_description("Apostle")
            .with_patronage(&["missionaries", "writers"]),
        Saint::new("dominic", "St. Dominic", key(8, 8))
            .with_order(ORDER)
            .with_years(Some(1170), Some(1221), Some(1234))
            .with_description("Priest, founder of the Order of Preachers")
            .with_patronage(&["astronomers", "the falsely accused"]),
        Saint::new("hyacinth", "St. Hyacinth", key(8, 17))
            .with_order(ORDER)
            .with_years(Some(1185), Some(1257), Some(1594))
            .with_description("Priest and missionary"),
        Saint::new("rose-lima", "St. Rose of Lima", key(8, 23))
            .with_order(ORDER)
            .with_years(Some(1586), Some(1617), Some(1671))
            .with_description("Virgin, Dominican tertiary")
            .with_patronage(&["the Americas", "Peru", "gardeners"]),
        Saint::new("martin-porres", "St. Martin de Porres", key(11, 3))
            .with_order(ORDER)
            .with_years(Some(1579), Some(1639), Some(1962))
            .with_description("Religious brother")
            .with_patronage(&["social justice", "barbers"]),
        Saint::new("albert-great", "St. Albert the Great", key(11, 15))
            .with_order(ORDER)
            .with_years(Some(1200), Some(1280), Some(1931))
            .with_description("Bishop and Doctor of the Church")
            .with_patronage(&["scientists", "natural sciences"]),
        Saint::new("stephen", "St. Stephen", key(12, 26))
            .with_description("First martyr")
            .with_patronage(&["deacons"]),
    ]
}

pub fn default_feasts() -> Vec<FeastDay> {
    use FeastRank::*;
    use FeastType::*;

    let white = LiturgicalColor::White;
    let red = LiturgicalColor::Red;

    vec![
        FeastDay::new("raymond-penyafort", "St. Raymond of Penyafort", Memorial, MediumRank, key(1, 7))
            .with_color(white)
            .with_saint("raymond-penyafort")
            .order_feast(),
        FeastDay::new("thomas-aquinas", "St. Thomas Aquinas", Feast, HighRank, key(1, 28))
            .with_color(white)
            .with_saint("thomas-aquinas")
            .order_feast(),
        FeastDay::new("joseph", "St. Joseph, Spouse of the Blessed Virgin Mary", Solemnity, HigherRank, key(3, 19))
            .with_color(white)
            .with_saint("joseph"),
        FeastDay::new("vincent-ferrer", "St. Vincent Ferrer", Feast, HighRank, key(4, 5))
            .with_color(white)
            .with_saint("vincent-ferrer")
            .order_feast(),
        FeastDay::new("agnes-montepulciano", "St. Agnes of Montepulciano", Memorial, MediumRank, key(4, 20))
            .with_color(white)
            .with_saint("agnes-montepulciano")
            .order_feast(),
        FeastDay::new("catherine-siena", "St. Catherine of Siena", Feast, HighRank, key(4, 29))
            .with_color(white)
            .with_saint("catherine-siena")
            .order_feast(),
        FeastDay::new("pius-v", "St. Pius V", Memorial, MediumRank, key(4, 30))
            .with_color(white)
            .with_saint("pius-v")
            .order_feast(),
        FeastDay::new("peter-verona", "St. Peter of Verona", Memorial, MediumRank, key(6, 4))
            .with_color(red)
            .with_saint("peter-verona")
            .order_feast(),
        FeastDay::new("peter-paul", "Sts. Peter and Paul, Apostles", Solemnity, HigherRank, key(6, 29))
            .with_color(red),
        FeastDay::new("dominic", "Our Holy Father St. Dominic", Solemnity, HigherRank, key(8, 8))
            .with_color(white)
            .with_saint("dominic")
            .order_feast(),
        FeastDay::new("assumption", "Assumption of the Blessed Virgin Mary", Solemnity, HigherRank, key(8, 15))
            .with_color(white),
        FeastDay::new("hyacinth", "St. Hyacinth", Memorial, MediumRank, key(8, 17))
            .with_color(white)
            .with_saint("hyacinth")
            .order_feast(),
        FeastDay::new("rose-lima", "St. Rose of Lima", Feast, HighRank, key(8, 23))
            .with_color(white)
            .with_saint("rose-lima")
            .order_feast(),
        FeastDay::new("rosary", "Our Lady of the Rosary", Feast, HighRank, key(10, 7))
            .with_color(white)
            .order_feast(),
        FeastDay::new("all-saints", "All Saints", Solemnity, HigherRank, key(11, 1))
            .with_color(white),
        FeastDay::new("martin-porres", "St. Martin de Porres", Feast, HighRank, key(11, 3))
            .with_color(white)
            .with_saint("martin-porres")
            .order_feast(),
        FeastDay::new("albert-great", "St. Albert the Great", Feast, HighRank, key(11, 15))
            .with_color(white)
            .with_saint("albert-great")
            .order_feast(),
        FeastDay::new("immaculate-conception", "Immaculate Conception", Solemnity, HigherRank, key(12, 8))
            .with_color(white),
        FeastDay::new("stephen", "St. Stephen, First Martyr", Feast, HighRank, key(12, 26))
            .with_color(red)
            .with_saint("stephen"),
    ]
}

/// In-memory provider loaded with the defaults above
pub fn default_provider() -> Result<InMemoryProvider> {
    InMemoryProvider::with_data(default_feasts(), default_saints())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_feast_saint_references_resolve() {
        let saints: HashSet<String> = default_saints().into_iter().map(|s| s.id).collect();
        for feast in default_feasts() {
            if let Some(id) = &feast.saint_id {
                assert!(saints.contains(id), "feast {} references unknown saint {}", feast.id, id);
            }
        }
    }

    #[test]
    fn test_one_feast_per_key() {
        let feasts = default_feasts();
        let keys: HashSet<MonthDay> = feasts.iter().map(|f| f.date).collect();
        assert_eq!(keys.len(), feasts.len());
    }

    #[test]
    fn test_default_provider_counts() {
        let provider = default_provider().unwrap();
        assert_eq!(provider.feast_count().unwrap(), default_feasts().len());
        assert_eq!(provider.saint_count().unwrap(), default_saints().len());
    }
}
