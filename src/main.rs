use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::env;
use std::path::Path;

use liturgical_calendar::{
    compute_easter, count_feast_days, count_saints, default_feasts, default_saints, insert_feast_days,
    insert_saints, load_feasts_csv, load_saints_csv, CalendarConfig, FeastDay, LiturgicalCalendar,
    LiturgicalDate, Saint, SqliteProvider,
};

const USAGE: &str = "Usage: liturgical-calendar [--json] <command>

Commands:
  today                      Classification of today's date
  date YYYY-MM-DD            Classification of one date
  range START END            Every date from START to END (inclusive)
  easter YEAR                Easter and the movable feasts of YEAR
  saints YYYY-MM-DD          Saints whose feast falls on that day
  upcoming [N]               Next N fixed feasts
  order-feasts               Feasts of the Order
  search QUERY               Saints whose name contains QUERY
  seed                       Store the built-in feasts and saints
  import FEASTS.csv SAINTS.csv";

fn main() -> Result<()> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let json = match args.iter().position(|a| a == "--json") {
        Some(idx) => {
            args.remove(idx);
            true
        }
        None => false,
    };

    let Some(command) = args.first().cloned() else {
        println!("{}", USAGE);
        return Ok(());
    };
    let rest = &args[1..];

    let config = CalendarConfig::load()?;

    if command == "easter" {
        // No database needed
        return run_easter(rest, json);
    }

    let provider = SqliteProvider::open(&config.database_path)
        .with_context(|| format!("Failed to open database {:?}", config.database_path))?;

    match command.as_str() {
        "seed" => run_seed(&provider),
        "import" => run_import(&provider, rest),
        _ => {
            let calendar = LiturgicalCalendar::with_config(provider, &config);
            run_query(&calendar, &command, rest, json)
        }
    }
}

fn run_query(
    calendar: &LiturgicalCalendar<SqliteProvider>,
    command: &str,
    rest: &[String],
    json: bool,
) -> Result<()> {
    match command {
        "today" => {
            let day = calendar.get_today_liturgical_date()?;
            emit(json, &day, || print_day(&day))
        }
        "date" => {
            let date = parse_date(arg(rest, 0, "date")?)?;
            let day = calendar.get_liturgical_date(date)?;
            emit(json, &day, || print_day(&day))
        }
        "range" => {
            let start = parse_date(arg(rest, 0, "start date")?)?;
            let end = parse_date(arg(rest, 1, "end date")?)?;
            let days = calendar.get_liturgical_dates(start, end)?;
            emit(json, &days, || days.iter().for_each(print_day_line))
        }
        "saints" => {
            let date = parse_date(arg(rest, 0, "date")?)?;
            let saints = calendar.get_saints_for_date(date)?;
            emit(json, &saints, || print_saints(&saints))
        }
        "upcoming" => {
            let limit = match rest.first() {
                Some(n) => n.parse().with_context(|| format!("Invalid count: {}", n))?,
                None => calendar.default_upcoming_limit(),
            };
            let feasts = calendar.get_upcoming_feast_days(limit)?;
            emit(json, &feasts, || print_feasts(&feasts))
        }
        "order-feasts" => {
            let feasts = calendar.get_order_feast_days()?;
            emit(json, &feasts, || print_feasts(&feasts))
        }
        "search" => {
            let saints = calendar.search_saints(&rest.join(" "))?;
            emit(json, &saints, || print_saints(&saints))
        }
        other => {
            eprintln!("❌ Unknown command: {}\n", other);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn run_easter(rest: &[String], json: bool) -> Result<()> {
    let year: i32 = arg(rest, 0, "year")?
        .parse()
        .context("Year must be a number")?;
    let easter = compute_easter(year)?;
    let feasts = liturgical_calendar::MovableFeasts::for_year(year)?;

    if json {
        let listing: Vec<(String, NaiveDate)> = feasts.iter().map(|(f, d)| (f.name().to_string(), d)).collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("✝️  Easter {}: {}", year, easter.format("%A, %B %-d"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (feast, date) in feasts.iter() {
        println!("  {:<20} {}", feast.name(), date);
    }
    Ok(())
}

fn run_seed(provider: &SqliteProvider) -> Result<()> {
    println!("🌱 Storing built-in feasts and saints...");
    insert_saints(provider.connection(), &default_saints())?;
    insert_feast_days(provider.connection(), &default_feasts())?;
    print_counts(provider)
}

fn run_import(provider: &SqliteProvider, rest: &[String]) -> Result<()> {
    let feasts_path = Path::new(arg(rest, 0, "feasts CSV path")?);
    let saints_path = Path::new(arg(rest, 1, "saints CSV path")?);

    println!("📂 Loading CSV...");
    let feasts = load_feasts_csv(feasts_path)?;
    let saints = load_saints_csv(saints_path)?;
    println!("✓ Loaded {} feasts, {} saints", feasts.len(), saints.len());

    println!("💾 Inserting...");
    insert_saints(provider.connection(), &saints)?;
    insert_feast_days(provider.connection(), &feasts)?;
    print_counts(provider)
}

fn print_counts(provider: &SqliteProvider) -> Result<()> {
    println!("✓ Database contains {} feast days", count_feast_days(provider.connection())?);
    println!("✓ Database contains {} saints", count_saints(provider.connection())?);
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn arg<'a>(rest: &'a [String], idx: usize, what: &str) -> Result<&'a str> {
    match rest.get(idx) {
        Some(value) => Ok(value.as_str()),
        None => bail!("Missing {}\n\n{}", what, USAGE),
    }
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").with_context(|| format!("Expected YYYY-MM-DD, got {:?}", text))
}

fn emit<T: serde::Serialize>(json: bool, value: &T, human: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human();
    }
    Ok(())
}

fn print_day(day: &LiturgicalDate) {
    println!("📅 {} ({})", day.date, day.day_of_week);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Season:  {} ({} .. {})", day.season.name, day.season.start_date, day.season.end_date);
    println!("  Color:   {} {}", day.color, day.color.hex());
    if let Some(movable) = day.movable_feast {
        println!("  Movable: {}", movable.name());
    }
    if let Some(feast) = &day.feast_day {
        let marker = if day.is_order_feast { " ⚫⚪" } else { "" };
        println!("  Feast:   {} [{}]{}", feast.name, feast.feast_type.as_str(), marker);
        if let Some(saint) = &feast.saint {
            println!("  Saint:   {}", saint.name);
        }
    }
}

fn print_day_line(day: &LiturgicalDate) {
    println!(
        "{} {:<9} {:<14} {:<7} {}",
        day.date,
        day.day_of_week,
        day.season.name,
        day.color,
        day.title()
    );
}

fn print_feasts(feasts: &[FeastDay]) {
    if feasts.is_empty() {
        println!("(no feasts)");
    }
    for feast in feasts {
        let marker = if feast.is_order { "OP" } else { "  " };
        println!("{} {} {:<18} {}", feast.date, marker, feast.feast_type.as_str(), feast.name);
    }
}

fn print_saints(saints: &[Saint]) {
    if saints.is_empty() {
        println!("(no saints)");
    }
    for saint in saints {
        let years = match (saint.birth_year, saint.death_year) {
            (Some(b), Some(d)) => format!(" ({}-{})", b, d),
            (None, Some(d)) => format!(" (d. {})", d),
            _ => String::new(),
        };
        println!("{} {}{}", saint.feast_day, saint.name, years);
    }
}
