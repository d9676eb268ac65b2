use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use rdw_verkenner::config::AppConfig;
use rdw_verkenner::dashboard::{DataSource, FetchOutcome, VehicleStore, FALLBACK_NOTICE};
use rdw_verkenner::rdw::query::normalize_plate;
use rdw_verkenner::rdw::{ListQuery, RdwHttpClient, VehicleGateway};
use rdw_verkenner::vehicles::{select, DashboardStats, FieldFilter, FilterCriteria, SortOrder};

use crate::error::AppError;
use crate::render;

#[derive(Parser, Debug)]
#[command(
    name = "rdw-verkenner",
    about = "Verken de open RDW kentekenregistratie vanaf de terminal",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Toon statistieken plus de gefilterde registratielijst (default)
    Dashboard(DashboardArgs),
    /// Zoek één kenteken rechtstreeks op in de RDW dataset
    Lookup(LookupArgs),
}

#[derive(Args, Debug, Default)]
struct DashboardArgs {
    /// Maximum aantal op te halen records
    #[arg(long)]
    limit: Option<u32>,
    /// Vrije zoekterm over alle velden
    #[arg(long, default_value = "")]
    search: String,
    /// Filter op voertuigsoort (exacte waarde, bijv. Personenauto)
    #[arg(long)]
    vehicle_type: Option<String>,
    /// Filter op merk (exacte waarde, bijv. BMW)
    #[arg(long)]
    brand: Option<String>,
    /// Toon alleen voertuigen waarvan de APK binnenkort verloopt
    #[arg(long)]
    only_expiring_soon: bool,
    /// Sorteervolgorde van de lijst
    #[arg(long, value_enum, default_value = "newest")]
    sort: SortArg,
    /// Peildatum (YYYY-MM-DD) voor leeftijd en APK-statistieken; standaard nu
    #[arg(long, value_parser = parse_date)]
    evaluated_at: Option<NaiveDate>,
    /// Gebruik de ingebouwde voorbeeldgegevens zonder netwerk
    #[arg(long)]
    offline: bool,
    /// Schrijf het resultaat als JSON in plaats van tabellen
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// Het op te zoeken kenteken; scheidingstekens zijn toegestaan (AB-123-C)
    kenteken: String,
    /// Schrijf het resultaat als JSON in plaats van een detailkaart
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum SortArg {
    /// Datasetvolgorde, zoals opgehaald
    Dataset,
    /// Nieuwste tenaamstelling eerst
    #[default]
    Newest,
    /// Oudste tenaamstelling eerst
    Oldest,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Dataset => SortOrder::InsertionOrder,
            SortArg::Newest => SortOrder::NewestFirst,
            SortArg::Oldest => SortOrder::OldestFirst,
        }
    }
}

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    crate::telemetry::init(&config.log_level)?;

    match cli
        .command
        .unwrap_or_else(|| Command::Dashboard(DashboardArgs::default()))
    {
        Command::Dashboard(args) => run_dashboard(args, &config),
        Command::Lookup(args) => run_lookup(args, &config),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("kan '{raw}' niet lezen als YYYY-MM-DD ({err})"))
}

fn evaluation_instant(pinned: Option<NaiveDate>) -> DateTime<Utc> {
    match pinned {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    }
}

fn field_filter(value: Option<String>) -> FieldFilter {
    match value {
        Some(value) => FieldFilter::Exact(value),
        None => FieldFilter::All,
    }
}

fn run_dashboard(args: DashboardArgs, config: &AppConfig) -> Result<(), AppError> {
    let now = evaluation_instant(args.evaluated_at);
    let criteria = FilterCriteria {
        search_term: args.search,
        vehicle_type: field_filter(args.vehicle_type),
        brand: field_filter(args.brand),
        only_expiring_soon: args.only_expiring_soon,
        sort: args.sort.into(),
    };

    let mut store = VehicleStore::new();
    let outcome = if args.offline {
        store.load_fallback();
        None
    } else {
        let gateway = RdwHttpClient::new(config.endpoint.clone())?;
        let query = ListQuery::with_limit(args.limit.unwrap_or(config.list_limit));
        Some(store.refresh(&gateway, &query))
    };

    let selected = select(store.records(), &criteria, now, config.expiry_window_days);
    let stats = DashboardStats::compute(
        &selected,
        store.records().len(),
        now,
        config.expiry_window_days,
    );

    if args.json {
        render::dashboard_json(&stats, &selected)?;
        return Ok(());
    }

    if let Some(FetchOutcome::Applied {
        source: DataSource::Fallback,
        ..
    }) = outcome
    {
        println!("{FALLBACK_NOTICE}");
        println!();
    }

    render::dashboard(&stats, &selected, store.source(), config.expiry_window_days);
    Ok(())
}

fn run_lookup(args: LookupArgs, config: &AppConfig) -> Result<(), AppError> {
    let normalized = normalize_plate(&args.kenteken)?;

    let gateway = RdwHttpClient::new(config.endpoint.clone())?;
    match gateway.lookup_plate(&normalized)? {
        Some(vehicle) => {
            if args.json {
                render::vehicle_json(&vehicle)?;
            } else {
                render::vehicle_details(&vehicle);
            }
        }
        None => println!("Geen voertuig gevonden voor dit kenteken."),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_is_the_default_command() {
        let cli = Cli::try_parse_from(["rdw-verkenner"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn dashboard_flags_map_onto_criteria_inputs() {
        let cli = Cli::try_parse_from([
            "rdw-verkenner",
            "dashboard",
            "--limit",
            "10",
            "--brand",
            "BMW",
            "--sort",
            "oldest",
            "--only-expiring-soon",
            "--evaluated-at",
            "2023-11-01",
        ])
        .expect("parses");

        let Some(Command::Dashboard(args)) = cli.command else {
            panic!("expected dashboard command");
        };
        assert_eq!(args.limit, Some(10));
        assert_eq!(args.brand.as_deref(), Some("BMW"));
        assert_eq!(SortOrder::from(args.sort), SortOrder::OldestFirst);
        assert!(args.only_expiring_soon);
        assert_eq!(
            args.evaluated_at,
            Some(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap())
        );
    }

    #[test]
    fn pinned_evaluation_date_resolves_to_utc_midnight() {
        let pinned = NaiveDate::from_ymd_opt(2023, 11, 1);
        let instant = evaluation_instant(pinned);
        assert_eq!(instant.to_rfc3339(), "2023-11-01T00:00:00+00:00");
    }

    #[test]
    fn lookup_requires_a_plate_argument() {
        assert!(Cli::try_parse_from(["rdw-verkenner", "lookup"]).is_err());
    }
}
