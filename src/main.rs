use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use civic_registry::{
    import_csv, Dwelling, DwellingType, Family, House, Municipality, Owner, Person, PersonType,
    Record, Region, Registry, TaxPayment, UrbanZone,
};

#[derive(Parser)]
#[command(name = "civic-registry")]
#[command(about = "Municipal civic registry: regions, dwellings, families, houses and taxes.")]
struct CommandLine {
    /// SQLite database file
    #[arg(long, env = "CIVIC_REGISTRY_DB", default_value = "civic_registry.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database tables
    Init,
    /// Insert the dwelling and person types the rules rely on
    Seed,
    /// Import records of one entity from a CSV file with a header row
    Import { entity: Entity, csv: PathBuf },
    /// Print every record of one entity as JSON
    List { entity: Entity },
    /// Tax payments per category
    Taxes,
}

#[derive(Clone, Copy, ValueEnum)]
enum Entity {
    Region,
    Municipality,
    UrbanZone,
    DwellingType,
    Dwelling,
    Family,
    PersonType,
    Person,
    Owner,
    House,
    TaxPayment,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = CommandLine::parse();
    let mut registry = Registry::open(&cli.db)
        .with_context(|| format!("Failed to open registry at {}", cli.db.display()))?;

    match cli.command {
        Commands::Init => {
            println!("✓ Registry ready at {}", cli.db.display());
        }
        Commands::Seed => {
            let created = registry.seed_catalogs()?;
            println!("✓ Seeded {} catalog entries", created);
        }
        Commands::Import { entity, csv } => run_import(&mut registry, entity, &csv)?,
        Commands::List { entity } => run_list(&registry, entity)?,
        Commands::Taxes => {
            for total in registry.tax_summary()? {
                println!(
                    "{}  {:>5} payments  {:>12}",
                    total.category, total.payments, total.total_amount
                );
            }
        }
    }

    Ok(())
}

/// RUST_LOG picks the level (default info); CIVIC_REGISTRY_LOG_JSON=1 for JSON lines
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("CIVIC_REGISTRY_LOG_JSON")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run_import(registry: &mut Registry, entity: Entity, csv: &Path) -> Result<()> {
    match entity {
        Entity::Region => import_and_report::<Region>(registry, csv),
        Entity::Municipality => import_and_report::<Municipality>(registry, csv),
        Entity::UrbanZone => import_and_report::<UrbanZone>(registry, csv),
        Entity::DwellingType => import_and_report::<DwellingType>(registry, csv),
        Entity::Dwelling => import_and_report::<Dwelling>(registry, csv),
        Entity::Family => import_and_report::<Family>(registry, csv),
        Entity::PersonType => import_and_report::<PersonType>(registry, csv),
        Entity::Person => import_and_report::<Person>(registry, csv),
        Entity::Owner => import_and_report::<Owner>(registry, csv),
        Entity::House => import_and_report::<House>(registry, csv),
        Entity::TaxPayment => import_and_report::<TaxPayment>(registry, csv),
    }
}

fn import_and_report<R: Record + DeserializeOwned>(registry: &mut Registry, csv: &Path) -> Result<()> {
    let summary = import_csv::<R>(registry, csv)?;

    println!("✓ Saved: {} {} records", summary.saved, R::ENTITY);
    if summary.rejected > 0 {
        println!("✗ Rejected: {}", summary.rejected);
        for (line, reason) in &summary.rejections {
            println!("   line {}: {}", line, reason);
        }
    }
    Ok(())
}

fn run_list(registry: &Registry, entity: Entity) -> Result<()> {
    match entity {
        Entity::Region => print_all::<Region>(registry),
        Entity::Municipality => print_all::<Municipality>(registry),
        Entity::UrbanZone => print_all::<UrbanZone>(registry),
        Entity::DwellingType => print_all::<DwellingType>(registry),
        Entity::Dwelling => print_all::<Dwelling>(registry),
        Entity::Family => print_all::<Family>(registry),
        Entity::PersonType => print_all::<PersonType>(registry),
        Entity::Person => print_all::<Person>(registry),
        Entity::Owner => print_all::<Owner>(registry),
        Entity::House => print_all::<House>(registry),
        Entity::TaxPayment => print_all::<TaxPayment>(registry),
    }
}

fn print_all<R: Record>(registry: &Registry) -> Result<()> {
    let records = registry.list::<R>()?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
