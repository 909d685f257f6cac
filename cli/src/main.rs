//! Restaurant discovery command line front-end
//!
//! Loads the catalog from the configured JSON seed and runs one query,
//! printing the result as JSON on stdout. Logs go to stderr.
//!
//! ```sh
//! # Japanese restaurants within 3 km, nearest first
//! restaurant-discovery search --cuisine japanese --lat 10.7769 --lng 106.7009 --radius 3
//!
//! # Who delivers here?
//! restaurant-discovery deliverable --lat 10.7769 --lng 106.7009
//!
//! # Validate config and seed without querying
//! restaurant-discovery --check
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use restaurant_discovery::config::AppConfig;
use restaurant_discovery::domain::{Coordinate, CuisineType};
use restaurant_discovery::{
    init_tracing, load_seed, DiscoveryService, DiscoverySettings, InMemoryCatalog,
    RestaurantService, SearchCriteria,
};

/// Restaurant discovery: search, proximity and opening hours.
#[derive(Parser, Debug)]
#[command(
    name = "restaurant-discovery",
    version,
    about = "Query a restaurant catalog by text, cuisine, distance and opening hours",
    long_about = "Query a restaurant catalog by text, cuisine, distance and opening hours.\n\n\
                  Default config: ~/.config/restaurant-discovery/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "RESTAURANT_DISCOVERY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the catalog seed file (JSON).
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate configuration and seed, then exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Args, Debug)]
struct Position {
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,
}

impl Position {
    fn coordinate(&self) -> Result<Coordinate, Box<dyn std::error::Error>> {
        Ok(Coordinate::new(self.lat, self.lng)?)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search active restaurants
    Search {
        /// Substring of name, description or address (case-sensitive)
        #[arg(long)]
        text: Option<String>,
        #[arg(long, value_parser = parse_cuisine)]
        cuisine: Option<CuisineType>,
        /// Only restaurants that are (or are not) taking orders
        #[arg(long)]
        accepting: Option<bool>,
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Radius in km, applied only with --lat/--lng
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Active restaurants within a radius, nearest first
    Near {
        #[command(flatten)]
        position: Position,
        /// Radius in km (default from config)
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Restaurants that deliver to a position
    Deliverable {
        #[command(flatten)]
        position: Position,
    },
    /// All active restaurants
    Active,
    /// Every restaurant, whatever its status
    All,
    /// Active restaurants open at a moment (default now)
    Open {
        /// RFC 3339 timestamp
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Whether one restaurant's schedule is open
    IsOpen {
        id: Uuid,
        /// RFC 3339 timestamp
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Full details of one restaurant
    Show { id: Uuid },
}

fn parse_cuisine(raw: &str) -> Result<CuisineType, String> {
    CuisineType::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = CuisineType::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown cuisine '{}', expected one of {}", raw, known.join(", "))
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(restaurant_discovery::default_config_path);

    let mut config = AppConfig::load(&config_path)?;
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref seed) = cli.seed {
        config.catalog.seed_path = Some(seed.clone());
    }
    init_tracing(&config.logging);
    info!(path = %config_path.display(), "Configuration loaded");

    // ── Catalog ────────────────────────────────────────────────
    let restaurants = match config.catalog.seed_path.as_deref() {
        Some(path) => load_seed(path)?,
        None => {
            warn!("No catalog seed configured; starting with an empty catalog");
            Vec::new()
        }
    };
    let catalog = Arc::new(InMemoryCatalog::with_restaurants(restaurants));

    let settings = DiscoverySettings {
        default_radius_km: config.discovery.default_radius_km,
        utc_offset: config.discovery.utc_offset()?,
    };

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Log level   : {}", config.logging.level);
        println!("   Radius (km) : {}", settings.default_radius_km);
        println!("   UTC offset  : {}", settings.utc_offset);
        println!("   Restaurants : {}", catalog.len());
        return Ok(());
    }

    // Ctrl+C aborts a running query
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling query");
            signal_token.cancel();
        }
    });

    let discovery =
        DiscoveryService::with_settings(catalog.clone(), settings).with_cancellation(cancel);
    let restaurants = RestaurantService::new(catalog);

    let Some(command) = cli.command else {
        print_json(&discovery.list_active().await?)?;
        return Ok(());
    };

    match command {
        Command::Search {
            text,
            cuisine,
            accepting,
            lat,
            lng,
            radius,
        } => {
            let mut criteria = SearchCriteria::new();
            criteria.text = text;
            criteria.cuisine_type = cuisine;
            criteria.accepting_orders = accepting;
            criteria.radius_km = radius;
            if let (Some(lat), Some(lng)) = (lat, lng) {
                criteria = criteria.near(Coordinate::new(lat, lng)?);
            }
            print_json(&discovery.search(&criteria).await?)?;
        }
        Command::Near { position, radius } => {
            let results = discovery
                .near_location(position.coordinate()?, radius)
                .await?;
            print_json(&results)?;
        }
        Command::Deliverable { position } => {
            print_json(&discovery.deliverable_to(position.coordinate()?).await?)?;
        }
        Command::Active => {
            print_json(&discovery.list_active().await?)?;
        }
        Command::All => {
            print_json(&restaurants.list_all().await?)?;
        }
        Command::Open { at } => {
            let when = at.unwrap_or_else(Utc::now);
            print_json(&discovery.open_at(when).await?)?;
        }
        Command::IsOpen { id, at } => {
            let open = discovery.is_open_now(id, at).await?;
            print_json(&serde_json::json!({ "id": id, "is_open": open }))?;
        }
        Command::Show { id } => {
            print_json(&restaurants.get(id).await?)?;
        }
    }

    Ok(())
}
