//! JSON seed loading for the in-memory catalog
//!
//! The file holds an array of restaurants:
//!
//! ```json
//! [{
//!   "name": "Pho Hoa",
//!   "cuisine_type": "Vietnamese",
//!   "status": "Active",
//!   "is_accepting_orders": true,
//!   "location": { "address": "260C Pasteur", "latitude": 10.7893, "longitude": 106.6918 },
//!   "schedule": [{ "day_of_week": 1, "open_time": "06:00", "close_time": "22:00" }]
//! }]
//! ```
//!
//! Omitted fields take the registration defaults; an omitted schedule means
//! open 09:00 - 22:00 every day.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::dto::ScheduleEntryInput;
use crate::domain::schedule::validate_week;
use crate::domain::{
    Coordinate, CuisineType, DayStatus, DomainError, Location, Restaurant, RestaurantStatus,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Seed entry {index} ({name}): {reason}")]
    Invalid {
        index: usize,
        name: String,
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct SeedLocation {
    #[serde(default)]
    address: String,
    #[serde(default)]
    ward: String,
    #[serde(default)]
    district: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    postal_code: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct SeedScheduleEntry {
    day_of_week: i32,
    #[serde(default)]
    status: Option<String>,
    open_time: String,
    close_time: String,
    #[serde(default)]
    break_start: Option<String>,
    #[serde(default)]
    break_end: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedRestaurant {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    owner_id: Option<Uuid>,
    name: String,
    #[serde(default)]
    description: String,
    cuisine_type: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    is_accepting_orders: bool,
    #[serde(default)]
    phone_number: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    delivery_fee_per_km: Option<Decimal>,
    #[serde(default)]
    max_delivery_distance_km: Option<f64>,
    #[serde(default)]
    minimum_order_amount: Option<Decimal>,
    location: SeedLocation,
    #[serde(default)]
    schedule: Option<Vec<SeedScheduleEntry>>,
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{}', expected HH:MM", raw))
}

fn parse_optional_time(raw: Option<&str>) -> Result<Option<NaiveTime>, String> {
    raw.map(parse_time).transpose()
}

fn entry_to_input(entry: SeedScheduleEntry) -> Result<ScheduleEntryInput, String> {
    let status = match entry.status.as_deref() {
        Some(s) => DayStatus::parse(s).ok_or_else(|| format!("unknown day status '{}'", s))?,
        None => DayStatus::Open,
    };
    Ok(ScheduleEntryInput {
        day_of_week: entry.day_of_week,
        status,
        open_time: parse_time(&entry.open_time)?,
        close_time: parse_time(&entry.close_time)?,
        break_start: parse_optional_time(entry.break_start.as_deref())?,
        break_end: parse_optional_time(entry.break_end.as_deref())?,
        notes: entry.notes,
    })
}

fn domain_reason(err: DomainError) -> String {
    match err {
        DomainError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

fn seed_to_domain(seed: SeedRestaurant) -> Result<Restaurant, String> {
    let cuisine_type = CuisineType::parse(&seed.cuisine_type)
        .ok_or_else(|| format!("unknown cuisine type '{}'", seed.cuisine_type))?;
    let status = match seed.status.as_deref() {
        Some(s) => RestaurantStatus::parse(s).ok_or_else(|| format!("unknown status '{}'", s))?,
        None => RestaurantStatus::Pending,
    };

    let coordinate =
        Coordinate::new(seed.location.latitude, seed.location.longitude).map_err(domain_reason)?;
    let mut location = Location::new(seed.location.address, coordinate);
    location.ward = seed.location.ward;
    location.district = seed.location.district;
    location.city = seed.location.city;
    location.postal_code = seed.location.postal_code;

    let owner_id = seed.owner_id.unwrap_or_else(Uuid::new_v4);
    let mut restaurant = Restaurant::new(owner_id, seed.name, cuisine_type, location);
    if let Some(id) = seed.id {
        restaurant.id = id;
    }
    restaurant.description = seed.description;
    restaurant.phone_number = seed.phone_number;
    restaurant.email = seed.email;
    restaurant.status = status;
    restaurant.is_accepting_orders = seed.is_accepting_orders;
    if let Some(fee) = seed.delivery_fee_per_km {
        restaurant.delivery_fee_per_km = fee;
    }
    if let Some(max) = seed.max_delivery_distance_km {
        restaurant.max_delivery_distance_km = max;
    }
    if let Some(min) = seed.minimum_order_amount {
        restaurant.minimum_order_amount = min;
    }
    restaurant.validate().map_err(domain_reason)?;

    let id = restaurant.id;
    let entries = match seed.schedule {
        Some(entries) => entries
            .into_iter()
            .map(|e| {
                entry_to_input(e)?
                    .into_entry(id)
                    .map_err(domain_reason)
            })
            .collect::<Result<Vec<_>, String>>()?,
        None => restaurant.schedule.clone(),
    };
    validate_week(&entries).map_err(domain_reason)?;
    restaurant.replace_schedule(entries);

    Ok(restaurant)
}

/// Parse seed JSON into restaurants, in file order. An id may appear once;
/// a repeat is reported against its second entry.
pub fn parse_seed(raw: &str) -> Result<Vec<Restaurant>, SeedError> {
    let seeds: Vec<SeedRestaurant> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(seeds.len());
    seeds
        .into_iter()
        .enumerate()
        .map(|(index, seed)| {
            let name = seed.name.clone();
            let restaurant = seed_to_domain(seed).map_err(|reason| SeedError::Invalid {
                index,
                name: name.clone(),
                reason,
            })?;
            if !seen.insert(restaurant.id) {
                return Err(SeedError::Invalid {
                    index,
                    name,
                    reason: format!("duplicate id {}", restaurant.id),
                });
            }
            Ok(restaurant)
        })
        .collect()
}

pub fn load_seed(path: &Path) -> Result<Vec<Restaurant>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let restaurants = parse_seed(&raw)?;
    info!(path = %path.display(), count = restaurants.len(), "Catalog seed loaded");
    Ok(restaurants)
}

// ── Tests ──────────────────────────────────────────────────────
