//! Restaurant domain entity

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::availability;
use crate::domain::delivery::{self, DeliveryQuote};
use crate::domain::geo::Coordinate;
use crate::domain::schedule::ScheduleEntry;
use crate::shared::errors::{DomainError, DomainResult};

/// Default delivery fee per kilometre (currency minor units)
pub const DEFAULT_DELIVERY_FEE_PER_KM: i64 = 5000;
/// Default delivery radius
pub const DEFAULT_MAX_DELIVERY_DISTANCE_KM: f64 = 10.0;
/// Default minimum order amount
pub const DEFAULT_MINIMUM_ORDER_AMOUNT: i64 = 50000;

/// Restaurant lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestaurantStatus {
    /// Awaiting approval
    Pending,
    /// Listed and serving
    Active,
    /// Temporarily paused by the owner
    Inactive,
    /// Suspended by the platform
    Suspended,
    /// Permanently closed
    Closed,
}

impl Default for RestaurantStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl RestaurantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Suspended => "Suspended",
            Self::Closed => "Closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "suspended" => Some(Self::Suspended),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for RestaurantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CuisineType {
    Vietnamese,
    Chinese,
    Japanese,
    Korean,
    Thai,
    Western,
    Italian,
    Indian,
    Mexican,
    FastFood,
    Seafood,
    Vegetarian,
    Dessert,
    Coffee,
    Other,
}

impl CuisineType {
    pub const ALL: [CuisineType; 15] = [
        Self::Vietnamese,
        Self::Chinese,
        Self::Japanese,
        Self::Korean,
        Self::Thai,
        Self::Western,
        Self::Italian,
        Self::Indian,
        Self::Mexican,
        Self::FastFood,
        Self::Seafood,
        Self::Vegetarian,
        Self::Dessert,
        Self::Coffee,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vietnamese => "Vietnamese",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
            Self::Korean => "Korean",
            Self::Thai => "Thai",
            Self::Western => "Western",
            Self::Italian => "Italian",
            Self::Indian => "Indian",
            Self::Mexican => "Mexican",
            Self::FastFood => "FastFood",
            Self::Seafood => "Seafood",
            Self::Vegetarian => "Vegetarian",
            Self::Dessert => "Dessert",
            Self::Coffee => "Coffee",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for CuisineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Physical location of a restaurant
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub address: String,
    pub ward: String,
    pub district: String,
    pub city: String,
    pub postal_code: String,
    pub coordinate: Coordinate,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    pub fn new(address: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            address: address.into(),
            ward: String::new(),
            district: String::new(),
            city: String::new(),
            postal_code: String::new(),
            coordinate,
            updated_at: Utc::now(),
        }
    }

    pub fn formatted_address(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.address, self.ward, self.district, self.city
        )
    }

    pub fn distance_to(&self, target: Coordinate) -> f64 {
        self.coordinate.distance_to(&target)
    }
}

/// Restaurant entity; owns its location and weekly schedule.
#[derive(Debug, Clone)]
pub struct Restaurant {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub cuisine_type: CuisineType,
    pub phone_number: String,
    pub email: String,
    pub status: RestaurantStatus,
    pub is_accepting_orders: bool,
    pub average_rating: Decimal,
    pub total_reviews: u32,
    pub total_orders: u32,
    /// Fee per kilometre, in the currency's smallest unit
    pub delivery_fee_per_km: Decimal,
    pub max_delivery_distance_km: f64,
    pub minimum_order_amount: Decimal,
    pub location: Location,
    /// At most one entry per day, ordered by day of week
    pub schedule: Vec<ScheduleEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    /// A freshly registered restaurant: pending approval, not accepting
    /// orders, open 09:00 - 22:00 every day.
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        cuisine_type: CuisineType,
        location: Location,
    ) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        Self {
            id,
            owner_id,
            name: name.into(),
            description: String::new(),
            cuisine_type,
            phone_number: String::new(),
            email: String::new(),
            status: RestaurantStatus::Pending,
            is_accepting_orders: false,
            average_rating: Decimal::ZERO,
            total_reviews: 0,
            total_orders: 0,
            delivery_fee_per_km: Decimal::from(DEFAULT_DELIVERY_FEE_PER_KM),
            max_delivery_distance_km: DEFAULT_MAX_DELIVERY_DISTANCE_KM,
            minimum_order_amount: Decimal::from(DEFAULT_MINIMUM_ORDER_AMOUNT),
            location,
            schedule: ScheduleEntry::default_week(id),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("restaurant name must not be empty"));
        }
        if self.delivery_fee_per_km < Decimal::ZERO {
            return Err(DomainError::validation(
                "delivery fee per km must not be negative",
            ));
        }
        if !self.max_delivery_distance_km.is_finite() || self.max_delivery_distance_km <= 0.0 {
            return Err(DomainError::validation(
                "max delivery distance must be a positive number of kilometres",
            ));
        }
        if self.minimum_order_amount < Decimal::ZERO {
            return Err(DomainError::validation(
                "minimum order amount must not be negative",
            ));
        }
        Ok(())
    }

    /// Set the status unconditionally; returns the previous one.
    ///
    /// Every transition is allowed, including Closed -> Active.
    pub fn update_status(&mut self, new_status: RestaurantStatus) -> RestaurantStatus {
        let previous = self.status;
        self.status = new_status;
        self.touch();
        previous
    }

    /// Flip order acceptance; returns the new value.
    pub fn toggle_order_acceptance(&mut self) -> bool {
        self.is_accepting_orders = !self.is_accepting_orders;
        self.touch();
        self.is_accepting_orders
    }

    /// Record a recomputed review aggregate.
    pub fn update_rating(&mut self, average_rating: Decimal, total_reviews: u32) {
        self.average_rating = average_rating;
        self.total_reviews = total_reviews;
        self.touch();
    }

    pub fn increment_order_count(&mut self) {
        self.total_orders = self.total_orders.saturating_add(1);
        self.touch();
    }

    pub fn update_location(&mut self, mut location: Location) {
        let now = Utc::now();
        location.updated_at = now;
        self.location = location;
        self.updated_at = now;
    }

    pub fn replace_schedule(&mut self, mut entries: Vec<ScheduleEntry>) {
        for entry in &mut entries {
            entry.restaurant_id = self.id;
        }
        entries.sort_by_key(|e| e.day_of_week);
        self.schedule = entries;
        self.touch();
    }

    pub fn schedule_for_day(&self, day_of_week: u8) -> Option<&ScheduleEntry> {
        self.schedule.iter().find(|e| e.day_of_week == day_of_week)
    }

    /// Schedule-only check: status and order acceptance are not consulted.
    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        availability::is_scheduled_open(&self.schedule, at)
    }

    pub fn distance_to(&self, origin: Coordinate) -> f64 {
        self.location.distance_to(origin)
    }

    pub fn quote_delivery(&self, distance_km: f64) -> DeliveryQuote {
        delivery::quote(
            distance_km,
            self.delivery_fee_per_km,
            self.max_delivery_distance_km,
        )
    }

    pub fn is_within_delivery_range(&self, origin: Coordinate) -> bool {
        self.distance_to(origin) <= self.max_delivery_distance_km
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ── Tests ──────────────────────────────────────────────────────
