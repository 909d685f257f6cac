//! Restaurant DTOs

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::domain::{
    Coordinate, CuisineType, DayStatus, DeliveryQuote, DomainError, DomainResult, Location,
    Restaurant, RestaurantStatus, ScheduleEntry,
};

fn as_display<T: std::fmt::Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

// ── Inputs ─────────────────────────────────────────────────────

/// Registration of a new restaurant with its location.
/// Delivery settings fall back to the platform defaults when absent.
#[derive(Debug, Clone)]
pub struct CreateRestaurant {
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub cuisine_type: CuisineType,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub ward: String,
    pub district: String,
    pub city: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub delivery_fee_per_km: Option<Decimal>,
    pub max_delivery_distance_km: Option<f64>,
    pub minimum_order_amount: Option<Decimal>,
}

impl CreateRestaurant {
    pub fn new(
        owner_id: Uuid,
        name: impl Into<String>,
        cuisine_type: CuisineType,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            owner_id,
            name: name.into(),
            description: String::new(),
            cuisine_type,
            phone_number: String::new(),
            email: String::new(),
            address: String::new(),
            ward: String::new(),
            district: String::new(),
            city: String::new(),
            postal_code: String::new(),
            latitude,
            longitude,
            delivery_fee_per_km: None,
            max_delivery_distance_km: None,
            minimum_order_amount: None,
        }
    }

    /// Build the pending restaurant; coordinates and settings are validated.
    pub fn into_restaurant(self) -> DomainResult<Restaurant> {
        let coordinate = Coordinate::new(self.latitude, self.longitude)?;
        let mut location = Location::new(self.address, coordinate);
        location.ward = self.ward;
        location.district = self.district;
        location.city = self.city;
        location.postal_code = self.postal_code;

        let mut restaurant = Restaurant::new(self.owner_id, self.name, self.cuisine_type, location);
        restaurant.description = self.description;
        restaurant.phone_number = self.phone_number;
        restaurant.email = self.email;
        if let Some(fee) = self.delivery_fee_per_km {
            restaurant.delivery_fee_per_km = fee;
        }
        if let Some(max) = self.max_delivery_distance_km {
            restaurant.max_delivery_distance_km = max;
        }
        if let Some(min) = self.minimum_order_amount {
            restaurant.minimum_order_amount = min;
        }
        restaurant.validate()?;
        Ok(restaurant)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProfile {
    pub name: String,
    pub description: String,
    pub cuisine_type: CuisineType,
    pub phone_number: String,
    pub email: String,
    pub delivery_fee_per_km: Decimal,
    pub max_delivery_distance_km: f64,
    pub minimum_order_amount: Decimal,
}

impl UpdateProfile {
    pub fn apply_to(self, restaurant: &mut Restaurant) {
        restaurant.name = self.name;
        restaurant.description = self.description;
        restaurant.cuisine_type = self.cuisine_type;
        restaurant.phone_number = self.phone_number;
        restaurant.email = self.email;
        restaurant.delivery_fee_per_km = self.delivery_fee_per_km;
        restaurant.max_delivery_distance_km = self.max_delivery_distance_km;
        restaurant.minimum_order_amount = self.minimum_order_amount;
        restaurant.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone)]
pub struct UpdateLocation {
    pub address: String,
    pub ward: String,
    pub district: String,
    pub city: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl UpdateLocation {
    pub fn into_location(self) -> DomainResult<Location> {
        let coordinate = Coordinate::new(self.latitude, self.longitude)?;
        let mut location = Location::new(self.address, coordinate);
        location.ward = self.ward;
        location.district = self.district;
        location.city = self.city;
        location.postal_code = self.postal_code;
        Ok(location)
    }
}

/// One weekday of a schedule replacement request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntryInput {
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: i32,
    pub status: DayStatus,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
    pub notes: Option<String>,
}

impl ScheduleEntryInput {
    pub fn open(day_of_week: i32, open_time: NaiveTime, close_time: NaiveTime) -> Self {
        Self {
            day_of_week,
            status: DayStatus::Open,
            open_time,
            close_time,
            break_start: None,
            break_end: None,
            notes: None,
        }
    }

    pub fn with_break(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.break_start = Some(start);
        self.break_end = Some(end);
        self
    }

    pub fn with_status(mut self, status: DayStatus) -> Self {
        self.status = status;
        self
    }

    pub fn into_entry(self, restaurant_id: Uuid) -> DomainResult<ScheduleEntry> {
        let day = u8::try_from(self.day_of_week).map_err(|_| {
            DomainError::validation(format!("day_of_week {} is outside 0..=6", self.day_of_week))
        })?;

        let mut entry = ScheduleEntry::new(
            restaurant_id,
            day,
            self.status,
            self.open_time,
            self.close_time,
        )?;
        entry.notes = self.notes;

        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => entry.set_break(start, end)?,
            (None, None) => {}
            _ => {
                return Err(DomainError::validation(
                    "break start and break end must be given together",
                ))
            }
        }

        Ok(entry)
    }
}

// ── Projections ────────────────────────────────────────────────

/// Delivery estimate attached to a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryEstimate {
    Fee { amount: Decimal },
    OutOfRange,
}

impl DeliveryEstimate {
    pub fn fee(&self) -> Option<Decimal> {
        match self {
            Self::Fee { amount } => Some(*amount),
            Self::OutOfRange => None,
        }
    }
}

impl From<DeliveryQuote> for DeliveryEstimate {
    fn from(quote: DeliveryQuote) -> Self {
        match quote {
            DeliveryQuote::Fee(amount) => Self::Fee { amount },
            DeliveryQuote::OutOfRange => Self::OutOfRange,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    pub address: String,
    pub ward: String,
    pub district: String,
    pub city: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: String,
    pub updated_at: DateTime<Utc>,
}

impl From<&Location> for LocationView {
    fn from(l: &Location) -> Self {
        Self {
            address: l.address.clone(),
            ward: l.ward.clone(),
            district: l.district.clone(),
            city: l.city.clone(),
            postal_code: l.postal_code.clone(),
            latitude: l.coordinate.latitude(),
            longitude: l.coordinate.longitude(),
            formatted_address: l.formatted_address(),
            updated_at: l.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntryView {
    pub day_of_week: u8,
    #[serde(serialize_with = "as_display")]
    pub status: DayStatus,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
    pub notes: Option<String>,
    pub formatted_hours: String,
}

impl From<&ScheduleEntry> for ScheduleEntryView {
    fn from(e: &ScheduleEntry) -> Self {
        Self {
            day_of_week: e.day_of_week,
            status: e.status,
            open_time: e.open_time,
            close_time: e.close_time,
            break_start: e.break_window.map(|w| w.start),
            break_end: e.break_window.map(|w| w.end),
            notes: e.notes.clone(),
            formatted_hours: e.formatted_hours(),
        }
    }
}

/// Search result row
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "as_display")]
    pub cuisine_type: CuisineType,
    #[serde(serialize_with = "as_display")]
    pub status: RestaurantStatus,
    pub is_accepting_orders: bool,
    pub delivery_fee_per_km: Decimal,
    pub location: LocationView,
    /// Present only when the query carried an origin
    pub distance_km: Option<f64>,
    pub estimated_delivery: Option<DeliveryEstimate>,
    /// Schedule says open right now (status and acceptance not consulted)
    pub is_currently_open: bool,
    /// Active, accepting orders and within scheduled hours
    pub is_available: bool,
}

/// Full restaurant view
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDetails {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "as_display")]
    pub cuisine_type: CuisineType,
    pub phone_number: String,
    pub email: String,
    #[serde(serialize_with = "as_display")]
    pub status: RestaurantStatus,
    pub is_accepting_orders: bool,
    pub average_rating: Decimal,
    pub total_reviews: u32,
    pub delivery_fee_per_km: Decimal,
    pub max_delivery_distance_km: f64,
    pub minimum_order_amount: Decimal,
    pub location: LocationView,
    pub schedule: Vec<ScheduleEntryView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Restaurant> for RestaurantDetails {
    fn from(r: &Restaurant) -> Self {
        Self {
            id: r.id,
            owner_id: r.owner_id,
            name: r.name.clone(),
            description: r.description.clone(),
            cuisine_type: r.cuisine_type,
            phone_number: r.phone_number.clone(),
            email: r.email.clone(),
            status: r.status,
            is_accepting_orders: r.is_accepting_orders,
            average_rating: r.average_rating,
            total_reviews: r.total_reviews,
            delivery_fee_per_km: r.delivery_fee_per_km,
            max_delivery_distance_km: r.max_delivery_distance_km,
            minimum_order_amount: r.minimum_order_amount,
            location: LocationView::from(&r.location),
            schedule: r.schedule.iter().map(ScheduleEntryView::from).collect(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantCreated {
    pub id: Uuid,
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusChangeResponse {
    pub id: Uuid,
    #[serde(serialize_with = "as_display")]
    pub status: RestaurantStatus,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderAcceptanceResponse {
    pub id: Uuid,
    pub is_accepting_orders: bool,
    pub message: String,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn create_applies_defaults_and_overrides() {
        let mut req = CreateRestaurant::new(Uuid::new_v4(), "Com Tam", CuisineType::Vietnamese, 10.77, 106.70);
        req.max_delivery_distance_km = Some(5.0);
        let r = req.into_restaurant().unwrap();
        assert_eq!(r.status, RestaurantStatus::Pending);
        assert!(!r.is_accepting_orders);
        assert_eq!(r.max_delivery_distance_km, 5.0);
        assert_eq!(r.delivery_fee_per_km, Decimal::from(5000));
        assert_eq!(r.schedule.len(), 7);
    }

    #[test]
    fn create_rejects_bad_coordinates() {
        let req = CreateRestaurant::new(Uuid::new_v4(), "Nowhere", CuisineType::Other, 95.0, 0.0);
        assert!(matches!(req.into_restaurant(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn schedule_input_with_break() {
        let entry = ScheduleEntryInput::open(2, t(9, 0), t(21, 0))
            .with_break(t(14, 0), t(16, 0))
            .into_entry(Uuid::new_v4())
            .unwrap();
        assert_eq!(entry.day_of_week, 2);
        assert!(entry.break_window.is_some());
        assert!(!entry.is_open_at(t(15, 0)));
    }

    #[test]
    fn schedule_input_rejects_half_break() {
        let mut input = ScheduleEntryInput::open(2, t(9, 0), t(21, 0));
        input.break_start = Some(t(12, 0));
        assert!(input.into_entry(Uuid::new_v4()).is_err());
    }

    #[test]
    fn schedule_input_rejects_negative_day() {
        let input = ScheduleEntryInput::open(-1, t(9, 0), t(21, 0));
        assert!(input.into_entry(Uuid::new_v4()).is_err());
    }

    #[test]
    fn delivery_estimate_serializes_as_tagged_outcome() {
        let fee = DeliveryEstimate::from(DeliveryQuote::Fee(Decimal::from(15000)));
        let json = serde_json::to_value(fee).unwrap();
        assert_eq!(json["outcome"], "fee");
        assert_eq!(json["amount"], "15000");

        let out = serde_json::to_value(DeliveryEstimate::OutOfRange).unwrap();
        assert_eq!(out["outcome"], "out_of_range");
    }
}
