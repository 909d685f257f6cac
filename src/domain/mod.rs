pub mod availability;
pub mod delivery;
pub mod geo;
pub mod repositories;
pub mod restaurant;
pub mod schedule;

// Re-export commonly used types
pub use availability::Availability;
pub use delivery::DeliveryQuote;
pub use geo::{distance_km, Coordinate};
pub use repositories::RepositoryProvider;
pub use restaurant::{
    CuisineType, Location, Restaurant, RestaurantChange, RestaurantRepository, RestaurantStatus,
};
pub use schedule::{BreakWindow, DayStatus, ScheduleEntry, ScheduleRepository};

pub use crate::shared::errors::{DomainError, DomainResult};
