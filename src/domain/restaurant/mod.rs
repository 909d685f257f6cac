//! Restaurant aggregate
//!
//! Contains the Restaurant entity, its Location, and the catalog repository
//! interface.

pub mod model;
pub mod repository;

pub use model::{CuisineType, Location, Restaurant, RestaurantStatus};
pub use repository::{RestaurantChange, RestaurantRepository};
