//! Application services

mod discovery;
mod restaurant;

pub use discovery::{DiscoveryService, DiscoverySettings};
pub use restaurant::RestaurantService;
