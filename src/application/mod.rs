pub mod dto;
pub mod services;

// Re-export key types for convenience
pub use dto::{RestaurantDetails, RestaurantSummary, SearchCriteria};
pub use services::{DiscoveryService, DiscoverySettings, RestaurantService};
