//! # Restaurant Discovery
//!
//! Catalog search for a food-delivery platform: text and cuisine filters,
//! proximity ranking with per-restaurant delivery fees, and weekly opening
//! schedules evaluated on the business wall clock.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Restaurants, schedules, geo math and repository traits
//! - **application**: Discovery and restaurant management services, DTOs
//! - **infrastructure**: In-memory catalog and JSON seed loading
//! - **config**: TOML configuration
//! - **logging**: tracing subscriber setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

pub use application::{DiscoveryService, DiscoverySettings, RestaurantService, SearchCriteria};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::{load_seed, InMemoryCatalog, SeedError};
pub use logging::init_tracing;
