//! Catalog storage implementations

mod memory;
mod seed;

pub use memory::InMemoryCatalog;
pub use seed::{load_seed, parse_seed, SeedError};
