//! Infrastructure layer - external concerns

pub mod storage;

pub use storage::{load_seed, InMemoryCatalog, SeedError};
