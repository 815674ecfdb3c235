//! Seeding a simulation from the white pixels of an image

pub mod error;
pub mod loader;

pub use error::SeedError;
pub use loader::SeedLoader;
