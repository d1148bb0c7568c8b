mod config;
mod loader;
mod store;

pub use config::{AssetLabels, ConfigError, RouterConfig, ServerConfig};
pub use loader::{LoadError, SEED_FILE_COUNT, SeedLoader};
pub use store::InMemoryVenueStore;
