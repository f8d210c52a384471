pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use app::Menu;
pub use config::{local::LocalSource, CatalogSettings};
pub use core::{CatalogLoader, CatalogSession, CatalogStore, LoadReport, LookupMode};
pub use utils::error::{CatalogError, Result};
