// ABOUTME: Main library module for the droplet template value and filter core
// ABOUTME: Exports all core modules and provides the public API

pub mod config;
pub mod context;
pub mod filters;
pub mod logging;
pub mod pipeline;
pub mod value;

// Re-export commonly used types
pub use config::{Config, FilterSettings, LoggingConfig};
pub use context::Context;
pub use filters::{DateFormatter, FilterFn, FilterRegistry, Services, TextServices};
pub use pipeline::{Expression, ExpressionError, Pipeline};
pub use value::{Native, Value};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
