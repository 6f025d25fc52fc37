pub mod config;
pub mod error;
pub mod preferences;
pub mod store;

pub use config::{Config, GatewayConfig, ReminderConfig, StorageConfig, ValidationResult};
pub use error::{NetworkError, PreferenceError, ReqwestErrorExt, RusqliteErrorExt, StoreError};
pub use preferences::{Gender, PreferenceField, PreferenceStore, SkinType, UserPreferences};
pub use store::{keys, KeyValueStore, MemoryStore, SqliteStore};

use anyhow::Result;

/// Initialize logging
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("UV Guardian core initialized");
    Ok(())
}
