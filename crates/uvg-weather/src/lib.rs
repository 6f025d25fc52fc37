//! Weather, skin-cancer statistics and sun protection data for UV Guardian.
//!
//! Provides the gateway HTTP client and the UV recommendation lookups.

pub mod gateway;
pub mod types;
pub mod uv;

pub use gateway::GatewayClient;
pub use types::*;
pub use uv::{classify_uv, recommend_sunscreen, UvLevel, WeatherIcon};
