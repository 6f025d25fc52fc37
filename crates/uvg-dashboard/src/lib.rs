//! Dashboard orchestration for UV Guardian: owns preferences, gateway data
//! and the reminder timer, and turns them into a renderable view.

pub mod dashboard;
pub mod sequence;
pub mod view;

pub use dashboard::{seed_gender_rates, Dashboard, ProtectionRequest, PLACEHOLDER_UV_INDEX};
pub use sequence::{RequestSequence, RequestTicket};
pub use view::{DashboardView, WeatherCard};
