//! Text rendering of the dashboard. Pure function of a [`DashboardView`].

use std::fmt;

use uvg_core::UserPreferences;
use uvg_reminder::{format_hms, reminder_message, TimerState, REMINDER_TITLE};
use uvg_weather::{
    classify_uv, recommend_sunscreen, CancerRatePoint, GenderRatePoint, ProtectionItem,
    UvLevel, WeatherIcon, WeatherSnapshot,
};

use crate::dashboard::PLACEHOLDER_UV_INDEX;

pub const UNKNOWN_SUBURB: &str = "Unknown";
pub const UNKNOWN_TEMPERATURE: &str = "N/A";
pub const SEARCH_PROMPT: &str = "Enter your current Location to search";

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub suburb: String,
    pub temperature: String,
    pub description: String,
    pub icon: WeatherIcon,
    pub uv_index: f64,
}

impl WeatherCard {
    fn from_snapshot(snapshot: Option<&WeatherSnapshot>) -> Self {
        match snapshot {
            Some(w) => Self {
                suburb: w.suburb.clone(),
                temperature: format!("{}°C", w.temperature_c),
                description: w.description.clone(),
                icon: WeatherIcon::from_description(&w.description),
                uv_index: w.uv_index,
            },
            None => Self {
                suburb: UNKNOWN_SUBURB.to_string(),
                temperature: UNKNOWN_TEMPERATURE.to_string(),
                description: SEARCH_PROMPT.to_string(),
                icon: WeatherIcon::Sun,
                uv_index: PLACEHOLDER_UV_INDEX,
            },
        }
    }
}

/// Everything the renderer needs, captured at one instant.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub preferences: UserPreferences,
    pub weather: WeatherCard,
    pub uv_level: UvLevel,
    pub recommendation: &'static str,
    pub protection_items: Vec<ProtectionItem>,
    pub cancer_history: Vec<CancerRatePoint>,
    pub gender_rates: Vec<GenderRatePoint>,
    pub timer: TimerState,
}

impl DashboardView {
    pub fn new(
        preferences: UserPreferences,
        weather: Option<&WeatherSnapshot>,
        cancer_history: Vec<CancerRatePoint>,
        gender_rates: Vec<GenderRatePoint>,
        protection_items: Vec<ProtectionItem>,
        timer: TimerState,
    ) -> Self {
        let weather = WeatherCard::from_snapshot(weather);
        let uv_level = classify_uv(weather.uv_index);
        let recommendation = recommend_sunscreen(weather.uv_index, preferences.skin_type.as_str());

        Self {
            preferences,
            weather,
            uv_level,
            recommendation,
            protection_items,
            cancer_history,
            gender_rates,
            timer,
        }
    }

    pub fn timer_display(&self) -> String {
        format_hms(self.timer.remaining_secs)
    }

    pub fn timer_button(&self) -> &'static str {
        if self.timer.is_running() {
            "Stop"
        } else {
            "Start"
        }
    }

    pub fn timer_color(&self) -> &'static str {
        if self.timer.remaining_secs == 0 {
            "red"
        } else {
            "green"
        }
    }

    /// Title and body of the reapply dialog, when it is showing.
    pub fn reminder(&self) -> Option<(&'static str, String)> {
        self.timer
            .reminder_visible()
            .then(|| (REMINDER_TITLE, reminder_message(self.timer.duration_secs)))
    }

    /// Pie-chart labels: `name: 42.0%`.
    pub fn gender_shares(&self) -> Vec<String> {
        let total: f64 = self.gender_rates.iter().map(|g| g.value).sum();
        self.gender_rates
            .iter()
            .map(|g| {
                if total > 0.0 {
                    format!("{}: {:.1}%", g.name, g.value / total * 100.0)
                } else {
                    format!("{}: {}", g.name, g.value)
                }
            })
            .collect()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "UV Guardian")?;
        writeln!(f)?;

        let p = &self.preferences;
        writeln!(
            f,
            "Profile: age {} | {} | {} skin",
            p.age, p.gender, p.skin_type
        )?;
        writeln!(f)?;

        let w = &self.weather;
        writeln!(f, "📍 {}  {}  {} {}", w.suburb, w.temperature, w.icon.glyph(), w.description)?;
        let suns: String = self
            .uv_level
            .sun_icons()
            .iter()
            .map(|c| if *c == uvg_weather::uv::INACTIVE_SUN_COLOR { '·' } else { '☀' })
            .collect();
        writeln!(
            f,
            "UV Index: {} ({}) {}",
            w.uv_index,
            self.uv_level.label(),
            suns
        )?;
        writeln!(f)?;

        writeln!(f, "Protection: {}", self.recommendation)?;
        if !self.protection_items.is_empty() {
            writeln!(f, "Recommended Protection Items:")?;
            for item in &self.protection_items {
                writeln!(f, "  - {} ({})", item.item_name, item.img_link)?;
            }
        }
        writeln!(f)?;

        writeln!(
            f,
            "Reapply Sunscreen Reminder: {} [{}] ({})",
            self.timer_display(),
            self.timer_button(),
            self.timer_color()
        )?;

        if !self.cancer_history.is_empty() {
            writeln!(f)?;
            writeln!(f, "Cancer Rate Trend (per 100,000)")?;
            for point in &self.cancer_history {
                writeln!(f, "  {}  {:>8.1}  {}", point.year, point.rate, point.gender)?;
            }
        }

        let shares = self.gender_shares();
        if !shares.is_empty() {
            writeln!(f)?;
            writeln!(f, "Male vs. Female Skin Cancer Rate: {}", shares.join(", "))?;
        }

        if let Some((title, body)) = self.reminder() {
            writeln!(f)?;
            writeln!(f, "*** {} ***", title)?;
            writeln!(f, "{}", body)?;
        }

        Ok(())
    }
}
