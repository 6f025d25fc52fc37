//! UV banding and sunscreen advice.
//!
//! Both lookups are total: negative and NaN readings band as Low, and any
//! skin-type string is accepted (unrecognised values take the "otherwise"
//! branch of each threshold).

use serde::{Deserialize, Serialize};

/// Number of sun icons in the UV gauge.
pub const SUN_ICON_SLOTS: usize = 5;

/// Colour of gauge slots above the current level.
pub const INACTIVE_SUN_COLOR: &str = "gray";

/// UV index category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Extreme => "Extreme",
        }
    }

    pub fn color_token(&self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Moderate => "yellow",
            Self::High => "orange",
            Self::VeryHigh => "red",
            Self::Extreme => "purple",
        }
    }

    /// Lit sun icons out of [`SUN_ICON_SLOTS`]
    pub fn icon_count(&self) -> usize {
        match self {
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
            Self::VeryHigh => 4,
            Self::Extreme => 5,
        }
    }

    /// Colour of each gauge slot, lit slots first.
    pub fn sun_icons(&self) -> [&'static str; SUN_ICON_SLOTS] {
        let mut slots = [INACTIVE_SUN_COLOR; SUN_ICON_SLOTS];
        for slot in slots.iter_mut().take(self.icon_count()) {
            *slot = self.color_token();
        }
        slots
    }
}

pub fn classify_uv(uv_index: f64) -> UvLevel {
    if uv_index.is_nan() || uv_index <= 2.0 {
        UvLevel::Low
    } else if uv_index <= 5.0 {
        UvLevel::Moderate
    } else if uv_index <= 7.0 {
        UvLevel::High
    } else if uv_index <= 10.0 {
        UvLevel::VeryHigh
    } else {
        UvLevel::Extreme
    }
}

pub const NO_SUNSCREEN: &str = "No sunscreen needed";
pub const SPF_30: &str = "Sunscreen SPF 30 recommended";
pub const SPF_50: &str = "Sunscreen SPF 50 recommended";
pub const SPF_50_HIGHLY: &str = "Sunscreen SPF 50 highly recommended";
pub const SPF_50_MUST: &str = "Sunscreen SPF 50 is a must!";

/// Sunscreen advice for a UV reading and skin type (compared case-insensitively).
pub fn recommend_sunscreen(uv_index: f64, skin_type: &str) -> &'static str {
    let skin = skin_type.trim().to_ascii_lowercase();

    if uv_index.is_nan() || uv_index <= 2.0 {
        NO_SUNSCREEN
    } else if uv_index <= 5.0 {
        if skin == "dark" {
            SPF_30
        } else {
            SPF_50
        }
    } else if uv_index <= 7.0 {
        if skin == "light" {
            SPF_50_HIGHLY
        } else {
            SPF_30
        }
    } else {
        SPF_50_MUST
    }
}

/// Icon shown beside the weather description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    #[default]
    Sun,
    Cloud,
    Rain,
    Thunderstorm,
    Snow,
    Wind,
}

impl WeatherIcon {
    /// Keyword match on a free-text description.
    ///
    /// Checked in order, so "thunderstorm with light rain" shows rain.
    pub fn from_description(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("clear") {
            Self::Sun
        } else if lower.contains("cloud") {
            Self::Cloud
        } else if lower.contains("rain") {
            Self::Rain
        } else if lower.contains("thunderstorm") {
            Self::Thunderstorm
        } else if lower.contains("snow") {
            Self::Snow
        } else if lower.contains("wind") {
            Self::Wind
        } else {
            Self::Sun
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Cloud => "☁",
            Self::Rain => "🌧",
            Self::Thunderstorm => "⛈",
            Self::Snow => "❄",
            Self::Wind => "🌬",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_band_boundaries() {
        assert_eq!(classify_uv(0.0), UvLevel::Low);
        assert_eq!(classify_uv(2.0), UvLevel::Low);
        assert_eq!(classify_uv(2.01), UvLevel::Moderate);
        assert_eq!(classify_uv(5.0), UvLevel::Moderate);
        assert_eq!(classify_uv(5.5), UvLevel::High);
        assert_eq!(classify_uv(7.0), UvLevel::High);
        assert_eq!(classify_uv(7.1), UvLevel::VeryHigh);
        assert_eq!(classify_uv(10.0), UvLevel::VeryHigh);
        assert_eq!(classify_uv(10.5), UvLevel::Extreme);
        assert_eq!(classify_uv(16.0), UvLevel::Extreme);
    }

    #[test]
    fn test_uv_banding_is_monotonic() {
        let mut previous = classify_uv(0.0);
        for tenth in 0..=200 {
            let level = classify_uv(f64::from(tenth) / 10.0);
            assert!(level >= previous, "band went down at uv={}", f64::from(tenth) / 10.0);
            previous = level;
        }
    }

    #[test]
    fn test_icon_counts_and_labels() {
        let expected = [
            (1.0, "Low", "green", 1),
            (4.0, "Moderate", "yellow", 2),
            (6.0, "High", "orange", 3),
            (9.0, "Very High", "red", 4),
            (12.0, "Extreme", "purple", 5),
        ];
        for (uv, label, color, count) in expected {
            let level = classify_uv(uv);
            assert_eq!(level.label(), label);
            assert_eq!(level.color_token(), color);
            assert_eq!(level.icon_count(), count);
        }
    }

    #[test]
    fn test_nan_and_negative_band_low() {
        assert_eq!(classify_uv(f64::NAN), UvLevel::Low);
        assert_eq!(classify_uv(-1.0), UvLevel::Low);
        assert_eq!(recommend_sunscreen(f64::NAN, "light"), NO_SUNSCREEN);
    }

    #[test]
    fn test_sun_icons() {
        assert_eq!(
            UvLevel::High.sun_icons(),
            ["orange", "orange", "orange", "gray", "gray"]
        );
        assert_eq!(UvLevel::Extreme.sun_icons(), ["purple"; 5]);
    }

    #[test]
    fn test_sunscreen_boundary_table() {
        assert_eq!(recommend_sunscreen(2.0, "dark"), "No sunscreen needed");
        assert_eq!(recommend_sunscreen(5.0, "dark"), "Sunscreen SPF 30 recommended");
        assert_eq!(recommend_sunscreen(5.0, "light"), "Sunscreen SPF 50 recommended");
        assert_eq!(recommend_sunscreen(5.0, "medium"), "Sunscreen SPF 50 recommended");
        assert_eq!(recommend_sunscreen(7.0, "light"), "Sunscreen SPF 50 highly recommended");
        assert_eq!(recommend_sunscreen(7.0, "dark"), "Sunscreen SPF 30 recommended");
        assert_eq!(recommend_sunscreen(11.0, "medium"), "Sunscreen SPF 50 is a must!");
    }

    #[test]
    fn test_sunscreen_skin_type_is_case_insensitive() {
        assert_eq!(recommend_sunscreen(4.0, "Dark"), SPF_30);
        assert_eq!(recommend_sunscreen(4.0, "DARK"), SPF_30);
        assert_eq!(recommend_sunscreen(6.0, "Light"), SPF_50_HIGHLY);
    }

    #[test]
    fn test_unknown_skin_type_takes_else_branch() {
        assert_eq!(recommend_sunscreen(4.0, "olive"), SPF_50);
        assert_eq!(recommend_sunscreen(6.0, ""), SPF_30);
    }

    #[test]
    fn test_weather_icon_keywords() {
        assert_eq!(WeatherIcon::from_description("clear sky"), WeatherIcon::Sun);
        assert_eq!(WeatherIcon::from_description("Broken Clouds"), WeatherIcon::Cloud);
        assert_eq!(WeatherIcon::from_description("light rain"), WeatherIcon::Rain);
        assert_eq!(
            WeatherIcon::from_description("thunderstorm with light rain"),
            WeatherIcon::Rain
        );
        assert_eq!(WeatherIcon::from_description("thunderstorm"), WeatherIcon::Thunderstorm);
        assert_eq!(WeatherIcon::from_description("light snow"), WeatherIcon::Snow);
        assert_eq!(WeatherIcon::from_description("windy"), WeatherIcon::Wind);
        assert_eq!(WeatherIcon::from_description("haze"), WeatherIcon::Sun);
    }
}
