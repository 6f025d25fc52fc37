//! Remote data gateway client.
//!
//! Each `try_*` method surfaces a typed [`GatewayError`]. The plain `fetch_*`
//! methods are what the dashboard calls: they log the failure and degrade to
//! an empty list (or `None` for weather), so a dead endpoint only blanks the
//! card it feeds.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;
use uvg_core::{Gender, NetworkError, ReqwestErrorExt};

use crate::types::{
    lenient_f64, CancerRatePoint, GatewayError, GenderRatePoint, ProtectionItem, WeatherSnapshot,
};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("uv-guardian/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GenderRateRecord {
    gender: String,
    #[serde(deserialize_with = "lenient_f64")]
    rate: f64,
}

#[derive(Debug, Deserialize)]
struct LocationResponse {
    location: LocationInfo,
    weather: WeatherEnvelope,
}

#[derive(Debug, Deserialize)]
struct LocationInfo {
    locality: String,
}

#[derive(Debug, Deserialize)]
struct WeatherEnvelope {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp: f64,
    uvi: f64,
    weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: String,
}

impl TryFrom<LocationResponse> for WeatherSnapshot {
    type Error = GatewayError;

    fn try_from(resp: LocationResponse) -> Result<Self, Self::Error> {
        let description = resp
            .weather
            .current
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| GatewayError::Parse("weather conditions list is empty".into()))?;

        Ok(Self {
            suburb: resp.location.locality,
            temperature_c: resp.weather.current.temp,
            uv_index: resp.weather.current.uvi,
            description,
        })
    }
}

/// HTTP client for the UV Guardian gateway
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: Url,
    client: Arc<Client>,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last path segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.set_query(None);

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(ReqwestErrorExt::into_network_error)?;
        serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))
    }

    /// `GET /cancer?datatype=history`
    pub async fn try_fetch_cancer_history(&self) -> Result<Vec<CancerRatePoint>, GatewayError> {
        let url = self.endpoint("cancer", &[("datatype", "history")])?;
        let points: Vec<CancerRatePoint> = self.get_json(url).await?;
        tracing::info!("Fetched {} cancer rate points", points.len());
        Ok(points)
    }

    /// `GET /cancer?datatype=gender`, reshaped into chart slices.
    pub async fn try_fetch_cancer_by_gender(&self) -> Result<Vec<GenderRatePoint>, GatewayError> {
        let url = self.endpoint("cancer", &[("datatype", "gender")])?;
        let records: Vec<GenderRateRecord> = self.get_json(url).await?;
        Ok(records
            .into_iter()
            .map(|r| GenderRatePoint::new(r.gender, r.rate))
            .collect())
    }

    /// `GET /location?place={place}`.
    ///
    /// Returns `Ok(None)` without a request when `place` is blank.
    pub async fn try_fetch_weather(
        &self,
        place: &str,
    ) -> Result<Option<WeatherSnapshot>, GatewayError> {
        let place = place.trim();
        if place.is_empty() {
            tracing::debug!("Ignoring empty location search");
            return Ok(None);
        }

        let url = self.endpoint("location", &[("place", place)])?;
        let response: LocationResponse = self.get_json(url).await?;
        let snapshot = WeatherSnapshot::try_from(response)?;
        tracing::info!(
            "Weather for {}: {}°C, UV {}",
            snapshot.suburb,
            snapshot.temperature_c,
            snapshot.uv_index
        );
        Ok(Some(snapshot))
    }

    /// `GET /protection?gender={gender}&uv={uv_index}`
    pub async fn try_fetch_protection_items(
        &self,
        gender: Gender,
        uv_index: f64,
    ) -> Result<Vec<ProtectionItem>, GatewayError> {
        let uv = uv_index.to_string();
        let url = self.endpoint("protection", &[("gender", gender.as_str()), ("uv", &uv)])?;
        self.get_json(url).await
    }

    pub async fn fetch_cancer_history(&self) -> Vec<CancerRatePoint> {
        self.try_fetch_cancer_history().await.unwrap_or_else(|e| {
            tracing::error!("Error fetching cancer rate data: {}", e);
            Vec::new()
        })
    }

    pub async fn fetch_cancer_by_gender(&self) -> Vec<GenderRatePoint> {
        self.try_fetch_cancer_by_gender().await.unwrap_or_else(|e| {
            tracing::error!("Error fetching cancer rate by gender: {}", e);
            Vec::new()
        })
    }

    pub async fn fetch_weather(&self, place: &str) -> Option<WeatherSnapshot> {
        self.try_fetch_weather(place).await.unwrap_or_else(|e| {
            tracing::error!("Error fetching weather data for {:?}: {}", place, e);
            None
        })
    }

    pub async fn fetch_protection_items(&self, gender: Gender, uv_index: f64) -> Vec<ProtectionItem> {
        self.try_fetch_protection_items(gender, uv_index)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("Error fetching protection recommendations: {}", e);
                Vec::new()
            })
    }
}
