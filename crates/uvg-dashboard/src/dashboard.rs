//! Dashboard state and the user actions that change it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use uvg_core::{
    Gender, KeyValueStore, PreferenceError, PreferenceField, PreferenceStore, SkinType,
    UserPreferences,
};
use uvg_reminder::{Clock, ReminderService, TimerEvent, TimerPhase, TimerState};
use uvg_weather::{
    CancerRatePoint, GatewayClient, GenderRatePoint, ProtectionItem, WeatherSnapshot,
};

use crate::sequence::{RequestSequence, RequestTicket};
use crate::view::DashboardView;

/// UV index shown before any location has been searched.
pub const PLACEHOLDER_UV_INDEX: f64 = 1.0;

/// Gender breakdown shown until the gateway answers.
pub fn seed_gender_rates() -> Vec<GenderRatePoint> {
    vec![
        GenderRatePoint::new("Male", 80.0),
        GenderRatePoint::new("Female", 20.0),
    ]
}

/// Parameters of an in-flight protection lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProtectionRequest {
    pub ticket: RequestTicket,
    pub gender: Gender,
    pub uv_index: f64,
}

pub struct Dashboard {
    gateway: GatewayClient,
    prefs: PreferenceStore,
    preferences: UserPreferences,
    weather: Option<WeatherSnapshot>,
    cancer_history: Vec<CancerRatePoint>,
    gender_rates: Vec<GenderRatePoint>,
    protection_items: Vec<ProtectionItem>,
    reminder: ReminderService,
    timer_events: mpsc::UnboundedReceiver<TimerEvent>,
    search_seq: RequestSequence,
    protection_seq: RequestSequence,
}

impl Dashboard {
    /// Read preferences and restore any in-flight reminder countdown.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(
        gateway: GatewayClient,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        reminder_duration: Duration,
    ) -> Self {
        let prefs = PreferenceStore::new(store.clone());
        let preferences = prefs.load();
        let (reminder, timer_events) = ReminderService::restore(store, clock, reminder_duration);

        tracing::debug!(
            "Dashboard ready against {}: age {}, {}, {} skin",
            gateway.base_url(),
            preferences.age,
            preferences.gender,
            preferences.skin_type
        );

        Self {
            gateway,
            prefs,
            preferences,
            weather: None,
            cancer_history: Vec::new(),
            gender_rates: seed_gender_rates(),
            protection_items: Vec::new(),
            reminder,
            timer_events,
            search_seq: RequestSequence::new(),
            protection_seq: RequestSequence::new(),
        }
    }

    /// Fetch both chart series, then protection items for the current UV.
    pub async fn load(&mut self) {
        let (history, by_gender) = tokio::join!(
            self.gateway.fetch_cancer_history(),
            self.gateway.fetch_cancer_by_gender()
        );
        self.cancer_history = history;
        self.gender_rates = by_gender;

        self.refresh_protection().await;
    }

    pub fn preferences(&self) -> UserPreferences {
        self.preferences
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn cancer_history(&self) -> &[CancerRatePoint] {
        &self.cancer_history
    }

    pub fn gender_rates(&self) -> &[GenderRatePoint] {
        &self.gender_rates
    }

    pub fn protection_items(&self) -> &[ProtectionItem] {
        &self.protection_items
    }

    /// UV index driving recommendations: the searched reading, or the placeholder.
    pub fn uv_index(&self) -> f64 {
        self.weather
            .as_ref()
            .map_or(PLACEHOLDER_UV_INDEX, |w| w.uv_index)
    }

    // ---- search ----

    /// Search a place and, if the UV reading changed, refresh protection items.
    ///
    /// Returns whether the weather card was replaced.
    pub async fn search(&mut self, place: &str) -> bool {
        let Some(ticket) = self.begin_search(place) else {
            return false;
        };
        let previous_uv = self.uv_index();
        let result = self.gateway.fetch_weather(place).await;

        let applied = self.finish_search(ticket, result);
        if applied && self.uv_index() != previous_uv {
            self.refresh_protection().await;
        }
        applied
    }

    /// Issue a search ticket; `None` for a blank place (no request should be made).
    pub fn begin_search(&mut self, place: &str) -> Option<RequestTicket> {
        if place.trim().is_empty() {
            tracing::debug!("Ignoring empty search");
            return None;
        }
        Some(self.search_seq.issue())
    }

    /// Apply a search result if its ticket is still current and it carries data.
    pub fn finish_search(&mut self, ticket: RequestTicket, result: Option<WeatherSnapshot>) -> bool {
        if !self.search_seq.is_current(ticket) {
            tracing::debug!("Discarding superseded search result {:?}", ticket);
            return false;
        }
        match result {
            Some(snapshot) => {
                self.weather = Some(snapshot);
                true
            }
            None => false,
        }
    }

    // ---- protection ----

    /// Fetch protection items for the current gender and UV index.
    pub async fn refresh_protection(&mut self) {
        let Some(request) = self.begin_protection_refresh() else {
            return;
        };
        let items = self
            .gateway
            .fetch_protection_items(request.gender, request.uv_index)
            .await;
        self.finish_protection_refresh(request.ticket, items);
    }

    /// `None` when the UV index is zero; the previous items stay on screen.
    pub fn begin_protection_refresh(&mut self) -> Option<ProtectionRequest> {
        let uv_index = self.uv_index();
        if uv_index == 0.0 || uv_index.is_nan() {
            return None;
        }
        Some(ProtectionRequest {
            ticket: self.protection_seq.issue(),
            gender: self.preferences.gender,
            uv_index,
        })
    }

    pub fn finish_protection_refresh(
        &mut self,
        ticket: RequestTicket,
        items: Vec<ProtectionItem>,
    ) -> bool {
        if !self.protection_seq.is_current(ticket) {
            tracing::debug!("Discarding superseded protection result {:?}", ticket);
            return false;
        }
        self.protection_items = items;
        true
    }

    // ---- preferences ----

    pub fn set_age(&mut self, age: u32) {
        if let Err(e) = self.prefs.set_age(age) {
            tracing::warn!("Failed to save age: {}", e);
        }
        self.preferences.age = age;
    }

    /// Change gender and refresh the gender-specific protection items.
    pub async fn set_gender(&mut self, gender: Gender) {
        if let Err(e) = self.prefs.set_gender(gender) {
            tracing::warn!("Failed to save gender: {}", e);
        }
        let changed = self.preferences.gender != gender;
        self.preferences.gender = gender;
        if changed {
            self.refresh_protection().await;
        }
    }

    pub fn set_skin_type(&mut self, skin_type: SkinType) {
        if let Err(e) = self.prefs.set_skin_type(skin_type) {
            tracing::warn!("Failed to save skin type: {}", e);
        }
        self.preferences.skin_type = skin_type;
    }

    /// Apply a free-text edit. Blank input is ignored.
    pub async fn apply_edit(
        &mut self,
        field: PreferenceField,
        raw: &str,
    ) -> Result<bool, PreferenceError> {
        let previous_gender = self.preferences.gender;
        let written = self.prefs.apply_edit(field, raw)?;
        if written {
            self.preferences = self.prefs.load();
            if self.preferences.gender != previous_gender {
                self.refresh_protection().await;
            }
        }
        Ok(written)
    }

    // ---- reminder timer ----

    pub fn timer_state(&self) -> TimerState {
        self.reminder.state()
    }

    pub fn start_timer(&mut self) -> bool {
        self.reminder.start()
    }

    pub fn stop_timer(&mut self) -> bool {
        self.reminder.stop()
    }

    pub fn toggle_timer(&mut self) -> TimerPhase {
        self.reminder.toggle()
    }

    pub fn acknowledge_reminder(&mut self) -> bool {
        self.reminder.acknowledge()
    }

    /// Wait for the next tick or reminder.
    pub async fn next_timer_event(&mut self) -> Option<TimerEvent> {
        self.timer_events.recv().await
    }

    /// Non-blocking variant of [`Self::next_timer_event`].
    pub fn try_timer_event(&mut self) -> Option<TimerEvent> {
        self.timer_events.try_recv().ok()
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::new(
            self.preferences,
            self.weather.as_ref(),
            self.cancer_history.clone(),
            self.gender_rates.clone(),
            self.protection_items.clone(),
            self.timer_state(),
        )
    }
}
