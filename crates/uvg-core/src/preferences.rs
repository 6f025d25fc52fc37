//! User preferences persisted field-by-field in a [`KeyValueStore`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PreferenceError, StoreError};
use crate::store::{keys, KeyValueStore};

pub const DEFAULT_AGE: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gender {
    Male,
    #[default]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(PreferenceError::InvalidValue {
                field: keys::GENDER,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SkinType {
    Light,
    Medium,
    #[default]
    Dark,
}

impl SkinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Dark => "Dark",
        }
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinType {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "dark" => Ok(Self::Dark),
            _ => Err(PreferenceError::InvalidValue {
                field: keys::SKIN_TYPE,
                value: s.to_string(),
            }),
        }
    }
}

/// Snapshot of all three preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub age: u32,
    pub gender: Gender,
    pub skin_type: SkinType,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            gender: Gender::default(),
            skin_type: SkinType::default(),
        }
    }
}

/// Which preference a free-text edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceField {
    Age,
    Gender,
    SkinType,
}

/// Reads and writes preferences, one key per field.
#[derive(Clone)]
pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read all fields, substituting defaults for absent or unreadable values.
    pub fn load(&self) -> UserPreferences {
        UserPreferences {
            age: self.age(),
            gender: self.gender(),
            skin_type: self.skin_type(),
        }
    }

    pub fn age(&self) -> u32 {
        self.read_or_default(keys::AGE, DEFAULT_AGE, |raw| raw.trim().parse().ok())
    }

    pub fn gender(&self) -> Gender {
        self.read_or_default(keys::GENDER, Gender::default(), |raw| raw.parse().ok())
    }

    pub fn skin_type(&self) -> SkinType {
        self.read_or_default(keys::SKIN_TYPE, SkinType::default(), |raw| raw.parse().ok())
    }

    pub fn set_age(&self, age: u32) -> Result<(), StoreError> {
        self.store.set(keys::AGE, &age.to_string())
    }

    pub fn set_gender(&self, gender: Gender) -> Result<(), StoreError> {
        self.store.set(keys::GENDER, gender.as_str())
    }

    pub fn set_skin_type(&self, skin_type: SkinType) -> Result<(), StoreError> {
        self.store.set(keys::SKIN_TYPE, skin_type.as_str())
    }

    /// Apply a raw text edit to one field.
    ///
    /// An empty edit is ignored and nothing is written; returns whether the
    /// store was updated.
    pub fn apply_edit(&self, field: PreferenceField, raw: &str) -> Result<bool, PreferenceError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(false);
        }

        match field {
            PreferenceField::Age => {
                let age = raw.parse().map_err(|_| PreferenceError::InvalidValue {
                    field: keys::AGE,
                    value: raw.to_string(),
                })?;
                self.set_age(age)?;
            }
            PreferenceField::Gender => self.set_gender(raw.parse()?)?,
            PreferenceField::SkinType => self.set_skin_type(raw.parse()?)?,
        }
        Ok(true)
    }

    fn read_or_default<T>(&self, key: &str, default: T, parse: impl FnOnce(&str) -> Option<T>) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring unreadable stored {}: {:?}", key, raw);
                default
            }),
            Ok(None) => default,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SqliteStore};

    fn memory_prefs() -> (Arc<MemoryStore>, PreferenceStore) {
        let store = Arc::new(MemoryStore::new());
        let prefs = PreferenceStore::new(store.clone());
        (store, prefs)
    }

    #[test]
    fn test_defaults_on_first_run() {
        let (_, prefs) = memory_prefs();
        let loaded = prefs.load();
        assert_eq!(loaded.age, 24);
        assert_eq!(loaded.gender, Gender::Female);
        assert_eq!(loaded.skin_type, SkinType::Dark);
    }

    #[test]
    fn test_age_round_trip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let prefs = PreferenceStore::new(Arc::new(SqliteStore::open(&path).unwrap()));
            prefs.set_age(40).unwrap();
        }

        let prefs = PreferenceStore::new(Arc::new(SqliteStore::open(&path).unwrap()));
        assert_eq!(prefs.age(), 40);
    }

    #[test]
    fn test_stored_values_are_coerced_case_insensitively() {
        let (store, prefs) = memory_prefs();
        store.set(keys::GENDER, "male").unwrap();
        store.set(keys::SKIN_TYPE, "LIGHT").unwrap();
        store.set(keys::AGE, " 52 ").unwrap();

        let loaded = prefs.load();
        assert_eq!(loaded.gender, Gender::Male);
        assert_eq!(loaded.skin_type, SkinType::Light);
        assert_eq!(loaded.age, 52);
    }

    #[test]
    fn test_garbage_values_fall_back_to_defaults() {
        let (store, prefs) = memory_prefs();
        store.set(keys::AGE, "forty").unwrap();
        store.set(keys::SKIN_TYPE, "olive").unwrap();

        assert_eq!(prefs.age(), DEFAULT_AGE);
        assert_eq!(prefs.skin_type(), SkinType::Dark);
    }

    #[test]
    fn test_each_field_written_independently() {
        let (store, prefs) = memory_prefs();
        prefs.set_skin_type(SkinType::Medium).unwrap();

        assert_eq!(store.get(keys::SKIN_TYPE).unwrap().as_deref(), Some("Medium"));
        assert_eq!(store.get(keys::AGE).unwrap(), None);
        assert_eq!(store.get(keys::GENDER).unwrap(), None);
    }

    #[test]
    fn test_empty_edit_is_ignored() {
        let (store, prefs) = memory_prefs();
        prefs.set_age(33).unwrap();

        assert!(!prefs.apply_edit(PreferenceField::Age, "").unwrap());
        assert!(!prefs.apply_edit(PreferenceField::Gender, "   ").unwrap());
        assert_eq!(store.get(keys::AGE).unwrap().as_deref(), Some("33"));
        assert_eq!(store.get(keys::GENDER).unwrap(), None);
    }

    #[test]
    fn test_edit_parses_and_persists() {
        let (_, prefs) = memory_prefs();
        assert!(prefs.apply_edit(PreferenceField::Age, "61").unwrap());
        assert!(prefs.apply_edit(PreferenceField::Gender, "Male").unwrap());
        assert!(prefs.apply_edit(PreferenceField::SkinType, "light").unwrap());

        assert_eq!(
            prefs.load(),
            UserPreferences {
                age: 61,
                gender: Gender::Male,
                skin_type: SkinType::Light,
            }
        );
    }

    #[test]
    fn test_invalid_edit_is_rejected() {
        let (store, prefs) = memory_prefs();
        let err = prefs.apply_edit(PreferenceField::Age, "-3").unwrap_err();
        assert!(matches!(err, PreferenceError::InvalidValue { field: "age", .. }));
        assert_eq!(store.get(keys::AGE).unwrap(), None);
    }
}
