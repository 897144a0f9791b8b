//! Persisted user preferences: API key and preferred size label.
//!
//! Reads and writes are fused into one read-or-init operation: a value
//! supplied with the current request is persisted and used, an absent one
//! falls back to whatever was persisted last time.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlickrbbError;

/// Directory override consulted before the platform config dir, so tests
/// and scripts can point the store somewhere disposable.
pub const CONFIG_DIR_ENV: &str = "FLICKRBB_CONFIG_DIR";

const PREFS_FILE: &str = "prefs.json";

/// The two persisted fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefField {
    ApiKey,
    SizeLabel,
}

impl PrefField {
    pub fn name(&self) -> &'static str {
        match self {
            PrefField::ApiKey => "api-key",
            PrefField::SizeLabel => "size",
        }
    }
}

impl FromStr for PrefField {
    type Err = FlickrbbError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "api-key" => Ok(PrefField::ApiKey),
            "size" => Ok(PrefField::SizeLabel),
            other => Err(FlickrbbError::UnknownPreference(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size_label: Option<String>,
}

impl Preferences {
    fn get(&self, field: PrefField) -> Option<&str> {
        match field {
            PrefField::ApiKey => self.api_key.as_deref(),
            PrefField::SizeLabel => self.size_label.as_deref(),
        }
    }

    fn set(&mut self, field: PrefField, value: String) {
        match field {
            PrefField::ApiKey => self.api_key = Some(value),
            PrefField::SizeLabel => self.size_label = Some(value),
        }
    }
}

/// File-backed preference store.
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    /// Store rooted at an explicit directory.
    pub fn at(dir: &Path) -> Self {
        Self {
            path: dir.join(PREFS_FILE),
        }
    }

    /// Store at the default location: `$FLICKRBB_CONFIG_DIR`, or the
    /// platform config dir under a `flickrbb` subdirectory.
    pub fn open_default() -> Result<Self, FlickrbbError> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(Self::at(Path::new(&dir)));
        }

        let base = dirs::config_dir().ok_or(FlickrbbError::MissingParameter("config directory"))?;
        Ok(Self::at(&base.join("flickrbb")))
    }

    /// Read a single persisted field.
    pub fn get(&self, field: PrefField) -> Result<Option<String>, FlickrbbError> {
        Ok(self.load()?.get(field).map(str::to_string))
    }

    /// Persist a single field.
    pub fn set(&self, field: PrefField, value: &str) -> Result<(), FlickrbbError> {
        let mut prefs = self.load()?;
        prefs.set(field, value.to_string());
        self.save(&prefs)
    }

    /// The fused read-or-init operation: a non-empty supplied value is
    /// persisted and returned; otherwise the stored value (if any) is.
    pub fn resolve(
        &self,
        field: PrefField,
        supplied: Option<&str>,
    ) -> Result<Option<String>, FlickrbbError> {
        match supplied.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => {
                self.set(field, value)?;
                Ok(Some(value.to_string()))
            }
            None => self.get(field),
        }
    }

    fn load(&self) -> Result<Preferences, FlickrbbError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| FlickrbbError::Prefs {
                    path: self.path.clone(),
                    message: source.to_string(),
                })
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Ok(Preferences::default())
            }
            Err(source) => Err(FlickrbbError::Prefs {
                path: self.path.clone(),
                message: source.to_string(),
            }),
        }
    }

    fn save(&self, prefs: &Preferences) -> Result<(), FlickrbbError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| FlickrbbError::Prefs {
                path: self.path.clone(),
                message: source.to_string(),
            })?;
        }

        let contents =
            serde_json::to_string_pretty(prefs).map_err(|source| FlickrbbError::Prefs {
                path: self.path.clone(),
                message: source.to_string(),
            })?;

        fs::write(&self.path, contents).map_err(|source| FlickrbbError::Prefs {
            path: self.path.clone(),
            message: source.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PrefStore::at(dir.path());
        assert_eq!(store.get(PrefField::ApiKey).expect("get"), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PrefStore::at(dir.path());

        store.set(PrefField::ApiKey, "deadbeef").expect("set");
        store.set(PrefField::SizeLabel, "Medium").expect("set");

        assert_eq!(
            store.get(PrefField::ApiKey).expect("get").as_deref(),
            Some("deadbeef")
        );
        assert_eq!(
            store.get(PrefField::SizeLabel).expect("get").as_deref(),
            Some("Medium")
        );
    }

    #[test]
    fn resolve_persists_supplied_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PrefStore::at(dir.path());

        let resolved = store
            .resolve(PrefField::SizeLabel, Some("Large"))
            .expect("resolve");
        assert_eq!(resolved.as_deref(), Some("Large"));

        // A later access without a supplied value falls back to the store.
        let fallback = store.resolve(PrefField::SizeLabel, None).expect("resolve");
        assert_eq!(fallback.as_deref(), Some("Large"));
    }

    #[test]
    fn resolve_ignores_blank_supplied_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PrefStore::at(dir.path());
        store.set(PrefField::ApiKey, "stored").expect("set");

        let resolved = store.resolve(PrefField::ApiKey, Some("  ")).expect("resolve");
        assert_eq!(resolved.as_deref(), Some("stored"));
    }

    #[test]
    fn field_names_parse_back() {
        assert_eq!(
            "api-key".parse::<PrefField>().expect("parse"),
            PrefField::ApiKey
        );
        assert_eq!("size".parse::<PrefField>().expect("parse"), PrefField::SizeLabel);
        assert!(matches!(
            "colour".parse::<PrefField>(),
            Err(FlickrbbError::UnknownPreference(_))
        ));
    }
}
