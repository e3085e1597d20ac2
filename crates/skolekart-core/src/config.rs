use crate::geodata::DatasetSource;
use crate::view::LonLat;
use crate::KartError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User-tunable defaults, persisted as JSON under the config root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: LonLat,
    pub zoom: f64,
    /// Composite the county boundary layer at startup.
    pub include_counties: bool,
    /// Start with the toggleable school layer shown (checkbox pre-checked).
    pub schools_visible: bool,
    pub data_dir: PathBuf,
    pub municipalities: String,
    pub counties: String,
    pub upper_secondary: String,
    pub schools: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: LonLat::new(10.7, 59.9),
            zoom: 11.0,
            include_counties: false,
            schools_visible: true,
            data_dir: PathBuf::from("data"),
            municipalities: "kommuner.geojson".to_string(),
            counties: "fylker.geojson".to_string(),
            upper_secondary: "vgs.geojson".to_string(),
            schools: "barne-og-ungdomsskoler.geojson".to_string(),
        }
    }
}

impl MapConfig {
    /// Resolves a dataset entry: URLs pass through, everything else is a
    /// file under the data directory.
    pub fn source_for(&self, entry: &str) -> DatasetSource {
        if entry.starts_with("http://") || entry.starts_with("https://") {
            DatasetSource::Url(entry.to_string())
        } else {
            DatasetSource::Path(self.data_dir.join(entry))
        }
    }

    pub fn config_path() -> PathBuf {
        crate::get_config_root().join("config.json")
    }

    pub fn load_from(path: &Path) -> Result<Self, KartError> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| KartError::resource("config", e))
    }

    /// Loads the persisted config, falling back to defaults on a missing
    /// or unreadable file.
    pub fn load_or_default() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Could not read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), KartError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self).map_err(|e| KartError::resource("config", e))?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn save(&self) -> Result<(), KartError> {
        self.save_to(&Self::config_path())
    }
}
