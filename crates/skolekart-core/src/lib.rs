pub mod config;
pub mod geodata;
pub mod highlight;
pub mod locate;
pub mod project;
pub mod schools;
pub mod surface;
pub mod view;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KartError {
    #[error("map surface is not attached to a viewport")]
    NotAttached,
    #[error("failed to load dataset '{name}': {reason}")]
    ResourceLoad { name: String, reason: String },
    #[error("geolocation failed: {0}")]
    Geolocation(String),
    #[error("unknown layer '{0}'")]
    UnknownLayer(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KartError {
    pub fn resource(name: impl Into<String>, reason: impl ToString) -> Self {
        KartError::ResourceLoad {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Per-user configuration root, created on first use.
pub fn get_config_root() -> PathBuf {
    let dir = directories::ProjectDirs::from("no", "Skolekart", "Skolekart")
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    if !dir.exists() {
        let _ = std::fs::create_dir_all(&dir);
    }
    dir
}
