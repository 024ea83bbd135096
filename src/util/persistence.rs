use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;
use tracing::{debug, info};

use crate::domain::{ParamsError, ValuationParams};

pub const APP_QUALIFIER: &str = "com";
pub const APP_ORG: &str = "EmviApp";
pub const APP_DIR_NAME: &str = "SalonValuation";

const SETTINGS_FILE: &str = "settings.json";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_DIR_NAME)
}

pub fn default_settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
}

/// Connection details for a PostgREST-style table that accepts lead rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSinkSettings {
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "valuation_leads".to_string()
}

impl RemoteSinkSettings {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: default_table(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSettings {
    #[serde(default)]
    pub params: ValuationParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteSinkSettings>,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: SerdeError,
    },
    #[error(transparent)]
    Serde(#[from] SerdeError),
    #[error("settings file {path} holds unusable parameters: {source}")]
    Params {
        path: PathBuf,
        #[source]
        source: ParamsError,
    },
}

/// Resolves the explicit path or the platform default.
pub fn settings_path(explicit: Option<&Path>) -> Result<PathBuf, PersistError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_settings_path().ok_or(PersistError::StorageUnavailable),
    }
}

/// Missing file means defaults; a present but broken file is an error, not a silent reset.
pub fn load_settings(path: &Path) -> Result<PersistedSettings, PersistError> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(PersistedSettings::default());
    }

    let data = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: PersistedSettings =
        serde_json::from_str(&data).map_err(|source| PersistError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    settings.params.check().map_err(|source| PersistError::Params {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &PersistedSettings) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PersistError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "saved settings");
    Ok(())
}
