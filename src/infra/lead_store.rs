//! Local JSON log of computed valuation leads.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::ValuationLead;
use crate::util::persistence::project_dirs;

const LEADS_FILENAME: &str = "valuation_leads.json";
const LOG_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum LeadStoreError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error("failed to access lead log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("lead log {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LeadLog {
    version: u32,
    leads: Vec<ValuationLead>,
}

#[derive(Clone, Debug)]
pub struct FileLeadStore {
    path: PathBuf,
}

impl FileLeadStore {
    /// Store in the platform data directory.
    pub fn open_default() -> Result<Self, LeadStoreError> {
        let dirs = project_dirs().ok_or(LeadStoreError::StorageUnavailable)?;
        Ok(Self::at(dirs.data_local_dir().join(LEADS_FILENAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one lead and rewrites the log.
    pub fn create_record(&self, lead: &ValuationLead) -> Result<(), LeadStoreError> {
        let mut log = self.read_log()?;
        log.version = LOG_FORMAT_VERSION;
        log.leads.push(lead.clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io_error(parent, source))?;
        }
        let content = serde_json::to_string_pretty(&log)?;
        // Readers only ever see the old log or the complete new one.
        let staging = self.staging_path();
        fs::write(&staging, content).map_err(|source| self.io_error(&staging, source))?;
        fs::rename(&staging, &self.path).map_err(|source| self.io_error(&self.path, source))?;

        info!(
            lead_id = %lead.id,
            total = log.leads.len(),
            path = %self.path.display(),
            "stored valuation lead"
        );
        Ok(())
    }

    /// All stored leads, newest first.
    pub fn list(&self) -> Result<Vec<ValuationLead>, LeadStoreError> {
        let mut leads = self.read_log()?.leads;
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    fn read_log(&self) -> Result<LeadLog, LeadStoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no lead log yet");
            return Ok(LeadLog {
                version: LOG_FORMAT_VERSION,
                leads: Vec::new(),
            });
        }

        let content =
            fs::read_to_string(&self.path).map_err(|source| self.io_error(&self.path, source))?;
        let log: LeadLog =
            serde_json::from_str(&content).map_err(|source| LeadStoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        if log.version != LOG_FORMAT_VERSION {
            warn!(
                found = log.version,
                expected = LOG_FORMAT_VERSION,
                "lead log written by a different format version"
            );
        }
        Ok(log)
    }

    /// Sibling file in the same directory, so the rename never crosses filesystems.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| LEADS_FILENAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: io::Error) -> LeadStoreError {
        LeadStoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
