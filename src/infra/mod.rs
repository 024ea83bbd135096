//! Persistence sinks for computed leads. The engine never calls these itself.

pub mod lead_store;
pub mod rest;

use thiserror::Error;

use crate::domain::ValuationLead;

pub use lead_store::{FileLeadStore, LeadStoreError};
pub use rest::{RestLeadSink, RestSinkError};

#[derive(Debug, Error)]
pub enum LeadSinkError {
    #[error(transparent)]
    Local(#[from] LeadStoreError),
    #[error(transparent)]
    Remote(#[from] RestSinkError),
}

/// Generic "create record" target for valuation leads.
#[derive(Clone)]
pub enum LeadSink {
    Local(FileLeadStore),
    Remote(RestLeadSink),
}

impl LeadSink {
    pub fn describe(&self) -> String {
        match self {
            Self::Local(store) => format!("local log {}", store.path().display()),
            Self::Remote(sink) => format!("remote table {}", sink.table_url()),
        }
    }

    pub async fn create_record(&self, lead: &ValuationLead) -> Result<(), LeadSinkError> {
        match self {
            Self::Local(store) => store.create_record(lead)?,
            Self::Remote(sink) => sink.create_record(lead).await?,
        }
        Ok(())
    }
}
