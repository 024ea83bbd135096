use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::entities::{ValuationInputs, ValuationResult};

/// A computed valuation handed to a persistence sink by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationLead {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub engine_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub inputs: ValuationInputs,
    pub result: ValuationResult,
}

impl ValuationLead {
    pub fn new(
        inputs: ValuationInputs,
        result: ValuationResult,
        email: Option<String>,
        engine_version: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: OffsetDateTime::now_utc(),
            engine_version: engine_version.into(),
            email: email
                .map(|email| email.trim().to_string())
                .filter(|email| !email.is_empty()),
            inputs,
            result,
        }
    }
}
