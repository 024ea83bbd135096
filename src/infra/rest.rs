//! Thin asynchronous client that inserts lead rows into a PostgREST-style table.
//!
//! - One flat row per lead, snake_case columns.
//! - No retries: a failed insert is reported to the caller.

use reqwest::{header, Client, Request, Url};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{ProfitMarginChoice, ProfitSignal, ValuationLead};
use crate::util::persistence::RemoteSinkSettings;
use crate::util::version::{version_label, APP_NAME};

#[derive(Debug, Error)]
pub enum RestSinkError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("failed to format lead timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Column layout of the `valuation_leads` table.
#[derive(Debug, Serialize, PartialEq)]
pub struct LeadRow<'a> {
    pub id: String,
    pub created_at: String,
    pub engine_version: &'a str,
    pub email: Option<&'a str>,
    pub location: &'a str,
    pub monthly_revenue: f64,
    pub years_in_business: f64,
    pub has_loyal_client_base: bool,
    pub profit_mode: &'static str,
    pub profit_margin_choice: Option<&'static str>,
    pub monthly_profit: Option<f64>,
    pub google_rating: Option<f64>,
    pub google_review_count: Option<u32>,
    pub number_of_stations: Option<u32>,
    pub annual_sde: f64,
    pub final_multiple: f64,
    pub location_tier: u8,
    pub estimated_low: f64,
    pub estimated_base: f64,
    pub estimated_high: f64,
    pub assets_added: f64,
}

impl<'a> LeadRow<'a> {
    pub fn from_lead(lead: &'a ValuationLead) -> Result<Self, RestSinkError> {
        let inputs = &lead.inputs;
        let result = &lead.result;
        let (profit_mode, profit_margin_choice, monthly_profit) = match inputs.profit {
            ProfitSignal::Estimate { margin } => ("estimate", Some(margin_code(margin)), None),
            ProfitSignal::Actual { monthly_profit } => ("actual", None, Some(monthly_profit)),
        };

        Ok(Self {
            id: lead.id.to_string(),
            created_at: lead
                .created_at
                .format(&time::format_description::well_known::Rfc3339)?,
            engine_version: &lead.engine_version,
            email: lead.email.as_deref(),
            location: &inputs.location,
            monthly_revenue: inputs.monthly_revenue,
            years_in_business: inputs.years_in_business,
            has_loyal_client_base: inputs.has_loyal_client_base,
            profit_mode,
            profit_margin_choice,
            monthly_profit,
            google_rating: inputs.google_rating,
            google_review_count: inputs.google_review_count,
            number_of_stations: inputs.number_of_stations,
            annual_sde: result.breakdown.annual_sde,
            final_multiple: result.breakdown.final_multiple,
            location_tier: result.breakdown.location_tier,
            estimated_low: result.low,
            estimated_base: result.base,
            estimated_high: result.high,
            assets_added: result.breakdown.assets_added,
        })
    }
}

fn margin_code(margin: ProfitMarginChoice) -> &'static str {
    match margin {
        ProfitMarginChoice::Low => "LOW",
        ProfitMarginChoice::Normal => "NORMAL",
        ProfitMarginChoice::High => "HIGH",
    }
}

#[derive(Clone)]
pub struct RestLeadSink {
    http: Client,
    table_url: Url,
    api_key: String,
}

impl RestLeadSink {
    pub fn new(settings: &RemoteSinkSettings) -> Result<Self, RestSinkError> {
        let mut base = settings.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let table_url = Url::parse(&base)?.join(&format!("rest/v1/{}", settings.table))?;

        let user_agent = format!("{}/{}", APP_NAME.replace(' ', "-"), version_label());
        let http = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            http,
            table_url,
            api_key: settings.api_key.clone(),
        })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    /// The insert request, built without sending it.
    pub fn build_request(&self, lead: &ValuationLead) -> Result<Request, RestSinkError> {
        let request = self
            .http
            .post(self.table_url.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .json(&LeadRow::from_lead(lead)?)
            .build()?;
        Ok(request)
    }

    pub async fn create_record(&self, lead: &ValuationLead) -> Result<(), RestSinkError> {
        let request = self.build_request(lead)?;
        let response = self.http.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(%status, error = %err, "failed to read remote sink error body");
                    String::new()
                }
            };
            warn!(%status, lead_id = %lead.id, "remote sink rejected lead");
            return Err(RestSinkError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!(lead_id = %lead.id, url = %self.table_url, "inserted valuation lead");
        Ok(())
    }
}
