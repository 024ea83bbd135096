use serde::{Deserialize, Serialize};

/// Qualitative profit margin picked on the form when the owner has no exact figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProfitMarginChoice {
    Low,
    Normal,
    High,
}

impl ProfitMarginChoice {
    pub const ALL: [ProfitMarginChoice; 3] = [Self::Low, Self::Normal, Self::High];
}

/// Which profit figure the draft carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitMode {
    #[default]
    Estimate,
    Actual,
}

/// Validated profit signal. Replaces the `profitMode` + `profitMarginChoice` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ProfitSignal {
    Estimate { margin: ProfitMarginChoice },
    Actual {
        #[serde(rename = "monthlyProfit")]
        monthly_profit: f64,
    },
}

impl ProfitSignal {
    pub fn mode(&self) -> ProfitMode {
        match self {
            Self::Estimate { .. } => ProfitMode::Estimate,
            Self::Actual { .. } => ProfitMode::Actual,
        }
    }
}

/// An in-progress form. Every field may still be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuationDraft {
    pub monthly_revenue: Option<f64>,
    pub years_in_business: Option<f64>,
    pub has_loyal_client_base: Option<bool>,
    pub location: Option<String>,
    pub profit_mode: ProfitMode,
    pub profit_margin_choice: Option<ProfitMarginChoice>,
    /// Only read when `profit_mode` is `Actual`.
    pub monthly_profit: Option<f64>,
    pub google_rating: Option<f64>,
    pub google_review_count: Option<u32>,
    pub number_of_stations: Option<u32>,
}

/// Inputs that passed validation. Only built by `ValuationDraft::into_inputs`
/// or directly by callers that already hold checked values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInputs {
    pub monthly_revenue: f64,
    pub years_in_business: f64,
    pub has_loyal_client_base: bool,
    pub location: String,
    pub profit: ProfitSignal,
    pub google_rating: Option<f64>,
    pub google_review_count: Option<u32>,
    pub number_of_stations: Option<u32>,
}

impl From<&ValuationInputs> for ValuationDraft {
    fn from(inputs: &ValuationInputs) -> Self {
        let (profit_margin_choice, monthly_profit) = match inputs.profit {
            ProfitSignal::Estimate { margin } => (Some(margin), None),
            ProfitSignal::Actual { monthly_profit } => (None, Some(monthly_profit)),
        };
        Self {
            monthly_revenue: Some(inputs.monthly_revenue),
            years_in_business: Some(inputs.years_in_business),
            has_loyal_client_base: Some(inputs.has_loyal_client_base),
            location: Some(inputs.location.clone()),
            profit_mode: inputs.profit.mode(),
            profit_margin_choice,
            monthly_profit,
            google_rating: inputs.google_rating,
            google_review_count: inputs.google_review_count,
            number_of_stations: inputs.number_of_stations,
        }
    }
}

/// Each additive term that went into the final multiple.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleAdjustments {
    pub base_multiple: f64,
    pub location: f64,
    pub age: f64,
    pub reputation: f64,
    pub loyalty: f64,
    pub unclamped_multiple: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationBreakdown {
    #[serde(rename = "annualSDE")]
    pub annual_sde: f64,
    pub final_multiple: f64,
    pub location_area_name: String,
    pub location_tier: u8,
    pub assets_added: f64,
    pub adjustments: MultipleAdjustments,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub low: f64,
    pub base: f64,
    pub high: f64,
    pub breakdown: ValuationBreakdown,
}
