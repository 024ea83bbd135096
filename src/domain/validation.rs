//! Completeness checks for an in-progress valuation form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{ProfitMode, ProfitSignal, ValuationDraft, ValuationInputs};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Monthly revenue is required and must be positive.")]
    MonthlyRevenue,
    #[error("Years in business is required.")]
    YearsInBusiness,
    #[error("Location is required.")]
    Location,
    #[error("Profit margin selection is required.")]
    ProfitMargin,
    #[error("Monthly profit is required and cannot exceed monthly revenue.")]
    MonthlyProfit,
    #[error("Rating must be between 0 and 5.")]
    Rating,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_issues(issues: &[ValidationIssue]) -> Self {
        Self {
            valid: issues.is_empty(),
            errors: issues.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Collects every problem with the draft instead of stopping at the first.
pub fn validate(draft: &ValuationDraft) -> ValidationReport {
    ValidationReport::from_issues(&collect_issues(draft))
}

pub fn collect_issues(draft: &ValuationDraft) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let revenue = draft.monthly_revenue.filter(|v| v.is_finite() && *v > 0.0);
    if revenue.is_none() {
        issues.push(ValidationIssue::MonthlyRevenue);
    }

    if !draft
        .years_in_business
        .is_some_and(|years| years.is_finite() && years >= 0.0)
    {
        issues.push(ValidationIssue::YearsInBusiness);
    }

    if !draft
        .location
        .as_deref()
        .is_some_and(|location| !location.trim().is_empty())
    {
        issues.push(ValidationIssue::Location);
    }

    match draft.profit_mode {
        ProfitMode::Estimate => {
            if draft.profit_margin_choice.is_none() {
                issues.push(ValidationIssue::ProfitMargin);
            }
        }
        ProfitMode::Actual => {
            let plausible = draft.monthly_profit.is_some_and(|profit| {
                profit.is_finite()
                    && profit >= 0.0
                    && revenue.map(|revenue| profit <= revenue).unwrap_or(true)
            });
            if !plausible {
                issues.push(ValidationIssue::MonthlyProfit);
            }
        }
    }

    if let Some(rating) = draft.google_rating {
        if !(0.0..=5.0).contains(&rating) {
            issues.push(ValidationIssue::Rating);
        }
    }

    issues
}

impl ValuationDraft {
    pub fn validate(&self) -> ValidationReport {
        validate(self)
    }

    /// Converts a draft into checked inputs, or returns the full report.
    pub fn into_inputs(self) -> Result<ValuationInputs, ValidationReport> {
        let report = validate(&self);
        if !report.valid {
            return Err(report);
        }

        let profit = match self.profit_mode {
            ProfitMode::Estimate => self
                .profit_margin_choice
                .map(|margin| ProfitSignal::Estimate { margin }),
            ProfitMode::Actual => self
                .monthly_profit
                .map(|monthly_profit| ProfitSignal::Actual { monthly_profit }),
        };

        match (
            self.monthly_revenue,
            self.years_in_business,
            self.location,
            profit,
        ) {
            (Some(monthly_revenue), Some(years_in_business), Some(location), Some(profit)) => {
                Ok(ValuationInputs {
                    monthly_revenue,
                    years_in_business,
                    has_loyal_client_base: self.has_loyal_client_base.unwrap_or(false),
                    location: location.trim().to_string(),
                    profit,
                    google_rating: self.google_rating,
                    google_review_count: self.google_review_count,
                    number_of_stations: self.number_of_stations,
                })
            }
            _ => Err(report),
        }
    }
}
