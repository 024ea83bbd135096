//! The valuation pipeline: validate, estimate SDE, assess the multiple, compose the band.

use thiserror::Error;
use tracing::debug;

use super::band::compose_band;
use super::entities::{ValuationDraft, ValuationInputs, ValuationResult};
use super::multiple::assess_multiple;
use super::params::{ParamsError, ValuationParams};
use super::sde::annual_sde;
use super::validation::ValidationReport;

#[derive(Debug, Error, PartialEq)]
pub enum ValuationError {
    #[error("invalid valuation inputs: {}", .0.errors.join(" "))]
    InvalidInputs(ValidationReport),
    #[error("invalid valuation parameters: {0}")]
    InvalidParams(#[from] ParamsError),
}

/// Runs the three computing stages on inputs that already passed validation.
pub fn calculate(inputs: &ValuationInputs, params: &ValuationParams) -> ValuationResult {
    let sde = annual_sde(inputs, params);
    let multiple = assess_multiple(inputs, params);
    compose_band(sde, multiple, inputs.number_of_stations, params)
}

/// Validates the draft and params, then calculates. Nothing is computed for an invalid draft.
pub fn estimate(
    draft: &ValuationDraft,
    params: &ValuationParams,
) -> Result<ValuationResult, ValuationError> {
    params.check()?;
    let inputs = draft
        .clone()
        .into_inputs()
        .map_err(ValuationError::InvalidInputs)?;

    let result = calculate(&inputs, params);
    debug!(
        location = %inputs.location,
        annual_sde = result.breakdown.annual_sde,
        multiple = result.breakdown.final_multiple,
        base = result.base,
        "valuation computed"
    );
    Ok(result)
}
