//! Domain logic for salon valuation lives here.

pub mod band;
pub mod entities;
pub mod lead;
pub mod location;
pub mod multiple;
pub mod params;
pub mod sde;
pub mod validation;
pub mod valuation;

pub use entities::{
    MultipleAdjustments, ProfitMarginChoice, ProfitMode, ProfitSignal, ValuationBreakdown,
    ValuationDraft, ValuationInputs, ValuationResult,
};
pub use lead::ValuationLead;
pub use location::{classify_location, LocationMatch, LocationTier};
pub use multiple::{assess_multiple, MultipleAssessment};
pub use params::{ParamsError, ValuationParams};
pub use sde::annual_sde;
pub use validation::{validate, ValidationIssue, ValidationReport};
pub use valuation::{calculate, estimate, ValuationError};
