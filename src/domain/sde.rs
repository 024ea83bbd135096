use super::entities::{ProfitSignal, ValuationInputs};
use super::params::ValuationParams;

/// Annualized Seller's Discretionary Earnings, in whole currency units.
pub fn annual_sde(inputs: &ValuationInputs, params: &ValuationParams) -> f64 {
    let monthly_profit = match inputs.profit {
        ProfitSignal::Estimate { margin } => inputs.monthly_revenue * params.margin_rate(margin),
        ProfitSignal::Actual { monthly_profit } => monthly_profit,
    };

    (monthly_profit * 12.0).round().max(0.0)
}
