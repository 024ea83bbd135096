use super::entities::{ValuationBreakdown, ValuationResult};
use super::multiple::MultipleAssessment;
use super::params::ValuationParams;

/// Midpoint, uncertainty band and station add-back. Assets shift all three figures equally.
pub fn compose_band(
    annual_sde: f64,
    multiple: MultipleAssessment,
    number_of_stations: Option<u32>,
    params: &ValuationParams,
) -> ValuationResult {
    let midpoint = (annual_sde * multiple.final_multiple).round();
    let low = (midpoint * (1.0 - params.band_width)).round();
    let high = (midpoint * (1.0 + params.band_width)).round();

    let assets_added = number_of_stations
        .map(|stations| stations as f64 * params.per_station_value)
        .unwrap_or(0.0);

    ValuationResult {
        low: low + assets_added,
        base: midpoint + assets_added,
        high: high + assets_added,
        breakdown: ValuationBreakdown {
            annual_sde,
            final_multiple: multiple.final_multiple,
            location_area_name: multiple.location_area_name,
            location_tier: multiple.location_tier.number(),
            assets_added,
            adjustments: multiple.adjustments,
        },
    }
}
