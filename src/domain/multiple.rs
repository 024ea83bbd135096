//! Valuation multiple: base industry multiple plus additive adjustments, clamped.

use super::entities::{MultipleAdjustments, ValuationInputs};
use super::location::{classify_location, LocationTier};
use super::params::ValuationParams;

#[derive(Clone, Debug, PartialEq)]
pub struct MultipleAssessment {
    pub final_multiple: f64,
    pub location_area_name: String,
    pub location_tier: LocationTier,
    pub adjustments: MultipleAdjustments,
}

pub fn assess_multiple(inputs: &ValuationInputs, params: &ValuationParams) -> MultipleAssessment {
    let location = classify_location(&inputs.location);

    let location_bonus = match location.tier {
        LocationTier::MajorMetro => params.tier1_bonus,
        LocationTier::MidSizeMarket => params.tier2_bonus,
        LocationTier::SmallMarket => params.tier3_bonus,
    };
    let age = age_bonus(inputs.years_in_business, params);
    let reputation = reputation_bonus(inputs.google_rating, inputs.google_review_count, params);
    let loyalty = if inputs.has_loyal_client_base {
        params.loyalty_bonus
    } else {
        0.0
    };

    let unclamped = params.base_multiple + location_bonus + age + reputation + loyalty;
    // Round before clamping so the result never leaves the bounds.
    // f64::clamp panics on inverted bounds and params may be unchecked.
    let final_multiple = round_to_hundredths(unclamped)
        .max(params.min_multiple)
        .min(params.max_multiple);

    MultipleAssessment {
        final_multiple,
        location_area_name: location.area_name,
        location_tier: location.tier,
        adjustments: MultipleAdjustments {
            base_multiple: params.base_multiple,
            location: location_bonus,
            age,
            reputation,
            loyalty,
            unclamped_multiple: unclamped,
        },
    }
}

/// Step curve: the highest threshold reached wins, nothing extra past the last step.
pub fn age_bonus(years: f64, params: &ValuationParams) -> f64 {
    params
        .age_steps
        .iter()
        .rev()
        .find(|(min_years, _)| years >= *min_years)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0.0)
}

/// Rating share of a perfect score, scaled by log review volume. Missing data is neutral.
pub fn reputation_bonus(
    rating: Option<f64>,
    review_count: Option<u32>,
    params: &ValuationParams,
) -> f64 {
    let (Some(rating), Some(count)) = (rating, review_count) else {
        return 0.0;
    };
    if count == 0 || rating < params.min_rating_for_bonus {
        return 0.0;
    }

    let saturation = (1.0 + params.review_saturation.max(1) as f64).log10();
    let volume = ((1.0 + count as f64).log10() / saturation).min(1.0);
    let quality = (rating / 5.0).clamp(0.0, 1.0);

    params.max_reputation_bonus * quality * volume
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ProfitMarginChoice, ProfitSignal};

    fn inputs(location: &str, years: f64, loyal: bool) -> ValuationInputs {
        ValuationInputs {
            monthly_revenue: 20_000.0,
            years_in_business: years,
            has_loyal_client_base: loyal,
            location: location.to_string(),
            profit: ProfitSignal::Estimate {
                margin: ProfitMarginChoice::Normal,
            },
            google_rating: None,
            google_review_count: None,
            number_of_stations: None,
        }
    }

    #[test]
    fn bare_small_market_salon_gets_base_multiple() {
        let params = ValuationParams::default();
        let assessment = assess_multiple(&inputs("Bozeman, MT", 0.5, false), &params);
        assert_eq!(assessment.final_multiple, 2.0);
        assert_eq!(assessment.location_tier, LocationTier::SmallMarket);
        assert_eq!(assessment.adjustments.unclamped_multiple, 2.0);
    }

    #[test]
    fn age_steps_cap_after_ten_years() {
        let params = ValuationParams::default();
        assert_eq!(age_bonus(0.0, &params), 0.0);
        assert_eq!(age_bonus(1.9, &params), 0.0);
        assert_eq!(age_bonus(2.0, &params), 0.1);
        assert_eq!(age_bonus(7.0, &params), 0.2);
        assert_eq!(age_bonus(10.0, &params), 0.3);
        assert_eq!(age_bonus(40.0, &params), 0.3);
    }

    #[test]
    fn reputation_needs_rating_threshold_and_reviews() {
        let params = ValuationParams::default();
        assert_eq!(reputation_bonus(None, Some(300), &params), 0.0);
        assert_eq!(reputation_bonus(Some(4.9), None, &params), 0.0);
        assert_eq!(reputation_bonus(Some(3.9), Some(300), &params), 0.0);
        assert_eq!(reputation_bonus(Some(4.9), Some(0), &params), 0.0);

        let strong = reputation_bonus(Some(4.8), Some(250), &params);
        assert!((strong - 0.230_37).abs() < 1e-4, "got {strong}");
    }

    #[test]
    fn reputation_is_bounded_by_max_bonus() {
        let params = ValuationParams::default();
        let saturated = reputation_bonus(Some(5.0), Some(1_000_000), &params);
        assert!((saturated - params.max_reputation_bonus).abs() < 1e-12);
    }

    #[test]
    fn more_reviews_never_lower_the_bonus() {
        let params = ValuationParams::default();
        let few = reputation_bonus(Some(4.5), Some(10), &params);
        let many = reputation_bonus(Some(4.5), Some(500), &params);
        assert!(many > few);
    }

    #[test]
    fn stacked_bonuses_clamp_to_max() {
        let params = ValuationParams::default();
        let mut maxed = inputs("Manhattan, NY", 25.0, true);
        maxed.google_rating = Some(5.0);
        maxed.google_review_count = Some(5_000);

        let assessment = assess_multiple(&maxed, &params);
        assert!(assessment.adjustments.unclamped_multiple > params.max_multiple);
        assert_eq!(assessment.final_multiple, params.max_multiple);
    }

    #[test]
    fn negative_tier_penalty_clamps_to_min() {
        let params = ValuationParams {
            base_multiple: 1.2,
            tier3_bonus: -0.5,
            ..ValuationParams::default()
        };
        let assessment = assess_multiple(&inputs("Bozeman", 0.0, false), &params);
        assert_eq!(assessment.final_multiple, params.min_multiple);
    }

    #[test]
    fn bounds_finer_than_cents_still_hold() {
        let params = ValuationParams {
            max_multiple: 3.255,
            loyalty_bonus: 1.0,
            ..ValuationParams::default()
        };
        assert_eq!(params.check(), Ok(()));

        let assessment = assess_multiple(&inputs("Manhattan, NY", 12.0, true), &params);
        assert!(assessment.adjustments.unclamped_multiple > params.max_multiple);
        assert_eq!(assessment.final_multiple, 3.255);

        let floor = ValuationParams {
            base_multiple: 1.0,
            min_multiple: 1.005,
            ..ValuationParams::default()
        };
        let low = assess_multiple(&inputs("Bozeman", 0.0, false), &floor);
        assert_eq!(low.final_multiple, 1.005);
    }
}
