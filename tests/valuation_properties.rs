use pretty_assertions::assert_eq;

use salon_valuation::domain::{
    calculate, estimate, validate, ProfitMarginChoice, ProfitSignal, ValuationDraft,
    ValuationInputs, ValuationParams,
};

fn beverly_hills_salon() -> ValuationInputs {
    ValuationInputs {
        monthly_revenue: 50_000.0,
        years_in_business: 5.0,
        has_loyal_client_base: true,
        location: "90210".to_string(),
        profit: ProfitSignal::Estimate {
            margin: ProfitMarginChoice::Normal,
        },
        google_rating: Some(4.8),
        google_review_count: Some(250),
        number_of_stations: Some(8),
    }
}

fn input_grid() -> Vec<ValuationInputs> {
    let mut grid = Vec::new();
    for location in ["90210", "Austin, TX", "Bozeman, MT"] {
        for years in [0.0, 2.5, 7.0, 30.0] {
            for margin in ProfitMarginChoice::ALL {
                for (rating, reviews) in [(None, None), (Some(3.5), Some(40)), (Some(4.9), Some(900))] {
                    for loyal in [false, true] {
                        grid.push(ValuationInputs {
                            monthly_revenue: 35_000.0,
                            years_in_business: years,
                            has_loyal_client_base: loyal,
                            location: location.to_string(),
                            profit: ProfitSignal::Estimate { margin },
                            google_rating: rating,
                            google_review_count: reviews,
                            number_of_stations: Some(6),
                        });
                    }
                }
            }
        }
    }
    grid
}

#[test]
fn worked_example_matches_fixed_constants() {
    let result = calculate(&beverly_hills_salon(), &ValuationParams::default());
    let breakdown = &result.breakdown;

    assert_eq!(breakdown.annual_sde, 168_000.0);
    assert_eq!(breakdown.location_area_name, "Los Angeles Metro");
    assert_eq!(breakdown.location_tier, 1);
    assert_eq!(breakdown.adjustments.location, 0.5);
    assert_eq!(breakdown.adjustments.age, 0.2);
    assert_eq!(breakdown.adjustments.loyalty, 0.25);
    assert!((breakdown.adjustments.reputation - 0.2303).abs() < 1e-3);
    assert_eq!(breakdown.final_multiple, 3.18);
    assert_eq!(breakdown.assets_added, 20_000.0);

    assert_eq!(result.base, 554_240.0);
    assert_eq!(result.low, 474_104.0);
    assert_eq!(result.high, 634_376.0);
}

#[test]
fn range_is_ordered_for_every_grid_input() {
    let params = ValuationParams::default();
    for inputs in input_grid() {
        let result = calculate(&inputs, &params);
        assert!(
            result.low < result.base && result.base < result.high,
            "unordered range for {inputs:?}: {result:?}"
        );
    }
}

#[test]
fn base_rises_strictly_with_revenue() {
    let params = ValuationParams::default();
    let mut previous = None;
    for revenue in [5_000.0, 12_000.0, 30_000.0, 50_000.0, 120_000.0, 1_000_000.0] {
        let inputs = ValuationInputs {
            monthly_revenue: revenue,
            ..beverly_hills_salon()
        };
        let base = calculate(&inputs, &params).base;
        if let Some(prev) = previous {
            assert!(base > prev, "{revenue}: {base} <= {prev}");
        }
        previous = Some(base);
    }
}

#[test]
fn actual_profit_ignores_revenue_beyond_the_ceiling_check() {
    let params = ValuationParams::default();
    let at_revenue = |revenue: f64| {
        let draft = ValuationDraft {
            monthly_revenue: Some(revenue),
            years_in_business: Some(5.0),
            location: Some("90210".to_string()),
            profit_mode: salon_valuation::domain::ProfitMode::Actual,
            monthly_profit: Some(9_000.0),
            ..ValuationDraft::default()
        };
        estimate(&draft, &params)
    };

    let modest = at_revenue(40_000.0).unwrap();
    let busy = at_revenue(80_000.0).unwrap();
    assert_eq!(modest.breakdown.annual_sde, 108_000.0);
    assert_eq!(busy.base, modest.base);

    // Revenue still bounds the reported profit.
    assert!(at_revenue(8_000.0).is_err());
}

#[test]
fn stacked_bonuses_never_leave_the_clamp() {
    let params = ValuationParams::default();
    let maxed = ValuationInputs {
        years_in_business: 40.0,
        google_rating: Some(5.0),
        google_review_count: Some(50_000),
        ..beverly_hills_salon()
    };
    let result = calculate(&maxed, &params);
    assert!(result.breakdown.adjustments.unclamped_multiple > params.max_multiple);
    assert_eq!(result.breakdown.final_multiple, params.max_multiple);

    let generous = ValuationParams {
        base_multiple: 4.8,
        loyalty_bonus: 2.0,
        max_multiple: 5.0,
        ..ValuationParams::default()
    };
    assert_eq!(calculate(&maxed, &generous).breakdown.final_multiple, 5.0);

    for inputs in input_grid() {
        let multiple = calculate(&inputs, &params).breakdown.final_multiple;
        assert!((params.min_multiple..=params.max_multiple).contains(&multiple));
    }
}

#[test]
fn empty_draft_names_the_required_fields() {
    let report = validate(&ValuationDraft::default());
    assert!(!report.valid);
    for expected in [
        "Monthly revenue is required and must be positive.",
        "Years in business is required.",
        "Location is required.",
    ] {
        assert!(
            report.errors.iter().any(|message| message == expected),
            "missing {expected:?} in {:?}",
            report.errors
        );
    }
}

#[test]
fn station_assets_are_reported_and_added() {
    let params = ValuationParams::default();
    let equipped = calculate(&beverly_hills_salon(), &params);
    let bare = calculate(
        &ValuationInputs {
            number_of_stations: None,
            ..beverly_hills_salon()
        },
        &params,
    );

    assert_eq!(
        equipped.breakdown.assets_added,
        8.0 * params.per_station_value
    );
    assert_eq!(bare.breakdown.assets_added, 0.0);
    assert_eq!(equipped.base, bare.base + equipped.breakdown.assets_added);
    assert_eq!(equipped.low, bare.low + equipped.breakdown.assets_added);
    assert_eq!(equipped.high, bare.high + equipped.breakdown.assets_added);
}

#[test]
fn repeated_calls_serialize_identically() {
    let params = ValuationParams::default();
    let first = serde_json::to_string(&calculate(&beverly_hills_salon(), &params)).unwrap();
    let second = serde_json::to_string(&calculate(&beverly_hills_salon(), &params)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn result_json_uses_form_field_names() {
    let result = calculate(&beverly_hills_salon(), &ValuationParams::default());
    let json = serde_json::to_value(&result).unwrap();
    let breakdown = &json["breakdown"];
    assert_eq!(breakdown["annualSDE"], 168_000.0);
    assert_eq!(breakdown["finalMultiple"], 3.18);
    assert_eq!(breakdown["locationAreaName"], "Los Angeles Metro");
    assert_eq!(breakdown["locationTier"], 1);
    assert_eq!(breakdown["assetsAdded"], 20_000.0);
}

#[test]
fn actual_profit_drives_sde_directly() {
    let draft = ValuationDraft {
        monthly_revenue: Some(40_000.0),
        years_in_business: Some(3.0),
        location: Some("Boise, ID".to_string()),
        profit_mode: salon_valuation::domain::ProfitMode::Actual,
        monthly_profit: Some(9_500.0),
        ..ValuationDraft::default()
    };
    let result = estimate(&draft, &ValuationParams::default()).unwrap();
    assert_eq!(result.breakdown.annual_sde, 114_000.0);
    // small market, 2-5 years: 2.0 + 0.1
    assert_eq!(result.breakdown.final_multiple, 2.1);
    assert_eq!(result.base, 239_400.0);
}
