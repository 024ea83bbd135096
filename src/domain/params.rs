//! Tunable constants for every stage of the valuation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::ProfitMarginChoice;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuationParams {
    pub low_margin_rate: f64,
    pub normal_margin_rate: f64,
    pub high_margin_rate: f64,

    pub base_multiple: f64,
    pub min_multiple: f64,
    pub max_multiple: f64,

    pub tier1_bonus: f64,
    pub tier2_bonus: f64,
    pub tier3_bonus: f64,

    /// `(minimum years, bonus)` steps; the highest step reached applies.
    pub age_steps: Vec<(f64, f64)>,

    pub min_rating_for_bonus: f64,
    pub max_reputation_bonus: f64,
    /// Review count at which the volume factor saturates.
    pub review_saturation: u32,

    pub loyalty_bonus: f64,

    pub band_width: f64,
    pub per_station_value: f64,
}

impl Default for ValuationParams {
    fn default() -> Self {
        Self {
            low_margin_rate: 0.18,
            normal_margin_rate: 0.28,
            high_margin_rate: 0.38,
            base_multiple: 2.0,
            min_multiple: 1.0,
            max_multiple: 3.25,
            tier1_bonus: 0.5,
            tier2_bonus: 0.25,
            tier3_bonus: 0.0,
            age_steps: vec![(2.0, 0.1), (5.0, 0.2), (10.0, 0.3)],
            min_rating_for_bonus: 4.0,
            max_reputation_bonus: 0.3,
            review_saturation: 1000,
            loyalty_bonus: 0.25,
            band_width: 0.15,
            per_station_value: 2500.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("{0} must be between 0 and 1 (exclusive)")]
    RateOutOfRange(&'static str),
    #[error("base multiple must be positive")]
    NonPositiveBase,
    #[error("min multiple {min} exceeds max multiple {max}")]
    InvertedClamp { min: f64, max: f64 },
    #[error("band width must be in [0, 1)")]
    BandWidth,
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("age steps must be sorted by years")]
    UnsortedAgeSteps,
    #[error("age bonuses must be non-negative and never decrease with years")]
    DecreasingAgeBonus,
    #[error("location bonuses must satisfy tier 1 >= tier 2 >= tier 3")]
    TierBonusOrder,
}

impl ValuationParams {
    pub fn margin_rate(&self, choice: ProfitMarginChoice) -> f64 {
        match choice {
            ProfitMarginChoice::Low => self.low_margin_rate,
            ProfitMarginChoice::Normal => self.normal_margin_rate,
            ProfitMarginChoice::High => self.high_margin_rate,
        }
    }

    /// Rejects constant sets that would break the ordering or clamp guarantees.
    pub fn check(&self) -> Result<(), ParamsError> {
        let scalars = [
            ("low margin rate", self.low_margin_rate),
            ("normal margin rate", self.normal_margin_rate),
            ("high margin rate", self.high_margin_rate),
            ("base multiple", self.base_multiple),
            ("min multiple", self.min_multiple),
            ("max multiple", self.max_multiple),
            ("tier 1 bonus", self.tier1_bonus),
            ("tier 2 bonus", self.tier2_bonus),
            ("tier 3 bonus", self.tier3_bonus),
            ("minimum rating", self.min_rating_for_bonus),
            ("reputation bonus", self.max_reputation_bonus),
            ("loyalty bonus", self.loyalty_bonus),
            ("band width", self.band_width),
            ("per-station value", self.per_station_value),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ParamsError::NotFinite(*name));
        }

        for (name, rate) in &scalars[..3] {
            if *rate <= 0.0 || *rate >= 1.0 {
                return Err(ParamsError::RateOutOfRange(*name));
            }
        }

        if self.base_multiple <= 0.0 {
            return Err(ParamsError::NonPositiveBase);
        }
        if self.min_multiple > self.max_multiple {
            return Err(ParamsError::InvertedClamp {
                min: self.min_multiple,
                max: self.max_multiple,
            });
        }
        if !(0.0..1.0).contains(&self.band_width) {
            return Err(ParamsError::BandWidth);
        }

        for (name, value) in [
            ("reputation bonus", self.max_reputation_bonus),
            ("loyalty bonus", self.loyalty_bonus),
            ("per-station value", self.per_station_value),
            ("min multiple", self.min_multiple),
        ] {
            if value < 0.0 {
                return Err(ParamsError::Negative(name));
            }
        }

        if self
            .age_steps
            .iter()
            .any(|(years, bonus)| !years.is_finite() || !bonus.is_finite())
        {
            return Err(ParamsError::NotFinite("age steps"));
        }
        if self.age_steps.windows(2).any(|pair| pair[0].0 > pair[1].0) {
            return Err(ParamsError::UnsortedAgeSteps);
        }
        if self.age_steps.iter().any(|(_, bonus)| *bonus < 0.0)
            || self.age_steps.windows(2).any(|pair| pair[0].1 > pair[1].1)
        {
            return Err(ParamsError::DecreasingAgeBonus);
        }

        if self.tier1_bonus < self.tier2_bonus || self.tier2_bonus < self.tier3_bonus {
            return Err(ParamsError::TierBonusOrder);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_check() {
        assert_eq!(ValuationParams::default().check(), Ok(()));
    }

    #[test]
    fn inverted_clamp_is_rejected() {
        let params = ValuationParams {
            min_multiple: 4.0,
            max_multiple: 2.0,
            ..ValuationParams::default()
        };
        assert_eq!(
            params.check(),
            Err(ParamsError::InvertedClamp { min: 4.0, max: 2.0 })
        );
    }

    #[test]
    fn band_width_of_one_is_rejected() {
        let params = ValuationParams {
            band_width: 1.0,
            ..ValuationParams::default()
        };
        assert_eq!(params.check(), Err(ParamsError::BandWidth));
    }

    #[test]
    fn nan_constant_is_named() {
        let params = ValuationParams {
            loyalty_bonus: f64::NAN,
            ..ValuationParams::default()
        };
        assert_eq!(params.check(), Err(ParamsError::NotFinite("loyalty bonus")));
    }

    #[test]
    fn older_salon_cannot_score_lower() {
        let shrinking = ValuationParams {
            age_steps: vec![(2.0, 0.4), (10.0, 0.2)],
            ..ValuationParams::default()
        };
        assert_eq!(shrinking.check(), Err(ParamsError::DecreasingAgeBonus));

        let negative = ValuationParams {
            age_steps: vec![(2.0, 0.4), (10.0, -0.2)],
            ..ValuationParams::default()
        };
        assert_eq!(negative.check(), Err(ParamsError::DecreasingAgeBonus));

        let flat = ValuationParams {
            age_steps: vec![(2.0, 0.1), (5.0, 0.1)],
            ..ValuationParams::default()
        };
        assert_eq!(flat.check(), Ok(()));
    }

    #[test]
    fn tier_bonuses_must_rank_major_metros_first() {
        let swapped = ValuationParams {
            tier1_bonus: 0.2,
            tier2_bonus: 0.3,
            ..ValuationParams::default()
        };
        assert_eq!(swapped.check(), Err(ParamsError::TierBonusOrder));

        let rural_favored = ValuationParams {
            tier3_bonus: 0.4,
            ..ValuationParams::default()
        };
        assert_eq!(rural_favored.check(), Err(ParamsError::TierBonusOrder));

        let rural_penalty = ValuationParams {
            tier3_bonus: -0.1,
            ..ValuationParams::default()
        };
        assert_eq!(rural_penalty.check(), Ok(()));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: ValuationParams =
            serde_json::from_str(r#"{ "baseMultiple": 2.4, "bandWidth": 0.1 }"#).unwrap();
        assert_eq!(params.base_multiple, 2.4);
        assert_eq!(params.band_width, 0.1);
        assert_eq!(params.per_station_value, 2500.0);
        assert_eq!(params.age_steps.len(), 3);
    }
}
