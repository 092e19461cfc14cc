//! Composite Scores - min-max rescaling of questionnaire items
//!
//! Each composite is a sum of 2-3 items rescaled to 0-100. All functions are
//! pure; bounds are fixed so in-range items can never leave [0, 100].

use super::assessment::{LIKERT_ITEM_MAX, SYMPTOM_ITEM_MAX};
use crate::logic::error::{AssessmentError, CoreResult};

/// Validated `[min, max]` pair with finite, distinct ends.
///
/// Reversed bounds (`min > max`) are allowed and invert the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    min: f64,
    max: f64,
}

impl ScaleBounds {
    pub fn new(min: f64, max: f64) -> CoreResult<Self> {
        if !min.is_finite() || !max.is_finite() || min == max {
            return Err(AssessmentError::InvalidScaleBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Only for bounds known valid at compile time
    const fn fixed(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// `(value - min) / (max - min) * 100`
    pub fn apply(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min) * 100.0
    }
}

/// Sum of three symptom items
pub const SYMPTOM_BOUNDS: ScaleBounds = ScaleBounds::fixed(0.0, (3 * SYMPTOM_ITEM_MAX) as f64);

/// Sum of two 0-4 items
pub const PAIR_BOUNDS: ScaleBounds = ScaleBounds::fixed(0.0, (2 * LIKERT_ITEM_MAX) as f64);

/// Rescale `value` from `[min, max]` to `[0, 100]`.
///
/// Fails with `InvalidScaleBounds` when `min == max` or either bound is
/// non-finite. Values outside the bounds are not clamped.
pub fn scale(value: f64, min: f64, max: f64) -> CoreResult<f64> {
    ScaleBounds::new(min, max).map(|bounds| bounds.apply(value))
}

pub fn depression_score(items: &[u8; 3]) -> f64 {
    SYMPTOM_BOUNDS.apply(sum(items))
}

pub fn anxiety_score(items: &[u8; 3]) -> f64 {
    SYMPTOM_BOUNDS.apply(sum(items))
}

pub fn social_support_score(items: &[u8; 2]) -> f64 {
    PAIR_BOUNDS.apply(sum(items))
}

/// `items[0]` is "I complete tasks effectively", `items[1]` is
/// "productivity has been impacted". The second item is inverted so that
/// more impairment lowers the score.
pub fn productivity_score(items: &[u8; 2]) -> f64 {
    let [completes_tasks, impacted] = *items;
    let inverted = LIKERT_ITEM_MAX as f64 - impacted as f64;
    PAIR_BOUNDS.apply(completes_tasks as f64 + inverted)
}

/// 1 for the exact answer "yes", 0 for anything else (case-sensitive).
pub fn yes_no_flag(answer: &str) -> u8 {
    u8::from(answer == "yes")
}

fn sum(items: &[u8]) -> f64 {
    items.iter().map(|&i| i as f64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_scale_maps_bounds() {
        assert_eq!(scale(0.0, 0.0, 9.0).unwrap(), 0.0);
        assert_eq!(scale(9.0, 0.0, 9.0).unwrap(), 100.0);
        assert_eq!(scale(-2.0, -2.0, 6.0).unwrap(), 0.0);
        assert_eq!(scale(6.0, -2.0, 6.0).unwrap(), 100.0);
    }

    #[test]
    fn test_scale_is_monotonic() {
        let mut last = f64::NEG_INFINITY;
        for v in 0..=8 {
            let s = scale(v as f64, 0.0, 8.0).unwrap();
            assert!(s > last);
            last = s;
        }
    }

    #[test]
    fn test_scale_rejects_degenerate_bounds() {
        assert!(matches!(
            scale(1.0, 3.0, 3.0),
            Err(AssessmentError::InvalidScaleBounds { .. })
        ));
        assert!(scale(1.0, 0.0, f64::INFINITY).is_err());
        assert!(scale(1.0, f64::NAN, 2.0).is_err());
    }

    #[test]
    fn test_scale_accepts_reversed_bounds() {
        assert_eq!(scale(5.0, 5.0, 2.0).unwrap(), 0.0);
        assert_eq!(scale(2.0, 5.0, 2.0).unwrap(), 100.0);
        assert!((scale(1.0, 5.0, 2.0).unwrap() - 400.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_depression_score() {
        assert_eq!(depression_score(&[0, 0, 0]), 0.0);
        assert_eq!(depression_score(&[3, 3, 3]), 100.0);
        assert!((depression_score(&[3, 0, 0]) - 100.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_anxiety_matches_depression_shape() {
        assert_eq!(anxiety_score(&[1, 2, 0]), depression_score(&[0, 1, 2]));
        assert_eq!(anxiety_score(&[3, 3, 3]), 100.0);
    }

    #[test]
    fn test_social_support_score() {
        assert_eq!(social_support_score(&[0, 0]), 0.0);
        assert_eq!(social_support_score(&[3, 3]), 75.0);
        assert_eq!(social_support_score(&[4, 4]), 100.0);
    }

    #[test]
    fn test_productivity_inverts_impact_item() {
        assert_eq!(productivity_score(&[4, 0]), 100.0);
        assert_eq!(productivity_score(&[0, 4]), 0.0);
        assert_eq!(productivity_score(&[4, 4]), 50.0);
        assert_eq!(productivity_score(&[3, 2]), 62.5);
        // a direct p1 + p2 sum would give 0 here
        assert_eq!(productivity_score(&[0, 0]), 50.0);
    }

    #[test]
    fn test_yes_no_flag_is_strict() {
        assert_eq!(yes_no_flag("yes"), 1);
        assert_eq!(yes_no_flag("Yes"), 0);
        assert_eq!(yes_no_flag("YES"), 0);
        assert_eq!(yes_no_flag(" yes"), 0);
        assert_eq!(yes_no_flag(""), 0);
        assert_eq!(yes_no_flag("no"), 0);
    }

    #[test]
    fn test_composites_stay_in_range_for_all_items() {
        for a in 0..=SYMPTOM_ITEM_MAX {
            for b in 0..=SYMPTOM_ITEM_MAX {
                for c in 0..=SYMPTOM_ITEM_MAX {
                    let s = depression_score(&[a, b, c]);
                    assert!((0.0..=100.0).contains(&s));
                }
            }
        }
        for a in 0..=LIKERT_ITEM_MAX {
            for b in 0..=LIKERT_ITEM_MAX {
                assert!((0.0..=100.0).contains(&social_support_score(&[a, b])));
                assert!((0.0..=100.0).contains(&productivity_score(&[a, b])));
            }
        }
    }
}
