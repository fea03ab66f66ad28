use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Metric values are clamped into this range before bucket lookup.
pub const COLOR_CLAMP_MIN: f64 = -40.0;
pub const COLOR_CLAMP_MAX: f64 = 40.0;

/// One half-open classification range `[min, max)` with its display colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBucket {
    pub min: f64,
    pub max: f64,
    pub fill_color: String,
    pub text_color: String,
    pub label: String,
}

/// The fill/text color pair for one tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileColor {
    pub fill_color: String,
    pub text_color: String,
}

fn bucket(min: f64, max: f64, fill: &str, text: &str, label: &str) -> ColorBucket {
    ColorBucket {
        min,
        max,
        fill_color: fill.to_string(),
        text_color: text.to_string(),
        label: label.to_string(),
    }
}

/// The production change-% scale: a neutral band at -1%..+1% and three
/// grades on each side. The brightest green carries dark text for
/// readability; everything else is white-on-color.
pub fn default_buckets() -> Vec<ColorBucket> {
    vec![
        bucket(f64::NEG_INFINITY, -20.0, "#FF2A1F", "#FFFFFF", "< -20%"),
        bucket(-20.0, -10.0, "#CF2422", "#FFFFFF", "-20% ~ -10%"),
        bucket(-10.0, -1.0, "#982D33", "#FFFFFF", "-10% ~ -1%"),
        bucket(-1.0, 1.0, "#393D49", "#FFFFFF", "-1% ~ +1%"),
        bucket(1.0, 10.0, "#228744", "#FFFFFF", "+1% ~ +10%"),
        bucket(10.0, 20.0, "#22AF3E", "#FFFFFF", "+10% ~ +20%"),
        bucket(20.0, f64::INFINITY, "#3FD952", "#1F2937", "≥ +20%"),
    ]
}

/// Maps a continuous metric onto a discrete color bucket.
///
/// Classification is a pure total function of the table and the clamp
/// range; any per-bucket presentation override belongs to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    buckets: Vec<ColorBucket>,
    clamp_min: f64,
    clamp_max: f64,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
            clamp_min: COLOR_CLAMP_MIN,
            clamp_max: COLOR_CLAMP_MAX,
        }
    }
}

impl ColorScale {
    /// Build a scale from a custom table, verifying the shape the lookup
    /// relies on: buckets ordered and contiguous, `min < max` everywhere,
    /// the first bucket open below, the last open above, and a finite
    /// clamp range.
    pub fn new(buckets: Vec<ColorBucket>, clamp_range: (f64, f64)) -> Result<Self> {
        let fail = |reason: String| {
            Err(LayoutError::Validation {
                id: "color scale".to_string(),
                reason,
            })
        };
        let (clamp_min, clamp_max) = clamp_range;
        if buckets.is_empty() {
            return fail("bucket table is empty".to_string());
        }
        if !clamp_min.is_finite() || !clamp_max.is_finite() || clamp_min >= clamp_max {
            return fail(format!("bad clamp range [{clamp_min}, {clamp_max}]"));
        }
        if buckets[0].min != f64::NEG_INFINITY {
            return fail("first bucket must start at -inf".to_string());
        }
        if buckets[buckets.len() - 1].max != f64::INFINITY {
            return fail("last bucket must end at +inf".to_string());
        }
        for b in &buckets {
            if !(b.min < b.max) {
                return fail(format!("bucket {:?} has an empty range", b.label));
            }
        }
        for pair in buckets.windows(2) {
            if pair[0].max != pair[1].min {
                return fail(format!(
                    "gap between {:?} and {:?}",
                    pair[0].label, pair[1].label
                ));
            }
        }
        Ok(Self {
            buckets,
            clamp_min,
            clamp_max,
        })
    }

    /// The ordered bucket table, e.g. for rendering a legend.
    pub fn buckets(&self) -> &[ColorBucket] {
        &self.buckets
    }

    /// Classify a metric value into its bucket's colors.
    ///
    /// The value is clamped into the configured range first; `NaN` is an
    /// error. A table edit that leaves the clamped value unmatched falls
    /// back to the middle (neutral) bucket instead of panicking.
    pub fn classify(&self, value: f64) -> Result<TileColor> {
        if value.is_nan() {
            return Err(LayoutError::InvalidMetric);
        }
        let clamped = value.clamp(self.clamp_min, self.clamp_max);
        let found = self
            .buckets
            .iter()
            .find(|b| clamped >= b.min && clamped < b.max)
            .unwrap_or(&self.buckets[self.buckets.len() / 2]);
        Ok(TileColor {
            fill_color: found.fill_color.clone(),
            text_color: found.text_color.clone(),
        })
    }
}

/// Classify against the default production scale.
pub fn classify(value: f64) -> Result<TileColor> {
    ColorScale::default().classify(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(value: f64) -> String {
        classify(value).unwrap().fill_color
    }

    #[test]
    fn grades_negative_values_through_the_reds() {
        assert_eq!(fill(-25.0), "#FF2A1F");
        assert_eq!(fill(-15.0), "#CF2422");
        assert_eq!(fill(-5.0), "#982D33");
    }

    #[test]
    fn grades_positive_values_through_the_greens() {
        assert_eq!(fill(5.0), "#228744");
        assert_eq!(fill(15.0), "#22AF3E");
        assert_eq!(fill(25.0), "#3FD952");
    }

    #[test]
    fn near_zero_is_neutral() {
        assert_eq!(fill(0.0), "#393D49");
        assert_eq!(fill(0.9), "#393D49");
        assert_eq!(fill(-0.9), "#393D49");
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        // -20 belongs to [-20, -10), not to the bucket below it.
        assert_eq!(fill(-20.0), "#CF2422");
        assert_eq!(fill(20.0), "#3FD952");
        assert_eq!(fill(-1.0), "#393D49");
        assert_eq!(fill(1.0), "#228744");
    }

    #[test]
    fn values_outside_the_range_are_clamped() {
        assert_eq!(fill(100.0), fill(40.0));
        assert_eq!(fill(-100.0), fill(-40.0));
        assert_eq!(fill(f64::INFINITY), "#3FD952");
        assert_eq!(fill(f64::NEG_INFINITY), "#FF2A1F");
    }

    #[test]
    fn text_color_tracks_the_bucket() {
        assert_eq!(classify(-25.0).unwrap().text_color, "#FFFFFF");
        assert_eq!(classify(25.0).unwrap().text_color, "#1F2937");
    }

    #[test]
    fn nan_metric_is_an_error() {
        assert!(matches!(classify(f64::NAN), Err(LayoutError::InvalidMetric)));
    }

    #[test]
    fn default_table_is_contiguous_and_unbounded() {
        let buckets = default_buckets();
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].min, f64::NEG_INFINITY);
        assert_eq!(buckets[6].max, f64::INFINITY);
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].max, pair[1].min);
        }
    }

    #[test]
    fn custom_scale_rejects_gaps_and_bad_ranges() {
        let mut gapped = default_buckets();
        gapped[2].max = -2.0; // leaves (-2, -1) uncovered
        assert!(ColorScale::new(gapped, (-40.0, 40.0)).is_err());

        assert!(ColorScale::new(default_buckets(), (40.0, -40.0)).is_err());
        assert!(ColorScale::new(Vec::new(), (-40.0, 40.0)).is_err());

        let mut bounded = default_buckets();
        bounded[0].min = -50.0;
        assert!(ColorScale::new(bounded, (-40.0, 40.0)).is_err());
    }

    #[test]
    fn custom_scale_classifies_like_the_default() {
        let scale = ColorScale::new(default_buckets(), (COLOR_CLAMP_MIN, COLOR_CLAMP_MAX)).unwrap();
        assert_eq!(scale.classify(-3.0).unwrap(), classify(-3.0).unwrap());
    }
}
