//! Outlier weighting by modified z-score

use serde::{Deserialize, Serialize};

/// Weight `1 + base^(ln z - offset)` of a point with modified z-score `z`
///
/// Points near the center weigh about 1; the weight grows as a power of `z`
/// (exponent `ln(base)`) once `z` passes `exp(offset)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierWeight {
    pub base: f64,
    pub offset: f64,
}

impl Default for OutlierWeight {
    fn default() -> Self {
        Self {
            base: 100.0,
            offset: 1.5,
        }
    }
}

impl OutlierWeight {
    /// Modified z-score `|x - center| / scale`
    ///
    /// With zero scale, points on the center score 0 and every other point
    /// scores infinity.
    pub fn z_score(x: f64, center: f64, scale: f64) -> f64 {
        let deviation = (x - center).abs();
        if scale > 0.0 {
            deviation / scale
        } else if deviation == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    }

    /// Weight of a point with modified z-score `z`
    pub fn weight(&self, z: f64) -> f64 {
        1.0 + self.base.powf(z.ln() - self.offset)
    }

    /// Weights for every value, capped so that their sum stays finite
    pub fn weights(&self, values: &[f64], center: f64, scale: f64) -> Vec<f64> {
        let cap = f64::MAX / (values.len() as f64 + 1.0);
        values
            .iter()
            .map(|&x| self.weight(Self::z_score(x, center, scale)).min(cap))
            .collect()
    }
}
