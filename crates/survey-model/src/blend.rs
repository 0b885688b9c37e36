//! Blend selection and result types.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Weighting policy for combining selected survey rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMethod {
    /// Every row weighted equally.
    Simple,
    /// Rows weighted by incumbent count.
    Weighted,
    /// Rows weighted by user-supplied weights.
    Custom,
}

impl BlendMethod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Weighted => "weighted",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for BlendMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BlendMethod {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "weighted" => Ok(Self::Weighted),
            "custom" => Ok(Self::Custom),
            other => Err(ModelError::UnknownBlendMethod(other.to_string())),
        }
    }
}

/// A selectable unit on the blending screen.
///
/// `weight` is user-editable in percent (0-100) and only honored by
/// [`BlendMethod::Custom`]; the other methods recompute weights from the
/// rows themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialtyItem {
    pub id: String,
    pub name: String,
    pub record_count: u32,
    pub vendor: String,
    pub year: u16,
    pub geographic_region: String,
    pub provider_type: String,
    pub weight: f64,
}

/// One metric's blended percentile values, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BlendedMetric {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// The output of one blend invocation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlendedResult {
    pub tcc: BlendedMetric,
    pub wrvu: BlendedMetric,
    pub cf: BlendedMetric,
    /// Sum of organization counts across the selected rows (unweighted).
    pub total_records: u32,
    /// Composite quality score (0.0 to 1.0).
    pub confidence: f64,
    /// Distinct specialty names, in selection order.
    pub specialties: Vec<String>,
    pub method: BlendMethod,
}
