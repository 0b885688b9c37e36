//! Normalized survey rows and per-metric percentile observations.

use serde::{Deserialize, Serialize};

/// A tracked compensation metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total cash compensation.
    Tcc,
    /// Work RVUs.
    Wrvu,
    /// Conversion factor (TCC per wRVU).
    Cf,
}

impl Metric {
    /// All metrics, in reporting order.
    pub const ALL: [Metric; 3] = [Metric::Tcc, Metric::Wrvu, Metric::Cf];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcc => "tcc",
            Self::Wrvu => "wrvu",
            Self::Cf => "cf",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One metric's percentile observation on a survey row.
///
/// An observation is complete only when its median is positive; a zero
/// median means the vendor reported no data for this metric and the whole
/// observation is treated as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricObservation {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    /// Number of reporting organizations.
    pub org_count: u32,
    /// Number of incumbents behind the distribution.
    pub incumbent_count: u32,
}

impl MetricObservation {
    /// True when this metric was actually reported (`p50 > 0`).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.p50 > 0.0
    }
}

/// A single normalized compensation data point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyRow {
    pub specialty: String,
    pub provider_type: String,
    pub geographic_region: String,
    pub vendor: String,
    pub year: u16,
    pub tcc: MetricObservation,
    pub wrvu: MetricObservation,
    pub cf: MetricObservation,
}

impl SurveyRow {
    /// The observation for one metric.
    #[must_use]
    pub fn observation(&self, metric: Metric) -> &MetricObservation {
        match metric {
            Metric::Tcc => &self.tcc,
            Metric::Wrvu => &self.wrvu,
            Metric::Cf => &self.cf,
        }
    }

    /// Mutable access to one metric's observation.
    pub fn observation_mut(&mut self, metric: Metric) -> &mut MetricObservation {
        match metric {
            Metric::Tcc => &mut self.tcc,
            Metric::Wrvu => &mut self.wrvu,
            Metric::Cf => &mut self.cf,
        }
    }

    /// Row-level incumbent count.
    ///
    /// TCC is the headline metric in every vendor export; rows that only
    /// report productivity fall back to the largest metric count so they
    /// still carry weight under incumbent weighting.
    #[must_use]
    pub fn incumbent_count(&self) -> u32 {
        if self.tcc.incumbent_count > 0 {
            self.tcc.incumbent_count
        } else {
            self.wrvu.incumbent_count.max(self.cf.incumbent_count)
        }
    }

    /// Row-level organization count, resolved like [`Self::incumbent_count`].
    #[must_use]
    pub fn org_count(&self) -> u32 {
        if self.tcc.org_count > 0 {
            self.tcc.org_count
        } else {
            self.wrvu.org_count.max(self.cf.org_count)
        }
    }

    /// True when every metric was reported on this row.
    #[must_use]
    pub fn is_fully_reported(&self) -> bool {
        Metric::ALL.iter().all(|m| self.observation(*m).is_complete())
    }
}
