use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum NutrientLevel {
    Low,
    Medium,
    High,
}

/// Strict lower bounds of the Medium and High buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientThresholds {
    pub medium_above: f64,
    pub high_above: f64,
}

pub const NITROGEN: NutrientThresholds = NutrientThresholds {
    medium_above: 50.0,
    high_above: 100.0,
};

pub const PHOSPHORUS: NutrientThresholds = NutrientThresholds {
    medium_above: 20.0,
    high_above: 50.0,
};

pub const POTASSIUM: NutrientThresholds = NutrientThresholds {
    medium_above: 10.0,
    high_above: 40.0,
};

impl NutrientThresholds {
    pub fn classify(&self, value: f64) -> NutrientLevel {
        if value > self.high_above {
            NutrientLevel::High
        } else if value > self.medium_above {
            NutrientLevel::Medium
        } else {
            NutrientLevel::Low
        }
    }
}

pub fn nitrogen_level(n: f64) -> NutrientLevel {
    NITROGEN.classify(n)
}

pub fn phosphorus_level(p: f64) -> NutrientLevel {
    PHOSPHORUS.classify(p)
}

pub fn potassium_level(k: f64) -> NutrientLevel {
    POTASSIUM.classify(k)
}

/// pH the way the dashboard prints numbers: `6.8` stays `"6.8"`, `7.0` becomes `"7"`.
pub fn format_ph(ph: f64) -> String {
    ph.to_string()
}
