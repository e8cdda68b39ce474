use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::sequencing::RequestToken;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosisResult {
    pub disease: String,
    pub crop: String,
    /// 0 to 100.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub affected_area: String,
    #[serde(default)]
    pub additional_notes: String,
    #[serde(default)]
    pub recovery_plan: Vec<RecoveryStep>,
    #[serde(flatten)]
    pub legacy: LegacyDiagnosisFields,
}

impl DiagnosisResult {
    /// Expanded when the backend sent symptoms or a recovery plan.
    pub fn schema(&self) -> DiagnosisSchema {
        if self.symptoms.is_empty() && self.recovery_plan.is_empty() {
            DiagnosisSchema::Legacy
        } else {
            DiagnosisSchema::Expanded
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecoveryStep {
    pub day: u32,
    pub action: String,
    #[serde(default)]
    pub expectation: String,
}

/// Fields of the first-generation diagnosis payload, kept for older backends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LegacyDiagnosisFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(
        rename = "productPrice",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_price: Option<String>,
    #[serde(rename = "harvestDays", default, skip_serializing_if = "Option::is_none")]
    pub harvest_days: Option<u32>,
    #[serde(rename = "healthScore", default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisSchema {
    Expanded,
    /// Deprecated compatibility shape without symptoms or recovery plan.
    Legacy,
}

/// A diagnosis accepted by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiagnosisReport {
    pub request_id: u64,
    pub schema: DiagnosisSchema,
    pub received_at: DateTime<Utc>,
    pub result: DiagnosisResult,
}

impl DiagnosisReport {
    pub fn new(token: RequestToken, result: DiagnosisResult) -> Self {
        Self {
            request_id: token.value(),
            schema: result.schema(),
            received_at: Utc::now(),
            result,
        }
    }
}
