use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    diagnosis::{
        entities::{DiagnosisReport, DiagnosisResult},
        session::DiagnosisSession,
        value_objects::DiagnosisImage,
    },
};

/// Outbound port to the remote disease-diagnosis service
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosisClient: Send + Sync {
    fn diagnose(
        &self,
        image: DiagnosisImage,
    ) -> impl Future<Output = Result<DiagnosisResult, CoreError>> + Send;
}

/// Service trait for the Crop Doctor flow
pub trait DiagnosisService: Send + Sync {
    /// Single stateless diagnosis. No retry is attempted.
    fn diagnose(
        &self,
        image: DiagnosisImage,
    ) -> impl Future<Output = Result<DiagnosisResult, CoreError>> + Send;

    /// Diagnosis whose result is applied to `session` only if no newer
    /// diagnosis was started meanwhile.
    fn diagnose_in_session(
        &self,
        session: &DiagnosisSession,
        image: DiagnosisImage,
    ) -> impl Future<Output = Result<DiagnosisReport, CoreError>> + Send;
}
