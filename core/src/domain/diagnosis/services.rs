use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    diagnosis::{
        entities::{DiagnosisReport, DiagnosisResult},
        ports::{DiagnosisClient, DiagnosisService},
        session::DiagnosisSession,
        value_objects::DiagnosisImage,
    },
    health::ports::HealthCheckClient,
    planner::ports::PlannerClient,
};

impl<D, P, H> DiagnosisService for Service<D, P, H>
where
    D: DiagnosisClient,
    P: PlannerClient,
    H: HealthCheckClient,
{
    #[instrument(skip(self, image), fields(size_bytes = image.len()))]
    async fn diagnose(&self, image: DiagnosisImage) -> Result<DiagnosisResult, CoreError> {
        let result = self
            .diagnosis_client
            .diagnose(image)
            .await
            .inspect_err(|e| {
                tracing::warn!(kind = e.kind().as_str(), "Diagnosis failed: {}", e);
            })?;

        tracing::info!(
            disease = %result.disease,
            crop = %result.crop,
            severity = ?result.severity,
            confidence = result.confidence,
            "Diagnosis received"
        );

        Ok(result)
    }

    async fn diagnose_in_session(
        &self,
        session: &DiagnosisSession,
        image: DiagnosisImage,
    ) -> Result<DiagnosisReport, CoreError> {
        let token = session.begin();
        let outcome = self.diagnose(image).await;

        session.complete(token, outcome).inspect_err(|e| {
            if let CoreError::Superseded { token, latest } = e {
                tracing::debug!(token, latest, "Discarding stale diagnosis");
            }
        })
    }
}
