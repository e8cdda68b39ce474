use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    diagnosis::ports::DiagnosisClient,
    health::{
        entities::BackendHealth,
        ports::{HealthCheckClient, HealthCheckService},
    },
    planner::ports::PlannerClient,
};

impl<D, P, H> HealthCheckService for Service<D, P, H>
where
    D: DiagnosisClient,
    P: PlannerClient,
    H: HealthCheckClient,
{
    async fn backend_health(&self) -> Result<BackendHealth, CoreError> {
        let health = self.health_check_client.health().await?;

        if !health.can_diagnose() {
            tracing::warn!(status = %health.status, ai_ready = ?health.ai_ready, "AI backend is not ready");
        }

        Ok(health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::common::TerraNovaConfig,
        test_support::{ScriptedDiagnosisClient, ScriptedHealthClient, ScriptedPlannerClient},
    };

    #[tokio::test]
    async fn test_backend_health_passes_report_through() {
        let health = ScriptedHealthClient::default();
        health.push_ready(Ok(BackendHealth {
            status: "online".to_string(),
            ai_ready: Some(false),
            local_model_ready: Some(true),
            hybrid_mode: Some(false),
            model: Some("Hybrid".to_string()),
            api_configured: Some(false),
        }));
        let service = Service::new(
            ScriptedDiagnosisClient::default(),
            ScriptedPlannerClient::default(),
            health,
            TerraNovaConfig::default(),
        );

        let report = service.backend_health().await.unwrap();
        assert!(!report.can_diagnose());
        assert_eq!(report.local_model_ready, Some(true));
    }
}
