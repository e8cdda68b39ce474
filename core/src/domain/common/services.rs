use std::sync::Arc;

use crate::domain::{
    common::TerraNovaConfig, diagnosis::ports::DiagnosisClient,
    health::ports::HealthCheckClient, planner::ports::PlannerClient,
};

/// Aggregates the outbound ports; the domain services are implemented on it.
pub struct Service<D, P, H>
where
    D: DiagnosisClient,
    P: PlannerClient,
    H: HealthCheckClient,
{
    pub(crate) diagnosis_client: Arc<D>,
    pub(crate) planner_client: Arc<P>,
    pub(crate) health_check_client: Arc<H>,
    pub(crate) config: Arc<TerraNovaConfig>,
}

impl<D, P, H> Service<D, P, H>
where
    D: DiagnosisClient,
    P: PlannerClient,
    H: HealthCheckClient,
{
    pub fn new(
        diagnosis_client: D,
        planner_client: P,
        health_check_client: H,
        config: TerraNovaConfig,
    ) -> Self {
        Self {
            diagnosis_client: Arc::new(diagnosis_client),
            planner_client: Arc::new(planner_client),
            health_check_client: Arc::new(health_check_client),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &TerraNovaConfig {
        &self.config
    }
}

impl<D, P, H> Clone for Service<D, P, H>
where
    D: DiagnosisClient,
    P: PlannerClient,
    H: HealthCheckClient,
{
    fn clone(&self) -> Self {
        Self {
            diagnosis_client: Arc::clone(&self.diagnosis_client),
            planner_client: Arc::clone(&self.planner_client),
            health_check_client: Arc::clone(&self.health_check_client),
            config: Arc::clone(&self.config),
        }
    }
}
