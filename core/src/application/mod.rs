use crate::{
    domain::common::{TerraNovaConfig, services::Service},
    infrastructure::backend::{
        ReqwestDiagnosisClient, ReqwestHealthCheckClient, ReqwestPlannerClient, build_http_client,
    },
};

pub type TerraNovaService =
    Service<ReqwestDiagnosisClient, ReqwestPlannerClient, ReqwestHealthCheckClient>;

pub fn create_service(config: TerraNovaConfig) -> Result<TerraNovaService, anyhow::Error> {
    let client = build_http_client(&config.backend)?;

    let diagnosis_client = ReqwestDiagnosisClient::new(client.clone(), &config.backend);
    let planner_client = ReqwestPlannerClient::new(client.clone(), &config.backend);
    let health_check_client = ReqwestHealthCheckClient::new(client, &config.backend);

    tracing::info!(backend = %config.backend.base_url, "TerraNova service ready");

    Ok(Service::new(
        diagnosis_client,
        planner_client,
        health_check_client,
        config,
    ))
}
