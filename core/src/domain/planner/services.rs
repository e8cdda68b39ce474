use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, sequencing::RequestToken, services::Service},
    diagnosis::ports::DiagnosisClient,
    health::ports::HealthCheckClient,
    planner::{
        entities::{
            BoundingBox, Climate, FieldReport, SoilRecommendationRequest,
            SoilRecommendationResponse, SoilType,
        },
        location::{LocationResolution, resolve_location},
        ports::{GeolocationProvider, PlannerClient, PlannerService},
        report::build_field_report,
        session::PlannerSession,
    },
};

impl<D, P, H> Service<D, P, H>
where
    D: DiagnosisClient,
    P: PlannerClient,
    H: HealthCheckClient,
{
    async fn fetch_report(
        &self,
        token: RequestToken,
        bbox: BoundingBox,
        soil_type: SoilType,
        location_status: String,
    ) -> Result<FieldReport, CoreError> {
        let response =
            PlannerService::recommend(self, bbox, soil_type, self.config.planner.climate).await?;

        Ok(build_field_report(
            token,
            response,
            bbox,
            soil_type,
            location_status,
            self.config.planner.max_recommendations,
        ))
    }
}

impl<D, P, H> PlannerService for Service<D, P, H>
where
    D: DiagnosisClient,
    P: PlannerClient,
    H: HealthCheckClient,
{
    #[instrument(skip(self), fields(bbox = ?bbox.as_array()))]
    async fn recommend(
        &self,
        bbox: BoundingBox,
        soil_type: SoilType,
        climate: Climate,
    ) -> Result<SoilRecommendationResponse, CoreError> {
        let request = SoilRecommendationRequest {
            coords: bbox,
            soil_type,
            climate,
        };

        let response = self
            .planner_client
            .recommend(request)
            .await
            .inspect_err(|e| {
                tracing::warn!(kind = e.kind().as_str(), "Recommendation failed: {}", e);
            })?;

        tracing::info!(
            recommendations = response.recommendations.len(),
            ph = response.soil_data.ph,
            "Recommendations received"
        );

        Ok(response)
    }

    async fn resolve_location<G: GeolocationProvider>(&self, provider: &G) -> LocationResolution {
        resolve_location(provider, &self.config.geolocation, &self.config.planner).await
    }

    #[instrument(skip_all, fields(soil_type = %session.soil_type()))]
    async fn start<G: GeolocationProvider>(
        &self,
        session: &PlannerSession,
        provider: &G,
    ) -> Result<FieldReport, CoreError> {
        let token = session.begin();
        let resolution = PlannerService::resolve_location(self, provider).await;
        session.record_location(token, &resolution)?;

        let outcome = self
            .fetch_report(token, resolution.bbox, session.soil_type(), resolution.status)
            .await;

        session.complete(token, outcome)
    }

    #[instrument(skip(self, session))]
    async fn change_soil_type(
        &self,
        session: &PlannerSession,
        soil_type: SoilType,
    ) -> Result<FieldReport, CoreError> {
        session.select_soil_type(soil_type);
        let token = session.begin();
        let (bbox, location_status) = session.fetch_target(self.config.planner.default_bbox);

        let outcome = self
            .fetch_report(token, bbox, soil_type, location_status)
            .await;

        session.complete(token, outcome)
    }

    async fn retry<G: GeolocationProvider>(
        &self,
        session: &PlannerSession,
        provider: &G,
    ) -> Result<FieldReport, CoreError> {
        tracing::debug!("Retrying planner fetch from location resolution");
        self.start(session, provider).await
    }
}
