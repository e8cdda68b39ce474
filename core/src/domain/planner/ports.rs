use std::future::Future;

use crate::domain::{
    common::{GeolocationConfig, entities::app_errors::CoreError},
    planner::{
        entities::{
            BoundingBox, Climate, Coordinates, FieldReport, SoilRecommendationRequest,
            SoilRecommendationResponse, SoilType,
        },
        location::{GeolocationFailure, LocationResolution},
        session::PlannerSession,
    },
};

/// Outbound port to the satellite recommendation service
#[cfg_attr(test, mockall::automock)]
pub trait PlannerClient: Send + Sync {
    fn recommend(
        &self,
        request: SoilRecommendationRequest,
    ) -> impl Future<Output = Result<SoilRecommendationResponse, CoreError>> + Send;
}

/// Source of the device position
#[cfg_attr(test, mockall::automock)]
pub trait GeolocationProvider: Send + Sync {
    fn current_position(
        &self,
        options: GeolocationConfig,
    ) -> impl Future<Output = Result<Coordinates, GeolocationFailure>> + Send;
}

/// Service trait for the Smart Planner flow
pub trait PlannerService: Send + Sync {
    /// Stateless recommendation request for an explicit box.
    fn recommend(
        &self,
        bbox: BoundingBox,
        soil_type: SoilType,
        climate: Climate,
    ) -> impl Future<Output = Result<SoilRecommendationResponse, CoreError>> + Send;

    fn resolve_location<G: GeolocationProvider>(
        &self,
        provider: &G,
    ) -> impl Future<Output = LocationResolution> + Send;

    /// Resolves the location, then fetches for the session's soil type.
    fn start<G: GeolocationProvider>(
        &self,
        session: &PlannerSession,
        provider: &G,
    ) -> impl Future<Output = Result<FieldReport, CoreError>> + Send;

    /// Re-fetches with the last resolved box, or the default box if no
    /// position was ever resolved.
    fn change_soil_type(
        &self,
        session: &PlannerSession,
        soil_type: SoilType,
    ) -> impl Future<Output = Result<FieldReport, CoreError>> + Send;

    /// Manual retry: full location re-resolution, then a fresh fetch.
    fn retry<G: GeolocationProvider>(
        &self,
        session: &PlannerSession,
        provider: &G,
    ) -> impl Future<Output = Result<FieldReport, CoreError>> + Send;
}
