use chrono::Utc;

use crate::domain::{
    common::sequencing::RequestToken,
    planner::{
        entities::{BoundingBox, FieldReport, SoilRecommendationResponse, SoilType},
        nutrients::{format_ph, nitrogen_level, phosphorus_level, potassium_level},
    },
};

/// Turns a successful recommendation response into the dashboard's field view.
pub fn build_field_report(
    token: RequestToken,
    response: SoilRecommendationResponse,
    bbox: BoundingBox,
    soil_type: SoilType,
    location_status: String,
    max_recommendations: usize,
) -> FieldReport {
    let soil = response.soil_data;
    let mut recommendations = response.recommendations;
    recommendations.truncate(max_recommendations);

    FieldReport {
        request_id: token.value(),
        soil_type,
        ph: format_ph(soil.ph),
        nitrogen: nitrogen_level(soil.n),
        phosphorus: phosphorus_level(soil.p),
        potassium: potassium_level(soil.k),
        soil_data: soil,
        recommendations,
        bbox,
        location_status,
        received_at: Utc::now(),
    }
}
