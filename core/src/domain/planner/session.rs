use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        sequencing::{RequestSequencer, RequestToken},
    },
    planner::{
        entities::{BoundingBox, FieldReport, SoilType},
        location::{LIVE_LOCATION_STATUS, LocationResolution},
    },
};

pub const INITIAL_LOCATION_STATUS: &str = "Using Default Location";

/// Transient Smart Planner state of one device.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PlannerState {
    pub soil_type: SoilType,
    /// Box of the last successful geolocation, if any.
    #[schema(value_type = Option<Vec<f64>>)]
    pub resolved_bbox: Option<BoundingBox>,
    pub location_status: String,
    pub loading: bool,
    pub report: Option<FieldReport>,
    pub error: Option<String>,
}

impl PlannerState {
    fn initial(soil_type: SoilType) -> Self {
        Self {
            soil_type,
            resolved_bbox: None,
            location_status: INITIAL_LOCATION_STATUS.to_string(),
            loading: false,
            report: None,
            error: None,
        }
    }
}

#[derive(Debug)]
pub struct PlannerSession {
    sequencer: RequestSequencer,
    state: Mutex<PlannerState>,
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new(SoilType::default())
    }
}

impl PlannerSession {
    pub fn new(soil_type: SoilType) -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            state: Mutex::new(PlannerState::initial(soil_type)),
        }
    }

    fn state(&self) -> MutexGuard<'_, PlannerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> PlannerState {
        self.state().clone()
    }

    pub fn soil_type(&self) -> SoilType {
        self.state().soil_type
    }

    pub fn resolved_bbox(&self) -> Option<BoundingBox> {
        self.state().resolved_bbox
    }

    pub fn location_status(&self) -> String {
        self.state().location_status.clone()
    }

    pub fn select_soil_type(&self, soil_type: SoilType) {
        self.state().soil_type = soil_type;
    }

    /// Starts a new logical request; any in-flight one becomes stale.
    pub fn begin(&self) -> RequestToken {
        let mut state = self.state();
        state.loading = true;
        state.error = None;
        self.sequencer.issue()
    }

    pub fn record_location(
        &self,
        token: RequestToken,
        resolution: &LocationResolution,
    ) -> Result<(), CoreError> {
        let mut state = self.state();
        self.sequencer.accept(token, ())?;

        state.location_status = resolution.status.clone();
        if resolution.is_live() {
            state.resolved_bbox = Some(resolution.bbox);
        }
        Ok(())
    }

    /// Box and status a soil-type re-fetch should use.
    ///
    /// A remembered live box always travels with the live status, even when
    /// a later resolution fell back and rewrote `location_status`.
    pub fn fetch_target(&self, default_bbox: BoundingBox) -> (BoundingBox, String) {
        let state = self.state();
        match state.resolved_bbox {
            Some(bbox) => (bbox, LIVE_LOCATION_STATUS.to_string()),
            None => (default_bbox, state.location_status.clone()),
        }
    }

    /// Drops report, error and location back to a fresh session. Any
    /// in-flight fetch becomes stale.
    pub fn reset(&self, soil_type: SoilType) {
        let mut state = self.state();
        self.sequencer.issue();
        *state = PlannerState::initial(soil_type);
    }

    pub fn complete(
        &self,
        token: RequestToken,
        outcome: Result<FieldReport, CoreError>,
    ) -> Result<FieldReport, CoreError> {
        let mut state = self.state();
        let outcome = self.sequencer.accept(token, outcome)?;
        state.loading = false;

        match outcome {
            Ok(report) => {
                state.report = Some(report.clone());
                state.error = None;
                Ok(report)
            }
            Err(err) => {
                // previous report stays on screen next to the error
                state.error = Some(err.user_message());
                Err(err)
            }
        }
    }
}
