//! In-memory port implementations for unit tests.

use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

use tokio::sync::oneshot;

use crate::domain::{
    common::{GeolocationConfig, entities::app_errors::CoreError},
    diagnosis::{
        entities::{DiagnosisResult, LegacyDiagnosisFields, Severity},
        ports::DiagnosisClient,
        value_objects::DiagnosisImage,
    },
    health::{entities::BackendHealth, ports::HealthCheckClient},
    planner::{
        entities::{
            Coordinates, CropRecommendation, ResponseStatus, SoilData, SoilRecommendationRequest,
            SoilRecommendationResponse,
        },
        location::GeolocationFailure,
        ports::{GeolocationProvider, PlannerClient},
    },
};

type Reply<T> = Result<T, CoreError>;

enum Script<T> {
    Ready(Reply<T>),
    Gated(oneshot::Receiver<Reply<T>>),
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn play<T>(script: Option<Script<T>>) -> Reply<T> {
    match script {
        Some(Script::Ready(reply)) => reply,
        Some(Script::Gated(rx)) => rx.await.unwrap_or_else(|_| {
            Err(CoreError::Transport {
                message: "gate dropped".to_string(),
            })
        }),
        None => panic!("no scripted reply left"),
    }
}

#[derive(Default)]
pub struct ScriptedPlannerClient {
    scripts: Mutex<VecDeque<Script<SoilRecommendationResponse>>>,
    requests: Mutex<Vec<SoilRecommendationRequest>>,
}

impl ScriptedPlannerClient {
    pub fn push_ready(&self, reply: Reply<SoilRecommendationResponse>) {
        lock(&self.scripts).push_back(Script::Ready(reply));
    }

    pub fn push_gated(&self, rx: oneshot::Receiver<Reply<SoilRecommendationResponse>>) {
        lock(&self.scripts).push_back(Script::Gated(rx));
    }

    pub fn requests(&self) -> Vec<SoilRecommendationRequest> {
        lock(&self.requests).clone()
    }
}

impl PlannerClient for ScriptedPlannerClient {
    async fn recommend(
        &self,
        request: SoilRecommendationRequest,
    ) -> Result<SoilRecommendationResponse, CoreError> {
        lock(&self.requests).push(request);
        let script = lock(&self.scripts).pop_front();
        play(script).await
    }
}

#[derive(Default)]
pub struct ScriptedDiagnosisClient {
    scripts: Mutex<VecDeque<Script<DiagnosisResult>>>,
    uploads: Mutex<Vec<usize>>,
}

impl ScriptedDiagnosisClient {
    pub fn push_ready(&self, reply: Reply<DiagnosisResult>) {
        lock(&self.scripts).push_back(Script::Ready(reply));
    }

    pub fn push_gated(&self, rx: oneshot::Receiver<Reply<DiagnosisResult>>) {
        lock(&self.scripts).push_back(Script::Gated(rx));
    }

    /// Sizes of the uploaded images, in call order.
    pub fn uploads(&self) -> Vec<usize> {
        lock(&self.uploads).clone()
    }
}

impl DiagnosisClient for ScriptedDiagnosisClient {
    async fn diagnose(&self, image: DiagnosisImage) -> Result<DiagnosisResult, CoreError> {
        lock(&self.uploads).push(image.len());
        let script = lock(&self.scripts).pop_front();
        play(script).await
    }
}

#[derive(Default)]
pub struct ScriptedHealthClient {
    scripts: Mutex<VecDeque<Script<BackendHealth>>>,
}

impl ScriptedHealthClient {
    pub fn push_ready(&self, reply: Reply<BackendHealth>) {
        lock(&self.scripts).push_back(Script::Ready(reply));
    }
}

impl HealthCheckClient for ScriptedHealthClient {
    async fn health(&self) -> Result<BackendHealth, CoreError> {
        let script = lock(&self.scripts).pop_front();
        play(script).await
    }
}

pub struct FixedGeolocation {
    outcome: Result<Coordinates, GeolocationFailure>,
    requested: Mutex<Vec<GeolocationConfig>>,
}

impl FixedGeolocation {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            outcome: Ok(Coordinates {
                latitude,
                longitude,
            }),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: GeolocationFailure) -> Self {
        Self {
            outcome: Err(failure),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_options(&self) -> Vec<GeolocationConfig> {
        lock(&self.requested).clone()
    }
}

impl GeolocationProvider for FixedGeolocation {
    async fn current_position(
        &self,
        options: GeolocationConfig,
    ) -> Result<Coordinates, GeolocationFailure> {
        lock(&self.requested).push(options);
        self.outcome
    }
}

pub fn recommendation(n: f64, p: f64, k: f64, ph: f64, crops: &[&str]) -> SoilRecommendationResponse {
    SoilRecommendationResponse {
        status: ResponseStatus::Success,
        soil_data: SoilData {
            n,
            p,
            k,
            ph,
            soil_type: None,
            is_estimated: None,
        },
        recommendations: crops
            .iter()
            .map(|crop| CropRecommendation {
                crop: crop.to_string(),
                suitability: 88.0,
                reason: format!("{} suits this soil", crop),
            })
            .collect(),
        message: None,
        location: None,
    }
}

pub fn diagnosis(disease: &str, crop: &str) -> DiagnosisResult {
    DiagnosisResult {
        disease: disease.to_string(),
        crop: crop.to_string(),
        confidence: 91.0,
        severity: Severity::Medium,
        symptoms: vec!["Yellow halos on lower leaves".to_string()],
        treatment: "Remove infected leaves".to_string(),
        affected_area: "Leaves".to_string(),
        additional_notes: String::new(),
        recovery_plan: Vec::new(),
        legacy: LegacyDiagnosisFields::default(),
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a local port nothing listens on.
pub async fn refused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
