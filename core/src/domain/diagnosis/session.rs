use std::sync::{Mutex, PoisonError};

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        sequencing::{RequestSequencer, RequestToken},
    },
    diagnosis::entities::{DiagnosisReport, DiagnosisResult},
};

/// Transient Crop Doctor state of one device.
#[derive(Debug, Default)]
pub struct DiagnosisSession {
    sequencer: RequestSequencer,
    latest: Mutex<Option<DiagnosisReport>>,
}

impl DiagnosisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new diagnosis; the previous result is dropped.
    pub fn begin(&self) -> RequestToken {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *latest = None;
        self.sequencer.issue()
    }

    pub fn complete(
        &self,
        token: RequestToken,
        outcome: Result<DiagnosisResult, CoreError>,
    ) -> Result<DiagnosisReport, CoreError> {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        let outcome = self.sequencer.accept(token, outcome)?;

        match outcome {
            Ok(result) => {
                let report = DiagnosisReport::new(token, result);
                *latest = Some(report.clone());
                Ok(report)
            }
            Err(err) => {
                *latest = None;
                Err(err)
            }
        }
    }

    pub fn latest(&self) -> Option<DiagnosisReport> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn reset(&self) {
        self.sequencer.issue();
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::diagnosis;

    #[test]
    fn test_reset_discards_in_flight_diagnosis() {
        let session = DiagnosisSession::new();
        let token = session.begin();

        session.reset();

        let err = session
            .complete(token, Ok(diagnosis("Leaf Curl", "Chilli")))
            .unwrap_err();
        assert!(matches!(err, CoreError::Superseded { .. }));
        assert!(session.latest().is_none());
    }

    #[test]
    fn test_failure_clears_previous_result() {
        let session = DiagnosisSession::new();
        let first = session.begin();
        session
            .complete(first, Ok(diagnosis("Leaf Curl", "Chilli")))
            .unwrap();
        assert!(session.latest().is_some());

        let second = session.begin();
        session
            .complete(second, Err(CoreError::ServiceLogic("no leaf found".to_string())))
            .unwrap_err();
        assert!(session.latest().is_none());
    }
}
