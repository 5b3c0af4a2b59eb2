//! Lifecycle of the analysis panel.
//!
//! `Idle → InFlight → {Succeeded, Failed} → Idle`. A new call may start from
//! any state except `InFlight`; starting from a finished state replaces the
//! shown result.

use crate::error::SessionError;
use crate::resilience::{CallFailure, CallOutcome};

/// Where the analysis panel currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CallState {
    #[default]
    Idle,
    InFlight,
    Succeeded(String),
    Failed(CallFailure),
}

/// The analysis panel: a heading plus the state of the latest call.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    heading: Option<String>,
    state: CallState,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CallState {
        &self.state
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    /// True while triggers must stay disabled.
    pub fn is_in_flight(&self) -> bool {
        self.state == CallState::InFlight
    }

    /// Move to `InFlight` under a new heading.
    pub fn begin(&mut self, heading: impl Into<String>) -> Result<(), SessionError> {
        if self.is_in_flight() {
            return Err(SessionError::Busy);
        }
        self.heading = Some(heading.into());
        self.state = CallState::InFlight;
        Ok(())
    }

    /// Record the outcome of the in-flight call.
    pub fn complete(&mut self, outcome: CallOutcome) -> Result<&CallState, SessionError> {
        if !self.is_in_flight() {
            return Err(SessionError::NotInFlight);
        }
        self.state = match outcome {
            CallOutcome::Text(text) => CallState::Succeeded(text),
            CallOutcome::Failed(failure) => CallState::Failed(failure),
        };
        Ok(&self.state)
    }

    /// Drop an in-flight call without a result (e.g. the user interrupted it).
    pub fn abandon(&mut self) {
        if self.is_in_flight() {
            self.reset();
        }
    }

    /// Clear the shown result. No effect while a call is in flight.
    pub fn dismiss(&mut self) -> Result<(), SessionError> {
        if self.is_in_flight() {
            return Err(SessionError::Busy);
        }
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.heading = None;
        self.state = CallState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FAILURE_MESSAGE;

    fn failure() -> CallFailure {
        CallFailure {
            message: FAILURE_MESSAGE,
            attempts: 5,
            last_error: "endpoint returned 503: down".to_string(),
        }
    }

    #[test]
    fn starts_idle() {
        let session = AnalysisSession::new();
        assert_eq!(session.state(), &CallState::Idle);
        assert!(session.heading().is_none());
        assert!(!session.is_in_flight());
    }

    #[test]
    fn begin_then_succeed() {
        let mut session = AnalysisSession::new();
        session.begin("Sector Analysis").unwrap();
        assert!(session.is_in_flight());

        let state = session
            .complete(CallOutcome::Text("healthy".to_string()))
            .unwrap();
        assert_eq!(state, &CallState::Succeeded("healthy".to_string()));
        assert_eq!(session.heading(), Some("Sector Analysis"));
    }

    #[test]
    fn begin_then_fail() {
        let mut session = AnalysisSession::new();
        session.begin("Sector Analysis").unwrap();
        session.complete(CallOutcome::Failed(failure())).unwrap();
        assert_eq!(session.state(), &CallState::Failed(failure()));
    }

    #[test]
    fn begin_while_in_flight_is_busy() {
        let mut session = AnalysisSession::new();
        session.begin("first").unwrap();
        assert_eq!(session.begin("second"), Err(SessionError::Busy));
        assert_eq!(session.heading(), Some("first"));
    }

    #[test]
    fn complete_without_begin_is_rejected() {
        let mut session = AnalysisSession::new();
        let err = session
            .complete(CallOutcome::Text("stray".to_string()))
            .unwrap_err();
        assert_eq!(err, SessionError::NotInFlight);
    }

    #[test]
    fn new_call_replaces_finished_result() {
        let mut session = AnalysisSession::new();
        session.begin("first").unwrap();
        session.complete(CallOutcome::Text("one".to_string())).unwrap();

        session.begin("second").unwrap();
        assert!(session.is_in_flight());
        assert_eq!(session.heading(), Some("second"));
    }

    #[test]
    fn dismiss_returns_to_idle() {
        let mut session = AnalysisSession::new();
        session.begin("x").unwrap();
        session.complete(CallOutcome::Failed(failure())).unwrap();
        session.dismiss().unwrap();
        assert_eq!(session.state(), &CallState::Idle);
        assert!(session.heading().is_none());
    }

    #[test]
    fn dismiss_while_in_flight_is_busy() {
        let mut session = AnalysisSession::new();
        session.begin("x").unwrap();
        assert_eq!(session.dismiss(), Err(SessionError::Busy));
        assert!(session.is_in_flight());
    }

    #[test]
    fn abandon_only_affects_in_flight() {
        let mut session = AnalysisSession::new();
        session.begin("x").unwrap();
        session.complete(CallOutcome::Text("kept".to_string())).unwrap();
        session.abandon();
        assert_eq!(session.state(), &CallState::Succeeded("kept".to_string()));

        session.begin("y").unwrap();
        session.abandon();
        assert_eq!(session.state(), &CallState::Idle);
    }
}
