//! The analyst desk: the state a user works against.
//!
//! Owns the resilient caller and the analysis session and threads one
//! through the other, so there are no loosely shared loading/error flags.

use std::sync::Arc;

use tracing::info;

use crate::dataset::{self, SortKey};
use crate::error::{DeskError, SessionError};
use crate::events::EventBus;
use crate::prompts::analysis::Analysis;
use crate::resilience::{CallOutcome, ResilientCaller};
use crate::session::AnalysisSession;

pub struct AnalystDesk {
    caller: ResilientCaller,
    session: AnalysisSession,
    selected: Option<usize>,
    sort: SortKey,
    model: String,
}

impl AnalystDesk {
    pub fn new(caller: ResilientCaller, model: impl Into<String>) -> Self {
        Self {
            caller,
            session: AnalysisSession::new(),
            selected: None,
            sort: SortKey::default(),
            model: model.into(),
        }
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn events(&self) -> &Arc<EventBus> {
        self.caller.events()
    }

    pub fn caller(&self) -> &ResilientCaller {
        &self.caller
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a company by index; out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < dataset::records().len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
    }

    /// Run one analysis end to end: begin the session, call the endpoint,
    /// record the outcome. Refuses to start while another call is in flight.
    pub async fn run(&mut self, analysis: Analysis) -> Result<CallOutcome, DeskError> {
        let prompt = analysis.build()?;
        self.session.begin(prompt.heading.clone())?;
        info!(heading = %prompt.heading, "analysis started");

        let outcome = self.caller.call(&prompt.request).await;
        self.session.complete(outcome.clone())?;
        Ok(outcome)
    }

    /// Forget an analysis whose future was dropped before it finished.
    pub fn abandon(&mut self) {
        self.session.abandon();
    }

    pub fn dismiss(&mut self) -> Result<(), SessionError> {
        self.session.dismiss()
    }
}
