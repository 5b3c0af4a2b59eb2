use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

use crate::error::AttemptError;

use super::{GenerateRequest, Generator};

/// A scripted generator for tests. Returns pre-defined attempt results in
/// order and records when each attempt was made.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, AttemptError>>>,
    calls: Mutex<Vec<Instant>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, AttemptError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail `failures` times with [`AttemptError::MissingText`], then answer `text`.
    pub fn failing_then(failures: usize, text: &str) -> Self {
        let mut script: Vec<Result<String, AttemptError>> =
            (0..failures).map(|_| Err(AttemptError::MissingText)).collect();
        script.push(Ok(text.to_string()));
        Self::new(script)
    }

    /// Never succeeds.
    pub fn always_failing() -> Self {
        Self::new(Vec::new())
    }

    /// Number of attempts made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Gaps between consecutive attempts.
    pub fn gaps(&self) -> Vec<std::time::Duration> {
        let calls = self.calls.lock().unwrap();
        calls.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AttemptError> {
        self.calls.lock().unwrap().push(Instant::now());
        self.requests.lock().unwrap().push(request.clone());
        // An exhausted script behaves like an endpoint that is down.
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AttemptError::Status {
                    status: 503,
                    body: "script exhausted".to_string(),
                })
            })
    }
}
