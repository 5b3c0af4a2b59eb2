//! Best-effort calls to the text-generation endpoint.
//!
//! [`ResilientCaller`] retries a [`Generator`] with exponential backoff and
//! turns whatever happens into a [`CallOutcome`]. Every failure kind is
//! retried the same way: transport errors, error statuses, malformed bodies
//! and responses without text. Nothing escapes as an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::consts::{DEFAULT_INITIAL_DELAY, DEFAULT_MAX_ATTEMPTS, FAILURE_MESSAGE};
use crate::error::ConfigError;
use crate::events::{Event, EventBus};
use crate::generator::{GenerateRequest, Generator};

/// How many times to try and how long to wait before the first retry.
/// The wait doubles after every failed attempt. No jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::InvalidPolicy(
                "max attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            initial_delay,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

/// Why a call produced no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailure {
    /// Static, user-facing message.
    pub message: &'static str,
    /// Attempts made before giving up.
    pub attempts: u32,
    /// The last attempt's error, for logs and `/status`.
    pub last_error: String,
}

/// Result of one resilient call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Generated text with emphasis markup removed.
    Text(String),
    Failed(CallFailure),
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Text(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            CallOutcome::Text(text) => Some(text),
            CallOutcome::Failed(_) => None,
        }
    }
}

/// Remove every literal `**` from generated text.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}

/// Wraps a [`Generator`] with the retry loop.
///
/// State of a call (attempt counter, current delay) lives on the stack of
/// [`ResilientCaller::call`], so concurrent calls never interfere.
pub struct ResilientCaller {
    generator: Arc<dyn Generator>,
    policy: RetryPolicy,
    events: Arc<EventBus>,
}

impl ResilientCaller {
    pub fn new(generator: Arc<dyn Generator>, policy: RetryPolicy) -> Self {
        Self {
            generator,
            policy,
            events: Arc::new(EventBus::default()),
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Lifecycle events of every call made through this caller.
    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub async fn call(&self, request: &GenerateRequest) -> CallOutcome {
        let max_attempts = self.policy.max_attempts;
        let mut attempt: u32 = 0;
        let mut delay = self.policy.initial_delay;

        info!(
            max_attempts,
            tools = request.tools().len(),
            "requesting analysis"
        );
        self.events.emit(Event::CallStarted { max_attempts });

        loop {
            let err = match self.generator.generate(request).await {
                Ok(text) => {
                    if attempt > 0 {
                        debug!(attempts = attempt + 1, "analysis succeeded after retries");
                    }
                    self.events.emit(Event::CallFinished {
                        success: true,
                        attempts: attempt + 1,
                    });
                    return CallOutcome::Text(strip_emphasis(&text));
                }
                Err(err) => err,
            };

            if attempt + 1 >= max_attempts {
                warn!(attempts = attempt + 1, error = %err, "giving up on analysis");
                self.events.emit(Event::CallFinished {
                    success: false,
                    attempts: attempt + 1,
                });
                return CallOutcome::Failed(CallFailure {
                    message: FAILURE_MESSAGE,
                    attempts: attempt + 1,
                    last_error: err.to_string(),
                });
            }

            warn!(
                attempt = attempt + 1,
                max_attempts,
                error = %err,
                "attempt failed, retrying in {:?}",
                delay
            );
            self.events.emit(Event::AttemptFailed {
                attempt: attempt + 1,
                max_attempts,
                reason: err.to_string(),
                retry_in: delay,
            });

            tokio::time::sleep(delay).await;
            delay = delay.saturating_mul(2);
            attempt += 1;
        }
    }
}
