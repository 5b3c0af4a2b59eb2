//! A minimal terminal spinner shown while an analysis is in flight.

use std::io::Write;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::events::Event;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// Spinner caption after an event, or `None` to keep the current one.
fn caption_for(base: &str, event: &Event) -> Option<String> {
    match event {
        Event::AttemptFailed {
            attempt,
            max_attempts,
            retry_in,
            ..
        } => Some(format!(
            "{base} · retrying in {}s (attempt {}/{})",
            retry_in.as_secs_f32(),
            attempt + 1,
            max_attempts
        )),
        Event::CallStarted { .. } | Event::CallFinished { .. } => None,
    }
}

/// A terminal spinner that runs in a background task and follows the
/// caller's lifecycle events.
///
/// Call [`Spinner::start`] to begin, then [`Spinner::stop`] when done.
/// The spinner writes to stderr so it doesn't interfere with stdout output.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: tokio::sync::watch::Sender<bool>,
}

impl Spinner {
    /// Start a spinner with the given message (e.g. `"consulting"`).
    pub fn start(message: &str, mut events: broadcast::Receiver<Event>) -> Self {
        let (cancel_tx, mut cancel_rx) = tokio::sync::watch::channel(false);
        let base = message.to_string();

        let handle = tokio::spawn(async move {
            let mut caption = base.clone();
            let mut events_open = true;
            let mut i = 0;
            loop {
                let frame = FRAMES[i % FRAMES.len()];
                // \r moves to start of line, \x1b[2K clears the line
                eprint!("\x1b[2K\r{frame} {caption}");
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    event = events.recv(), if events_open => match event {
                        Ok(event) => {
                            if let Some(next) = caption_for(&base, &event) {
                                caption = next;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(_)) => {}
                        Err(broadcast::error::RecvError::Closed) => events_open = false,
                    },
                    _ = cancel_rx.changed() => break,
                }
                i += 1;
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}
