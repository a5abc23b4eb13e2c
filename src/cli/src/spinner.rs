//! Indeterminate progress indicator for long waits.

use std::io::{self, Write};
use std::time::Duration;
use tokio::task::JoinHandle;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const TICK: Duration = Duration::from_millis(120);

/// A spinner on stderr that runs until stopped or dropped.
///
/// Dropping the spinner stops it, so holding one across a fallible
/// region guarantees the terminal is cleaned up on every exit path.
pub struct Spinner {
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Starts the spinner with the given message.
    pub fn start(message: &str) -> Self {
        let message = message.to_string();
        let handle = tokio::spawn(async move {
            let mut frame = 0usize;
            loop {
                eprint!("\r{} {}", FRAMES[frame % FRAMES.len()], message);
                let _ = io::stderr().flush();
                frame += 1;
                tokio::time::sleep(TICK).await;
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Stops the spinner and clears its line. Calling this more than
    /// once is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            // Erase the spinner line
            eprint!("\r\x1b[2K");
            let _ = io::stderr().flush();
        }
    }

    /// Whether the spinner is still ticking.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let mut spinner = Spinner::start("working");
        assert!(spinner.is_running());

        spinner.stop();
        assert!(!spinner.is_running());

        // Second stop must be a no-op
        spinner.stop();
        assert!(!spinner.is_running());
    }

    #[tokio::test]
    async fn test_drop_stops_the_ticker() {
        let spinner = Spinner::start("working");
        let abort = spinner.handle.as_ref().unwrap().abort_handle();
        drop(spinner);

        // The aborted ticker winds down at the next scheduling point
        while !abort.is_finished() {
            tokio::task::yield_now().await;
        }
    }
}
