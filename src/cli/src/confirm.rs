//! Transaction confirmation polling.
//!
//! A submitted transfer carries the seqno read just before submission;
//! the network offers no push notification, so the only way to learn
//! the transfer was processed is to re-read the account seqno until it
//! differs from the submitted one.

use crate::errors::CliError;
use crate::spinner::Spinner;
use async_trait::async_trait;
use std::time::Duration;
use ton_client::{ClientError, WalletContract};
use tracing::debug;

/// Delay between consecutive seqno reads.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Reads attempted before the wait is reported as timed out.
pub const MAX_POLL_ATTEMPTS: u32 = 40;

/// Source of an account's current seqno.
#[async_trait]
pub trait SeqnoSource {
    async fn current_seqno(&self) -> Result<u32, ClientError>;
}

#[async_trait]
impl SeqnoSource for WalletContract<'_> {
    async fn current_seqno(&self) -> Result<u32, ClientError> {
        self.seqno().await
    }
}

/// Waits until the account seqno differs from the submitted one and
/// returns the new value.
///
/// A progress spinner runs for the duration of the wait and is stopped
/// on every exit path: confirmation, a propagated read failure, or the
/// attempt budget running out.
pub async fn wait_for_transaction<S>(source: &S, submitted_seqno: u32) -> Result<u32, CliError>
where
    S: SeqnoSource + Sync,
{
    let mut spinner = Spinner::start("Waiting for transaction in blockchain");
    let result = poll_seqno(source, submitted_seqno).await;
    spinner.stop();
    result
}

async fn poll_seqno<S>(source: &S, submitted_seqno: u32) -> Result<u32, CliError>
where
    S: SeqnoSource + Sync,
{
    for attempt in 1..=MAX_POLL_ATTEMPTS {
        tokio::time::sleep(POLL_INTERVAL).await;

        // A read failure propagates immediately; the poll is not retried
        let current = source.current_seqno().await?;
        if current != submitted_seqno {
            debug!("Seqno advanced to {} after {} reads", current, attempt);
            return Ok(current);
        }
    }

    Err(CliError::ConfirmationTimeout {
        attempts: MAX_POLL_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a scripted sequence of seqno reads.
    struct ScriptedSource {
        reads: Mutex<VecDeque<Result<u32, ClientError>>>,
    }

    impl ScriptedSource {
        fn new(reads: Vec<Result<u32, ClientError>>) -> Self {
            Self {
                reads: Mutex::new(reads.into()),
            }
        }

        fn remaining(&self) -> usize {
            self.reads.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SeqnoSource for ScriptedSource {
        async fn current_seqno(&self) -> Result<u32, ClientError> {
            self.reads
                .lock()
                .unwrap()
                .pop_front()
                .expect("poller read past the scripted sequence")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_on_first_differing_read() {
        let source = ScriptedSource::new(vec![Ok(5), Ok(5), Ok(6)]);
        let confirmed = wait_for_transaction(&source, 5).await.unwrap();
        assert_eq!(confirmed, 6);
        // Every scripted read was consumed, none beyond the change
        assert_eq!(source.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_failure_propagates() {
        let source = ScriptedSource::new(vec![
            Ok(5),
            Err(ClientError::Network("connection reset".to_string())),
        ]);
        let result = wait_for_transaction(&source, 5).await;
        assert!(matches!(result, Err(CliError::Client(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_seqno_never_moves() {
        let reads = (0..MAX_POLL_ATTEMPTS).map(|_| Ok(5)).collect();
        let source = ScriptedSource::new(reads);
        let result = wait_for_transaction(&source, 5).await;
        assert!(matches!(
            result,
            Err(CliError::ConfirmationTimeout {
                attempts: MAX_POLL_ATTEMPTS
            })
        ));
        assert_eq!(source.remaining(), 0);
    }
}
