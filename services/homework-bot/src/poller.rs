//! Poller: fetches the latest homework status and notifies on change

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{BotError, ErrorKind};
use crate::notifier::Notifier;
use crate::state::PollState;
use crate::status_client::StatusClient;
use crate::translator::parse_status;
use crate::validator::check_response;

/// Payload field carrying the server time of the response
const CURRENT_DATE_KEY: &str = "current_date";

/// What a single poll iteration ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// A new status message was delivered
    Notified,
    /// The status message matched the last delivered one
    Unchanged,
    /// The iteration failed and a failure report was attempted
    Failed(ErrorKind),
}

/// Text of the report sent to the user when an iteration fails
pub fn failure_message(error: &BotError) -> String {
    format!("Program failure: {}", error)
}

/// Owns the poll schedule, the last delivered message and the failure boundary
pub struct Poller {
    client: Arc<dyn StatusClient>,
    notifier: Arc<dyn Notifier>,
    state: PollState,
    retry_interval: Duration,
    max_report_failures: u32,
    cancel: CancellationToken,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("state", &self.state)
            .field("retry_interval", &self.retry_interval)
            .finish_non_exhaustive()
    }
}

impl Poller {
    pub fn new(
        client: Arc<dyn StatusClient>,
        notifier: Arc<dyn Notifier>,
        config: &Config,
        cancel: CancellationToken,
    ) -> Self {
        let cursor = config.initial_cursor(current_epoch_secs());
        tracing::debug!(
            "Poller starting at cursor {} ({:?} mode)",
            cursor,
            config.cursor.mode
        );

        Self {
            client,
            notifier,
            state: PollState::new(cursor, config.cursor.mode),
            retry_interval: config.retry_interval(),
            max_report_failures: config.failure_reports.max_consecutive_delivery_failures,
            cancel,
        }
    }

    /// Override the pause between iterations
    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Poll until the cancellation token fires, returning the final state
    pub async fn run(mut self) -> PollState {
        tracing::info!(
            "Polling every {:?} via {}",
            self.retry_interval,
            self.notifier.type_name()
        );

        loop {
            let outcome = self.poll_once().await;
            tracing::debug!("Iteration finished: {:?}", outcome);

            tokio::select! {
                _ = tokio::time::sleep(self.retry_interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    break;
                }
            }
        }

        self.state
    }

    /// Run one fetch-validate-translate-notify pass. Never fails: any error is
    /// logged and reported through the notifier.
    pub async fn poll_once(&mut self) -> IterationOutcome {
        match self.check_and_notify().await {
            Ok(outcome) => {
                self.state.clear_delivery_failures();
                outcome
            }
            Err(e) => {
                tracing::error!("Poll iteration failed: {}", e);
                self.report_failure(&e).await;
                IterationOutcome::Failed(e.kind())
            }
        }
    }

    async fn check_and_notify(&mut self) -> crate::Result<IterationOutcome> {
        let started = current_epoch_secs();
        let response = self.client.fetch(self.state.cursor()).await?;
        let homework = check_response(&response)?;
        let message = parse_status(&homework)?;

        let outcome = if self.state.is_new(&message) {
            self.notifier.send(&message).await?;
            self.state.record_sent(message);
            IterationOutcome::Notified
        } else {
            tracing::debug!("No new statuses in response");
            IterationOutcome::Unchanged
        };

        let next_cursor = response
            .get(CURRENT_DATE_KEY)
            .and_then(Value::as_i64)
            .unwrap_or(started);
        self.state.advance_cursor(next_cursor);

        Ok(outcome)
    }

    /// Best-effort delivery of a failure report; never escalates
    async fn report_failure(&mut self, error: &BotError) {
        let cap = self.max_report_failures;
        if cap > 0 && self.state.consecutive_delivery_failures() >= cap {
            tracing::debug!("Failure report not sent, notifier is demoted to log-only");
            return;
        }

        match self.notifier.send(&failure_message(error)).await {
            Ok(()) => self.state.clear_delivery_failures(),
            Err(e) => {
                let streak = self.state.record_delivery_failure();
                tracing::error!("Failure report could not be delivered: {}", e);
                if cap > 0 && streak == cap {
                    tracing::warn!(
                        "{} failure reports in a row were not delivered, logging only until an iteration succeeds",
                        streak
                    );
                }
            }
        }
    }
}

fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
