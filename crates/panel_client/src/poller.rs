use std::sync::mpsc;
use std::sync::Arc;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use panel_logging::panel_warn;

use crate::{ClientEvent, PollerState, StagingApi, LOG_POLL_INTERVAL, LOG_UNAVAILABLE};

/// Repeating log fetcher. A session performs one fetch immediately on
/// start and one per interval after that, emitting each snapshot as an
/// event. At most one timer exists per session: `start` on an active
/// session is a no-op, and after `stop` returns no further fetch is
/// issued and any in-flight result is discarded.
pub struct LogPoller {
    api: Arc<dyn StagingApi>,
    events: mpsc::Sender<ClientEvent>,
    state: PollerState,
    cancel: Option<CancellationToken>,
}

impl LogPoller {
    pub fn new(api: Arc<dyn StagingApi>, events: mpsc::Sender<ClientEvent>) -> Self {
        Self {
            api,
            events,
            state: PollerState::Idle,
            cancel: None,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Begins a polling session. Must be called from within a tokio
    /// runtime.
    pub fn start(&mut self) {
        if self.state == PollerState::Active {
            return;
        }
        let cancel = CancellationToken::new();
        tokio::spawn(poll_loop(
            self.api.clone(),
            self.events.clone(),
            cancel.clone(),
        ));
        self.cancel = Some(cancel);
        self.state = PollerState::Active;
    }

    /// Ends the session. Idempotent; a session that never started stays
    /// idle.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        if self.state == PollerState::Active {
            self.state = PollerState::Stopped;
        }
    }
}

impl Drop for LogPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(
    api: Arc<dyn StagingApi>,
    events: mpsc::Sender<ClientEvent>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(LOG_POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        // Biased towards cancellation: once `stop` has run, neither a due
        // tick nor a completed fetch may produce another event.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = api.fetch_logs() => result,
        };
        let text = match fetched {
            Ok(text) => text,
            Err(err) => {
                panel_warn!("Log fetch failed: {err}");
                LOG_UNAVAILABLE.to_string()
            }
        };
        if events.send(ClientEvent::LogSnapshot { text }).is_err() {
            break;
        }
    }
}
