use crate::validate::ValidationError;
use crate::view_model::PanelViewModel;

/// A single user-initiated operation against the staging service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    CreateFile {
        filename: String,
        content: String,
    },
    StageData {
        method: String,
        username: String,
        local_path: String,
        relative_path: String,
    },
}

/// Terminal outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Input failed local validation; nothing was sent.
    Rejected(ValidationError),
    /// The service accepted the operation; `payload` is the display-ready response.
    Accepted { payload: String },
    /// Transport or service failure; `detail` is the operator-facing message.
    Failed { detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollingSession {
    #[default]
    Idle,
    Active,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct SubmissionState {
    phase: SubmissionPhase,
    last_outcome: Option<SubmissionOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct MethodsState {
    allowed: Vec<String>,
    diagnostic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct LogsState {
    session: PollingSession,
    snapshot: String,
}

/// Panel state: one record per component, owned here exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    submission: SubmissionState,
    methods: MethodsState,
    logs: LogsState,
    dirty: bool,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel {
            submitting: self.submission.phase == SubmissionPhase::Sending,
            last_outcome: self.submission.last_outcome.clone(),
            allowed_methods: self.methods.allowed.clone(),
            methods_diagnostic: self.methods.diagnostic.clone(),
            polling: self.logs.session,
            log_text: self.logs.snapshot.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub fn submission_phase(&self) -> SubmissionPhase {
        self.submission.phase
    }

    pub fn polling_session(&self) -> PollingSession {
        self.logs.session
    }

    pub fn allowed_methods(&self) -> &[String] {
        &self.methods.allowed
    }

    pub(crate) fn begin_sending(&mut self) {
        self.submission.phase = SubmissionPhase::Sending;
        self.submission.last_outcome = None;
        self.dirty = true;
    }

    pub(crate) fn record_outcome(&mut self, outcome: SubmissionOutcome) {
        self.submission.phase = SubmissionPhase::Idle;
        self.submission.last_outcome = Some(outcome);
        self.dirty = true;
    }

    /// Transitions the session to `Active`; returns false when already active.
    pub(crate) fn start_polling(&mut self) -> bool {
        if self.logs.session == PollingSession::Active {
            return false;
        }
        self.logs.session = PollingSession::Active;
        self.dirty = true;
        true
    }

    /// Transitions the session to `Stopped`; returns false when not active.
    pub(crate) fn stop_polling(&mut self) -> bool {
        if self.logs.session != PollingSession::Active {
            return false;
        }
        self.logs.session = PollingSession::Stopped;
        self.dirty = true;
        true
    }

    // The cached set is swapped whole; consumers never observe a partial update.
    pub(crate) fn replace_methods(&mut self, methods: Vec<String>) {
        self.methods.allowed = methods;
        self.methods.diagnostic = None;
        self.dirty = true;
    }

    pub(crate) fn record_methods_failure(&mut self, detail: String) {
        self.methods.diagnostic = Some(detail);
        self.dirty = true;
    }

    // Each snapshot fully replaces the previous one; snapshots delivered
    // after the session left `Active` are dropped.
    pub(crate) fn replace_snapshot(&mut self, text: String) {
        if self.logs.session != PollingSession::Active {
            return;
        }
        self.logs.snapshot = text;
        self.dirty = true;
    }
}
