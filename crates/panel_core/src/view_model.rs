use crate::{PollingSession, SubmissionOutcome};

/// Cloned snapshot of panel state for a presentation layer.
///
/// Consumers read it and throw it away; mutating it never feeds back into
/// the owning state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelViewModel {
    pub submitting: bool,
    pub last_outcome: Option<SubmissionOutcome>,
    pub allowed_methods: Vec<String>,
    pub methods_diagnostic: Option<String>,
    pub polling: PollingSession,
    pub log_text: String,
    pub dirty: bool,
}
