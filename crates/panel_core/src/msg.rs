#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// View came up: sync allowed methods and begin log polling.
    Activated,
    /// View is going away: release the polling session.
    Deactivated,
    /// Operator submitted a form.
    SubmitRequested { request: crate::OperationRequest },
    /// The client settled the in-flight submission.
    SubmissionSettled { outcome: crate::SubmissionOutcome },
    /// Operator asked for a fresh allowed-methods fetch.
    MethodsRefreshRequested,
    /// Allowed-methods fetch resolved; `Err` carries the diagnostic detail.
    MethodsFetched { result: Result<Vec<String>, String> },
    /// Operator turned log polling on.
    LogsStartRequested,
    /// Operator turned log polling off.
    LogsStopRequested,
    /// A log poll delivered a full snapshot.
    LogSnapshotArrived { text: String },
    /// Fallback for placeholder wiring.
    NoOp,
}
