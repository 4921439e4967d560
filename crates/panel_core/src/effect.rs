#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitOperation { request: crate::OperationRequest },
    FetchAllowedMethods,
    StartLogPolling,
    StopLogPolling,
}
