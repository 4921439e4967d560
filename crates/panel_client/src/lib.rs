//! Panel client: staging-service IO, the log polling session, and the
//! runtime bridge used by the synchronous shell.
mod handle;
mod poller;
mod service;
mod types;

pub use handle::ClientHandle;
pub use poller::LogPoller;
pub use service::{ClientSettings, ReqwestStagingClient, StagingApi};
pub use types::{
    ClientEvent, FailureKind, OperationRequest, PollerState, RequestError, GENERIC_ERROR_DETAIL,
    LOG_POLL_INTERVAL, LOG_UNAVAILABLE,
};
