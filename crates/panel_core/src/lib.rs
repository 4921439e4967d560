//! Panel core: pure state machine and view-model helpers for the staging console.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    OperationRequest, PanelState, PollingSession, SubmissionOutcome, SubmissionPhase,
};
pub use update::update;
pub use validate::{validate, ValidationError};
pub use view_model::PanelViewModel;
