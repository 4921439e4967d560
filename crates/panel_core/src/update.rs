use crate::{validate, Effect, Msg, PanelState, SubmissionOutcome, SubmissionPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::Activated => {
            // Re-activation is the only retry path for a failed methods
            // fetch, so the fetch effect is emitted unconditionally.
            let mut effects = vec![Effect::FetchAllowedMethods];
            if state.start_polling() {
                effects.push(Effect::StartLogPolling);
            }
            effects
        }
        Msg::Deactivated => {
            if state.stop_polling() {
                vec![Effect::StopLogPolling]
            } else {
                Vec::new()
            }
        }
        Msg::SubmitRequested { request } => {
            // One submission in flight per machine; duplicate form
            // resubmission is dropped, not queued.
            if state.submission_phase() == SubmissionPhase::Sending {
                return (state, Vec::new());
            }
            match validate(&request, state.allowed_methods()) {
                Err(reason) => {
                    state.record_outcome(SubmissionOutcome::Rejected(reason));
                    Vec::new()
                }
                Ok(()) => {
                    state.begin_sending();
                    vec![Effect::SubmitOperation { request }]
                }
            }
        }
        Msg::SubmissionSettled { outcome } => {
            if state.submission_phase() == SubmissionPhase::Sending {
                state.record_outcome(outcome);
            }
            Vec::new()
        }
        Msg::MethodsRefreshRequested => vec![Effect::FetchAllowedMethods],
        Msg::MethodsFetched { result } => {
            match result {
                Ok(methods) => state.replace_methods(methods),
                Err(detail) => state.record_methods_failure(detail),
            }
            Vec::new()
        }
        Msg::LogsStartRequested => {
            if state.start_polling() {
                vec![Effect::StartLogPolling]
            } else {
                Vec::new()
            }
        }
        Msg::LogsStopRequested => {
            if state.stop_polling() {
                vec![Effect::StopLogPolling]
            } else {
                Vec::new()
            }
        }
        Msg::LogSnapshotArrived { text } => {
            state.replace_snapshot(text);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
