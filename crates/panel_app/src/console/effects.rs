use panel_client::{ClientEvent, ClientHandle};
use panel_core::{Effect, Msg, SubmissionOutcome};
use panel_logging::{panel_info, panel_warn};

/// Executes the effects the state machine requests and translates the
/// client's events back into messages.
pub struct EffectRunner {
    handle: ClientHandle,
}

impl EffectRunner {
    pub fn new(handle: ClientHandle) -> Self {
        Self { handle }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitOperation { request } => {
                    panel_info!("SubmitOperation {}", describe_request(&request));
                    self.handle.submit(map_request(request));
                }
                Effect::FetchAllowedMethods => {
                    panel_info!("FetchAllowedMethods");
                    self.handle.refresh_methods();
                }
                Effect::StartLogPolling => {
                    panel_info!("StartLogPolling");
                    self.handle.start_logs();
                }
                Effect::StopLogPolling => {
                    panel_info!("StopLogPolling");
                    self.handle.stop_logs();
                }
            }
        }
    }

    pub fn drain_events(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.handle.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::SubmissionSettled { result } => {
            let outcome = match result {
                Ok(payload) => SubmissionOutcome::Accepted {
                    payload: pretty_payload(&payload),
                },
                Err(err) => {
                    panel_warn!("Submission failed: {err}");
                    SubmissionOutcome::Failed {
                        detail: err.detail(),
                    }
                }
            };
            Msg::SubmissionSettled { outcome }
        }
        ClientEvent::MethodsFetched { result } => Msg::MethodsFetched {
            result: result.map_err(|err| {
                panel_warn!("Allowed methods fetch failed: {err}");
                err.detail()
            }),
        },
        ClientEvent::LogSnapshot { text } => Msg::LogSnapshotArrived { text },
    }
}

fn map_request(request: panel_core::OperationRequest) -> panel_client::OperationRequest {
    match request {
        panel_core::OperationRequest::CreateFile { filename, content } => {
            panel_client::OperationRequest::CreateFile { filename, content }
        }
        panel_core::OperationRequest::StageData {
            method,
            username,
            local_path,
            relative_path,
        } => panel_client::OperationRequest::StageData {
            method,
            username,
            local_path,
            relative_path,
        },
    }
}

fn describe_request(request: &panel_core::OperationRequest) -> String {
    match request {
        panel_core::OperationRequest::CreateFile { filename, content } => {
            format!("create-file filename={} content_len={}", filename, content.len())
        }
        panel_core::OperationRequest::StageData {
            method, username, ..
        } => {
            format!("stage-data method={method} username={username}")
        }
    }
}

fn pretty_payload(payload: &serde_json::Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}
