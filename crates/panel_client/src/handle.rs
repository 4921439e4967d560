use std::sync::{mpsc, Arc};
use std::thread;

use crate::poller::LogPoller;
use crate::service::{ClientSettings, ReqwestStagingClient, StagingApi};
use crate::{ClientEvent, OperationRequest, RequestError};

enum ClientCommand {
    Submit { request: OperationRequest },
    RefreshMethods,
    StartLogPolling,
    StopLogPolling,
}

/// Bridge between the synchronous shell and the async service client. A
/// dedicated thread owns the runtime and the polling session; commands go
/// in over one channel, events come back over another. Dropping the
/// handle closes the command channel, which ends the thread and with it
/// any active polling session.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let api: Arc<dyn StagingApi> = Arc::new(ReqwestStagingClient::new(settings)?);
        Ok(Self::with_api(api))
    }

    /// Handle over an arbitrary service implementation.
    pub fn with_api(api: Arc<dyn StagingApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            // The poller spawns its session task onto this runtime.
            let _guard = runtime.enter();
            let mut poller = LogPoller::new(api.clone(), event_tx.clone());
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ClientCommand::Submit { request } => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = api.submit(&request).await;
                            let _ = event_tx.send(ClientEvent::SubmissionSettled { result });
                        });
                    }
                    ClientCommand::RefreshMethods => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = api.fetch_allowed_methods().await;
                            let _ = event_tx.send(ClientEvent::MethodsFetched { result });
                        });
                    }
                    ClientCommand::StartLogPolling => poller.start(),
                    ClientCommand::StopLogPolling => poller.stop(),
                }
            }
            poller.stop();
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request: OperationRequest) {
        let _ = self.cmd_tx.send(ClientCommand::Submit { request });
    }

    pub fn refresh_methods(&self) {
        let _ = self.cmd_tx.send(ClientCommand::RefreshMethods);
    }

    pub fn start_logs(&self) {
        let _ = self.cmd_tx.send(ClientCommand::StartLogPolling);
    }

    pub fn stop_logs(&self) {
        let _ = self.cmd_tx.send(ClientCommand::StopLogPolling);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }
}
