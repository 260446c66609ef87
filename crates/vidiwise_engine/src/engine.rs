use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vidiwise_logging::{vidiwise_debug, vidiwise_error, vidiwise_info, vidiwise_warn};

use crate::service::{ProcessingService, ReqwestService, ServiceSettings};
use crate::{EngineEvent, JobId, RequestId, ServiceError};

enum EngineCommand {
    SubmitVideo {
        job_id: JobId,
        url: String,
    },
    CheckStatus {
        job_id: JobId,
        video_id: String,
        delay: Duration,
    },
    Cancel {
        job_id: JobId,
    },
    SendChat {
        request_id: RequestId,
        video_id: String,
        message: String,
    },
    ProbeHealth,
}

/// Runs service calls on a background tokio runtime and reports results as
/// [`EngineEvent`]s.
///
/// Only one ingestion job is live at a time: submitting a job cancels the
/// token of every other one, which aborts its pending delay or in-flight
/// request and suppresses its event.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let service = ReqwestService::new(settings)?;
        Ok(Self::with_service(Arc::new(service)))
    }

    pub fn with_service(service: Arc<dyn ProcessingService>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_engine(service, cmd_rx, event_tx));

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn submit_video(&self, job_id: JobId, url: impl Into<String>) {
        self.send(EngineCommand::SubmitVideo {
            job_id,
            url: url.into(),
        });
    }

    /// Checks the job status once after `delay`.
    pub fn check_status(&self, job_id: JobId, video_id: impl Into<String>, delay: Duration) {
        self.send(EngineCommand::CheckStatus {
            job_id,
            video_id: video_id.into(),
            delay,
        });
    }

    pub fn cancel(&self, job_id: JobId) {
        self.send(EngineCommand::Cancel { job_id });
    }

    pub fn send_chat(
        &self,
        request_id: RequestId,
        video_id: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.send(EngineCommand::SendChat {
            request_id,
            video_id: video_id.into(),
            message: message.into(),
        });
    }

    /// Logs whether the service answers its health endpoint.
    pub fn probe_health(&self) {
        self.send(EngineCommand::ProbeHealth);
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    /// Blocks until the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            vidiwise_error!("Engine thread is gone; dropping command");
        }
    }
}

/// Cancellation token of the one live ingestion job.
#[derive(Default)]
struct LiveJob {
    current: Option<(JobId, CancellationToken)>,
}

impl LiveJob {
    fn start(&mut self, job_id: JobId) -> CancellationToken {
        self.cancel_current();
        let token = CancellationToken::new();
        self.current = Some((job_id, token.clone()));
        token
    }

    fn token(&self, job_id: JobId) -> Option<CancellationToken> {
        match &self.current {
            Some((current, token)) if *current == job_id => Some(token.clone()),
            _ => None,
        }
    }

    fn cancel(&mut self, job_id: JobId) {
        if matches!(&self.current, Some((current, _)) if *current == job_id) {
            self.cancel_current();
        }
    }

    fn cancel_current(&mut self) {
        if let Some((job_id, token)) = self.current.take() {
            vidiwise_debug!("Cancelling job {}", job_id);
            token.cancel();
        }
    }
}

fn run_engine(
    service: Arc<dyn ProcessingService>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            vidiwise_error!("Failed to start engine runtime: {}", err);
            return;
        }
    };
    let mut live = LiveJob::default();

    while let Ok(command) = cmd_rx.recv() {
        let service = service.clone();
        let event_tx = event_tx.clone();
        match command {
            EngineCommand::SubmitVideo { job_id, url } => {
                let token = live.start(job_id);
                runtime.spawn(async move {
                    let result = tokio::select! {
                        _ = token.cancelled() => return,
                        result = service.submit_video(&url) => result,
                    };
                    if let Err(err) = &result {
                        vidiwise_warn!("Job {} submission failed: {}", job_id, err);
                    }
                    let _ = event_tx.send(EngineEvent::Submitted { job_id, result });
                });
            }
            EngineCommand::CheckStatus {
                job_id,
                video_id,
                delay,
            } => {
                let Some(token) = live.token(job_id) else {
                    vidiwise_debug!("Skipping status check for inactive job {}", job_id);
                    continue;
                };
                runtime.spawn(async move {
                    let check = async {
                        tokio::time::sleep(delay).await;
                        service.video_status(&video_id).await
                    };
                    let result = tokio::select! {
                        _ = token.cancelled() => return,
                        result = check => result,
                    };
                    let _ = event_tx.send(EngineEvent::StatusChecked { job_id, result });
                });
            }
            EngineCommand::Cancel { job_id } => live.cancel(job_id),
            EngineCommand::SendChat {
                request_id,
                video_id,
                message,
            } => {
                runtime.spawn(async move {
                    let result = service.send_chat(&video_id, &message).await;
                    if let Err(err) = &result {
                        vidiwise_warn!("Chat request {} failed: {}", request_id, err);
                    }
                    let _ = event_tx.send(EngineEvent::ChatCompleted { request_id, result });
                });
            }
            EngineCommand::ProbeHealth => {
                runtime.spawn(async move {
                    match service.health().await {
                        Ok(status) => vidiwise_info!("Service health: {}", status),
                        Err(err) => vidiwise_warn!("Service health check failed: {}", err),
                    }
                });
            }
        }
    }

    live.cancel_current();
    vidiwise_info!("Engine command channel closed; shutting down");
}
