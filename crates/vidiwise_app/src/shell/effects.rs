use std::sync::{mpsc, Arc};
use std::thread;

use vidiwise_core::{Effect, JobHandle, Msg, PollStatus};
use vidiwise_engine::{EngineEvent, EngineHandle, JobStatus, ServiceError, ServiceSettings};
use vidiwise_logging::{vidiwise_debug, vidiwise_info};

use super::ShellEvent;

/// Executes core effects on the engine and feeds engine results back to the
/// shell as messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(
        settings: ServiceSettings,
        events: mpsc::Sender<ShellEvent>,
    ) -> Result<Self, ServiceError> {
        let engine = Arc::new(EngineHandle::new(settings)?);
        spawn_event_loop(engine.clone(), events);
        Ok(Self { engine })
    }

    pub fn probe_health(&self) {
        self.engine.probe_health();
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitVideo { handle, url } => {
                    vidiwise_info!("SubmitVideo {} url={}", handle, url);
                    self.engine.submit_video(handle.generation(), url);
                }
                Effect::CheckStatus {
                    handle,
                    video_id,
                    delay,
                } => {
                    vidiwise_debug!("CheckStatus {} video_id={} delay={:?}", handle, video_id, delay);
                    self.engine
                        .check_status(handle.generation(), video_id, delay);
                }
                Effect::CancelPolling { handle } => {
                    vidiwise_info!("CancelPolling {}", handle);
                    self.engine.cancel(handle.generation());
                }
                Effect::SendChat {
                    request_id,
                    video_id,
                    message,
                } => {
                    vidiwise_debug!("SendChat #{} video_id={}", request_id, video_id);
                    self.engine.send_chat(request_id, video_id, message);
                }
            }
        }
    }
}

fn spawn_event_loop(engine: Arc<EngineHandle>, events: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        while let Some(event) = engine.recv() {
            if events.send(ShellEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Submitted { job_id, result } => {
            let handle = JobHandle::new(job_id);
            match result {
                Ok(video_id) => Msg::SubmissionAccepted { handle, video_id },
                Err(err) => Msg::SubmissionRejected {
                    handle,
                    reason: err.to_string(),
                },
            }
        }
        EngineEvent::StatusChecked { job_id, result } => {
            let handle = JobHandle::new(job_id);
            match result {
                Ok(status) => Msg::StatusReported {
                    handle,
                    status: map_status(status),
                },
                Err(err) => Msg::StatusCheckFailed {
                    handle,
                    reason: err.to_string(),
                },
            }
        }
        EngineEvent::ChatCompleted { request_id, result } => match result {
            Ok(text) => Msg::ChatReplied { request_id, text },
            Err(err) => Msg::ChatFailed {
                request_id,
                reason: err.to_string(),
            },
        },
    }
}

fn map_status(status: JobStatus) -> PollStatus {
    match status {
        JobStatus::Pending => PollStatus::Pending,
        JobStatus::Completed => PollStatus::Completed,
        JobStatus::Failed => PollStatus::Failed,
        JobStatus::Unrecognized(raw) => PollStatus::Unrecognized(raw),
    }
}
