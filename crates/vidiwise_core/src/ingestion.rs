//! Video ingestion lifecycle: submit, poll, then ready or failed.
//!
//! The controller is a pure state machine. It never performs IO itself; every
//! transition returns the [`Effect`]s the engine must run next. Each
//! submission gets a fresh [`JobHandle`], and results carrying any other
//! handle are dropped, so a superseded job can never touch current state.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use vidiwise_logging::{vidiwise_debug, vidiwise_info, vidiwise_warn};

use crate::Effect;

pub type Generation = u64;

/// Delay between two status checks of the same job.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Identifies one submission. Handles are never reused within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobHandle(Generation);

impl JobHandle {
    pub fn new(generation: Generation) -> Self {
        Self(generation)
    }

    pub fn generation(self) -> Generation {
        self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

/// Status reported by the processing service for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus {
    Pending,
    Completed,
    Failed,
    /// Any other status string. Treated as non-terminal.
    Unrecognized(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IngestionFailure {
    #[error("submission rejected")]
    SubmissionRejected,
    #[error("processing failed")]
    ProcessingFailed,
    #[error("status check failed")]
    StatusCheckFailed,
}

/// Outcome of a job. Emitted exactly once per handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionEvent {
    Ready {
        handle: JobHandle,
        video_id: String,
    },
    Failed {
        handle: JobHandle,
        failure: IngestionFailure,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("video url must not be empty")]
    EmptyUrl,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IngestionPhase {
    #[default]
    Idle,
    Submitting {
        handle: JobHandle,
        url: String,
    },
    Polling {
        handle: JobHandle,
        video_id: String,
        polls: u32,
    },
    Ready {
        handle: JobHandle,
        video_id: String,
    },
    Failed {
        handle: JobHandle,
        failure: IngestionFailure,
    },
}

/// Result of applying a service response to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transition {
    pub event: Option<IngestionEvent>,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionController {
    phase: IngestionPhase,
    last_generation: Generation,
    poll_interval: Duration,
}

impl Default for IngestionController {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl IngestionController {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            phase: IngestionPhase::Idle,
            last_generation: 0,
            poll_interval,
        }
    }

    pub fn phase(&self) -> &IngestionPhase {
        &self.phase
    }

    /// Handle of the job still waiting on the service, if any.
    pub fn active_handle(&self) -> Option<JobHandle> {
        match &self.phase {
            IngestionPhase::Submitting { handle, .. } | IngestionPhase::Polling { handle, .. } => {
                Some(*handle)
            }
            _ => None,
        }
    }

    /// Video id handed out by the service for the current job.
    pub fn video_id(&self) -> Option<&str> {
        match &self.phase {
            IngestionPhase::Polling { video_id, .. } | IngestionPhase::Ready { video_id, .. } => {
                Some(video_id)
            }
            _ => None,
        }
    }

    /// Video id of a job that finished processing.
    pub fn ready_video_id(&self) -> Option<&str> {
        match &self.phase {
            IngestionPhase::Ready { video_id, .. } => Some(video_id),
            _ => None,
        }
    }

    /// Starts a new job, superseding any job still in flight.
    pub fn submit(&mut self, source_url: &str) -> Result<(JobHandle, Vec<Effect>), SubmitError> {
        let url = source_url.trim();
        if url.is_empty() {
            return Err(SubmitError::EmptyUrl);
        }

        let mut effects = Vec::with_capacity(2);
        if let Some(previous) = self.active_handle() {
            vidiwise_info!("Superseding {} with a new submission", previous);
            effects.push(Effect::CancelPolling { handle: previous });
        }

        self.last_generation += 1;
        let handle = JobHandle::new(self.last_generation);
        self.phase = IngestionPhase::Submitting {
            handle,
            url: url.to_string(),
        };
        effects.push(Effect::SubmitVideo {
            handle,
            url: url.to_string(),
        });
        vidiwise_info!("Submitted {} url={}", handle, url);
        Ok((handle, effects))
    }

    /// The service accepted the submission. Polling starts right away.
    pub fn submission_accepted(&mut self, handle: JobHandle, video_id: String) -> Option<Transition> {
        if !self.is_submitting(handle) {
            vidiwise_debug!("Discarding stale submission result for {}", handle);
            return None;
        }
        vidiwise_info!("{} accepted as video_id={}", handle, video_id);
        self.phase = IngestionPhase::Polling {
            handle,
            video_id: video_id.clone(),
            polls: 0,
        };
        Some(Transition {
            event: None,
            effects: vec![Effect::CheckStatus {
                handle,
                video_id,
                delay: Duration::ZERO,
            }],
        })
    }

    pub fn submission_rejected(&mut self, handle: JobHandle, reason: &str) -> Option<Transition> {
        if !self.is_submitting(handle) {
            vidiwise_debug!("Discarding stale submission failure for {}", handle);
            return None;
        }
        vidiwise_warn!("{} rejected: {}", handle, reason);
        Some(self.fail(handle, IngestionFailure::SubmissionRejected))
    }

    /// Applies one poll result. Non-terminal statuses schedule exactly one
    /// further check after the poll interval.
    pub fn status_received(&mut self, handle: JobHandle, status: PollStatus) -> Option<Transition> {
        let IngestionPhase::Polling {
            handle: current,
            video_id,
            polls,
        } = &mut self.phase
        else {
            vidiwise_debug!("Discarding status for {}: not polling", handle);
            return None;
        };
        if *current != handle {
            vidiwise_debug!("Discarding stale status for {}", handle);
            return None;
        }
        *polls += 1;

        match status {
            PollStatus::Completed => {
                let video_id = std::mem::take(video_id);
                vidiwise_info!("{} ready after {} polls", handle, polls);
                self.phase = IngestionPhase::Ready {
                    handle,
                    video_id: video_id.clone(),
                };
                Some(Transition {
                    event: Some(IngestionEvent::Ready { handle, video_id }),
                    effects: Vec::new(),
                })
            }
            PollStatus::Failed => {
                vidiwise_warn!("{} failed on the service", handle);
                Some(self.fail(handle, IngestionFailure::ProcessingFailed))
            }
            PollStatus::Pending | PollStatus::Unrecognized(_) => {
                if let PollStatus::Unrecognized(raw) = &status {
                    vidiwise_warn!("{} reported unrecognized status {:?}; polling on", handle, raw);
                }
                Some(Transition {
                    event: None,
                    effects: vec![Effect::CheckStatus {
                        handle,
                        video_id: video_id.clone(),
                        delay: self.poll_interval,
                    }],
                })
            }
        }
    }

    pub fn status_check_failed(&mut self, handle: JobHandle, reason: &str) -> Option<Transition> {
        match &self.phase {
            IngestionPhase::Polling { handle: current, .. } if *current == handle => {
                vidiwise_warn!("{} status check failed: {}", handle, reason);
                Some(self.fail(handle, IngestionFailure::StatusCheckFailed))
            }
            _ => {
                vidiwise_debug!("Discarding stale status failure for {}", handle);
                None
            }
        }
    }

    /// Stops the job behind `handle`. Idempotent; does nothing once the job
    /// has finished or been superseded.
    pub fn cancel(&mut self, handle: JobHandle) -> Vec<Effect> {
        if self.active_handle() != Some(handle) {
            return Vec::new();
        }
        vidiwise_info!("Cancelled {}", handle);
        self.phase = IngestionPhase::Idle;
        vec![Effect::CancelPolling { handle }]
    }

    fn is_submitting(&self, handle: JobHandle) -> bool {
        matches!(&self.phase, IngestionPhase::Submitting { handle: current, .. } if *current == handle)
    }

    fn fail(&mut self, handle: JobHandle, failure: IngestionFailure) -> Transition {
        self.phase = IngestionPhase::Failed { handle, failure };
        Transition {
            event: Some(IngestionEvent::Failed { handle, failure }),
            effects: Vec::new(),
        }
    }
}
