use std::time::Duration;

use crate::{JobHandle, RequestId};

/// Work the engine must carry out on behalf of the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `POST /process-video` for a new job.
    SubmitVideo { handle: JobHandle, url: String },
    /// Query the job status once, after `delay`.
    CheckStatus {
        handle: JobHandle,
        video_id: String,
        delay: Duration,
    },
    /// Drop any scheduled or in-flight status check for the job.
    CancelPolling { handle: JobHandle },
    /// `POST /start-chat` with one user question.
    SendChat {
        request_id: RequestId,
        video_id: String,
        message: String,
    },
}
