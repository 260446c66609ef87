use crate::{JobHandle, PollStatus, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the video URL input.
    InputChanged(String),
    /// User submitted the current URL input for ingestion.
    VideoSubmitted,
    /// User abandoned the running ingestion.
    CancelClicked,
    /// Service accepted the submission and assigned a video id.
    SubmissionAccepted { handle: JobHandle, video_id: String },
    /// Submission request failed or was refused.
    SubmissionRejected { handle: JobHandle, reason: String },
    /// A status check returned.
    StatusReported { handle: JobHandle, status: PollStatus },
    /// A status check failed in transport or decoding.
    StatusCheckFailed { handle: JobHandle, reason: String },
    /// User edited the chat input.
    ChatInputChanged(String),
    /// User sent the current chat input.
    ChatSubmitted,
    /// Assistant answer for a chat request.
    ChatReplied { request_id: RequestId, text: String },
    /// Chat request failed.
    ChatFailed { request_id: RequestId, reason: String },
}
