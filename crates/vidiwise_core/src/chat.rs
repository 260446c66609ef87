use vidiwise_logging::{vidiwise_debug, vidiwise_warn};

use crate::format::{format, FormattedContent};
use crate::Effect;

pub type RequestId = u64;

/// Transcript text shown when the chat endpoint fails.
pub const CHAT_ERROR_MESSAGE: &str = "Failed to get response. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Error,
}

/// One transcript entry. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    User(String),
    Assistant(FormattedContent),
    Error(String),
}

impl ChatMessage {
    pub fn role(&self) -> Role {
        match self {
            ChatMessage::User(_) => Role::User,
            ChatMessage::Assistant(_) => Role::Assistant,
            ChatMessage::Error(_) => Role::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ChatSession {
    draft: String,
    transcript: Vec<ChatMessage>,
    pending: Option<RequestId>,
    last_request_id: RequestId,
}

impl ChatSession {
    pub(crate) fn draft(&self) -> &str {
        &self.draft
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    pub(crate) fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a fresh conversation for a new video. Each video gets its own
    /// chat session; entries are never removed while that session lasts.
    /// Request ids keep counting so a late reply from the previous
    /// conversation still reads as stale.
    pub(crate) fn restart(&mut self) {
        self.draft.clear();
        self.transcript.clear();
        self.pending = None;
    }

    /// Sends the draft about `video_id`. Blank drafts and submissions while a
    /// reply is pending are ignored.
    pub(crate) fn submit(&mut self, video_id: &str) -> Option<Effect> {
        if self.draft.trim().is_empty() || self.pending.is_some() {
            return None;
        }
        let message = std::mem::take(&mut self.draft);
        self.transcript.push(ChatMessage::User(message.clone()));
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.pending = Some(request_id);
        Some(Effect::SendChat {
            request_id,
            video_id: video_id.to_string(),
            message,
        })
    }

    pub(crate) fn reply(&mut self, request_id: RequestId, text: &str) -> bool {
        if !self.take_pending(request_id) {
            return false;
        }
        self.transcript.push(ChatMessage::Assistant(format(text)));
        true
    }

    pub(crate) fn fail(&mut self, request_id: RequestId, reason: &str) -> bool {
        if !self.take_pending(request_id) {
            return false;
        }
        vidiwise_warn!("Chat request {} failed: {}", request_id, reason);
        self.transcript
            .push(ChatMessage::Error(CHAT_ERROR_MESSAGE.to_string()));
        true
    }

    fn take_pending(&mut self, request_id: RequestId) -> bool {
        if self.pending == Some(request_id) {
            self.pending = None;
            true
        } else {
            vidiwise_debug!("Discarding stale chat result {}", request_id);
            false
        }
    }
}
