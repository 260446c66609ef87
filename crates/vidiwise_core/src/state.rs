use std::time::Duration;

use crate::chat::ChatSession;
use crate::embed::embed_url;
use crate::ingestion::{IngestionController, IngestionPhase, Transition};
use crate::view_model::{AppViewModel, IngestionStatus, Screen};
use crate::{ChatMessage, Effect, IngestionEvent, RequestId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    input_error: Option<String>,
    ingestion: IngestionController,
    chat: ChatSession,
    last_event: Option<IngestionEvent>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self {
            ingestion: IngestionController::new(poll_interval),
            ..Self::default()
        }
    }

    pub fn ingestion(&self) -> &IngestionController {
        &self.ingestion
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.chat.transcript()
    }

    /// Most recent terminal outcome of an ingestion job.
    pub fn last_event(&self) -> Option<&IngestionEvent> {
        self.last_event.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        let phase = self.ingestion.phase();
        let (ingestion, error) = match phase {
            IngestionPhase::Idle => (IngestionStatus::Idle, None),
            IngestionPhase::Submitting { .. } => (IngestionStatus::Submitting, None),
            IngestionPhase::Polling { .. } => (IngestionStatus::Processing, None),
            IngestionPhase::Ready { .. } => (IngestionStatus::Ready, None),
            IngestionPhase::Failed { failure, .. } => {
                (IngestionStatus::Failed, Some(failure.to_string()))
            }
        };
        let ready_video = self.ingestion.ready_video_id();

        AppViewModel {
            screen: if ready_video.is_some() {
                Screen::Chat
            } else {
                Screen::Landing
            },
            url_input: self.url_input.clone(),
            ingestion,
            processing: self.ingestion.active_handle().is_some(),
            video_id: self.ingestion.video_id().map(ToOwned::to_owned),
            embed_url: ready_video.and_then(embed_url),
            error: self.input_error.clone().or(error),
            transcript: self.chat.transcript().to_vec(),
            chat_input: self.chat.draft().to_string(),
            chat_loading: self.chat.is_loading(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        self.url_input = text;
    }

    pub(crate) fn submit_video(&mut self) -> Vec<Effect> {
        self.mark_dirty();
        match self.ingestion.submit(&self.url_input) {
            Ok((_handle, effects)) => {
                self.input_error = None;
                self.last_event = None;
                self.chat.restart();
                effects
            }
            Err(err) => {
                self.input_error = Some(err.to_string());
                Vec::new()
            }
        }
    }

    pub(crate) fn cancel_ingestion(&mut self) -> Vec<Effect> {
        let Some(handle) = self.ingestion.active_handle() else {
            return Vec::new();
        };
        self.mark_dirty();
        self.ingestion.cancel(handle)
    }

    /// Applies a controller transition; stale results leave state untouched.
    pub(crate) fn apply_transition(&mut self, transition: Option<Transition>) -> Vec<Effect> {
        let Some(transition) = transition else {
            return Vec::new();
        };
        self.mark_dirty();
        if let Some(event) = transition.event {
            self.last_event = Some(event);
        }
        transition.effects
    }

    pub(crate) fn ingestion_mut(&mut self) -> &mut IngestionController {
        &mut self.ingestion
    }

    pub(crate) fn set_chat_input(&mut self, text: String) {
        self.chat.set_draft(text);
    }

    pub(crate) fn submit_chat(&mut self) -> Vec<Effect> {
        let Some(video_id) = self.ingestion.ready_video_id() else {
            return Vec::new();
        };
        let video_id = video_id.to_string();
        match self.chat.submit(&video_id) {
            Some(effect) => {
                self.mark_dirty();
                vec![effect]
            }
            None => Vec::new(),
        }
    }

    pub(crate) fn apply_chat_reply(&mut self, request_id: RequestId, text: &str) {
        if self.chat.reply(request_id, text) {
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_chat_failure(&mut self, request_id: RequestId, reason: &str) {
        if self.chat.fail(request_id, reason) {
            self.mark_dirty();
        }
    }
}
