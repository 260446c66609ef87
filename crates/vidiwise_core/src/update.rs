use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::VideoSubmitted => state.submit_video(),
        Msg::CancelClicked => state.cancel_ingestion(),
        Msg::SubmissionAccepted { handle, video_id } => {
            let transition = state
                .ingestion_mut()
                .submission_accepted(handle, video_id);
            state.apply_transition(transition)
        }
        Msg::SubmissionRejected { handle, reason } => {
            let transition = state.ingestion_mut().submission_rejected(handle, &reason);
            state.apply_transition(transition)
        }
        Msg::StatusReported { handle, status } => {
            let transition = state.ingestion_mut().status_received(handle, status);
            state.apply_transition(transition)
        }
        Msg::StatusCheckFailed { handle, reason } => {
            let transition = state.ingestion_mut().status_check_failed(handle, &reason);
            state.apply_transition(transition)
        }
        Msg::ChatInputChanged(text) => {
            state.set_chat_input(text);
            Vec::new()
        }
        Msg::ChatSubmitted => state.submit_chat(),
        Msg::ChatReplied { request_id, text } => {
            state.apply_chat_reply(request_id, &text);
            Vec::new()
        }
        Msg::ChatFailed { request_id, reason } => {
            state.apply_chat_failure(request_id, &reason);
            Vec::new()
        }
    };

    (state, effects)
}
