//! Vidiwise core: pure ingestion/chat state machine and message formatting.
mod chat;
mod effect;
mod embed;
mod format;
mod ingestion;
mod msg;
mod state;
mod update;
mod view_model;

pub use chat::{ChatMessage, RequestId, Role, CHAT_ERROR_MESSAGE};
pub use effect::Effect;
pub use embed::{embed_id, embed_url};
pub use format::{format, Block, FormattedContent, Inline, Table};
pub use ingestion::{
    Generation, IngestionController, IngestionEvent, IngestionFailure, IngestionPhase, JobHandle,
    PollStatus, SubmitError, Transition, DEFAULT_POLL_INTERVAL,
};
pub use msg::Msg;
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, IngestionStatus, Screen};
