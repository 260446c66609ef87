use crate::ChatMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestionStatus {
    #[default]
    Idle,
    Submitting,
    Processing,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub url_input: String,
    pub ingestion: IngestionStatus,
    /// True while a submission or status check is outstanding.
    pub processing: bool,
    pub video_id: Option<String>,
    pub embed_url: Option<String>,
    pub error: Option<String>,
    pub transcript: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_loading: bool,
    pub dirty: bool,
}
