//! Vidiwise engine: HTTP access to the processing service and effect execution.
mod engine;
mod service;
mod types;
mod wire;

pub use engine::EngineHandle;
pub use service::{ProcessingService, ReqwestService, ServiceSettings};
pub use types::{EngineEvent, FailureKind, JobId, JobStatus, RequestId, ServiceError};
