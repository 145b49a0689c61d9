pub mod assistant;
pub mod client;
pub mod transcript;

pub use assistant::{Assistant, AssistantContext, AssistantMessage, welcome_message};
pub use client::{GeminiClient, GeminiConfig, GenerativeModel, ModelError, Part};
pub use transcript::{
    ParsedTranscript, TranscriptError, TranscriptParser, UploadError, validate_upload,
};
