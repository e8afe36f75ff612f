pub mod config;
pub mod controller;
pub mod display;
pub mod input;
pub mod logging;
pub mod remote;
pub mod state;
pub mod transcript;

// Re-export main types for convenience
pub use config::Config;
pub use controller::{reply_or_fallback, ChatController, Reply, FALLBACK_MESSAGE};
pub use input::InputField;
pub use remote::{ExchangeError, Responder, ResponderClient};
pub use state::{ChatMessage, ChatRole};
pub use transcript::{LineKind, Transcript, TranscriptLine};
