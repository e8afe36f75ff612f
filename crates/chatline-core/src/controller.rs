//! Chat controller: submission, remote exchange and settlement
//!
//! The controller owns the input field and the transcript. Submitting
//! appends the user's entry right away and spawns the remote exchange on the
//! tokio runtime; the reply comes back over a channel and is appended by the
//! event loop through [`ChatController::settle`]. Several exchanges can be in
//! flight at once and their replies are appended in whatever order they
//! settle.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::input::InputField;
use crate::remote::{ExchangeError, Responder};
use crate::state::ChatRole;
use crate::transcript::Transcript;

/// Shown as the assistant's entry whenever an exchange fails
pub const FALLBACK_MESSAGE: &str = "Sorry, there was an error processing your request.";

/// Text produced by a settled exchange, tagged with its submission number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub seq: u64,
    pub text: String,
}

pub struct ChatController {
    input: InputField,
    transcript: Transcript,
    responder: Arc<dyn Responder>,
    replies: mpsc::UnboundedSender<Reply>,
    next_seq: u64,
    in_flight: usize,
}

impl ChatController {
    /// Bind the controller to its input field, transcript and responder.
    ///
    /// Returns the receiving end of the reply channel; every reply that
    /// arrives on it should be handed back to [`ChatController::settle`].
    pub fn new(
        input: InputField,
        transcript: Transcript,
        responder: Arc<dyn Responder>,
    ) -> (Self, mpsc::UnboundedReceiver<Reply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            input,
            transcript,
            responder,
            replies: tx,
            next_seq: 0,
            in_flight: 0,
        };
        (controller, rx)
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    /// Number of exchanges that have not settled yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_awaiting(&self) -> bool {
        self.in_flight > 0
    }

    /// Submit the current input.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the trimmed text
    /// is appended as a user entry, the field is cleared and the remote
    /// exchange is spawned; the submission's sequence number is returned.
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> Option<u64> {
        let text = self.input.take_submission()?;
        self.append(text.clone(), ChatRole::User);

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight += 1;
        log::info!("submission #{} ({} chars)", seq, text.chars().count());

        let responder = Arc::clone(&self.responder);
        let replies = self.replies.clone();
        tokio::spawn(async move {
            let text = exchange_with_remote(responder.as_ref(), &text).await;
            // The receiver only goes away on shutdown
            let _ = replies.send(Reply { seq, text });
        });

        Some(seq)
    }

    pub fn append(&mut self, text: impl Into<String>, role: ChatRole) {
        self.transcript.append(text, role);
    }

    /// Append a settled reply as an assistant entry
    pub fn settle(&mut self, reply: Reply) {
        self.in_flight = self.in_flight.saturating_sub(1);
        log::debug!("submission #{} settled", reply.seq);
        self.append(reply.text, ChatRole::Assistant);
    }
}

/// Run one exchange and return the text to show, falling back on any error
pub async fn exchange_with_remote(responder: &dyn Responder, text: &str) -> String {
    reply_or_fallback(responder.respond(text).await)
}

/// Collapse every failure kind into [`FALLBACK_MESSAGE`], logging the cause
pub fn reply_or_fallback(result: Result<String, ExchangeError>) -> String {
    match result {
        Ok(reply) => reply,
        Err(e) => {
            log::error!("Error fetching AI response: {}", e);
            FALLBACK_MESSAGE.to_string()
        }
    }
}
