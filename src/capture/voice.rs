use regex::Regex;
use std::sync::OnceLock;

use crate::error::CaptureError;
use crate::models::transaction::{PartialDraft, TransactionType};

const EXPENSE_WORDS: &[&str] = &["expense", "spent", "paid", "bought"];
const INCOME_WORDS: &[&str] = &["income", "earned", "received", "sold"];

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$?(\d+(\.\d{1,2})?)").expect("invalid amount regex"))
}

/// What the voice adapter currently exposes to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceState {
    pub transcript: String,
    pub is_listening: bool,
    pub error: Option<CaptureError>,
}

/// Holds the state of a speech recognizer session.
///
/// The recognizer itself lives outside this crate and reports back through
/// [`VoiceCapture::receive_result`] and [`VoiceCapture::receive_error`].
#[derive(Debug, Clone)]
pub struct VoiceCapture {
    supported: bool,
    state: VoiceState,
}

impl VoiceCapture {
    pub fn new() -> Self {
        Self {
            supported: true,
            state: VoiceState::default(),
        }
    }

    /// A capture for an environment without speech recognition.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            state: VoiceState {
                error: Some(CaptureError::SpeechUnsupported),
                ..VoiceState::default()
            },
        }
    }

    pub fn state(&self) -> &VoiceState {
        &self.state
    }

    pub fn start(&mut self) -> Result<(), CaptureError> {
        if !self.supported {
            self.state.error = Some(CaptureError::SpeechUnsupported);
            return Err(CaptureError::SpeechUnsupported);
        }
        self.state.transcript.clear();
        self.state.error = None;
        self.state.is_listening = true;
        Ok(())
    }

    pub fn stop(&mut self) {
        self.state.is_listening = false;
    }

    /// Stores a recognition result. Results arriving after `stop` are
    /// dropped; returns whether the transcript was updated.
    pub fn receive_result(&mut self, transcript: &str) -> bool {
        if !self.state.is_listening {
            tracing::debug!("Discarding speech result received while not listening");
            return false;
        }
        self.state.transcript = transcript.to_string();
        true
    }

    pub fn receive_error(&mut self, message: &str) {
        self.state.error = Some(CaptureError::Recognition(message.to_string()));
        self.state.is_listening = false;
    }

    /// Fields guessed from the current transcript.
    pub fn extract(&self) -> PartialDraft {
        extract_fields(&self.state.transcript)
    }
}

impl Default for VoiceCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort guess of draft fields from spoken text. Never fails.
///
/// Expense keywords win over income keywords, the first dollar-like number is
/// the amount, and the whole transcript becomes the description. Blank text
/// yields an empty partial draft.
pub fn extract_fields(transcript: &str) -> PartialDraft {
    let text = transcript.trim();
    if text.is_empty() {
        return PartialDraft::default();
    }

    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let has_any = |keywords: &[&str]| words.iter().any(|w| keywords.contains(w));

    let transaction_type = if has_any(EXPENSE_WORDS) {
        Some(TransactionType::Expense)
    } else if has_any(INCOME_WORDS) {
        Some(TransactionType::Income)
    } else {
        None
    };

    let amount = amount_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    PartialDraft {
        transaction_type,
        amount,
        description: Some(text.to_string()),
        ..PartialDraft::default()
    }
}
