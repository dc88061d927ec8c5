use chrono::NaiveDate;

use crate::capture::photo::{CapturedFile, PhotoCapture};
use crate::capture::voice::extract_fields;
use crate::db::repository::TransactionStore;
use crate::db::storage::Storage;
use crate::error::{CaptureError, ValidationError};
use crate::models::transaction::{Transaction, TransactionDraft};

/// Parses `date, description, amount, type, category` into a draft.
pub fn parse_draft(input: &str) -> Result<TransactionDraft, ValidationError> {
    let detail_parts: Vec<&str> = input.split(',').map(|s| s.trim()).collect();
    if detail_parts.len() != 5 {
        return Err(ValidationError::FieldCount {
            expected: 5,
            got: detail_parts.len(),
        });
    }

    Ok(TransactionDraft {
        date: detail_parts[0].to_string(),
        description: detail_parts[1].to_string(),
        amount: detail_parts[2].to_string(),
        transaction_type: detail_parts[3].to_string(),
        category: detail_parts[4].to_string(),
        image_url: None,
    })
}

pub fn add_transaction_from_input<S: Storage>(
    store: &mut TransactionStore<S>,
    input: &str,
) -> Result<Transaction, ValidationError> {
    let draft = parse_draft(input)?;
    store.add(&draft)
}

/// Starts a draft for `today` pre-filled from a spoken transcript.
pub fn draft_from_transcript(transcript: &str, today: NaiveDate) -> TransactionDraft {
    let mut draft = TransactionDraft::dated(today);
    draft.apply(extract_fields(transcript));
    draft
}

/// Attaches a receipt image to `draft` as a data URL.
pub fn attach_photo(draft: &mut TransactionDraft, file: &CapturedFile) -> Result<(), CaptureError> {
    let mut photo = PhotoCapture::new();
    photo.start();
    photo.handle_result(file)?;
    draft.image_url = photo.take_image_url();
    Ok(())
}
