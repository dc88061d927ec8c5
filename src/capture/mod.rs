//! Adapters that pre-fill a draft from a voice transcript or a receipt photo.
pub mod photo;
pub mod voice;
