use base64::Engine as _;
use std::fs;
use std::path::Path;

use crate::error::CaptureError;

/// A file handed over by the camera or file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFile {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl CapturedFile {
    /// Reads `path`, guessing the content type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, CaptureError> {
        let bytes = fs::read(path).map_err(|e| CaptureError::ReadFailed(e.to_string()))?;
        Ok(Self {
            mime_type: mime_from_extension(path).to_string(),
            bytes,
        })
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoState {
    pub image_url: Option<String>,
    pub is_capturing: bool,
    pub error: Option<CaptureError>,
}

/// Turns a captured receipt image into a `data:` URL for a draft.
#[derive(Debug, Clone, Default)]
pub struct PhotoCapture {
    state: PhotoState,
}

impl PhotoCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PhotoState {
        &self.state
    }

    pub fn start(&mut self) {
        self.state.is_capturing = true;
    }

    /// Accepts an image file. Anything else records an error and keeps the
    /// previously captured image.
    pub fn handle_result(&mut self, file: &CapturedFile) -> Result<&str, CaptureError> {
        if !file.mime_type.starts_with("image/") {
            self.state.error = Some(CaptureError::NotAnImage);
            return Err(CaptureError::NotAnImage);
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
        self.state.is_capturing = false;
        self.state.error = None;
        let url = self
            .state
            .image_url
            .insert(format!("data:{};base64,{}", file.mime_type, encoded));
        Ok(url.as_str())
    }

    /// Drops any pending or captured image.
    pub fn dismiss(&mut self) {
        self.state = PhotoState::default();
    }

    /// Hands the captured image over to a draft, leaving the capture empty.
    pub fn take_image_url(&mut self) -> Option<String> {
        self.state.image_url.take()
    }
}
