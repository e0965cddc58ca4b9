//! Image capture helpers
//!
//! - CapturedImage: the encoded bytes handed to the controller
//! - MIME detection from magic bytes or a data URL
//! - StreamGuard: releases a camera stream exactly once

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::CaptureError;

/// One encoded image ready for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl CapturedImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self { bytes, mime_type: mime_type.into() }
    }

    /// Build from raw bytes, rejecting anything that is not a known image
    pub fn from_bytes(bytes: Vec<u8>, name: &str) -> Result<Self, CaptureError> {
        let mime = sniff_mime(&bytes).ok_or_else(|| CaptureError::NotAnImage(name.to_string()))?;
        Ok(Self::new(bytes, mime))
    }

    /// Build from a `data:image/...;base64,...` URL (FileReader, canvas)
    pub fn from_data_url(data_url: &str) -> Result<Self, CaptureError> {
        let mime = extract_mime_type_from_data_url(data_url)
            .ok_or_else(|| CaptureError::NotAnImage("missing data URL header".to_string()))?;
        if !is_image_mime(mime) {
            return Err(CaptureError::NotAnImage(mime.to_string()));
        }
        let payload = extract_base64_from_data_url(data_url)
            .ok_or_else(|| CaptureError::Read("missing data URL payload".to_string()))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| CaptureError::Read(e.to_string()))?;
        if bytes.is_empty() {
            return Err(CaptureError::Read("empty image".to_string()));
        }
        Ok(Self::new(bytes, mime))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Data URL for previews
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// `image/*`
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Detect the image type from its signature
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [_, _, _, _, b'f', b't', b'y', b'p', b'h', b'e', b'i', b'c', ..] => Some("image/heic"),
        [_, _, _, _, b'f', b't', b'y', b'p', b'm', b'i', b'f', b'1', ..] => Some("image/heif"),
        _ => None,
    }
}

/// Base64 part of a data URL
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." style URL
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url
        .strip_prefix("data:")?
        .split_once(',')
        .map(|(_, payload)| payload)
        .filter(|p| !p.is_empty())
}

/// MIME type of a data URL (e.g. "image/jpeg")
pub fn extract_mime_type_from_data_url(data_url: &str) -> Option<&str> {
    let header = data_url.strip_prefix("data:")?.split(',').next()?;
    let mime = header.split(';').next()?;
    if mime.is_empty() {
        None
    } else {
        Some(mime)
    }
}

/// A device handle that must be given back
pub trait MediaRelease {
    fn release(&mut self);
}

/// Holds a live camera stream until capture, cancel or teardown
///
/// The stream is released at most once; later calls and the final drop
/// are no-ops.
#[derive(Debug)]
pub struct StreamGuard<S: MediaRelease> {
    stream: Option<S>,
}

impl<S: MediaRelease> StreamGuard<S> {
    pub fn new(stream: S) -> Self {
        Self { stream: Some(stream) }
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Returns true if this call did the release
    pub fn release(&mut self) -> bool {
        match self.stream.take() {
            Some(mut stream) => {
                stream.release();
                true
            }
            None => false,
        }
    }
}

impl<S: MediaRelease> Drop for StreamGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeStream {
        releases: Rc<Cell<u32>>,
    }

    impl MediaRelease for FakeStream {
        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    #[test]
    fn test_stream_released_once() {
        let releases = Rc::new(Cell::new(0));
        let mut guard = StreamGuard::new(FakeStream { releases: releases.clone() });
        assert!(guard.is_active());
        assert!(guard.release());
        assert!(!guard.release());
        drop(guard);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_stream_released_on_drop() {
        let releases = Rc::new(Cell::new(0));
        {
            let _guard = StreamGuard::new(FakeStream { releases: releases.clone() });
        }
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(
            sniff_mime(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0]),
            Some("image/png")
        );
        assert_eq!(sniff_mime(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_mime(b"hello world"), None);
        assert_eq!(sniff_mime(&[]), None);
    }

    #[test]
    fn test_from_bytes_rejects_text() {
        let err = CapturedImage::from_bytes(b"plain text".to_vec(), "notes.txt").unwrap_err();
        assert_eq!(err, CaptureError::NotAnImage("notes.txt".to_string()));
    }

    #[test]
    fn test_extract_base64_from_data_url() {
        assert_eq!(
            extract_base64_from_data_url("data:image/jpeg;base64,/9j/4AAQSkZJRg=="),
            Some("/9j/4AAQSkZJRg==")
        );
        assert_eq!(extract_base64_from_data_url("not a data url"), None);
        assert_eq!(extract_base64_from_data_url(""), None);
    }

    #[test]
    fn test_extract_mime_type() {
        assert_eq!(extract_mime_type_from_data_url("data:image/png;base64,iVBORw0KGgo="), Some("image/png"));
        assert_eq!(extract_mime_type_from_data_url("data:image/webp;base64,UklGR"), Some("image/webp"));
        assert_eq!(extract_mime_type_from_data_url("invalid"), None);
    }

    #[test]
    fn test_from_data_url() {
        let image = CapturedImage::from_data_url("data:image/jpeg;base64,/9j/4A==").unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,/9j/4A==");
    }

    #[test]
    fn test_from_data_url_rejects_non_image() {
        let err = CapturedImage::from_data_url("data:application/pdf;base64,JVBERi0=").unwrap_err();
        assert_eq!(err, CaptureError::NotAnImage("application/pdf".to_string()));
    }

    #[test]
    fn test_from_data_url_bad_payload() {
        let err = CapturedImage::from_data_url("data:image/png;base64,@@@").unwrap_err();
        assert!(matches!(err, CaptureError::Read(_)));
    }
}
