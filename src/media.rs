//! Media input types for the ingestion pipeline.

use crate::error::{Result, SentinelError};
use url::Url;

/// A single piece of media submitted for ingestion.
///
/// Exactly one variant is populated per request; `from_parts` enforces that
/// at the request boundary.
#[derive(Debug, Clone)]
pub enum MediaInput {
    /// Raw uploaded bytes with the original filename.
    File { name: String, bytes: Vec<u8> },
    /// A reference to remote media. The URL's content is never fetched.
    Url(Url),
}

impl MediaInput {
    /// Build a `MediaInput` from the loose file/url pair a request carries.
    ///
    /// Exactly one of the two must be present.
    pub fn from_parts(file: Option<(String, Vec<u8>)>, url: Option<String>) -> Result<Self> {
        match (file, url) {
            (None, None) => Err(SentinelError::InvalidInput(
                "no video provided".to_string(),
            )),
            (Some(_), Some(_)) => Err(SentinelError::InvalidInput(
                "provide either a file or a url, not both".to_string(),
            )),
            (Some((name, bytes)), None) => Ok(MediaInput::File { name, bytes }),
            (None, Some(raw)) => {
                let url = Url::parse(&raw).map_err(|e| {
                    SentinelError::InvalidInput(format!("invalid url '{}': {}", raw, e))
                })?;
                Ok(MediaInput::Url(url))
            }
        }
    }

    /// Size of the file payload in bytes (0 for URL references).
    pub fn size_bytes(&self) -> u64 {
        match self {
            MediaInput::File { bytes, .. } => bytes.len() as u64,
            MediaInput::Url(_) => 0,
        }
    }

    /// The source label recorded in index metadata: filename or URL.
    pub fn source(&self) -> String {
        match self {
            MediaInput::File { name, .. } => name.clone(),
            MediaInput::Url(url) => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_neither_present_rejected() {
        let err = MediaInput::from_parts(None, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("no video provided"));
    }

    #[test]
    fn test_both_present_rejected() {
        let err = MediaInput::from_parts(
            Some(("clip.mp4".to_string(), vec![0u8; 4])),
            Some("https://example.com/v".to_string()),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_malformed_url_rejected() {
        let err = MediaInput::from_parts(None, Some("not a url".to_string())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_file_variant() {
        let input =
            MediaInput::from_parts(Some(("clip.mp4".to_string(), vec![1, 2, 3])), None).unwrap();
        assert_eq!(input.size_bytes(), 3);
        assert_eq!(input.source(), "clip.mp4");
    }

    #[test]
    fn test_url_variant() {
        let input =
            MediaInput::from_parts(None, Some("https://example.com/talk.mp4".to_string()))
                .unwrap();
        assert_eq!(input.size_bytes(), 0);
        assert_eq!(input.source(), "https://example.com/talk.mp4");
    }
}
