//! Content-addressed asset storage seam.
//!
//! Upload takes an opaque binary payload plus optional metadata and yields a
//! receipt with a content id and a fetchable URL. Errors are messages; the
//! engine shows them and moves on.

/// Optional descriptive metadata attached to an upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetMetadata {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// Successful upload result.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadReceipt {
    /// Content-addressed identifier.
    pub content_id: String,
    /// Gateway URL resolving to the payload.
    pub url: String,
}

/// Storage boundary.
pub trait AssetStore {
    fn upload(&self, payload: &[u8], metadata: Option<&AssetMetadata>) -> Result<UploadReceipt, String>;
}

/// In-memory stand-in producing deterministic receipts from a payload hash.
#[derive(Debug, Default)]
pub struct MockAssetStore;

impl AssetStore for MockAssetStore {
    fn upload(&self, payload: &[u8], metadata: Option<&AssetMetadata>) -> Result<UploadReceipt, String> {
        if payload.is_empty() {
            return Err("payload must not be empty".to_string());
        }
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        payload.hash(&mut hasher);
        let content_id = format!("mem{:016x}", hasher.finish());
        let name = metadata.map(|m| m.name.as_str()).unwrap_or("file");
        Ok(UploadReceipt {
            url: format!("mem://{}/{}", content_id, name),
            content_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_is_deterministic_per_payload() {
        let store = MockAssetStore;
        let a = store.upload(b"hello", None).unwrap();
        let b = store.upload(b"hello", None).unwrap();
        let c = store.upload(b"other", None).unwrap();
        assert_eq!(a.content_id, b.content_id);
        assert_ne!(a.content_id, c.content_id);
    }

    #[test]
    fn test_metadata_name_lands_in_url() {
        let store = MockAssetStore;
        let meta = AssetMetadata {
            name: "clip.mp4".to_string(),
            ..Default::default()
        };
        let receipt = store.upload(b"payload", Some(&meta)).unwrap();
        assert!(receipt.url.ends_with("/clip.mp4"));
    }

    #[test]
    fn test_empty_payload_rejected() {
        let store = MockAssetStore;
        assert!(store.upload(b"", None).is_err());
    }
}
