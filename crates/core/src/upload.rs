//! Upload buckets, size caps, content-type whitelists, and object keys.
//!
//! Every rule here runs before the object store is touched; an oversized or
//! mistyped file never reaches storage.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum poster image size (10 MiB).
pub const MAX_POSTER_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum trailer video size (50 MiB).
pub const MAX_TRAILER_BYTES: u64 = 50 * 1024 * 1024;

/// Storage buckets exposed for filmmaker uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadBucket {
    Posters,
    Trailers,
}

impl UploadBucket {
    /// Parse from the URL path segment.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "posters" => Ok(Self::Posters),
            "trailers" => Ok(Self::Trailers),
            other => Err(CoreError::Validation(format!(
                "Unknown upload bucket '{other}'. Must be one of: posters, trailers"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Posters => "posters",
            Self::Trailers => "trailers",
        }
    }

    /// Size cap for this bucket.
    pub fn max_bytes(self) -> u64 {
        match self {
            Self::Posters => MAX_POSTER_BYTES,
            Self::Trailers => MAX_TRAILER_BYTES,
        }
    }

    /// Accepted MIME types for this bucket.
    pub fn allowed_content_types(self) -> &'static [&'static str] {
        match self {
            Self::Posters => &["image/jpeg", "image/png", "image/webp"],
            Self::Trailers => &["video/mp4", "video/webm", "video/quicktime"],
        }
    }

    /// Reject a file whose size exceeds this bucket's cap.
    pub fn validate_size(self, size_bytes: u64) -> Result<(), CoreError> {
        if size_bytes > self.max_bytes() {
            let limit_mb = self.max_bytes() / (1024 * 1024);
            return Err(CoreError::Validation(format!(
                "File too large. Maximum size for {} is {limit_mb}MB",
                self.name()
            )));
        }
        Ok(())
    }

    /// Reject a content type outside this bucket's whitelist.
    pub fn validate_content_type(self, content_type: &str) -> Result<(), CoreError> {
        if self.allowed_content_types().contains(&content_type) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Content type '{content_type}' is not accepted for {}. Allowed: {:?}",
                self.name(),
                self.allowed_content_types()
            )))
        }
    }
}

/// Build the object key for an upload: `{user_id}/{millis}.{ext}`.
///
/// The extension is taken from the client file name, lowercased; files with
/// no extension get `bin`. Keys are namespaced by owner so one user cannot
/// overwrite another's objects.
pub fn object_key(user_id: DbId, uploaded_at_millis: i64, file_name: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());
    format!("{user_id}/{uploaded_at_millis}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_round_trips() {
        assert_eq!(
            UploadBucket::from_name("posters").unwrap(),
            UploadBucket::Posters
        );
        assert_eq!(
            UploadBucket::from_name("trailers").unwrap(),
            UploadBucket::Trailers
        );
        assert!(UploadBucket::from_name("films").is_err());
    }

    #[test]
    fn poster_cap_is_ten_mebibytes() {
        let bucket = UploadBucket::Posters;
        assert!(bucket.validate_size(MAX_POSTER_BYTES).is_ok());
        assert!(bucket.validate_size(MAX_POSTER_BYTES + 1).is_err());
    }

    #[test]
    fn trailer_cap_is_fifty_mebibytes() {
        let bucket = UploadBucket::Trailers;
        assert!(bucket.validate_size(MAX_TRAILER_BYTES).is_ok());
        assert!(bucket.validate_size(MAX_TRAILER_BYTES + 1).is_err());
    }

    #[test]
    fn oversize_error_names_the_limit() {
        let err = UploadBucket::Posters
            .validate_size(MAX_POSTER_BYTES + 1)
            .unwrap_err();
        assert!(err.to_string().contains("10MB"));

        let err = UploadBucket::Trailers
            .validate_size(MAX_TRAILER_BYTES + 1)
            .unwrap_err();
        assert!(err.to_string().contains("50MB"));
    }

    #[test]
    fn content_type_whitelists() {
        assert!(UploadBucket::Posters
            .validate_content_type("image/png")
            .is_ok());
        assert!(UploadBucket::Posters
            .validate_content_type("video/mp4")
            .is_err());
        assert!(UploadBucket::Trailers
            .validate_content_type("video/mp4")
            .is_ok());
        assert!(UploadBucket::Trailers
            .validate_content_type("image/png")
            .is_err());
    }

    #[test]
    fn object_keys_are_owner_scoped() {
        assert_eq!(object_key(7, 1700000000000, "poster.PNG"), "7/1700000000000.png");
        assert_eq!(object_key(7, 1700000000000, "trailer.mp4"), "7/1700000000000.mp4");
    }

    #[test]
    fn object_key_falls_back_to_bin() {
        assert_eq!(object_key(3, 42, "noextension"), "3/42.bin");
        assert_eq!(object_key(3, 42, "trailing."), "3/42.bin");
        assert_eq!(object_key(3, 42, "weird.e%xt"), "3/42.bin");
    }
}
