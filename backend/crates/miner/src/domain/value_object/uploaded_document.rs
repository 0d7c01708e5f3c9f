//! Uploaded Document
//!
//! A file received with a registration request. Lives only for the
//! duration of the request.

use bytes::Bytes;
use std::fmt;

use super::document_role::DocumentRole;

#[derive(Clone)]
pub struct UploadedDocument {
    pub role: DocumentRole,
    pub content: Bytes,
    /// Content type as declared by the client
    pub content_type: Option<String>,
    /// File name as declared by the client
    pub filename: String,
}

impl UploadedDocument {
    pub fn new(
        role: DocumentRole,
        content: impl Into<Bytes>,
        content_type: Option<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            content_type,
            filename: filename.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Lower-cased extension of the declared file name, if any
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.filename.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

impl fmt::Debug for UploadedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedDocument")
            .field("role", &self.role)
            .field("size", &self.size())
            .field("content_type", &self.content_type)
            .field("filename", &self.filename)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        let doc = |name: &str| UploadedDocument::new(DocumentRole::Rucon, vec![], None, name);
        assert_eq!(doc("rucon.PDF").extension().as_deref(), Some("pdf"));
        assert_eq!(doc("archive.tar.gz").extension().as_deref(), Some("gz"));
        assert_eq!(doc("noext").extension(), None);
        assert_eq!(doc(".hidden").extension(), None);
        assert_eq!(doc("trailing.").extension(), None);
    }

    #[test]
    fn test_debug_omits_content() {
        let doc = UploadedDocument::new(DocumentRole::IdFront, vec![7u8; 3], None, "a.png");
        let out = format!("{:?}", doc);
        assert!(out.contains("size: 3"));
        assert!(!out.contains("[7, 7, 7]"));
    }
}
