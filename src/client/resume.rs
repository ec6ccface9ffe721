//! Resume document loading and client-side format validation.
//!
//! The interview service only accepts PDF resumes, and the check happens
//! here — before any network call is made.  A [`ResumeDocument`] can only be
//! constructed from bytes that carry a `.pdf` file name and start with the
//! `%PDF-` magic, so the upload path never needs to re-validate.

use std::path::Path;

use thiserror::Error;

/// Every well-formed PDF starts with this header.
const PDF_MAGIC: &[u8] = b"%PDF-";

// ---------------------------------------------------------------------------
// DocumentError
// ---------------------------------------------------------------------------

/// Rejections raised while loading a resume, before any upload is attempted.
#[derive(Debug, Clone, Error)]
pub enum DocumentError {
    /// The file is not a PDF (wrong extension or missing `%PDF-` header).
    #[error("Please upload only PDF files — {0} is not a PDF document.")]
    NotPdf(String),

    /// The file could not be read from disk.
    #[error("Could not read resume file: {0}")]
    Unreadable(String),
}

// ---------------------------------------------------------------------------
// ResumeDocument
// ---------------------------------------------------------------------------

/// A validated resume ready for upload.
///
/// # Example
/// ```rust
/// use interviewer::client::ResumeDocument;
///
/// let bytes = b"%PDF-1.7 minimal".to_vec();
/// let doc = ResumeDocument::from_bytes("resume.pdf", bytes).unwrap();
/// assert_eq!(doc.file_name(), "resume.pdf");
/// ```
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    file_name: String,
    bytes: Vec<u8>,
}

impl ResumeDocument {
    /// Read and validate a resume from `path`.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::Unreadable`] — the file does not exist or cannot
    ///   be read.
    /// - [`DocumentError::NotPdf`] — the file is not a PDF.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .ok_or_else(|| DocumentError::Unreadable(path.display().to_string()))?;

        let bytes = std::fs::read(path)
            .map_err(|e| DocumentError::Unreadable(format!("{}: {e}", path.display())))?;

        Self::from_bytes(file_name, bytes)
    }

    /// Validate in-memory bytes as a PDF resume.
    ///
    /// # Errors
    ///
    /// [`DocumentError::NotPdf`] — the name does not end in `.pdf` or the
    /// bytes do not start with the PDF magic header.
    pub fn from_bytes(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, DocumentError> {
        let file_name = file_name.into();

        let is_pdf_name = file_name
            .rsplit('.')
            .next()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
            && file_name.contains('.');

        if !is_pdf_name || !bytes.starts_with(PDF_MAGIC) {
            return Err(DocumentError::NotPdf(file_name));
        }

        Ok(Self { file_name, bytes })
    }

    /// Original file name, as shown in the transcript and sent to the server.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Raw document bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_bytes() -> Vec<u8> {
        b"%PDF-1.4\n1 0 obj\n".to_vec()
    }

    #[test]
    fn accepts_valid_pdf() {
        let doc = ResumeDocument::from_bytes("resume.pdf", pdf_bytes()).unwrap();
        assert_eq!(doc.file_name(), "resume.pdf");
        assert!(doc.bytes().starts_with(b"%PDF-"));
    }

    #[test]
    fn accepts_uppercase_extension() {
        assert!(ResumeDocument::from_bytes("RESUME.PDF", pdf_bytes()).is_ok());
    }

    #[test]
    fn rejects_wrong_extension() {
        let err = ResumeDocument::from_bytes("resume.docx", pdf_bytes()).unwrap_err();
        assert!(matches!(err, DocumentError::NotPdf(_)));
    }

    #[test]
    fn rejects_missing_extension() {
        let err = ResumeDocument::from_bytes("resume", pdf_bytes()).unwrap_err();
        assert!(matches!(err, DocumentError::NotPdf(_)));
    }

    #[test]
    fn rejects_pdf_name_with_non_pdf_bytes() {
        let err =
            ResumeDocument::from_bytes("resume.pdf", b"PK\x03\x04 zip".to_vec()).unwrap_err();
        assert!(matches!(err, DocumentError::NotPdf(_)));
    }

    #[test]
    fn rejects_empty_bytes() {
        let err = ResumeDocument::from_bytes("resume.pdf", Vec::new()).unwrap_err();
        assert!(matches!(err, DocumentError::NotPdf(_)));
    }

    #[test]
    fn from_path_missing_file_is_unreadable() {
        let err = ResumeDocument::from_path("/nonexistent/resume.pdf").unwrap_err();
        assert!(matches!(err, DocumentError::Unreadable(_)));
    }

    #[test]
    fn from_path_reads_and_validates() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("r.pdf");
        std::fs::write(&path, pdf_bytes()).expect("write");

        let doc = ResumeDocument::from_path(&path).unwrap();
        assert_eq!(doc.file_name(), "r.pdf");
    }

    #[test]
    fn not_pdf_error_mentions_file_name() {
        let err = ResumeDocument::from_bytes("notes.txt", b"hello".to_vec()).unwrap_err();
        assert!(err.to_string().contains("notes.txt"));
    }
}
