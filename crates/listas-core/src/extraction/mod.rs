pub mod ocr;
pub mod pdftotext;

use crate::error::ListasError;
use serde::{Deserialize, Serialize};

/// Source id used when the caller gives no filename.
pub const UPLOADED_SOURCE: &str = "<uploaded>";

/// One page of a document, ready for recognition.
///
/// The payload is either page text (UTF-8) or an encoded page image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub page_number: usize,
    pub payload: Vec<u8>,
    pub source: String,
}

/// Text recognized on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrPage {
    pub page_number: usize,
    pub source: String,
    pub text: String,
}

/// Trait for document rendering backends.
pub trait DocumentRenderer: Send + Sync {
    /// Split a document into ordered pages. Empty input yields no pages.
    fn render(
        &self,
        document: &[u8],
        filename: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Vec<RenderedPage>, ListasError>;

    /// Name of this rendering backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Trait for text recognition backends.
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text of a page. Pages that already carry text must be
    /// decoded as-is rather than rejected.
    fn recognize(&self, page: &RenderedPage) -> Result<OcrPage, ListasError>;

    /// Name of this recognition backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// True when the caller's hints or the payload itself say "PDF".
pub fn is_pdf(document: &[u8], filename: Option<&str>, content_type: Option<&str>) -> bool {
    if content_type.is_some_and(|ct| ct.to_lowercase().contains("pdf")) {
        return true;
    }
    if filename.is_some_and(|name| name.to_lowercase().ends_with(".pdf")) {
        return true;
    }
    document.starts_with(b"%PDF")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_by_content_type() {
        assert!(is_pdf(b"", None, Some("application/pdf")));
        assert!(!is_pdf(b"", None, Some("text/plain")));
    }

    #[test]
    fn test_is_pdf_by_filename() {
        assert!(is_pdf(b"", Some("LISTAS.PDF"), None));
        assert!(!is_pdf(b"", Some("listas.txt"), None));
    }

    #[test]
    fn test_is_pdf_by_magic() {
        assert!(is_pdf(b"%PDF-1.7\n", None, None));
        assert!(!is_pdf(b"2024;ASSEMBLEIA", None, None));
    }
}
