use crate::error::ListasError;
use crate::extraction::{is_pdf, DocumentRenderer, RenderedPage, UPLOADED_SOURCE};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Resolution used when a page has no text layer and must be rasterized.
pub const RASTER_DPI: u32 = 200;

/// Rendering backend built on poppler-utils.
///
/// Uses `pdftotext -layout` so column gaps survive into the page text, and
/// `pdftoppm` to rasterize pages that have no text layer (scans).
/// Non-PDF payloads (images, plain text) pass through as a single page.
pub struct PdftotextRenderer {
    dpi: u32,
}

impl PdftotextRenderer {
    pub fn new() -> Self {
        PdftotextRenderer { dpi: RASTER_DPI }
    }

    pub fn with_dpi(dpi: u32) -> Self {
        PdftotextRenderer { dpi }
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn render_pdf(&self, document: &[u8], source: &str) -> Result<Vec<RenderedPage>, ListasError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ListasError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(document)
            .map_err(|e| ListasError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(&tmp_path)
            .arg("-")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ListasError::PdftotextNotFound
                } else {
                    ListasError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ListasError::PopplerFailed {
                tool: "pdftotext",
                code,
                stderr,
            });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let mut pages = Vec::new();
        for (i, page_text) in split_pages(&text).into_iter().enumerate() {
            let page_number = i + 1;
            let payload = if page_text.trim().is_empty() {
                debug!(page_number, source, "no text layer, rasterizing");
                self.rasterize_page(&tmp_path, page_number)?
            } else {
                page_text.as_bytes().to_vec()
            };
            pages.push(RenderedPage {
                page_number,
                payload,
                source: format!("{}#page={}", source, page_number),
            });
        }

        Ok(pages)
    }

    fn rasterize_page(&self, pdf_path: &Path, page_number: usize) -> Result<Vec<u8>, ListasError> {
        let out_dir = tempfile::tempdir().map_err(|e| ListasError::Extraction(e.to_string()))?;
        let prefix = out_dir.path().join("page");
        let page = page_number.to_string();

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg(&page)
            .arg("-l")
            .arg(&page)
            .arg("-singlefile")
            .arg(pdf_path)
            .arg(&prefix)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ListasError::PdftotextNotFound
                } else {
                    ListasError::Extraction(format!("pdftoppm failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ListasError::PopplerFailed {
                tool: "pdftoppm",
                code,
                stderr,
            });
        }

        let image = std::fs::read(prefix.with_extension("png"))?;
        if image.is_empty() {
            return Err(ListasError::Extraction(format!(
                "rasterization produced an empty image for page {}",
                page_number
            )));
        }
        Ok(image)
    }
}

impl Default for PdftotextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for PdftotextRenderer {
    fn render(
        &self,
        document: &[u8],
        filename: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Vec<RenderedPage>, ListasError> {
        if document.is_empty() {
            return Ok(Vec::new());
        }

        let source = filename.unwrap_or(UPLOADED_SOURCE);

        if is_pdf(document, filename, content_type) {
            let pages = self.render_pdf(document, source)?;
            if !pages.is_empty() {
                info!(source, pages = pages.len(), "rendered PDF");
                return Ok(pages);
            }
        }

        Ok(vec![RenderedPage {
            page_number: 1,
            payload: document.to_vec(),
            source: source.to_string(),
        }])
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages (form feed separates pages, and one
/// trails the last page).
fn split_pages(text: &str) -> Vec<&str> {
    let mut pages: Vec<&str> = text.split('\x0c').collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    if pages.len() == 1 && pages[0].is_empty() {
        pages.clear();
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_drops_trailing_form_feed() {
        let pages = split_pages("page one\n\x0cpage two\n\x0c");
        assert_eq!(pages, vec!["page one\n", "page two\n"]);
    }

    #[test]
    fn test_split_pages_keeps_blank_inner_page() {
        let pages = split_pages("one\x0c\x0cthree\x0c");
        assert_eq!(pages.len(), 3);
        assert!(pages[1].is_empty());
    }

    #[test]
    fn test_split_pages_empty_output() {
        assert!(split_pages("").is_empty());
    }

    #[test]
    fn test_raster_resolution() {
        assert_eq!(PdftotextRenderer::new().dpi, RASTER_DPI);
        assert_eq!(PdftotextRenderer::with_dpi(300).dpi, 300);
    }

    #[test]
    fn test_empty_document_yields_no_pages() {
        let pages = PdftotextRenderer::new().render(&[], None, None).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_plain_payload_is_single_page() {
        let pages = PdftotextRenderer::new()
            .render(b"2024;CAMARA", Some("lista.txt"), Some("text/plain"))
            .unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].source, "lista.txt");
        assert_eq!(pages[0].payload, b"2024;CAMARA");
    }

    #[test]
    fn test_unnamed_payload_source() {
        let pages = PdftotextRenderer::new().render(b"x", None, None).unwrap();
        assert_eq!(pages[0].source, "<uploaded>");
    }
}
