use crate::error::ListasError;
use crate::extraction::{OcrPage, RenderedPage, TextRecognizer};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Tesseract language pack for Portuguese documents.
pub const DEFAULT_LANGUAGE: &str = "por";

/// Recognizer for payloads that are already text.
///
/// Decodes UTF-8, falling back to Latin-1 for legacy encodings.
pub struct PlainTextRecognizer;

impl TextRecognizer for PlainTextRecognizer {
    fn recognize(&self, page: &RenderedPage) -> Result<OcrPage, ListasError> {
        Ok(OcrPage {
            page_number: page.page_number,
            source: page.source.clone(),
            text: decode_text(&page.payload),
        })
    }

    fn backend_name(&self) -> &str {
        "text"
    }
}

/// Recognizer that runs image pages through the `tesseract` CLI.
///
/// Text payloads are decoded directly; tesseract only sees images.
pub struct TesseractRecognizer {
    language: String,
}

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self::with_language(DEFAULT_LANGUAGE)
    }

    pub fn with_language(language: &str) -> Self {
        TesseractRecognizer {
            language: language.to_string(),
        }
    }

    /// Check if tesseract is available on the system.
    pub fn is_available() -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn run_tesseract(&self, page: &RenderedPage) -> Result<String, ListasError> {
        let ocr_failed = |reason: String| ListasError::OcrFailed {
            source_id: page.source.clone(),
            reason,
        };

        let mut child = Command::new("tesseract")
            .arg("-")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ListasError::TesseractNotFound
                } else {
                    ocr_failed(e.to_string())
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&page.payload)
                .map_err(|e| ocr_failed(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ocr_failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ocr_failed(format!(
                "tesseract exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, page: &RenderedPage) -> Result<OcrPage, ListasError> {
        let text = if infer::is_image(&page.payload) {
            debug!(source = %page.source, page = page.page_number, "running tesseract");
            self.run_tesseract(page)?
        } else {
            decode_text(&page.payload)
        };

        Ok(OcrPage {
            page_number: page.page_number,
            source: page.source.clone(),
            text,
        })
    }

    fn backend_name(&self) -> &str {
        "tesseract"
    }
}

/// Decode a text payload: UTF-8 when valid, otherwise Latin-1.
pub fn decode_text(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => payload.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(payload: &[u8]) -> RenderedPage {
        RenderedPage {
            page_number: 2,
            payload: payload.to_vec(),
            source: "lista.pdf#page=2".into(),
        }
    }

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("Câmara".as_bytes()), "Câmara");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // "Câmara" in ISO-8859-1
        assert_eq!(decode_text(&[0x43, 0xE2, 0x6D, 0x61, 0x72, 0x61]), "Câmara");
    }

    #[test]
    fn test_plain_text_recognizer_keeps_page_identity() {
        let ocr = PlainTextRecognizer.recognize(&page(b"SUPLENTES")).unwrap();
        assert_eq!(ocr.page_number, 2);
        assert_eq!(ocr.source, "lista.pdf#page=2");
        assert_eq!(ocr.text, "SUPLENTES");
    }

    #[test]
    fn test_tesseract_recognizer_decodes_text_payloads() {
        // Text payloads never reach the tesseract binary.
        let ocr = TesseractRecognizer::new()
            .recognize(&page(b"Candidatos efetivos"))
            .unwrap();
        assert_eq!(ocr.text, "Candidatos efetivos");
    }
}
