pub mod extract;
pub mod layout;
pub mod reference;
pub mod sigla;

use crate::{OcrBackend, PipelineArgs};
use listas_core::error::ListasError;
use listas_core::extraction::ocr::{PlainTextRecognizer, TesseractRecognizer};
use listas_core::extraction::pdftotext::PdftotextRenderer;
use listas_core::extraction::TextRecognizer;
use listas_core::reference::builtin;
use listas_core::reference::schema::ReferenceData;
use listas_core::{Document, Pipeline};
use std::path::{Path, PathBuf};

/// Custom reference file when given, the embedded tables otherwise.
pub fn load_reference(path: Option<&Path>) -> Result<ReferenceData, ListasError> {
    match path {
        Some(path) => listas_core::reference::load_reference(path),
        None => builtin::load_default(),
    }
}

pub fn build_pipeline(args: &PipelineArgs) -> Result<Pipeline, ListasError> {
    let reference = load_reference(args.reference.as_deref())?;
    let recognizer: Box<dyn TextRecognizer> = match args.ocr {
        OcrBackend::Text => Box::new(PlainTextRecognizer),
        OcrBackend::Tesseract => Box::new(TesseractRecognizer::new()),
    };
    tracing::debug!(
        reference = %reference.name,
        version = %reference.version,
        ocr = recognizer.backend_name(),
        "building pipeline"
    );
    if !PdftotextRenderer::is_available() {
        tracing::warn!("pdftotext not found, PDF inputs will fail");
    }
    if matches!(args.ocr, OcrBackend::Tesseract) && !TesseractRecognizer::is_available() {
        tracing::warn!("tesseract not found, scanned pages will fail");
    }

    Pipeline::new(
        &reference,
        &args.config(),
        Box::new(PdftotextRenderer::with_dpi(args.dpi)),
        recognizer,
    )
}

pub fn read_document(path: &Path, args: &PipelineArgs) -> Result<Document, ListasError> {
    let document = Document::from_path(path)?;
    Ok(match &args.content_type {
        Some(content_type) => document.with_content_type(content_type.clone()),
        None => document,
    })
}

pub fn read_documents(
    files: &[PathBuf],
    args: &PipelineArgs,
) -> Result<Vec<Document>, ListasError> {
    files.iter().map(|path| read_document(path, args)).collect()
}
