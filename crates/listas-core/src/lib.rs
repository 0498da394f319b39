pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod reference;
pub mod validate;

use config::PipelineConfig;
use error::ListasError;
use extraction::{DocumentRenderer, OcrPage, TextRecognizer, UPLOADED_SOURCE};
use model::Segment;
use parsing::{AnchorSegmenter, FieldExtractor, NameHintProvider, NoNameHints, Normalizer};
use reference::schema::ReferenceData;
use reference::sigla::SiglaResolver;
use std::path::Path;
use tracing::{debug, info};
use validate::ValidatedBatch;

/// One uploaded document with the caller's hints about its type.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl Document {
    pub fn new(bytes: Vec<u8>) -> Self {
        Document {
            bytes,
            filename: None,
            content_type: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a document from disk, named after its path.
    pub fn from_path(path: &Path) -> Result<Self, ListasError> {
        let bytes = std::fs::read(path)?;
        Ok(Document::new(bytes).with_filename(path.display().to_string()))
    }

    fn name(&self) -> &str {
        self.filename.as_deref().unwrap_or(UPLOADED_SOURCE)
    }
}

/// The extraction pipeline: render -> recognize -> layout -> segment ->
/// extract -> normalize -> validate.
///
/// Holds only immutable tables and collaborators. Per-document state (running
/// context, open segment) lives inside a single call.
pub struct Pipeline {
    renderer: Box<dyn DocumentRenderer>,
    recognizer: Box<dyn TextRecognizer>,
    segmenter: AnchorSegmenter,
    extractor: FieldExtractor,
    normalizer: Normalizer,
    min_name_words: usize,
}

impl Pipeline {
    pub fn new(
        reference: &ReferenceData,
        config: &PipelineConfig,
        renderer: Box<dyn DocumentRenderer>,
        recognizer: Box<dyn TextRecognizer>,
    ) -> Result<Self, ListasError> {
        config.validate()?;
        reference::validate_reference(reference)?;

        Ok(Pipeline {
            renderer,
            recognizer,
            segmenter: AnchorSegmenter::new(reference),
            extractor: FieldExtractor::new(Box::new(NoNameHints), config.min_name_words),
            normalizer: Normalizer::new(SiglaResolver::new(reference, config.fuzzy_cutoff)),
            min_name_words: config.min_name_words,
        })
    }

    /// Use a person-name recognizer to find candidate names in irregular rows.
    pub fn with_name_hints(mut self, hints: Box<dyn NameHintProvider>) -> Self {
        self.extractor = FieldExtractor::new(hints, self.min_name_words);
        self
    }

    pub fn sigla_resolver(&self) -> &SiglaResolver {
        self.normalizer.resolver()
    }

    /// Render and recognize a document into page text.
    pub fn recognize(&self, document: &Document) -> Result<Vec<OcrPage>, ListasError> {
        let pages = self.renderer.render(
            &document.bytes,
            document.filename.as_deref(),
            document.content_type.as_deref(),
        )?;
        debug!(
            document = document.name(),
            renderer = self.renderer.backend_name(),
            pages = pages.len(),
            "rendered"
        );

        pages
            .iter()
            .map(|page| self.recognizer.recognize(page))
            .collect()
    }

    /// Segments of a document, for inspecting how its layout was read.
    pub fn segments(&self, document: &Document) -> Result<Vec<Segment>, ListasError> {
        let pages = self.recognize(document)?;
        Ok(self.segmenter.segment(&parsing::analyze(&pages)))
    }

    /// Run the layout-to-record stages over recognized page text.
    pub fn extract_pages(
        &self,
        pages: &[OcrPage],
    ) -> Result<ValidatedBatch, error::ValidationError> {
        let layout = parsing::analyze(pages);
        let segments = self.segmenter.segment(&layout);
        let raw = self.extractor.extract(&segments);
        let rows = self.normalizer.normalize(&raw);
        debug!(
            segments = segments.len(),
            candidates = rows.len(),
            "normalized"
        );
        validate::validate(rows)
    }

    /// Extract the validated candidate rows of one document.
    pub fn extract_document(&self, document: &Document) -> Result<ValidatedBatch, ListasError> {
        let pages = self.recognize(document)?;
        let batch = self
            .extract_pages(&pages)
            .map_err(|source| ListasError::Validation {
                document: document.name().to_string(),
                source,
            })?;
        info!(
            document = document.name(),
            rows = batch.len(),
            "document extracted"
        );
        Ok(batch)
    }

    /// Extract every document; any failure fails the whole batch.
    pub fn extract_batch(&self, documents: &[Document]) -> Result<ValidatedBatch, ListasError> {
        if documents.is_empty() {
            return Err(ListasError::NoDocuments);
        }

        let mut batch = ValidatedBatch::default();
        for document in documents {
            batch.extend(self.extract_document(document)?);
        }
        Ok(batch)
    }

    /// [`Pipeline::extract_batch`] serialized to the CSV contract.
    pub fn extract_batch_csv(&self, documents: &[Document]) -> Result<String, ListasError> {
        let batch = self.extract_batch(documents)?;
        export::to_csv_string(&batch)
    }
}
