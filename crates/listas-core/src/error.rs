use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ListasError {
    #[error("document rendering failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("{tool} failed with exit code {code}: {stderr}")]
    PopplerFailed {
        tool: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("tesseract not found. Install it with: brew install tesseract tesseract-lang (macOS) or apt install tesseract-ocr tesseract-ocr-por (Linux)")]
    TesseractNotFound,

    #[error("OCR failed for {source_id}: {reason}")]
    OcrFailed { source_id: String, reason: String },

    #[error("failed to load reference data from {path}: {reason}")]
    ReferenceLoad { path: PathBuf, reason: String },

    #[error("invalid reference data: {0}")]
    ReferenceInvalid(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("at least one document must be provided")]
    NoDocuments,

    #[error("{document}: {source}")]
    Validation {
        document: String,
        #[source]
        source: ValidationError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    CsvEncoding(#[from] std::string::FromUtf8Error),
}

impl ListasError {
    /// True when the input was readable but the extracted records break a
    /// business rule (HTTP 422 territory). Everything else is either a client
    /// usage error or an environment failure.
    pub fn is_unprocessable(&self) -> bool {
        matches!(self, ListasError::Validation { .. })
    }
}

/// A hard business rule violated by a normalized batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid ORGAO: '{0}'")]
    InvalidOrgao(String),

    #[error("invalid TIPO: '{0}'")]
    InvalidTipo(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid NUM_ORDEM for {group}: expected {expected}, got {actual}")]
    OrdinalSequence {
        group: String,
        expected: u32,
        actual: u32,
    },

    #[error("NOME_LISTA is required for {tipo} lists (candidate '{candidate}')")]
    MissingListName { tipo: String, candidate: String },

    #[error("invalid SIMBOLO '{simbolo}' for GCE list (candidate '{candidate}')")]
    InvalidGceSymbol { simbolo: String, candidate: String },

    #[error("SIMBOLO is only allowed on GCE lists (candidate '{candidate}', TIPO {tipo})")]
    SymbolOutsideGce { tipo: String, candidate: String },

    #[error("INDEPENDENTE must be empty for GCE lists (candidate '{candidate}')")]
    IndependentOnGce { candidate: String },
}
