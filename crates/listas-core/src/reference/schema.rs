use serde::{Deserialize, Serialize};

/// Master data the pipeline matches against: party acronyms and the
/// keywords that mark a new section of a candidate list.
///
/// Both tables are ordered; earlier entries win ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub siglas: Vec<SiglaEntry>,
    pub anchors: Vec<AnchorEntry>,
}

/// A canonical party/coalition code and the lowercase spellings it goes by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiglaEntry {
    pub code: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A section label and the lowercase phrases that announce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorEntry {
    pub label: String,
    pub keywords: Vec<String>,
}
