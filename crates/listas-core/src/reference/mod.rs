pub mod builtin;
pub mod schema;
pub mod sigla;

use crate::error::ListasError;
use crate::model::UNKNOWN_ANCHOR;
use schema::ReferenceData;
use std::collections::HashSet;
use std::path::Path;

/// Load reference data from a JSON file.
pub fn load_reference(path: &Path) -> Result<ReferenceData, ListasError> {
    let content = std::fs::read_to_string(path).map_err(|e| ListasError::ReferenceLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_reference(&content, path)
}

/// Parse reference data from a JSON string.
pub fn parse_reference(json: &str, source: &Path) -> Result<ReferenceData, ListasError> {
    let reference: ReferenceData =
        serde_json::from_str(json).map_err(|e| ListasError::ReferenceLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_reference(&reference)?;
    Ok(reference)
}

/// Parse reference data from a JSON string (no file path context).
pub fn parse_reference_str(json: &str) -> Result<ReferenceData, ListasError> {
    let reference: ReferenceData = serde_json::from_str(json)?;
    validate_reference(&reference)?;
    Ok(reference)
}

/// Check that reference data is well-formed.
///
/// Keywords and aliases are matched against lowercased text, so they must be
/// lowercase themselves or they would never match.
pub fn validate_reference(reference: &ReferenceData) -> Result<(), ListasError> {
    if reference.siglas.is_empty() {
        return Err(ListasError::ReferenceInvalid(
            "siglas must not be empty".into(),
        ));
    }

    let mut codes = HashSet::new();
    for entry in &reference.siglas {
        let code = entry.code.trim();
        if code.is_empty() {
            return Err(ListasError::ReferenceInvalid(
                "sigla code must not be empty".into(),
            ));
        }
        if code != entry.code || code.to_uppercase() != code {
            return Err(ListasError::ReferenceInvalid(format!(
                "sigla code '{}' must be trimmed and uppercase",
                entry.code
            )));
        }
        if !codes.insert(code) {
            return Err(ListasError::ReferenceInvalid(format!(
                "duplicate sigla code '{}'",
                code
            )));
        }
        for alias in &entry.aliases {
            if alias.trim().is_empty() || alias.to_lowercase() != *alias {
                return Err(ListasError::ReferenceInvalid(format!(
                    "sigla '{}' has an empty or non-lowercase alias '{}'",
                    code, alias
                )));
            }
        }
    }

    if reference.anchors.is_empty() {
        return Err(ListasError::ReferenceInvalid(
            "anchors must not be empty".into(),
        ));
    }

    for anchor in &reference.anchors {
        if anchor.label.trim().is_empty() {
            return Err(ListasError::ReferenceInvalid(
                "anchor label must not be empty".into(),
            ));
        }
        if anchor.label == UNKNOWN_ANCHOR {
            return Err(ListasError::ReferenceInvalid(format!(
                "anchor label '{}' is reserved",
                UNKNOWN_ANCHOR
            )));
        }
        if anchor.keywords.is_empty() {
            return Err(ListasError::ReferenceInvalid(format!(
                "anchor '{}' has no keywords",
                anchor.label
            )));
        }
        for keyword in &anchor.keywords {
            if keyword.trim().is_empty() || keyword.to_lowercase() != *keyword {
                return Err(ListasError::ReferenceInvalid(format!(
                    "anchor '{}' has an empty or non-lowercase keyword '{}'",
                    anchor.label, keyword
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_reference() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "siglas": [ { "code": "PS", "aliases": ["partido socialista"] } ],
            "anchors": [ { "label": "SUPLENTES", "keywords": ["suplentes"] } ]
        }"#;
        let reference = parse_reference_str(json).unwrap();
        assert_eq!(reference.name, "Test");
        assert_eq!(reference.siglas.len(), 1);
        assert_eq!(reference.anchors[0].label, "SUPLENTES");
    }

    #[test]
    fn test_empty_siglas_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "siglas": [],
            "anchors": [ { "label": "SUPLENTES", "keywords": ["suplentes"] } ]
        }"#;
        assert!(parse_reference_str(json).is_err());
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "siglas": [ { "code": "PS" }, { "code": "PS" } ],
            "anchors": [ { "label": "SUPLENTES", "keywords": ["suplentes"] } ]
        }"#;
        assert!(parse_reference_str(json).is_err());
    }

    #[test]
    fn test_uppercase_keyword_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "siglas": [ { "code": "PS" } ],
            "anchors": [ { "label": "SUPLENTES", "keywords": ["Suplentes"] } ]
        }"#;
        assert!(parse_reference_str(json).is_err());
    }

    #[test]
    fn test_reserved_anchor_label_rejected() {
        let json = r#"{
            "name": "Bad",
            "version": "1.0",
            "siglas": [ { "code": "PS" } ],
            "anchors": [ { "label": "UNKNOWN", "keywords": ["x"] } ]
        }"#;
        assert!(parse_reference_str(json).is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_reference(Path::new("/nonexistent/reference.json")).unwrap_err();
        assert!(matches!(err, ListasError::ReferenceLoad { .. }));
    }
}
