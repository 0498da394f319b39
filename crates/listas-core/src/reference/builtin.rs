use crate::error::ListasError;
use crate::reference::schema::ReferenceData;
use crate::reference::validate_reference;

const CNE_REFERENCE_JSON: &str = include_str!("../../data/reference.json");

/// Load the reference data shipped with the crate.
pub fn load_default() -> Result<ReferenceData, ListasError> {
    let reference: ReferenceData = serde_json::from_str(CNE_REFERENCE_JSON)?;
    validate_reference(&reference)?;
    Ok(reference)
}

/// The embedded JSON exactly as shipped.
pub fn default_json() -> &'static str {
    CNE_REFERENCE_JSON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_reference_is_valid() {
        assert!(load_default().is_ok());
    }

    #[test]
    fn test_default_json_is_the_loaded_preset() {
        let parsed: ReferenceData = serde_json::from_str(default_json()).unwrap();
        assert_eq!(parsed.version, load_default().unwrap().version);
    }

    #[test]
    fn test_sigla_declaration_order() {
        let reference = load_default().unwrap();
        let codes: Vec<&str> = reference.siglas.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(
            codes,
            vec!["PS", "PSD", "CDS-PP", "PCP", "BE", "IL", "PAN", "LIVRE", "CHEGA"]
        );
    }

    #[test]
    fn test_anchor_declaration_order() {
        let reference = load_default().unwrap();
        let labels: Vec<&str> = reference.anchors.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["EFETIVOS", "SUPLENTES", "ASSEMBLEIA", "CAMARA", "FREGUESIA"]
        );
    }
}
