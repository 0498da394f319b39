use listas_core::config::PipelineConfig;
use listas_core::error::ListasError;
use listas_core::reference::sigla::{SiglaResolution, SiglaResolver};
use std::path::Path;

use crate::output;

pub fn run(
    values: &[String],
    reference: Option<&Path>,
    fuzzy_cutoff: f64,
    json: bool,
) -> Result<(), ListasError> {
    PipelineConfig {
        fuzzy_cutoff,
        ..PipelineConfig::default()
    }
    .validate()?;
    let reference = super::load_reference(reference)?;
    let resolver = SiglaResolver::new(&reference, fuzzy_cutoff);

    let resolutions: Vec<(String, SiglaResolution)> = values
        .iter()
        .map(|raw| (raw.clone(), resolver.resolve(raw)))
        .collect();

    if json {
        let rows: Vec<_> = resolutions
            .iter()
            .map(|(raw, r)| {
                serde_json::json!({
                    "input": raw,
                    "canonical": r.canonical,
                    "matched": r.matched,
                    "confidence": r.confidence,
                })
            })
            .collect();
        output::json::print(&rows)
    } else {
        output::table::print_resolutions(&resolutions, resolver.cutoff());
        Ok(())
    }
}
