use listas_core::error::ListasError;
use listas_core::reference::builtin;
use listas_core::reference::schema::ReferenceData;
use std::path::Path;

use crate::output;

pub fn show(json: bool) -> Result<(), ListasError> {
    if json {
        println!("{}", builtin::default_json().trim_end());
        return Ok(());
    }
    let reference = builtin::load_default()?;
    output::table::print_reference(&reference);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), ListasError> {
    let reference = listas_core::reference::load_reference(file)?;

    println!(
        "Reference data '{}' (v{}) is valid.",
        reference.name, reference.version
    );
    println!("  Siglas: {}", reference.siglas.len());
    println!("  Anchors: {}", reference.anchors.len());

    let warnings = shadowed_keywords(&reference);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

/// Keywords that can never decide an anchor because an earlier anchor has a
/// keyword contained in them.
fn shadowed_keywords(reference: &ReferenceData) -> Vec<String> {
    let mut warnings = Vec::new();
    for (i, anchor) in reference.anchors.iter().enumerate() {
        for keyword in &anchor.keywords {
            let earlier = reference.anchors[..i]
                .iter()
                .find(|a| a.keywords.iter().any(|k| keyword.contains(k.as_str())));
            if let Some(earlier) = earlier {
                warnings.push(format!(
                    "keyword '{}' of anchor '{}' is always matched by anchor '{}' first",
                    keyword, anchor.label, earlier.label
                ));
            }
        }
    }
    warnings
}
