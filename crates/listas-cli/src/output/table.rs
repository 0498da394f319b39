use listas_core::reference::schema::ReferenceData;
use listas_core::reference::sigla::SiglaResolution;

pub fn print_resolutions(resolutions: &[(String, SiglaResolution)], cutoff: f64) {
    let width = resolutions
        .iter()
        .map(|(raw, _)| raw.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        "  {:<width$}  {:<14} {:<22} CONFIDENCE",
        "INPUT",
        "CANONICAL",
        "MATCHED",
        width = width
    );
    for (raw, r) in resolutions {
        println!(
            "  {:<width$}  {:<14} {:<22} {:.1}",
            raw,
            r.canonical,
            r.matched,
            r.confidence,
            width = width
        );
    }
    println!("\n  fuzzy cutoff: {cutoff}");
}

pub fn print_reference(reference: &ReferenceData) {
    println!("{} (version {})\n", reference.name, reference.version);
    if let Some(ref desc) = reference.description {
        println!("{}\n", desc);
    }

    println!("Siglas (matched in this order):\n");
    for entry in &reference.siglas {
        if entry.aliases.is_empty() {
            println!("  {}", entry.code);
        } else {
            println!("  {:<8} {}", entry.code, entry.aliases.join(", "));
        }
    }

    println!("\nAnchors (first matching keyword wins):\n");
    for anchor in &reference.anchors {
        println!("  {:<12} {}", anchor.label, anchor.keywords.join(", "));
    }
}
