use crate::config::DEFAULT_FUZZY_CUTOFF;
use crate::reference::schema::{ReferenceData, SiglaEntry};
use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};
use tracing::warn;

/// Canonical code assigned to lists with no acronym at all.
pub const INDEPENDENT_SIGLA: &str = "INDEPENDENTE";

/// Confidence of an exact canonical-code match.
pub const EXACT_CONFIDENCE: f64 = 1.0;
/// Confidence of a fuzzy alias match.
pub const FUZZY_CONFIDENCE: f64 = 0.8;
/// Confidence of an unresolved acronym.
pub const UNRESOLVED_CONFIDENCE: f64 = 0.0;

/// Outcome of canonicalizing a raw acronym.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiglaResolution {
    pub canonical: String,
    /// The table spelling that matched (or the cleaned input when unresolved).
    pub matched: String,
    pub confidence: f64,
}

/// Maps noisy acronym spellings onto the canonical party codes.
///
/// Holds only the immutable table, so one resolver can serve any number of
/// concurrent extractions.
#[derive(Debug, Clone)]
pub struct SiglaResolver {
    entries: Vec<SiglaEntry>,
    cutoff: f64,
}

impl SiglaResolver {
    pub fn new(reference: &ReferenceData, cutoff: f64) -> Self {
        SiglaResolver {
            entries: reference.siglas.clone(),
            cutoff,
        }
    }

    pub fn from_entries(entries: Vec<SiglaEntry>) -> Self {
        SiglaResolver {
            entries,
            cutoff: DEFAULT_FUZZY_CUTOFF,
        }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Resolve a raw acronym.
    ///
    /// 1. exact canonical code (after trim + uppercase) -> confidence 1.0
    /// 2. first code, in table order, with a code/alias at least `cutoff`
    ///    similar to the lowercased input -> confidence 0.8
    /// 3. otherwise the uppercased input (or `INDEPENDENTE` when empty) -> 0.0
    pub fn resolve(&self, raw: &str) -> SiglaResolution {
        let upper = raw.trim().to_uppercase();

        if let Some(entry) = self.entries.iter().find(|e| e.code == upper) {
            return SiglaResolution {
                canonical: entry.code.clone(),
                matched: entry.code.clone(),
                confidence: EXACT_CONFIDENCE,
            };
        }

        if !upper.is_empty() {
            let needle = upper.to_lowercase();
            for entry in &self.entries {
                if let Some(matched) = self.best_match(&needle, entry) {
                    warn!(raw, canonical = %entry.code, matched = %matched, "fuzzy sigla match");
                    return SiglaResolution {
                        canonical: entry.code.clone(),
                        matched,
                        confidence: FUZZY_CONFIDENCE,
                    };
                }
            }
        }

        let canonical = if upper.is_empty() {
            INDEPENDENT_SIGLA.to_string()
        } else {
            warn!(raw, "unknown sigla kept as written");
            upper.clone()
        };
        SiglaResolution {
            canonical,
            matched: upper,
            confidence: UNRESOLVED_CONFIDENCE,
        }
    }

    /// Best-scoring spelling of `entry` at or above the cutoff. Equal scores
    /// go to the lexicographically greater spelling.
    fn best_match(&self, needle: &str, entry: &SiglaEntry) -> Option<String> {
        let code = entry.code.to_lowercase();
        std::iter::once(code.as_str())
            .chain(entry.aliases.iter().map(String::as_str))
            .map(|candidate| (candidate, similarity(needle, candidate)))
            .filter(|(_, score)| *score >= self.cutoff)
            .fold(None, |best: Option<(&str, f64)>, (candidate, score)| match best {
                Some((best_candidate, best_score))
                    if best_score > score || (best_score == score && best_candidate >= candidate) =>
                {
                    best
                }
                _ => Some((candidate, score)),
            })
            .map(|(candidate, _)| candidate.to_string())
    }
}

/// Character similarity ratio `2 * M / T`: M matched characters, T the
/// combined length of both strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    let matched = TextDiff::from_chars(a, b)
        .iter_all_changes()
        .filter(|change| change.tag() == ChangeTag::Equal)
        .count();
    (2 * matched) as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::builtin::load_default;

    fn resolver() -> SiglaResolver {
        SiglaResolver::new(&load_default().unwrap(), DEFAULT_FUZZY_CUTOFF)
    }

    #[test]
    fn test_exact_code() {
        let r = resolver().resolve("PSD");
        assert_eq!(r.canonical, "PSD");
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn test_exact_code_is_case_insensitive() {
        let r = resolver().resolve("  cds-pp ");
        assert_eq!(r.canonical, "CDS-PP");
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn test_noisy_spelling_fuzzy_matches() {
        let r = resolver().resolve("ps.");
        assert_eq!(r.canonical, "PS");
        assert_eq!(r.matched, "ps");
        assert_eq!(r.confidence, 0.8);
    }

    #[test]
    fn test_full_party_name_matches_alias() {
        let r = resolver().resolve("Partido Socialista");
        assert_eq!(r.canonical, "PS");
        assert_eq!(r.matched, "partido socialista");
        assert_eq!(r.confidence, 0.8);
    }

    #[test]
    fn test_alias_for_longer_code() {
        let r = resolver().resolve("CDS");
        assert_eq!(r.canonical, "CDS-PP");
        assert_eq!(r.confidence, 0.8);
    }

    #[test]
    fn test_empty_is_independent() {
        let r = resolver().resolve("");
        assert_eq!(r.canonical, "INDEPENDENTE");
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn test_unknown_passes_through_uppercased() {
        let r = resolver().resolve("mpt");
        assert_eq!(r.canonical, "MPT");
        assert_eq!(r.confidence, 0.0);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = resolver();
        for input in ["ps.", "PSD", "", "Bloco de Esquerda", "xyz"] {
            assert_eq!(resolver.resolve(input), resolver.resolve(input));
        }
    }

    #[test]
    fn test_canonical_output_is_a_fixed_point() {
        let resolver = resolver();
        for input in ["ps.", "CDS", "", "mpt"] {
            let first = resolver.resolve(input);
            let second = resolver.resolve(&first.canonical);
            assert_eq!(first.canonical, second.canonical);
        }
    }

    #[test]
    fn test_table_order_breaks_ties() {
        let resolver = SiglaResolver::from_entries(vec![
            SiglaEntry {
                code: "AAA".into(),
                aliases: vec!["abc".into()],
            },
            SiglaEntry {
                code: "BBB".into(),
                aliases: vec!["abc".into()],
            },
        ]);
        assert_eq!(resolver.resolve("abc").canonical, "AAA");
    }

    #[test]
    fn test_dotted_acronyms_resolve() {
        let resolver = resolver();

        let r = resolver.resolve("p.s.");
        assert_eq!((r.canonical.as_str(), r.matched.as_str()), ("PS", "ps"));
        assert_eq!(r.confidence, 0.8);

        let r = resolver.resolve("p.c.p.");
        assert_eq!((r.canonical.as_str(), r.matched.as_str()), ("PCP", "pcp"));
        assert_eq!(r.confidence, 0.8);
    }

    #[test]
    fn test_first_code_over_cutoff_wins() {
        // "psd." is closer to "psd", but PS is declared first and clears 0.6.
        let r = resolver().resolve("psd.");
        assert_eq!(r.canonical, "PS");
        assert_eq!(r.matched, "ps");
        assert_eq!(r.confidence, 0.8);
    }

    #[test]
    fn test_similarity_ratio() {
        assert_eq!(similarity("ps.", "ps"), 0.8);
        assert_eq!(similarity("psd", "psd"), 1.0);
        assert!((similarity("p.s.", "ps") - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(similarity("xyz", "ps"), 0.0);
    }

    #[test]
    fn test_equal_scores_prefer_greater_spelling() {
        let resolver = SiglaResolver::from_entries(vec![SiglaEntry {
            code: "XY".into(),
            aliases: vec!["ab".into(), "ac".into()],
        }]);
        // "a" scores 2/3 against both aliases.
        assert_eq!(resolver.resolve("a").matched, "ac");
    }

    #[test]
    fn test_cutoff_defaults() {
        assert_eq!(resolver().cutoff(), DEFAULT_FUZZY_CUTOFF);
        assert_eq!(SiglaResolver::from_entries(Vec::new()).cutoff(), 0.6);
    }

    #[test]
    fn test_higher_cutoff_rejects_noise() {
        let resolver = SiglaResolver::new(&load_default().unwrap(), 0.9);
        let r = resolver.resolve("ps.");
        assert_eq!(r.canonical, "PS.");
        assert_eq!(r.confidence, 0.0);
    }
}
