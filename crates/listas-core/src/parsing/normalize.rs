use crate::model::{CandidateRow, ListType, Orgao, RawCandidate};
use crate::reference::sigla::SiglaResolver;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Symbol (and default list name) carried by GCE lists.
pub const GCE_SYMBOL: &str = "GCE";

const AFFIRMATIVE: [&str; 4] = ["sim", "s", "yes", "true"];
const NEGATIVE: [&str; 5] = ["não", "nao", "n", "no", "false"];

/// Turns raw candidates into contract rows.
///
/// Stateless apart from the sigla table; safe to share across extractions.
#[derive(Debug, Clone)]
pub struct Normalizer {
    resolver: SiglaResolver,
}

impl Normalizer {
    pub fn new(resolver: SiglaResolver) -> Self {
        Normalizer { resolver }
    }

    pub fn resolver(&self) -> &SiglaResolver {
        &self.resolver
    }

    pub fn normalize(&self, candidates: &[RawCandidate]) -> Vec<CandidateRow> {
        candidates
            .iter()
            .map(|c| self.normalize_candidate(c))
            .collect()
    }

    pub fn normalize_candidate(&self, candidate: &RawCandidate) -> CandidateRow {
        let tipo = normalize_tipo(&candidate.tipo, &candidate.anchor);
        let sigla = self.resolver.resolve(&clean(&candidate.sigla)).canonical;
        let mut simbolo = clean(&candidate.simbolo);
        let mut nome_lista = clean(&candidate.nome_lista);
        let mut independente = normalize_independente(&candidate.independente);

        let list_type = ListType::parse(&tipo);
        if list_type == Some(ListType::Gce) {
            if simbolo.is_empty() {
                simbolo = GCE_SYMBOL.to_string();
            }
            independente.clear();
            if nome_lista.is_empty() {
                nome_lista = GCE_SYMBOL.to_string();
            }
        } else {
            simbolo.clear();
        }

        if list_type.is_some_and(|t| t.requires_list_name()) && nome_lista.is_empty() {
            nome_lista = sigla.clone();
        }

        CandidateRow {
            dtmnfr: clean(&candidate.dtmnfr),
            orgao: normalize_orgao(&candidate.orgao, &candidate.anchor),
            tipo,
            sigla,
            simbolo,
            nome_lista,
            num_ordem: to_ordinal(&candidate.num_ordem),
            nome_candidato: title_case(&clean(&candidate.nome_candidato)),
            partido_proponente: clean(&candidate.partido_proponente),
            independente,
        }
    }
}

/// Trim, NFKC-normalize and collapse internal whitespace.
pub fn clean(value: &str) -> String {
    let composed: String = value.nfkc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercase with diacritics removed ("Câmara" -> "CAMARA").
fn fold(value: &str) -> String {
    value
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Title-case word by word: a letter is uppercased when it follows a
/// non-letter, lowercased otherwise ("d'almeida" -> "D'Almeida").
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_letter = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// Canonical ORGAO. Unrecognized non-empty values are kept so validation
/// reports them instead of silently relabelling the row.
fn normalize_orgao(value: &str, anchor: &str) -> String {
    let cleaned = clean(value).to_uppercase();
    if let Some(orgao) = Orgao::parse(&cleaned) {
        return orgao.as_str().to_string();
    }

    let folded = fold(&cleaned);
    let folded_anchor = fold(anchor);
    if let Some(orgao) = Orgao::ALL
        .into_iter()
        .find(|o| folded.contains(o.as_str()) || folded_anchor.contains(o.as_str()))
    {
        return orgao.as_str().to_string();
    }

    if cleaned.is_empty() {
        Orgao::Assembleia.as_str().to_string()
    } else {
        cleaned
    }
}

/// Canonical TIPO, falling back to the section the row was found in.
fn normalize_tipo(value: &str, anchor: &str) -> String {
    let cleaned = clean(value).to_uppercase();
    if let Some(tipo) = ListType::parse(&cleaned) {
        return tipo.as_str().to_string();
    }

    let folded = fold(&cleaned);
    if let Some(tipo) = ListType::ALL
        .into_iter()
        .find(|t| !folded.is_empty() && fold(t.as_str()) == folded)
    {
        return tipo.as_str().to_string();
    }

    let anchor = anchor.to_uppercase();
    if anchor.contains("SUPLENTE") {
        return ListType::Suplentes.as_str().to_string();
    }
    if anchor.contains("EFET") {
        return ListType::Efetivos.as_str().to_string();
    }

    if cleaned.is_empty() {
        ListType::Efetivos.as_str().to_string()
    } else {
        cleaned
    }
}

fn normalize_independente(value: &str) -> String {
    let cleaned = clean(value);
    let lower = cleaned.to_lowercase();
    if AFFIRMATIVE.contains(&lower.as_str()) {
        "SIM".to_string()
    } else if NEGATIVE.contains(&lower.as_str()) {
        "NAO".to_string()
    } else {
        cleaned.to_uppercase()
    }
}

/// Digits of the value as a number; 0 when there are none.
fn to_ordinal(value: &str) -> u32 {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    // Absurdly long digit runs saturate; validation rejects them anyway.
    digits.parse().unwrap_or(u32::MAX)
}
