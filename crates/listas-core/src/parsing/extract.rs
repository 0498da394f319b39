use crate::config::DEFAULT_MIN_NAME_WORDS;
use crate::model::{RawCandidate, Row, Segment};
use crate::parsing::layout::FIELD_COUNT;
use tracing::debug;

const DTMNFR: usize = 0;
const ORGAO: usize = 1;
const TIPO: usize = 2;
const SIGLA: usize = 3;
const SIMBOLO: usize = 4;
const NOME_LISTA: usize = 5;
const NUM_ORDEM: usize = 6;
const NOME_CANDIDATO: usize = 7;
const PARTIDO_PROPONENTE: usize = 8;
const INDEPENDENTE: usize = 9;

/// Columns whose last seen value carries over to later rows.
const INHERITED: [usize; 7] = [
    DTMNFR,
    ORGAO,
    TIPO,
    SIGLA,
    SIMBOLO,
    NOME_LISTA,
    PARTIDO_PROPONENTE,
];

/// Ordinal assumed when a row has no digits at all.
const DEFAULT_ORDINAL: &str = "1";

type Fields = [String; FIELD_COUNT];

/// Source of person-name hints (an NER model, a lexicon, ...).
pub trait NameHintProvider: Send + Sync {
    /// Person names found in `text`, in order of appearance.
    fn find_person_entities(&self, text: &str) -> Vec<String>;
}

/// Hint provider that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNameHints;

impl NameHintProvider for NoNameHints {
    fn find_person_entities(&self, _text: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Last non-empty value seen for each inherited column.
///
/// Lives for exactly one `extract` call.
#[derive(Debug, Default)]
struct RunningContext {
    values: Fields,
}

impl RunningContext {
    fn get(&self, column: usize) -> &str {
        &self.values[column]
    }

    fn absorb(&mut self, fields: &Fields) {
        for column in INHERITED {
            if !fields[column].is_empty() {
                self.values[column] = fields[column].clone();
            }
        }
    }

    fn fill(&self, fields: &mut Fields, columns: &[usize]) {
        for &column in columns {
            if fields[column].is_empty() {
                fields[column] = self.get(column).to_string();
            }
        }
    }
}

/// Maps row tokens onto the ten candidate columns.
pub struct FieldExtractor {
    hints: Box<dyn NameHintProvider>,
    min_name_words: usize,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        FieldExtractor {
            hints: Box::new(NoNameHints),
            min_name_words: DEFAULT_MIN_NAME_WORDS,
        }
    }
}

impl FieldExtractor {
    pub fn new(hints: Box<dyn NameHintProvider>, min_name_words: usize) -> Self {
        FieldExtractor {
            hints,
            min_name_words,
        }
    }

    /// Extract candidates from segments, in document order.
    ///
    /// Full-width rows are read positionally. Shorter rows are reconstructed
    /// with name/ordinal guesses plus values inherited from earlier rows;
    /// those without a plausible candidate name are dropped.
    pub fn extract(&self, segments: &[Segment]) -> Vec<RawCandidate> {
        let mut context = RunningContext::default();
        let mut candidates = Vec::new();
        let mut dropped = 0usize;

        for segment in segments {
            for row in &segment.rows {
                let fields = if row.len() >= FIELD_COUNT {
                    positional(row)
                } else {
                    match self.infer_fields(row, &context) {
                        Some(fields) => fields,
                        None => {
                            dropped += 1;
                            debug!(
                                anchor = %segment.anchor,
                                row = ?row.values,
                                "no candidate name, row dropped"
                            );
                            continue;
                        }
                    }
                };

                context.absorb(&fields);
                candidates.push(into_candidate(fields, &segment.anchor));
            }
        }

        debug!(
            candidates = candidates.len(),
            dropped, "field extraction finished"
        );
        candidates
    }

    fn infer_fields(&self, row: &Row, context: &RunningContext) -> Option<Fields> {
        if row.is_empty() {
            return None;
        }

        let mut fields = Fields::default();
        for (slot, value) in fields.iter_mut().zip(&row.values) {
            slot.clone_from(value);
        }

        if fields[NOME_CANDIDATO].is_empty() {
            fields[NOME_CANDIDATO] = self
                .hinted_name(row)
                .unwrap_or_else(|| guess_name(&row.values, self.min_name_words));
        }

        if fields[NUM_ORDEM].is_empty() {
            fields[NUM_ORDEM] = guess_ordinal(&row.values);
        }

        context.fill(&mut fields, &INHERITED);

        if fields[NOME_CANDIDATO].is_empty() {
            return None;
        }
        Some(fields)
    }

    fn hinted_name(&self, row: &Row) -> Option<String> {
        self.hints
            .find_person_entities(&row.values.join(" "))
            .into_iter()
            .map(|name| name.trim().to_string())
            .find(|name| !name.is_empty())
    }
}

fn positional(row: &Row) -> Fields {
    let mut fields = Fields::default();
    for (slot, value) in fields.iter_mut().zip(&row.values) {
        slot.clone_from(value);
    }
    fields
}

/// Last token (scanning right to left) that reads like a full name: at least
/// `min_words` words and at least one letter.
fn guess_name(values: &[String], min_words: usize) -> String {
    values
        .iter()
        .rev()
        .find(|v| v.chars().any(char::is_alphabetic) && v.split_whitespace().count() >= min_words)
        .cloned()
        .unwrap_or_default()
}

/// All digits of the first token that has any ("n.º 12a3" -> "123"), or "1".
/// Only ASCII digits count, since the normalizer parses nothing else.
fn guess_ordinal(values: &[String]) -> String {
    values
        .iter()
        .map(|v| v.chars().filter(char::is_ascii_digit).collect::<String>())
        .find(|digits| !digits.is_empty())
        .unwrap_or_else(|| DEFAULT_ORDINAL.to_string())
}

fn into_candidate(fields: Fields, anchor: &str) -> RawCandidate {
    let [
        dtmnfr,
        orgao,
        tipo,
        sigla,
        simbolo,
        nome_lista,
        num_ordem,
        nome_candidato,
        partido_proponente,
        independente,
    ] = fields;
    RawCandidate {
        dtmnfr,
        orgao,
        tipo,
        sigla,
        simbolo,
        nome_lista,
        num_ordem,
        nome_candidato,
        partido_proponente,
        independente,
        anchor: anchor.to_string(),
    }
}
