use crate::error::ValidationError;
use crate::model::{CandidateRow, ListType, Orgao};
use crate::parsing::normalize::GCE_SYMBOL;
use serde::Serialize;
use std::collections::HashMap;

/// Rows that passed every business rule.
///
/// Only [`validate`] (or merging two validated batches) produces one, so
/// holding a `ValidatedBatch` is proof the rows may be published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedBatch {
    rows: Vec<CandidateRow>,
}

impl ValidatedBatch {
    pub fn rows(&self) -> &[CandidateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append the rows of another validated document.
    pub fn extend(&mut self, other: ValidatedBatch) {
        self.rows.extend(other.rows);
    }
}

/// Check the whole batch; the first violated rule rejects all of it.
///
/// Order: per-row domain checks over every row, then per-group ordinal
/// sequences, then per-row conditional rules.
pub fn validate(rows: Vec<CandidateRow>) -> Result<ValidatedBatch, ValidationError> {
    check_domains(&rows)?;
    check_sequences(&rows)?;
    check_conditionals(&rows)?;
    Ok(ValidatedBatch { rows })
}

fn check_domains(rows: &[CandidateRow]) -> Result<(), ValidationError> {
    for row in rows {
        if Orgao::parse(&row.orgao).is_none() {
            return Err(ValidationError::InvalidOrgao(row.orgao.clone()));
        }
        if ListType::parse(&row.tipo).is_none() {
            return Err(ValidationError::InvalidTipo(row.tipo.clone()));
        }
        if row.dtmnfr.is_empty() {
            return Err(ValidationError::MissingField("DTMNFR"));
        }
        if row.sigla.is_empty() {
            return Err(ValidationError::MissingField("SIGLA"));
        }
        if row.nome_candidato.is_empty() {
            return Err(ValidationError::MissingField("NOME_CANDIDATO"));
        }
    }
    Ok(())
}

/// Within each (DTMNFR, ORGAO, SIGLA, TIPO) group the ordinals must be
/// exactly 1..=n. Groups are checked in order of first appearance.
fn check_sequences(rows: &[CandidateRow]) -> Result<(), ValidationError> {
    let mut index: HashMap<(&str, &str, &str, &str), usize> = HashMap::new();
    let mut groups: Vec<((&str, &str, &str, &str), Vec<u32>)> = Vec::new();

    for row in rows {
        let key = (
            row.dtmnfr.as_str(),
            row.orgao.as_str(),
            row.sigla.as_str(),
            row.tipo.as_str(),
        );
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row.num_ordem);
    }

    for ((dtmnfr, orgao, sigla, tipo), mut numbers) in groups {
        numbers.sort_unstable();
        for (expected, actual) in (1u32..).zip(numbers) {
            if actual != expected {
                return Err(ValidationError::OrdinalSequence {
                    group: format!("{dtmnfr}/{orgao}/{sigla}/{tipo}"),
                    expected,
                    actual,
                });
            }
        }
    }
    Ok(())
}

fn check_conditionals(rows: &[CandidateRow]) -> Result<(), ValidationError> {
    for row in rows {
        let list_type = ListType::parse(&row.tipo);
        let is_gce = list_type == Some(ListType::Gce);

        if list_type.is_some_and(|t| t.requires_list_name()) && row.nome_lista.is_empty() {
            return Err(ValidationError::MissingListName {
                tipo: row.tipo.clone(),
                candidate: row.nome_candidato.clone(),
            });
        }
        if is_gce && !row.simbolo.is_empty() && row.simbolo.to_uppercase() != GCE_SYMBOL {
            return Err(ValidationError::InvalidGceSymbol {
                simbolo: row.simbolo.clone(),
                candidate: row.nome_candidato.clone(),
            });
        }
        if !is_gce && !row.simbolo.is_empty() {
            return Err(ValidationError::SymbolOutsideGce {
                tipo: row.tipo.clone(),
                candidate: row.nome_candidato.clone(),
            });
        }
        if is_gce && !row.independente.is_empty() {
            return Err(ValidationError::IndependentOnGce {
                candidate: row.nome_candidato.clone(),
            });
        }
    }
    Ok(())
}
