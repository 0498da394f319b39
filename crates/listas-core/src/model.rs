use serde::{Deserialize, Serialize};
use std::fmt;

/// Anchor label for rows seen before any section marker.
pub const UNKNOWN_ANCHOR: &str = "UNKNOWN";

/// Tokens recovered from one physical text line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<String>,
}

impl Row {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Row {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The rows of one recognized page, in line order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutPage {
    pub page_number: usize,
    pub source: String,
    pub rows: Vec<Row>,
}

/// Rows following one anchor marker, up to the next marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub anchor: String,
    pub rows: Vec<Row>,
    pub page_numbers: Vec<usize>,
}

/// A candidate as read off the page, before any cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub dtmnfr: String,
    pub orgao: String,
    pub tipo: String,
    pub sigla: String,
    pub simbolo: String,
    pub nome_lista: String,
    pub num_ordem: String,
    pub nome_candidato: String,
    pub partido_proponente: String,
    pub independente: String,
    pub anchor: String,
}

impl From<&CandidateRow> for RawCandidate {
    fn from(row: &CandidateRow) -> Self {
        RawCandidate {
            dtmnfr: row.dtmnfr.clone(),
            orgao: row.orgao.clone(),
            tipo: row.tipo.clone(),
            sigla: row.sigla.clone(),
            simbolo: row.simbolo.clone(),
            nome_lista: row.nome_lista.clone(),
            num_ordem: row.num_ordem.to_string(),
            nome_candidato: row.nome_candidato.clone(),
            partido_proponente: row.partido_proponente.clone(),
            independente: row.independente.clone(),
            anchor: UNKNOWN_ANCHOR.to_string(),
        }
    }
}

/// One record of the CSV contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CandidateRow {
    pub dtmnfr: String,
    pub orgao: String,
    pub tipo: String,
    pub sigla: String,
    pub simbolo: String,
    pub nome_lista: String,
    pub num_ordem: u32,
    pub nome_candidato: String,
    pub partido_proponente: String,
    pub independente: String,
}

impl CandidateRow {
    pub const HEADERS: [&'static str; 10] = [
        "DTMNFR",
        "ORGAO",
        "TIPO",
        "SIGLA",
        "SIMBOLO",
        "NOME_LISTA",
        "NUM_ORDEM",
        "NOME_CANDIDATO",
        "PARTIDO_PROPONENTE",
        "INDEPENDENTE",
    ];

    /// Fields in contract column order.
    pub fn to_record(&self) -> [String; 10] {
        [
            self.dtmnfr.clone(),
            self.orgao.clone(),
            self.tipo.clone(),
            self.sigla.clone(),
            self.simbolo.clone(),
            self.nome_lista.clone(),
            self.num_ordem.to_string(),
            self.nome_candidato.clone(),
            self.partido_proponente.clone(),
            self.independente.clone(),
        ]
    }
}

/// The electoral body a list runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Orgao {
    Assembleia,
    Camara,
    Freguesia,
}

impl Orgao {
    pub const ALL: [Orgao; 3] = [Orgao::Assembleia, Orgao::Camara, Orgao::Freguesia];

    pub fn as_str(&self) -> &'static str {
        match self {
            Orgao::Assembleia => "ASSEMBLEIA",
            Orgao::Camara => "CAMARA",
            Orgao::Freguesia => "FREGUESIA",
        }
    }

    /// Exact, case-insensitive match on the contract spelling.
    pub fn parse(s: &str) -> Option<Orgao> {
        let upper = s.trim().to_uppercase();
        Orgao::ALL.into_iter().find(|o| o.as_str() == upper)
    }
}

impl fmt::Display for Orgao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of a list a candidate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListType {
    #[serde(rename = "EFETIVOS")]
    Efetivos,
    #[serde(rename = "SUPLENTES")]
    Suplentes,
    #[serde(rename = "GCE")]
    Gce,
    #[serde(rename = "COLIGAÇÃO")]
    Coligacao,
}

impl ListType {
    pub const ALL: [ListType; 4] = [
        ListType::Efetivos,
        ListType::Suplentes,
        ListType::Gce,
        ListType::Coligacao,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::Efetivos => "EFETIVOS",
            ListType::Suplentes => "SUPLENTES",
            ListType::Gce => "GCE",
            ListType::Coligacao => "COLIGAÇÃO",
        }
    }

    pub fn parse(s: &str) -> Option<ListType> {
        let upper = s.trim().to_uppercase();
        ListType::ALL.into_iter().find(|t| t.as_str() == upper)
    }

    /// GCE and coalition lists must carry a list name.
    pub fn requires_list_name(&self) -> bool {
        matches!(self, ListType::Gce | ListType::Coligacao)
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
