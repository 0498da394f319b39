use crate::model::{LayoutPage, Row, Segment, UNKNOWN_ANCHOR};
use crate::parsing::layout::FIELD_COUNT;
use crate::reference::schema::{AnchorEntry, ReferenceData};

/// Splits document rows into sections at anchor marker rows
/// ("Candidatos suplentes", "Câmara Municipal", ...).
#[derive(Debug, Clone)]
pub struct AnchorSegmenter {
    anchors: Vec<AnchorEntry>,
}

impl AnchorSegmenter {
    pub fn new(reference: &ReferenceData) -> Self {
        AnchorSegmenter {
            anchors: reference.anchors.clone(),
        }
    }

    /// Partition the rows of all pages, in order, into segments.
    ///
    /// A marker row opens a new segment and is not kept as data. Rows before
    /// the first marker land in an `UNKNOWN` segment. Segments with the same
    /// label are never merged.
    pub fn segment(&self, pages: &[LayoutPage]) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();

        for page in pages {
            for row in &page.rows {
                if let Some(anchor) = self.match_anchor(row) {
                    segments.push(Segment {
                        anchor: anchor.to_string(),
                        rows: Vec::new(),
                        page_numbers: vec![page.page_number],
                    });
                    continue;
                }

                if segments.is_empty() {
                    segments.push(Segment {
                        anchor: UNKNOWN_ANCHOR.to_string(),
                        rows: Vec::new(),
                        page_numbers: vec![page.page_number],
                    });
                }
                let Some(current) = segments.last_mut() else {
                    continue;
                };
                current.rows.push(row.clone());
                if !current.page_numbers.contains(&page.page_number) {
                    current.page_numbers.push(page.page_number);
                }
            }
        }

        segments
    }

    /// Label of the first anchor (in table order) whose keyword occurs in the
    /// row. Full-width rows are candidate records even when a column value
    /// happens to read "EFETIVOS" or "ASSEMBLEIA".
    pub fn match_anchor(&self, row: &Row) -> Option<&str> {
        if row.len() >= FIELD_COUNT {
            return None;
        }
        let joined = row
            .values
            .iter()
            .map(|v| v.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        self.anchors
            .iter()
            .find(|a| a.keywords.iter().any(|kw| joined.contains(kw.as_str())))
            .map(|a| a.label.as_str())
    }
}
