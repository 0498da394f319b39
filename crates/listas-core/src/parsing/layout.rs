use crate::extraction::OcrPage;
use crate::model::{LayoutPage, Row};

/// Number of columns in the candidate schema. Lines that split into at least
/// this many tokens are taken as fully tabular.
pub const FIELD_COUNT: usize = 10;

/// Tokenize every recognized page into rows.
pub fn analyze(pages: &[OcrPage]) -> Vec<LayoutPage> {
    pages
        .iter()
        .map(|page| LayoutPage {
            page_number: page.page_number,
            source: page.source.clone(),
            rows: split_rows(&page.text),
        })
        .collect()
}

/// Split page text into rows of tokens, one row per non-blank line.
///
/// Delimiter preference per line:
/// 1. `;` anywhere in the line
/// 2. `,` when it occurs at least nine times (one per column boundary)
/// 3. column gaps of two or more spaces, when that yields a full row;
///    otherwise any whitespace
pub fn split_rows(text: &str) -> Vec<Row> {
    text.lines().filter_map(split_line).collect()
}

fn split_line(line: &str) -> Option<Row> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let clean = collapse_ws(trimmed);

    let values: Vec<String> = if clean.contains(';') {
        clean.split(';').map(|v| v.trim().to_string()).collect()
    } else if clean.matches(',').count() >= FIELD_COUNT - 1 {
        clean.split(',').map(|v| v.trim().to_string()).collect()
    } else {
        // Gaps are only visible before collapsing.
        let columns: Vec<String> = split_by_whitespace_gaps(trimmed)
            .into_iter()
            .map(collapse_ws)
            .collect();
        if columns.len() >= FIELD_COUNT {
            columns
        } else {
            clean.split_whitespace().map(str::to_string).collect()
        }
    };

    Some(Row { values })
}

/// Split a line by gaps of 2+ whitespace characters.
fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut gap_start = 0;
    let mut space_count = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if space_count == 0 {
                gap_start = i;
            }
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start.take() {
                    segments.push(&line[s..gap_start]);
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
        }
    }

    if let Some(s) = start {
        segments.push(line[s..].trim_end());
    }

    segments
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str) -> Vec<Vec<String>> {
        split_rows(text).into_iter().map(|r| r.values).collect()
    }

    #[test]
    fn test_semicolon_row_keeps_empty_columns() {
        let rows = values("2024;ASSEMBLEIA;EFETIVOS;PS;;Lista A;1;Maria Silva;PS;NAO");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 10);
        assert_eq!(rows[0][4], "");
        assert_eq!(rows[0][7], "Maria Silva");
    }

    #[test]
    fn test_semicolon_tokens_trimmed_and_collapsed() {
        let rows = values("  2024 ;  Maria    Silva  ; PS ");
        assert_eq!(rows[0], vec!["2024", "Maria Silva", "PS"]);
    }

    #[test]
    fn test_comma_row_needs_nine_commas() {
        let rows = values("2024,CAMARA,EFETIVOS,PSD,,Lista B,2,Rui Dias,PSD,SIM");
        assert_eq!(rows[0].len(), 10);
        assert_eq!(rows[0][1], "CAMARA");

        let rows = values("Silva, Maria, PS");
        assert_eq!(rows[0], vec!["Silva,", "Maria,", "PS"]);
    }

    #[test]
    fn test_wide_gap_columns_used_when_full() {
        let line = "2024  CAMARA  EFETIVOS  PS  -  Lista A  3  Ana  Maria Reis  PS  NAO";
        let rows = values(line);
        assert_eq!(rows[0].len(), 11);
        assert_eq!(rows[0][5], "Lista A");
    }

    #[test]
    fn test_short_gap_split_falls_back_to_words() {
        let rows = values("1   João Costa    PS");
        assert_eq!(rows[0], vec!["1", "João", "Costa", "PS"]);
    }

    #[test]
    fn test_blank_lines_dropped_order_kept() {
        let rows = values("Candidatos efetivos\n\n   \nJoão Costa\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Candidatos", "efetivos"]);
        assert_eq!(rows[1], vec!["João", "Costa"]);
    }

    #[test]
    fn test_split_by_whitespace_gaps_non_ascii_space() {
        let segments = split_by_whitespace_gaps("Câmara\u{a0}\u{a0}Municipal  de Lisboa");
        assert_eq!(segments, vec!["Câmara", "Municipal", "de Lisboa"]);
    }

    #[test]
    fn test_analyze_keeps_page_identity() {
        let pages = vec![OcrPage {
            page_number: 3,
            source: "x.pdf#page=3".into(),
            text: "SUPLENTES\nAna Reis".into(),
        }];
        let layout = analyze(&pages);
        assert_eq!(layout[0].page_number, 3);
        assert_eq!(layout[0].source, "x.pdf#page=3");
        assert_eq!(layout[0].rows.len(), 2);
    }
}
