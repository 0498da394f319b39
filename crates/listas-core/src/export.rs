use crate::error::ListasError;
use crate::model::CandidateRow;
use crate::validate::ValidatedBatch;
use std::io::Write;

/// Write a validated batch in the CSV contract format: `;`-delimited, `\n`
/// line endings, fixed header, rows sorted by
/// (DTMNFR, ORGAO, SIGLA, NOME_LISTA, TIPO, NUM_ORDEM).
pub fn write_csv<W: Write>(batch: &ValidatedBatch, out: W) -> Result<(), ListasError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(CandidateRow::HEADERS)?;
    for row in sorted_rows(batch) {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;
    Ok(())
}

/// [`write_csv`] into a string.
pub fn to_csv_string(batch: &ValidatedBatch) -> Result<String, ListasError> {
    let mut buf = Vec::new();
    write_csv(batch, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn sorted_rows(batch: &ValidatedBatch) -> Vec<&CandidateRow> {
    let mut rows: Vec<&CandidateRow> = batch.rows().iter().collect();
    rows.sort_by(|a, b| {
        (
            &a.dtmnfr,
            &a.orgao,
            &a.sigla,
            &a.nome_lista,
            &a.tipo,
            a.num_ordem,
        )
            .cmp(&(
                &b.dtmnfr,
                &b.orgao,
                &b.sigla,
                &b.nome_lista,
                &b.tipo,
                b.num_ordem,
            ))
    });
    rows
}
