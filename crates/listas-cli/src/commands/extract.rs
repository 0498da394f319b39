use listas_core::error::ListasError;
use listas_core::export;
use std::path::PathBuf;

use crate::output;
use crate::PipelineArgs;

pub fn run(
    files: &[PathBuf],
    output_file: Option<PathBuf>,
    json: bool,
    args: &PipelineArgs,
) -> Result<(), ListasError> {
    let pipeline = super::build_pipeline(args)?;
    let documents = super::read_documents(files, args)?;
    let batch = pipeline.extract_batch(&documents)?;

    if json {
        return output::json::print(&batch);
    }

    match output_file {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            export::write_csv(&batch, file)?;
            eprintln!(
                "Extracted {} candidate(s) from {} document(s), written to {}",
                batch.len(),
                documents.len(),
                path.display()
            );
        }
        None => {
            export::write_csv(&batch, std::io::stdout().lock())?;
        }
    }

    Ok(())
}
