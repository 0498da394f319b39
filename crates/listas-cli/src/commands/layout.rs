use listas_core::error::ListasError;
use std::path::Path;

use crate::output;
use crate::PipelineArgs;

pub fn run(file: &Path, args: &PipelineArgs) -> Result<(), ListasError> {
    let pipeline = super::build_pipeline(args)?;
    let document = super::read_document(file, args)?;
    let segments = pipeline.segments(&document)?;
    output::json::print(&segments)
}
