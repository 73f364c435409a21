use jangbu_core::error::JangbuError;
use jangbu_core::extraction::pdftotext::PdftotextExtractor;
use jangbu_core::extraction::plain::TextFallbackExtractor;
use jangbu_core::notice::template::render_message;
use jangbu_core::{summarize_notices, FileFailure};
use std::path::PathBuf;

use super::read_input;
use crate::output;

pub fn run(files: Vec<PathBuf>, output_format: &str) -> Result<(), JangbuError> {
    if files.is_empty() {
        println!("No notice files given. Example: jangbu notice 한빛상사_매출.pdf 한빛상사_접수증.pdf");
        return Ok(());
    }

    let mut failures = Vec::new();
    let mut inputs = Vec::with_capacity(files.len());
    for path in &files {
        match read_input(path) {
            Ok(input) => inputs.push(input),
            Err(e) => failures.push(FileFailure {
                file_name: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    let extractor = TextFallbackExtractor::new(PdftotextExtractor::new());
    let mut batch = summarize_notices(&inputs, &extractor);
    failures.append(&mut batch.failures);
    batch.failures = failures;

    match output_format {
        "json" => output::json::print(&batch)?,
        _ => {
            print!("{}", render_message(&batch.summary));
            output::table::print_failures(&batch.failures);
        }
    }

    Ok(())
}
