use jangbu_core::error::JangbuError;
use jangbu_core::extraction::ledger_xlsx::read_ledger_workbook;
use std::path::PathBuf;

use super::read_input;
use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), JangbuError> {
    let input = read_input(&input_file)?;
    let documents = read_ledger_workbook(&input.bytes, &input.name)?;

    match output_format {
        "json" => output::json::print(&documents)?,
        _ => println!("{}", output::table::format_documents(&documents)),
    }

    if documents.is_empty() {
        eprintln!("  no rows classified as 매출 or 매입 in {}", input.name);
    }

    Ok(())
}
