pub mod layout;
pub mod ledger;
pub mod notice;
pub mod parse;

use jangbu_core::error::JangbuError;
use jangbu_core::InputFile;
use std::path::Path;

/// Read an input file, keeping only its file name for display and naming.
pub fn read_input(path: &Path) -> Result<InputFile, JangbuError> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(InputFile::new(name, bytes))
}
