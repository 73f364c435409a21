use jangbu_core::config::{load_layout, LayoutConfig};
use jangbu_core::error::JangbuError;
use jangbu_core::render::font::LedgerFont;
use jangbu_core::{render_ledger_batch, FileFailure};
use std::path::{Path, PathBuf};
use tracing::info;

use super::read_input;
use crate::output;

pub fn run(
    files: Vec<PathBuf>,
    font: Option<PathBuf>,
    out_dir: &Path,
    layout_file: Option<PathBuf>,
) -> Result<(), JangbuError> {
    if files.is_empty() {
        println!("No ledger files given. Example: jangbu ledger 한빛상사_2024.xlsx --font NanumGothic.ttf");
        return Ok(());
    }

    let layout = match layout_file {
        Some(path) => load_layout(&path)?,
        None => LayoutConfig::default(),
    };

    // Loaded once for the whole batch; a bad font stops before any file is read.
    let font_path = font.ok_or(JangbuError::FontNotConfigured)?;
    let font = LedgerFont::load(&font_path)?;

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

    let batch = render_ledger_batch(&inputs, &font, &layout);
    failures.extend(batch.failures);

    if !batch.outputs.is_empty() {
        std::fs::create_dir_all(out_dir)?;
    }
    for ledger in &batch.outputs {
        let target = out_dir.join(&ledger.file_name);
        std::fs::write(&target, &ledger.bytes)?;
        info!(
            source = %ledger.source,
            records = ledger.records,
            "wrote {}",
            target.display()
        );
    }

    output::table::print_written(&batch.outputs, out_dir);
    output::table::print_failures(&failures);

    if batch.outputs.is_empty() && !failures.is_empty() {
        return Err(JangbuError::BatchFailed {
            failed: failures.len(),
        });
    }
    Ok(())
}
