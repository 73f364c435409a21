use std::path::Path;

use ttf_parser::{name_id, Face};

use crate::error::JangbuError;

/// Hangul used in ledger titles and headers; a font missing any of these
/// would print boxes.
const COVERAGE_PROBE: &str = "매출입장합계거래처공급가액세일자상호기간페이지";

/// A TrueType font loaded once and embedded into every rendered ledger.
///
/// Loading validates the font up front, so rendering never has to fall
/// back to a font that cannot show Hangul. The handle is immutable and can
/// be shared across threads.
#[derive(Debug, Clone)]
pub struct LedgerFont {
    data: Vec<u8>,
    postscript_name: String,
}

impl LedgerFont {
    /// Read and validate a font file.
    pub fn load(path: &Path) -> Result<Self, JangbuError> {
        if !path.is_file() {
            return Err(JangbuError::FontMissing {
                path: path.to_path_buf(),
            });
        }
        let data = std::fs::read(path)?;
        let font = Self::from_bytes(data)?;
        tracing::debug!(path = %path.display(), name = font.name(), "loaded ledger font");
        Ok(font)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, JangbuError> {
        if ttf_parser::fonts_in_collection(&data).is_some() {
            return Err(JangbuError::FontUnsupported(
                "font collections (.ttc) cannot be embedded; extract a single .ttf".into(),
            ));
        }

        let face = Face::parse(&data, 0).map_err(|e| JangbuError::FontInvalid(e.to_string()))?;

        if face.tables().glyf.is_none() {
            return Err(JangbuError::FontUnsupported(
                "only TrueType (glyf) outlines are supported, not CFF/OpenType-CFF".into(),
            ));
        }

        let missing: String = COVERAGE_PROBE
            .chars()
            .filter(|c| face.glyph_index(*c).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(JangbuError::FontUnsupported(format!(
                "no glyphs for Hangul characters '{missing}'"
            )));
        }

        let postscript_name = face
            .names()
            .into_iter()
            .filter(|n| n.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|n| n.to_string())
            .map(|n| sanitize_name(&n))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "LedgerFont".to_string());

        Ok(LedgerFont {
            data,
            postscript_name,
        })
    }

    /// PostScript name used as the PDF BaseFont.
    pub fn name(&self) -> &str {
        &self.postscript_name
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn face(&self) -> Result<Face<'_>, JangbuError> {
        Face::parse(&self.data, 0).map_err(|e| JangbuError::FontInvalid(e.to_string()))
    }
}

/// PDF names may not contain whitespace or delimiters.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_graphic() && !"()<>[]{}/%#".contains(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_file() {
        let err = LedgerFont::load(Path::new("/nonexistent/NanumGothic.ttf")).unwrap_err();
        assert!(matches!(err, JangbuError::FontMissing { .. }));
        assert!(err.to_string().contains("JANGBU_FONT"));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = LedgerFont::from_bytes(b"definitely not a font".to_vec()).unwrap_err();
        assert!(matches!(err, JangbuError::FontInvalid(_)));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Nanum Gothic"), "NanumGothic");
        assert_eq!(sanitize_name("Font(Bold)/X"), "FontBoldX");
    }
}
