use std::collections::BTreeMap;

use lopdf::content::Operation;
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use ttf_parser::{Face, GlyphId};

use crate::error::JangbuError;
use crate::render::font::LedgerFont;

/// Resource name of the embedded font in every page.
pub const FONT_RESOURCE: &str = "F1";

#[derive(Debug, Clone, Copy)]
struct GlyphUse {
    unicode: char,
    advance: u16,
}

/// Maps text to glyph ids (Identity-H encoding) and remembers every glyph
/// used, so widths and the ToUnicode map can be written once per document.
pub struct GlyphEncoder<'f> {
    font: &'f LedgerFont,
    face: Face<'f>,
    units_per_em: f32,
    used: BTreeMap<u16, GlyphUse>,
}

impl<'f> GlyphEncoder<'f> {
    pub fn new(font: &'f LedgerFont) -> Result<Self, JangbuError> {
        let face = font.face()?;
        let units_per_em = f32::from(face.units_per_em().max(1));
        Ok(GlyphEncoder {
            font,
            face,
            units_per_em,
            used: BTreeMap::new(),
        })
    }

    fn glyph(&self, c: char) -> (u16, u16) {
        let gid = self.face.glyph_index(c).unwrap_or(GlyphId(0));
        let advance = self.face.glyph_hor_advance(gid).unwrap_or(0);
        (gid.0, advance)
    }

    /// Two big-endian bytes per glyph id.
    pub fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(text.len() * 2);
        for c in text.chars() {
            let (gid, advance) = self.glyph(c);
            self.used.entry(gid).or_insert(GlyphUse { unicode: c, advance });
            out.extend_from_slice(&gid.to_be_bytes());
        }
        out
    }

    /// Rendered width of `text` at `size` points.
    pub fn width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph(c).1)).sum();
        units as f32 * size / self.units_per_em
    }

    fn scale(&self, units: i32) -> i64 {
        (units as f32 * 1000.0 / self.units_per_em).round() as i64
    }

    /// Write the Type0 font and its descendants into `doc` under `font_id`.
    pub fn write_font(&self, doc: &mut Document, font_id: ObjectId) -> Result<(), JangbuError> {
        let base_font = Object::Name(self.font.name().as_bytes().to_vec());
        let data = self.font.data().to_vec();

        let file_id = doc.add_object(Stream::new(
            dictionary! { "Length1" => data.len() as i64 },
            data,
        ));

        let bbox = self.face.global_bounding_box();
        let ascent = self.face.ascender();
        let descent = self.face.descender();
        let cap_height = self.face.capital_height().unwrap_or(ascent);
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => base_font.clone(),
            "Flags" => 4,
            "FontBBox" => vec![
                Object::Integer(self.scale(bbox.x_min.into())),
                Object::Integer(self.scale(bbox.y_min.into())),
                Object::Integer(self.scale(bbox.x_max.into())),
                Object::Integer(self.scale(bbox.y_max.into())),
            ],
            "ItalicAngle" => 0,
            "Ascent" => self.scale(ascent.into()),
            "Descent" => self.scale(descent.into()),
            "CapHeight" => self.scale(cap_height.into()),
            "StemV" => 80,
            "FontFile2" => file_id,
        });

        let mut widths: Vec<Object> = Vec::with_capacity(self.used.len() * 2);
        for (gid, glyph) in &self.used {
            widths.push(Object::Integer(i64::from(*gid)));
            widths.push(Object::Array(vec![Object::Integer(
                self.scale(glyph.advance.into()),
            )]));
        }

        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => base_font.clone(),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "DW" => 1000,
            "W" => widths,
            "CIDToGIDMap" => "Identity",
        });

        let to_unicode_id = doc.add_object(Stream::new(
            dictionary! {},
            self.to_unicode_cmap().into_bytes(),
        ));

        doc.objects.insert(
            font_id,
            Object::Dictionary(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type0",
                "BaseFont" => base_font,
                "Encoding" => "Identity-H",
                "DescendantFonts" => vec![Object::Reference(cid_font_id)],
                "ToUnicode" => to_unicode_id,
            }),
        );
        Ok(())
    }

    fn to_unicode_cmap(&self) -> String {
        let mappings: Vec<String> = self
            .used
            .iter()
            .filter(|(gid, _)| **gid != 0)
            .map(|(gid, glyph)| {
                let mut units = [0u16; 2];
                let target: String = glyph
                    .unicode
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|u| format!("{u:04X}"))
                    .collect();
                format!("<{gid:04X}> <{target}>")
            })
            .collect();

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );
        // bfchar blocks hold at most 100 entries
        for chunk in mappings.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for line in chunk {
                cmap.push_str(line);
                cmap.push('\n');
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str(
            "endcmap\n\
             CMapName currentdict /defineresource exec pop\n\
             end\n\
             end\n",
        );
        cmap
    }
}

/// Content-stream operations for one page.
#[derive(Default)]
pub struct PageCanvas {
    pub ops: Vec<Operation>,
}

impl PageCanvas {
    pub fn text(&mut self, enc: &mut GlyphEncoder<'_>, x: f32, y: f32, size: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        let glyphs = enc.encode(text);
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), size.into()],
        ));
        self.ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(glyphs, StringFormat::Hexadecimal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Text whose right edge sits at `right`.
    pub fn text_right(
        &mut self,
        enc: &mut GlyphEncoder<'_>,
        right: f32,
        y: f32,
        size: f32,
        text: &str,
    ) {
        let x = right - enc.width(text, size);
        self.text(enc, x, y, size, text);
    }

    pub fn text_centered(
        &mut self,
        enc: &mut GlyphEncoder<'_>,
        center: f32,
        y: f32,
        size: f32,
        text: &str,
    ) {
        let x = center - enc.width(text, size) / 2.0;
        self.text(enc, x, y, size, text);
    }

    /// Horizontal rule in the given grey level (0 = black), then back to black.
    pub fn rule(&mut self, x1: f32, x2: f32, y: f32, line_width: f32, grey: f32) {
        self.ops.push(Operation::new("w", vec![line_width.into()]));
        if grey > 0.0 {
            self.ops
                .push(Operation::new("RG", vec![grey.into(), grey.into(), grey.into()]));
        }
        self.ops.push(Operation::new("m", vec![x1.into(), y.into()]));
        self.ops.push(Operation::new("l", vec![x2.into(), y.into()]));
        self.ops.push(Operation::new("S", vec![]));
        if grey > 0.0 {
            self.ops
                .push(Operation::new("RG", vec![0.0f32.into(), 0.0f32.into(), 0.0f32.into()]));
        }
    }
}
