//! A small TrueType font assembled in memory for rendering tests.
//!
//! Every covered character gets its own glyph (a plain box outline), with
//! glyph ids assigned in code-point order. Text shown in a content stream
//! can therefore be decoded back with [`shown_text`].

use std::collections::BTreeSet;

use jangbu_core::render::font::LedgerFont;

/// Hangul drawn by the ledger layout and the test ledgers.
pub const HANGUL: &str = "매출입장합계거래처공급가액세일자상호기간페이지월누소분반";

pub const UNITS_PER_EM: u16 = 1000;

const GLYPH_LEN: u32 = 36;

/// Printable ASCII plus [`HANGUL`], sorted and deduplicated.
fn covered() -> Vec<char> {
    let set: BTreeSet<char> = (' '..='~').chain(HANGUL.chars()).collect();
    set.into_iter().collect()
}

/// Font covering everything the ledger renderer draws.
pub fn ledger_font() -> LedgerFont {
    let text: String = covered().into_iter().collect();
    LedgerFont::from_bytes(build_font(&text)).expect("generated font loads")
}

/// Glyph id of `c` in [`ledger_font`].
pub fn glyph_id(c: char) -> u16 {
    let index = covered()
        .iter()
        .position(|x| *x == c)
        .expect("character is covered");
    index as u16 + 1
}

/// Decode Identity-H glyph bytes produced with [`ledger_font`].
pub fn shown_text(glyphs: &[u8]) -> String {
    let chars = covered();
    glyphs
        .chunks(2)
        .map(|pair| {
            let gid = u16::from_be_bytes([pair[0], pair[1]]) as usize;
            match gid {
                0 => '\u{fffd}',
                _ => chars[gid - 1],
            }
        })
        .collect()
}

/// Build a TrueType font with one box glyph per distinct character of `chars`.
pub fn build_font(chars: &str) -> Vec<u8> {
    let chars: Vec<char> = chars.chars().collect::<BTreeSet<_>>().into_iter().collect();
    let num_glyphs = chars.len() as u16 + 1;

    let mut tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"cmap", cmap(&chars)),
        (b"glyf", box_glyph().repeat(chars.len())),
        (b"head", head()),
        (b"hhea", hhea(num_glyphs)),
        (b"hmtx", hmtx(&chars)),
        (b"loca", loca(chars.len() as u32)),
        (b"maxp", maxp(num_glyphs)),
        (b"name", name("JangbuTest")),
    ];
    tables.sort_by_key(|(tag, _)| **tag);

    let count = tables.len() as u16;
    let mut font = Vec::new();
    push_u32(&mut font, 0x0001_0000);
    push_u16(&mut font, count);
    push_u16(&mut font, 128); // search range for 8 tables
    push_u16(&mut font, 3);
    push_u16(&mut font, count * 16 - 128);

    let mut offset = 12 + 16 * u32::from(count);
    let mut body = Vec::new();
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        push_u32(&mut font, checksum(data));
        push_u32(&mut font, offset);
        push_u32(&mut font, data.len() as u32);

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * u32::from(count) + body.len() as u32;
    }
    font.extend_from_slice(&body);
    font
}

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn push_i16(buf: &mut Vec<u8>, v: i16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn advance(c: char) -> u16 {
    if c.is_ascii() {
        500
    } else {
        1000
    }
}

/// One closed contour: a 400x700 box, on-curve points, word deltas.
fn box_glyph() -> Vec<u8> {
    let mut g = Vec::new();
    push_i16(&mut g, 1);
    for v in [50, 0, 450, 700] {
        push_i16(&mut g, v);
    }
    push_u16(&mut g, 3);
    push_u16(&mut g, 0);
    g.extend_from_slice(&[0x01; 4]);
    for dx in [50, 400, 0, -400] {
        push_i16(&mut g, dx);
    }
    for dy in [0, 0, 700, 0] {
        push_i16(&mut g, dy);
    }
    g.resize(GLYPH_LEN as usize, 0);
    g
}

fn head() -> Vec<u8> {
    let mut t = Vec::new();
    push_u32(&mut t, 0x0001_0000);
    push_u32(&mut t, 0x0001_0000);
    push_u32(&mut t, 0);
    push_u32(&mut t, 0x5F0F_3CF5);
    push_u16(&mut t, 0b1011);
    push_u16(&mut t, UNITS_PER_EM);
    t.extend_from_slice(&[0; 16]);
    for v in [0, -200, 1000, 800] {
        push_i16(&mut t, v);
    }
    push_u16(&mut t, 0);
    push_u16(&mut t, 8);
    push_i16(&mut t, 2);
    push_i16(&mut t, 1); // long loca offsets
    push_i16(&mut t, 0);
    t
}

fn hhea(num_glyphs: u16) -> Vec<u8> {
    let mut t = Vec::new();
    push_u32(&mut t, 0x0001_0000);
    push_i16(&mut t, 800);
    push_i16(&mut t, -200);
    push_i16(&mut t, 0);
    push_u16(&mut t, 1000);
    push_i16(&mut t, 0);
    push_i16(&mut t, 0);
    push_i16(&mut t, 1000);
    push_i16(&mut t, 1);
    push_i16(&mut t, 0);
    push_i16(&mut t, 0);
    t.extend_from_slice(&[0; 8]);
    push_i16(&mut t, 0);
    push_u16(&mut t, num_glyphs);
    t
}

fn maxp(num_glyphs: u16) -> Vec<u8> {
    let mut t = Vec::new();
    push_u32(&mut t, 0x0001_0000);
    push_u16(&mut t, num_glyphs);
    push_u16(&mut t, 4);
    push_u16(&mut t, 1);
    t.extend_from_slice(&[0; 22]);
    t
}

fn hmtx(chars: &[char]) -> Vec<u8> {
    let mut t = Vec::new();
    push_u16(&mut t, 500);
    push_i16(&mut t, 0);
    for c in chars {
        push_u16(&mut t, advance(*c));
        push_i16(&mut t, 50);
    }
    t
}

/// Glyph 0 is empty; glyph `i` spans `[(i-1)*GLYPH_LEN, i*GLYPH_LEN)`.
fn loca(glyphs: u32) -> Vec<u8> {
    let mut t = Vec::new();
    push_u32(&mut t, 0);
    for i in 0..=glyphs {
        push_u32(&mut t, i * GLYPH_LEN);
    }
    t
}

/// Windows Unicode full-repertoire subtable, format 12, one group per character.
fn cmap(chars: &[char]) -> Vec<u8> {
    let mut t = Vec::new();
    push_u16(&mut t, 0);
    push_u16(&mut t, 1);
    push_u16(&mut t, 3);
    push_u16(&mut t, 10);
    push_u32(&mut t, 12);

    push_u16(&mut t, 12);
    push_u16(&mut t, 0);
    push_u32(&mut t, 16 + 12 * chars.len() as u32);
    push_u32(&mut t, 0);
    push_u32(&mut t, chars.len() as u32);
    for (i, c) in chars.iter().enumerate() {
        push_u32(&mut t, *c as u32);
        push_u32(&mut t, *c as u32);
        push_u32(&mut t, i as u32 + 1);
    }
    t
}

/// A single Windows/Unicode PostScript name record.
fn name(postscript: &str) -> Vec<u8> {
    let encoded: Vec<u8> = postscript
        .encode_utf16()
        .flat_map(|u| u.to_be_bytes())
        .collect();
    let mut t = Vec::new();
    push_u16(&mut t, 0);
    push_u16(&mut t, 1);
    push_u16(&mut t, 18);
    push_u16(&mut t, 3);
    push_u16(&mut t, 1);
    push_u16(&mut t, 0x0409);
    push_u16(&mut t, 6);
    push_u16(&mut t, encoded.len() as u16);
    push_u16(&mut t, 0);
    t.extend_from_slice(&encoded);
    t
}
