//! Shared test utilities for the generator crate.
//!
//! Builds ZIP fixtures shaped like the upstream release archive and minimal
//! TrueType fonts that a standards-compliant parser accepts.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

/// Glyph count of the DejaVu Math TeX Gyre font in the 2.37 release.
pub const MATH_GLYPH_COUNT: u16 = 4282;

/// Directory prefix used by the upstream archive for its font files.
pub const ARCHIVE_TTF_DIR: &str = "dejavu-fonts-ttf-2.37/ttf/";

/// Build a minimal TrueType font with `head`, `hhea` and `maxp` tables.
///
/// The font carries no outlines, but reports `num_glyphs` in `maxp`, which is
/// enough for parsers to accept it and report the glyph count.
///
/// # Panics
///
/// Panics if `num_glyphs` is zero, which no parser accepts.
#[must_use]
pub fn minimal_ttf(num_glyphs: u16) -> Vec<u8> {
    assert!(num_glyphs > 0, "a font needs at least one glyph");

    let tables: [(&[u8; 4], Vec<u8>); 3] = [
        (b"head", head_table()),
        (b"hhea", hhea_table()),
        (b"maxp", maxp_table(num_glyphs)),
    ];

    let header_len = 12 + 16 * tables.len();
    let mut font = Vec::new();
    font.extend_from_slice(&0x0001_0000_u32.to_be_bytes());
    font.extend_from_slice(&3_u16.to_be_bytes()); // numTables
    font.extend_from_slice(&32_u16.to_be_bytes()); // searchRange
    font.extend_from_slice(&1_u16.to_be_bytes()); // entrySelector
    font.extend_from_slice(&16_u16.to_be_bytes()); // rangeShift

    let mut body = Vec::new();
    for (tag, data) in &tables {
        let offset = u32::try_from(header_len + body.len()).expect("small font");
        let length = u32::try_from(data.len()).expect("small table");
        font.extend_from_slice(*tag);
        font.extend_from_slice(&table_checksum(data).to_be_bytes());
        font.extend_from_slice(&offset.to_be_bytes());
        font.extend_from_slice(&length.to_be_bytes());
        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
    }
    font.extend_from_slice(&body);
    font
}

fn head_table() -> Vec<u8> {
    let mut table = Vec::with_capacity(54);
    table.extend_from_slice(&0x0001_0000_u32.to_be_bytes()); // version
    table.extend_from_slice(&0x0001_0000_u32.to_be_bytes()); // fontRevision
    table.extend_from_slice(&0_u32.to_be_bytes()); // checkSumAdjustment
    table.extend_from_slice(&0x5F0F_3CF5_u32.to_be_bytes()); // magicNumber
    table.extend_from_slice(&0_u16.to_be_bytes()); // flags
    table.extend_from_slice(&2048_u16.to_be_bytes()); // unitsPerEm
    table.extend_from_slice(&0_i64.to_be_bytes()); // created
    table.extend_from_slice(&0_i64.to_be_bytes()); // modified
    for _ in 0..4 {
        table.extend_from_slice(&0_i16.to_be_bytes()); // bounding box
    }
    table.extend_from_slice(&0_u16.to_be_bytes()); // macStyle
    table.extend_from_slice(&8_u16.to_be_bytes()); // lowestRecPPEM
    table.extend_from_slice(&2_i16.to_be_bytes()); // fontDirectionHint
    table.extend_from_slice(&0_i16.to_be_bytes()); // indexToLocFormat
    table.extend_from_slice(&0_i16.to_be_bytes()); // glyphDataFormat
    table
}

fn hhea_table() -> Vec<u8> {
    let mut table = Vec::with_capacity(36);
    table.extend_from_slice(&0x0001_0000_u32.to_be_bytes()); // version
    table.extend_from_slice(&1901_i16.to_be_bytes()); // ascender
    table.extend_from_slice(&(-483_i16).to_be_bytes()); // descender
    table.extend_from_slice(&0_i16.to_be_bytes()); // lineGap
    table.extend_from_slice(&0_u16.to_be_bytes()); // advanceWidthMax
    for _ in 0..3 {
        table.extend_from_slice(&0_i16.to_be_bytes()); // side bearings, extent
    }
    table.extend_from_slice(&1_i16.to_be_bytes()); // caretSlopeRise
    table.extend_from_slice(&0_i16.to_be_bytes()); // caretSlopeRun
    table.extend_from_slice(&0_i16.to_be_bytes()); // caretOffset
    for _ in 0..4 {
        table.extend_from_slice(&0_i16.to_be_bytes()); // reserved
    }
    table.extend_from_slice(&0_i16.to_be_bytes()); // metricDataFormat
    table.extend_from_slice(&1_u16.to_be_bytes()); // numberOfHMetrics
    table
}

fn maxp_table(num_glyphs: u16) -> Vec<u8> {
    let mut table = Vec::with_capacity(6);
    table.extend_from_slice(&0x0000_5000_u32.to_be_bytes()); // version 0.5
    table.extend_from_slice(&num_glyphs.to_be_bytes());
    table
}

fn table_checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0_u32, |sum, chunk| {
        let mut word = [0_u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

/// Write a deflate-compressed ZIP archive at `path`.
///
/// Entries whose name ends in `/` are added as directories; all others are
/// added as files with the given contents, in the given order.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = std::fs::File::create(path).expect("create zip fixture");
    let mut writer = zip::ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, contents) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .expect("add directory entry");
        } else {
            writer.start_file(*name, options).expect("start file entry");
            writer.write_all(contents).expect("write file entry");
        }
    }
    writer.finish().expect("finish zip fixture");
}

/// Write an archive laid out like the upstream release: a licence file, a
/// directory entry and one font per `(file name, glyph count)` pair under
/// [`ARCHIVE_TTF_DIR`].
///
/// Returns the archive path.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn write_font_archive(dir: &Path, fonts: &[(&str, u16)]) -> PathBuf {
    let path = dir.join("dejavu-fonts-ttf-2.37.zip");
    let payloads: Vec<(String, Vec<u8>)> = fonts
        .iter()
        .map(|(name, glyphs)| (format!("{ARCHIVE_TTF_DIR}{name}"), minimal_ttf(*glyphs)))
        .collect();

    let licence: &[u8] = b"Bitstream Vera Fonts Copyright";
    let mut entries: Vec<(&str, &[u8])> = vec![
        ("dejavu-fonts-ttf-2.37/LICENSE", licence),
        (ARCHIVE_TTF_DIR, &[]),
    ];
    entries.extend(
        payloads
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice())),
    );
    write_zip(&path, &entries);
    path
}

/// Read every file under `root` into a map keyed by relative path.
///
/// # Panics
///
/// Panics if the tree cannot be read.
#[must_use]
pub fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).expect("read dir") {
            let path = entry.expect("dir entry").path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let relative = path.strip_prefix(root).expect("under root").to_path_buf();
                files.insert(relative, std::fs::read(&path).expect("read file"));
            }
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_font_reports_glyph_count() {
        let data = minimal_ttf(MATH_GLYPH_COUNT);
        let face = ttf_parser::Face::parse(&data, 0).expect("parse minimal font");
        assert_eq!(face.number_of_glyphs(), MATH_GLYPH_COUNT);
    }

    #[test]
    fn font_archive_contains_fonts_after_licence() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = write_font_archive(temp.path(), &[("DejaVuSans.ttf", 6253)]);

        let file = std::fs::File::open(path).expect("open fixture");
        let archive = zip::ZipArchive::new(file).expect("read fixture");
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"dejavu-fonts-ttf-2.37/ttf/DejaVuSans.ttf"));
    }
}
