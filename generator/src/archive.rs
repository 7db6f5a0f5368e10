//! Selection and decompression of font entries.

use crate::error::{GenError, Result};
use crate::font_name::has_font_suffix;
use log::debug;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Upper bound on the buffer reserved up front from an entry's declared size.
///
/// The declared size comes from the archive headers and is not trusted.
const MAX_PREALLOCATION: u64 = 64 << 20;

/// A font file selected from the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    /// Position of the entry in the archive's central directory.
    pub index: usize,
    /// Full entry name, e.g. `dejavu-fonts-ttf-2.37/ttf/DejaVuSans.ttf`.
    pub path: String,
    /// Final path component, e.g. `DejaVuSans.ttf`.
    pub file_name: String,
}

/// Select the entries whose names end in `.ttf`, in archive order.
///
/// Only entry headers are read; nothing is decompressed. Directory entries
/// and names with any other suffix casing are skipped.
///
/// # Errors
///
/// Returns [`GenError::Decompress`] if an entry header cannot be read.
pub fn font_entries<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<std::vec::IntoIter<FontEntry>> {
    let mut selected = Vec::new();
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|e| GenError::Decompress {
                entry: format!("#{index}"),
                reason: e.to_string(),
            })?;
        if entry.is_dir() || !has_font_suffix(entry.name()) {
            debug!("skipping archive entry {}", entry.name());
            continue;
        }
        selected.push(FontEntry {
            index,
            path: entry.name().to_owned(),
            file_name: base_name(entry.name()).to_owned(),
        });
    }
    Ok(selected.into_iter())
}

/// Decompress one selected entry into memory.
///
/// # Errors
///
/// Returns [`GenError::Decompress`] if the entry cannot be opened or its data
/// is corrupt.
pub fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    entry: &FontEntry,
) -> Result<Vec<u8>> {
    let decompress_error = |reason: String| GenError::Decompress {
        entry: entry.path.clone(),
        reason,
    };
    let mut file = archive
        .by_index(entry.index)
        .map_err(|e| decompress_error(e.to_string()))?;
    let capacity = usize::try_from(file.size().min(MAX_PREALLOCATION)).unwrap_or_default();
    let mut data = Vec::with_capacity(capacity);
    file.read_to_end(&mut data)
        .map_err(|e| decompress_error(e.to_string()))?;
    Ok(data)
}

fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{minimal_ttf, write_zip};
    use std::fs::File;
    use std::io::Cursor;

    fn open(path: &std::path::Path) -> ZipArchive<File> {
        ZipArchive::new(File::open(path).expect("open fixture")).expect("read fixture")
    }

    #[test]
    fn selects_exact_suffix_in_archive_order() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("fonts.zip");
        write_zip(
            &path,
            &[
                ("fonts/", b""),
                ("fonts/DejaVu-Serif.ttf", b"serif"),
                ("fonts/README.txt", b"readme"),
                ("fonts/Upper.TTF", b"upper"),
                ("fonts/DejaVu-Sans.ttf", b"sans"),
                ("fonts/Backup.ttf.bak", b"backup"),
                ("fonts/Other.otf", b"otf"),
            ],
        );
        let mut archive = open(&path);

        let names: Vec<String> = font_entries(&mut archive)
            .expect("list entries")
            .map(|entry| entry.file_name)
            .collect();
        assert_eq!(names, vec!["DejaVu-Serif.ttf", "DejaVu-Sans.ttf"]);
    }

    #[test]
    fn reads_decompressed_payload() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("fonts.zip");
        let font = minimal_ttf(42);
        write_zip(&path, &[("ttf/DejaVuSans.ttf", font.as_slice())]);
        let mut archive = open(&path);

        let entry = font_entries(&mut archive)
            .expect("list entries")
            .next()
            .expect("one font");
        assert_eq!(entry.path, "ttf/DejaVuSans.ttf");
        assert_eq!(entry.file_name, "DejaVuSans.ttf");
        assert_eq!(read_entry(&mut archive, &entry).expect("read"), font);
    }

    #[test]
    fn read_entry_reports_unknown_index() {
        let temp = tempfile::tempdir().expect("temp dir");
        let path = temp.path().join("fonts.zip");
        write_zip(&path, &[("DejaVuSans.ttf", b"font")]);
        let mut archive = open(&path);
        let bogus = FontEntry {
            index: 7,
            path: "ghost/Ghost.ttf".to_owned(),
            file_name: "Ghost.ttf".to_owned(),
        };

        let err = read_entry(&mut archive, &bogus).expect_err("missing entry");
        assert!(matches!(err, GenError::Decompress { ref entry, .. } if entry == "ghost/Ghost.ttf"));
    }

    /// CRC-32 of `b"abcd"`.
    const ABCD_CRC: u32 = 0xED82_CD11;

    /// Build a one-entry stored archive with hand-written headers, so the
    /// CRC and declared size can disagree with the data. Sizes that do not
    /// fit in 32 bits go into a zip64 extra field.
    fn stored_archive(name: &str, data: &[u8], crc: u32, declared_size: u64) -> Vec<u8> {
        let name_len = u16::try_from(name.len()).expect("short name");
        let data_len = u32::try_from(data.len()).expect("small payload");
        let (size_field, extra) = match u32::try_from(declared_size) {
            Ok(size) if size != u32::MAX => (size, Vec::new()),
            _ => {
                let mut extra = Vec::new();
                extra.extend_from_slice(&1_u16.to_le_bytes());
                extra.extend_from_slice(&8_u16.to_le_bytes());
                extra.extend_from_slice(&declared_size.to_le_bytes());
                (u32::MAX, extra)
            }
        };
        let extra_len = u16::try_from(extra.len()).expect("short extra");

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0x0403_4b50_u32.to_le_bytes());
        bytes.extend_from_slice(&45_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0x0021_u16.to_le_bytes());
        bytes.extend_from_slice(&crc.to_le_bytes());
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.extend_from_slice(&name_len.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(name.as_bytes());
        bytes.extend_from_slice(data);

        let central_offset = u32::try_from(bytes.len()).expect("small archive");
        bytes.extend_from_slice(&0x0201_4b50_u32.to_le_bytes());
        bytes.extend_from_slice(&45_u16.to_le_bytes());
        bytes.extend_from_slice(&45_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0x0021_u16.to_le_bytes());
        bytes.extend_from_slice(&crc.to_le_bytes());
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.extend_from_slice(&size_field.to_le_bytes());
        bytes.extend_from_slice(&name_len.to_le_bytes());
        bytes.extend_from_slice(&extra_len.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u32.to_le_bytes());
        bytes.extend_from_slice(&0_u32.to_le_bytes());
        bytes.extend_from_slice(name.as_bytes());
        bytes.extend_from_slice(&extra);
        let central_size = u32::try_from(bytes.len()).expect("small archive") - central_offset;

        bytes.extend_from_slice(&0x0605_4b50_u32.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes.extend_from_slice(&1_u16.to_le_bytes());
        bytes.extend_from_slice(&1_u16.to_le_bytes());
        bytes.extend_from_slice(&central_size.to_le_bytes());
        bytes.extend_from_slice(&central_offset.to_le_bytes());
        bytes.extend_from_slice(&0_u16.to_le_bytes());
        bytes
    }

    #[test]
    fn hand_built_archive_reads_back() {
        let bytes = stored_archive("fonts/Small.ttf", b"abcd", ABCD_CRC, 4);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("read archive");
        let entry = font_entries(&mut archive)
            .expect("list entries")
            .next()
            .expect("one font");
        assert_eq!(read_entry(&mut archive, &entry).expect("read"), b"abcd");
    }

    #[test]
    fn oversized_declared_size_does_not_reserve_it() {
        let bytes = stored_archive("fonts/Huge.ttf", b"abcd", ABCD_CRC, 1 << 62);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("read archive");
        let entry = font_entries(&mut archive)
            .expect("list entries")
            .next()
            .expect("one font");

        match read_entry(&mut archive, &entry) {
            Ok(data) => assert_eq!(data, b"abcd"),
            Err(GenError::Decompress { entry, .. }) => assert_eq!(entry, "fonts/Huge.ttf"),
            Err(other) => panic!("expected Decompress error, got {other:?}"),
        }
    }

    #[test]
    fn checksum_failure_is_a_decompress_error() {
        let bytes = stored_archive("fonts/Corrupt.ttf", b"abcd", ABCD_CRC ^ 1, 4);
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("read archive");
        let entry = font_entries(&mut archive)
            .expect("list entries")
            .next()
            .expect("one font");

        let err = read_entry(&mut archive, &entry).expect_err("CRC mismatch");
        assert!(
            matches!(&err, GenError::Decompress { entry, .. } if entry == "fonts/Corrupt.ttf"),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn base_name_handles_flat_and_nested_names() {
        assert_eq!(base_name("DejaVuSans.ttf"), "DejaVuSans.ttf");
        assert_eq!(base_name("a/b/DejaVuSans.ttf"), "DejaVuSans.ttf");
    }
}
