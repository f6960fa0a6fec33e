//! From-scratch TrueType font decoding: table directory, character map,
//! metrics, and glyph outlines (simple and composite).
//!
//! This crate stops at outline data — turning outlines into pixels is the
//! job of the consuming crate. All multi-byte fields in a font file are
//! big-endian.

mod tables;

use std::convert::TryFrom;
use std::io::{self, Cursor};

use byteorder::{BigEndian, ReadBytesExt};
use tables::cmap::CmapTable;
use tables::glyf::GlyfTable;
use tables::head::HeadTable;
use tables::hhea::HheaTable;
use tables::loca::LocaTable;
use tables::maxp::MaxpTable;
use tables::FontTable;

pub use tables::glyf::{Glyph, GlyphPoint};

/// A parsed TrueType font file.
///
/// Parsing extracts the handful of tables the engine consumes: `head`,
/// `hhea`, `maxp`, `loca`, `glyf` and the Unicode `cmap` subtable. Glyph
/// outline data stays in its raw byte form and is decoded fresh on every
/// [`FontFile::outline`] call.
#[derive(Debug)]
pub struct FontFile {
    head: HeadTable,
    hhea: HheaTable,
    maxp: MaxpTable,
    cmap: CmapTable,
    glyf: GlyfTable,
}

impl FontFile {
    /// Parse a complete TrueType font from an in-memory byte buffer.
    ///
    /// The buffer is expected to be a whole font file; reading it from disk
    /// (or wherever else it lives) is the caller's concern. An empty buffer
    /// or a missing required table is an error.
    pub fn from_slice(data: impl AsRef<[u8]>) -> Result<Self, io::Error> {
        let data = data.as_ref();
        if data.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "font data is empty",
            ));
        }

        let directory = TableDirectory::unpack(&mut Cursor::new(data))?;
        let head: HeadTable = directory.unpack_required_table(b"head", data, ())?;
        let hhea: HheaTable = directory.unpack_required_table(b"hhea", data, ())?;
        let maxp: MaxpTable = directory.unpack_required_table(b"maxp", data, ())?;
        let loca: LocaTable =
            directory.unpack_required_table(b"loca", data, (&head, &maxp))?;
        let glyf: GlyfTable = directory.unpack_required_table(b"glyf", data, &loca)?;
        let cmap: CmapTable = directory.unpack_required_table(b"cmap", data, ())?;

        Ok(FontFile {
            head,
            hhea,
            maxp,
            cmap,
            glyf,
        })
    }

    /// Map a character to its glyph index through the Unicode character map.
    ///
    /// Unmapped characters resolve to glyph index 0 (the missing glyph).
    /// Panics if the codepoint lies beyond every cmap segment — the font is
    /// assumed to cover the codepoint range in use.
    pub fn glyph_id(&self, codepoint: char) -> u16 {
        match u16::try_from(u32::from(codepoint)) {
            Ok(codepoint) => self.cmap.glyph_id(codepoint),
            // format 4 only covers the BMP
            Err(_) => 0,
        }
    }

    /// Decode the outline of a glyph. `None` means the glyph has no outline
    /// (e.g. the space character).
    pub fn outline(&self, glyph_id: u16) -> Result<Option<Glyph>, io::Error> {
        self.glyf.outline(glyph_id)
    }

    /// Font design units per em square.
    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    /// Distance from the baseline to the highest ascender, in design units.
    pub fn ascender(&self) -> i16 {
        self.hhea.ascender
    }

    /// Distance from the baseline to the lowest descender, in design units
    /// (negative).
    pub fn descender(&self) -> i16 {
        self.hhea.descender
    }

    /// Additional spacing between lines, in design units.
    pub fn line_gap(&self) -> i16 {
        self.hhea.line_gap
    }

    /// Maximum advance width over all glyphs, in design units.
    pub fn advance_width_max(&self) -> u16 {
        self.hhea.advance_width_max
    }

    /// Maximum point count of a simple glyph (zero for maxp version 0.5).
    pub fn max_points(&self) -> u16 {
        self.maxp.max_points()
    }

    /// Maximum contour count of a simple glyph (zero for maxp version 0.5).
    pub fn max_contours(&self) -> u16 {
        self.maxp.max_contours()
    }

    /// Maximum point count of a composite glyph (zero for maxp version 0.5).
    pub fn max_composite_points(&self) -> u16 {
        self.maxp.max_composite_points()
    }

    /// Maximum contour count of a composite glyph (zero for maxp version
    /// 0.5).
    pub fn max_composite_contours(&self) -> u16 {
        self.maxp.max_composite_contours()
    }
}

/// The font's top-level index of named, offset-located data tables.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/otff
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6.html
#[derive(Debug, PartialEq)]
struct TableDirectory {
    records: Vec<TableRecord>,
}

/// Tables the engine knows how to consume. Records with any other tag are
/// dropped while reading the directory.
const KNOWN_TAGS: [&[u8; 4]; 8] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"OS/2", b"maxp", b"loca", b"glyf",
];

impl TableDirectory {
    fn unpack(rd: &mut Cursor<&[u8]>) -> Result<Self, io::Error> {
        let _sfnt_version = rd.read_u32::<BigEndian>()?;
        let num_tables = rd.read_u16::<BigEndian>()?;
        let _search_range = rd.read_u16::<BigEndian>()?;
        let _entry_selector = rd.read_u16::<BigEndian>()?;
        let _range_shift = rd.read_u16::<BigEndian>()?;

        let mut records = Vec::with_capacity(KNOWN_TAGS.len());
        for _ in 0..num_tables {
            let record = TableRecord::unpack(rd)?;
            if KNOWN_TAGS.contains(&&record.tag) {
                records.push(record);
            }
        }

        Ok(TableDirectory { records })
    }

    fn record(&self, tag: &[u8; 4]) -> Option<&TableRecord> {
        self.records.iter().find(|r| &r.tag == tag)
    }

    /// Borrow the byte range of one table out of the whole font buffer.
    fn table_data<'a>(&self, tag: &[u8; 4], data: &'a [u8]) -> Result<&'a [u8], io::Error> {
        let record = self.record(tag).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} table missing", String::from_utf8_lossy(tag)),
            )
        })?;
        let start = record.offset as usize;
        let end = start + record.length as usize;
        data.get(start..end).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} table out of bounds", String::from_utf8_lossy(tag)),
            )
        })
    }

    fn unpack_required_table<'a, T>(
        &self,
        tag: &[u8; 4],
        data: &[u8],
        dep: T::Dep,
    ) -> Result<T, io::Error>
    where
        T: FontTable<'a>,
    {
        let table = self.table_data(tag, data)?;
        T::unpack(&mut Cursor::new(table), dep)
    }
}

#[derive(Debug, PartialEq)]
struct TableRecord {
    tag: [u8; 4],
    check_sum: u32,
    offset: u32,
    length: u32,
}

impl TableRecord {
    fn unpack(rd: &mut Cursor<&[u8]>) -> Result<Self, io::Error> {
        let mut tag = [0; 4];
        io::Read::read_exact(rd, &mut tag)?;
        Ok(TableRecord {
            tag,
            check_sum: rd.read_u32::<BigEndian>()?,
            offset: rd.read_u32::<BigEndian>()?,
            length: rd.read_u32::<BigEndian>()?,
        })
    }
}
