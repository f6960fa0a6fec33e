use std::io::{self, Cursor};

use super::FontTable;
use byteorder::{BigEndian, ReadBytesExt};

/// Character to glyph index mapping. Only a format 4 (segment mapping to
/// delta values) subtable under a Unicode platform encoding record is
/// supported, which covers the basic multilingual plane.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/cmap
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6cmap.html
#[derive(Debug, PartialEq)]
pub struct CmapTable {
    /// Last code point of each segment, ascending; final entry is 0xFFFF.
    end_code: Vec<u16>,
    /// First code point of each segment.
    start_code: Vec<u16>,
    /// Per-segment delta added (mod 65536) to the code point or looked-up id.
    id_delta: Vec<u16>,
    /// Per-segment byte offset into the glyph id array, or 0 for the delta
    /// fast path.
    id_range_offset: Vec<u16>,
    glyph_ids: Vec<u16>,
}

impl CmapTable {
    /// Resolves a BMP code point to its glyph id (0 for unmapped characters).
    ///
    /// Panics if the code point falls beyond every segment, which a
    /// well-formed subtable prevents with its trailing 0xFFFF segment.
    pub fn glyph_id(&self, codepoint: u16) -> u16 {
        let seg = (0..self.end_code.len())
            .find(|&i| self.end_code[i] >= codepoint)
            .expect("codepoint beyond cmap segment range");

        if self.start_code[seg] > codepoint {
            return 0;
        }

        let id_range_offset = self.id_range_offset[seg];
        if id_range_offset == 0 {
            return codepoint.wrapping_add(self.id_delta[seg]);
        }

        // the offset is relative to the id_range_offset entry itself, so it
        // can address both the remainder of that array and the glyph id
        // array that follows it
        let pos = seg
            + usize::from(id_range_offset / 2)
            + usize::from(codepoint - self.start_code[seg]);
        let glyph_id = if pos < self.id_range_offset.len() {
            self.id_range_offset[pos]
        } else {
            match self.glyph_ids.get(pos - self.id_range_offset.len()) {
                Some(id) => *id,
                None => return 0,
            }
        };
        if glyph_id == 0 {
            0
        } else {
            glyph_id.wrapping_add(self.id_delta[seg])
        }
    }
}

impl<'a> FontTable<'a> for CmapTable {
    type Dep = ();

    fn unpack(rd: &mut Cursor<&[u8]>, _: Self::Dep) -> Result<Self, io::Error> {
        let _version = rd.read_u16::<BigEndian>()?;
        let num_tables = rd.read_u16::<BigEndian>()?;

        let mut subtable_offset = None;
        for _ in 0..num_tables {
            let platform_id = rd.read_u16::<BigEndian>()?;
            let _encoding_id = rd.read_u16::<BigEndian>()?;
            let offset = rd.read_u32::<BigEndian>()?;
            if platform_id == 0 && subtable_offset.is_none() {
                subtable_offset = Some(offset);
            }
        }

        let subtable_offset = subtable_offset.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "cmap table has no unicode encoding record",
            )
        })?;
        rd.set_position(u64::from(subtable_offset));

        let format = rd.read_u16::<BigEndian>()?;
        if format != 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported cmap subtable format {}", format),
            ));
        }

        let length = rd.read_u16::<BigEndian>()?;
        let _language = rd.read_u16::<BigEndian>()?;
        let seg_count = usize::from(rd.read_u16::<BigEndian>()? / 2);
        // search_range, entry_selector, range_shift
        super::skip(rd, 6);

        let mut end_code = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            end_code.push(rd.read_u16::<BigEndian>()?);
        }
        let _reserved_pad = rd.read_u16::<BigEndian>()?;
        let mut start_code = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            start_code.push(rd.read_u16::<BigEndian>()?);
        }
        let mut id_delta = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            id_delta.push(rd.read_u16::<BigEndian>()?);
        }
        let mut id_range_offset = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            id_range_offset.push(rd.read_u16::<BigEndian>()?);
        }

        // everything after the four segment arrays is the glyph id array
        let glyph_id_count = (usize::from(length))
            .saturating_sub(16 + 8 * seg_count)
            / 2;
        let mut glyph_ids = Vec::with_capacity(glyph_id_count);
        for _ in 0..glyph_id_count {
            glyph_ids.push(rd.read_u16::<BigEndian>()?);
        }

        Ok(CmapTable {
            end_code,
            start_code,
            id_delta,
            id_range_offset,
            glyph_ids,
        })
    }
}
