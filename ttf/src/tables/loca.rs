use std::io::{self, Cursor};

use super::head::HeadTable;
use super::maxp::MaxpTable;
use super::FontTable;
use byteorder::{BigEndian, ReadBytesExt};

/// Index to location. Maps glyph ids to byte ranges inside the `glyf` table.
/// Contains `num_glyphs + 1` offsets; two equal adjacent offsets mark a glyph
/// without an outline. Short offsets are stored halved and expanded here.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/loca
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6loca.html
#[derive(Debug, PartialEq)]
pub struct LocaTable {
    pub(crate) offsets: Vec<u32>,
}

impl<'a> FontTable<'a> for LocaTable {
    type Dep = (&'a HeadTable, &'a MaxpTable);

    fn unpack(
        rd: &mut Cursor<&[u8]>,
        (head, maxp): Self::Dep,
    ) -> Result<Self, io::Error> {
        let count = usize::from(maxp.num_glyphs()) + 1;
        let mut offsets = Vec::with_capacity(count);
        if head.index_to_loc_format == 0 {
            for _ in 0..count {
                offsets.push(u32::from(rd.read_u16::<BigEndian>()?) * 2);
            }
        } else {
            for _ in 0..count {
                offsets.push(rd.read_u32::<BigEndian>()?);
            }
        }
        Ok(LocaTable { offsets })
    }
}
