use std::io::{self, Cursor};

use super::{skip, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// Maximum profile. Establishes the memory requirements of the font. Version
/// 0.5 carries just the glyph count; version 1.0 adds per-glyph maxima used
/// to pre-size outline buffers.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/maxp
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6maxp.html
#[derive(Debug, PartialEq)]
pub enum MaxpTable {
    Version05 {
        num_glyphs: u16,
    },
    Version10 {
        num_glyphs: u16,
        max_points: u16,
        max_contours: u16,
        max_composite_points: u16,
        max_composite_contours: u16,
    },
}

impl MaxpTable {
    pub fn num_glyphs(&self) -> u16 {
        match self {
            MaxpTable::Version05 { num_glyphs } => *num_glyphs,
            MaxpTable::Version10 { num_glyphs, .. } => *num_glyphs,
        }
    }

    /// Maximum point count of any simple glyph (0 for version 0.5 fonts).
    pub fn max_points(&self) -> u16 {
        match self {
            MaxpTable::Version05 { .. } => 0,
            MaxpTable::Version10 { max_points, .. } => *max_points,
        }
    }

    pub fn max_contours(&self) -> u16 {
        match self {
            MaxpTable::Version05 { .. } => 0,
            MaxpTable::Version10 { max_contours, .. } => *max_contours,
        }
    }

    /// Maximum point count of any composite glyph (0 for version 0.5 fonts).
    pub fn max_composite_points(&self) -> u16 {
        match self {
            MaxpTable::Version05 { .. } => 0,
            MaxpTable::Version10 {
                max_composite_points,
                ..
            } => *max_composite_points,
        }
    }

    pub fn max_composite_contours(&self) -> u16 {
        match self {
            MaxpTable::Version05 { .. } => 0,
            MaxpTable::Version10 {
                max_composite_contours,
                ..
            } => *max_composite_contours,
        }
    }
}

impl<'a> FontTable<'a> for MaxpTable {
    type Dep = ();

    fn unpack(rd: &mut Cursor<&[u8]>, _: Self::Dep) -> Result<Self, io::Error> {
        let version = rd.read_u32::<BigEndian>()?;
        match version {
            0x00005000 => {
                let num_glyphs = rd.read_u16::<BigEndian>()?;
                Ok(MaxpTable::Version05 { num_glyphs })
            }
            0x00010000 => {
                let num_glyphs = rd.read_u16::<BigEndian>()?;
                let max_points = rd.read_u16::<BigEndian>()?;
                let max_contours = rd.read_u16::<BigEndian>()?;
                let max_composite_points = rd.read_u16::<BigEndian>()?;
                let max_composite_contours = rd.read_u16::<BigEndian>()?;
                // zones, twilight points, storage, function defs, instruction
                // defs, stack elements, instruction size, component elements,
                // component depth
                skip(rd, 18);
                Ok(MaxpTable::Version10 {
                    num_glyphs,
                    max_points,
                    max_contours,
                    max_composite_points,
                    max_composite_contours,
                })
            }
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported maxp version 0x{:08x}", version),
            )),
        }
    }
}
