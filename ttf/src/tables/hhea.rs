use std::io::{self, Cursor};

use super::{skip, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

/// Horizontal header. Carries the vertical metrics used to lay out lines of
/// text and the widest advance in the font.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/hhea
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6hhea.html
#[derive(Debug, PartialEq)]
pub struct HheaTable {
    /// Distance from the baseline to the highest ascender, in design units.
    pub(crate) ascender: i16,
    /// Distance from the baseline to the lowest descender, in design units.
    /// Typically negative.
    pub(crate) descender: i16,
    /// Additional spacing between lines, in design units.
    pub(crate) line_gap: i16,
    /// Maximum advance width of any glyph in the font, in design units.
    pub(crate) advance_width_max: u16,
}

impl<'a> FontTable<'a> for HheaTable {
    type Dep = ();

    fn unpack(rd: &mut Cursor<&[u8]>, _: Self::Dep) -> Result<Self, io::Error> {
        // major and minor version
        skip(rd, 4);
        let ascender = rd.read_i16::<BigEndian>()?;
        let descender = rd.read_i16::<BigEndian>()?;
        let line_gap = rd.read_i16::<BigEndian>()?;
        let advance_width_max = rd.read_u16::<BigEndian>()?;
        // the remaining fields (extent, caret slope, metric format,
        // number_of_h_metrics) are not needed here

        Ok(HheaTable {
            ascender,
            descender,
            line_gap,
            advance_width_max,
        })
    }
}
