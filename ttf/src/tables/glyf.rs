use std::io::{self, Cursor};

use super::loca::LocaTable;
use super::{skip, FontTable};
use byteorder::{BigEndian, ReadBytesExt};

// simple glyph flags
const ON_CURVE: u8 = 0x01;
const X_SHORT: u8 = 0x02;
const Y_SHORT: u8 = 0x04;
const REPEAT: u8 = 0x08;
const X_SAME_OR_POSITIVE: u8 = 0x10;
const Y_SAME_OR_POSITIVE: u8 = 0x20;

// composite glyph flags
const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const WE_HAVE_A_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;
const WE_HAVE_INSTRUCTIONS: u16 = 0x0100;

/// Upper bound on component nesting before a composite glyph is rejected as
/// malformed (or cyclic).
const MAX_COMPONENT_DEPTH: usize = 8;

/// Glyph data. Glyph records are sliced along the `loca` offsets up front;
/// outlines are decoded on demand.
/// See spec:
/// - https://docs.microsoft.com/en-us/typography/opentype/spec/glyf
/// - https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6glyf.html
#[derive(Debug, PartialEq)]
pub struct GlyfTable {
    /// One record per glyph id; `None` for glyphs without an outline.
    glyphs: Vec<Option<Vec<u8>>>,
}

/// A decoded glyph outline in design units. A simple glyph carries points and
/// contour end indices; a composite glyph carries already-translated child
/// glyphs instead.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Glyph {
    /// Index of the last point of each contour, ascending.
    pub end_point_indices: Vec<u16>,
    pub points: Vec<GlyphPoint>,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub components: Vec<Glyph>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPoint {
    pub x: f32,
    pub y: f32,
    /// Off-curve points are quadratic bezier control points.
    pub on_curve: bool,
}

impl Glyph {
    /// Number of contours including those of nested components.
    pub fn contour_count(&self) -> usize {
        self.end_point_indices.len()
            + self
                .components
                .iter()
                .map(|c| c.contour_count())
                .sum::<usize>()
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        for point in &mut self.points {
            point.x += dx;
            point.y += dy;
        }
        for component in &mut self.components {
            component.translate(dx, dy);
        }
    }
}

impl GlyfTable {
    /// Decodes the outline of the given glyph. Returns `Ok(None)` for glyphs
    /// without one (e.g. the space character).
    pub fn outline(&self, glyph_id: u16) -> Result<Option<Glyph>, io::Error> {
        self.outline_at(glyph_id, 0)
    }

    fn outline_at(&self, glyph_id: u16, depth: usize) -> Result<Option<Glyph>, io::Error> {
        if depth > MAX_COMPONENT_DEPTH {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "composite glyph nesting too deep",
            ));
        }

        let record = match self.glyphs.get(usize::from(glyph_id)) {
            Some(Some(record)) => record,
            Some(None) => return Ok(None),
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("glyph id {} out of range", glyph_id),
                ));
            }
        };

        let mut rd = Cursor::new(&record[..]);
        let number_of_contours = rd.read_i16::<BigEndian>()?;
        let mut glyph = Glyph {
            x_min: rd.read_i16::<BigEndian>()?,
            y_min: rd.read_i16::<BigEndian>()?,
            x_max: rd.read_i16::<BigEndian>()?,
            y_max: rd.read_i16::<BigEndian>()?,
            ..Default::default()
        };

        if number_of_contours >= 0 {
            read_simple(&mut rd, number_of_contours as usize, &mut glyph)?;
        } else {
            self.read_composite(&mut rd, depth, &mut glyph)?;
        }

        Ok(Some(glyph))
    }

    fn read_composite(
        &self,
        rd: &mut Cursor<&[u8]>,
        depth: usize,
        glyph: &mut Glyph,
    ) -> Result<(), io::Error> {
        loop {
            let flags = rd.read_u16::<BigEndian>()?;
            let glyph_index = rd.read_u16::<BigEndian>()?;

            let (dx, dy) = if flags & ARG_1_AND_2_ARE_WORDS != 0 {
                (
                    f32::from(rd.read_i16::<BigEndian>()?),
                    f32::from(rd.read_i16::<BigEndian>()?),
                )
            } else {
                (f32::from(rd.read_i8()?), f32::from(rd.read_i8()?))
            };

            // scale transforms are parsed past but not applied
            if flags & WE_HAVE_A_SCALE != 0 {
                skip(rd, 2);
            } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
                skip(rd, 4);
            } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
                skip(rd, 8);
            }

            // hinting instructions have no effect on the outline
            if flags & WE_HAVE_INSTRUCTIONS != 0 {
                let instruction_length = rd.read_u16::<BigEndian>()?;
                skip(rd, u64::from(instruction_length));
            }

            if let Some(mut component) = self.outline_at(glyph_index, depth + 1)? {
                component.translate(dx, dy);
                glyph.components.push(component);
            }

            if flags & MORE_COMPONENTS == 0 {
                break;
            }
        }
        Ok(())
    }
}

fn read_simple(
    rd: &mut Cursor<&[u8]>,
    contour_count: usize,
    glyph: &mut Glyph,
) -> Result<(), io::Error> {
    glyph.end_point_indices.reserve(contour_count);
    for _ in 0..contour_count {
        glyph.end_point_indices.push(rd.read_u16::<BigEndian>()?);
    }

    let instruction_length = rd.read_u16::<BigEndian>()?;
    skip(rd, u64::from(instruction_length));

    let point_count = match glyph.end_point_indices.last() {
        Some(last) => usize::from(*last) + 1,
        None => return Ok(()),
    };

    let mut flags = Vec::with_capacity(point_count);
    while flags.len() < point_count {
        let flag = rd.read_u8()?;
        flags.push(flag);
        if flag & REPEAT != 0 {
            let count = rd.read_u8()?;
            for _ in 0..count {
                flags.push(flag);
            }
        }
    }
    // a malformed repeat count could overshoot
    flags.truncate(point_count);

    // coordinates are stored as deltas, all x values before all y values
    let mut xs = Vec::with_capacity(point_count);
    let mut x = 0i32;
    for flag in &flags {
        if flag & X_SHORT != 0 {
            let delta = i32::from(rd.read_u8()?);
            x += if flag & X_SAME_OR_POSITIVE != 0 {
                delta
            } else {
                -delta
            };
        } else if flag & X_SAME_OR_POSITIVE == 0 {
            x += i32::from(rd.read_i16::<BigEndian>()?);
        }
        xs.push(x);
    }

    glyph.points.reserve(point_count);
    let mut y = 0i32;
    for (flag, x) in flags.iter().zip(xs) {
        if flag & Y_SHORT != 0 {
            let delta = i32::from(rd.read_u8()?);
            y += if flag & Y_SAME_OR_POSITIVE != 0 {
                delta
            } else {
                -delta
            };
        } else if flag & Y_SAME_OR_POSITIVE == 0 {
            y += i32::from(rd.read_i16::<BigEndian>()?);
        }
        glyph.points.push(GlyphPoint {
            x: x as f32,
            y: y as f32,
            on_curve: flag & ON_CURVE != 0,
        });
    }

    Ok(())
}

impl<'a> FontTable<'a> for GlyfTable {
    type Dep = &'a LocaTable;

    fn unpack(rd: &mut Cursor<&[u8]>, loca: Self::Dep) -> Result<Self, io::Error> {
        let data = *rd.get_ref();
        let mut glyphs = Vec::with_capacity(loca.offsets.len().saturating_sub(1));
        for window in loca.offsets.windows(2) {
            let (start, end) = (window[0] as usize, window[1] as usize);
            if start == end {
                glyphs.push(None);
                continue;
            }
            let record = data.get(start..end).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "glyf record out of bounds")
            })?;
            glyphs.push(Some(record.to_vec()));
        }
        Ok(GlyfTable { glyphs })
    }
}
