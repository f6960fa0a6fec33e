use crate::atlas::GlyphAtlas;
use crate::error::Error;
use crate::raster::Surface;
use ttf::FontFile;

/// Bounds and step width for interactive font size changes, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

/// Text cursor position in surface pixels. `x` advances one atlas cell per
/// drawn character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub x: i32,
    pub y: i32,
}

impl Pen {
    pub fn new(x: i32, y: i32) -> Pen {
        Pen { x, y }
    }
}

/// A sized font plus its rasterized glyph atlas.
///
/// Drawing goes through the atlas: [`Font::build_atlas`] rasterizes a
/// character set once at the current size, afterwards [`Font::draw_text`]
/// blits cells. Changing the size invalidates the atlas, so nothing is drawn
/// until it is rebuilt.
pub struct Font {
    file: FontFile,
    size: f32,
    range: SizeRange,
    flip_y: bool,
    atlas: Option<GlyphAtlas>,
}

impl Font {
    /// Parses a font from raw file bytes. `flip_y` flips all drawn glyphs
    /// vertically, for y-down render targets.
    pub fn from_slice(
        data: impl AsRef<[u8]>,
        size: f32,
        range: SizeRange,
        flip_y: bool,
    ) -> Result<Font, Error> {
        let file = FontFile::from_slice(data)?;
        Ok(Font {
            file,
            size,
            range,
            flip_y,
            atlas: None,
        })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Sets the size in pixels and drops the atlas, which is rasterized for
    /// one specific size.
    pub fn set_size(&mut self, size: f32) {
        self.size = size;
        self.atlas = None;
    }

    pub fn increase_size(&mut self) {
        if self.size >= self.range.max {
            return;
        }
        self.set_size(self.size + self.range.step);
    }

    pub fn decrease_size(&mut self) {
        if self.size <= self.range.min {
            return;
        }
        self.set_size(self.size - self.range.step);
    }

    /// Conversion factor from design units to pixels at the current size.
    pub fn scale(&self) -> f32 {
        self.size / f32::from(self.file.units_per_em())
    }

    /// Rasterizes the atlas for the given character set at the current size.
    pub fn build_atlas(&mut self, charset: &str, anti_alias: bool) -> Result<(), Error> {
        self.atlas = Some(GlyphAtlas::build(
            &self.file,
            charset,
            self.scale(),
            anti_alias,
        )?);
        Ok(())
    }

    pub fn atlas(&self) -> Option<&GlyphAtlas> {
        self.atlas.as_ref()
    }

    /// Blits one character cell and advances the pen by one cell width.
    /// Characters missing from the atlas (or the whole atlas missing) leave
    /// the pen untouched.
    pub fn draw_char(&self, surface: &mut Surface, pen: Pen, c: char, color: u32) -> Pen {
        let atlas = match &self.atlas {
            Some(atlas) => atlas,
            None => return pen,
        };
        let cell = match atlas.cell_index(c) {
            Some(cell) => cell,
            None => return pen,
        };
        atlas.blit(surface, cell, pen, color, self.flip_y);
        Pen::new(pen.x + atlas.cell_width(), pen.y)
    }

    pub fn draw_text(&self, surface: &mut Surface, pen: Pen, text: &str, color: u32) -> Pen {
        let mut pen = pen;
        for c in text.chars() {
            pen = self.draw_char(surface, pen, c, color);
        }
        pen
    }

    /// Draws a non-negative number in decimal, most significant digit first.
    pub fn draw_number(&self, surface: &mut Surface, pen: Pen, value: u32, color: u32) -> Pen {
        if value == 0 {
            return self.draw_char(surface, pen, '0', color);
        }

        let mut divisor = 1;
        while value / divisor >= 10 {
            divisor *= 10;
        }

        let mut pen = pen;
        let mut remainder = value;
        while divisor > 0 {
            let digit = remainder / divisor;
            remainder -= digit * divisor;
            let c = char::from(b'0' + digit as u8);
            pen = self.draw_char(surface, pen, c, color);
            divisor /= 10;
        }
        pen
    }
}
