//! A pre-rasterized strip of glyph cells. Every cell is sized for the widest
//! glyph and the full ascender-to-descender height, so drawing text is a
//! fixed-advance blit per character.

use crate::error::Error;
use crate::font::Pen;
use crate::geom::Point;
use crate::raster::{rasterize_glyph, Surface};
use ttf::FontFile;

pub struct GlyphAtlas {
    pixels: Vec<u32>,
    width: i32,
    height: i32,
    cell_width: i32,
    cell_height: i32,
    /// Characters in cell order.
    chars: Vec<char>,
}

impl GlyphAtlas {
    /// Rasterizes one cell per charset character at the given scale. The
    /// cells hold white coverage pixels; tinting happens when they are
    /// blitted. The space character keeps an empty cell without any glyph
    /// lookup, so it stays blank even when the font maps it to a visible
    /// glyph (e.g. a .notdef box).
    pub(crate) fn build(
        file: &FontFile,
        charset: &str,
        scale: f32,
        anti_alias: bool,
    ) -> Result<GlyphAtlas, Error> {
        let chars: Vec<char> = charset.chars().collect();
        let cell_width = (f32::from(file.advance_width_max()) * scale).ceil() as i32;
        let cell_height =
            ((f32::from(file.ascender()) - f32::from(file.descender())) * scale).ceil() as i32;
        // the baseline sits descender-high above the cell bottom
        let baseline = (-f32::from(file.descender()) * scale) as i32;

        let width = cell_width * chars.len() as i32;
        let height = cell_height;
        let mut pixels = vec![0u32; (width * height) as usize];

        let mut surface = Surface::new(&mut pixels, width, height);
        for (i, &c) in chars.iter().enumerate() {
            if c == ' ' {
                continue;
            }
            let glyph_id = file.glyph_id(c);
            if let Some(glyph) = file.outline(glyph_id)? {
                let offset = Point::new((i as i32 * cell_width) as f32, baseline as f32);
                rasterize_glyph(&mut surface, &glyph, scale, offset, 0xFFFF_FFFF, anti_alias);
            }
        }

        Ok(GlyphAtlas {
            pixels,
            width,
            height,
            cell_width,
            cell_height,
            chars,
        })
    }

    pub fn cell_width(&self) -> i32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> i32 {
        self.cell_height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub(crate) fn cell_index(&self, c: char) -> Option<usize> {
        self.chars.iter().position(|&ch| ch == c)
    }

    /// Blends one cell onto the target surface at the pen position, tinted
    /// with `color`. With `flip_y` the cell is mirrored vertically for
    /// y-down targets.
    pub(crate) fn blit(&self, surface: &mut Surface, cell: usize, pen: Pen, color: u32, flip_y: bool) {
        let cell_x = cell as i32 * self.cell_width;
        for y in 0..self.height {
            for x in 0..self.cell_width {
                let pixel = self.pixels[(y * self.width + cell_x + x) as usize];
                if pixel == 0 {
                    continue;
                }
                let dest_y = if flip_y {
                    pen.y - y + self.cell_height
                } else {
                    pen.y + y
                };
                surface.blend(pen.x + x, dest_y, pixel, color);
            }
        }
    }
}
