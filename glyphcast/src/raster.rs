//! Triangle rasterization onto a 32-bit pixel buffer, either hard-edged or
//! with 4x supersampled anti-aliasing.
//!
//! Rasterization writes coverage: hard mode stores the given color verbatim,
//! anti-aliased mode stores per-pixel coverage in the alpha byte over white.
//! Tinting with a draw color happens later, when a glyph cell is blended
//! onto its destination.

use crate::geom::{Extents, Point, Triangle};
use crate::merge::merge_contours;
use crate::outline::flatten_glyph;
use crate::triangulate::Triangulation;
use ttf::Glyph;

/// Sub-pixel sample positions used in anti-aliased mode.
const SAMPLE_OFFSETS: [(f32, f32); 4] = [(0.25, 0.25), (0.50, 0.25), (0.25, 0.50), (0.75, 0.75)];
/// Alpha contributed by each covered sample; four samples land just below
/// fully opaque.
const SAMPLE_ALPHA: u32 = 0x3F00_0000;

/// A mutable view over an `0xAARRGGBB` pixel buffer in row-major order.
pub struct Surface<'a> {
    pixels: &'a mut [u32],
    width: i32,
    height: i32,
}

impl<'a> Surface<'a> {
    pub fn new(pixels: &'a mut [u32], width: i32, height: i32) -> Surface<'a> {
        assert_eq!(pixels.len(), (width * height) as usize);
        Surface {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        self.pixels
    }

    /// Stores a pixel value as-is. Out-of-bounds coordinates are ignored.
    fn set(&mut self, x: i32, y: i32, value: u32) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(y * self.width + x) as usize] = value;
    }

    /// Mixes `draw` over the pixel at (x, y), weighted by the alpha byte of
    /// `source`. The stored result keeps the color channels only.
    pub(crate) fn blend(&mut self, x: i32, y: i32, source: u32, draw: u32) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) as usize;
        let dst = self.pixels[idx];
        let alpha = (source >> 24) as f32 / 255.0;
        let channel = |shift: u32| {
            let d = ((dst >> shift) & 0xFF) as f32;
            let s = ((draw >> shift) & 0xFF) as f32;
            ((d * (1.0 - alpha) + s * alpha) as u32) << shift
        };
        self.pixels[idx] = channel(16) | channel(8) | channel(0);
    }

    pub fn draw_triangles(&mut self, triangles: &[Triangle], color: u32, anti_alias: bool) {
        if anti_alias {
            self.draw_triangles_smooth(triangles);
        } else {
            for triangle in triangles {
                self.draw_triangle_hard(triangle, color);
            }
        }
    }

    fn draw_triangle_hard(&mut self, triangle: &Triangle, color: u32) {
        let extents = Extents::of(triangle);
        for y in extents.min_y.floor() as i32..extents.max_y.ceil() as i32 {
            for x in extents.min_x.floor() as i32..extents.max_x.ceil() as i32 {
                if triangle.contains(Point::new(x as f32, y as f32)) {
                    self.set(x, y, color);
                }
            }
        }
    }

    fn draw_triangles_smooth(&mut self, triangles: &[Triangle]) {
        let extents = match triangles
            .iter()
            .map(Extents::of)
            .fold(None, |acc: Option<Extents>, e| match acc {
                Some(acc) => Some(acc.union(e)),
                None => Some(e),
            }) {
            Some(extents) => extents,
            None => return,
        };

        for y in extents.min_y.floor() as i32..=extents.max_y.ceil() as i32 {
            for x in extents.min_x.floor() as i32..=extents.max_x.ceil() as i32 {
                let mut coverage = 0u32;
                for (dx, dy) in &SAMPLE_OFFSETS {
                    let sample = Point::new(x as f32 + dx, y as f32 + dy);
                    if triangles.iter().any(|t| t.contains(sample)) {
                        coverage += SAMPLE_ALPHA;
                    }
                }
                if coverage > 0 {
                    self.set(x, y, coverage + 0x01FF_FFFF);
                }
            }
        }
    }
}

/// Runs the full pipeline for one glyph: flatten its contours (components
/// included), merge holes, triangulate, then scale, position and draw the
/// triangles.
pub fn rasterize_glyph(
    surface: &mut Surface,
    glyph: &Glyph,
    scale: f32,
    offset: Point,
    color: u32,
    anti_alias: bool,
) {
    let contours = merge_contours(flatten_glyph(glyph));
    let triangles: Vec<Triangle> = Triangulation::new(&contours)
        .map(|t| t.scaled(scale).translated(offset.x, offset.y))
        .collect();
    surface.draw_triangles(&triangles, color, anti_alias);
}
