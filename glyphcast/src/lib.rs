//! Software text rendering on top of the [`ttf`] parser: glyph outlines are
//! flattened to polygons, holes are merged into their surrounding contours,
//! the result is ear-clip triangulated and rasterized into a glyph atlas
//! that text and number drawing blit from.
//!
//! ```no_run
//! use glyphcast::{Font, Pen, SizeRange, Surface};
//!
//! # fn main() -> Result<(), glyphcast::Error> {
//! let data = std::fs::read("font.ttf").unwrap();
//! let range = SizeRange { min: 12.0, max: 64.0, step: 4.0 };
//! let mut font = Font::from_slice(&data, 24.0, range, true)?;
//! font.build_atlas(" 0123456789SCORE", true)?;
//!
//! let mut pixels = vec![0u32; 640 * 480];
//! let mut surface = Surface::new(&mut pixels, 640, 480);
//! let pen = font.draw_text(&mut surface, Pen::new(16, 16), "SCORE ", 0x00FF_FFFF);
//! font.draw_number(&mut surface, pen, 2600, 0x00FF_FFFF);
//! # Ok(())
//! # }
//! ```

mod atlas;
mod error;
mod font;
mod geom;
mod merge;
mod outline;
mod raster;
mod triangulate;

pub use crate::atlas::GlyphAtlas;
pub use crate::error::Error;
pub use crate::font::{Font, Pen, SizeRange};
pub use crate::geom::{Point, Triangle};
pub use crate::merge::merge_contours;
pub use crate::outline::flatten_glyph;
pub use crate::raster::{rasterize_glyph, Surface};
pub use crate::triangulate::Triangulation;
