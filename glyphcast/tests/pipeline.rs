//! End-to-end tests over a small hand-assembled font: 100 units per em,
//! four glyphs (empty, a square, a square with a hole, a composite square),
//! and a format 4 cmap mapping digits and 'A' to the square, 'B' to the
//! holed square and 'C' to the composite.

use byteorder::{BigEndian, WriteBytesExt};
use glyphcast::{Font, Pen, SizeRange, Surface};
use pretty_assertions::assert_eq;
use ttf::FontFile;

const UNITS_PER_EM: u16 = 100;
const ASCENDER: i16 = 80;
const DESCENDER: i16 = -20;
const ADVANCE_WIDTH_MAX: u16 = 80;

const CHARSET: &str = " 015ABC";

fn head_table() -> Vec<u8> {
    let mut data = vec![0u8; 18];
    data.write_u16::<BigEndian>(UNITS_PER_EM).unwrap();
    data.resize(50, 0);
    data.write_i16::<BigEndian>(0).unwrap(); // short loca offsets
    data.write_i16::<BigEndian>(0).unwrap(); // glyph data format
    data
}

fn hhea_table() -> Vec<u8> {
    let mut data = Vec::new();
    data.write_u32::<BigEndian>(0x00010000).unwrap();
    data.write_i16::<BigEndian>(ASCENDER).unwrap();
    data.write_i16::<BigEndian>(DESCENDER).unwrap();
    data.write_i16::<BigEndian>(0).unwrap(); // line gap
    data.write_u16::<BigEndian>(ADVANCE_WIDTH_MAX).unwrap();
    data
}

fn maxp_table() -> Vec<u8> {
    let mut data = Vec::new();
    data.write_u32::<BigEndian>(0x00010000).unwrap();
    data.write_u16::<BigEndian>(4).unwrap(); // num glyphs
    data.write_u16::<BigEndian>(8).unwrap(); // max points
    data.write_u16::<BigEndian>(2).unwrap(); // max contours
    data.write_u16::<BigEndian>(8).unwrap(); // max composite points
    data.write_u16::<BigEndian>(2).unwrap(); // max composite contours
    data.resize(data.len() + 18, 0);
    data
}

/// A simple glyph from absolute point coordinates, stored as full-width
/// deltas with every point on-curve.
fn simple_glyph(contours: &[&[(i16, i16)]]) -> Vec<u8> {
    let points: Vec<(i16, i16)> = contours.iter().flat_map(|c| c.iter().copied()).collect();
    let x_min = points.iter().map(|p| p.0).min().unwrap();
    let y_min = points.iter().map(|p| p.1).min().unwrap();
    let x_max = points.iter().map(|p| p.0).max().unwrap();
    let y_max = points.iter().map(|p| p.1).max().unwrap();

    let mut data = Vec::new();
    data.write_i16::<BigEndian>(contours.len() as i16).unwrap();
    for v in &[x_min, y_min, x_max, y_max] {
        data.write_i16::<BigEndian>(*v).unwrap();
    }
    let mut end = 0u16;
    for contour in contours {
        end += contour.len() as u16;
        data.write_u16::<BigEndian>(end - 1).unwrap();
    }
    data.write_u16::<BigEndian>(0).unwrap(); // instruction length
    for _ in &points {
        data.push(0x01); // on-curve, full-width x and y deltas
    }
    let mut prev = 0i16;
    for p in &points {
        data.write_i16::<BigEndian>(p.0 - prev).unwrap();
        prev = p.0;
    }
    let mut prev = 0i16;
    for p in &points {
        data.write_i16::<BigEndian>(p.1 - prev).unwrap();
        prev = p.1;
    }
    data
}

/// A composite glyph with a single translated component.
fn composite_glyph(component: u16, dx: i16, dy: i16, bbox: [i16; 4]) -> Vec<u8> {
    let mut data = Vec::new();
    data.write_i16::<BigEndian>(-1).unwrap();
    for v in &bbox {
        data.write_i16::<BigEndian>(*v).unwrap();
    }
    data.write_u16::<BigEndian>(0x0001).unwrap(); // args are words
    data.write_u16::<BigEndian>(component).unwrap();
    data.write_i16::<BigEndian>(dx).unwrap();
    data.write_i16::<BigEndian>(dy).unwrap();
    data
}

const SQUARE: [(i16, i16); 4] = [(10, 10), (10, 70), (70, 70), (70, 10)];
const HOLE: [(i16, i16); 4] = [(30, 30), (50, 30), (50, 50), (30, 50)];

fn glyf_and_loca_tables(notdef: Option<Vec<u8>>) -> (Vec<u8>, Vec<u8>) {
    let glyphs: [Option<Vec<u8>>; 4] = [
        notdef,
        Some(simple_glyph(&[&SQUARE])),
        Some(simple_glyph(&[&SQUARE, &HOLE])),
        Some(composite_glyph(1, 5, 5, [15, 15, 75, 75])),
    ];

    let mut glyf = Vec::new();
    let mut offsets = vec![0u16];
    for glyph in &glyphs {
        if let Some(glyph) = glyph {
            glyf.extend_from_slice(glyph);
        }
        assert_eq!(glyf.len() % 2, 0, "glyph records must stay word-aligned");
        offsets.push((glyf.len() / 2) as u16);
    }

    let mut loca = Vec::new();
    for offset in offsets {
        loca.write_u16::<BigEndian>(offset).unwrap();
    }
    (glyf, loca)
}

fn cmap_table() -> Vec<u8> {
    // segment 0: '0'..='9' through the glyph id array, all to glyph 1
    // segment 1: 'A'..='C' via delta to glyphs 1..=3
    // segment 2: the required 0xFFFF terminator
    let end_code: [u16; 3] = [57, 67, 0xFFFF];
    let start_code: [u16; 3] = [48, 65, 0xFFFF];
    let id_delta: [u16; 3] = [0, 65472, 1];
    let id_range_offset: [u16; 3] = [6, 0, 0];
    let glyph_ids = [1u16; 10];

    let length = 16 + 8 * end_code.len() + 2 * glyph_ids.len();

    let mut data = Vec::new();
    data.write_u16::<BigEndian>(0).unwrap(); // version
    data.write_u16::<BigEndian>(1).unwrap(); // num tables
    data.write_u16::<BigEndian>(0).unwrap(); // platform id (unicode)
    data.write_u16::<BigEndian>(3).unwrap(); // encoding id
    data.write_u32::<BigEndian>(12).unwrap(); // subtable offset

    data.write_u16::<BigEndian>(4).unwrap(); // format
    data.write_u16::<BigEndian>(length as u16).unwrap();
    data.write_u16::<BigEndian>(0).unwrap(); // language
    data.write_u16::<BigEndian>((end_code.len() * 2) as u16).unwrap();
    data.write_u16::<BigEndian>(0).unwrap(); // search range
    data.write_u16::<BigEndian>(0).unwrap(); // entry selector
    data.write_u16::<BigEndian>(0).unwrap(); // range shift
    for v in &end_code {
        data.write_u16::<BigEndian>(*v).unwrap();
    }
    data.write_u16::<BigEndian>(0).unwrap(); // reserved pad
    for v in &start_code {
        data.write_u16::<BigEndian>(*v).unwrap();
    }
    for v in &id_delta {
        data.write_u16::<BigEndian>(*v).unwrap();
    }
    for v in &id_range_offset {
        data.write_u16::<BigEndian>(*v).unwrap();
    }
    for v in &glyph_ids {
        data.write_u16::<BigEndian>(*v).unwrap();
    }
    data
}

fn font_data() -> Vec<u8> {
    font_data_with_notdef(None)
}

fn font_data_with_notdef(notdef: Option<Vec<u8>>) -> Vec<u8> {
    let (glyf, loca) = glyf_and_loca_tables(notdef);
    let tables: [(&[u8; 4], Vec<u8>); 6] = [
        (b"head", head_table()),
        (b"hhea", hhea_table()),
        (b"maxp", maxp_table()),
        (b"loca", loca),
        (b"glyf", glyf),
        (b"cmap", cmap_table()),
    ];

    let mut data = Vec::new();
    data.write_u32::<BigEndian>(0x00010000).unwrap();
    data.write_u16::<BigEndian>(tables.len() as u16).unwrap();
    data.write_u16::<BigEndian>(0).unwrap(); // search range
    data.write_u16::<BigEndian>(0).unwrap(); // entry selector
    data.write_u16::<BigEndian>(0).unwrap(); // range shift

    let mut offset = 12 + 16 * tables.len() as u32;
    for (tag, table) in &tables {
        data.extend_from_slice(*tag);
        data.write_u32::<BigEndian>(0).unwrap(); // check sum
        data.write_u32::<BigEndian>(offset).unwrap();
        data.write_u32::<BigEndian>(table.len() as u32).unwrap();
        offset += table.len() as u32;
    }
    for (_, table) in &tables {
        data.extend_from_slice(table);
    }
    data
}

fn test_font(size: f32) -> Font {
    let range = SizeRange {
        min: 40.0,
        max: 120.0,
        step: 10.0,
    };
    Font::from_slice(font_data(), size, range, false).unwrap()
}

#[test]
fn font_file_exposes_metrics() {
    let font = FontFile::from_slice(font_data()).unwrap();
    assert_eq!(font.units_per_em(), 100);
    assert_eq!(font.ascender(), 80);
    assert_eq!(font.descender(), -20);
    assert_eq!(font.advance_width_max(), 80);
    assert_eq!(font.line_gap(), 0);
    assert_eq!(font.max_points(), 8);
    assert_eq!(font.max_contours(), 2);
    assert_eq!(font.max_composite_points(), 8);
    assert_eq!(font.max_composite_contours(), 2);
}

#[test]
fn characters_map_to_expected_glyphs() {
    let font = FontFile::from_slice(font_data()).unwrap();
    // all digits share the square glyph via the glyph id array
    for c in "0123456789".chars() {
        assert_eq!(font.glyph_id(c), 1, "for {:?}", c);
    }
    // letters go through the segment delta
    assert_eq!(font.glyph_id('A'), 1);
    assert_eq!(font.glyph_id('B'), 2);
    assert_eq!(font.glyph_id('C'), 3);
    // unmapped characters fall back to the missing glyph
    assert_eq!(font.glyph_id(' '), 0);
    assert_eq!(font.glyph_id('😀'), 0);
}

#[test]
fn outlines_decode_and_composites_translate() {
    let font = FontFile::from_slice(font_data()).unwrap();

    assert_eq!(font.outline(0).unwrap(), None);

    let square = font.outline(1).unwrap().unwrap();
    assert_eq!(square.end_point_indices, vec![3]);
    assert_eq!(square.points.len(), 4);
    assert_eq!((square.points[0].x, square.points[0].y), (10.0, 10.0));
    assert_eq!((square.points[2].x, square.points[2].y), (70.0, 70.0));

    let holed = font.outline(2).unwrap().unwrap();
    assert_eq!(holed.end_point_indices, vec![3, 7]);
    assert_eq!((holed.points[4].x, holed.points[4].y), (30.0, 30.0));

    let composite = font.outline(3).unwrap().unwrap();
    assert_eq!(composite.points.len(), 0);
    assert_eq!(composite.components.len(), 1);
    let child = &composite.components[0];
    assert_eq!((child.points[0].x, child.points[0].y), (15.0, 15.0));
    assert_eq!((child.points[2].x, child.points[2].y), (75.0, 75.0));
}

fn count_cell_pixels(font: &Font, cell: usize) -> usize {
    let atlas = font.atlas().unwrap();
    let (w, h) = (atlas.cell_width(), atlas.cell_height());
    let width = w * CHARSET.chars().count() as i32;
    let mut count = 0;
    for y in 0..h {
        for x in 0..w {
            if atlas.pixels()[(y * width + cell as i32 * w + x) as usize] != 0 {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn atlas_rasterizes_one_cell_per_character() {
    // at 100px the design units map 1:1 to pixels
    let mut font = test_font(100.0);
    font.build_atlas(CHARSET, true).unwrap();

    let atlas = font.atlas().unwrap();
    assert_eq!(atlas.cell_width(), 80);
    assert_eq!(atlas.cell_height(), 100);

    // the space cell stays empty
    assert_eq!(count_cell_pixels(&font, 0), 0);

    // 'A' covers its 60x60 design-unit square
    let square = count_cell_pixels(&font, 4);
    assert!((3500..3700).contains(&square), "covered {}", square);

    // 'B' is the same square minus its 20x20 hole
    let holed = count_cell_pixels(&font, 5);
    assert!((3100..3300).contains(&holed), "covered {}", holed);
    // a pixel inside the hole stays empty (hole center plus baseline offset)
    let width = atlas.cell_width() * CHARSET.chars().count() as i32;
    let hole_center = atlas.pixels()[(60 * width + 5 * 80 + 40) as usize];
    assert_eq!(hole_center, 0);

    // 'C' renders its translated component, the same square nudged by (5,5)
    let composite = count_cell_pixels(&font, 6);
    assert!((3500..3700).contains(&composite), "covered {}", composite);
}

#[test]
fn draw_number_matches_equivalent_text() {
    let mut font = test_font(100.0);
    font.build_atlas(CHARSET, true).unwrap();

    let mut text_pixels = vec![0u32; 400 * 120];
    let mut text_surface = Surface::new(&mut text_pixels, 400, 120);
    let text_pen = font.draw_text(&mut text_surface, Pen::new(10, 10), "105", 0x00FF_0000);

    let mut number_pixels = vec![0u32; 400 * 120];
    let mut number_surface = Surface::new(&mut number_pixels, 400, 120);
    let number_pen = font.draw_number(&mut number_surface, Pen::new(10, 10), 105, 0x00FF_0000);

    assert_eq!(text_pen, Pen::new(10 + 3 * 80, 10));
    assert_eq!(number_pen, text_pen);
    assert_eq!(number_pixels, text_pixels);
}

#[test]
fn draw_number_zero_draws_single_digit() {
    let mut font = test_font(100.0);
    font.build_atlas(CHARSET, true).unwrap();

    let mut pixels = vec![0u32; 120 * 120];
    let mut surface = Surface::new(&mut pixels, 120, 120);
    let pen = font.draw_number(&mut surface, Pen::new(10, 10), 0, 0x00FF_FFFF);
    assert_eq!(pen, Pen::new(90, 10));
    assert!(pixels.iter().any(|&p| p != 0));
}

#[test]
fn space_advances_without_marking_pixels() {
    let mut font = test_font(100.0);
    font.build_atlas(CHARSET, true).unwrap();

    let mut pixels = vec![0u32; 200 * 120];
    let mut surface = Surface::new(&mut pixels, 200, 120);
    let pen = font.draw_text(&mut surface, Pen::new(0, 10), " A", 0x00FF_FFFF);
    assert_eq!(pen, Pen::new(160, 10));

    // nothing lands in the first cell
    for y in 0..120 {
        for x in 0..80 {
            assert_eq!(pixels[(y * 200 + x) as usize], 0, "at ({}, {})", x, y);
        }
    }
    assert!(pixels.iter().any(|&p| p != 0));
}

#[test]
fn space_cell_stays_empty_with_notdef_outline() {
    // the space maps to glyph 0, which carries a box outline here; the
    // atlas must still leave the space cell blank
    let data = font_data_with_notdef(Some(simple_glyph(&[&SQUARE])));
    let range = SizeRange {
        min: 40.0,
        max: 120.0,
        step: 10.0,
    };
    let mut font = Font::from_slice(data, 100.0, range, false).unwrap();
    font.build_atlas(CHARSET, true).unwrap();
    assert_eq!(count_cell_pixels(&font, 0), 0);
}

#[test]
fn unknown_characters_are_skipped() {
    let mut font = test_font(100.0);
    font.build_atlas(CHARSET, true).unwrap();

    let mut pixels = vec![0u32; 200 * 120];
    let mut surface = Surface::new(&mut pixels, 200, 120);
    let pen = font.draw_text(&mut surface, Pen::new(0, 10), "zz", 0x00FF_FFFF);
    assert_eq!(pen, Pen::new(0, 10));
    assert_eq!(pixels, vec![0u32; 200 * 120]);
}

#[test]
fn set_size_invalidates_atlas() {
    let mut font = test_font(100.0);
    font.build_atlas(CHARSET, true).unwrap();
    assert!(font.atlas().is_some());

    font.set_size(50.0);
    assert!(font.atlas().is_none());

    // without an atlas drawing is a no-op
    let mut pixels = vec![0u32; 100 * 100];
    let mut surface = Surface::new(&mut pixels, 100, 100);
    let pen = font.draw_text(&mut surface, Pen::new(10, 10), "A", 0x00FF_FFFF);
    assert_eq!(pen, Pen::new(10, 10));
    assert_eq!(pixels, vec![0u32; 100 * 100]);
}

#[test]
fn size_steps_clamp_to_range() {
    let mut font = test_font(120.0);
    font.increase_size();
    assert_eq!(font.size(), 120.0);

    font.decrease_size();
    assert_eq!(font.size(), 110.0);

    let mut font = test_font(40.0);
    font.decrease_size();
    assert_eq!(font.size(), 40.0);
    font.increase_size();
    assert_eq!(font.size(), 50.0);
}

#[test]
fn flipped_drawing_covers_as_many_pixels() {
    let data = font_data();
    let range = SizeRange {
        min: 40.0,
        max: 120.0,
        step: 10.0,
    };

    let mut upright = Font::from_slice(&data, 100.0, range, false).unwrap();
    upright.build_atlas(CHARSET, true).unwrap();
    let mut flipped = Font::from_slice(&data, 100.0, range, true).unwrap();
    flipped.build_atlas(CHARSET, true).unwrap();

    let mut up_pixels = vec![0u32; 120 * 240];
    let mut up_surface = Surface::new(&mut up_pixels, 120, 240);
    upright.draw_text(&mut up_surface, Pen::new(10, 110), "A", 0x00FF_FFFF);

    let mut flip_pixels = vec![0u32; 120 * 240];
    let mut flip_surface = Surface::new(&mut flip_pixels, 120, 240);
    flipped.draw_text(&mut flip_surface, Pen::new(10, 110), "A", 0x00FF_FFFF);

    let up_count = up_pixels.iter().filter(|&&p| p != 0).count();
    let flip_count = flip_pixels.iter().filter(|&&p| p != 0).count();
    assert!(up_count > 0);
    assert_eq!(up_count, flip_count);
}
