// SPDX-License-Identifier: MIT
//
// Property tests for grids and layers.
//
// 1. Packing into a layer and reading back is lossless for anything the
//    packed widths can hold.
// 2. Resizing to the current size changes nothing.
// 3. Copying a buffer twice is the same as copying it once.
// 4. The six vertices of every tile always agree.
// 5. Diffing a grid against itself finds nothing.

use std::rc::Rc;

use proptest::prelude::*;
use tile_color::Color;
use tile_grid::{DataBuffer, Glyph, HeadlessSurface, Layer, Mixer, VERTICES_PER_TILE, diff};

// ── Helpers ─────────────────────────────────────────────────────────────

/// A cell that survives packing: atlas index plus 12-bit colors.
fn packable_cell() -> impl Strategy<Value = Mixer> + Clone {
    (any::<u8>(), 0i64..=0xfff, 0i64..=0xfff).prop_map(|(g, fg, bg)| Mixer {
        ch: Some(Glyph::Index(g)),
        fg: Color::from_int(fg, false).unwrap(),
        bg: Color::from_int(bg, false).unwrap(),
    })
}

/// Any cell, including unset glyphs, characters and off-grid colors.
fn any_cell() -> impl Strategy<Value = Mixer> + Clone {
    let glyph = prop_oneof![
        Just(None),
        any::<u8>().prop_map(|i| Some(Glyph::Index(i))),
        proptest::char::range(' ', '~').prop_map(|c| Some(Glyph::Char(c))),
    ];
    let color = prop_oneof![
        Just(Color::NULL),
        (0.0f32..=100.0, 0.0f32..=100.0, 0.0f32..=100.0)
            .prop_map(|(r, g, b)| Color::rgb(r, g, b)),
    ];
    (glyph, color.clone(), color).prop_map(|(ch, fg, bg)| Mixer { ch, fg, bg })
}

fn grid_of(
    cell: impl Strategy<Value = Mixer> + Clone,
) -> impl Strategy<Value = DataBuffer> {
    (1u16..=8, 1u16..=8).prop_flat_map(move |(w, h)| {
        prop::collection::vec(cell.clone(), usize::from(w) * usize::from(h)).prop_map(
            move |cells| {
                let mut buf = DataBuffer::new(w, h);
                buf.cells_mut().copy_from_slice(&cells);
                buf
            },
        )
    })
}

fn layer_for(buf: &DataBuffer) -> Layer {
    Layer::new(buf.width(), buf.height(), Rc::new(HeadlessSurface::default()))
}

// ── Layer round trip ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn pack_then_read_back_is_lossless(buf in grid_of(packable_cell())) {
        let mut layer = layer_for(&buf);
        layer.copy(&buf).unwrap();

        let mut back = DataBuffer::new(1, 1);
        layer.copy_to(&mut back);
        prop_assert_eq!(back, buf);
    }

    #[test]
    fn tile_vertices_agree(buf in grid_of(any_cell())) {
        let mut layer = layer_for(&buf);
        layer.copy(&buf).unwrap();

        for tile in 0..layer.tile_count() {
            let v = tile * VERTICES_PER_TILE;
            let range = v..v + VERTICES_PER_TILE;
            prop_assert!(layer.glyphs()[range.clone()].iter().all(|&g| g == layer.glyphs()[v]));
            prop_assert!(layer.fg()[range.clone()].iter().all(|&c| c == layer.fg()[v]));
            prop_assert!(layer.bg()[range].iter().all(|&c| c == layer.bg()[v]));
        }
    }

    #[test]
    fn packed_colors_match_quantization(buf in grid_of(any_cell())) {
        let mut layer = layer_for(&buf);
        layer.copy(&buf).unwrap();

        for (i, cell) in buf.cells().iter().enumerate() {
            let (_, fg, bg) = layer.tile(i).unwrap();
            prop_assert_eq!(u32::from(fg), cell.fg.to_int());
            prop_assert_eq!(u32::from(bg), cell.bg.to_int());
        }
    }
}

// ── Buffer operations ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn same_size_resize_is_noop(buf in grid_of(any_cell())) {
        let mut resized = buf.clone();
        resized.resize(buf.width(), buf.height());
        resized.resize(buf.width(), buf.height());
        prop_assert_eq!(resized, buf);
    }

    #[test]
    fn copy_is_idempotent(src in grid_of(any_cell()), w in 0u16..6, h in 0u16..6) {
        let mut dst = DataBuffer::new(w, h);
        dst.copy_from(&src);
        let once = dst.clone();
        dst.copy_from(&src);
        prop_assert_eq!(&dst, &once);
        prop_assert_eq!(dst, src);
    }

    #[test]
    fn length_tracks_size(w0 in 0u16..10, h0 in 0u16..10, w1 in 0u16..10, h1 in 0u16..10) {
        let mut buf = DataBuffer::new(w0, h0);
        buf.resize(w1, h1);
        prop_assert_eq!(buf.len(), usize::from(w1) * usize::from(h1));
    }

    #[test]
    fn self_diff_is_empty(buf in grid_of(any_cell())) {
        prop_assert!(diff::diff(&buf, &buf).unwrap().is_empty());
        prop_assert_eq!(diff::stats(&buf, &buf).unwrap().unchanged, buf.len());
    }
}
