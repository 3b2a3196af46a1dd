use super::*;

fn lit(x: i32, y: i32) -> PanelActivation {
    PanelActivation {
        x,
        y,
        color: Rgb8::WHITE,
    }
}

#[test]
fn known_pixels_set_exactly_those_bits() {
    let points = [(0, 0), (7, 0), (8, 0), (63, 31), (31, 15), (32, 16)];
    let acts: Vec<_> = points.iter().map(|&(x, y)| lit(x, y)).collect();
    let buf = rasterize(&acts, false);

    let mut expected: Vec<_> = points
        .iter()
        .map(|&(x, y)| (x as usize, y as usize))
        .collect();
    expected.sort_by_key(|&(x, y)| (y, x));
    assert_eq!(buf.lit_pixels(), expected);
}

#[test]
fn bits_are_msb_first_row_major() {
    let buf = rasterize(&[lit(0, 0), lit(9, 1), lit(63, 31)], false);
    let bytes = buf.as_bytes();
    assert_eq!(bytes[0], 0x80);
    assert_eq!(bytes[ROW_BYTES + 1], 0x40);
    assert_eq!(bytes[FRAME_BYTES - 1], 0x01);
    assert_eq!(buf.count_lit(), 3);
}

#[test]
fn mirror_reflects_left_half_only() {
    let acts = [lit(0, 3), lit(31, 4), lit(32, 5), lit(50, 6)];
    let buf = rasterize(&acts, true);
    assert_eq!(buf.lit_pixels(), vec![(63, 3), (32, 4), (32, 5), (50, 6)]);
}

#[test]
fn one_past_the_edge_is_dropped() {
    let empty = MonochromeBuffer::new();
    assert_eq!(rasterize(&[lit(64, 0)], false), empty);
    assert_eq!(rasterize(&[lit(0, 32)], false), empty);
    assert_eq!(rasterize(&[lit(-1, 0), lit(0, -1)], true), empty);
    assert_eq!(rasterize(&[lit(i32::MAX, i32::MAX)], false), empty);
}

#[test]
fn black_is_skipped_any_other_color_lights() {
    let dark = PanelActivation {
        x: 1,
        y: 1,
        color: Rgb8::BLACK,
    };
    let dim = PanelActivation {
        x: 2,
        y: 1,
        color: Rgb8::new(0, 1, 0),
    };
    let buf = rasterize(&[dark, dim], false);
    assert_eq!(buf.lit_pixels(), vec![(2, 1)]);
}

#[test]
fn buffer_set_ignores_out_of_range() {
    let mut buf = MonochromeBuffer::default();
    buf.set(64, 0);
    buf.set(0, 32);
    assert_eq!(buf.count_lit(), 0);
    assert!(!buf.get(64, 0));
}

#[test]
fn luma_preview_scales_pixels() {
    let buf = rasterize(&[lit(1, 0)], false);
    let img = buf.to_luma_image(2);
    assert_eq!(img.dimensions(), (128, 64));
    assert_eq!(img.get_pixel(2, 0).0, [255]);
    assert_eq!(img.get_pixel(3, 1).0, [255]);
    assert_eq!(img.get_pixel(0, 0).0, [0]);
    assert_eq!(img.get_pixel(4, 0).0, [0]);
}

#[test]
fn debug_shows_lit_count() {
    let buf = rasterize(&[lit(5, 5)], false);
    assert!(format!("{buf:?}").contains("lit: 1"));
}
