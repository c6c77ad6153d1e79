use super::*;

fn size(w: u32, h: u32) -> CanvasSize {
    CanvasSize::new(w, h).unwrap()
}

#[test]
fn new_surfaces_are_transparent_and_blank() {
    let s = Surface::new_transparent(size(8, 8));
    assert_eq!(s.data().len(), 8 * 8 * 4);
    assert!(s.data().iter().all(|&b| b == 0));
    assert!(is_blank(&s));
}

#[test]
fn white_ink_still_counts_as_blank() {
    let s = Surface::new_filled(size(4, 4), Rgba8::WHITE);
    assert!(is_blank(&s));
}

#[test]
fn one_dark_pixel_makes_surface_non_blank() {
    let mut s = Surface::new_transparent(size(4, 4));
    let idx = (2 * 4 + 3) * 4;
    s.data_mut()[idx..idx + 4].copy_from_slice(&[0, 0, 0, 255]);
    assert!(!is_blank(&s));
    assert_eq!(s.pixel(3, 2), Some([0, 0, 0, 255]));
    assert_eq!(s.pixel(4, 0), None);
}

#[test]
fn draw_over_and_erase_with_use_coverage() {
    let mut base = Surface::new_filled(size(2, 1), Rgba8::BLACK);
    let mut cover = Surface::new_transparent(size(2, 1));
    cover.data_mut()[0..4].copy_from_slice(&[0, 0, 0, 255]);

    base.erase_with(&cover).unwrap();
    assert_eq!(base.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(base.pixel(1, 0), Some([0, 0, 0, 255]));

    let red = Surface::new_filled(size(2, 1), Rgba8::rgb(255, 0, 0));
    base.draw_over(&red, 1.0).unwrap();
    assert_eq!(base.pixel(0, 0), Some([255, 0, 0, 255]));

    let other = Surface::new_transparent(size(3, 1));
    assert!(base.draw_over(&other, 1.0).is_err());
}

#[test]
fn decoded_images_are_clipped_into_place() {
    // 3x1 image into a 2x2 surface: last column is clipped, second row stays transparent.
    let bytes = [
        10, 10, 10, 255, //
        20, 20, 20, 255, //
        30, 30, 30, 255,
    ];
    let s = Surface::from_premul_rgba8(size(2, 2), &bytes, 3, 1).unwrap();
    assert_eq!(s.pixel(0, 0), Some([10, 10, 10, 255]));
    assert_eq!(s.pixel(1, 0), Some([20, 20, 20, 255]));
    assert_eq!(s.pixel(0, 1), Some([0, 0, 0, 0]));

    assert!(Surface::from_premul_rgba8(size(2, 2), &bytes, 2, 2).is_err());
}

#[test]
fn straight_copy_unpremultiplies() {
    let mut s = Surface::new_transparent(size(1, 1));
    s.data_mut().copy_from_slice(&[100, 50, 0, 128]);
    assert_eq!(s.to_straight_rgba8(), vec![199, 100, 0, 128]);
}

#[test]
fn clear_resets_ink_to_transparent() {
    let mut s = Surface::new_filled(size(4, 4), Rgba8::rgb(200, 10, 10));
    s.clear();
    assert_eq!(s.pixel(1, 2), Some([0, 0, 0, 0]));
    assert!(is_blank(&s));
}
