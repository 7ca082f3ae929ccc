use super::*;

// --- PixelPoint ---

#[test]
fn point_arithmetic() {
    let a = PixelPoint::new(10, 20);
    let b = PixelPoint::new(3, -4);
    assert_eq!(a + b, PixelPoint::new(13, 16));
    assert_eq!(a - b, PixelPoint::new(7, 24));
}

#[test]
fn to_nominal_truncates_toward_zero() {
    assert_eq!(PixelPoint::new(7, -7).to_nominal(2), PixelPoint::new(3, -3));
    assert_eq!(PixelPoint::new(8, 9).to_nominal(1), PixelPoint::new(8, 9));
}

#[test]
fn to_device_scales() {
    assert_eq!(PixelPoint::new(5, -2).to_device(3), PixelPoint::new(15, -6));
}

#[test]
fn point_arithmetic_saturates() {
    let far = PixelPoint::new(i32::MAX - 1, i32::MIN + 1);
    assert_eq!(far + PixelPoint::new(5, -5), PixelPoint::new(i32::MAX, i32::MIN));
    assert_eq!(far - PixelPoint::new(-5, 5), PixelPoint::new(i32::MAX, i32::MIN));
    assert_eq!(far.to_device(2), PixelPoint::new(i32::MAX, i32::MIN));
}

// --- Rect ---

#[test]
fn rect_span_keeps_corners() {
    let r = Rect::span(PixelPoint::new(10, 20), PixelPoint::new(74, 52));
    assert_eq!((r.x1, r.y1, r.x2, r.y2), (10, 20, 74, 52));
}

// --- Geometry defaults ---

#[test]
fn default_is_64_square_at_zoom_1() {
    let g = Geometry::default();
    assert_eq!((g.width(), g.height()), (64, 64));
    assert_eq!((g.pix_width(), g.pix_height()), (64, 64));
    assert_eq!(g.zoom(), 1);
}

// --- set_size ---

#[test]
fn set_size_clamps_to_one() {
    let mut g = Geometry::default();
    g.set_size(0, Some(0));
    assert_eq!((g.width(), g.height()), (1, 1));
    g.set_size(-20, Some(5));
    assert_eq!((g.width(), g.height()), (1, 5));
}

#[test]
fn set_size_single_argument_is_square() {
    let mut g = Geometry::default();
    g.set_size(5, None);
    assert_eq!((g.width(), g.height()), (5, 5));
}

#[test]
fn set_size_respects_current_zoom() {
    let mut g = Geometry::default();
    assert!(g.set_zoom(2));
    g.set_size(10, Some(20));
    assert_eq!((g.pix_width(), g.pix_height()), (20, 40));
}

// --- set_zoom ---

#[test]
fn zoom_doubles_pixels_keeps_nominal() {
    let mut g = Geometry::new(30, 40);
    assert!(g.set_zoom(2));
    assert_eq!((g.width(), g.height()), (30, 40));
    assert_eq!((g.pix_width(), g.pix_height()), (60, 80));
    assert_eq!(g.pix_extent(), PixelPoint::new(60, 80));
}

#[test]
fn zoom_back_to_one_restores_pixels() {
    let mut g = Geometry::new(30, 40);
    g.set_zoom(2);
    g.set_zoom(1);
    assert_eq!((g.pix_width(), g.pix_height()), (30, 40));
}

#[test]
fn non_positive_zoom_is_rejected() {
    let mut g = Geometry::new(30, 40);
    g.set_zoom(2);
    assert!(!g.set_zoom(0));
    assert!(!g.set_zoom(-1));
    assert_eq!(g.zoom(), 2);
    assert_eq!(g.pix_width(), 60);
}

#[test]
fn huge_size_under_zoom_saturates_pixels() {
    let mut g = Geometry::new(2_000_000_000, 5);
    assert!(g.set_zoom(2));
    assert_eq!(g.pix_width(), i32::MAX);
    assert_eq!(g.pix_height(), 10);
    assert_eq!(g.width(), 2_000_000_000);
}
