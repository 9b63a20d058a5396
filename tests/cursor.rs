use staffline::context::MusicContext;
use staffline::convert;
use staffline::cursor::{CursorInterpolator, LinearStaffGeometry, StaffGeometry};
use staffline::staff::StaffPositionMapper;

fn hz(pitch: f32) -> f32 {
    convert::pitch_number_to_frequency(pitch, 440.0)
}

#[test]
fn cursor_on_note_matches_staff() {
    let ctx = MusicContext::default();
    let geometry = LinearStaffGeometry::new(200.0, 12.0);
    let cursor = CursorInterpolator::new();
    // E4 on the bottom line
    let y = cursor.position(329.63, &ctx, &geometry).unwrap();
    assert!((y - geometry.y_for_position(4.0)).abs() < 1e-3);
}

#[test]
fn cursor_silent_is_none() {
    let ctx = MusicContext::default();
    let geometry = LinearStaffGeometry::new(200.0, 12.0);
    assert!(CursorInterpolator::new().position(0.0, &ctx, &geometry).is_none());
}

#[test]
fn cursor_glides_monotonically() {
    // A slow glissando from G4 to C5 never moves the cursor down the page
    let mapper = StaffPositionMapper::new(&MusicContext::default());
    let cursor = CursorInterpolator::new();
    let mut previous = f32::INFINITY;
    for i in 0..=500 {
        let pitch = 67.0 + 5.0 * i as f32 / 500.0;
        let pos = cursor.staff_position(hz(pitch), &mapper).unwrap();
        assert!(pos <= previous + 1e-4, "pitch {pitch}: {pos} after {previous}");
        previous = pos;
    }
    assert!((previous + 1.0).abs() < 1e-3);
}

#[test]
fn cursor_stays_between_anchor_and_neighbor() {
    let mapper = StaffPositionMapper::new(&MusicContext::default());
    let geometry = LinearStaffGeometry::new(0.0, 10.0);
    let cursor = CursorInterpolator::new();
    for i in 0..200 {
        let pitch = 55.0 + i as f32 * 0.137;
        let placed = cursor.locate(hz(pitch), &mapper, &geometry).unwrap();
        let lo = placed.anchor_y.min(placed.next_y);
        let hi = placed.anchor_y.max(placed.next_y);
        assert!(placed.y >= lo - 1e-4 && placed.y <= hi + 1e-4);
        assert!((0.0..=1.0).contains(&placed.ratio));
    }
}

#[test]
fn cursor_custom_geometry() {
    // Widely spaced lines above the middle, tight below
    let geometry = |pos: f32| if pos < 0.0 { 100.0 + pos * 10.0 } else { 100.0 + pos * 4.0 };
    let ctx = MusicContext::default();
    let cursor = CursorInterpolator::new();
    let d5 = cursor.position(587.33, &ctx, &geometry).unwrap();
    let g4 = cursor.position(392.0, &ctx, &geometry).unwrap();
    assert!((d5 - 80.0).abs() < 1e-3);
    assert!((g4 - 108.0).abs() < 1e-3);
}
