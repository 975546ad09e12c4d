use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    let r = FrameRange::with_len(FrameIndex(90), 120).unwrap();
    assert_eq!(r.end, FrameIndex(210));
    assert_eq!(r.len_frames(), 120);
}

#[test]
fn frame_range_length_must_fit_in_u64() {
    assert!(matches!(
        FrameRange::with_len(FrameIndex(2), u64::MAX - 1),
        Err(StoryError::Configuration(_))
    ));
    let r = FrameRange::with_len(FrameIndex(1), u64::MAX - 1).unwrap();
    assert_eq!(r.end, FrameIndex(u64::MAX));
}

#[test]
fn fps_converts_whole_seconds() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames(4), 120);
    assert!((fps.frames_to_secs(15.0) - 0.5).abs() < 1e-12);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn percent_maps_onto_canvas() {
    let p = Percent2::new(50.0, 25.0);
    assert!(p.is_normalized());
    assert_eq!(p.to_point(Canvas::default()), Point::new(640.0, 180.0));
    assert!(!Percent2::new(101.0, 0.0).is_normalized());
}
