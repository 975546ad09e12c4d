use super::*;

const RAVI: &str = include_str!("../../data/ravi_diwali.json");

fn ravi() -> StoryDocument {
    StoryDocument::from_reader(RAVI.as_bytes()).unwrap()
}

fn schedule() -> Schedule {
    Schedule::build(&ravi(), &ScheduleOptions::default()).unwrap()
}

#[test]
fn sample_story_totals_1350_frames() {
    let s = schedule();
    assert_eq!(s.total_frames(), 1350);
    assert_eq!(s.segments().len(), 10);
    assert_eq!(s.segments()[0].kind, SegmentKind::TitleCard);
    assert_eq!(s.segments()[0].range.len_frames(), 90);
    assert_eq!(s.segments()[9].kind, SegmentKind::EndCard);
    assert_eq!(s.segments()[9].range.start, FrameIndex(1230));
    assert_eq!(s.range().end, FrameIndex(1350));
}

#[test]
fn segments_are_contiguous() {
    let s = schedule();
    assert_eq!(s.segments()[0].range.start, FrameIndex(0));
    for pair in s.segments().windows(2) {
        assert_eq!(pair[0].range.end, pair[1].range.start);
        assert!(pair[0].range.start < pair[1].range.start);
    }
    let sum: u64 = s.segments().iter().map(|seg| seg.range.len_frames()).sum();
    assert_eq!(sum, s.total_frames());
}

#[test]
fn resolve_known_frames() {
    let s = schedule();

    let r = s.resolve(FrameIndex(1349)).unwrap();
    assert_eq!(r.segment.kind, SegmentKind::EndCard);
    assert_eq!(r.local, FrameIndex(119));

    let r = s.resolve(FrameIndex(90)).unwrap();
    assert_eq!(r.segment.kind, SegmentKind::Scene { index: 0, id: 1 });
    assert_eq!(r.local, FrameIndex(0));

    let r = s.resolve(FrameIndex(209)).unwrap();
    assert_eq!(r.segment.kind, SegmentKind::Scene { index: 0, id: 1 });
    assert_eq!(r.local, FrameIndex(119));

    let r = s.resolve(FrameIndex(210)).unwrap();
    assert_eq!(r.segment.kind, SegmentKind::Scene { index: 1, id: 2 });
    assert_eq!(r.local, FrameIndex(0));
    assert_eq!(r.index, 2);

    let r = s.resolve(FrameIndex(0)).unwrap();
    assert_eq!(r.segment.kind, SegmentKind::TitleCard);
}

#[test]
fn every_frame_resolves_to_exactly_one_segment() {
    let s = schedule();
    for f in 0..s.total_frames() {
        let r = s.resolve(FrameIndex(f)).unwrap();
        let owners = s
            .segments()
            .iter()
            .filter(|seg| seg.range.contains(FrameIndex(f)))
            .count();
        assert_eq!(owners, 1);
        assert!(r.segment.range.contains(FrameIndex(f)));
        assert_eq!(r.local.0 + r.segment.range.start.0, f);
    }
}

#[test]
fn out_of_range_frames_fail() {
    let s = schedule();
    let err = s.resolve(FrameIndex(1350)).unwrap_err();
    assert!(matches!(err, StoryError::OutOfRange { frame: 1350, total: 1350 }));
    assert!(s.resolve(FrameIndex(u64::MAX)).is_err());
}

#[test]
fn card_lengths_are_configurable() {
    let opts = ScheduleOptions {
        title_frames: 30,
        end_frames: 60,
        ..ScheduleOptions::default()
    };
    let s = Schedule::build(&ravi(), &opts).unwrap();
    assert_eq!(s.total_frames(), 30 + 1140 + 60);
    assert_eq!(s.scene_segment(0).unwrap().range.start, FrameIndex(30));

    let zero = ScheduleOptions {
        end_frames: 0,
        ..ScheduleOptions::default()
    };
    assert!(matches!(
        Schedule::build(&ravi(), &zero),
        Err(StoryError::Configuration(_))
    ));
}

#[test]
fn structural_errors_propagate() {
    let mut doc = ravi();
    doc.scenes.clear();
    assert!(Schedule::build(&doc, &ScheduleOptions::default()).is_err());

    let mut doc = ravi();
    doc.scenes[3].duration_frames = 0;
    assert!(Schedule::build(&doc, &ScheduleOptions::default()).is_err());
}

#[test]
fn options_deserialize_with_defaults() {
    let opts: ScheduleOptions =
        serde_json::from_str(r#"{"unknown_background":"fallback_to_default"}"#).unwrap();
    assert_eq!(opts.title_frames, DEFAULT_TITLE_FRAMES);
    assert_eq!(opts.end_frames, DEFAULT_END_FRAMES);
    assert_eq!(opts.unknown_background, BackgroundPolicy::FallbackToDefault);
}

#[test]
fn overflowing_timeline_is_rejected() {
    let mut doc = ravi();
    doc.scenes.truncate(2);
    doc.scenes[0].duration_frames = u64::MAX;
    doc.scenes[1].duration_frames = 5;
    let err = Schedule::build(&doc, &ScheduleOptions::default()).unwrap_err();
    assert!(matches!(err, StoryError::Configuration(ref msg) if msg.contains("overflows")));

    // Largest timeline that still fits: title + scene + end == u64::MAX.
    let mut doc = ravi();
    doc.scenes.truncate(1);
    doc.scenes[0].duration_frames = u64::MAX - DEFAULT_TITLE_FRAMES - DEFAULT_END_FRAMES;
    let s = Schedule::build(&doc, &ScheduleOptions::default()).unwrap();
    assert_eq!(s.total_frames(), u64::MAX);
    let lens: Vec<u64> = s.segments().iter().map(|seg| seg.range.len_frames()).collect();
    assert_eq!(
        lens,
        [DEFAULT_TITLE_FRAMES, doc.scenes[0].duration_frames, DEFAULT_END_FRAMES]
    );
}
