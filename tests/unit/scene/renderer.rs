use super::*;
use crate::story::document::{CharacterPlacement, StoryDocument};

const RAVI: &str = include_str!("../../data/ravi_diwali.json");

fn ravi() -> StoryDocument {
    StoryDocument::from_reader(RAVI.as_bytes()).unwrap()
}

fn prepare_with(doc: &StoryDocument, index: usize, policy: BackgroundPolicy) -> StoryResult<SceneRenderer> {
    let registry = CharacterRegistry::from_cast(&doc.cast).unwrap();
    let palette = BackgroundPalette::with_overrides(&doc.backgrounds).unwrap();
    SceneRenderer::prepare(
        &doc.scenes[index],
        index,
        doc.scenes.len(),
        &registry,
        &palette,
        policy,
        doc.fps().unwrap(),
        RenderOptions::default(),
    )
}

fn prepare(doc: &StoryDocument, index: usize) -> SceneRenderer {
    prepare_with(doc, index, BackgroundPolicy::Strict).unwrap()
}

#[test]
fn unknown_ids_fail_at_prepare_time() {
    let mut doc = ravi();
    doc.scenes[2].characters[0].character = "ghost".to_owned();
    let err = prepare_with(&doc, 2, BackgroundPolicy::Strict).unwrap_err();
    assert!(matches!(err, StoryError::UnknownCharacter(ref id) if id == "ghost"));

    let mut doc = ravi();
    doc.scenes[2].background = "moon_base".to_owned();
    let err = prepare_with(&doc, 2, BackgroundPolicy::Strict).unwrap_err();
    assert!(matches!(err, StoryError::UnknownBackground(_)));

    let r = prepare_with(&doc, 2, BackgroundPolicy::FallbackToDefault).unwrap();
    let f = r.frame(FrameIndex(0), FrameIndex(330)).unwrap();
    assert_eq!(f.background, "moon_base");
    assert_eq!(f.decor, DecorSet::Plain);
    assert!(f.decorations.is_empty());
}

#[test]
fn names_and_bodies_come_from_the_registry() {
    let doc = ravi();
    let f = prepare(&doc, 5).frame(FrameIndex(60), FrameIndex(0)).unwrap();
    assert_eq!(f.characters[1].id, "neighbor");
    assert_eq!(f.characters[1].name, "Mrs. Sharma");
    assert_eq!(f.characters[1].body, BodyPlan::Standard);

    let f = prepare(&doc, 4).frame(FrameIndex(60), FrameIndex(0)).unwrap();
    assert_eq!(f.characters[0].id, "dadi");
    assert_eq!(f.characters[0].body, BodyPlan::Elder);
}

#[test]
fn local_frame_past_duration_is_out_of_range() {
    let doc = ravi();
    let r = prepare(&doc, 0);
    assert_eq!(r.duration(), 120);
    r.frame(FrameIndex(119), FrameIndex(209)).unwrap();
    let err = r.frame(FrameIndex(120), FrameIndex(210)).unwrap_err();
    assert!(matches!(err, StoryError::OutOfRange { frame: 120, total: 120 }));
}

#[test]
fn entrances_are_staggered_and_monotone() {
    let doc = ravi();
    let r = prepare(&doc, 1);

    let f0 = r.frame(FrameIndex(0), FrameIndex(210)).unwrap();
    assert!(f0.characters.iter().all(|c| c.progress == 0.0 && c.opacity == 0.0));
    assert_eq!(f0.characters[0].entry_delay, 0);
    assert_eq!(f0.characters[1].entry_delay, 10);

    // Second character keeps its slot but has not entered yet.
    let f5 = r.frame(FrameIndex(5), FrameIndex(215)).unwrap();
    assert!(f5.characters[0].progress > 0.0);
    assert_eq!(f5.characters[1].progress, 0.0);
    assert_eq!(f5.characters[1].position, Percent2::new(65.0, 50.0));

    let mut last = [0.0f64; 2];
    for local in 0..120 {
        let f = r.frame(FrameIndex(local), FrameIndex(210 + local)).unwrap();
        for (i, c) in f.characters.iter().enumerate() {
            assert!((0.0..=1.0).contains(&c.progress));
            assert!(c.progress >= last[i], "progress regressed at {local}");
            assert_eq!(c.scale, c.progress);
            last[i] = c.progress;
        }
        assert!(f.characters[0].progress >= f.characters[1].progress);
    }
}

#[test]
fn excited_characters_bounce_after_entry() {
    let doc = ravi();
    let r = prepare(&doc, 0);
    let f = r.frame(FrameIndex(15), FrameIndex(105)).unwrap();
    let ravi = &f.characters[0];
    assert_eq!(ravi.expression, Expression::Excited);
    assert!((ravi.bounce - 5.0 * 1.5f64.sin()).abs() < 1e-12);
    assert_eq!(f.characters[1].bounce, 0.0);
}

#[test]
fn transform_centers_view_box_on_anchor() {
    let doc = ravi();
    let r = prepare(&doc, 2);
    for local in [0, 3, 40, 149] {
        let f = r.frame(FrameIndex(local), FrameIndex(330 + local)).unwrap();
        let c = &f.characters[0];
        assert_eq!(c.anchor, Point::new(640.0, 360.0));
        let center = c.transform * Point::new(50.0, 75.0);
        assert!((center - c.anchor).hypot() < 1e-9);
    }
    let f = r.frame(FrameIndex(149), FrameIndex(479)).unwrap();
    let c = &f.characters[0];
    let top_left = c.transform * Point::new(0.0, 0.0);
    let expected = Point::new(640.0 - 50.0 * c.progress, 360.0 - 75.0 * c.progress);
    assert!((top_left - expected).hypot() < 1e-9);
}

#[test]
fn text_fades_follow_their_envelopes() {
    let doc = ravi();
    let r = prepare(&doc, 2);
    let at = |local: u64| r.frame(FrameIndex(local), FrameIndex(330 + local)).unwrap();

    assert_eq!(at(0).narrator.opacity, 0.0);
    assert!((at(7).narrator.opacity - 7.0 / 15.0).abs() < 1e-12);
    assert_eq!(at(15).narrator.opacity, 1.0);
    assert_eq!(at(135).narrator.opacity, 1.0);
    assert!(at(149).narrator.opacity < 0.1);

    let dialogue = |local: u64| at(local).dialogue.unwrap().opacity;
    assert_eq!(dialogue(10), 0.0);
    assert_eq!(dialogue(20), 0.0);
    assert_eq!(dialogue(35), 1.0);
    assert_eq!(dialogue(140), 1.0);
    assert!((dialogue(145) - 0.5).abs() < 1e-12);
}

#[test]
fn absent_dialogue_yields_no_overlay_but_empty_is_kept() {
    let mut doc = ravi();
    doc.scenes[2].dialogue = None;
    doc.scenes[3].dialogue = Some(String::new());
    let none = prepare(&doc, 2).frame(FrameIndex(60), FrameIndex(0)).unwrap();
    assert!(none.dialogue.is_none());
    let empty = prepare(&doc, 3).frame(FrameIndex(60), FrameIndex(0)).unwrap();
    assert_eq!(empty.dialogue.unwrap().text, "");
}

#[test]
fn short_scene_fades_stay_bounded() {
    let mut doc = ravi();
    doc.scenes[0].duration_frames = 12;
    let r = prepare(&doc, 0);
    for local in 0..12 {
        let f = r.frame(FrameIndex(local), FrameIndex(90 + local)).unwrap();
        assert!((0.0..=1.0).contains(&f.narrator.opacity));
        assert!((0.0..=1.0).contains(&f.dialogue.unwrap().opacity));
    }
    assert_eq!(r.frame(FrameIndex(0), FrameIndex(90)).unwrap().narrator.opacity, 0.0);
}

#[test]
fn automatic_layout_applies_without_positions() {
    let mut doc = ravi();
    for p in &mut doc.scenes[1].characters {
        p.position = None;
    }
    let f = prepare(&doc, 1).frame(FrameIndex(30), FrameIndex(0)).unwrap();
    let slots: Vec<Percent2> = f.characters.iter().map(|c| c.position).collect();
    assert_eq!(slots, [Percent2::new(35.0, 50.0), Percent2::new(70.0, 50.0)]);
}

#[test]
fn sweet_plate_only_in_the_first_scene() {
    let doc = ravi();
    let first = prepare(&doc, 0).frame(FrameIndex(0), FrameIndex(90)).unwrap();
    assert!(matches!(first.decorations.as_slice(), [Decoration::SweetPlate { .. }]));
    assert_eq!(first.scene_number, 1);
    assert_eq!(first.scene_count, 8);

    let later = prepare(&doc, 1).frame(FrameIndex(0), FrameIndex(210)).unwrap();
    assert_eq!(later.decor, DecorSet::LivingRoom);
    assert!(later.decorations.is_empty());
}

#[test]
fn custom_size_scales_the_view_box() {
    let mut doc = ravi();
    doc.scenes[2].characters = vec![CharacterPlacement {
        character: "ravi".to_owned(),
        position: None,
        expression: Expression::Thinking,
        size: 200.0,
    }];
    let f = prepare(&doc, 2).frame(FrameIndex(149), FrameIndex(0)).unwrap();
    let c = &f.characters[0];
    let w = (c.transform * Point::new(100.0, 0.0)) - (c.transform * Point::new(0.0, 0.0));
    assert!((w.x - 200.0 * c.progress).abs() < 1e-9);
}
