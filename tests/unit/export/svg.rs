use super::*;
use crate::{
    compose::storyboard::{Storyboard, StoryboardOptions},
    foundation::core::FrameIndex,
    story::document::StoryDocument,
};

const RAVI: &str = include_str!("../../data/ravi_diwali.json");

fn board() -> Storyboard {
    let doc = StoryDocument::from_reader(RAVI.as_bytes()).unwrap();
    Storyboard::build(&doc, &StoryboardOptions::default()).unwrap()
}

fn svg_at(frame: u64) -> String {
    let b = board();
    to_svg(&b.render(FrameIndex(frame)).unwrap(), b.canvas())
}

#[test]
fn numbers_are_trimmed_and_stable() {
    assert_eq!(N(1.0).to_string(), "1");
    assert_eq!(N(0.25).to_string(), "0.25");
    assert_eq!(N(-0.0001).to_string(), "0");
    assert_eq!(N(2.0 / 3.0).to_string(), "0.667");
}

#[test]
fn text_is_escaped() {
    assert_eq!(escape(r#"Tom & "Jerry" <3"#), "Tom &amp; &quot;Jerry&quot; &lt;3");
}

#[test]
fn title_card_svg_has_gradient_and_texts() {
    let svg = svg_at(30);
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1280\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("stop-color=\"#FF6B35\""));
    assert!(svg.contains("Ravi Shares His Diwali Sweets"));
    assert!(svg.contains("A Story About Diwali - Festival of Lights"));
}

#[test]
fn end_card_svg_shows_moral_and_sign_off() {
    let svg = svg_at(1300);
    assert!(svg.contains("The Moral of the Story"));
    assert!(svg.contains("Sharing brings happiness to everyone"));
    assert!(svg.contains("Happy Diwali!"));
    assert!(svg.contains("stop-color=\"#9B59B6\""));
}

#[test]
fn scene_svg_draws_background_characters_and_text() {
    // Scene 6 (neighbor door) at local 60.
    let svg = svg_at(810);
    assert!(svg.contains("fill=\"#FFE5CC\""));
    assert!(svg.contains("fill=\"#8B4513\" stroke=\"#654321\""));
    assert!(svg.contains(">Ravi</text>"));
    assert!(svg.contains(">Mrs. Sharma</text>"));
    assert!(svg.contains(">Scene 6</text>"));
    // Surprised neighbor: open mouth.
    assert!(svg.contains("<circle cx=\"50\" cy=\"36\" r=\"4\""));
}

#[test]
fn elder_body_has_glasses_and_bun() {
    // Scene 5 shows only Dadi.
    let svg = svg_at(650);
    assert!(svg.contains("stroke=\"#666666\""));
    assert!(svg.contains("<circle cx=\"50\" cy=\"10\" r=\"8\" fill=\"#B0B0B0\"/>"));
    assert!(svg.contains(">Dadi</text>"));
}

#[test]
fn festive_scene_draws_lamps_and_rangoli() {
    let svg = svg_at(1100);
    assert_eq!(svg.matches("fill=\"#FFFF99\"").count(), 4);
    assert_eq!(svg.matches("fill=\"#E74C3C\"/>").count(), 8);
}

#[test]
fn missing_dialogue_omits_the_box() {
    let mut doc = StoryDocument::from_reader(RAVI.as_bytes()).unwrap();
    doc.scenes[0].dialogue = None;
    let b = Storyboard::build(&doc, &StoryboardOptions::default()).unwrap();
    let svg = to_svg(&b.render(FrameIndex(150)).unwrap(), b.canvas());
    assert!(!svg.contains("#FFEBCD"));
    let svg = svg_at(150);
    assert!(svg.contains("#FFEBCD"));
}

#[test]
fn svg_output_is_deterministic() {
    assert_eq!(svg_at(777), svg_at(777));
}
