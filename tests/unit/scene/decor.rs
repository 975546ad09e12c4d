use super::*;

fn count(decor: &[Decoration], pred: impl Fn(&Decoration) -> bool) -> usize {
    decor.iter().filter(|d| pred(d)).count()
}

#[test]
fn festive_lamps_set_is_fixed() {
    let d = decorations_for(
        DecorSet::FestiveLamps,
        false,
        FrameIndex(0),
        Canvas::default(),
    );
    assert_eq!(count(&d, |d| matches!(d, Decoration::Diya { .. })), 4);
    assert_eq!(count(&d, |d| matches!(d, Decoration::Rangoli { .. })), 1);
    assert_eq!(count(&d, |d| matches!(d, Decoration::Star { .. })), 3);
    assert_eq!(d.len(), 8);
}

#[test]
fn sweets_only_in_the_opening_living_room() {
    let canvas = Canvas::default();
    let opening = decorations_for(DecorSet::LivingRoom, true, FrameIndex(90), canvas);
    assert!(matches!(
        opening.as_slice(),
        [Decoration::SweetPlate { size, .. }] if *size == 120.0
    ));
    assert!(decorations_for(DecorSet::LivingRoom, false, FrameIndex(90), canvas).is_empty());
    assert!(decorations_for(DecorSet::Plain, true, FrameIndex(90), canvas).is_empty());
}

#[test]
fn door_and_window_sit_on_the_right() {
    let canvas = Canvas::default();
    let door = decorations_for(DecorSet::Doorway, false, FrameIndex(0), canvas);
    let [Decoration::Door { panel, knob }] = door.as_slice() else {
        panic!("expected a single door, got {door:?}");
    };
    assert!((panel.x0 - 888.0).abs() < 1e-9);
    assert!((panel.y0 - 144.0).abs() < 1e-9);
    assert_eq!(panel.width(), 200.0);
    assert!(knob.x0 > panel.x0 && knob.x1 < panel.x1);

    let window = decorations_for(DecorSet::WindowView, false, FrameIndex(0), canvas);
    let [Decoration::Window { frame, house }] = window.as_slice() else {
        panic!("expected a single window, got {window:?}");
    };
    assert!((frame.x0 - 852.0).abs() < 1e-9);
    assert_eq!(frame.height(), 250.0);
    assert!(house.x0 > frame.x0);
}

#[test]
fn animation_follows_global_frame_only() {
    // Same global frame, different owning scene: identical ambient state.
    let canvas = Canvas::default();
    let a = decorations_for(DecorSet::FestiveLamps, false, FrameIndex(1169), canvas);
    let b = decorations_for(DecorSet::FestiveLamps, false, FrameIndex(1169), canvas);
    assert_eq!(a, b);

    // Continuous: neighbouring frames differ by a small amount.
    let (s0, o0) = flicker(FrameIndex(1169), 0.0);
    let (s1, o1) = flicker(FrameIndex(1170), 0.0);
    assert!((s0 - s1).abs() < 0.05);
    assert!((o0 - o1).abs() < 0.11);
}

#[test]
fn lamps_flicker_out_of_phase() {
    let d = decorations_for(
        DecorSet::FestiveLamps,
        false,
        FrameIndex(40),
        Canvas::default(),
    );
    let scales: Vec<f64> = d
        .iter()
        .filter_map(|d| match d {
            Decoration::Diya { flame_scale, .. } => Some(*flame_scale),
            _ => None,
        })
        .collect();
    assert_eq!(scales.len(), 4);
    assert!(scales.windows(2).any(|w| (w[0] - w[1]).abs() > 1e-6));
}

#[test]
fn ambient_values_stay_in_range() {
    for f in 0..500 {
        let t = twinkle(FrameIndex(f), 10.0);
        assert!((0.6..=1.0).contains(&t));
        let (s, o) = flicker(FrameIndex(f), 3.0);
        assert!((0.9..=1.1).contains(&s));
        assert!((0.8..=1.0).contains(&o));
    }
}

#[test]
fn coordinates_scale_with_canvas() {
    let half = Canvas {
        width: 640,
        height: 360,
    };
    let d = decorations_for(DecorSet::LivingRoom, true, FrameIndex(0), half);
    let [Decoration::SweetPlate { origin, size }] = d.as_slice() else {
        panic!("expected sweet plate");
    };
    assert_eq!(*origin, Point::new(300.0, 200.0));
    assert_eq!(*size, 60.0);
}
