use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn fade_matches_narrator_shape() {
    let env = Envelope::fade(0.0, 15.0, 105.0, 120.0);
    assert_eq!(env.sample(0.0), 0.0);
    assert!(approx(env.sample(7.5), 0.5));
    assert_eq!(env.sample(15.0), 1.0);
    assert_eq!(env.sample(60.0), 1.0);
    assert_eq!(env.sample(105.0), 1.0);
    assert!(approx(env.sample(112.5), 0.5));
    assert_eq!(env.sample(120.0), 0.0);
}

#[test]
fn sample_holds_outside_keys() {
    let env = Envelope::fade(20.0, 35.0, 110.0, 120.0);
    assert_eq!(env.sample(-5.0), 0.0);
    assert_eq!(env.sample(10.0), 0.0);
    assert_eq!(env.sample(500.0), 0.0);
}

#[test]
fn short_window_collapses_hold_without_overshoot() {
    // 20-frame scene: ramps of 15 in and 15 out cannot both fit.
    let env = Envelope::fade(0.0, 15.0, 5.0, 20.0);
    let keys = env.keys();
    assert!(keys.windows(2).all(|w| w[0].frame <= w[1].frame));
    for f in 0..=20 {
        let v = env.sample(f64::from(f));
        assert!((0.0..=1.0).contains(&v));
    }
    assert_eq!(env.sample(0.0), 0.0);
    assert_eq!(env.sample(20.0), 0.0);
}

#[test]
fn ramp_holds_final_value() {
    let env = Envelope::ramp(0.0, 20.0, 0.8, 1.0);
    assert!(approx(env.sample(10.0), 0.9));
    assert_eq!(env.sample(90.0), 1.0);
}

#[test]
fn keys_are_sorted_and_interpolated_linearly() {
    let env = Envelope::new(vec![EnvelopeKey::new(10.0, 1.0), EnvelopeKey::new(0.0, 0.0)]);
    assert_eq!(env.keys()[0].frame, 0.0);
    assert!(approx(env.sample(2.5), 0.25));
    assert!(approx(env.sample(5.0), 0.5));
}

#[test]
fn unit_wave_remap_spans_range() {
    assert!(approx(remap_unit_wave(-1.0, 0.9, 1.1), 0.9));
    assert!(approx(remap_unit_wave(0.0, 0.9, 1.1), 1.0));
    assert!(approx(remap_unit_wave(1.0, 0.6, 1.0), 1.0));
}
