use super::*;
use crate::story::document::{CharacterPlacement, Expression};

fn scene_with(placements: Vec<CharacterPlacement>) -> Scene {
    Scene {
        id: 1,
        duration_frames: 120,
        background: "home_living_room".to_owned(),
        narrator: "n".to_owned(),
        dialogue: None,
        action: None,
        characters: placements,
    }
}

fn auto(id: &str) -> CharacterPlacement {
    CharacterPlacement {
        character: id.to_owned(),
        position: None,
        expression: Expression::Happy,
        size: 100.0,
    }
}

#[test]
fn table_rows_match_authoring_defaults() {
    assert_eq!(default_positions(1).unwrap(), &[Percent2::new(50.0, 50.0)]);
    assert_eq!(
        default_positions(2).unwrap(),
        &[Percent2::new(35.0, 50.0), Percent2::new(70.0, 50.0)]
    );
    let three = default_positions(3).unwrap();
    assert_eq!(three.len(), 3);
    assert_eq!(three[0].x, 25.0);
    assert_eq!(three[2].x, 75.0);
    assert!(default_positions(0).is_none());
    assert!(default_positions(4).is_none());
}

#[test]
fn two_characters_get_fixed_slots_regardless_of_identity() {
    let a = scene_with(vec![auto("ravi"), auto("dadi")]);
    let b = scene_with(vec![auto("neighbor"), auto("ravi")]);
    for s in [&a, &b] {
        assert_eq!(resolve_position(s, 0), Some(Percent2::new(35.0, 50.0)));
        assert_eq!(resolve_position(s, 1), Some(Percent2::new(70.0, 50.0)));
    }
}

#[test]
fn explicit_positions_override_the_table() {
    let mut explicit = auto("ravi");
    explicit.position = Some(Percent2::new(10.0, 80.0));
    let s = scene_with(vec![explicit, auto("dadi")]);
    assert_eq!(resolve_position(&s, 0), Some(Percent2::new(10.0, 80.0)));
    assert_eq!(resolve_position(&s, 1), Some(Percent2::new(70.0, 50.0)));
    assert_eq!(resolve_position(&s, 2), None);
}
