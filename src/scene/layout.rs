use crate::foundation::core::Percent2;
use crate::story::document::Scene;

/// Largest character count the automatic layout table covers.
pub const AUTO_LAYOUT_MAX: usize = 3;

const ONE: [Percent2; 1] = [Percent2::new(50.0, 50.0)];
const TWO: [Percent2; 2] = [Percent2::new(35.0, 50.0), Percent2::new(70.0, 50.0)];
const THREE: [Percent2; 3] = [
    Percent2::new(25.0, 50.0),
    Percent2::new(50.0, 50.0),
    Percent2::new(75.0, 50.0),
];

/// Default slots for `count` characters sharing a scene, independent of who they are.
pub fn default_positions(count: usize) -> Option<&'static [Percent2]> {
    match count {
        1 => Some(&ONE),
        2 => Some(&TWO),
        3 => Some(&THREE),
        _ => None,
    }
}

/// Position of placement `index`: explicit when authored, otherwise the layout slot.
///
/// Returns `None` only for scenes the document validation already rejects.
pub(crate) fn resolve_position(scene: &Scene, index: usize) -> Option<Percent2> {
    let placement = scene.characters.get(index)?;
    match placement.position {
        Some(p) => Some(p),
        None => default_positions(scene.characters.len())?.get(index).copied(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
