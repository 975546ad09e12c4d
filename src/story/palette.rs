use std::collections::BTreeMap;

use crate::{
    foundation::color::Color,
    foundation::error::{StoryError, StoryResult},
};

/// Fill used when a background id is unknown and fallback is explicitly enabled.
pub const FALLBACK_BACKGROUND_COLOR: Color = Color::rgb(0xFF, 0xF8, 0xDC);

/// Which fixed decoration set a background draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorSet {
    /// Nothing but the fill.
    #[default]
    Plain,
    /// Living room: a plate of sweets in the opening scene.
    LivingRoom,
    /// Window with four panes and a distant house.
    WindowView,
    /// Wooden door with a brass knob.
    Doorway,
    /// Festival night: flickering diyas, a rangoli and twinkling stars.
    FestiveLamps,
}

/// What to do when a scene names a background the palette lacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundPolicy {
    /// Fail the build with [`StoryError::UnknownBackground`].
    #[default]
    Strict,
    /// Warn and draw [`FALLBACK_BACKGROUND_COLOR`] with no decorations.
    FallbackToDefault,
}

/// A palette entry as authored in a story document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundDef {
    /// Palette key referenced by scenes.
    pub id: String,
    /// Fill color.
    pub color: Color,
    /// Decoration set.
    #[serde(default)]
    pub decor: DecorSet,
}

/// Resolved style for one background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BackgroundStyle {
    /// Fill color.
    pub color: Color,
    /// Decoration set.
    pub decor: DecorSet,
}

/// Read-only mapping from background id to style.
#[derive(Clone, Debug)]
pub struct BackgroundPalette {
    entries: BTreeMap<String, BackgroundStyle>,
}

impl Default for BackgroundPalette {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BackgroundPalette {
    /// The four built-in backgrounds.
    pub fn builtin() -> Self {
        let entries = [
            (
                "home_living_room",
                Color::rgb(0xFF, 0xF8, 0xDC),
                DecorSet::LivingRoom,
            ),
            (
                "home_window_view",
                Color::rgb(0xE6, 0xF3, 0xFF),
                DecorSet::WindowView,
            ),
            (
                "neighbor_door",
                Color::rgb(0xFF, 0xE5, 0xCC),
                DecorSet::Doorway,
            ),
            (
                "home_living_room_diya",
                Color::rgb(0xFF, 0xF5, 0xE1),
                DecorSet::FestiveLamps,
            ),
        ]
        .into_iter()
        .map(|(id, color, decor)| (id.to_owned(), BackgroundStyle { color, decor }))
        .collect();
        Self { entries }
    }

    /// Built-in palette extended (or overridden) by document entries.
    pub fn with_overrides(defs: &[BackgroundDef]) -> StoryResult<Self> {
        let mut palette = Self::builtin();
        for (i, def) in defs.iter().enumerate() {
            if def.id.trim().is_empty() {
                return Err(StoryError::configuration(format!(
                    "backgrounds[{i}]: id must be non-empty"
                )));
            }
            palette.entries.insert(
                def.id.clone(),
                BackgroundStyle {
                    color: def.color,
                    decor: def.decor,
                },
            );
        }
        Ok(palette)
    }

    /// Look a background up by id.
    pub fn lookup(&self, id: &str) -> StoryResult<BackgroundStyle> {
        self.entries
            .get(id)
            .copied()
            .ok_or_else(|| StoryError::unknown_background(id))
    }

    /// Look a background up, applying `policy` when the id is missing.
    pub fn resolve(&self, id: &str, policy: BackgroundPolicy) -> StoryResult<BackgroundStyle> {
        match (self.lookup(id), policy) {
            (Ok(style), _) => Ok(style),
            (Err(_), BackgroundPolicy::FallbackToDefault) => {
                tracing::warn!(background = id, "unknown background, using fallback fill");
                Ok(BackgroundStyle {
                    color: FALLBACK_BACKGROUND_COLOR,
                    decor: DecorSet::Plain,
                })
            }
            (Err(e), BackgroundPolicy::Strict) => Err(e),
        }
    }

    /// Ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Background ids in authoring-menu order.
pub const BUILTIN_BACKGROUND_IDS: [&str; 4] = [
    "home_living_room",
    "home_window_view",
    "neighbor_door",
    "home_living_room_diya",
];
