use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use crate::{
    foundation::core::{Fps, Percent2},
    foundation::error::{StoryError, StoryResult},
    scene::layout::AUTO_LAYOUT_MAX,
    story::palette::BackgroundDef,
    story::registry::CharacterDefinition,
};

/// A complete authored story: metadata, cast, and ordered scenes.
///
/// The document is a pure data model; it is validated and turned into a timeline by
/// [`crate::Storyboard::build`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryDocument {
    /// Story title, shown on the title card.
    pub title: String,
    /// Theme line, shown under the title.
    pub theme: String,
    /// Moral, shown on the end card.
    pub moral: String,
    /// Closing line at the foot of the end card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_off: Option<String>,
    /// Frames per second.
    pub frame_rate: u32,
    /// Language tag for the text overlays.
    #[serde(default = "default_language")]
    pub language: String,
    /// Characters available to placements, keyed by their `id`.
    #[serde(default)]
    pub cast: Vec<CharacterDefinition>,
    /// Extra or overriding background palette entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backgrounds: Vec<BackgroundDef>,
    /// Scenes in playback order.
    pub scenes: Vec<Scene>,
}

fn default_language() -> String {
    "English".to_owned()
}

/// One scene of the story.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Positive, unique scene id.
    pub id: u32,
    /// Scene length in frames.
    pub duration_frames: u64,
    /// Background palette key.
    pub background: String,
    /// Narration shown at the top of the frame.
    pub narrator: String,
    /// Spoken line shown at the bottom; `None` hides the dialogue box entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialogue: Option<String>,
    /// Stage direction for authors. Never rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Characters in entry order.
    #[serde(default)]
    pub characters: Vec<CharacterPlacement>,
}

/// A character's placement within one scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CharacterPlacement {
    /// Registry key.
    pub character: String,
    /// Explicit position in percent; `None` uses the automatic layout table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Percent2>,
    /// Facial expression.
    pub expression: Expression,
    /// Rendered width in pixels (height is 1.5x).
    #[serde(default = "default_size")]
    pub size: f64,
}

fn default_size() -> f64 {
    100.0
}

/// Closed set of facial expressions.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// Smiling.
    #[default]
    Happy,
    /// Frowning.
    Sad,
    /// Big smile, bouncing.
    Excited,
    /// Flat mouth.
    Thinking,
    /// Open mouth.
    Surprised,
}

impl Expression {
    /// All expressions in authoring-menu order.
    pub const ALL: [Expression; 5] = [
        Expression::Happy,
        Expression::Excited,
        Expression::Thinking,
        Expression::Surprised,
        Expression::Sad,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Excited => "excited",
            Self::Thinking => "thinking",
            Self::Surprised => "surprised",
        }
    }

    /// Parse a wire name (case-insensitive, surrounding whitespace ignored).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s))
    }
}

impl StoryDocument {
    /// Parse a story document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StoryResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StoryError::serde(format!("parse story document JSON: {e}")))
    }

    /// Parse a story document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StoryError::serde(format!("open story document '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Write pretty-printed JSON.
    pub fn to_writer_pretty<W: std::io::Write>(&self, w: W) -> StoryResult<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|e| StoryError::serde(format!("write story document JSON: {e}")))
    }

    /// Write pretty-printed JSON to `path`, creating parent directories.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> StoryResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoryError::serde(format!("create directory '{}': {e}", parent.display()))
            })?;
        }
        let f = File::create(path).map_err(|e| {
            StoryError::serde(format!("create story document '{}': {e}", path.display()))
        })?;
        let mut w = BufWriter::new(f);
        self.to_writer_pretty(&mut w)?;
        w.write_all(b"\n")
            .and_then(|()| w.flush())
            .map_err(|e| StoryError::serde(format!("write '{}': {e}", path.display())))
    }

    /// Timeline frame rate.
    pub fn fps(&self) -> StoryResult<Fps> {
        Fps::new(self.frame_rate, 1)
    }

    /// Structural checks that need no registry or palette.
    pub fn validate(&self) -> StoryResult<()> {
        if self.frame_rate == 0 {
            return Err(StoryError::configuration("frame_rate must be > 0"));
        }
        if self.scenes.is_empty() {
            return Err(StoryError::configuration(
                "story must contain at least one scene",
            ));
        }

        let mut ids = HashSet::with_capacity(self.scenes.len());
        for (i, scene) in self.scenes.iter().enumerate() {
            if scene.id == 0 {
                return Err(StoryError::configuration(format!(
                    "scenes[{i}]: id must be a positive integer"
                )));
            }
            if !ids.insert(scene.id) {
                return Err(StoryError::configuration(format!(
                    "scenes[{i}]: duplicate scene id {}",
                    scene.id
                )));
            }
            scene.validate()?;
        }
        Ok(())
    }
}

impl Scene {
    fn validate(&self) -> StoryResult<()> {
        if self.duration_frames == 0 {
            return Err(StoryError::configuration(format!(
                "scene {}: duration_frames must be > 0",
                self.id
            )));
        }

        let needs_auto_layout = self.characters.iter().any(|c| c.position.is_none());
        if needs_auto_layout && self.characters.len() > AUTO_LAYOUT_MAX {
            return Err(StoryError::configuration(format!(
                "scene {}: {} characters need explicit positions (automatic layout covers at most {AUTO_LAYOUT_MAX})",
                self.id,
                self.characters.len()
            )));
        }

        for (j, placement) in self.characters.iter().enumerate() {
            if let Some(p) = placement.position
                && !p.is_normalized()
            {
                return Err(StoryError::configuration(format!(
                    "scene {} character {j} ('{}'): position ({}, {}) must lie in [0, 100]",
                    self.id, placement.character, p.x, p.y
                )));
            }
            if !placement.size.is_finite() || placement.size <= 0.0 {
                return Err(StoryError::configuration(format!(
                    "scene {} character {j} ('{}'): size must be > 0",
                    self.id, placement.character
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/story/document.rs"]
mod tests;
