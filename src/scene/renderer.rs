use kurbo::{Affine, Point, Vec2};

use crate::{
    animation::{envelope::Envelope, spring::SpringConfig},
    foundation::{
        color::Color,
        core::{Canvas, FrameIndex, Fps, Percent2},
        error::{StoryError, StoryResult},
    },
    scene::{
        decor::{Decoration, decorations_for},
        layout::resolve_position,
        pose::{FaceGeometry, bounce_offset, face_for},
    },
    story::{
        document::{Expression, Scene},
        palette::{BackgroundPalette, BackgroundPolicy, BackgroundStyle, DecorSet},
        registry::{BodyPlan, CharacterDefinition, CharacterRegistry},
    },
};

/// Frames between consecutive character entrances.
pub const ENTRY_STAGGER_FRAMES: u64 = 10;

/// Width and height of the view box characters are drawn in.
pub const CHARACTER_VIEW_BOX: (f64, f64) = (100.0, 150.0);

/// Per-frame evaluation settings shared by every segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output canvas.
    pub canvas: Canvas,
    /// Character entry spring.
    pub spring: SpringConfig,
}

/// A text overlay and its opacity for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextOverlay {
    /// Displayed text.
    pub text: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Everything needed to draw one character in one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CharacterState {
    /// Registry id.
    pub id: String,
    /// Label text.
    pub name: String,
    /// Accent color.
    pub color: Color,
    /// Body to draw.
    pub body: BodyPlan,
    /// Slot in percent of the frame.
    pub position: Percent2,
    /// Slot in canvas pixels.
    pub anchor: Point,
    /// Expression.
    pub expression: Expression,
    /// Eyes and mouth.
    pub face: FaceGeometry,
    /// Rendered width in pixels.
    pub size: f64,
    /// Frames after scene start at which the entrance begins.
    pub entry_delay: u64,
    /// Spring entrance progress in `[0, 1]`.
    pub progress: f64,
    /// Entrance scale (equal to `progress`).
    pub scale: f64,
    /// Entrance opacity (equal to `progress`).
    pub opacity: f64,
    /// Vertical bounce in view-box units.
    pub bounce: f64,
    /// Maps the character view box onto the canvas.
    pub transform: Affine,
}

/// Evaluated state of one scene at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneFrame {
    /// Scene id.
    pub scene_id: u32,
    /// One-based position of the scene in the story.
    pub scene_number: usize,
    /// Total scene count.
    pub scene_count: usize,
    /// Background id as authored.
    pub background: String,
    /// Background fill.
    pub background_color: Color,
    /// Decoration set of the background.
    pub decor: DecorSet,
    /// Decorations at this frame.
    pub decorations: Vec<Decoration>,
    /// Characters in entry order.
    pub characters: Vec<CharacterState>,
    /// Narration at the top of the frame.
    pub narrator: TextOverlay,
    /// Spoken line; absent when the scene has no dialogue.
    pub dialogue: Option<TextOverlay>,
}

#[derive(Clone, Debug)]
struct PreparedCharacter {
    def: CharacterDefinition,
    position: Percent2,
    expression: Expression,
    size: f64,
    entry_delay: u64,
}

/// A scene with every id resolved, ready to be evaluated at any local frame.
#[derive(Clone, Debug)]
pub struct SceneRenderer {
    scene_id: u32,
    scene_number: usize,
    scene_count: usize,
    duration: u64,
    background: String,
    style: BackgroundStyle,
    characters: Vec<PreparedCharacter>,
    narrator: String,
    dialogue: Option<String>,
    narrator_env: Envelope,
    dialogue_env: Envelope,
    opening: bool,
    fps: Fps,
    opts: RenderOptions,
}

impl SceneRenderer {
    /// Resolve the scene at `index` (of `scene_count`) against the registry and palette.
    ///
    /// Unknown character ids always fail; unknown backgrounds fail unless `policy` allows the
    /// fallback fill.
    #[allow(clippy::too_many_arguments)]
    pub fn prepare(
        scene: &Scene,
        index: usize,
        scene_count: usize,
        registry: &CharacterRegistry,
        palette: &BackgroundPalette,
        policy: BackgroundPolicy,
        fps: Fps,
        opts: RenderOptions,
    ) -> StoryResult<Self> {
        let style = palette.resolve(&scene.background, policy)?;
        let characters = scene
            .characters
            .iter()
            .enumerate()
            .map(|(i, placement)| {
                let def = registry.lookup(&placement.character)?.clone();
                let position = resolve_position(scene, i).ok_or_else(|| {
                    StoryError::configuration(format!(
                        "scene {}: no layout slot for character #{i}",
                        scene.id
                    ))
                })?;
                Ok(PreparedCharacter {
                    def,
                    position,
                    expression: placement.expression,
                    size: placement.size,
                    entry_delay: i as u64 * ENTRY_STAGGER_FRAMES,
                })
            })
            .collect::<StoryResult<Vec<_>>>()?;

        let d = scene.duration_frames as f64;
        Ok(Self {
            scene_id: scene.id,
            scene_number: index + 1,
            scene_count,
            duration: scene.duration_frames,
            background: scene.background.clone(),
            style,
            characters,
            narrator: scene.narrator.clone(),
            dialogue: scene.dialogue.clone(),
            narrator_env: Envelope::fade(0.0, 15.0, d - 15.0, d),
            dialogue_env: Envelope::fade(20.0, 35.0, d - 10.0, d),
            opening: index == 0,
            fps,
            opts,
        })
    }

    /// Scene id.
    pub fn scene_id(&self) -> u32 {
        self.scene_id
    }

    /// Scene length in frames.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Evaluate at `local` (scene-relative) and `global` (timeline) frames.
    ///
    /// Entrances and text fades follow `local`; ambient decoration follows `global`.
    pub fn frame(&self, local: FrameIndex, global: FrameIndex) -> StoryResult<SceneFrame> {
        if local.0 >= self.duration {
            return Err(StoryError::OutOfRange {
                frame: local.0,
                total: self.duration,
            });
        }
        let canvas = self.opts.canvas;
        let characters = self
            .characters
            .iter()
            .map(|c| self.character_state(c, local))
            .collect();
        let f = local.0 as f64;

        Ok(SceneFrame {
            scene_id: self.scene_id,
            scene_number: self.scene_number,
            scene_count: self.scene_count,
            background: self.background.clone(),
            background_color: self.style.color,
            decor: self.style.decor,
            decorations: decorations_for(self.style.decor, self.opening, global, canvas),
            characters,
            narrator: TextOverlay {
                text: self.narrator.clone(),
                opacity: self.narrator_env.sample(f),
            },
            dialogue: self.dialogue.as_ref().map(|text| TextOverlay {
                text: text.clone(),
                opacity: self.dialogue_env.sample(f),
            }),
        })
    }

    fn character_state(&self, c: &PreparedCharacter, local: FrameIndex) -> CharacterState {
        let elapsed = local.0.saturating_sub(c.entry_delay);
        let progress = self.opts.spring.progress(elapsed as f64, self.fps);
        let bounce = bounce_offset(c.expression, elapsed);
        let anchor = c.position.to_point(self.opts.canvas);
        let (vb_w, vb_h) = CHARACTER_VIEW_BOX;
        let unit = c.size / vb_w;

        // View box centered on the anchor, grown from its center by the entrance.
        let transform = Affine::translate(anchor.to_vec2())
            * Affine::scale(progress)
            * Affine::translate(Vec2::new(-c.size / 2.0, -c.size * vb_h / vb_w / 2.0))
            * Affine::scale(unit)
            * Affine::translate(Vec2::new(0.0, bounce));

        CharacterState {
            id: c.def.id.clone(),
            name: c.def.name.clone(),
            color: c.def.color,
            body: c.def.body,
            position: c.position,
            anchor,
            expression: c.expression,
            face: face_for(c.expression),
            size: c.size,
            entry_delay: c.entry_delay,
            progress,
            scale: progress,
            opacity: progress,
            bounce,
            transform,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/renderer.rs"]
mod tests;
