//! storyreel composes short animated stories into a frame-exact timeline.
//!
//! A [`StoryDocument`] (title, cast, ordered scenes) is validated into a [`Storyboard`]:
//!
//! - a title card, one segment per scene, and an end card laid out by a prefix sum ([`Schedule`])
//! - per-frame state for any global frame ([`Storyboard::render`]): staggered spring entrances,
//!   expressions, text fades, and ambient background decoration
//! - optional SVG export ([`to_svg`]) and rasterization ([`Rasterizer`])
//!
//! Rendering is a pure function of the document and the frame index.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod authoring;
pub(crate) mod compose;
pub(crate) mod export;
pub(crate) mod scene;
pub(crate) mod story;
pub(crate) mod timeline;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Percent2, Point, Vec2,
};
pub use crate::foundation::error::{StoryError, StoryResult};

pub use crate::animation::envelope::{Envelope, EnvelopeKey};
pub use crate::animation::spring::SpringConfig;

pub use crate::story::document::{CharacterPlacement, Expression, Scene, StoryDocument};
pub use crate::story::palette::{
    BUILTIN_BACKGROUND_IDS, BackgroundDef, BackgroundPalette, BackgroundPolicy, BackgroundStyle,
    DecorSet, FALLBACK_BACKGROUND_COLOR,
};
pub use crate::story::registry::{
    BodyPlan, CharacterDefinition, CharacterRegistry, CharacterTemplate, character_id_for,
};

pub use crate::scene::decor::{Decoration, decorations_for, flicker, twinkle};
pub use crate::scene::layout::{AUTO_LAYOUT_MAX, default_positions};
pub use crate::scene::pose::{FaceGeometry, Mouth, bounce_offset, face_for};
pub use crate::scene::renderer::{
    CharacterState, ENTRY_STAGGER_FRAMES, RenderOptions, SceneFrame, SceneRenderer, TextOverlay,
};

pub use crate::timeline::schedule::{
    DEFAULT_END_FRAMES, DEFAULT_TITLE_FRAMES, Resolved, Schedule, ScheduleOptions, Segment,
    SegmentKind,
};

pub use crate::compose::cards::{CardFrame, CardKind, CardRenderer, MORAL_HEADING};
pub use crate::compose::frame::{FrameContent, FrameDescription};
pub use crate::compose::storyboard::{Storyboard, StoryboardOptions, build_schedule};

pub use crate::export::raster::{Rasterizer, RgbaFrame, rasterize};
pub use crate::export::svg::to_svg;

pub use crate::authoring::prompt::Prompter;
pub use crate::authoring::wizard::{AuthoringOptions, run_interactive, story_filename};
