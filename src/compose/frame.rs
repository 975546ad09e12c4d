use crate::{
    compose::cards::CardFrame,
    foundation::core::FrameIndex,
    scene::renderer::SceneFrame,
    timeline::schedule::SegmentKind,
};

/// Content of one frame, by segment type.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "state", rename_all = "snake_case")]
pub enum FrameContent {
    /// Opening card.
    TitleCard(CardFrame),
    /// A scene.
    Scene(Box<SceneFrame>),
    /// Closing card.
    EndCard(CardFrame),
}

/// Full description of one global frame: what to draw and where it sits on the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameDescription {
    /// Global frame.
    pub frame: FrameIndex,
    /// Timeline length in frames.
    pub total_frames: u64,
    /// Owning segment.
    pub segment: SegmentKind,
    /// Frame relative to the segment start.
    pub local_frame: FrameIndex,
    /// Evaluated content.
    pub content: FrameContent,
}

impl FrameDescription {
    /// The scene state, when this frame belongs to a scene.
    pub fn scene(&self) -> Option<&SceneFrame> {
        match &self.content {
            FrameContent::Scene(s) => Some(s),
            _ => None,
        }
    }

    /// The card state, when this frame belongs to the title or end card.
    pub fn card(&self) -> Option<&CardFrame> {
        match &self.content {
            FrameContent::TitleCard(c) | FrameContent::EndCard(c) => Some(c),
            FrameContent::Scene(_) => None,
        }
    }
}
