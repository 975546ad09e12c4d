use crate::{
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{StoryError, StoryResult},
    },
    story::{document::StoryDocument, palette::BackgroundPolicy},
};

/// Default title card length in frames (3 s at 30 fps).
pub const DEFAULT_TITLE_FRAMES: u64 = 90;
/// Default end card length in frames (4 s at 30 fps).
pub const DEFAULT_END_FRAMES: u64 = 120;

/// Knobs for laying out the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    /// Title card length in frames.
    pub title_frames: u64,
    /// End card length in frames.
    pub end_frames: u64,
    /// Handling of background ids missing from the palette.
    pub unknown_background: BackgroundPolicy,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            title_frames: DEFAULT_TITLE_FRAMES,
            end_frames: DEFAULT_END_FRAMES,
            unknown_background: BackgroundPolicy::Strict,
        }
    }
}

impl ScheduleOptions {
    /// Reject zero-length cards.
    pub fn validate(&self) -> StoryResult<()> {
        if self.title_frames == 0 {
            return Err(StoryError::configuration("title card length must be > 0"));
        }
        if self.end_frames == 0 {
            return Err(StoryError::configuration("end card length must be > 0"));
        }
        Ok(())
    }
}

/// What a segment shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentKind {
    /// Opening card with title and theme.
    TitleCard,
    /// One authored scene.
    Scene {
        /// Position in the document's scene list.
        index: usize,
        /// Scene id.
        id: u32,
    },
    /// Closing card with the moral.
    EndCard,
}

/// A contiguous slice of the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Segment {
    /// Content shown.
    #[serde(flatten)]
    pub kind: SegmentKind,
    /// Covered frames.
    pub range: FrameRange,
}

/// Result of locating a global frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Owning segment.
    pub segment: &'a Segment,
    /// Position of the segment in [`Schedule::segments`].
    pub index: usize,
    /// Frame relative to the segment start.
    pub local: FrameIndex,
}

/// Ordered, gap-free segments covering `[0, total)`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Schedule {
    segments: Vec<Segment>,
    total: u64,
}

impl Schedule {
    /// Lay out title card, scenes in document order, and end card.
    ///
    /// Performs the structural document checks; id resolution against the registry and
    /// palette happens when the storyboard is built.
    pub fn build(doc: &StoryDocument, opts: &ScheduleOptions) -> StoryResult<Self> {
        doc.validate()?;
        opts.validate()?;

        let mut lengths = std::iter::once((SegmentKind::TitleCard, opts.title_frames))
            .chain(doc.scenes.iter().enumerate().map(|(index, scene)| {
                (
                    SegmentKind::Scene {
                        index,
                        id: scene.id,
                    },
                    scene.duration_frames,
                )
            }))
            .chain(std::iter::once((SegmentKind::EndCard, opts.end_frames)));

        let (segments, total) = lengths.try_fold(
            (Vec::with_capacity(doc.scenes.len() + 2), 0u64),
            |(mut segments, start), (kind, len)| {
                let range = FrameRange::with_len(FrameIndex(start), len)
                    .map_err(|_| StoryError::configuration("timeline length overflows u64"))?;
                segments.push(Segment { kind, range });
                Ok::<_, StoryError>((segments, range.end.0))
            },
        )?;

        Ok(Self { segments, total })
    }

    /// Segments in playback order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Timeline length in frames.
    pub fn total_frames(&self) -> u64 {
        self.total
    }

    /// The whole timeline as a range.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total),
        }
    }

    /// Segment of the scene at `index` in document order.
    pub fn scene_segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index + 1)
    }

    /// Locate the segment owning `frame`. Boundary frames belong to the segment starting there.
    pub fn resolve(&self, frame: FrameIndex) -> StoryResult<Resolved<'_>> {
        if frame.0 >= self.total {
            return Err(StoryError::OutOfRange {
                frame: frame.0,
                total: self.total,
            });
        }
        let index = self
            .segments
            .partition_point(|s| s.range.start.0 <= frame.0)
            .saturating_sub(1);
        let segment = &self.segments[index];
        Ok(Resolved {
            segment,
            index,
            local: FrameIndex(frame.0 - segment.range.start.0),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/schedule.rs"]
mod tests;
