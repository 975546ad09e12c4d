use rayon::prelude::*;

use crate::{
    compose::{
        cards::CardRenderer,
        frame::{FrameContent, FrameDescription},
    },
    foundation::{
        core::{Canvas, FrameIndex, FrameRange, Fps},
        error::{StoryError, StoryResult},
    },
    scene::renderer::{RenderOptions, SceneRenderer},
    story::{document::StoryDocument, palette::BackgroundPalette, registry::CharacterRegistry},
    timeline::schedule::{Schedule, ScheduleOptions, SegmentKind},
};

/// Everything that shapes a storyboard besides the document itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StoryboardOptions {
    /// Timeline layout.
    pub schedule: ScheduleOptions,
    /// Per-frame evaluation.
    pub render: RenderOptions,
}

/// A validated story ready to be queried frame by frame.
///
/// Building resolves every character and background id up front, so [`Storyboard::render`]
/// only fails for frames outside the timeline.
#[derive(Clone, Debug)]
pub struct Storyboard {
    title: String,
    fps: Fps,
    canvas: Canvas,
    schedule: Schedule,
    title_card: CardRenderer,
    scenes: Vec<SceneRenderer>,
    end_card: CardRenderer,
}

impl Storyboard {
    /// Validate `doc` and precompute its schedule and scene renderers.
    #[tracing::instrument(skip(doc, opts), fields(title = %doc.title))]
    pub fn build(doc: &StoryDocument, opts: &StoryboardOptions) -> StoryResult<Self> {
        opts.render.spring.validate()?;
        let schedule = Schedule::build(doc, &opts.schedule)?;
        let fps = doc.fps()?;
        let registry = CharacterRegistry::from_cast(&doc.cast)?;
        let palette = BackgroundPalette::with_overrides(&doc.backgrounds)?;

        let scenes = doc
            .scenes
            .iter()
            .enumerate()
            .map(|(i, scene)| {
                SceneRenderer::prepare(
                    scene,
                    i,
                    doc.scenes.len(),
                    &registry,
                    &palette,
                    opts.schedule.unknown_background,
                    fps,
                    opts.render,
                )
            })
            .collect::<StoryResult<Vec<_>>>()?;

        tracing::debug!(
            scenes = scenes.len(),
            characters = registry.len(),
            total_frames = schedule.total_frames(),
            "storyboard built"
        );

        let canvas = opts.render.canvas;
        Ok(Self {
            title: doc.title.clone(),
            fps,
            canvas,
            title_card: CardRenderer::title(doc, opts.schedule.title_frames, canvas),
            end_card: CardRenderer::end(doc, opts.schedule.end_frames, canvas),
            scenes,
            schedule,
        })
    }

    /// Story title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Timeline frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Timeline layout.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Take the timeline layout, dropping the renderers.
    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }

    /// Timeline length in frames.
    pub fn total_frames(&self) -> u64 {
        self.schedule.total_frames()
    }

    /// Describe one global frame. Pure: the same frame always yields the same description.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn render(&self, frame: FrameIndex) -> StoryResult<FrameDescription> {
        let resolved = self.schedule.resolve(frame)?;
        let local = resolved.local;
        let content = match resolved.segment.kind {
            SegmentKind::TitleCard => FrameContent::TitleCard(self.title_card.frame(local)),
            SegmentKind::EndCard => FrameContent::EndCard(self.end_card.frame(local)),
            SegmentKind::Scene { index, .. } => {
                let scene = self.scenes.get(index).ok_or_else(|| {
                    StoryError::configuration(format!("no renderer for scene #{index}"))
                })?;
                FrameContent::Scene(Box::new(scene.frame(local, frame)?))
            }
        };
        Ok(FrameDescription {
            frame,
            total_frames: self.schedule.total_frames(),
            segment: resolved.segment.kind,
            local_frame: local,
            content,
        })
    }

    /// Describe every frame of `range` in parallel, returned in frame order.
    ///
    /// `threads` caps the worker count; `None` uses the global rayon pool.
    #[tracing::instrument(skip(self))]
    pub fn describe_range(
        &self,
        range: FrameRange,
        threads: Option<usize>,
    ) -> StoryResult<Vec<FrameDescription>> {
        if range.end.0 > self.total_frames() {
            return Err(StoryError::OutOfRange {
                frame: range.end.0.saturating_sub(1),
                total: self.total_frames(),
            });
        }
        let work = || {
            (range.start.0..range.end.0)
                .into_par_iter()
                .map(|f| self.render(FrameIndex(f)))
                .collect::<StoryResult<Vec<_>>>()
        };
        match threads {
            None => work(),
            Some(n) => build_thread_pool(n)?.install(work),
        }
    }
}

/// Validate `doc` fully (including ids) and return its timeline layout.
pub fn build_schedule(doc: &StoryDocument, opts: &StoryboardOptions) -> StoryResult<Schedule> {
    Ok(Storyboard::build(doc, opts)?.into_schedule())
}

fn build_thread_pool(threads: usize) -> StoryResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(StoryError::configuration("thread count must be >= 1"));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| StoryError::configuration(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/storyboard.rs"]
mod tests;
