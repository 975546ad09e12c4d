//! Title and end cards.
//!
//! Timing is authored against a 90-frame title card and a 120-frame end card; other card
//! lengths stretch every key proportionally.

use crate::{
    animation::envelope::Envelope,
    foundation::{
        color::Color,
        core::{Canvas, FrameIndex},
    },
    scene::decor::{Decoration, END_STARS, StarSpec, TITLE_STARS, stars},
    story::document::StoryDocument,
};

const TITLE_REF_FRAMES: f64 = 90.0;
const END_REF_FRAMES: f64 = 120.0;

/// Heading of the end card.
pub const MORAL_HEADING: &str = "The Moral of the Story";

/// Which card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Opening card.
    Title,
    /// Closing card.
    End,
}

/// Evaluated card at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CardFrame {
    /// Which card.
    pub kind: CardKind,
    /// Diagonal gradient, top-left to bottom-right.
    pub gradient: [Color; 2],
    /// Text block opacity.
    pub opacity: f64,
    /// Text block scale around the canvas center.
    pub scale: f64,
    /// Large line.
    pub heading: String,
    /// Line below the heading.
    pub body: String,
    /// Small closing line.
    pub footer: Option<String>,
    /// Twinkling stars.
    pub stars: Vec<Decoration>,
}

/// A card with its envelopes precomputed for a given length.
#[derive(Clone, Debug)]
pub struct CardRenderer {
    kind: CardKind,
    gradient: [Color; 2],
    heading: String,
    body: String,
    footer: Option<String>,
    stars: &'static [StarSpec],
    opacity: Envelope,
    scale: Envelope,
    canvas: Canvas,
}

impl CardRenderer {
    /// Title card: story title over "A Story About {theme}".
    pub fn title(doc: &StoryDocument, frames: u64, canvas: Canvas) -> Self {
        let k = frames as f64 / TITLE_REF_FRAMES;
        Self {
            kind: CardKind::Title,
            gradient: [Color::rgb(0xFF, 0x6B, 0x35), Color::rgb(0xF7, 0x93, 0x1E)],
            heading: doc.title.clone(),
            body: format!("A Story About {}", doc.theme),
            footer: None,
            stars: &TITLE_STARS,
            opacity: Envelope::fade(0.0, 20.0 * k, 70.0 * k, 90.0 * k),
            scale: Envelope::ramp(0.0, 20.0 * k, 0.8, 1.0),
            canvas,
        }
    }

    /// End card: the quoted moral and the optional sign-off.
    pub fn end(doc: &StoryDocument, frames: u64, canvas: Canvas) -> Self {
        let k = frames as f64 / END_REF_FRAMES;
        Self {
            kind: CardKind::End,
            gradient: [Color::rgb(0x9B, 0x59, 0xB6), Color::rgb(0x8E, 0x44, 0xAD)],
            heading: MORAL_HEADING.to_owned(),
            body: format!("\u{201C}{}\u{201D}", doc.moral),
            footer: doc.sign_off.clone(),
            stars: &END_STARS,
            opacity: Envelope::fade(0.0, 20.0 * k, 100.0 * k, 120.0 * k),
            scale: Envelope::ramp(0.0, 20.0 * k, 0.9, 1.0),
            canvas,
        }
    }

    /// Evaluate at a card-local frame.
    pub fn frame(&self, local: FrameIndex) -> CardFrame {
        let f = local.0 as f64;
        CardFrame {
            kind: self.kind,
            gradient: self.gradient,
            opacity: self.opacity.sample(f),
            scale: self.scale.sample(f),
            heading: self.heading.clone(),
            body: self.body.clone(),
            footer: self.footer.clone(),
            stars: stars(self.stars, local, self.canvas),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/cards.rs"]
mod tests;
