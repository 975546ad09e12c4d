use kurbo::{Point, Rect};

use crate::{
    animation::envelope::remap_unit_wave,
    foundation::core::{Canvas, FrameIndex},
    story::palette::DecorSet,
};

/// Reference canvas the decoration coordinates are authored against.
const REF_WIDTH: f64 = 1280.0;
const REF_HEIGHT: f64 = 720.0;

/// A decorative element, positioned in canvas pixels, with its animated values for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoration {
    /// Oil lamp with a flickering flame.
    Diya {
        /// Top-left corner.
        origin: Point,
        /// Edge length of the square lamp box.
        size: f64,
        /// Flame scale in `[0.9, 1.1]`.
        flame_scale: f64,
        /// Flame opacity in `[0.8, 1.0]`.
        flame_opacity: f64,
    },
    /// Radial floor pattern.
    Rangoli {
        /// Top-left corner.
        origin: Point,
        /// Edge length.
        size: f64,
    },
    /// Twinkling star.
    Star {
        /// Top-left corner.
        origin: Point,
        /// Edge length.
        size: f64,
        /// Opacity in `[0.6, 1.0]`.
        opacity: f64,
    },
    /// Plate of sweets.
    SweetPlate {
        /// Top-left corner.
        origin: Point,
        /// Edge length.
        size: f64,
    },
    /// Wooden door with a knob.
    Door {
        /// Door panel.
        panel: Rect,
        /// Knob bounds.
        knob: Rect,
    },
    /// Four-pane window with a house visible in the distance.
    Window {
        /// Window frame.
        frame: Rect,
        /// Distant house.
        house: Rect,
    },
}

/// Static placement of one star.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StarSpec {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) size: f64,
    pub(crate) delay: f64,
}

const fn star(x: f64, y: f64, size: f64, delay: f64) -> StarSpec {
    StarSpec { x, y, size, delay }
}

const FESTIVE_STARS: [StarSpec; 3] = [
    star(200.0, 100.0, 30.0, 10.0),
    star(1000.0, 150.0, 25.0, 20.0),
    star(600.0, 80.0, 20.0, 15.0),
];

pub(crate) const TITLE_STARS: [StarSpec; 5] = [
    star(100.0, 100.0, 40.0, 0.0),
    star(1100.0, 150.0, 35.0, 10.0),
    star(200.0, 600.0, 30.0, 5.0),
    star(1000.0, 550.0, 38.0, 15.0),
    star(600.0, 100.0, 32.0, 8.0),
];

pub(crate) const END_STARS: [StarSpec; 4] = [
    star(150.0, 120.0, 35.0, 0.0),
    star(1050.0, 180.0, 40.0, 8.0),
    star(250.0, 550.0, 32.0, 5.0),
    star(950.0, 600.0, 38.0, 12.0),
];

/// `(x, y, size, phase_frames)`; phases keep the lamps from flickering in unison.
const DIYAS: [(f64, f64, f64, f64); 4] = [
    (50.0, 500.0, 60.0, 0.0),
    (150.0, 510.0, 50.0, 7.0),
    (1150.0, 500.0, 60.0, 3.0),
    (1050.0, 510.0, 50.0, 11.0),
];

/// Scales reference-canvas coordinates onto the output canvas.
#[derive(Clone, Copy, Debug)]
struct Placer {
    sx: f64,
    sy: f64,
}

impl Placer {
    fn new(canvas: Canvas) -> Self {
        Self {
            sx: f64::from(canvas.width) / REF_WIDTH,
            sy: f64::from(canvas.height) / REF_HEIGHT,
        }
    }

    fn point(self, x: f64, y: f64) -> Point {
        Point::new(x * self.sx, y * self.sy)
    }

    fn len(self, v: f64) -> f64 {
        v * self.sx.min(self.sy)
    }

    fn rect(self, x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x * self.sx, y * self.sy, (x + w) * self.sx, (y + h) * self.sy)
    }
}

/// Star opacity, a periodic function of the global frame.
pub fn twinkle(global: FrameIndex, delay: f64) -> f64 {
    remap_unit_wave(((global.0 as f64 - delay) / 10.0).sin(), 0.6, 1.0)
}

/// `(flame_scale, flame_opacity)` of a lamp, a periodic function of the global frame.
pub fn flicker(global: FrameIndex, phase: f64) -> (f64, f64) {
    let f = global.0 as f64 + phase;
    (
        remap_unit_wave((f / 5.0).sin(), 0.9, 1.1),
        remap_unit_wave((f / 3.0).sin(), 0.8, 1.0),
    )
}

pub(crate) fn stars(specs: &[StarSpec], global: FrameIndex, canvas: Canvas) -> Vec<Decoration> {
    let place = Placer::new(canvas);
    specs
        .iter()
        .map(|s| Decoration::Star {
            origin: place.point(s.x, s.y),
            size: place.len(s.size),
            opacity: twinkle(global, s.delay),
        })
        .collect()
}

/// Decorations a background draws at `global`.
///
/// `opening_scene` is true only for the first scene of the story, where the living room shows
/// the plate of sweets.
pub fn decorations_for(
    decor: DecorSet,
    opening_scene: bool,
    global: FrameIndex,
    canvas: Canvas,
) -> Vec<Decoration> {
    let place = Placer::new(canvas);
    let w = REF_WIDTH;
    match decor {
        DecorSet::Plain => Vec::new(),
        DecorSet::LivingRoom if opening_scene => vec![Decoration::SweetPlate {
            origin: place.point(600.0, 400.0),
            size: place.len(120.0),
        }],
        DecorSet::LivingRoom => Vec::new(),
        DecorSet::WindowView => vec![Decoration::Window {
            frame: place.rect(w * 0.90 - 300.0, REF_HEIGHT * 0.15, 300.0, 250.0),
            house: place.rect(w * 0.87 - 80.0, REF_HEIGHT * 0.30, 80.0, 60.0),
        }],
        DecorSet::Doorway => vec![Decoration::Door {
            panel: place.rect(w * 0.85 - 200.0, REF_HEIGHT * 0.20, 200.0, 400.0),
            knob: place.rect(w * 0.83 - 20.0, REF_HEIGHT * 0.50, 20.0, 20.0),
        }],
        DecorSet::FestiveLamps => {
            let mut out: Vec<Decoration> = DIYAS
                .iter()
                .map(|&(x, y, size, phase)| {
                    let (flame_scale, flame_opacity) = flicker(global, phase);
                    Decoration::Diya {
                        origin: place.point(x, y),
                        size: place.len(size),
                        flame_scale,
                        flame_opacity,
                    }
                })
                .collect();
            out.push(Decoration::Rangoli {
                origin: place.point(500.0, 600.0),
                size: place.len(150.0),
            });
            out.extend(stars(&FESTIVE_STARS, global, canvas));
            out
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/decor.rs"]
mod tests;
