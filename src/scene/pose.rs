//! Expression lookup: facial geometry in the 100x150 character view box, plus the excited bounce.

use crate::story::document::Expression;

/// Peak vertical bounce of an excited character, in view-box units.
pub const BOUNCE_AMPLITUDE: f64 = 5.0;
/// Frames per radian of the bounce wave.
pub const BOUNCE_PERIOD_DIVISOR: f64 = 10.0;

/// Mouth shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Mouth {
    /// Quadratic curve from `(40, end_y)` to `(60, end_y)` through control `(50, control_y)`.
    /// A control below the ends smiles; above frowns.
    Curve {
        /// Y of both corners.
        end_y: f64,
        /// Y of the control point.
        control_y: f64,
        /// Stroke width.
        stroke_width: f64,
    },
    /// Straight line from `(40, y)` to `(60, y)`.
    Line {
        /// Y of the line.
        y: f64,
    },
    /// Open "o" mouth.
    Open {
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
    },
}

/// Eyes and mouth for one expression.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FaceGeometry {
    /// Eye radius; eyes sit at x = 42 and x = 58.
    pub eye_radius: f64,
    /// Eye center y.
    pub eye_y: f64,
    /// Mouth.
    pub mouth: Mouth,
}

/// Pure lookup from expression to face.
pub fn face_for(expression: Expression) -> FaceGeometry {
    match expression {
        Expression::Happy => FaceGeometry {
            eye_radius: 2.0,
            eye_y: 27.0,
            mouth: Mouth::Curve {
                end_y: 35.0,
                control_y: 40.0,
                stroke_width: 2.0,
            },
        },
        Expression::Excited => FaceGeometry {
            eye_radius: 3.0,
            eye_y: 27.0,
            mouth: Mouth::Curve {
                end_y: 36.0,
                control_y: 42.0,
                stroke_width: 2.5,
            },
        },
        Expression::Thinking => FaceGeometry {
            eye_radius: 2.0,
            eye_y: 28.0,
            mouth: Mouth::Line { y: 35.0 },
        },
        Expression::Surprised => FaceGeometry {
            eye_radius: 3.0,
            eye_y: 26.0,
            mouth: Mouth::Open { cy: 36.0, r: 4.0 },
        },
        Expression::Sad => FaceGeometry {
            eye_radius: 2.0,
            eye_y: 28.0,
            mouth: Mouth::Curve {
                end_y: 38.0,
                control_y: 33.0,
                stroke_width: 2.0,
            },
        },
    }
}

/// Vertical offset for `elapsed` frames since the character's entry; zero unless excited.
pub fn bounce_offset(expression: Expression, elapsed: u64) -> f64 {
    match expression {
        Expression::Excited => BOUNCE_AMPLITUDE * (elapsed as f64 / BOUNCE_PERIOD_DIVISOR).sin(),
        _ => 0.0,
    }
}
