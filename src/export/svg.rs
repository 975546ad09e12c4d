use std::fmt::{self, Write as _};

use kurbo::{Affine, Point, Rect};

use crate::{
    compose::{
        cards::{CardFrame, CardKind},
        frame::{FrameContent, FrameDescription},
    },
    foundation::core::Canvas,
    scene::{
        decor::Decoration,
        pose::Mouth,
        renderer::{CharacterState, SceneFrame, TextOverlay},
    },
    story::registry::BodyPlan,
};

const FONT_FAMILY: &str = "Arial, sans-serif";
const INK: &str = "#2C1810";
const OUTLINE: &str = "#8B5A2B";

/// Serialize one frame as a standalone SVG document sized to `canvas`.
pub fn to_svg(desc: &FrameDescription, canvas: Canvas) -> String {
    let mut svg = Svg::default();
    svg.line(format_args!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    ));
    match &desc.content {
        FrameContent::TitleCard(card) | FrameContent::EndCard(card) => {
            write_card(&mut svg, card, canvas)
        }
        FrameContent::Scene(scene) => write_scene(&mut svg, scene, canvas),
    }
    svg.line(format_args!("</svg>"));
    svg.out
}

#[derive(Default)]
struct Svg {
    out: String,
}

impl Svg {
    fn line(&mut self, args: fmt::Arguments<'_>) {
        // Writing into a String cannot fail.
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
    }
}

/// Fixed-precision number, trailing zeros trimmed, so output is stable across platforms.
struct N(f64);

impl fmt::Display for N {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = if self.0 == 0.0 { 0.0 } else { self.0 };
        let s = format!("{v:.3}");
        let s = s.trim_end_matches('0').trim_end_matches('.');
        f.write_str(if s == "-0" { "0" } else { s })
    }
}

struct Matrix(Affine);

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0.as_coeffs();
        write!(
            f,
            "matrix({} {} {} {} {} {})",
            N(a),
            N(b),
            N(c),
            N(d),
            N(e),
            N(g)
        )
    }
}

fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            c => s.push(c),
        }
    }
    s
}

fn write_card(svg: &mut Svg, card: &CardFrame, canvas: Canvas) {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let [from, to] = card.gradient;
    svg.line(format_args!(
        r#"<defs><linearGradient id="card-bg" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="{from}"/><stop offset="1" stop-color="{to}"/></linearGradient></defs>"#
    ));
    svg.line(format_args!(
        r#"<rect width="{}" height="{}" fill="url(#card-bg)"/>"#,
        N(w),
        N(h)
    ));
    for star in &card.stars {
        write_decoration(svg, star);
    }

    let center = Point::new(w / 2.0, h / 2.0);
    let xf = Affine::translate(center.to_vec2())
        * Affine::scale(card.scale)
        * Affine::translate(-center.to_vec2());
    svg.line(format_args!(
        r##"<g transform="{}" opacity="{}" font-family="{FONT_FAMILY}" text-anchor="middle" fill="#FFFFFF">"##,
        Matrix(xf),
        N(card.opacity)
    ));
    let (heading_size, body_size) = match card.kind {
        CardKind::Title => (72.0, 36.0),
        CardKind::End => (48.0, 40.0),
    };
    svg.line(format_args!(
        r#"<text x="{}" y="{}" font-size="{}" font-weight="bold">{}</text>"#,
        N(center.x),
        N(center.y - 30.0),
        N(heading_size),
        escape(&card.heading)
    ));
    let body_style = match card.kind {
        CardKind::Title => "",
        CardKind::End => r#" font-style="italic""#,
    };
    svg.line(format_args!(
        r#"<text x="{}" y="{}" font-size="{}"{body_style}>{}</text>"#,
        N(center.x),
        N(center.y + 40.0),
        N(body_size),
        escape(&card.body)
    ));
    if let Some(footer) = &card.footer {
        svg.line(format_args!(
            r#"<text x="{}" y="{}" font-size="32">{}</text>"#,
            N(center.x),
            N(center.y + 120.0),
            escape(footer)
        ));
    }
    svg.line(format_args!("</g>"));
}

fn write_scene(svg: &mut Svg, scene: &SceneFrame, canvas: Canvas) {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    svg.line(format_args!(
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        N(w),
        N(h),
        scene.background_color
    ));
    for d in &scene.decorations {
        write_decoration(svg, d);
    }
    for c in &scene.characters {
        write_character(svg, c);
    }
    write_narrator(svg, &scene.narrator, w, h);
    if let Some(dialogue) = &scene.dialogue {
        write_dialogue(svg, dialogue, w, h);
    }
    svg.line(format_args!(
        r##"<g font-family="{FONT_FAMILY}" font-size="14"><rect x="{}" y="10" width="80" height="26" rx="5" fill="#000000" fill-opacity="0.5"/><text x="{}" y="28" fill="#FFFFFF" text-anchor="middle">Scene {}</text></g>"##,
        N(w - 90.0),
        N(w - 50.0),
        scene.scene_id
    ));
}

fn write_narrator(svg: &mut Svg, overlay: &TextOverlay, w: f64, h: f64) {
    let rect = Rect::new(w * 0.10, h * 0.05, w * 0.90, h * 0.05 + 80.0);
    svg.line(format_args!(
        r##"<g opacity="{}" font-family="{FONT_FAMILY}"><rect x="{}" y="{}" width="{}" height="{}" rx="15" fill="#FFFFFF" fill-opacity="0.9"/><text x="{}" y="{}" font-size="24" fill="{INK}" text-anchor="middle">{}</text></g>"##,
        N(overlay.opacity),
        N(rect.x0),
        N(rect.y0),
        N(rect.width()),
        N(rect.height()),
        N(rect.center().x),
        N(rect.center().y + 8.0),
        escape(&overlay.text)
    ));
}

fn write_dialogue(svg: &mut Svg, overlay: &TextOverlay, w: f64, h: f64) {
    let bottom = h * 0.92;
    let rect = Rect::new(w * 0.15, bottom - 90.0, w * 0.85, bottom);
    svg.line(format_args!(
        r##"<g opacity="{}" font-family="{FONT_FAMILY}"><rect x="{}" y="{}" width="{}" height="{}" rx="20" fill="#FFEBCD" fill-opacity="0.95" stroke="#D4A574" stroke-width="3"/><text x="{}" y="{}" font-size="28" font-weight="bold" fill="#1A1A1A" text-anchor="middle">{}</text></g>"##,
        N(overlay.opacity),
        N(rect.x0),
        N(rect.y0),
        N(rect.width()),
        N(rect.height()),
        N(rect.center().x),
        N(rect.center().y + 10.0),
        escape(&overlay.text)
    ));
}

fn write_character(svg: &mut Svg, c: &CharacterState) {
    svg.line(format_args!(
        r#"<g transform="{}" opacity="{}">"#,
        Matrix(c.transform),
        N(c.opacity)
    ));
    match c.body {
        BodyPlan::Standard => write_standard_body(svg, c),
        BodyPlan::Elder => write_elder_body(svg, c),
    }
    write_face(svg, c);
    svg.line(format_args!(
        r#"<text x="50" y="165" font-family="{FONT_FAMILY}" font-size="14" font-weight="bold" fill="{INK}" text-anchor="middle">{}</text>"#,
        escape(&c.name)
    ));
    svg.line(format_args!("</g>"));
}

fn write_standard_body(svg: &mut Svg, c: &CharacterState) {
    let color = c.color;
    svg.line(format_args!(
        r##"<circle cx="50" cy="30" r="20" fill="#FFD4A3" stroke="{OUTLINE}" stroke-width="2"/>
<path d="M 30 25 Q 25 15 35 12 Q 45 8 50 10 Q 55 8 65 12 Q 75 15 70 25" fill="#2C1810"/>
<rect x="30" y="50" width="40" height="60" rx="5" fill="{color}" stroke="{OUTLINE}" stroke-width="2"/>
<circle cx="50" cy="70" r="3" fill="#FFD700" opacity="0.6"/>
<circle cx="42" cy="80" r="2" fill="#FFD700" opacity="0.6"/>
<circle cx="58" cy="80" r="2" fill="#FFD700" opacity="0.6"/>
<rect x="22" y="52" width="8" height="35" rx="4" fill="#FFD4A3" stroke="{OUTLINE}" stroke-width="1.5"/>
<rect x="70" y="52" width="8" height="35" rx="4" fill="#FFD4A3" stroke="{OUTLINE}" stroke-width="1.5"/>
<rect x="38" y="110" width="10" height="35" rx="3" fill="{color}" stroke="{OUTLINE}" stroke-width="1.5"/>
<rect x="52" y="110" width="10" height="35" rx="3" fill="{color}" stroke="{OUTLINE}" stroke-width="1.5"/>"##
    ));
}

fn write_elder_body(svg: &mut Svg, c: &CharacterState) {
    let color = c.color;
    svg.line(format_args!(
        r##"<circle cx="50" cy="30" r="22" fill="#F4C9A0" stroke="{OUTLINE}" stroke-width="2"/>
<circle cx="42" cy="28" r="6" fill="none" stroke="#666666" stroke-width="1.5"/>
<circle cx="58" cy="28" r="6" fill="none" stroke="#666666" stroke-width="1.5"/>
<line x1="48" y1="28" x2="52" y2="28" stroke="#666666" stroke-width="1.5"/>
<path d="M 28 22 Q 25 12 35 10 Q 45 7 50 9 Q 55 7 65 10 Q 75 12 72 22" fill="#B0B0B0"/>
<circle cx="50" cy="10" r="8" fill="#B0B0B0"/>
<path d="M 30 50 L 35 110 L 45 145 L 55 145 L 65 110 L 70 50 Z" fill="{color}" stroke="#7D3C98" stroke-width="2"/>
<path d="M 70 50 Q 75 60 78 80 Q 75 70 70 75" fill="#8E44AD" stroke="#7D3C98" stroke-width="1.5"/>
<line x1="35" y1="110" x2="65" y2="110" stroke="#FFD700" stroke-width="3"/>
<rect x="20" y="52" width="10" height="35" rx="5" fill="#F4C9A0" stroke="{OUTLINE}" stroke-width="1.5"/>
<rect x="70" y="52" width="10" height="35" rx="5" fill="#F4C9A0" stroke="{OUTLINE}" stroke-width="1.5"/>"##
    ));
}

fn write_face(svg: &mut Svg, c: &CharacterState) {
    let face = c.face;
    for x in [42.0, 58.0] {
        svg.line(format_args!(
            r##"<circle cx="{}" cy="{}" r="{}" fill="#000000"/>"##,
            N(x),
            N(face.eye_y),
            N(face.eye_radius)
        ));
    }
    match face.mouth {
        Mouth::Curve {
            end_y,
            control_y,
            stroke_width,
        } => svg.line(format_args!(
            r##"<path d="M 40 {e} Q 50 {c} 60 {e}" fill="none" stroke="#000000" stroke-width="{}" stroke-linecap="round"/>"##,
            N(stroke_width),
            e = N(end_y),
            c = N(control_y)
        )),
        Mouth::Line { y } => svg.line(format_args!(
            r##"<line x1="40" y1="{y}" x2="60" y2="{y}" stroke="#000000" stroke-width="2" stroke-linecap="round"/>"##,
            y = N(y)
        )),
        Mouth::Open { cy, r } => svg.line(format_args!(
            r##"<circle cx="50" cy="{}" r="{}" fill="none" stroke="#000000" stroke-width="2"/>"##,
            N(cy),
            N(r)
        )),
    }
}

/// Opens a group mapping a `vb x vb` view box onto `size x size` at `origin`.
fn open_box(svg: &mut Svg, origin: Point, size: f64, vb: f64, opacity: Option<f64>) {
    let xf = Affine::translate(origin.to_vec2()) * Affine::scale(size / vb);
    match opacity {
        Some(o) => svg.line(format_args!(
            r#"<g transform="{}" opacity="{}">"#,
            Matrix(xf),
            N(o)
        )),
        None => svg.line(format_args!(r#"<g transform="{}">"#, Matrix(xf))),
    }
}

fn write_decoration(svg: &mut Svg, d: &Decoration) {
    match *d {
        Decoration::Diya {
            origin,
            size,
            flame_scale,
            flame_opacity,
        } => {
            open_box(svg, origin, size, 40.0, None);
            svg.line(format_args!(
                r##"<circle cx="20" cy="12" r="15" fill="#FFA500" opacity="0.2"/>
<ellipse cx="20" cy="28" rx="15" ry="5" fill="#D4A574" stroke="#8B6F47" stroke-width="1"/>
<path d="M 5 28 Q 5 20 20 18 Q 35 20 35 28" fill="#E6B87D" stroke="#8B6F47" stroke-width="1.5"/>
<ellipse cx="20" cy="22" rx="12" ry="3" fill="#FFD700" opacity="0.6"/>
<rect x="19" y="15" width="2" height="7" fill="#4A2511"/>
<g transform="translate(20 12) scale({})" opacity="{}">
<path d="M 0 0 Q -4 -8 0 -15 Q 4 -8 0 0" fill="#FFA500"/>
<path d="M 0 -2 Q -2 -6 0 -12 Q 2 -6 0 -2" fill="#FF6B35"/>
<path d="M 0 -4 Q -1 -7 0 -10 Q 1 -7 0 -4" fill="#FFFF99"/>
</g>
</g>"##,
                N(flame_scale),
                N(flame_opacity)
            ));
        }
        Decoration::Rangoli { origin, size } => {
            open_box(svg, origin, size, 100.0, None);
            svg.line(format_args!(r##"<circle cx="50" cy="50" r="8" fill="#FF6B35"/>"##));
            for (ring, step0, radius, rx, ry, fill) in [
                (6, 0.0, 15.0, 8.0, 12.0, "#FFD700"),
                (6, 30.0, 28.0, 10.0, 15.0, "#9B59B6"),
            ] {
                for i in 0..ring {
                    let angle = step0 + 60.0 * f64::from(i);
                    let (s, c) = angle.to_radians().sin_cos();
                    let (x, y) = (50.0 + c * radius, 50.0 + s * radius);
                    svg.line(format_args!(
                        r#"<ellipse cx="{x}" cy="{y}" rx="{}" ry="{}" fill="{fill}" transform="rotate({} {x} {y})"/>"#,
                        N(rx),
                        N(ry),
                        N(angle),
                        x = N(x),
                        y = N(y)
                    ));
                }
            }
            for i in 0..8 {
                let (s, c) = (45.0 * f64::from(i)).to_radians().sin_cos();
                svg.line(format_args!(
                    r##"<circle cx="{}" cy="{}" r="3" fill="#E74C3C"/>"##,
                    N(50.0 + c * 40.0),
                    N(50.0 + s * 40.0)
                ));
            }
            svg.line(format_args!("</g>"));
        }
        Decoration::Star {
            origin,
            size,
            opacity,
        } => {
            open_box(svg, origin, size, 20.0, Some(opacity));
            svg.line(format_args!(
                r##"<path d="M 10 2 L 12 8 L 18 10 L 12 12 L 10 18 L 8 12 L 2 10 L 8 8 Z" fill="#FFD700" stroke="#FFA500" stroke-width="0.5"/>
</g>"##
            ));
        }
        Decoration::SweetPlate { origin, size } => {
            open_box(svg, origin, size, 80.0, None);
            svg.line(format_args!(
                r##"<ellipse cx="40" cy="45" rx="35" ry="30" fill="#FFE5CC" stroke="#D4A574" stroke-width="2"/>
<ellipse cx="40" cy="45" rx="32" ry="27" fill="none" stroke="#E6C9A8" stroke-width="1.5"/>
<circle cx="30" cy="35" r="8" fill="#FFA500"/>
<circle cx="30" cy="35" r="1.5" fill="#8B4513"/>
<circle cx="32" cy="37" r="1" fill="#8B4513"/>
<rect x="42" y="28" width="12" height="12" rx="2" fill="#FFD700"/>
<line x1="45" y1="30" x2="45" y2="38" stroke="#DAA520" stroke-width="0.5"/>
<line x1="51" y1="30" x2="51" y2="38" stroke="#DAA520" stroke-width="0.5"/>
<path d="M 25 50 Q 28 48 30 50 Q 32 52 35 50 Q 37 48 40 50" fill="none" stroke="#FF6347" stroke-width="3" stroke-linecap="round"/>
<circle cx="50" cy="48" r="7" fill="#FF8C00"/>
<circle cx="50" cy="48" r="1.5" fill="#8B4513"/>
</g>"##
            ));
        }
        Decoration::Door { panel, knob } => {
            svg.line(format_args!(
                r##"<rect x="{}" y="{}" width="{}" height="{}" rx="8" fill="#8B4513" stroke="#654321" stroke-width="4"/>"##,
                N(panel.x0),
                N(panel.y0),
                N(panel.width()),
                N(panel.height())
            ));
            svg.line(format_args!(
                r##"<circle cx="{}" cy="{}" r="{}" fill="#FFD700"/>"##,
                N(knob.center().x),
                N(knob.center().y),
                N(knob.width() / 2.0)
            ));
        }
        Decoration::Window { frame, house } => {
            svg.line(format_args!(
                r##"<rect x="{}" y="{}" width="{}" height="{}" rx="8" fill="#87CEEB" stroke="#8B4513" stroke-width="8"/>"##,
                N(frame.x0),
                N(frame.y0),
                N(frame.width()),
                N(frame.height())
            ));
            let pad = 8.0;
            let pw = (frame.width() - pad * 3.0) / 2.0;
            let ph = (frame.height() - pad * 3.0) / 2.0;
            for row in 0..2 {
                for col in 0..2 {
                    svg.line(format_args!(
                        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#B0E0E6" stroke="#8B4513" stroke-width="2"/>"##,
                        N(frame.x0 + pad + f64::from(col) * (pw + pad)),
                        N(frame.y0 + pad + f64::from(row) * (ph + pad)),
                        N(pw),
                        N(ph)
                    ));
                }
            }
            svg.line(format_args!(
                r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#DEB887" stroke="#8B4513" stroke-width="2"/>"##,
                N(house.x0),
                N(house.y0),
                N(house.width()),
                N(house.height())
            ));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
