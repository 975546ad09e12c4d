use std::path::Path;
use std::sync::Arc;

use crate::foundation::{
    core::Canvas,
    error::{StoryError, StoryResult},
};

const MAX_DIM: u32 = 16_384;

/// Straight-alpha RGBA8 pixels of one rendered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// Turns SVG documents into pixels. Font discovery happens once per rasterizer.
#[derive(Clone, Debug)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Rasterizer {
    /// System fonts plus any `.ttf`/`.otf`/`.ttc` found directly under `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.faces().count(), "font database ready");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Number of font faces available to text nodes.
    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }

    /// Parse `svg` and draw it onto a `canvas`-sized pixmap.
    pub fn rasterize(&self, svg: &str, canvas: Canvas) -> StoryResult<RgbaFrame> {
        let (width, height) = (canvas.width, canvas.height);
        if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
            return Err(StoryError::export(format!(
                "raster size {width}x{height} is outside 1..={MAX_DIM}"
            )));
        }

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| StoryError::export(format!("parse svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| StoryError::export("failed to allocate pixmap"))?;
        let sx = width as f32 / tree.size().width();
        let sy = height as f32 / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let data = pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Ok(RgbaFrame {
            width,
            height,
            data,
        })
    }
}

/// Convenience wrapper using a fresh system-font rasterizer.
pub fn rasterize(svg: &str, canvas: Canvas) -> StoryResult<RgbaFrame> {
    Rasterizer::default().rasterize(svg, canvas)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };
    for entry in rd.flatten() {
        let path = entry.path();
        let is_font = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"));
        if path.is_file() && is_font && db.load_font_file(&path).is_err() {
            tracing::warn!(path = %path.display(), "skipping unreadable font");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/raster.rs"]
mod tests;
