//! Text labels rasterized through `usvg`/`resvg`.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::scene::{DrawCmd, HAlign, VAlign};

/// Family list handed to the SVG renderer; the resolver falls back to any loaded face.
const FONT_FAMILY: &str = "DejaVu Sans, Bitstream Vera Sans, Arial, sans-serif";

// Vertical metrics of DejaVu Sans, in em.
const ASCENT_EM: f64 = 0.928;
const DESCENT_EM: f64 = 0.236;

/// Rasterizes runs of [`DrawCmd::Text`] into premultiplied RGBA8 layers.
///
/// The font database is loaded once and shared by every frame.
#[derive(Clone)]
pub struct TextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.face_count())
            .finish()
    }
}

impl TextRasterizer {
    /// System fonts plus any `.ttf`/`.otf`/`.ttc` files under `./fonts`.
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        load_fonts_from_dir(&mut db, Path::new("fonts"));
        let rasterizer = Self::from_fontdb(Arc::new(db));
        if rasterizer.face_count() == 0 {
            tracing::warn!("no fonts found; text labels will not be drawn");
        }
        rasterizer
    }

    pub fn from_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }

    /// Draw `cmds` onto a transparent layer the size of `canvas`.
    ///
    /// Non-text and invisible commands are ignored. Anchors are chart space (y-up).
    pub fn rasterize(&self, canvas: Canvas, cmds: &[DrawCmd]) -> ReelResult<Vec<u8>> {
        let svg = text_layer_svg(canvas, cmds);
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| ReelError::render(format!("text layer rejected: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| ReelError::render("failed to allocate text pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap.take())
    }
}

/// SVG document holding one `<text>` element per visible text command.
pub fn text_layer_svg(canvas: Canvas, cmds: &[DrawCmd]) -> String {
    let (w, h) = (canvas.width, canvas.height);
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    for cmd in cmds.iter().filter(|c| c.is_visible()) {
        let DrawCmd::Text {
            text,
            anchor,
            h_align,
            v_align,
            size_px,
            bold,
            color,
        } = cmd
        else {
            continue;
        };
        let x = anchor.x;
        let y = baseline_y(f64::from(h) - anchor.y, *v_align, *size_px);
        let text_anchor = match h_align {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        };
        let weight = if *bold { "bold" } else { "normal" };
        let _ = write!(
            svg,
            r#"<text x="{x:.3}" y="{y:.3}" font-family="{FONT_FAMILY}" font-size="{size_px:.3}" font-weight="{weight}" text-anchor="{text_anchor}" fill="{fill}" fill-opacity="{opacity:.4}">{body}</text>"#,
            fill = color.to_hex_rgb(),
            opacity = f64::from(color.a) / 255.0,
            body = escape_xml(text),
        );
    }
    svg.push_str("</svg>");
    svg
}

/// Raster-space baseline for a box whose `v_align` edge sits at `edge_y`.
fn baseline_y(edge_y: f64, v_align: VAlign, size_px: f64) -> f64 {
    match v_align {
        VAlign::Top => edge_y + ASCENT_EM * size_px,
        VAlign::Baseline => edge_y,
        VAlign::Bottom => edge_y - DESCENT_EM * size_px,
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                ..Default::default()
            };
            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
