use kurbo::Shape as _;

use crate::chart::geometry::chart_to_raster;
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::composite::over_in_place;
use crate::render::scene::{DrawCmd, LineCap, Scene};
use crate::render::text::TextRasterizer;

/// Flattening tolerance for circles and stroke outlines, in pixels.
const TOLERANCE: f64 = 0.05;

/// CPU rasterizer: `vello_cpu` for shapes, [`TextRasterizer`] for labels.
#[derive(Clone, Debug)]
pub struct CpuRenderer {
    text: TextRasterizer,
}

impl CpuRenderer {
    pub fn new(text: TextRasterizer) -> Self {
        Self { text }
    }

    pub fn with_system_fonts() -> Self {
        Self::new(TextRasterizer::with_system_fonts())
    }
}

impl RenderBackend for CpuRenderer {
    #[tracing::instrument(level = "trace", skip_all, fields(commands = scene.commands.len()))]
    fn render_scene(&mut self, scene: &Scene) -> ReelResult<FrameRGBA> {
        let mut surface = Surface::acquire(scene.canvas)?;
        for batch in scene.batches() {
            if !batch.iter().any(DrawCmd::is_visible) {
                continue;
            }
            if batch[0].is_text() {
                let layer = self.text.rasterize(scene.canvas, batch)?;
                surface.composite(&layer)?;
            } else {
                surface.draw_shapes(batch)?;
            }
        }
        Ok(surface.into_frame())
    }
}

/// Per-frame drawing surface. Starts fully transparent and is consumed by [`Surface::into_frame`].
struct Surface {
    canvas: Canvas,
    width: u16,
    height: u16,
    to_raster: vello_cpu::kurbo::Affine,
    data: Vec<u8>,
}

impl Surface {
    fn acquire(canvas: Canvas) -> ReelResult<Self> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ReelError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ReelError::render("surface height exceeds u16"))?;
        Ok(Self {
            canvas,
            width,
            height,
            to_raster: affine_to_cpu(chart_to_raster(f64::from(canvas.height))),
            data: vec![0; canvas.rgba_len()],
        })
    }

    // `vello_cpu` renders into a fresh buffer, so each batch gets its own layer that is then
    // premul-over'd onto the surface.
    fn draw_shapes(&mut self, cmds: &[DrawCmd]) -> ReelResult<()> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.set_transform(self.to_raster);
        for cmd in cmds.iter().filter(|c| c.is_visible()) {
            draw_shape(&mut ctx, cmd);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut layer);
        self.composite(layer.data_as_u8_slice())
    }

    fn composite(&mut self, layer: &[u8]) -> ReelResult<()> {
        over_in_place(&mut self.data, layer)
    }

    fn into_frame(self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.data,
            premultiplied: true,
        }
    }
}

fn draw_shape(ctx: &mut vello_cpu::RenderContext, cmd: &DrawCmd) {
    ctx.set_paint(color_to_cpu(cmd.color()));
    match cmd {
        DrawCmd::StrokeLine {
            from,
            to,
            width,
            cap,
            ..
        } => {
            ctx.fill_path(&bezpath_to_cpu(&stroke_outline(*from, *to, *width, *cap)));
        }
        DrawCmd::FillRect { rect, .. } => {
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rect.x0, rect.y0, rect.x1, rect.y1,
            ));
        }
        DrawCmd::FillPolygon { points, .. } => {
            ctx.fill_path(&bezpath_to_cpu(&polygon_path(points)));
        }
        DrawCmd::FillCircle { center, radius, .. } => {
            let circle = kurbo::Circle::new(*center, *radius).to_path(TOLERANCE);
            ctx.fill_path(&bezpath_to_cpu(&circle));
        }
        // Text goes through its own batch.
        DrawCmd::Text { .. } => {}
    }
}

/// Filled outline of a stroked segment. A zero-length segment still shows its cap.
pub fn stroke_outline(from: Point, to: Point, width: f64, cap: LineCap) -> BezPath {
    if from.distance(to) < 1e-9 {
        return match cap {
            LineCap::Round => kurbo::Circle::new(from, width / 2.0).to_path(TOLERANCE),
            LineCap::Square => Rect::from_center_size(from, (width, width)).to_path(TOLERANCE),
        };
    }
    let style = kurbo::Stroke::new(width).with_caps(match cap {
        LineCap::Round => kurbo::Cap::Round,
        LineCap::Square => kurbo::Cap::Square,
    });
    kurbo::stroke(
        kurbo::Line::new(from, to).path_elements(TOLERANCE),
        &style,
        &kurbo::StrokeOpts::default(),
        TOLERANCE,
    )
}

fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(&first) = it.next() {
        path.move_to(first);
        for &p in it {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: crate::foundation::core::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
