//! Frame composition: element progress for a frame index, turned into draw commands.

use crate::animation::ease::Ease;
use crate::animation::timeline::Timeline;
use crate::chart::config::RevealConfig;
use crate::chart::geometry::ChartGeometry;
use crate::foundation::core::{FrameIndex, Point, pt_to_px};
use crate::render::scene::{DrawCmd, HAlign, LineCap, Scene, VAlign};

/// Eased progress of every element at one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameState {
    pub frame: FrameIndex,
    pub axes: f64,
    /// Un-eased axes progress; the endpoint accents key off this.
    pub axes_linear: f64,
    pub labels: f64,
    pub bars: Vec<f64>,
    pub arrow: f64,
    pub target: f64,
}

impl FrameState {
    pub fn at(timeline: &Timeline, ease: Ease, frame: FrameIndex) -> Self {
        Self {
            frame,
            axes: timeline.axes.progress(frame, ease),
            axes_linear: timeline.axes.linear_progress(frame),
            labels: timeline.labels.progress(frame, ease),
            bars: timeline
                .bars
                .iter()
                .map(|p| p.progress(frame, ease))
                .collect(),
            arrow: timeline.arrow.progress(frame, ease),
            target: timeline.target.progress(frame, ease),
        }
    }
}

/// Bounce of the target marker: up to `peak` at eased progress `peak_at`, back to 1 at the end.
pub fn target_scale(progress: f64, peak: f64, peak_at: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let rise = peak - 1.0;
    if p < peak_at {
        1.0 + rise * (p / peak_at.max(f64::EPSILON))
    } else {
        peak - rise * ((p - peak_at) / (1.0 - peak_at).max(f64::EPSILON))
    }
}

/// Triangle with its point at `tip`, aimed along `from -> to`.
pub fn arrowhead(tip: Point, from: Point, to: Point, size: f64, half_base: f64) -> [Point; 3] {
    let ang = (to.y - from.y).atan2(to.x - from.x);
    let back = Point::new(tip.x - ang.cos() * size, tip.y - ang.sin() * size);
    let perp = ang + std::f64::consts::FRAC_PI_2;
    let (px, py) = (perp.cos() * half_base, perp.sin() * half_base);
    [
        tip,
        Point::new(back.x + px, back.y + py),
        Point::new(back.x - px, back.y - py),
    ]
}

/// Build the scene for `frame`. Pure: the same inputs always yield the same commands.
pub fn compose_frame(
    cfg: &RevealConfig,
    geom: &ChartGeometry,
    timeline: &Timeline,
    frame: FrameIndex,
) -> Scene {
    let state = FrameState::at(timeline, cfg.ease, frame);
    let style = &cfg.style;
    let px = |pt: f64| pt_to_px(pt, cfg.dpi);
    let mut scene = Scene::new(cfg.canvas);

    // Axes.
    let origin = Point::new(geom.left, geom.bottom);
    let x_end = Point::new(geom.left + state.axes * geom.plot_width(), geom.bottom);
    let y_end = Point::new(geom.left, geom.bottom + state.axes * geom.plot_height());
    let axis_glow = style.accent.with_opacity(style.glow_alpha * style.axis_glow_mul);
    for (end, glow_cap) in [(x_end, LineCap::Round), (y_end, LineCap::Square)] {
        scene.stroke_line(origin, end, px(style.axis_glow_width_pt), glow_cap, axis_glow);
        scene.stroke_line(
            origin,
            end,
            px(style.axis_width_pt),
            LineCap::Round,
            style.accent,
        );
    }
    if state.axes_linear > style.axis_endpoint_threshold {
        let r = px(style.endpoint_marker_area_pt2.sqrt()) / 2.0;
        for x in [geom.left, geom.right] {
            scene.fill_circle(Point::new(x, geom.bottom), r, style.endpoint_color);
        }
    }

    // Month labels.
    if state.labels > 0.0 {
        let color = style.label_color.with_opacity(state.labels);
        for (bar, &cx) in cfg.bars.iter().zip(&geom.bar_centers) {
            scene.push(DrawCmd::Text {
                text: bar.label.clone(),
                anchor: Point::new(cx, geom.bottom - style.label_offset_px),
                h_align: HAlign::Center,
                v_align: VAlign::Top,
                size_px: px(style.label_font_pt),
                bold: false,
                color,
            });
        }
    }

    // Bars.
    let bar_glow = style.accent.with_opacity(style.glow_alpha * style.bar_glow_mul);
    for (i, &p) in state.bars.iter().enumerate() {
        if p <= 0.0 {
            continue;
        }
        if let Some(r) = geom.bar_rect(i, geom.bar_glow_width, p) {
            scene.fill_rect(r, bar_glow);
        }
        if let Some(r) = geom.bar_rect(i, geom.bar_width, p) {
            scene.fill_rect(r, style.accent);
        }
    }

    // Arrow.
    if state.arrow > 0.0 {
        let (start, end) = (geom.arrow_start, geom.arrow_end);
        let tip = geom.arrow_tip(state.arrow);
        scene.stroke_line(
            start,
            tip,
            px(style.arrow_glow_width_pt),
            LineCap::Round,
            style.accent.with_opacity(style.glow_alpha * style.arrow_glow_mul),
        );
        scene.stroke_line(
            start,
            tip,
            px(style.arrow_width_pt),
            LineCap::Round,
            style.accent,
        );
        if state.arrow > style.arrow_tip_threshold {
            let head = arrowhead(
                tip,
                start,
                end,
                style.arrow_tip_px,
                style.arrow_tip_px * style.arrow_tip_half_base,
            );
            scene.fill_polygon(
                head.to_vec(),
                style.accent.with_opacity(style.glow_alpha * style.arrow_tip_glow_mul),
            );
            scene.fill_polygon(head.to_vec(), style.accent);
        }
    }

    // Target marker.
    if state.target > 0.0 {
        let s = target_scale(state.target, style.target_peak_scale, style.target_peak_at);
        let alpha = state.target;
        let [outer, middle, inner] = style.target_radii_px.map(|r| r * s);
        let c = geom.target_center;
        scene.fill_circle(c, outer, style.accent.with_opacity(alpha));
        scene.fill_circle(c, middle, style.ring_color.with_opacity(alpha));
        scene.fill_circle(c, inner, style.accent.with_opacity(alpha));
        scene.push(DrawCmd::Text {
            text: cfg.target_label.clone(),
            anchor: Point::new(c.x, c.y - outer - style.target_label_gap_px),
            h_align: HAlign::Center,
            v_align: VAlign::Bottom,
            size_px: px(style.target_font_pt),
            bold: true,
            color: style.accent.with_opacity(alpha),
        });
    }

    scene
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
