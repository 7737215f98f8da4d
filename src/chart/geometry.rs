use crate::chart::config::RevealConfig;
use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{ReelError, ReelResult};

/// Layout derived once from the configuration.
///
/// All coordinates are chart space: y grows upward from the canvas bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub bar_width: f64,
    pub bar_glow_width: f64,
    pub bar_centers: Vec<f64>,
    /// Final bar heights in pixels.
    pub bar_heights: Vec<f64>,
    pub arrow_start: Point,
    pub arrow_end: Point,
    pub target_center: Point,
}

impl ChartGeometry {
    pub fn from_config(cfg: &RevealConfig) -> ReelResult<Self> {
        let columns = cfg.column_count();
        if columns == 0 {
            return Err(ReelError::validation("chart needs at least one column"));
        }
        let style = &cfg.style;
        let width = f64::from(cfg.canvas.width);
        let height = f64::from(cfg.canvas.height);

        let left = cfg.padding.left;
        let right = width - cfg.padding.right;
        let bottom = cfg.padding.bottom;
        let top = height - cfg.padding.top;
        let plot_w = right - left;
        let plot_h = top - bottom;
        if plot_w <= 0.0 || plot_h <= 0.0 {
            return Err(ReelError::validation(format!(
                "plot area is empty ({plot_w}x{plot_h})"
            )));
        }

        let n = columns as f64;
        let bar_width = (plot_w / (n * style.bar_width_divisor)).trunc();
        let bar_glow_width = (bar_width * style.bar_glow_width_factor).trunc();
        let column_w = plot_w / n;
        let bar_centers = (0..columns)
            .map(|i| left + (i as f64 + style.bar_center_offset) * column_w)
            .collect();
        let bar_heights: Vec<f64> = cfg.bars.iter().map(|b| b.height * plot_h).collect();

        let (dx, dy) = style.arrow_start_offset_px;
        let arrow_start = Point::new(left + dx, bottom + dy);
        let last_height = bar_heights.last().copied().unwrap_or(0.0);
        let arrow_end = Point::new(
            left + plot_w * style.arrow_end_x_frac,
            bottom + last_height + style.arrow_end_y_offset_px,
        );

        Ok(Self {
            width,
            height,
            left,
            right,
            bottom,
            top,
            bar_width,
            bar_glow_width,
            bar_centers,
            bar_heights,
            arrow_start,
            arrow_end,
            target_center: arrow_end,
        })
    }

    pub fn plot_width(&self) -> f64 {
        self.right - self.left
    }

    pub fn plot_height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Baseline-anchored rectangle of `width` centered on column `i`, grown to `progress`.
    pub fn bar_rect(&self, i: usize, width: f64, progress: f64) -> Option<Rect> {
        let cx = *self.bar_centers.get(i)?;
        let h = self.bar_heights.get(i)? * progress.clamp(0.0, 1.0);
        Some(Rect::new(
            cx - width / 2.0,
            self.bottom,
            cx + width / 2.0,
            self.bottom + h,
        ))
    }

    /// Point on the arrow shaft at `progress`.
    pub fn arrow_tip(&self, progress: f64) -> Point {
        self.arrow_start.lerp(self.arrow_end, progress)
    }

    /// Chart space (y-up) to raster space (y-down).
    pub fn to_raster(&self) -> Affine {
        chart_to_raster(self.height)
    }
}

/// Flip for a canvas of `height` pixels: `y_raster = height - y`.
pub fn chart_to_raster(height: f64) -> Affine {
    Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, height])
}

#[cfg(test)]
#[path = "../../tests/unit/chart/geometry.rs"]
mod tests;
