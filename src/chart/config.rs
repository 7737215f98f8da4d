use std::path::PathBuf;

use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::{ReelError, ReelResult};

/// Fixed relative path of the generated artifact.
pub const DEFAULT_OUT_PATH: &str = "grafico_lamborghini_target.gif";

/// Everything the generator needs, built once at startup and passed by reference.
///
/// `Default` carries the production constants; nothing is read from the environment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealConfig {
    pub fps: Fps,
    pub duration_secs: f64,
    pub canvas: Canvas,
    /// Resolution used to turn point sizes (strokes, fonts) into pixels.
    pub dpi: f64,
    pub padding: Padding,
    pub phases: PhaseDurations,
    pub ease: Ease,
    /// One entry per column, left to right.
    pub bars: Vec<BarSpec>,
    pub target_label: String,
    pub style: ChartStyle,
    pub out_path: PathBuf,
    /// GIF quantizer speed, 1 (best) ..= 30 (fastest).
    pub gif_speed: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

/// Phase lengths and gaps in seconds; the planner truncates each to whole frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseDurations {
    pub axes_secs: f64,
    pub labels_secs: f64,
    /// Total for all bars; split evenly between columns.
    pub bars_secs: f64,
    pub arrow_gap_secs: f64,
    pub arrow_secs: f64,
    pub target_gap_secs: f64,
    pub target_secs: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BarSpec {
    pub label: String,
    /// Final height as a fraction of the plot height, in `(0, 1]`.
    pub height: f64,
}

impl BarSpec {
    pub fn new(label: impl Into<String>, height: f64) -> Self {
        Self {
            label: label.into(),
            height,
        }
    }
}

/// Colors, stroke widths and marker proportions.
///
/// Widths ending in `_pt` are typographic points; `_px` values are canvas pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartStyle {
    pub accent: Rgba8,
    pub label_color: Rgba8,
    pub ring_color: Rgba8,
    pub endpoint_color: Rgba8,
    /// Base alpha of every glow halo; each element scales it by its own multiplier.
    pub glow_alpha: f64,

    pub axis_width_pt: f64,
    pub axis_glow_width_pt: f64,
    pub axis_glow_mul: f64,
    /// Raw axes progress above which the endpoint accents appear.
    pub axis_endpoint_threshold: f64,
    /// Scatter-style marker area in pt².
    pub endpoint_marker_area_pt2: f64,

    /// Bar width is `plot_width / (columns * bar_width_divisor)`, truncated.
    pub bar_width_divisor: f64,
    /// Bar `i` is centered at `left + (i + bar_center_offset) * plot_width / columns`.
    pub bar_center_offset: f64,
    pub bar_glow_width_factor: f64,
    pub bar_glow_mul: f64,

    pub arrow_width_pt: f64,
    pub arrow_glow_width_pt: f64,
    pub arrow_glow_mul: f64,
    pub arrow_start_offset_px: (f64, f64),
    pub arrow_end_x_frac: f64,
    pub arrow_end_y_offset_px: f64,
    pub arrow_tip_px: f64,
    /// Arrowhead half-base as a fraction of `arrow_tip_px`.
    pub arrow_tip_half_base: f64,
    pub arrow_tip_glow_mul: f64,
    /// Eased arrow progress above which the arrowhead is drawn.
    pub arrow_tip_threshold: f64,

    /// Outer, middle and inner ring radii at scale 1.
    pub target_radii_px: [f64; 3],
    pub target_peak_scale: f64,
    /// Eased progress at which the bounce peaks.
    pub target_peak_at: f64,

    pub label_font_pt: f64,
    /// Distance from the baseline down to the top of the month labels.
    pub label_offset_px: f64,
    pub target_font_pt: f64,
    pub target_label_gap_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let accent = Rgba8::rgb(0xFE, 0xDF, 0x00);
        let white = Rgba8::rgb(0xFF, 0xFF, 0xFF);
        Self {
            accent,
            label_color: white,
            ring_color: white,
            endpoint_color: Rgba8::rgb(0xFF, 0xF8, 0xD9),
            glow_alpha: 0.48,

            axis_width_pt: 3.2,
            axis_glow_width_pt: 12.0,
            axis_glow_mul: 0.7,
            axis_endpoint_threshold: 0.98,
            endpoint_marker_area_pt2: 8.0,

            bar_width_divisor: 2.6,
            bar_center_offset: 0.6,
            bar_glow_width_factor: 1.55,
            bar_glow_mul: 0.85,

            arrow_width_pt: 3.6,
            arrow_glow_width_pt: 8.0,
            arrow_glow_mul: 0.6,
            arrow_start_offset_px: (12.0, 14.0),
            arrow_end_x_frac: 0.94,
            arrow_end_y_offset_px: 6.0,
            arrow_tip_px: 12.0,
            arrow_tip_half_base: 0.55,
            arrow_tip_glow_mul: 0.8,
            arrow_tip_threshold: 0.04,

            target_radii_px: [28.0, 18.0, 9.0],
            target_peak_scale: 1.1,
            target_peak_at: 0.6,

            label_font_pt: 12.0,
            label_offset_px: 16.0,
            target_font_pt: 18.0,
            target_label_gap_px: 10.0,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            fps: Fps { num: 24, den: 1 },
            duration_secs: 7.0,
            canvas: Canvas {
                width: 720,
                height: 420,
            },
            dpi: 100.0,
            padding: Padding {
                left: 84.0,
                right: 84.0,
                bottom: 60.0,
                top: 80.0,
            },
            phases: PhaseDurations {
                axes_secs: 0.8,
                labels_secs: 0.45,
                bars_secs: 2.8,
                arrow_gap_secs: 0.06,
                arrow_secs: 0.9,
                target_gap_secs: 0.04,
                target_secs: 0.8,
            },
            ease: Ease::SmoothStep,
            bars: vec![
                BarSpec::new("Gen", 0.35),
                BarSpec::new("Feb", 0.52),
                BarSpec::new("Mar", 0.62),
                BarSpec::new("Apr", 0.48),
                BarSpec::new("Mag", 0.72),
                BarSpec::new("Giu", 0.9),
            ],
            target_label: "300K".to_string(),
            style: ChartStyle::default(),
            out_path: PathBuf::from(DEFAULT_OUT_PATH),
            gif_speed: 10,
        }
    }
}

impl RevealConfig {
    pub fn column_count(&self) -> usize {
        self.bars.len()
    }

    /// Total frames in the sequence: `round(fps * duration)`.
    pub fn total_frames(&self) -> u64 {
        self.fps.secs_to_frames_round(self.duration_secs)
    }

    /// Reject configurations that would produce degenerate geometry or an empty sequence.
    pub fn validate(&self) -> ReelResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        self.canvas.validate()?;

        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(ReelError::validation("duration_secs must be finite and > 0"));
        }
        if self.total_frames() == 0 {
            return Err(ReelError::validation("duration is shorter than one frame"));
        }
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(ReelError::validation("dpi must be finite and > 0"));
        }

        let p = self.padding;
        for (name, v) in [
            ("padding.left", p.left),
            ("padding.right", p.right),
            ("padding.bottom", p.bottom),
            ("padding.top", p.top),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ReelError::validation(format!("{name} must be finite and >= 0")));
            }
        }
        if p.left + p.right >= f64::from(self.canvas.width)
            || p.bottom + p.top >= f64::from(self.canvas.height)
        {
            return Err(ReelError::validation("padding leaves no room for the plot"));
        }

        let d = self.phases;
        for (name, v) in [
            ("axes_secs", d.axes_secs),
            ("labels_secs", d.labels_secs),
            ("bars_secs", d.bars_secs),
            ("arrow_gap_secs", d.arrow_gap_secs),
            ("arrow_secs", d.arrow_secs),
            ("target_gap_secs", d.target_gap_secs),
            ("target_secs", d.target_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ReelError::validation(format!(
                    "phases.{name} must be finite and >= 0"
                )));
            }
        }

        if self.bars.is_empty() {
            return Err(ReelError::validation("at least one bar is required"));
        }
        for (i, bar) in self.bars.iter().enumerate() {
            if !(bar.height > 0.0 && bar.height <= 1.0) {
                return Err(ReelError::validation(format!(
                    "bar {i} ('{}') height {} is outside (0, 1]",
                    bar.label, bar.height
                )));
            }
        }

        if !(1..=30).contains(&self.gif_speed) {
            return Err(ReelError::validation("gif_speed must be in 1..=30"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/config.rs"]
mod tests;
