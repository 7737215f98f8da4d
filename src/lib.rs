//! Chartreel renders a bar-chart "reveal" animation and writes it as a looping transparent GIF.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: `RevealConfig -> (ChartGeometry, Timeline)`, once per run
//! 2. **Compose**: `FrameIndex -> Scene` (ordered draw commands in chart space, y-up)
//! 3. **Render**: `Scene -> FrameRGBA` (CPU backend: `vello_cpu` shapes, `resvg` text)
//! 4. **Encode**: `[FrameRGBA] -> GIF` with `Repeat::Infinite`
//!
//! Composition is pure: a frame's pixels depend only on its index and the configuration.
//! Renderers output **premultiplied** RGBA8; the encoder converts to straight alpha.
#![forbid(unsafe_code)]

mod animation;
mod chart;
mod encode;
mod foundation;
mod pipeline;
mod render;

pub use animation::ease::Ease;
pub use animation::timeline::{Phase, PhaseKind, Timeline};
pub use chart::config::{
    BarSpec, ChartStyle, DEFAULT_OUT_PATH, Padding, PhaseDurations, RevealConfig,
};
pub use chart::geometry::{ChartGeometry, chart_to_raster};
pub use encode::gif::{EncodeConfig, encode_gif, ensure_parent_dir, partial_path};
pub use foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Vec2, pt_to_px,
};
pub use foundation::error::{ReelError, ReelResult};
pub use pipeline::{PROGRESS_INTERVAL, ProgressEvent, Reel, RenderStats, render_to_gif};
pub use render::backend::{FrameRGBA, RenderBackend};
pub use render::compose::{FrameState, arrowhead, compose_frame, target_scale};
pub use render::composite::{over, over_in_place, unpremultiply, unpremultiply_to_vec};
pub use render::cpu::{CpuRenderer, stroke_outline};
pub use render::scene::{DrawCmd, HAlign, LineCap, Scene, VAlign};
pub use render::text::{TextRasterizer, text_layer_svg};
