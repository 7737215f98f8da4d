use std::fmt;
use std::path::PathBuf;

use crate::{
    animation::timeline::Timeline,
    chart::{config::RevealConfig, geometry::ChartGeometry},
    encode::gif::{EncodeConfig, encode_gif},
    foundation::core::FrameIndex,
    foundation::error::{ReelError, ReelResult},
    render::{
        backend::{FrameRGBA, RenderBackend},
        compose::compose_frame,
        cpu::CpuRenderer,
        scene::Scene,
    },
};

/// A progress line is emitted for every frame index divisible by this.
pub const PROGRESS_INTERVAL: u64 = 12;

/// Human-facing milestones of [`render_to_gif`]. `Display` yields the console line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    Started { total: u64 },
    Frame { index: u64, total: u64 },
    Encoding,
    Saved { path: PathBuf },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { .. } => f.write_str("Generating frames..."),
            Self::Frame { index, total } => write!(f, " frame {index}/{total}"),
            Self::Encoding => f.write_str("Encoding GIF..."),
            Self::Saved { path } => write!(f, "Saved {}", path.display()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub out_path: PathBuf,
}

/// A planned chart reveal: configuration, layout and timeline, plus the backend that rasterizes it.
pub struct Reel {
    config: RevealConfig,
    geometry: ChartGeometry,
    timeline: Timeline,
    backend: Box<dyn RenderBackend>,
}

impl fmt::Debug for Reel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reel")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("timeline", &self.timeline)
            .finish_non_exhaustive()
    }
}

impl Reel {
    /// Plan `config` and attach a [`CpuRenderer`] backed by the system fonts.
    pub fn new(config: RevealConfig) -> ReelResult<Self> {
        config.validate()?;
        Self::with_backend(config, Box::new(CpuRenderer::with_system_fonts()))
    }

    pub fn with_backend(config: RevealConfig, backend: Box<dyn RenderBackend>) -> ReelResult<Self> {
        config.validate()?;
        let geometry = ChartGeometry::from_config(&config)?;
        let timeline = Timeline::plan(&config)?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let json = serde_json::to_string(&timeline)
                .map_err(|e| ReelError::serde(e.to_string()))?;
            tracing::debug!(timeline = %json, "planned timeline");
        }
        Ok(Self {
            config,
            geometry,
            timeline,
            backend,
        })
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn frame_count(&self) -> u64 {
        self.timeline.total_frames
    }

    /// Draw commands for `frame`, which must lie inside the sequence.
    pub fn scene(&self, frame: FrameIndex) -> ReelResult<Scene> {
        if frame.0 >= self.frame_count() {
            return Err(ReelError::validation(format!(
                "frame {} is outside the sequence of {} frames",
                frame.0,
                self.frame_count()
            )));
        }
        Ok(compose_frame(
            &self.config,
            &self.geometry,
            &self.timeline,
            frame,
        ))
    }

    #[tracing::instrument(level = "debug", skip(self), fields(frame = frame.0))]
    pub fn render_frame(&mut self, frame: FrameIndex) -> ReelResult<FrameRGBA> {
        let scene = self.scene(frame)?;
        self.backend.render_scene(&scene)
    }

    /// Render every frame in ascending order, calling `on_frame` before each one.
    pub fn render_frames(
        &mut self,
        mut on_frame: impl FnMut(FrameIndex),
    ) -> ReelResult<Vec<FrameRGBA>> {
        let mut frames = Vec::with_capacity(self.frame_count() as usize);
        for frame in self.timeline.frames() {
            on_frame(frame);
            frames.push(self.render_frame(frame)?);
        }
        Ok(frames)
    }

    pub fn encode_config(&self) -> EncodeConfig {
        EncodeConfig {
            width: self.config.canvas.width,
            height: self.config.canvas.height,
            fps: self.config.fps,
            out_path: self.config.out_path.clone(),
            speed: self.config.gif_speed,
        }
    }
}

/// Render the whole sequence and write it to the configured output path.
///
/// `report` receives the milestones in order: `Started`, a `Frame` for every
/// [`PROGRESS_INTERVAL`]th index, `Encoding`, then `Saved` once the file is in place.
#[tracing::instrument(level = "info", skip_all, fields(frames = reel.frame_count()))]
pub fn render_to_gif(
    reel: &mut Reel,
    mut report: impl FnMut(&ProgressEvent),
) -> ReelResult<RenderStats> {
    let total = reel.frame_count();
    report(&ProgressEvent::Started { total });
    let frames = reel.render_frames(|frame| {
        if frame.0.is_multiple_of(PROGRESS_INTERVAL) {
            report(&ProgressEvent::Frame {
                index: frame.0,
                total,
            });
        }
    })?;

    report(&ProgressEvent::Encoding);
    let cfg = reel.encode_config();
    encode_gif(&frames, &cfg)?;
    tracing::info!(out = %cfg.out_path.display(), frames = total, "gif saved");
    report(&ProgressEvent::Saved {
        path: cfg.out_path.clone(),
    });

    Ok(RenderStats {
        frames_total: total,
        out_path: cfg.out_path,
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
