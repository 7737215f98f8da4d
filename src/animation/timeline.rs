//! Frame-indexed schedule of the reveal animation.

use crate::animation::ease::Ease;
use crate::chart::config::RevealConfig;
use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};

/// Which visual element a phase animates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PhaseKind {
    Axes,
    Labels,
    Bar(usize),
    Arrow,
    Target,
}

/// A contiguous `[start, end)` interval during which one element goes from hidden to final.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    pub range: FrameRange,
}

impl Phase {
    pub fn start(&self) -> FrameIndex {
        self.range.start
    }

    pub fn end(&self) -> FrameIndex {
        self.range.end
    }

    /// Linear progress in `[0, 1]`.
    ///
    /// 0 before `start`; 1 on the last frame inside the phase and everywhere after it.
    pub fn linear_progress(&self, frame: FrameIndex) -> f64 {
        let (start, end) = (self.range.start.0, self.range.end.0);
        if frame.0 < start {
            return 0.0;
        }
        if frame.0.saturating_add(1) >= end {
            return 1.0;
        }
        let span = (end - start - 1).max(1);
        ((frame.0 - start) as f64 / span as f64).clamp(0.0, 1.0)
    }

    pub fn progress(&self, frame: FrameIndex, ease: Ease) -> f64 {
        ease.apply(self.linear_progress(frame))
    }
}

/// The planned schedule for a whole run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    pub fps: Fps,
    pub total_frames: u64,
    pub axes: Phase,
    pub labels: Phase,
    /// One phase per column, contiguous and in left-to-right order.
    pub bars: Vec<Phase>,
    pub arrow: Phase,
    pub target: Phase,
}

impl Timeline {
    /// Lay the phases out back to back.
    ///
    /// Every seconds-to-frames conversion truncates. The last bar absorbs the remainder of the
    /// bar budget, and both gaps are at least one frame.
    #[tracing::instrument(level = "debug", skip(cfg), fields(columns = cfg.bars.len()))]
    pub fn plan(cfg: &RevealConfig) -> ReelResult<Self> {
        let fps = Fps::new(cfg.fps.num, cfg.fps.den)?;
        let columns = cfg.column_count() as u64;
        if columns == 0 {
            return Err(ReelError::validation("timeline needs at least one column"));
        }

        let frames = |secs: f64| fps.secs_to_frames_trunc(secs);
        let d = cfg.phases;

        let axes = Phase {
            kind: PhaseKind::Axes,
            range: FrameRange::starting_at(0, frames(d.axes_secs)),
        };
        let labels = Phase {
            kind: PhaseKind::Labels,
            range: FrameRange::starting_at(axes.end().0, frames(d.labels_secs)),
        };

        let bars_start = labels.end().0;
        let bars_total = frames(d.bars_secs);
        let per_bar = bars_total / columns;
        let bars_end = bars_start + bars_total;
        let bars = (0..columns)
            .map(|i| {
                let start = bars_start + i * per_bar;
                let end = if i + 1 == columns {
                    bars_end
                } else {
                    start + per_bar
                };
                Phase {
                    kind: PhaseKind::Bar(i as usize),
                    range: FrameRange {
                        start: FrameIndex(start),
                        end: FrameIndex(end),
                    },
                }
            })
            .collect::<Vec<_>>();

        let arrow = Phase {
            kind: PhaseKind::Arrow,
            range: FrameRange::starting_at(
                bars_end + frames(d.arrow_gap_secs).max(1),
                frames(d.arrow_secs),
            ),
        };
        let target = Phase {
            kind: PhaseKind::Target,
            range: FrameRange::starting_at(
                arrow.end().0 + frames(d.target_gap_secs).max(1),
                frames(d.target_secs),
            ),
        };

        let total_frames = cfg.total_frames();
        if target.end().0 > total_frames {
            tracing::warn!(
                target_end = target.end().0,
                total_frames,
                "animation phases run past the last frame; the final state will not be reached"
            );
        }

        Ok(Self {
            fps,
            total_frames,
            axes,
            labels,
            bars,
            arrow,
            target,
        })
    }

    /// All phases in start order.
    pub fn phases(&self) -> impl Iterator<Item = &Phase> {
        [&self.axes, &self.labels]
            .into_iter()
            .chain(self.bars.iter())
            .chain([&self.arrow, &self.target])
    }

    pub fn frames(&self) -> impl Iterator<Item = FrameIndex> + use<> {
        (0..self.total_frames).map(FrameIndex)
    }

    pub fn last_frame(&self) -> FrameIndex {
        FrameIndex(self.total_frames.saturating_sub(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
