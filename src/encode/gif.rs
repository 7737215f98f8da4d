use std::{
    ffi::OsString,
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    foundation::core::Fps,
    foundation::error::{ReelError, ReelResult},
    render::backend::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    pub out_path: PathBuf,
    /// NeuQuant speed, 1 (best) ..= 30 (fastest).
    pub speed: i32,
}

impl EncodeConfig {
    pub fn validate(&self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ReelError::validation("encode fps must be non-zero"));
        }
        if !(1..=30).contains(&self.speed) {
            return Err(ReelError::validation(format!(
                "gif speed must be in 1..=30, got {}",
                self.speed
            )));
        }
        Ok(())
    }

    pub fn frame_delay(&self) -> Delay {
        Delay::from_numer_denom_ms(1000 * self.fps.den, self.fps.num)
    }
}

pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Sibling path the encoder writes to before the final rename.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Encode `frames` as a loop-forever animated GIF at `cfg.out_path`.
///
/// Every frame is checked before the file is created. Output goes through [`partial_path`] and
/// is renamed into place once the trailer is flushed; on any failure the partial file is removed.
#[tracing::instrument(level = "info", skip_all, fields(frames = frames.len(), out = %cfg.out_path.display()))]
pub fn encode_gif(frames: &[FrameRGBA], cfg: &EncodeConfig) -> ReelResult<()> {
    cfg.validate()?;
    if frames.is_empty() {
        return Err(ReelError::validation("cannot encode an empty frame sequence"));
    }
    for (i, frame) in frames.iter().enumerate() {
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ReelError::validation(format!(
                "frame {i} is {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        frame
            .validate()
            .map_err(|e| ReelError::validation(format!("frame {i}: {e}")))?;
    }

    ensure_parent_dir(&cfg.out_path)?;
    let partial = partial_path(&cfg.out_path);
    let result = write_gif(frames, cfg, &partial)
        .and_then(|()| std::fs::rename(&partial, &cfg.out_path).map_err(ReelError::from));
    if result.is_err() {
        let _ = std::fs::remove_file(&partial);
    }
    result
}

fn write_gif(frames: &[FrameRGBA], cfg: &EncodeConfig, path: &Path) -> ReelResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    {
        let mut encoder = GifEncoder::new_with_speed(&mut writer, cfg.speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ReelError::encode(format!("failed to set gif loop count: {e}")))?;
        let delay = cfg.frame_delay();
        for (i, frame) in frames.iter().enumerate() {
            let rgba = frame.to_straight_rgba8()?;
            let image = RgbaImage::from_raw(frame.width, frame.height, rgba).ok_or_else(|| {
                ReelError::encode(format!("frame {i}: rgba buffer does not fit its size"))
            })?;
            encoder
                .encode_frame(Frame::from_parts(image, 0, 0, delay))
                .map_err(|e| ReelError::encode(format!("frame {i}: {e}")))?;
        }
        // Dropping the encoder writes the gif trailer.
    }
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| ReelError::Io(e.into_error()))?;
    file.sync_all()?;

    tracing::debug!(frames = frames.len(), "gif trailer written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
