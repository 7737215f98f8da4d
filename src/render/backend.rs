use crate::foundation::error::{ReelError, ReelResult};
use crate::render::composite::unpremultiply_to_vec;
use crate::render::scene::Scene;

/// One rendered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
            premultiplied: true,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn validate(&self) -> ReelResult<()> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.data.len() != expected {
            return Err(ReelError::validation(format!(
                "frame data is {} bytes, expected {expected} for {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    /// Straight-alpha RGBA8 copy, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> ReelResult<Vec<u8>> {
        self.validate()?;
        if self.premultiplied {
            unpremultiply_to_vec(&self.data)
        } else {
            Ok(self.data.clone())
        }
    }
}

/// Turns a frame's draw commands into pixels.
pub trait RenderBackend {
    fn render_scene(&mut self, scene: &Scene) -> ReelResult<FrameRGBA>;
}
