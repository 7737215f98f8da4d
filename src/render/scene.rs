use crate::foundation::core::{Canvas, Point, Rect, Rgba8};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Which edge of the text box sits on the anchor's y coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Baseline,
    Bottom,
}

/// One immutable drawing instruction in chart space (y-up).
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    StrokeLine {
        from: Point,
        to: Point,
        width: f64,
        cap: LineCap,
        color: Rgba8,
    },
    FillRect {
        rect: Rect,
        color: Rgba8,
    },
    FillPolygon {
        points: Vec<Point>,
        color: Rgba8,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
    Text {
        text: String,
        anchor: Point,
        h_align: HAlign,
        v_align: VAlign,
        size_px: f64,
        bold: bool,
        color: Rgba8,
    },
}

impl DrawCmd {
    pub fn color(&self) -> Rgba8 {
        match self {
            Self::StrokeLine { color, .. }
            | Self::FillRect { color, .. }
            | Self::FillPolygon { color, .. }
            | Self::FillCircle { color, .. }
            | Self::Text { color, .. } => *color,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// False when drawing the command cannot change any pixel.
    pub fn is_visible(&self) -> bool {
        if self.color().is_transparent() {
            return false;
        }
        match self {
            Self::StrokeLine { width, .. } => *width > 0.0,
            Self::FillRect { rect, .. } => rect.width() > 0.0 && rect.height() > 0.0,
            Self::FillPolygon { points, .. } => points.len() >= 3,
            Self::FillCircle { radius, .. } => *radius > 0.0,
            Self::Text { text, size_px, .. } => !text.trim().is_empty() && *size_px > 0.0,
        }
    }
}

/// Ordered draw commands for a single frame, back to front.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub canvas: Canvas,
    pub commands: Vec<DrawCmd>,
}

impl Scene {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, cap: LineCap, color: Rgba8) {
        self.push(DrawCmd::StrokeLine {
            from,
            to,
            width,
            cap,
            color,
        });
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.push(DrawCmd::FillRect { rect, color });
    }

    pub fn fill_polygon(&mut self, points: Vec<Point>, color: Rgba8) {
        self.push(DrawCmd::FillPolygon { points, color });
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.push(DrawCmd::FillCircle {
            center,
            radius,
            color,
        });
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Runs of consecutive vector or text commands, in order.
    pub fn batches(&self) -> impl Iterator<Item = &[DrawCmd]> {
        self.commands.chunk_by(|a, b| a.is_text() == b.is_text())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
