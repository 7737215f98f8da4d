/// Easing curves mapping normalized progress `t` to eased progress.
///
/// Inputs are clamped to `[0, 1]`; every curve fixes both endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    /// Hermite smoothstep `t²(3 - 2t)`: zero slope at both ends, symmetric around `t = 0.5`.
    #[default]
    SmoothStep,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
