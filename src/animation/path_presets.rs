use std::f64::consts::TAU;

use crate::animation::path::{MotionPath, PathPoint};

const SPIRAL_STEPS: usize = 16;

/// Reusable named curve shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathPreset {
    /// Rising then falling arc across the frame.
    ArcUp,
    /// Dipping arc across the frame.
    ArcDown,
    /// Two-period horizontal sine.
    Wave,
    /// Lemniscate-like loop through the centre.
    FigureEight,
    /// Decaying bounces left to right.
    Bounce,
    /// Inward spiral ending at the centre.
    Spiral,
}

impl PathPreset {
    /// Catalog order.
    pub const ALL: [PathPreset; 6] = [
        Self::ArcUp,
        Self::ArcDown,
        Self::Wave,
        Self::FigureEight,
        Self::Bounce,
        Self::Spiral,
    ];

    /// JSON name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ArcUp => "arc-up",
            Self::ArcDown => "arc-down",
            Self::Wave => "wave",
            Self::FigureEight => "figure-8",
            Self::Bounce => "bounce",
            Self::Spiral => "spiral",
        }
    }

    /// Look up by JSON name.
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// The preset's curve (no auto-rotation).
    pub fn path(self) -> MotionPath {
        let pts: Vec<PathPoint> = match self {
            Self::ArcUp => vec![
                PathPoint::new(0.1, 0.7),
                PathPoint::new(0.5, 0.2),
                PathPoint::new(0.9, 0.7),
            ],
            Self::ArcDown => vec![
                PathPoint::new(0.1, 0.3),
                PathPoint::new(0.5, 0.8),
                PathPoint::new(0.9, 0.3),
            ],
            Self::Wave => vec![
                PathPoint::new(0.05, 0.5),
                PathPoint::new(0.275, 0.3),
                PathPoint::new(0.5, 0.5),
                PathPoint::new(0.725, 0.7),
                PathPoint::new(0.95, 0.5),
            ],
            Self::FigureEight => vec![
                PathPoint::new(0.5, 0.5),
                PathPoint::new(0.7, 0.3),
                PathPoint::new(0.9, 0.5),
                PathPoint::new(0.7, 0.7),
                PathPoint::new(0.5, 0.5),
                PathPoint::new(0.3, 0.3),
                PathPoint::new(0.1, 0.5),
                PathPoint::new(0.3, 0.7),
                PathPoint::new(0.5, 0.5),
            ],
            Self::Bounce => vec![
                PathPoint::new(0.05, 0.15),
                PathPoint::new(0.25, 0.85),
                PathPoint::new(0.45, 0.45),
                PathPoint::new(0.65, 0.85),
                PathPoint::new(0.8, 0.65),
                PathPoint::new(0.95, 0.85),
            ],
            Self::Spiral => (0..=SPIRAL_STEPS)
                .map(|i| {
                    let f = i as f64 / SPIRAL_STEPS as f64;
                    let angle = f * 2.0 * TAU;
                    let r = 0.4 * (1.0 - f);
                    PathPoint::new(0.5 + r * angle.cos(), 0.5 + r * angle.sin())
                })
                .collect(),
        };
        MotionPath::new(pts)
    }
}
