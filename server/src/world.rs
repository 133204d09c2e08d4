//! Static level geometry.
//!
//! A `Level` is built once at startup and never changes afterwards, so the
//! game loop shares it behind an `Arc` and every collision query borrows it.

use crate::geometry::Rect;

/// A rectangle of level geometry. Passable obstacles are drawn but never
/// collide.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub rect: Rect,
    pub color: String,
    pub passable: bool,
}

impl Obstacle {
    pub fn solid(x: f64, y: f64, width: f64, height: f64, color: &str) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            color: color.to_string(),
            passable: false,
        }
    }

    pub fn passable(x: f64, y: f64, width: f64, height: f64, color: &str) -> Self {
        Self {
            passable: true,
            ..Self::solid(x, y, width, height, color)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Level {
    obstacles: Vec<Obstacle>,
    /// Rects of the non-passable obstacles, cached for collision queries
    solids: Vec<Rect>,
}

impl Level {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        let solids = obstacles
            .iter()
            .filter(|o| !o.passable)
            .map(|o| o.rect)
            .collect();
        Self { obstacles, solids }
    }

    /// The default arena: one floor platform, a short pillar standing on it
    /// and a tall wall near the right edge.
    pub fn arena() -> Self {
        Self::new(vec![
            Obstacle::solid(100.0, 200.0, 280.0, 20.0, "black"),
            Obstacle::solid(220.0, 100.0, 20.0, 100.0, "black"),
            Obstacle::solid(440.0, -50.0, 20.0, 400.0, "black"),
        ])
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn solids(&self) -> &[Rect] {
        &self.solids
    }
}
