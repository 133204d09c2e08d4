pub use skirmish_shared::protocol::*;

use crate::fighter::Fighter;
use crate::world::Obstacle;

// === Conversion helpers ===

/// Round to 3 decimal places (sub-pixel precision is invisible, saves JSON size)
#[inline]
fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

impl From<&Fighter> for PlayerWire {
    fn from(fighter: &Fighter) -> Self {
        let hitbox = fighter.hitbox();
        let x = round3(hitbox.position.x);
        let y = round3(hitbox.position.y);
        Self {
            id: fighter.id,
            x,
            y,
            color: fighter.color.to_string(),
            hitbox: HitboxWire {
                position: skirmish_shared::vec2::vec2(x, y),
                width: hitbox.width,
                height: hitbox.height,
                color: fighter.color.to_string(),
            },
        }
    }
}

impl From<&Obstacle> for ObstacleWire {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            x: obstacle.rect.position.x,
            y: obstacle.rect.position.y,
            color: obstacle.color.clone(),
            width: obstacle.rect.width,
            height: obstacle.rect.height,
        }
    }
}
