//! Per-tick fighter physics: velocity integration, swept movement against
//! solid geometry and wrap-around at the play-field edges.

use crate::fighter::Fighter;
use crate::geometry::{overlaps_any, Rect};
use crate::vec2::{max_abs_component, Vec2};
use crate::world::Level;
use skirmish_shared::config::PhysicsConfig;

/// Below this horizontal speed a released fighter stops dead.
const STOP_THRESHOLD: f64 = 0.1;

/// Horizontal decay divisor applied each tick with no (or both) walk keys held.
const RELEASE_DAMPING: f64 = 3.0;

/// Run one simulation tick for a fighter.
pub fn step(fighter: &mut Fighter, level: &Level, physics: &PhysicsConfig) {
    update_velocity(fighter, level, physics);
    move_in_steps(fighter, level, physics);
}

/// Move `v` toward `target` by `rate`, never past it. A value already beyond
/// the target snaps to it.
fn accelerate_toward(v: f64, target: f64, rate: f64) -> f64 {
    if target >= 0.0 {
        if v < target {
            (v + rate).min(target)
        } else {
            target
        }
    } else if v > target {
        (v - rate).max(target)
    } else {
        target
    }
}

/// Apply walking, gravity, wall sliding, jump recharge and jumping to the
/// fighter's velocity from its held keys.
pub fn update_velocity(fighter: &mut Fighter, level: &Level, physics: &PhysicsConfig) {
    let keys = fighter.pressed_keys;

    if keys.left != keys.right {
        let target = if keys.left {
            -physics.max_walk_speed
        } else {
            physics.max_walk_speed
        };
        fighter.velocity.x =
            accelerate_toward(fighter.velocity.x, target, physics.walk_acceleration);
    } else if fighter.velocity.x.abs() < STOP_THRESHOLD {
        fighter.velocity.x = 0.0;
    } else {
        fighter.velocity.x /= RELEASE_DAMPING;
    }

    let wall = fighter.wall_contact(level, physics);
    let pushing_into_wall =
        (keys.left && wall.touches_left()) || (keys.right && wall.touches_right());

    if pushing_into_wall && fighter.velocity.y >= 0.0 {
        fighter.velocity.y = accelerate_toward(
            fighter.velocity.y,
            physics.max_wall_slide_speed,
            physics.wall_slide_acceleration,
        );
    } else if pushing_into_wall {
        // Still rising from a jump
        fighter.velocity.y += physics.gravity;
    } else {
        fighter.velocity.y = (fighter.velocity.y + physics.gravity).min(physics.max_fall_speed);
    }

    fighter.recharge_jumps(level, physics);

    if keys.jump {
        fighter.jump(level, physics);
    }
}

/// Apply the fighter's velocity in sub-steps of at most one unit along the
/// dominant axis. An axis that collides is rolled back and its velocity
/// zeroed; the other axis keeps moving.
pub fn move_in_steps(fighter: &mut Fighter, level: &Level, physics: &PhysicsConfig) {
    let steps = max_abs_component(fighter.velocity);
    if !steps.is_finite() || steps <= 0.0 {
        return;
    }

    let solids = level.solids();
    for _ in 0..steps.ceil() as u64 {
        let before_x = fighter.position.x;
        fighter.position.x += fighter.velocity.x / steps;
        if overlaps_any(&fighter.hitbox(), solids) {
            fighter.position.x = before_x;
            fighter.velocity.x = 0.0;
        } else {
            wrap_around(fighter, level, physics);
        }

        let before_y = fighter.position.y;
        fighter.position.y += fighter.velocity.y / steps;
        if overlaps_any(&fighter.hitbox(), solids) {
            fighter.position.y = before_y;
            fighter.velocity.y = 0.0;
        } else {
            wrap_around(fighter, level, physics);
        }
    }
}

/// Teleport a fighter that has fully left the play field to the opposite
/// edge. An axis whose destination is blocked by solid geometry is left
/// alone until the way is clear.
pub fn wrap_around(fighter: &mut Fighter, level: &Level, physics: &PhysicsConfig) {
    let hitbox = fighter.hitbox();
    let (w, h) = (hitbox.width, hitbox.height);
    let mut target = fighter.position;

    if hitbox.left() > physics.field_width + w {
        target.x = -w;
    } else if hitbox.left() < -w {
        target.x = physics.field_width + w;
    }
    if hitbox.top() > physics.field_height + h {
        target.y = -h;
    } else if hitbox.top() < -h {
        target.y = physics.field_height + h;
    }

    let solids = level.solids();
    if target.x != fighter.position.x {
        let moved = Rect {
            position: Vec2::new(target.x, fighter.position.y),
            ..hitbox
        };
        if !overlaps_any(&moved, solids) {
            fighter.position.x = target.x;
        }
    }
    if target.y != fighter.position.y {
        let moved = Rect {
            position: Vec2::new(fighter.position.x, target.y),
            ..hitbox
        };
        if !overlaps_any(&moved, solids) {
            fighter.position.y = target.y;
        }
    }
}
