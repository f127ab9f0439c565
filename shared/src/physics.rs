//! Player character physics.
//!
//! Runs once per fixed tick (see `SIMULATION_HZ`). Constants are per tick,
//! so the fixed timestep is what keeps behaviour independent of frame rate.
//!
//! Floor handling is a single ground plane at `FLOOR_HEIGHT`; blocks do not
//! collide with the player.

use crate::movement::{apply_movement, MovementIntent};
use crate::player::{PlayerState, FLOOR_HEIGHT, GRAVITY};

/// Step the player one fixed tick.
///
/// - Applies gravity unless grounded, integrates vertical position
/// - Clamps to the floor plane and updates grounded state
/// - Accelerates or brakes on the XZ plane
/// - Integrates horizontal position
pub fn step_player(state: &mut PlayerState, intent: &MovementIntent, yaw: f32) {
    // --- Gravity ---
    if !state.grounded {
        state.vertical_velocity += GRAVITY;
        state.position.y += state.vertical_velocity;
    }

    // --- Floor ---
    if state.position.y <= FLOOR_HEIGHT {
        state.position.y = FLOOR_HEIGHT;
        state.vertical_velocity = 0.0;
        state.grounded = true;
    } else {
        state.grounded = false;
    }

    // --- Horizontal ---
    apply_movement(&mut state.velocity, intent, yaw);

    // --- Integrate ---
    state.position += state.velocity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{MAX_SPEED, SPAWN_POSITION};
    use bevy::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_falls_and_lands_on_floor() {
        let mut state = PlayerState::default();
        assert_eq!(state.position, SPAWN_POSITION);

        let mut landed_at = None;
        for tick in 0..200 {
            step_player(&mut state, &MovementIntent::IDLE, 0.0);
            assert!(state.position.y >= FLOOR_HEIGHT);
            if state.grounded && landed_at.is_none() {
                landed_at = Some(tick);
                assert_eq!(state.vertical_velocity, 0.0);
            }
        }

        // 4 units with v += 0.01 per tick takes ~28 ticks
        let landed_at = landed_at.expect("player should land");
        assert!(landed_at > 20 && landed_at < 40);
        assert_eq!(state.position.y, FLOOR_HEIGHT);
        assert!(state.grounded);
    }

    #[test]
    fn test_first_tick_applies_gravity() {
        let mut state = PlayerState::default();
        step_player(&mut state, &MovementIntent::IDLE, 0.0);
        assert!((state.vertical_velocity - GRAVITY).abs() < 1e-7);
        assert!((state.position.y - (SPAWN_POSITION.y + GRAVITY)).abs() < 1e-6);
        assert!(!state.grounded);
    }

    #[test]
    fn test_below_floor_is_clamped() {
        let mut state = PlayerState::at(Vec3::new(0.0, -3.0, 0.0));
        state.vertical_velocity = -0.5;
        step_player(&mut state, &MovementIntent::IDLE, 0.0);
        assert_eq!(state.position.y, FLOOR_HEIGHT);
        assert_eq!(state.vertical_velocity, 0.0);
        assert!(state.grounded);
    }

    #[test]
    fn test_walk_forward_reaches_max_speed() {
        let mut state = PlayerState::at(Vec3::new(0.0, FLOOR_HEIGHT, 0.0));
        let intent = MovementIntent::new(FRAC_PI_2, 1.0);
        for _ in 0..20 {
            step_player(&mut state, &intent, 0.0);
            assert!(state.horizontal_speed() <= MAX_SPEED + 1e-6);
        }
        assert!((state.horizontal_speed() - MAX_SPEED).abs() < 1e-5);
        assert!(state.position.z < 0.0);
        assert_eq!(state.position.y, FLOOR_HEIGHT);
    }

    #[test]
    fn test_releasing_intent_slows_down() {
        let mut state = PlayerState::at(Vec3::new(0.0, FLOOR_HEIGHT, 0.0));
        state.velocity = Vec3::new(MAX_SPEED, 0.0, 0.0);
        let start_x = state.position.x;
        for _ in 0..100 {
            let before = state.horizontal_speed();
            step_player(&mut state, &MovementIntent::IDLE, 0.0);
            assert!(state.horizontal_speed() < before || before == 0.0);
        }
        // Geometric series: 0.15 * 0.88 / (1 - 0.88) = 1.1
        assert!((state.position.x - start_x - 1.1).abs() < 0.01);
    }
}
