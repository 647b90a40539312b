//! Player Tests - Grounding, Jump/Land Edges and Turning
//!
//! Drives the movement controller over synthetic grounds and over a
//! generated terrain mesh.

use glam::DVec3;
use storm_valley_engine::input::InputIntent;
use storm_valley_engine::player::{PlayerMovementController, PlayerPhysics, PlayerState};
use storm_valley_engine::terrain::{Terrain, TerrainConfig};

const DT: f64 = 1.0 / 60.0;

fn undefined(_x: f64, _z: f64) -> Option<f64> {
    None
}

/// Grounded on the fallback ground height (0.5).
fn grounded_on_fallback() -> PlayerMovementController {
    PlayerMovementController::with_state(
        PlayerPhysics::default(),
        PlayerState::grounded_at(DVec3::new(0.0, 0.5, 0.0)),
    )
}

// ============================================================================
// Grounding Tests
// ============================================================================

#[test]
fn test_idle_grounded_player_does_not_drift() {
    let mut controller = grounded_on_fallback();

    for frame in 0..600 {
        let state = *controller.update(&InputIntent::IDLE, DT, frame as f64 * DT, &undefined);
        assert_eq!(state.position.y, 0.5);
        assert_eq!(state.vertical_velocity, 0.0);
        assert!(state.is_grounded);
        assert!(!state.just_landed);
        controller.end_frame();
    }
}

#[test]
fn test_jump_then_land() {
    let mut controller = grounded_on_fallback();
    let jump = InputIntent::new().with_jump();

    let state = *controller.update(&jump, DT, 0.0, &undefined);
    assert_eq!(state.vertical_velocity, 8.0);
    assert!(!state.is_grounded);
    assert!(state.just_jumped);
    controller.end_frame();

    let mut previous_velocity = state.vertical_velocity;
    let mut landed_frames = 0;
    let mut airborne_frames = 0;

    for frame in 1..200 {
        let state = *controller.update(&InputIntent::IDLE, DT, frame as f64 * DT, &undefined);
        assert!(!state.just_jumped, "just_jumped lasts one frame");

        if state.just_landed {
            landed_frames += 1;
            assert!(state.is_grounded);
            assert_eq!(state.position.y, 0.5);
        } else if landed_frames == 0 {
            airborne_frames += 1;
            assert!(!state.is_grounded);
            assert!(state.vertical_velocity < previous_velocity);
            assert!(state.position.y > 0.5);
            previous_velocity = state.vertical_velocity;
        } else {
            assert!(state.is_grounded);
            assert_eq!(state.position.y, 0.5);
        }
        controller.end_frame();
    }

    assert_eq!(landed_frames, 1);
    // Roughly 2 * 8 / 30 seconds in the air
    assert!((25..40).contains(&airborne_frames), "airborne for {airborne_frames} frames");
}

#[test]
fn test_jump_held_on_landing_jumps_again() {
    let mut controller = grounded_on_fallback();
    let jump = InputIntent::new().with_jump();
    let mut jumps = 0;

    for frame in 0..120 {
        if controller.update(&jump, DT, frame as f64 * DT, &undefined).just_jumped {
            jumps += 1;
        }
        controller.end_frame();
    }
    assert!(jumps >= 2);
}

#[test]
fn test_player_rests_on_terrain_mesh() {
    let config = TerrainConfig {
        segments: 60,
        ..TerrainConfig::default()
    };
    let terrain = Terrain::generate(31, &config);
    let mut controller = PlayerMovementController::default();

    for frame in 0..120 {
        controller.update(&InputIntent::IDLE, DT, frame as f64 * DT, terrain.mesh());
        controller.end_frame();
    }

    let state = controller.state();
    let ground = terrain.mesh().raycast_down(0.0, 0.0).expect("origin on terrain");
    assert!(state.is_grounded);
    assert!((state.position.y - (ground.point.y + 0.9)).abs() < 1e-9);
}

#[test]
fn test_walk_across_terrain_stays_grounded() {
    let terrain = Terrain::generate(42, &TerrainConfig::default());
    let mut controller = PlayerMovementController::default();

    for frame in 0..120 {
        controller.update(&InputIntent::IDLE, DT, frame as f64 * DT, terrain.mesh());
        controller.end_frame();
    }
    assert!(controller.state().is_grounded);

    let walk = InputIntent::new().with_forward();
    for frame in 120..300 {
        let state = *controller.update(&walk, DT, frame as f64 * DT, terrain.mesh());
        assert!(state.is_grounded, "airborne at z {:.2}", state.position.z);
        assert!(!state.just_landed, "landed at z {:.2}", state.position.z);
        controller.end_frame();
    }
    assert!(controller.state().position.z > 50.0);
}

#[test]
fn test_walking_off_the_footprint_uses_fallback() {
    let config = TerrainConfig {
        segments: 60,
        ..TerrainConfig::default()
    };
    let terrain = Terrain::generate(32, &config);
    let mut controller = PlayerMovementController::with_state(
        PlayerPhysics::default(),
        PlayerState::spawn_at(DVec3::new(0.0, 20.0, 59.0)),
    );
    let walk = InputIntent::new().with_forward();

    for frame in 0..300 {
        controller.update(&walk, DT, frame as f64 * DT, terrain.mesh());
        controller.end_frame();
    }

    let state = controller.state();
    assert!(state.position.z > 60.0);
    assert_eq!(state.position.y, 0.5);
}

// ============================================================================
// Turning Tests
// ============================================================================

#[test]
fn test_holding_turn_keeps_turning() {
    let mut controller = grounded_on_fallback();
    let left = InputIntent::new().with_turn_left();

    let mut last_yaw = controller.state().yaw;
    for _ in 0..30 {
        let yaw = controller.update(&left, DT, 0.0, &undefined).yaw;
        assert!(yaw > last_yaw);
        last_yaw = yaw;
    }
}

#[test]
fn test_forward_follows_yaw() {
    let mut controller = PlayerMovementController::with_state(
        PlayerPhysics::default(),
        PlayerState {
            yaw: std::f64::consts::FRAC_PI_2,
            ..PlayerState::grounded_at(DVec3::new(0.0, 0.5, 0.0))
        },
    );
    controller.update(&InputIntent::new().with_forward(), DT, 0.0, &undefined);

    let pos = controller.state().position;
    assert!((pos.x - 0.3).abs() < 1e-12);
    assert!(pos.z.abs() < 1e-12);
}
