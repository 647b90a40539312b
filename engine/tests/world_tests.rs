//! World Tests - Frame Stepping, Regeneration and Configuration
//!
//! End-to-end tests through the public `World` API.

use glam::DVec3;
use storm_valley_engine::player::Avatar;
use storm_valley_engine::{ConfigError, InputIntent, World, WorldConfig};

const DT: f64 = 1.0 / 60.0;

fn small_config() -> WorldConfig {
    let mut config = WorldConfig::default();
    config.rain.particle_count = 500;
    config.terrain.segments = 50;
    config
}

// ============================================================================
// Generation Tests
// ============================================================================

#[test]
fn test_default_world_sizes() {
    let world = World::with_defaults(7);
    assert_eq!(world.rain().len(), 15_000);
    assert!(!world.water().is_empty());
    assert_eq!(world.lightning().active_count(), 0);
    assert_eq!(world.player().position, DVec3::new(0.0, 3.0, 0.0));
    assert!(world.avatar().is_placeholder());
}

#[test]
fn test_same_seed_same_world() {
    let mut a = World::generate(99, small_config()).expect("valid config");
    let mut b = World::generate(99, small_config()).expect("valid config");

    assert_eq!(a.height_at(12.0, -7.0), b.height_at(12.0, -7.0));
    assert_eq!(a.water().tiles(), b.water().tiles());

    let walk = InputIntent::new().with_forward().with_turn_left();
    for _ in 0..30 {
        let pa = a.step_frame(DT, &walk).player;
        let pb = b.step_frame(DT, &walk).player;
        assert_eq!(pa, pb);
    }
    assert_eq!(a.rain().particles(), b.rain().particles());
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = small_config();
    config.rain.min_fall_speed = 1.0;
    config.rain.max_fall_speed = 0.1;
    assert!(matches!(
        World::generate(1, config),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn test_config_from_json() {
    let config = WorldConfig::from_json_str(
        r#"{ "terrain": { "segments": 50 }, "lightning": { "max_bolts": 1 } }"#,
    )
    .expect("valid json");
    let world = World::generate(3, config).expect("valid config");
    assert_eq!(world.config().lightning.max_bolts, 1);
    assert_eq!(world.terrain().mesh().segments(), 50);
}

// ============================================================================
// Frame Tests
// ============================================================================

#[test]
fn test_frame_outputs_cover_every_component() {
    let mut world = World::generate(5, small_config()).expect("valid config");
    let tiles = world.water().len();
    let frame = world.step_frame(DT, &InputIntent::IDLE);

    assert_eq!(frame.rain.len(), 500);
    assert_eq!(frame.water.len(), tiles);
    assert!(frame.strikes.len() <= 2);
    assert!(frame.ambient_light >= 0.0 && frame.ambient_light <= 0.8);
    assert!(frame.avatar.is_placeholder());
}

#[test]
fn test_idle_player_settles_without_drift() {
    let mut config = small_config();
    // Off the terrain footprint the ground is the 0.5 fallback
    config.player.spawn_position = DVec3::new(500.0, 0.5, 500.0);
    let mut world = World::generate(6, config).expect("valid config");

    let first = world.step_frame(DT, &InputIntent::IDLE).player;
    assert!(first.just_landed);

    for _ in 0..300 {
        let player = world.step_frame(DT, &InputIntent::IDLE).player;
        assert_eq!(player.position.y, 0.5);
        assert_eq!(player.vertical_velocity, 0.0);
        assert!(player.is_grounded);
        assert!(!player.just_landed);
    }
}

#[test]
fn test_jump_flags_last_one_frame_through_world() {
    let mut world = World::generate(8, small_config()).expect("valid config");
    for _ in 0..120 {
        world.step_frame(DT, &InputIntent::IDLE);
    }
    assert!(world.player().is_grounded);

    let jumped = world.step_frame(DT, &InputIntent::new().with_jump()).player;
    assert!(jumped.just_jumped);
    assert_eq!(jumped.vertical_velocity, 8.0);

    // Cleared once the frame has been handed out
    assert!(!world.player().just_jumped);
    let next = world.step_frame(DT, &InputIntent::IDLE).player;
    assert!(!next.just_jumped);
}

#[test]
fn test_player_grounded_on_mesh_height() {
    let mut world = World::generate(9, small_config()).expect("valid config");
    for _ in 0..120 {
        world.step_frame(DT, &InputIntent::IDLE);
    }

    let player = *world.player();
    let ground = world.ground_height(player.position.x, player.position.z);
    assert!((player.position.y - ground).abs() < 1e-9);
    let surface = world.height_at(player.position.x, player.position.z).expect("on terrain");
    assert!((ground - surface - 0.9).abs() < 1e-9);
}

#[test]
fn test_water_bobs_with_simulated_time() {
    let mut world = World::generate(10, small_config()).expect("valid config");
    let before: Vec<f64> = world.water().tiles().iter().map(|t| t.position.y).collect();

    world.step_frame(0.1, &InputIntent::IDLE);
    let after: Vec<f64> = world.water().tiles().iter().map(|t| t.position.y).collect();

    assert_eq!(before.len(), after.len());
    assert_ne!(before, after);
}

// ============================================================================
// Regeneration Tests
// ============================================================================

#[test]
fn test_regeneration_replaces_every_terrain_reference() {
    let mut world = World::generate(11, small_config()).expect("valid config");
    for _ in 0..20 {
        world.step_frame(DT, &InputIntent::new().with_forward());
    }
    let old_terrain = world.terrain().id();

    world.regenerate(12);

    let new_terrain = world.terrain().id();
    assert_ne!(old_terrain, new_terrain);
    assert_eq!(world.rain().terrain_id(), Some(new_terrain));
    assert_eq!(world.water().terrain_id(), Some(new_terrain));
    assert_eq!(world.player().position, DVec3::new(0.0, 3.0, 0.0));
    assert_eq!(world.time(), 0.0);
    assert_eq!(world.frame(), 0);
}

#[test]
fn test_regeneration_with_same_seed_gets_new_identity() {
    let mut world = World::generate(13, small_config()).expect("valid config");
    let old_terrain = world.terrain().id();
    let old_height = world.height_at(3.0, 3.0);

    world.regenerate(13);

    assert_ne!(world.terrain().id(), old_terrain);
    assert_eq!(world.height_at(3.0, 3.0), old_height);
}

#[test]
fn test_regeneration_keeps_avatar() {
    let mut world = World::generate(14, small_config()).expect("valid config");
    world.set_avatar(Avatar::model());
    world.regenerate(15);
    assert_eq!(world.avatar(), Avatar::Model { scale: 1.5 });
}

#[test]
fn test_regenerate_with_invalid_config_keeps_world() {
    let mut world = World::generate(16, small_config()).expect("valid config");
    let terrain = world.terrain().id();

    let mut bad = small_config();
    bad.water.tile_size = 0.0;
    assert!(world.regenerate_with(17, bad).is_err());
    assert_eq!(world.terrain().id(), terrain);
    assert_eq!(world.seed(), 16);
}
