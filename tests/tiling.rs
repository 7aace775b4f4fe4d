//! Frame math without a display: the tiler and the demo world together.

use glam::{DVec2, IVec2};
use scentscape::prelude::*;

#[test]
fn demo_world_covers_requested_box() {
    let world = DemoWorld::new(demo_config(), 5);
    let view = Viewport::new(DVec2::new(-40.0, -10.0), DVec2::new(50.0, 70.0));
    let tile = PatchBox::enclosing(view, world.config().patch_size);

    let patches = world.query_patches(tile.lower, tile.upper);
    assert_eq!(patches.len(), tile.patch_count());

    // Exactly once each, and nothing outside the box.
    let mut seen = std::collections::HashSet::new();
    for patch in &patches {
        assert!(tile.contains(patch.position), "{:?} outside box", patch.position);
        assert!(seen.insert(patch.position), "{:?} returned twice", patch.position);
    }
}

#[test]
fn single_patch_scenario() {
    let world = DemoWorld::new(demo_config(), 5);
    assert_eq!(world.config().patch_size, 32);

    let view = Viewport::new(DVec2::new(0.0, 0.0), DVec2::new(31.0, 31.0));
    let tile = PatchBox::enclosing(view, 32);
    let patches = world.query_patches(tile.lower, tile.upper);
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].position, IVec2::ZERO);
}

#[test]
fn repeated_queries_are_identical() {
    // With no intervening world step, two frames of the same viewport see
    // byte-identical patch content.
    let world = DemoWorld::new(demo_config(), 123);
    let view = Viewport::new(DVec2::new(-16.0, -16.0), DVec2::new(16.0, 16.0));
    let tile = PatchBox::enclosing(view, world.config().patch_size);

    let first = world.query_patches(tile.lower, tile.upper);
    let second = world.query_patches(tile.lower, tile.upper);
    assert_eq!(first, second);
}

#[test]
fn stepping_the_world_only_moves_the_agent() {
    let mut world = DemoWorld::new(demo_config(), 7);
    let far = IVec2::new(50, 50);
    let before = world.query_patches(far, far + IVec2::ONE);
    world.step();
    let after = world.query_patches(far, far + IVec2::ONE);
    // A patch far from the walk keeps its items and scent.
    assert_eq!(before[0].items, after[0].items);
    assert_eq!(before[0].scent, after[0].scent);
}

#[test]
fn acting_agent_vision_matches_config() {
    let world = DemoWorld::new(demo_config(), 9);
    let vision = world.agent_vision(ACTING_AGENT_ID).unwrap();
    assert_eq!(
        vision.extent() as u32,
        2 * world.config().vision_range + 1
    );
}

#[test]
fn absent_agent_is_reported_not_fatal() {
    let world = DemoWorld::new(demo_config(), 9);
    assert_eq!(world.agent_vision(1), Err(MissingAgent(1)));
}
