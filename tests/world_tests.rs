use wobble::{PhysicsError, Rect, Vec2, World, WorldConfig};

fn open_bounds() -> Rect<f32> {
    Rect::new(0.0, 0.0, 10_000.0, 10_000.0)
}

#[test]
fn zero_iterations_rejected() {
    let config = WorldConfig::new(open_bounds()).with_iterations(0);
    assert_eq!(World::new(config).err(), Some(PhysicsError::InvalidIterations));
}

#[test]
fn non_positive_fixed_dt_rejected() {
    let config = WorldConfig::new(open_bounds()).with_fixed_dt(0.0);
    assert_eq!(World::new(config).err(), Some(PhysicsError::InvalidTimeStep));

    let config = WorldConfig::new(open_bounds()).with_fixed_dt(-1.0 / 60.0);
    assert_eq!(World::new(config).err(), Some(PhysicsError::InvalidTimeStep));
}

#[test]
fn degenerate_bounds_rejected() {
    let config: WorldConfig<f32> = WorldConfig::new(Rect::new(100.0, 0.0, 100.0, 600.0));
    assert_eq!(World::new(config).err(), Some(PhysicsError::DegenerateBounds));

    let config: WorldConfig<f32> = WorldConfig::new(Rect::new(0.0, 600.0, 800.0, 0.0));
    assert_eq!(World::new(config).err(), Some(PhysicsError::DegenerateBounds));
}

#[test]
fn damping_outside_unit_range_rejected() {
    let config = WorldConfig::new(open_bounds()).with_damping(1.5);
    assert_eq!(World::new(config).err(), Some(PhysicsError::InvalidDamping));
}

#[test]
fn zero_sub_step_cap_rejected() {
    let config = WorldConfig::new(open_bounds()).with_max_sub_steps(0);
    assert_eq!(World::new(config).err(), Some(PhysicsError::InvalidSubStepCap));
}

#[test]
fn invalid_particle_query_is_an_error() {
    let mut world = World::new(WorldConfig::new(open_bounds())).unwrap();
    let id = world.add_particle(Vec2::new(10.0, 10.0), 1.0, 2.0).unwrap();
    assert!(world.particle_position(id).is_ok());

    // A handle from another world (or a typo) must surface, never be ignored.
    let other = World::new(WorldConfig::new(open_bounds()))
        .unwrap()
        .add_particle(Vec2::new(0.0, 0.0), 1.0, 2.0)
        .unwrap();
    let mut empty: World<f32> = World::new(WorldConfig::new(open_bounds())).unwrap();
    assert!(matches!(
        empty.apply_force(other, Vec2::new(1.0, 0.0)),
        Err(PhysicsError::InvalidParticle { index: 0, count: 0 })
    ));
}

#[test]
fn removed_body_handles_become_invalid() {
    let mut world = World::new(WorldConfig::new(open_bounds())).unwrap();
    let rope = world.add_rope(Vec2::new(100.0, 100.0), 20.0, 5, 0.9).unwrap();
    let first = world.body_particles(rope).unwrap()[1];

    world.remove_body(rope).unwrap();

    assert!(matches!(world.body_positions(rope), Err(PhysicsError::InvalidBody { .. })));
    assert!(matches!(world.particle_position(first), Err(PhysicsError::InvalidParticle { .. })));
    assert!(matches!(world.remove_body(rope), Err(PhysicsError::InvalidBody { .. })));
    assert_eq!(world.particle_count(), 0);
    assert_eq!(world.constraint_count(), 0);
    assert_eq!(world.body_count(), 0);
}

#[test]
fn removal_keeps_other_indices_stable() {
    let mut world = World::new(WorldConfig::new(open_bounds())).unwrap();
    let doomed = world.add_box(Vec2::new(200.0, 200.0), 40.0, 40.0, 1.0).unwrap();
    let keeper = world.add_particle(Vec2::new(500.0, 500.0), 1.0, 2.0).unwrap();

    world.remove_body(doomed).unwrap();

    let pos = world.particle_position(keeper).unwrap();
    assert_eq!(pos, Vec2::new(500.0, 500.0), "surviving ids must still resolve");
}

#[test]
fn drag_to_injects_no_velocity() {
    let config = WorldConfig::new(open_bounds()).with_damping(1.0);
    let mut world = World::new(config).unwrap();
    let id = world.add_particle(Vec2::new(100.0, 100.0), 1.0, 2.0).unwrap();

    world.drag_to(id, Vec2::new(400.0, 300.0)).unwrap();
    // No gravity, no damping loss: a teleported particle must stay put.
    for _ in 0..30 {
        world.step(1.0 / 60.0);
    }

    let pos = world.particle_position(id).unwrap();
    assert_eq!(pos, Vec2::new(400.0, 300.0), "teleport must not manufacture velocity");
}

#[test]
fn locked_particle_is_bit_identical_under_load() {
    let config = WorldConfig::new(open_bounds()).with_gravity(Vec2::new(0.0, 500.0));
    let mut world = World::new(config).unwrap();
    let anchor = world.add_particle(Vec2::new(321.5, 123.25), 1.0, 2.0).unwrap();
    world.set_locked(anchor, true).unwrap();
    let free = world.add_particle(Vec2::new(330.0, 123.25), 1.0, 2.0).unwrap();
    world.add_constraint(anchor, free, 1.0).unwrap();

    world.apply_force(free, Vec2::new(4000.0, -2500.0)).unwrap();
    for _ in 0..120 {
        world.step(1.0 / 60.0);
    }

    let pos = world.particle_position(anchor).unwrap();
    assert_eq!(pos.x, 321.5);
    assert_eq!(pos.y, 123.25);
}

#[test]
fn unlocking_restores_motion() {
    let config = WorldConfig::new(open_bounds()).with_gravity(Vec2::new(0.0, 500.0));
    let mut world = World::new(config).unwrap();
    let id = world.add_particle(Vec2::new(100.0, 100.0), 1.0, 2.0).unwrap();

    world.set_locked(id, true).unwrap();
    world.step(0.5);
    assert_eq!(world.particle_position(id).unwrap().y, 100.0);

    world.set_locked(id, false).unwrap();
    world.step(0.5);
    assert!(world.particle_position(id).unwrap().y > 100.0, "unlocked particle falls again");
}

#[test]
fn body_constraints_expose_renderable_segments() {
    let mut world = World::new(WorldConfig::new(open_bounds())).unwrap();
    let rope = world.add_rope(Vec2::new(100.0, 100.0), 20.0, 5, 0.9).unwrap();

    let segments = world.body_constraints(rope).unwrap().to_vec();
    assert_eq!(segments.len(), 4);
    for &id in &segments {
        let (a, b) = world.constraint_endpoints(id).unwrap();
        assert!((a.distance(b) - 20.0).abs() < 1e-4, "each segment spans one link");
    }

    world.remove_body(rope).unwrap();
    assert!(matches!(
        world.body_constraints(rope),
        Err(PhysicsError::InvalidBody { .. })
    ));
    assert!(matches!(
        world.constraint_endpoints(segments[0]),
        Err(PhysicsError::InvalidConstraint { .. })
    ));
}

#[test]
fn invalid_stiffness_rejected_by_factories() {
    let mut world = World::new(WorldConfig::new(open_bounds())).unwrap();
    assert_eq!(
        world.add_rope(Vec2::new(0.0, 0.0), 20.0, 5, 1.5).err(),
        Some(PhysicsError::InvalidStiffness)
    );
    assert_eq!(
        world.add_box(Vec2::new(0.0, 0.0), 10.0, 10.0, -0.5).err(),
        Some(PhysicsError::InvalidStiffness)
    );
}
