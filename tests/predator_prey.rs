mod common;

use common::{lion_energy, place_giraffes, place_lions, WorldBuilder};
use glam::Vec2;
use savanna_core::components::Lion;
use savanna_core::SimEvent;
use savanna_data::{LionState, Mob};

const DT: f32 = 0.05;

#[test]
fn test_lion_kills_adjacent_giraffe() {
    let mut world = WorldBuilder::new()
        .with_giraffes(1)
        .with_config(|c| {
            c.lion.max_energy = 0.5;
            c.lion.recharge_rate = 10.0;
        })
        .build();
    place_lions(&mut world, Vec2::new(400.0, 300.0));
    place_giraffes(&mut world, Vec2::new(405.0, 300.0));

    world.update(DT);

    assert!(world
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::GiraffeKilled { .. })));
    assert_live_giraffes!(world, 0);
    assert_eq!(world.giraffe_count(), 1, "the carcass stays on the field");
    assert_eq!(world.stats.giraffes_killed, 1);
    assert_eq!(world.lion_states(), vec![LionState::Resting]);
    assert_eq!(lion_energy(&world), vec![0.0]);
}

#[test]
fn test_carcass_decays() {
    let mut world = WorldBuilder::new()
        .with_giraffes(1)
        .with_config(|c| {
            c.lion.max_energy = 0.5;
            c.lion.recharge_rate = 10.0;
            c.giraffe.carcass_lifetime = 1.0;
        })
        .build();
    place_lions(&mut world, Vec2::new(400.0, 300.0));
    place_giraffes(&mut world, Vec2::new(405.0, 300.0));

    world.update(DT);
    assert_eq!(world.giraffe_count(), 1);

    for _ in 0..30 {
        world.update(DT);
    }
    assert_eq!(world.giraffe_count(), 0);
    assert_eq!(world.stats.carcasses_removed, 1);
}

#[test]
fn test_lion_gives_up_when_exhausted() {
    let mut world = WorldBuilder::new()
        .with_giraffes(1)
        .with_config(|c| {
            c.lion.max_energy = 1.0;
            c.lion.recharge_rate = 100.0;
            c.lion.exertion_rate = 10.0;
            c.steering.panic_distance = 0.0;
        })
        .build();
    place_lions(&mut world, Vec2::new(50.0, 50.0));
    place_giraffes(&mut world, Vec2::new(750.0, 550.0));

    world.update(DT);
    assert_eq!(world.lion_states(), vec![LionState::Hunting]);

    for _ in 0..3 {
        world.update(DT);
    }
    assert!(world.stats.lion_exhaustions >= 1);
    assert_live_giraffes!(world, 1);
}

#[test]
fn test_chase_ends_in_a_kill() {
    let mut world = WorldBuilder::new()
        .with_giraffes(1)
        .with_config(|c| {
            c.lion.exertion_rate = 0.0;
            c.lion.max_energy = 0.1;
            c.lion.recharge_rate = 10.0;
            c.giraffe.max_speed = 10.0;
        })
        .build();
    place_lions(&mut world, Vec2::new(100.0, 100.0));
    place_giraffes(&mut world, Vec2::new(600.0, 400.0));

    for _ in 0..2000 {
        world.update(DT);
        if world.stats.giraffes_killed > 0 {
            break;
        }
        assert_inside_field!(world);
        assert_speed_limits!(world);
    }
    assert_eq!(world.stats.giraffes_killed, 1);
}

#[test]
fn test_lion_waits_for_energy() {
    let mut world = WorldBuilder::new()
        .with_giraffes(5)
        .with_config(|c| {
            c.lion.max_energy = 10.0;
            c.lion.recharge_rate = 1.0;
        })
        .build();

    for _ in 0..100 {
        world.update(DT);
    }
    // 5 s of rest is half a charge.
    assert_eq!(world.lion_states(), vec![LionState::Resting]);
    assert_eq!(world.stats.giraffes_killed, 0);
}

#[test]
fn test_rival_lion_releases_shared_target_after_kill() {
    let mut world = WorldBuilder::new()
        .with_giraffes(1)
        .with_config(|c| {
            c.lion.count = 2;
            c.lion.max_energy = 0.5;
            c.lion.recharge_rate = 10.0;
            c.lion.exertion_rate = 0.0;
            c.steering.panic_distance = 0.0;
        })
        .build();
    let spots = [Vec2::new(100.0, 100.0), Vec2::new(700.0, 500.0)];
    for ((_, (_, mob)), spot) in world.ecs.query_mut::<(&Lion, &mut Mob)>().into_iter().zip(spots) {
        mob.position = spot;
        mob.velocity = Vec2::ZERO;
    }
    place_giraffes(&mut world, Vec2::new(400.0, 300.0));

    world.update(DT);
    assert_eq!(world.lion_states(), vec![LionState::Hunting, LionState::Hunting]);

    let lions: Vec<_> = world
        .ecs
        .query::<(&Lion, &Mob)>()
        .iter()
        .map(|(entity, (_, mob))| (entity, mob.position))
        .collect();
    place_giraffes(&mut world, lions[0].1 + Vec2::new(5.0, 0.0));

    let mut events = Vec::new();
    for _ in 0..3 {
        world.update(DT);
        events.extend(world.events.iter().cloned());
        if events.iter().any(|e| matches!(e, SimEvent::TargetLost { .. })) {
            break;
        }
    }

    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::GiraffeKilled { lion, .. } if *lion == lions[0].0)));
    assert!(events.contains(&SimEvent::TargetLost { lion: lions[1].0 }));
    assert_eq!(world.stats.giraffes_killed, 1);

    let rival = world.ecs.get::<&Lion>(lions[1].0).expect("rival lion");
    assert_eq!(rival.state, LionState::Resting);
    assert_eq!(rival.locked_giraffe, None);
    assert_eq!(rival.energy, 0.5, "a lost target does not cost energy");
}
