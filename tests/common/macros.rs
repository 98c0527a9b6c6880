/// Asserts the number of live giraffes.
#[macro_export]
macro_rules! assert_live_giraffes {
    ($world:expr, $count:expr) => {
        assert_eq!(
            $world.live_giraffe_count(),
            $count,
            "Live giraffe count mismatch"
        );
    };
}

/// Asserts that every actor sits inside the field.
#[macro_export]
macro_rules! assert_inside_field {
    ($world:expr) => {
        for (_, mob) in $world.ecs.query::<&savanna_data::Mob>().iter() {
            assert!(
                mob.position.x >= 0.0
                    && mob.position.y >= 0.0
                    && mob.position.x <= $world.size.x
                    && mob.position.y <= $world.size.y,
                "Actor escaped the field at {:?}",
                mob.position
            );
        }
    };
}

/// Asserts that no speed exceeds its mob's max.
#[macro_export]
macro_rules! assert_speed_limits {
    ($world:expr) => {
        for (_, mob) in $world.ecs.query::<&savanna_data::Mob>().iter() {
            assert!(
                mob.speed() <= mob.max_speed + 1e-3,
                "Speed {} exceeds max {}",
                mob.speed(),
                mob.max_speed
            );
        }
    };
}
