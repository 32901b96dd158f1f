use hecs::World;

use crate::{CpuBrain, KinematicBody, Paddle, PaddleIntent, Puck, Side, Table, Time};

/// Place the player paddle under the pointer, clamped to the player half
pub fn move_player_paddle(world: &mut World, time: &Time, table: &Table, velocity_scale: f64) {
    for (_entity, (paddle, intent, body)) in
        world.query_mut::<(&Paddle, &PaddleIntent, &mut KinematicBody)>()
    {
        if paddle.side != Side::Player {
            continue;
        }

        match intent.pointer {
            Some(pointer) => {
                let target = table.clamp_player(pointer);
                body.vel = if time.dt > 0.0 {
                    (target - body.pos) / time.dt * velocity_scale
                } else {
                    glam::DVec2::ZERO
                };
                body.pos = target;
            }
            None => body.vel = glam::DVec2::ZERO,
        }
    }
}

/// Let the CPU planner steer its paddle from the current puck snapshot
pub fn move_cpu_paddle(world: &mut World, time: &Time) {
    let puck = world
        .query::<&Puck>()
        .iter()
        .next()
        .and_then(|(_e, puck)| puck.state);

    for (_entity, (brain, body)) in world.query_mut::<(&mut CpuBrain, &mut KinematicBody)>() {
        let output = brain.planner.advance(puck.as_ref(), time.dt);
        body.pos = output.target.as_vec2();
        body.vel = output.velocity;
        brain.last_output = Some(output);
    }
}
