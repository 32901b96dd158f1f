use hecs::World;

use crate::components::*;
use crate::resources::*;

/// Hand the frame's latest pointer position to the player paddle
pub fn ingest_inputs(world: &mut World, inputs: &mut InputQueue) {
    let pointer = inputs.take_latest();

    for (_entity, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
        if paddle.side == Side::Player {
            intent.pointer = pointer;
        }
    }
}
