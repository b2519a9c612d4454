//! Input intake
//!
//! Drains the input the frontend accumulated since the last frame into
//! [`FrameInput`], so every system this frame reads the same snapshot.

use bevy::prelude::*;
use log::warn;

use crate::bevy::resources::{FrameInput, InputRes};

pub fn drain_input(input_res: Option<Res<InputRes>>, mut frame_input: ResMut<FrameInput>) {
    let Some(input_res) = input_res else {
        return;
    };

    let snapshot = match input_res.0 .0.lock() {
        Ok(mut guard) => guard.take_frame(),
        Err(e) => {
            warn!("[Input] Lock failed: {e}");
            // Edge-triggered input must not replay; held keys stay as they were
            *frame_input = FrameInput {
                held: frame_input.held,
                ..default()
            };
            return;
        }
    };

    *frame_input = FrameInput {
        look_delta: if snapshot.left_button {
            Vec2::new(snapshot.delta_x, snapshot.delta_y)
        } else {
            Vec2::ZERO
        },
        scroll_delta: snapshot.scroll_delta,
        pointer: snapshot.pointer,
        clicks: snapshot.clicks,
        held: snapshot.held,
        requests: snapshot.requests,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::thread;

    use crate::scene::MoveKey;
    use crate::tauri_bridge::shared_state::{SceneRequest, SharedInput};

    fn world_with(input: SharedInput) -> World {
        let mut world = World::new();
        world.insert_resource(InputRes(input));
        world.init_resource::<FrameInput>();
        world
    }

    #[test]
    fn clicks_and_requests_are_consumed_once() {
        let input = SharedInput::default();
        {
            let mut state = input.0.lock().expect("lock");
            state.clicks.push(Vec2::ZERO);
            state.requests.push(SceneRequest::ResetCamera);
        }
        let mut world = world_with(input);

        world.run_system_once(drain_input).expect("system runs");
        assert_eq!(world.resource::<FrameInput>().clicks.len(), 1);
        assert_eq!(world.resource::<FrameInput>().requests.len(), 1);

        world.run_system_once(drain_input).expect("system runs");
        assert!(world.resource::<FrameInput>().clicks.is_empty());
        assert!(world.resource::<FrameInput>().requests.is_empty());
    }

    #[test]
    fn poisoned_input_does_not_replay_the_last_frame() {
        let input = SharedInput::default();
        let mut world = world_with(input.clone());
        {
            let mut frame = world.resource_mut::<FrameInput>();
            frame.clicks.push(Vec2::ZERO);
            frame.requests.push(SceneRequest::ResetCamera);
            frame.scroll_delta = 3.0;
            frame.held.press(MoveKey::Forward);
        }

        let poisoner = input.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.0.lock().expect("lock");
            panic!("poison the input lock");
        })
        .join();
        assert!(input.0.is_poisoned());

        world.run_system_once(drain_input).expect("system runs");
        let frame = world.resource::<FrameInput>();
        assert!(frame.clicks.is_empty());
        assert!(frame.requests.is_empty());
        assert_eq!(frame.scroll_delta, 0.0);
        assert!(frame.held.is_held(MoveKey::Forward));
    }
}
