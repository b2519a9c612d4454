use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use desk_portfolio_lib::config::{burst, camera};
use desk_portfolio_lib::scene::{
    BurstEffect, BurstSettings, CameraMode, CameraRig, HeldKeys, LightSwitch, MoveKey,
    ResumePaper, XorShift32,
};

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn intro_flight_hands_over_to_free_flight() {
    let mut rig = CameraRig::default();
    assert_eq!(rig.mode(), CameraMode::Scripted);

    let frames = (camera::SCRIPTED_DURATION / FRAME).ceil() as usize + 1;
    for _ in 0..frames {
        rig.update(FRAME, HeldKeys::default());
    }
    assert_eq!(rig.mode(), CameraMode::Free);
    let target = rig.target();
    assert_relative_eq!(rig.position().z, target.z, epsilon = 1e-3);

    let mut held = HeldKeys::default();
    held.press(MoveKey::Forward);
    let before = rig.position();
    rig.update(1.0, held);
    assert_relative_eq!(
        rig.position().distance(before),
        camera::MOVE_SPEED,
        epsilon = 1e-4
    );
}

#[test]
fn burst_runs_to_completion_once() {
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = completions.clone();
    let mut effect = BurstEffect::new(BurstSettings::default()).on_complete(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let mut rng = XorShift32::new(42);

    let mut peak = 0;
    let frames = ((burst::DURATION + burst::RAY_LIFETIME) / FRAME) as usize + 60;
    for _ in 0..frames {
        effect.update(FRAME, &mut rng);
        peak = peak.max(effect.active_count());
    }

    assert!(peak > 0);
    assert!(peak <= burst::MAX_RAYS);
    assert_eq!(effect.spawned(), burst::MAX_RAYS);
    assert!(effect.is_complete());
    assert_eq!(effect.overlay_opacity(), 1.0);
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[test]
fn lights_and_paper_interact_independently() {
    let mut lights = LightSwitch::default();
    let mut paper = ResumePaper::default();

    lights.toggle();
    assert!(!lights.is_on());
    assert!(!paper.click());

    for _ in 0..300 {
        paper.update(FRAME);
    }
    assert!(paper.is_unlocked());
    assert!(paper.click());
    assert!(paper.is_focused());
    assert!(!lights.is_on());
}
