//! Scripted demo mode: cycles the pet through every behavior on a fixed
//! schedule so a change can be eyeballed without waiting for the AI to
//! feel like doing something.

use bevy::prelude::*;

use crate::pet::{Pet, PetSprites};
use crate::sim::state::{
    ARM_STRETCH_THIN, ARM_TINT_CRIMSON, ARM_TINT_DEFAULT, SCALE_LARGE, SCALE_NORMAL, SCALE_SMALL,
};
use crate::sim::{
    self, Appearance, MenuAction, Mode, PetEvent, PetState, ScreenBounds, SpriteSizes,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DemoCase {
    Drop,
    WalkRight,
    Stand,
    Wave,
    WalkLeft,
    Shrink,
    Grow,
    Crimson,
    Reset,
}

/// Case list with durations in ticks. Durations stay under the walk
/// AI's decision interval so a forced direction survives its case.
const CASES: &[(DemoCase, u32)] = &[
    (DemoCase::Drop, 100),
    (DemoCase::WalkRight, 100),
    (DemoCase::Stand, 40),
    (DemoCase::Wave, 80),
    (DemoCase::WalkLeft, 100),
    (DemoCase::Shrink, 70),
    (DemoCase::Grow, 70),
    (DemoCase::Crimson, 70),
    (DemoCase::Reset, 70),
];

#[derive(Resource, Default)]
pub struct DemoSeq {
    idx: usize,
    ticks_left: u32,
}

/// Runs on the fixed tick, ahead of the simulation step.
pub fn demo_driver(
    sprites: Res<PetSprites>,
    sizes: Res<SpriteSizes>,
    bounds: Res<ScreenBounds>,
    mut seq: ResMut<DemoSeq>,
    mut pets: Query<(&mut PetState, &mut Appearance), With<Pet>>,
) {
    if !sprites.ready {
        return;
    }
    let Ok((mut pet, mut looks)) = pets.get_single_mut() else {
        return;
    };
    if seq.ticks_left > 0 {
        seq.ticks_left -= 1;
        return;
    }
    let (case, duration) = CASES[seq.idx];
    seq.idx = (seq.idx + 1) % CASES.len();
    seq.ticks_left = duration;
    info!("demo case: {case:?}");
    apply_case(case, &mut pet, &mut looks, &sizes, &bounds);
}

fn apply_case(
    case: DemoCase,
    pet: &mut PetState,
    looks: &mut Appearance,
    sizes: &SpriteSizes,
    bounds: &ScreenBounds,
) {
    let win = sim::window_size(looks, sizes);
    let floor_y = bounds.bottom - win.y;
    match case {
        DemoCase::Drop => {
            pet.mode = Mode::Falling;
            pet.pos.y = (bounds.bottom * 0.4).min(floor_y);
            pet.vy = 0.0;
        }
        DemoCase::WalkRight => {
            ground(pet, floor_y);
            pet.walk_dir = 1;
            pet.walk_speed = 2.5;
            pet.vx = 2.5;
        }
        DemoCase::Stand => {
            ground(pet, floor_y);
            pet.walk_dir = 0;
            pet.vx = 0.0;
        }
        DemoCase::Wave => {
            ground(pet, floor_y);
            pet.walk_dir = 0;
            pet.vx = 0.0;
            pet.waving = true;
            pet.wave_timer = 0;
        }
        DemoCase::WalkLeft => {
            ground(pet, floor_y);
            pet.walk_dir = -1;
            pet.walk_speed = 2.5;
            pet.vx = -2.5;
        }
        DemoCase::Shrink => {
            sim::apply_event(
                pet,
                looks,
                sizes,
                PetEvent::Menu(MenuAction::SetScale { scale: SCALE_SMALL }),
            );
        }
        DemoCase::Grow => {
            sim::apply_event(
                pet,
                looks,
                sizes,
                PetEvent::Menu(MenuAction::SetScale { scale: SCALE_LARGE }),
            );
        }
        DemoCase::Crimson => {
            sim::apply_event(
                pet,
                looks,
                sizes,
                PetEvent::Menu(MenuAction::SetArmTint { color: ARM_TINT_CRIMSON }),
            );
        }
        DemoCase::Reset => {
            sim::apply_event(
                pet,
                looks,
                sizes,
                PetEvent::Menu(MenuAction::SetScale { scale: SCALE_NORMAL }),
            );
            sim::apply_event(
                pet,
                looks,
                sizes,
                PetEvent::Menu(MenuAction::SetArmStretch { factor: ARM_STRETCH_THIN }),
            );
            sim::apply_event(
                pet,
                looks,
                sizes,
                PetEvent::Menu(MenuAction::SetArmTint { color: ARM_TINT_DEFAULT }),
            );
        }
    }
    // a fresh case should not be cut short by a pending walk decision
    pet.decision_timer = 0;
}

fn ground(pet: &mut PetState, floor_y: f32) {
    pet.mode = Mode::OnGround;
    pet.pos.y = floor_y;
    pet.vy = 0.0;
}
