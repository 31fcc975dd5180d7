//! Fixed timestep pet update.
//!
//! [`tick`] advances the whole pet by one timer tick; [`apply_event`]
//! folds user input into the state between ticks. Both are plain
//! functions of their arguments so every behavior here is testable
//! without a window.

use std::f32::consts::TAU;

use bevy::math::Vec2;
use rand::Rng;

use super::consts::*;
use super::rig;
use super::state::{Appearance, MenuAction, Mode, PetEvent, PetState, ScreenBounds, SpriteSizes};

/// Advance the pet by one tick.
///
/// `win` is the current window size in screen pixels; the floor line is
/// `bounds.bottom - win.y`. While dragged, only the ambient animation
/// runs; position and velocity stay whatever the drag events set.
pub fn tick(pet: &mut PetState, win: Vec2, bounds: &ScreenBounds, rng: &mut impl Rng) {
    if pet.mode != Mode::Dragged {
        apply_gravity(pet, win, bounds);
        update_walk_ai(pet, rng);
        update_idle_gesture(pet, rng);
        update_wave(pet);
        apply_walk(pet, win, bounds);
    }
    update_animation(pet);
}

/// Gravity, floor collision, and the bounce-or-settle decision.
fn apply_gravity(pet: &mut PetState, win: Vec2, bounds: &ScreenBounds) {
    pet.vy += GRAVITY;
    let floor_y = bounds.bottom - win.y;
    let next_y = pet.pos.y + pet.vy;
    if next_y >= floor_y {
        pet.pos.y = floor_y;
        let rebound = pet.vy * BOUNCE_DAMPING;
        if rebound > BOUNCE_MIN_SPEED {
            pet.vy = -rebound;
            pet.mode = Mode::Falling;
        } else {
            pet.vy = 0.0;
            pet.mode = Mode::OnGround;
        }
    } else {
        pet.pos.y = next_y;
        pet.mode = Mode::Falling;
    }
}

/// Every `DECISION_INTERVAL` grounded ticks, pick a new walk direction
/// and speed. Direction 0 means stand still.
fn update_walk_ai(pet: &mut PetState, rng: &mut impl Rng) {
    if pet.mode != Mode::OnGround {
        return;
    }
    pet.decision_timer += 1;
    if pet.decision_timer < DECISION_INTERVAL {
        return;
    }
    pet.decision_timer = 0;
    pet.walk_dir = rng.gen_range(-1i8..=1);
    if pet.walk_dir == 0 {
        pet.vx = 0.0;
    } else {
        pet.walk_speed = rng.gen_range(WALK_SPEED_MIN..WALK_SPEED_MAX);
        pet.vx = pet.walk_dir as f32 * pet.walk_speed;
    }
}

/// Occasionally start a wave while standing around. The cooldown only
/// counts down on ticks the pet is actually idle.
fn update_idle_gesture(pet: &mut PetState, rng: &mut impl Rng) {
    if pet.mode != Mode::OnGround || pet.walk_dir != 0 || pet.waving {
        return;
    }
    if pet.wave_cooldown > 0 {
        pet.wave_cooldown -= 1;
        return;
    }
    if rng.gen_ratio(1, WAVE_CHANCE) {
        pet.waving = true;
        pet.wave_timer = 0;
    }
}

/// Drive the raised-arm oscillation for an active wave.
fn update_wave(pet: &mut PetState) {
    if !pet.waving {
        return;
    }
    pet.wave_timer += 1;
    pet.arm_l = WAVE_BASE_DEG + (pet.wave_timer as f32 * WAVE_PHASE_STEP).sin() * WAVE_SWING_DEG;
    if pet.wave_timer >= WAVE_DURATION {
        pet.waving = false;
        pet.wave_cooldown = WAVE_COOLDOWN;
        pet.arm_l = 0.0;
    }
}

/// Horizontal movement plus screen-edge handling. Hitting an edge snaps
/// the pet inside and turns it around at its last walk speed.
fn apply_walk(pet: &mut PetState, win: Vec2, bounds: &ScreenBounds) {
    pet.pos.x += pet.vx;
    if pet.pos.x <= bounds.left {
        pet.pos.x = bounds.left;
        pet.walk_dir = 1;
        pet.vx = pet.walk_speed;
    }
    let right_limit = bounds.right - win.x;
    if pet.pos.x >= right_limit {
        pet.pos.x = right_limit;
        pet.walk_dir = -1;
        pet.vx = -pet.walk_speed;
    }
}

/// Breathing bob plus per-mode limb swings. Runs every tick, dragged or
/// not, so the pet never freezes entirely.
fn update_animation(pet: &mut PetState) {
    // Both waveforms repeat every TAU, so wrapping is exact and keeps
    // the step above f32 resolution no matter how long the pet runs.
    pet.phase = (pet.phase + PHASE_STEP) % TAU;
    pet.breath = (pet.phase * 2.0).sin() * BREATH_AMPLITUDE;

    match pet.mode {
        Mode::Dragged => {
            pet.arm_l = 0.0;
            pet.arm_r = 0.0;
            pet.leg_l = 0.0;
            pet.leg_r = 0.0;
        }
        Mode::OnGround if pet.walk_dir != 0 => {
            let swing = (pet.phase * 2.0).sin();
            pet.leg_l = -swing * WALK_LEG_DEG;
            pet.leg_r = swing * WALK_LEG_DEG;
            pet.arm_l = -swing * WALK_ARM_DEG;
            pet.arm_r = swing * WALK_ARM_DEG;
        }
        Mode::Falling => {
            let flail = pet.phase.sin() * FALL_FLAIL_DEG;
            pet.leg_l = 0.0;
            pet.leg_r = 0.0;
            pet.arm_r = flail;
            if !pet.waving {
                pet.arm_l = -flail;
            }
        }
        Mode::OnGround => {
            pet.leg_l = 0.0;
            pet.leg_r = 0.0;
            pet.arm_r = 0.0;
            if !pet.waving {
                pet.arm_l = 0.0;
            }
        }
    }
}

/// Fold one input event into the state.
///
/// Events apply immediately so a drag grabs the pet mid-fall without
/// waiting for the next tick.
pub fn apply_event(
    pet: &mut PetState,
    looks: &mut Appearance,
    sizes: &SpriteSizes,
    event: PetEvent,
) {
    match event {
        PetEvent::DragStart => {
            pet.mode = Mode::Dragged;
            pet.vx = 0.0;
            pet.vy = 0.0;
            pet.waving = false;
            pet.wave_cooldown = WAVE_COOLDOWN;
        }
        PetEvent::DragMove { pos } => {
            if pet.mode == Mode::Dragged {
                pet.pos = pos;
            }
        }
        PetEvent::DragEnd => {
            if pet.mode == Mode::Dragged {
                pet.mode = Mode::Falling;
            }
        }
        PetEvent::Wave => {
            if pet.mode == Mode::OnGround && pet.walk_dir == 0 && !pet.waving {
                pet.waving = true;
                pet.wave_timer = 0;
            }
        }
        PetEvent::Menu(action) => apply_menu_action(pet, looks, sizes, action),
    }
}

fn apply_menu_action(
    pet: &mut PetState,
    looks: &mut Appearance,
    sizes: &SpriteSizes,
    action: MenuAction,
) {
    match action {
        MenuAction::SetScale { scale } => {
            let old = rig::window_size(looks, sizes);
            looks.scale = scale;
            let new = rig::window_size(looks, sizes);
            // Bottom-anchored resize: feet stay planted. If the new size
            // crosses a screen edge the next tick clamps it back.
            pet.pos.y -= new.y - old.y;
        }
        MenuAction::SetArmStretch { factor } => looks.arm_stretch = factor,
        MenuAction::SetArmTint { color } => looks.arm_tint = color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ARM_STRETCH_THICK, ARM_TINT_CRIMSON, SCALE_SMALL};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const WIN: Vec2 = Vec2::new(144.0, 208.0);

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn grounded(bounds: &ScreenBounds) -> PetState {
        let mut pet = PetState::new(Vec2::new(600.0, bounds.bottom - WIN.y));
        pet.mode = Mode::OnGround;
        pet
    }

    #[test]
    fn falling_accelerates_by_gravity() {
        let bounds = ScreenBounds::default();
        let mut pet = PetState::new(Vec2::new(600.0, 100.0));
        let mut rng = rng(1);
        let mut prev_vy = pet.vy;
        for _ in 0..10 {
            let prev_y = pet.pos.y;
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert_eq!(pet.vy, prev_vy + GRAVITY);
            assert_eq!(pet.pos.y, prev_y + pet.vy);
            prev_vy = pet.vy;
        }
    }

    #[test]
    fn high_drop_bounces_then_settles() {
        let bounds = ScreenBounds::default();
        let mut pet = PetState::new(Vec2::new(600.0, 50.0));
        let mut rng = rng(2);
        let mut bounced = false;
        let mut ticks = 0;
        while pet.mode != Mode::OnGround {
            tick(&mut pet, WIN, &bounds, &mut rng);
            if pet.vy < 0.0 {
                bounced = true;
            }
            ticks += 1;
            assert!(ticks < 10_000, "drop never settled");
        }
        assert!(bounced, "a high drop should rebound at least once");
        assert_eq!(pet.vy, 0.0);
        assert_eq!(pet.pos.y, bounds.bottom - WIN.y);
    }

    #[test]
    fn gentle_contact_settles_without_bounce() {
        let bounds = ScreenBounds::default();
        let floor_y = bounds.bottom - WIN.y;
        let mut pet = PetState::new(Vec2::new(600.0, floor_y - 1.0));
        let mut rng = rng(3);
        tick(&mut pet, WIN, &bounds, &mut rng);
        assert_eq!(pet.mode, Mode::OnGround);
        assert_eq!(pet.vy, 0.0);
        assert_eq!(pet.pos.y, floor_y);
    }

    #[test]
    fn right_edge_reverses_walk() {
        let bounds = ScreenBounds::default();
        let right_limit = bounds.right - WIN.x;
        let mut pet = grounded(&bounds);
        pet.pos.x = right_limit - 1.0;
        pet.walk_dir = 1;
        pet.walk_speed = 2.0;
        pet.vx = 2.0;
        let mut rng = rng(4);
        tick(&mut pet, WIN, &bounds, &mut rng);
        assert_eq!(pet.pos.x, right_limit);
        assert_eq!(pet.walk_dir, -1);
        assert_eq!(pet.vx, -2.0);
    }

    #[test]
    fn left_edge_reverses_walk() {
        let bounds = ScreenBounds::default();
        let mut pet = grounded(&bounds);
        pet.pos.x = bounds.left + 1.0;
        pet.walk_dir = -1;
        pet.walk_speed = 3.0;
        pet.vx = -3.0;
        let mut rng = rng(5);
        tick(&mut pet, WIN, &bounds, &mut rng);
        assert_eq!(pet.pos.x, bounds.left);
        assert_eq!(pet.walk_dir, 1);
        assert_eq!(pet.vx, 3.0);
    }

    #[test]
    fn walking_advances_by_walk_speed_each_tick() {
        let bounds = ScreenBounds::default();
        let mut pet = grounded(&bounds);
        pet.walk_dir = 1;
        pet.walk_speed = 2.5;
        pet.vx = 2.5;
        let mut rng = rng(14);
        for _ in 0..40 {
            let before = pet.pos.x;
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert_eq!(pet.pos.x, before + pet.walk_dir as f32 * pet.walk_speed);
            assert_eq!(pet.mode, Mode::OnGround);
        }

        pet.walk_dir = -1;
        pet.vx = -2.5;
        for _ in 0..40 {
            let before = pet.pos.x;
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert_eq!(pet.pos.x, before + pet.walk_dir as f32 * pet.walk_speed);
        }
    }

    #[test]
    fn long_run_stays_inside_screen() {
        let bounds = ScreenBounds::default();
        let right_limit = bounds.right - WIN.x;
        let floor_y = bounds.bottom - WIN.y;
        let mut pet = grounded(&bounds);
        let mut rng = rng(6);
        for _ in 0..5_000 {
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert!(pet.pos.x >= bounds.left && pet.pos.x <= right_limit);
            assert_eq!(pet.pos.y, floor_y);
        }
    }

    #[test]
    fn dragged_pet_is_inert() {
        let bounds = ScreenBounds::default();
        let mut pet = grounded(&bounds);
        pet.mode = Mode::Dragged;
        pet.pos = Vec2::new(333.0, 47.0);
        let mut rng = rng(7);
        for _ in 0..500 {
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert_eq!(pet.pos, Vec2::new(333.0, 47.0));
            assert_eq!(pet.vx, 0.0);
            assert_eq!(pet.vy, 0.0);
            assert_eq!(pet.decision_timer, 0);
            assert_eq!(pet.arm_l, 0.0);
            assert_eq!(pet.arm_r, 0.0);
            assert_eq!(pet.leg_l, 0.0);
            assert_eq!(pet.leg_r, 0.0);
        }
        // ambient animation keeps running
        assert!(pet.phase > 0.0);
    }

    #[test]
    fn wave_runs_full_duration_then_cools_down() {
        let bounds = ScreenBounds::default();
        let mut pet = grounded(&bounds);
        let mut rng = rng(8);

        let mut guard = 0;
        while !pet.waving {
            // keep the walk AI from interrupting the idle stretch
            pet.decision_timer = 0;
            tick(&mut pet, WIN, &bounds, &mut rng);
            guard += 1;
            assert!(guard < 100_000, "wave never triggered");
        }

        let mut waved = 1;
        while pet.waving {
            pet.decision_timer = 0;
            tick(&mut pet, WIN, &bounds, &mut rng);
            waved += 1;
            assert!(waved <= WAVE_DURATION, "wave overran its duration");
        }
        assert_eq!(waved, WAVE_DURATION);
        assert_eq!(pet.wave_cooldown, WAVE_COOLDOWN);

        for _ in 0..WAVE_COOLDOWN {
            pet.decision_timer = 0;
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert!(!pet.waving, "wave re-triggered during cooldown");
        }
        assert_eq!(pet.wave_cooldown, 0);
    }

    #[test]
    fn waving_arm_oscillates_around_base_angle() {
        let bounds = ScreenBounds::default();
        let mut pet = grounded(&bounds);
        pet.waving = true;
        pet.wave_timer = 0;
        let mut rng = rng(9);
        for _ in 0..10 {
            pet.decision_timer = 0;
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert!(pet.arm_l >= WAVE_BASE_DEG - WAVE_SWING_DEG);
            assert!(pet.arm_l <= WAVE_BASE_DEG + WAVE_SWING_DEG);
            // the other arm stays at rest
            assert_eq!(pet.arm_r, 0.0);
        }
    }

    #[test]
    fn walk_swing_overrides_the_waving_arm() {
        let bounds = ScreenBounds::default();
        let sizes = SpriteSizes::default();
        let mut looks = Appearance::default();
        let mut pet = grounded(&bounds);
        apply_event(&mut pet, &mut looks, &sizes, PetEvent::Wave);
        assert!(pet.waving);
        pet.walk_dir = 1;
        pet.walk_speed = 2.5;
        pet.vx = 2.5;

        let mut rng = rng(15);
        for expected in 1..WAVE_DURATION {
            tick(&mut pet, WIN, &bounds, &mut rng);
            // the wave keeps timing out underneath the walk swing
            assert_eq!(pet.wave_timer, expected);
            let swing = (pet.phase * 2.0).sin();
            assert_eq!(pet.arm_l, -swing * WALK_ARM_DEG);
        }
        tick(&mut pet, WIN, &bounds, &mut rng);
        assert!(!pet.waving);
        assert_eq!(pet.wave_cooldown, WAVE_COOLDOWN);
    }

    #[test]
    fn walk_decisions_fire_on_a_fixed_cadence() {
        let bounds = ScreenBounds::default();
        let mut pet = grounded(&bounds);
        pet.wave_cooldown = u32::MAX; // no gesture rolls during this test
        let mut rng = rng(10);
        for expected in 1..DECISION_INTERVAL {
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert_eq!(pet.decision_timer, expected);
        }
        tick(&mut pet, WIN, &bounds, &mut rng);
        assert_eq!(pet.decision_timer, 0);
    }

    #[test]
    fn no_walk_decisions_while_airborne() {
        let bounds = ScreenBounds::default();
        let mut pet = PetState::new(Vec2::new(600.0, 0.0));
        let mut rng = rng(11);
        for _ in 0..20 {
            tick(&mut pet, WIN, &bounds, &mut rng);
            if pet.mode != Mode::Falling {
                break;
            }
            assert_eq!(pet.decision_timer, 0);
        }
    }

    #[test]
    fn walking_swings_limbs_in_opposition() {
        let bounds = ScreenBounds::default();
        let mut pet = grounded(&bounds);
        pet.walk_dir = 1;
        pet.walk_speed = 1.0;
        pet.vx = 1.0;
        let mut rng = rng(12);
        let mut saw_swing = false;
        for _ in 0..20 {
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert_eq!(pet.leg_l, -pet.leg_r);
            assert_eq!(pet.arm_l, -pet.arm_r);
            if pet.leg_l != 0.0 {
                saw_swing = true;
            }
        }
        assert!(saw_swing);
    }

    #[test]
    fn idle_limbs_rest_while_breathing() {
        let bounds = ScreenBounds::default();
        let mut pet = grounded(&bounds);
        pet.wave_cooldown = u32::MAX;
        let mut rng = rng(13);
        tick(&mut pet, WIN, &bounds, &mut rng);
        assert_eq!(pet.arm_l, 0.0);
        assert_eq!(pet.arm_r, 0.0);
        assert_eq!(pet.leg_l, 0.0);
        assert_eq!(pet.leg_r, 0.0);
        let expected = (PHASE_STEP * 2.0).sin() * BREATH_AMPLITUDE;
        assert!((pet.breath - expected).abs() < 1e-6);
    }

    #[test]
    fn breathing_survives_long_uptimes() {
        let bounds = ScreenBounds::default();
        let mut pet = grounded(&bounds);
        pet.wave_cooldown = u32::MAX;
        // phase after roughly a week of ticks; a 0.1 step is below f32
        // resolution at this magnitude
        pet.phase = 2_097_152.0;
        let mut rng = rng(16);
        let mut breaths = Vec::new();
        for _ in 0..100 {
            tick(&mut pet, WIN, &bounds, &mut rng);
            assert!(pet.phase >= 0.0 && pet.phase < TAU);
            breaths.push(pet.breath);
        }
        assert!(
            breaths.windows(2).any(|w| w[0] != w[1]),
            "breathing froze at high phase"
        );
    }

    #[test]
    fn manual_wave_skips_the_cooldown() {
        let bounds = ScreenBounds::default();
        let sizes = SpriteSizes::default();
        let mut looks = Appearance::default();
        let mut pet = grounded(&bounds);
        pet.wave_cooldown = WAVE_COOLDOWN;
        apply_event(&mut pet, &mut looks, &sizes, PetEvent::Wave);
        assert!(pet.waving);
        assert_eq!(pet.wave_timer, 0);
    }

    #[test]
    fn manual_wave_ignored_unless_idle_on_ground() {
        let bounds = ScreenBounds::default();
        let sizes = SpriteSizes::default();
        let mut looks = Appearance::default();

        let mut pet = grounded(&bounds);
        pet.walk_dir = 1;
        apply_event(&mut pet, &mut looks, &sizes, PetEvent::Wave);
        assert!(!pet.waving);

        let mut pet = PetState::new(Vec2::new(600.0, 100.0));
        apply_event(&mut pet, &mut looks, &sizes, PetEvent::Wave);
        assert!(!pet.waving);
    }

    #[test]
    fn drag_grabs_cancels_wave_and_releases_into_fall() {
        let bounds = ScreenBounds::default();
        let sizes = SpriteSizes::default();
        let mut looks = Appearance::default();
        let mut pet = grounded(&bounds);
        pet.waving = true;
        pet.wave_timer = 10;
        pet.vx = 2.5;

        apply_event(&mut pet, &mut looks, &sizes, PetEvent::DragStart);
        assert_eq!(pet.mode, Mode::Dragged);
        assert_eq!(pet.vx, 0.0);
        assert_eq!(pet.vy, 0.0);
        assert!(!pet.waving);
        assert_eq!(pet.wave_cooldown, WAVE_COOLDOWN);

        let target = Vec2::new(500.0, 120.0);
        apply_event(&mut pet, &mut looks, &sizes, PetEvent::DragMove { pos: target });
        assert_eq!(pet.pos, target);

        apply_event(&mut pet, &mut looks, &sizes, PetEvent::DragEnd);
        assert_eq!(pet.mode, Mode::Falling);
    }

    #[test]
    fn drag_move_ignored_when_not_dragged() {
        let bounds = ScreenBounds::default();
        let sizes = SpriteSizes::default();
        let mut looks = Appearance::default();
        let mut pet = grounded(&bounds);
        let before = pet.pos;
        apply_event(
            &mut pet,
            &mut looks,
            &sizes,
            PetEvent::DragMove { pos: Vec2::new(10.0, 10.0) },
        );
        assert_eq!(pet.pos, before);
    }

    #[test]
    fn scale_change_keeps_feet_planted() {
        let bounds = ScreenBounds::default();
        let sizes = SpriteSizes::default();
        let mut looks = Appearance::default();
        let win = rig::window_size(&looks, &sizes);
        let mut pet = PetState::new(Vec2::new(600.0, bounds.bottom - win.y));
        pet.mode = Mode::OnGround;
        let feet = pet.pos.y + win.y;

        apply_event(
            &mut pet,
            &mut looks,
            &sizes,
            PetEvent::Menu(MenuAction::SetScale { scale: SCALE_SMALL }),
        );
        let new_win = rig::window_size(&looks, &sizes);
        assert!((pet.pos.y + new_win.y - feet).abs() < 1e-3);
        assert_eq!(looks.scale, SCALE_SMALL);
    }

    #[test]
    fn arm_menu_actions_update_appearance() {
        let bounds = ScreenBounds::default();
        let sizes = SpriteSizes::default();
        let mut looks = Appearance::default();
        let mut pet = grounded(&bounds);

        apply_event(
            &mut pet,
            &mut looks,
            &sizes,
            PetEvent::Menu(MenuAction::SetArmStretch { factor: ARM_STRETCH_THICK }),
        );
        assert_eq!(looks.arm_stretch, ARM_STRETCH_THICK);

        apply_event(
            &mut pet,
            &mut looks,
            &sizes,
            PetEvent::Menu(MenuAction::SetArmTint { color: ARM_TINT_CRIMSON }),
        );
        assert_eq!(looks.arm_tint, ARM_TINT_CRIMSON);
    }
}
