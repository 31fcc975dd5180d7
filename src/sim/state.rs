//! Pet state, appearance, and input event types.

use bevy::math::Vec2;
use bevy::prelude::{Color, Component, Resource};

use super::consts::*;

/// What the pet is currently doing; selects which tick rules run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Airborne, accelerating toward the floor.
    #[default]
    Falling,
    /// Feet on the floor line; walk AI and gestures are active.
    OnGround,
    /// Pinned to the cursor; physics and AI are suspended.
    Dragged,
}

/// Full dynamic state of the pet.
///
/// `pos` is the window's top-left corner in screen pixels, y down. Limb
/// angles are in degrees, 0 = hanging straight down from the joint.
#[derive(Component, Debug, Clone)]
pub struct PetState {
    pub mode: Mode,
    pub pos: Vec2,
    /// Horizontal velocity, px/tick. Nonzero only while walking.
    pub vx: f32,
    /// Vertical velocity, px/tick, positive down.
    pub vy: f32,
    /// -1 left, 0 stand, +1 right.
    pub walk_dir: i8,
    /// Speed of the last walk decision; kept while standing so an edge
    /// hit can reuse it.
    pub walk_speed: f32,
    /// Ticks since the last walk decision.
    pub decision_timer: u32,
    /// Shared oscillator for breath and limb swings, radians.
    pub phase: f32,
    /// Current breathing bob offset, px.
    pub breath: f32,
    pub arm_l: f32,
    pub arm_r: f32,
    pub leg_l: f32,
    pub leg_r: f32,
    pub waving: bool,
    /// Ticks since the current wave started.
    pub wave_timer: u32,
    /// Idle ticks remaining before the next wave may trigger.
    pub wave_cooldown: u32,
}

impl PetState {
    pub fn new(pos: Vec2) -> Self {
        Self {
            mode: Mode::Falling,
            pos,
            vx: 0.0,
            vy: 0.0,
            walk_dir: 0,
            walk_speed: 0.0,
            decision_timer: 0,
            phase: 0.0,
            breath: 0.0,
            arm_l: 0.0,
            arm_r: 0.0,
            leg_l: 0.0,
            leg_r: 0.0,
            waving: false,
            wave_timer: 0,
            wave_cooldown: 0,
        }
    }
}

/// User-adjustable looks, edited from the context menu.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Appearance {
    /// Whole-pet scale; also scales the window.
    pub scale: f32,
    /// Horizontal arm scale on top of the baked squash.
    pub arm_stretch: f32,
    pub arm_tint: Color,
    pub leg_tint: Color,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            scale: 1.0,
            arm_stretch: ARM_STRETCH_THIN,
            arm_tint: ARM_TINT_DEFAULT,
            leg_tint: LEG_TINT_DEFAULT,
        }
    }
}

/// Usable monitor area in screen pixels, y down.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: SCREEN_FALLBACK_W,
            bottom: SCREEN_FALLBACK_H,
        }
    }
}

/// Raw sprite dimensions in pixels, measured after load.
///
/// The defaults stand in when a sprite fails to load; they match the
/// placeholder rectangles the shell draws in that case.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpriteSizes {
    pub body: Vec2,
    pub head: Vec2,
    pub arm: Vec2,
    pub leg: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            body: Vec2::new(64.0, 70.0),
            head: Vec2::new(44.0, 44.0),
            arm: Vec2::new(20.0, 96.0),
            leg: Vec2::new(20.0, 96.0),
        }
    }
}

/// Context-menu commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    SetScale { scale: f32 },
    SetArmStretch { factor: f32 },
    SetArmTint { color: Color },
}

/// Everything the outside world can do to the pet besides ticking it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PetEvent {
    /// Grabbed with the left button.
    DragStart,
    /// Cursor moved while grabbed; `pos` is the new window top-left.
    DragMove { pos: Vec2 },
    /// Left button released.
    DragEnd,
    /// Manual wave request (W key). Ignored unless idle on the ground.
    Wave,
    Menu(MenuAction),
}

// ===== Appearance presets =====

pub const SCALE_SMALL: f32 = 0.7;
pub const SCALE_NORMAL: f32 = 1.0;
pub const SCALE_LARGE: f32 = 1.3;
pub const ARM_STRETCH_THIN: f32 = 0.8;
pub const ARM_STRETCH_THICK: f32 = 1.3;
pub const ARM_TINT_DEFAULT: Color = Color::srgb(0.392, 0.584, 0.929);
pub const ARM_TINT_CRIMSON: Color = Color::srgb(0.706, 0.235, 0.235);
pub const LEG_TINT_DEFAULT: Color = Color::srgb(0.863, 0.706, 0.549);
