//! Tuning constants for the pet.
//!
//! Distances are in unscaled canvas pixels, durations in 30 ms ticks,
//! angles in degrees unless a name says otherwise.

// ===== Fixed timestep =====

/// Simulation tick length in seconds (~33 Hz).
pub const TICK_SECS: f64 = 0.03;

// ===== Fall physics =====

/// Downward acceleration, px/tick^2.
pub const GRAVITY: f32 = 2.0;
/// Fraction of impact speed kept when rebounding off the floor.
pub const BOUNCE_DAMPING: f32 = 0.5;
/// Rebounds slower than this settle instead of bouncing, px/tick.
pub const BOUNCE_MIN_SPEED: f32 = 3.0;

// ===== Walk AI =====

/// Ticks between walk decisions (~3.6 s).
pub const DECISION_INTERVAL: u32 = 120;
pub const WALK_SPEED_MIN: f32 = 1.0;
pub const WALK_SPEED_MAX: f32 = 4.0;

// ===== Wave gesture =====

/// One-in-N chance per idle tick to start waving.
pub const WAVE_CHANCE: u32 = 200;
/// Ticks a wave lasts (~1.8 s).
pub const WAVE_DURATION: u32 = 60;
/// Idle ticks after a wave before another can trigger (~9 s).
pub const WAVE_COOLDOWN: u32 = 300;
/// Raised-arm rest angle while waving.
pub const WAVE_BASE_DEG: f32 = 115.0;
/// Swing amplitude around the rest angle.
pub const WAVE_SWING_DEG: f32 = 25.0;
/// Radians added to the wave oscillator per tick.
pub const WAVE_PHASE_STEP: f32 = 0.5;

// ===== Ambient animation =====

/// Radians added to the shared animation phase per tick.
pub const PHASE_STEP: f32 = 0.1;
/// Breathing bob amplitude, px.
pub const BREATH_AMPLITUDE: f32 = 2.0;
/// Leg swing amplitude while walking.
pub const WALK_LEG_DEG: f32 = 15.0;
/// Arm counter-swing amplitude while walking.
pub const WALK_ARM_DEG: f32 = 10.0;
/// Arm flail amplitude while falling.
pub const FALL_FLAIL_DEG: f32 = 18.0;

// ===== Rig layout =====

/// Body top edge below the window top; the head overlaps this gap.
pub const BODY_TOP_Y: f32 = 80.0;
/// Shoulder joints sit this far inside the body's left/right edges.
pub const SHOULDER_INSET_X: f32 = 12.0;
/// Shoulder joints sit this far below the body top.
pub const SHOULDER_DROP_Y: f32 = 20.0;
/// Hip joints as fractions of body width along the body's bottom edge.
pub const HIP_FRACTION_L: f32 = 0.45;
pub const HIP_FRACTION_R: f32 = 0.55;
/// Window width as a multiple of the raw arm sprite height.
pub const WINDOW_ARM_FACTOR: f32 = 1.5;
/// Limb sprites are authored long and drawn squashed.
pub const ARM_SCALE_Y: f32 = 0.54;
pub const LEG_SCALE_X: f32 = 0.8;
pub const LEG_SCALE_Y: f32 = 0.6;

/// Draw order, back to front.
pub const Z_LEGS: f32 = 0.0;
pub const Z_BODY: f32 = 1.0;
pub const Z_HEAD: f32 = 2.0;
pub const Z_ARMS: f32 = 3.0;

// ===== Screen =====

/// Monitor size fallback when the backend reports nothing.
pub const SCREEN_FALLBACK_W: f32 = 1920.0;
pub const SCREEN_FALLBACK_H: f32 = 1080.0;
/// Start offset from the top-left screen corner.
pub const START_MARGIN: f32 = 40.0;
