//! Limb rig: turns pet state into a draw description.
//!
//! Everything here is in canvas coordinates: unscaled pixels, origin at
//! the window's top-left corner, y down. The shell applies the user's
//! scale and converts to world units.
//!
//! The pet is assembled from five pieces. The body hangs below a fixed
//! top line, the head overlaps the body's top edge by half its height,
//! and each limb pivots around a joint on the body with the sprite
//! hanging down from it.

use bevy::math::Vec2;

use super::consts::*;
use super::state::{Appearance, PetState, SpriteSizes};

/// One limb placement: rotate by `angle_deg` around `joint`, drawing the
/// top-center-anchored sprite hanging down from it. Positive angles
/// swing the limb clockwise on screen; `flip` mirrors horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbPose {
    pub joint: Vec2,
    pub angle_deg: f32,
    pub flip: bool,
    pub scale: Vec2,
    pub z: f32,
}

/// Whole-pet draw list. `body` and `head` are top-left corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetPose {
    pub body: Vec2,
    pub head: Vec2,
    pub arm_l: LimbPose,
    pub arm_r: LimbPose,
    pub leg_l: LimbPose,
    pub leg_r: LimbPose,
}

/// Canvas size before the user's scale is applied. The height runs from
/// the window top to the feet at drawn leg length.
pub fn base_size(sizes: &SpriteSizes) -> Vec2 {
    Vec2::new(
        sizes.arm.y * WINDOW_ARM_FACTOR,
        BODY_TOP_Y + sizes.body.y + sizes.leg.y * LEG_SCALE_Y,
    )
}

/// On-screen window size for the current appearance.
pub fn window_size(looks: &Appearance, sizes: &SpriteSizes) -> Vec2 {
    base_size(sizes) * looks.scale
}

/// Lay out all five pieces for the current state. Breathing bobs the
/// body, and every joint rides on it.
pub fn pose(pet: &PetState, looks: &Appearance, sizes: &SpriteSizes) -> PetPose {
    let base = base_size(sizes);
    let body_x = (base.x - sizes.body.x) / 2.0;
    let body_y = BODY_TOP_Y + pet.breath;
    let body_bottom = body_y + sizes.body.y;

    let arm_scale = Vec2::new(looks.arm_stretch, ARM_SCALE_Y);
    let leg_scale = Vec2::new(LEG_SCALE_X, LEG_SCALE_Y);

    PetPose {
        body: Vec2::new(body_x, body_y),
        head: Vec2::new(
            body_x + (sizes.body.x - sizes.head.x) / 2.0,
            body_y - sizes.head.y / 2.0,
        ),
        arm_l: LimbPose {
            joint: Vec2::new(body_x + sizes.body.x - SHOULDER_INSET_X, body_y + SHOULDER_DROP_Y),
            angle_deg: pet.arm_l,
            flip: true,
            scale: arm_scale,
            z: Z_ARMS,
        },
        arm_r: LimbPose {
            joint: Vec2::new(body_x + SHOULDER_INSET_X, body_y + SHOULDER_DROP_Y),
            angle_deg: pet.arm_r,
            flip: false,
            scale: arm_scale,
            z: Z_ARMS,
        },
        leg_l: LimbPose {
            joint: Vec2::new(body_x + sizes.body.x * HIP_FRACTION_L, body_bottom),
            angle_deg: pet.leg_l,
            flip: true,
            scale: leg_scale,
            z: Z_LEGS,
        },
        leg_r: LimbPose {
            joint: Vec2::new(body_x + sizes.body.x * HIP_FRACTION_R, body_bottom),
            angle_deg: pet.leg_r,
            flip: false,
            scale: leg_scale,
            z: Z_LEGS,
        },
    }
}
