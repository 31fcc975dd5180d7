//! Deterministic pet simulation
//!
//! Everything that decides what the pet does lives here. This module must
//! stay pure and deterministic:
//! - Fixed timestep only (one call to [`tick`] per timer tick)
//! - Seeded RNG only, passed in by the caller
//! - No windowing or rendering dependencies
//!
//! The shell feeds user input in as [`PetEvent`]s and turns the resulting
//! [`PetState`] into an OS window position plus a [`rig::PetPose`] draw list.

pub mod consts;
pub mod rig;
pub mod state;
pub mod tick;

pub use rig::{base_size, pose, window_size, LimbPose, PetPose};
pub use state::{Appearance, MenuAction, Mode, PetEvent, PetState, ScreenBounds, SpriteSizes};
pub use tick::{apply_event, tick};
