//! Mouse and keyboard input, translated into pet events.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::menu::MenuState;
use crate::pet::Pet;
use crate::sim::{self, Appearance, PetEvent, PetState, SpriteSizes};

/// Window-local cursor position at grab time. The grabbed point stays
/// under the cursor for the whole drag.
#[derive(Resource, Default)]
pub struct DragGrab(pub Option<Vec2>);

/// Left-button drag. The window is frameless, so anywhere on it counts
/// as grabbing the pet.
pub fn mouse_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    menu: Res<MenuState>,
    sizes: Res<SpriteSizes>,
    mut grab: ResMut<DragGrab>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pets: Query<(&mut PetState, &mut Appearance), With<Pet>>,
) {
    let Ok(win) = windows.get_single() else {
        return;
    };
    let Ok((mut pet, mut looks)) = pets.get_single_mut() else {
        return;
    };

    // Clicks belong to the menu while it is open. Dropping a drag that
    // was in flight lets the pet fall instead of hanging in the air.
    if menu.open {
        if grab.0.take().is_some() {
            sim::apply_event(&mut pet, &mut looks, &sizes, PetEvent::DragEnd);
        }
        return;
    }

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(cursor) = win.cursor_position() {
            grab.0 = Some(cursor);
            sim::apply_event(&mut pet, &mut looks, &sizes, PetEvent::DragStart);
        }
    }

    if buttons.pressed(MouseButton::Left) {
        if let (Some(grabbed), Some(cursor)) = (grab.0, win.cursor_position()) {
            if cursor != grabbed {
                let pos = pet.pos + (cursor - grabbed);
                sim::apply_event(&mut pet, &mut looks, &sizes, PetEvent::DragMove { pos });
            }
        }
    }

    if buttons.just_released(MouseButton::Left) && grab.0.take().is_some() {
        sim::apply_event(&mut pet, &mut looks, &sizes, PetEvent::DragEnd);
    }
}

/// W asks for a wave; the request is ignored unless the pet is idling
/// on the ground.
pub fn keyboard_gestures(
    keys: Res<ButtonInput<KeyCode>>,
    sizes: Res<SpriteSizes>,
    mut pets: Query<(&mut PetState, &mut Appearance), With<Pet>>,
) {
    if !keys.just_pressed(KeyCode::KeyW) {
        return;
    }
    let Ok((mut pet, mut looks)) = pets.get_single_mut() else {
        return;
    };
    sim::apply_event(&mut pet, &mut looks, &sizes, PetEvent::Wave);
}
