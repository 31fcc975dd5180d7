//! Right-click appearance menu, drawn as an overlay inside the pet's
//! own window. The window grows while the menu is open because the pet
//! is usually smaller than the menu.

use bevy::prelude::*;

use crate::pet::Pet;
use crate::sim::state::{
    ARM_STRETCH_THICK, ARM_STRETCH_THIN, ARM_TINT_CRIMSON, SCALE_LARGE, SCALE_NORMAL, SCALE_SMALL,
};
use crate::sim::{self, Appearance, MenuAction, PetEvent, PetState, SpriteSizes};

/// The window grows to at least this while the menu is open; the extra
/// space opens upward above the pet.
pub const MENU_WINDOW_MIN: Vec2 = Vec2::new(176.0, 230.0);

const PANEL_BG: Color = Color::srgba(0.07, 0.07, 0.09, 0.92);
const BUTTON_BG: Color = Color::srgba(0.18, 0.18, 0.22, 0.90);
const BUTTON_BG_HOVER: Color = Color::srgba(0.33, 0.33, 0.40, 0.95);
const BUTTON_TEXT: Color = Color::srgb(0.92, 0.92, 0.92);

const ITEMS: [(&str, MenuAction); 6] = [
    ("Small", MenuAction::SetScale { scale: SCALE_SMALL }),
    ("Normal size", MenuAction::SetScale { scale: SCALE_NORMAL }),
    ("Large", MenuAction::SetScale { scale: SCALE_LARGE }),
    ("Thin arms", MenuAction::SetArmStretch { factor: ARM_STRETCH_THIN }),
    ("Thick arms", MenuAction::SetArmStretch { factor: ARM_STRETCH_THICK }),
    ("Crimson arms", MenuAction::SetArmTint { color: ARM_TINT_CRIMSON }),
];

#[derive(Resource, Default)]
pub struct MenuState {
    pub open: bool,
}

#[derive(Component)]
pub struct MenuRoot;

#[derive(Component)]
pub struct MenuItem(pub MenuAction);

pub fn toggle_menu(
    buttons: Res<ButtonInput<MouseButton>>,
    mut menu: ResMut<MenuState>,
    mut commands: Commands,
    roots: Query<Entity, With<MenuRoot>>,
) {
    if !buttons.just_pressed(MouseButton::Right) {
        return;
    }
    if menu.open {
        close_menu(&mut commands, &roots, &mut menu);
    } else {
        spawn_menu(&mut commands);
        menu.open = true;
    }
}

/// Apply the picked action and close. Hover feedback rides on the same
/// interaction query.
pub fn handle_menu_clicks(
    mut interactions: Query<(&Interaction, &MenuItem, &mut BackgroundColor), Changed<Interaction>>,
    sizes: Res<SpriteSizes>,
    mut menu: ResMut<MenuState>,
    mut commands: Commands,
    roots: Query<Entity, With<MenuRoot>>,
    mut pets: Query<(&mut PetState, &mut Appearance), With<Pet>>,
) {
    let Ok((mut pet, mut looks)) = pets.get_single_mut() else {
        return;
    };
    let mut picked = None;
    for (interaction, item, mut bg) in &mut interactions {
        match *interaction {
            Interaction::Pressed => picked = Some(item.0),
            Interaction::Hovered => *bg = BUTTON_BG_HOVER.into(),
            Interaction::None => *bg = BUTTON_BG.into(),
        }
    }
    if let Some(action) = picked {
        sim::apply_event(&mut pet, &mut looks, &sizes, PetEvent::Menu(action));
        close_menu(&mut commands, &roots, &mut menu);
    }
}

fn close_menu(
    commands: &mut Commands,
    roots: &Query<Entity, With<MenuRoot>>,
    menu: &mut MenuState,
) {
    for entity in roots.iter() {
        commands.entity(entity).despawn_recursive();
    }
    menu.open = false;
}

fn spawn_menu(commands: &mut Commands) {
    commands
        .spawn((
            MenuRoot,
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    left: Val::Px(6.0),
                    top: Val::Px(6.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(3.0),
                    padding: UiRect::all(Val::Px(5.0)),
                    ..default()
                },
                background_color: PANEL_BG.into(),
                ..default()
            },
        ))
        .with_children(|panel| {
            for (label, action) in ITEMS {
                panel
                    .spawn((
                        MenuItem(action),
                        ButtonBundle {
                            style: Style {
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                                justify_content: JustifyContent::Center,
                                ..default()
                            },
                            background_color: BUTTON_BG.into(),
                            ..default()
                        },
                    ))
                    .with_children(|button| {
                        button.spawn(TextBundle::from_section(
                            label,
                            TextStyle {
                                font_size: 14.0,
                                color: BUTTON_TEXT,
                                ..default()
                            },
                        ));
                    });
            }
        });
}
