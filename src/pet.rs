//! Bevy shell around the simulation: asset loading, the sprite rig,
//! and keeping the OS window glued to the pet.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::window::{PrimaryWindow, WindowPosition};
use bevy::winit::WinitWindows;
use rand_chacha::ChaCha8Rng;

use crate::menu::{MenuState, MENU_WINDOW_MIN};
use crate::sim::consts::*;
use crate::sim::{self, Appearance, PetState, ScreenBounds, SpriteSizes};

/// Marker for the rig root entity. The root carries [`PetState`] and
/// [`Appearance`]; the five sprites are its children.
#[derive(Component)]
pub struct Pet;

/// Which rig piece a child sprite is.
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum Limb {
    Body,
    Head,
    ArmL,
    ArmR,
    LegL,
    LegR,
}

#[derive(Resource, Default)]
pub struct PetSprites {
    pub body: Handle<Image>,
    pub head: Handle<Image>,
    pub arm: Handle<Image>,
    pub leg: Handle<Image>,
    pub ready: bool,
}

/// Seeded simulation RNG; every random draw goes through here.
#[derive(Resource)]
pub struct PetRng(pub ChaCha8Rng);

/// Camera so sprites can be drawn
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());
}

pub fn load_sprites(asset_server: Res<AssetServer>, mut sprites: ResMut<PetSprites>) {
    sprites.body = asset_server.load("body.png");
    sprites.head = asset_server.load("head.png");
    sprites.arm = asset_server.load("arm.png");
    sprites.leg = asset_server.load("leg.png");
}

/// Spawn the rig: a root that tracks the window, with one child sprite
/// per piece. Transforms are placeholders until the first pose sync.
pub fn spawn_pet(mut commands: Commands, sprites: Res<PetSprites>) {
    commands
        .spawn((
            Pet,
            PetState::new(Vec2::new(START_MARGIN, START_MARGIN)),
            Appearance::default(),
            SpatialBundle::default(),
        ))
        .with_children(|parent| {
            parent.spawn((Limb::LegL, piece(sprites.leg.clone(), Anchor::TopCenter)));
            parent.spawn((Limb::LegR, piece(sprites.leg.clone(), Anchor::TopCenter)));
            parent.spawn((Limb::Body, piece(sprites.body.clone(), Anchor::TopLeft)));
            parent.spawn((Limb::Head, piece(sprites.head.clone(), Anchor::TopLeft)));
            parent.spawn((Limb::ArmL, piece(sprites.arm.clone(), Anchor::TopCenter)));
            parent.spawn((Limb::ArmR, piece(sprites.arm.clone(), Anchor::TopCenter)));
        });
}

fn piece(texture: Handle<Image>, anchor: Anchor) -> SpriteBundle {
    SpriteBundle {
        texture,
        sprite: Sprite {
            anchor,
            ..default()
        },
        ..default()
    }
}

/// Once the images are in, measure them, size the window, and drop the
/// pet in near the top-left screen corner. If any image failed to load,
/// fall back to the built-in sizes and draw flat placeholder rectangles
/// so the pet still works.
pub fn finalize_after_load(
    mut sprites: ResMut<PetSprites>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut sizes: ResMut<SpriteSizes>,
    bounds: Res<ScreenBounds>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut pets: Query<(&mut PetState, &Appearance), With<Pet>>,
    mut limbs: Query<(&Limb, &mut Sprite, &mut Handle<Image>)>,
) {
    if sprites.ready {
        return;
    }

    let mut failed = false;
    let mut loading = false;
    for handle in [&sprites.body, &sprites.head, &sprites.arm, &sprites.leg] {
        match asset_server.load_state(handle) {
            LoadState::Failed(_) => failed = true,
            LoadState::Loaded => {}
            _ => loading = true,
        }
    }
    if loading && !failed {
        return;
    }

    if failed {
        warn!("pet sprites missing or broken; using placeholder rectangles");
        *sizes = SpriteSizes::default();
        for (limb, mut sprite, mut texture) in &mut limbs {
            // the built-in 1x1 white image, stretched and tinted
            *texture = Handle::default();
            sprite.custom_size = Some(match limb {
                Limb::Body => sizes.body,
                Limb::Head => sizes.head,
                Limb::ArmL | Limb::ArmR => sizes.arm,
                Limb::LegL | Limb::LegR => sizes.leg,
            });
        }
    } else {
        let measured = (
            images.get(&sprites.body),
            images.get(&sprites.head),
            images.get(&sprites.arm),
            images.get(&sprites.leg),
        );
        let (Some(body), Some(head), Some(arm), Some(leg)) = measured else {
            return;
        };
        *sizes = SpriteSizes {
            body: body.size_f32(),
            head: head.size_f32(),
            arm: arm.size_f32(),
            leg: leg.size_f32(),
        };
    }

    let Ok(mut win) = windows.get_single_mut() else {
        return;
    };
    let Ok((mut pet, looks)) = pets.get_single_mut() else {
        return;
    };

    let size = sim::window_size(looks, &sizes);
    win.resolution.set(size.x, size.y);
    pet.pos = Vec2::new(bounds.left + START_MARGIN, bounds.top + START_MARGIN);
    win.position = WindowPosition::At(pet.pos.round().as_ivec2());

    sprites.ready = true;
    info!("pet ready ({}x{} window)", size.x.round(), size.y.round());
}

/// Read the real monitor size each frame; keeps the floor line right
/// when the window migrates to another monitor.
pub fn refresh_screen_bounds(
    winit_windows: NonSend<WinitWindows>,
    windows: Query<Entity, With<PrimaryWindow>>,
    mut bounds: ResMut<ScreenBounds>,
) {
    let Ok(entity) = windows.get_single() else {
        return;
    };
    let Some(raw_win) = winit_windows.get_window(entity) else {
        return;
    };
    let Some(mon) = raw_win.current_monitor() else {
        return;
    };
    let ms = mon.size();
    *bounds = ScreenBounds {
        left: 0.0,
        top: 0.0,
        right: ms.width as f32,
        bottom: ms.height as f32,
    };
}

/// One simulation step per fixed tick.
pub fn advance_sim(
    sprites: Res<PetSprites>,
    sizes: Res<SpriteSizes>,
    bounds: Res<ScreenBounds>,
    mut rng: ResMut<PetRng>,
    mut pets: Query<(&mut PetState, &Appearance), With<Pet>>,
) {
    if !sprites.ready {
        return;
    }
    let Ok((mut pet, looks)) = pets.get_single_mut() else {
        return;
    };
    let win = sim::window_size(looks, &sizes);
    sim::tick(&mut pet, win, &bounds, &mut rng.0);
}

/// Move and size the OS window to match the pet, and park the rig root
/// at the window's top-left in world units.
///
/// While the menu is open the window is temporarily enlarged to fit it;
/// the extra space opens upward so the feet stay planted.
pub fn sync_window(
    sprites: Res<PetSprites>,
    sizes: Res<SpriteSizes>,
    menu: Res<MenuState>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut roots: Query<(&PetState, &Appearance, &mut Transform), With<Pet>>,
) {
    if !sprites.ready {
        return;
    }
    let Ok(mut win) = windows.get_single_mut() else {
        return;
    };
    let Ok((pet, looks, mut tf)) = roots.get_single_mut() else {
        return;
    };

    let normal = sim::window_size(looks, &sizes);
    let actual = if menu.open {
        normal.max(MENU_WINDOW_MIN)
    } else {
        normal
    };
    win.resolution.set(actual.x, actual.y);
    let top_left = Vec2::new(pet.pos.x, pet.pos.y + normal.y - actual.y);
    win.position = WindowPosition::At(top_left.round().as_ivec2());

    // World origin is the window center; the canvas hugs the bottom.
    tf.translation = Vec3::new(-actual.x / 2.0, normal.y - actual.y / 2.0, 0.0);
    tf.scale = Vec3::new(looks.scale, looks.scale, 1.0);
}

/// Copy the current pose onto the child sprites.
pub fn sync_pose(
    sizes: Res<SpriteSizes>,
    roots: Query<(&PetState, &Appearance), With<Pet>>,
    mut limbs: Query<(&Limb, &mut Transform, &mut Sprite), Without<Pet>>,
) {
    let Ok((pet, looks)) = roots.get_single() else {
        return;
    };
    let pose = sim::pose(pet, looks, &sizes);
    for (limb, mut tf, mut sprite) in &mut limbs {
        match limb {
            Limb::Body => {
                tf.translation = canvas(pose.body, Z_BODY);
                sprite.color = looks.arm_tint;
            }
            Limb::Head => tf.translation = canvas(pose.head, Z_HEAD),
            Limb::ArmL => place_limb(&mut tf, &mut sprite, &pose.arm_l, looks.arm_tint),
            Limb::ArmR => place_limb(&mut tf, &mut sprite, &pose.arm_r, looks.arm_tint),
            Limb::LegL => place_limb(&mut tf, &mut sprite, &pose.leg_l, looks.leg_tint),
            Limb::LegR => place_limb(&mut tf, &mut sprite, &pose.leg_r, looks.leg_tint),
        }
    }
}

/// Canvas coordinates are y-down from the window top-left; child
/// transforms are y-up relative to the root parked at that corner.
fn canvas(p: Vec2, z: f32) -> Vec3 {
    Vec3::new(p.x, -p.y, z)
}

fn place_limb(tf: &mut Transform, sprite: &mut Sprite, limb: &sim::LimbPose, tint: Color) {
    tf.translation = canvas(limb.joint, limb.z);
    // Positive pose angles swing clockwise on screen, which is negative
    // around +Z in a y-up world.
    tf.rotation = Quat::from_rotation_z(-limb.angle_deg.to_radians());
    tf.scale = Vec3::new(
        if limb.flip { -limb.scale.x } else { limb.scale.x },
        limb.scale.y,
        1.0,
    );
    sprite.color = tint;
}
