use bevy::prelude::*;
use bevy::window::{WindowLevel, WindowMode, WindowPosition, WindowResolution};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod driver;
mod input;
mod menu;
mod pet;
mod sim;

use sim::consts::TICK_SECS;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RunMode {
    Normal,
    Demo,
}

fn main() {
    // Mode selection
    let args: Vec<String> = std::env::args().collect();
    let run_mode = if args.iter().any(|a| a == "--demo") {
        RunMode::Demo
    } else {
        RunMode::Normal
    };
    let seed = args
        .windows(2)
        .find(|pair| pair[0] == "--seed")
        .and_then(|pair| pair[1].parse::<u64>().ok());
    let rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "deskmate".into(),
            name: Some("deskmate".into()),
            resolution: WindowResolution::new(150., 200.), // overwritten after image load
            resizable: false,
            decorations: false,
            transparent: true,
            window_level: WindowLevel::AlwaysOnTop,
            position: WindowPosition::At(IVec2::new(40, 40)),
            mode: WindowMode::Windowed,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgba(0.0, 0.0, 0.0, 0.0)))
    .insert_resource(Time::<Fixed>::from_seconds(TICK_SECS))
    .insert_resource(pet::PetSprites::default())
    .insert_resource(pet::PetRng(rng))
    .insert_resource(sim::ScreenBounds::default())
    .insert_resource(sim::SpriteSizes::default())
    .insert_resource(input::DragGrab::default())
    .insert_resource(menu::MenuState::default())
    .add_systems(
        Startup,
        (pet::setup_camera, pet::load_sprites, pet::spawn_pet).chain(),
    )
    .add_systems(FixedUpdate, pet::advance_sim)
    .add_systems(
        Update,
        (
            pet::refresh_screen_bounds,
            pet::finalize_after_load,
            input::mouse_drag,
            input::keyboard_gestures,
            menu::toggle_menu,
            menu::handle_menu_clicks,
            pet::sync_window,
            pet::sync_pose,
        )
            .chain(),
    );

    match run_mode {
        RunMode::Demo => {
            app.insert_resource(driver::DemoSeq::default())
                .add_systems(FixedUpdate, driver::demo_driver.before(pet::advance_sim));
            info!("Running in DEMO mode (scripted behavior tour).");
        }
        RunMode::Normal => {
            info!("Running in NORMAL mode (pass --demo for a scripted behavior tour).");
        }
    }
    if let Some(s) = seed {
        info!("Simulation RNG seeded with {s}.");
    }

    app.run();
}
