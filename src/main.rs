use bevy::prelude::*;

mod camera;
mod config;
mod grid;
mod input;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use input::InputPlugin;
use visual::FlowPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Finger Follow".into(),
            resolution: WindowResolution::new(720, 1280),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.1)))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(FlowPlugin);

    app.run();
}
