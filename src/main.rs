mod animation;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod movement;
mod trail;

use avian2d::prelude::*;
use bevy::prelude::*;

/// Pixels per world unit; movement tuning is authored in pixels.
const PIXELS_PER_UNIT: f32 = 32.0;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Guardian Android".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default().with_length_unit(PIXELS_PER_UNIT))
    .insert_resource(Gravity(Vec2::NEG_Y * 60.0 * PIXELS_PER_UNIT))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        movement::MovementPlugin,
        animation::AnimationPlugin,
        trail::TrailPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
