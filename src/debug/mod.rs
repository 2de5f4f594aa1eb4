//! Dev tools: probe gizmos and a movement state overlay.
//!
//! Features:
//! - Ground and wall probe circles, green on contact
//! - On-screen readout of the controller, animator and clip state
//! - F1 toggles both

use bevy::prelude::*;

use crate::animation::params::{AIRBORNE_LAYER, DASH_POSE_LAYER, GROUNDED_LAYER};
use crate::animation::{AnimationController, AnimatorParams};
use crate::core::GameState;
use crate::movement::{
    DashPhase, MovementController, MovementSystems, Player, SurfaceContacts, SurfaceProbes,
};

/// Resource tracking debug overlay visibility
#[derive(Resource, Debug)]
pub struct DebugState {
    pub show_probes: bool,
    pub show_info: bool,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            show_probes: true,
            show_info: true,
        }
    }
}

/// Marker for the movement info text
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Startup, spawn_debug_overlay)
            .add_systems(Update, toggle_debug)
            .add_systems(
                Update,
                (
                    draw_probe_gizmos.run_if(|state: Res<DebugState>| state.show_probes),
                    update_debug_info_overlay,
                )
                    .after(MovementSystems)
                    .run_if(in_state(GameState::Run)),
            );
    }
}

fn toggle_debug(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F1) {
        state.show_probes = !state.show_probes;
        state.show_info = !state.show_info;
        info!("Debug overlay: {}", state.show_info);
    }
}

fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

fn draw_probe_gizmos(
    mut gizmos: Gizmos,
    query: Query<(&Transform, &SurfaceProbes, &SurfaceContacts, &MovementController), With<Player>>,
) {
    for (transform, probes, contacts, controller) in &query {
        let origin = transform.translation.truncate();

        gizmos.circle_2d(
            probes.ground_point(origin),
            probes.ground_radius,
            contact_color(contacts.grounded),
        );
        gizmos.circle_2d(
            probes.wall_point(origin, controller.state().facing),
            probes.wall_radius,
            contact_color(contacts.walled),
        );
    }
}

fn contact_color(hit: bool) -> Color {
    if hit {
        Color::srgb(0.2, 0.9, 0.3)
    } else {
        Color::srgb(0.9, 0.3, 0.2)
    }
}

fn update_debug_info_overlay(
    debug_state: Res<DebugState>,
    player: Query<
        (
            &MovementController,
            &SurfaceContacts,
            &AnimatorParams,
            &AnimationController,
        ),
        With<Player>,
    >,
    mut overlay: Query<&mut Text, With<DebugInfoOverlay>>,
) {
    for mut text in &mut overlay {
        if !debug_state.show_info {
            text.0.clear();
            continue;
        }

        let Some((controller, contacts, params, animation)) = player.iter().next() else {
            text.0 = "no player".to_string();
            continue;
        };

        let state = controller.state();
        let dash = match state.dash.phase() {
            DashPhase::Ready => "ready".to_string(),
            DashPhase::Dashing => format!("dashing {:.2}s", state.dash.remaining().as_secs_f32()),
            DashPhase::Cooldown => {
                format!("cooldown {:.2}s", state.dash.remaining().as_secs_f32())
            }
        };

        text.0 = format!(
            "axis {:+.1} facing {:?}\n\
             grounded {} walled {} wall_sliding {}\n\
             jumps {} jumping {}\n\
             dash {}\n\
             layers g={:.0} a={:.0} d={:.0}\n\
             clip {}",
            state.axis,
            state.facing,
            contacts.grounded,
            contacts.walled,
            state.wall_sliding,
            state.jumps_used,
            state.jumping,
            dash,
            params.layer_weight(GROUNDED_LAYER),
            params.layer_weight(AIRBORNE_LAYER),
            params.layer_weight(DASH_POSE_LAYER),
            animation.current_sprite_key(),
        );
    }
}
