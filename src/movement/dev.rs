//! Movement domain: test room for playing with the controller.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground, Wall};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Ground,
    Wall,
}

/// (kind, center, size) of every block in the room.
/// The floor has a gap in the middle so the respawn path gets exercised.
const ROOM_LAYOUT: &[(BlockKind, Vec2, Vec2)] = &[
    // Floor halves
    (BlockKind::Ground, Vec2::new(-260.0, -200.0), Vec2::new(360.0, 40.0)),
    (BlockKind::Ground, Vec2::new(260.0, -200.0), Vec2::new(360.0, 40.0)),
    // Outer walls, tall enough to slide down
    (BlockKind::Wall, Vec2::new(-460.0, 80.0), Vec2::new(40.0, 600.0)),
    (BlockKind::Wall, Vec2::new(460.0, 80.0), Vec2::new(40.0, 600.0)),
    // Platforms reachable with a double jump
    (BlockKind::Ground, Vec2::new(-250.0, -40.0), Vec2::new(150.0, 20.0)),
    (BlockKind::Ground, Vec2::new(250.0, 60.0), Vec2::new(150.0, 20.0)),
    (BlockKind::Ground, Vec2::new(0.0, 180.0), Vec2::new(120.0, 20.0)),
    // Pillar next to the gap
    (BlockKind::Wall, Vec2::new(120.0, -60.0), Vec2::new(30.0, 240.0)),
];

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    for &(kind, center, size) in ROOM_LAYOUT {
        let body = (
            Sprite {
                color: block_color(kind),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        );

        match kind {
            BlockKind::Ground => {
                commands.spawn((Ground, body, ground_layers));
            }
            BlockKind::Wall => {
                commands.spawn((Wall, body, wall_layers));
            }
        }
    }

    debug!("Spawned test room with {} blocks", ROOM_LAYOUT.len());
}

fn block_color(kind: BlockKind) -> Color {
    match kind {
        BlockKind::Ground => Color::srgb(0.4, 0.5, 0.4),
        BlockKind::Wall => Color::srgb(0.3, 0.3, 0.4),
    }
}
