//! Movement domain: ground and wall probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    GameLayer, MovementController, Player, SurfaceContacts, SurfaceProbes,
};

pub(crate) fn probe_surfaces(
    spatial_query: SpatialQuery,
    mut query: Query<
        (
            &Transform,
            &SurfaceProbes,
            &MovementController,
            &mut SurfaceContacts,
        ),
        With<Player>,
    >,
) {
    // Only ground/wall colliders count, never the player or triggers
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let wall_filter = SpatialQueryFilter::from_mask(GameLayer::Wall);

    for (transform, probes, controller, mut contacts) in &mut query {
        let origin = transform.translation.truncate();

        let grounded = overlaps_circle(
            &spatial_query,
            probes.ground_point(origin),
            probes.ground_radius,
            &ground_filter,
        );
        let walled = overlaps_circle(
            &spatial_query,
            probes.wall_point(origin, controller.state().facing),
            probes.wall_radius,
            &wall_filter,
        );

        if grounded != contacts.grounded {
            debug!("Ground contact: {}", grounded);
        }
        if walled != contacts.walled {
            debug!("Wall contact: {}", walled);
        }

        contacts.grounded = grounded;
        contacts.walled = walled;
    }
}

fn overlaps_circle(
    spatial_query: &SpatialQuery,
    point: Vec2,
    radius: f32,
    filter: &SpatialQueryFilter,
) -> bool {
    !spatial_query
        .shape_intersections(&Collider::circle(radius), point, 0.0, filter)
        .is_empty()
}
