use bevy::prelude::*;

use crate::{
    camera::Viewport,
    grid::{FlowChild, FlowContainer},
    visual::setup::FlowCell,
};

/// Depth between two consecutive draw positions
const DEPTH_STEP: f32 = 0.1;

/// System: Place every cell quad from its layout rect, visual offset and draw order
pub fn sync_cell_transforms(
    container: Res<FlowContainer>,
    viewport: Res<Viewport>,
    mut cells: Query<(&FlowCell, &mut Transform, &mut Visibility)>,
) {
    for (cell, mut transform, mut visibility) in &mut cells {
        let Some(child) = container.child(cell.child) else {
            continue;
        };

        if !child.layout.visible {
            *visibility = Visibility::Hidden;
            continue;
        }

        *visibility = Visibility::Inherited;
        let order = container.drawing_order(cell.child.index());
        *transform = cell_transform(child, order, &viewport);
    }
}

/// World transform of one cell quad drawn at position `order`.
///
/// Later draw positions sit nearer to the camera.
pub fn cell_transform(child: &FlowChild, order: usize, viewport: &Viewport) -> Transform {
    let rect = child.layout.rect;
    let width = child.layout.size.width.max(0) as f32;
    let height = child.layout.size.height.max(0) as f32;

    let center = Vec2::new(
        rect.left as f32 + width * 0.5,
        rect.top as f32 + height * 0.5,
    ) + child.offset;
    let world = viewport.window_to_world(center);
    let depth = order as f32 * DEPTH_STEP;

    Transform::from_xyz(world.x, world.y, depth).with_scale(Vec3::new(width, height, 1.0))
}
