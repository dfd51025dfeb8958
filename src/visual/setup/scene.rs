use bevy::prelude::*;
use rand::Rng;

use crate::{
    config::FlowConfig,
    grid::{ChildId, FlowContainer, FollowLoop},
};

/// Cell colour: random hue, fixed saturation and lightness
const CELL_SATURATION: f32 = 0.65;
const CELL_LIGHTNESS: f32 = 0.55;

/// Rendered entity of one container child
#[derive(Component, Debug, Clone, Copy)]
pub struct FlowCell {
    pub child: ChildId,
}

/// Build the container model and spawn one quad per child
pub fn setup_container(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<FlowConfig>,
) {
    let mut container = FlowContainer::new(config.metrics());

    // unit quad, scaled to the measured cell size every frame
    let quad = meshes.add(Rectangle::new(1.0, 1.0));
    let mut rng = rand::rng();

    for index in 0..config.child_count {
        let gone = config.is_gone(index);
        let child = container.add_child(!gone);

        let hue = rng.random_range(0.0..360.0);
        let material = materials.add(StandardMaterial {
            base_color: Color::hsl(hue, CELL_SATURATION, CELL_LIGHTNESS),
            unlit: true,
            ..default()
        });

        commands.spawn((
            FlowCell { child },
            Mesh3d(quad.clone()),
            MeshMaterial3d(material),
            Transform::default(),
            if gone {
                Visibility::Hidden
            } else {
                Visibility::Inherited
            },
        ));
    }

    info!(
        "Flow container created: {} cells ({} visible)",
        container.len(),
        container.visible_count()
    );

    commands.insert_resource(container);
    commands.insert_resource(FollowLoop::new(config.follow_interval()));
}
