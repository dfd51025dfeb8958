use crate::camera::Viewport;
use crate::config::setup_flow_config;
use crate::grid::{FlowContainer, FollowLoop};
use crate::visual::interactions::{UnhandledPointer, handle_pointer_input, toggle_last_cell};
use crate::visual::setup::setup_container;
use crate::visual::sync::sync_cell_transforms;
use bevy::prelude::*;

pub struct FlowPlugin;

impl Plugin for FlowPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<UnhandledPointer>()
            // Load config first, then build the container and its cells
            .add_systems(Startup, (setup_flow_config, setup_container).chain())
            .add_systems(
                Update,
                (
                    // Host layout cycle
                    relayout,
                    // Ticks run before pointer input so a tick scheduled this
                    // frame waits for the next frame's delta
                    run_follow_ticks,
                    handle_pointer_input,
                    toggle_last_cell,
                    // Presentation
                    sync_cell_transforms,
                )
                    .chain(),
            );
    }
}

/// Run measure + arrange when the window size changed or a child changed visibility.
///
/// Laid-out positions stay fixed while a gesture is running, so the pass
/// waits until the pointer is released.
fn relayout(viewport: Res<Viewport>, mut container: ResMut<FlowContainer>) {
    if viewport.is_changed() {
        container.request_layout();
    }
    if container.is_following() || !container.take_layout_request() {
        return;
    }

    let (width, height) = viewport.pixel_size();
    container.layout(width, height);

    let measured = container.measured_size();
    let side = container
        .children()
        .iter()
        .find(|c| c.layout.visible)
        .map(|c| c.layout.size.width)
        .unwrap_or(0);
    info!(
        "Layout pass: {}x{}, {} visible cells, side {}",
        measured.width,
        measured.height,
        container.visible_count(),
        side
    );
}

/// Fire the follow ticks that became due this frame
fn run_follow_ticks(
    time: Res<Time>,
    mut follow: ResMut<FollowLoop>,
    mut container: ResMut<FlowContainer>,
) {
    let moved = follow.advance(time.delta(), &mut container);
    if moved > 0 {
        trace!("{} follow tick(s), {} pending", moved, follow.pending());
    }
}
