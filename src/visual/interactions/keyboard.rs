use bevy::prelude::*;

use crate::grid::{ChildId, FlowContainer};

/// System: Space toggles the last cell between visible and gone
pub fn toggle_last_cell(keys: Res<ButtonInput<KeyCode>>, mut container: ResMut<FlowContainer>) {
    if !keys.just_pressed(KeyCode::Space) {
        return;
    }

    let Some(last) = container.len().checked_sub(1).map(ChildId) else {
        return;
    };
    let visible = container.child(last).is_some_and(|c| c.layout.visible);

    if container.set_visible(last, !visible) {
        info!(
            "Cell {} is now {}",
            last,
            if visible { "gone" } else { "visible" }
        );
    }
}
