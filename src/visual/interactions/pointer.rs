use bevy::prelude::*;

use crate::{
    grid::{FlowContainer, FollowLoop, PointerResponse},
    input::{PointerEvent, PointerEventType},
};

/// A pointer-down the container did not take (nothing visible to follow).
/// Other consumers may pick it up.
#[derive(Message, Debug, Clone)]
pub struct UnhandledPointer(pub PointerEvent);

/// System: Route pointer events into the container's gesture machine.
///
/// The container fills the window from its top-left corner, so window
/// coordinates are container coordinates.
pub fn handle_pointer_input(
    mut pointer_events: MessageReader<PointerEvent>,
    mut container: ResMut<FlowContainer>,
    mut follow: ResMut<FollowLoop>,
    mut unhandled: MessageWriter<UnhandledPointer>,
) {
    for event in pointer_events.read() {
        let was_following = container.is_following();

        let response = match event.event_type {
            PointerEventType::Down => container.pointer_down(event.position),
            PointerEventType::Move => container.pointer_move(event.position),
            PointerEventType::Up | PointerEventType::Cancel => container.pointer_up(),
        };

        match response {
            PointerResponse::Activated => {
                info!(
                    "Following pointer {} with {} cells",
                    event.id,
                    container.snapshot().len()
                );
                follow.start();
            }
            PointerResponse::Unhandled => {
                debug!("No visible cells, passing pointer {} on", event.id);
                unhandled.write(UnhandledPointer(event.clone()));
            }
            PointerResponse::Handled => {
                if was_following && !container.is_following() {
                    info!("Pointer released - cells snapped back");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ChildId, FlowMetrics};
    use std::time::Duration;

    fn app_with(container: FlowContainer) -> App {
        let mut app = App::new();
        app.add_message::<PointerEvent>()
            .add_message::<UnhandledPointer>()
            .insert_resource(container)
            .insert_resource(FollowLoop::new(Duration::from_millis(16)))
            .add_systems(Update, handle_pointer_input);
        app
    }

    fn pointer(event_type: PointerEventType, x: f32, y: f32) -> PointerEvent {
        PointerEvent {
            position: Vec2::new(x, y),
            event_type,
            id: 0,
        }
    }

    #[test]
    fn test_down_starts_following_and_schedules_tick() {
        let mut container = FlowContainer::with_children(FlowMetrics::default(), 3);
        container.layout(710, 1000);
        let mut app = app_with(container);

        app.world_mut()
            .write_message(pointer(PointerEventType::Down, 200.0, 100.0));
        app.update();

        let container = app.world().resource::<FlowContainer>();
        assert!(container.is_following());
        assert_eq!(
            container.child(ChildId(0)).map(|c| c.offset),
            Some(Vec2::new(154.0, 54.0))
        );
        assert_eq!(app.world().resource::<FollowLoop>().pending(), 1);
    }

    #[test]
    fn test_cancel_snaps_back() {
        let mut container = FlowContainer::with_children(FlowMetrics::default(), 2);
        container.layout(710, 1000);
        let mut app = app_with(container);

        app.world_mut()
            .write_message(pointer(PointerEventType::Down, 200.0, 100.0));
        app.update();
        app.world_mut()
            .write_message(pointer(PointerEventType::Cancel, 200.0, 100.0));
        app.update();

        let container = app.world().resource::<FlowContainer>();
        assert!(!container.is_following());
        assert!(container.children().iter().all(|c| c.offset == Vec2::ZERO));
    }

    #[test]
    fn test_down_on_empty_container_does_not_follow() {
        let mut app = app_with(FlowContainer::default());

        app.world_mut()
            .write_message(pointer(PointerEventType::Down, 10.0, 10.0));
        app.update();

        assert!(!app.world().resource::<FlowContainer>().is_following());
        assert_eq!(app.world().resource::<FollowLoop>().pending(), 0);
    }
}
