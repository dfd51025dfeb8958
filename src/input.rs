use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

/// Pointer id reported for the mouse; touch contacts keep their own ids
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .init_resource::<PrimaryContact>()
            .add_message::<PointerEvent>()
            .add_systems(Update, (track_cursor_pos, collect_pointer_events).chain());
    }
}

#[derive(Message, Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Window (logical) coordinates: pixels from top-left, y down
    pub position: Vec2,
    pub event_type: PointerEventType,
    /// MOUSE_POINTER_ID for the mouse, touch id otherwise
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
    /// The host took the contact away; handled like Up
    Cancel,
}

/// The one contact that drives the gesture.
///
/// Only single-contact gestures are modelled: while a contact is down, every
/// event from any other contact is dropped.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryContact(pub Option<u64>);

impl PrimaryContact {
    /// Returns true if the event belongs to the primary contact.
    ///
    /// An Up or Cancel with no active contact is dropped here, so it never
    /// reaches the gesture machine.
    pub fn admit(&mut self, event: &PointerEvent) -> bool {
        match (event.event_type, self.0) {
            (PointerEventType::Down, None) => {
                self.0 = Some(event.id);
                true
            }
            (PointerEventType::Down, Some(_)) => false,
            (PointerEventType::Move, active) => active == Some(event.id),
            (PointerEventType::Up | PointerEventType::Cancel, active) => {
                if active == Some(event.id) {
                    self.0 = None;
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[derive(Resource, Default, Debug, Clone, Copy)]
struct CursorPos(pub Option<Vec2>);

fn track_cursor_pos(mut ev_cursor: MessageReader<CursorMoved>, mut pos: ResMut<CursorPos>) {
    for e in ev_cursor.read() {
        // last event wins
        pos.0 = Some(e.position);
    }
}

fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorPos>,
    mut touch_events: MessageReader<TouchInput>,
    mut primary: ResMut<PrimaryContact>,
    mut out: MessageWriter<PointerEvent>,
) {
    let mut raw = Vec::new();

    if let Some(p) = cursor.0 {
        if mouse_buttons.just_pressed(MouseButton::Left) {
            raw.push(PointerEvent {
                position: p,
                event_type: PointerEventType::Down,
                id: MOUSE_POINTER_ID,
            });
        }
        if mouse_buttons.pressed(MouseButton::Left) {
            raw.push(PointerEvent {
                position: p,
                event_type: PointerEventType::Move,
                id: MOUSE_POINTER_ID,
            });
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            raw.push(PointerEvent {
                position: p,
                event_type: PointerEventType::Up,
                id: MOUSE_POINTER_ID,
            });
        }
    }

    for ev in touch_events.read() {
        let event_type = match ev.phase {
            TouchPhase::Started => PointerEventType::Down,
            TouchPhase::Moved => PointerEventType::Move,
            TouchPhase::Ended => PointerEventType::Up,
            TouchPhase::Canceled => PointerEventType::Cancel,
        };
        raw.push(PointerEvent {
            position: ev.position,
            event_type,
            id: ev.id,
        });
    }

    for event in raw {
        if primary.admit(&event) {
            out.write(event);
        } else {
            debug!("Ignoring secondary contact {}: {:?}", event.id, event.event_type);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: PointerEventType, id: u64) -> PointerEvent {
        PointerEvent {
            position: Vec2::ZERO,
            event_type,
            id,
        }
    }

    #[test]
    fn test_single_contact_passes_through() {
        let mut primary = PrimaryContact::default();

        assert!(primary.admit(&event(PointerEventType::Down, 3)));
        assert_eq!(primary.0, Some(3));
        assert!(primary.admit(&event(PointerEventType::Move, 3)));
        assert!(primary.admit(&event(PointerEventType::Up, 3)));
        assert_eq!(primary.0, None);
    }

    #[test]
    fn test_secondary_contact_is_ignored() {
        let mut primary = PrimaryContact::default();

        assert!(primary.admit(&event(PointerEventType::Down, 1)));
        assert!(!primary.admit(&event(PointerEventType::Down, 2)));
        assert!(!primary.admit(&event(PointerEventType::Move, 2)));
        assert!(!primary.admit(&event(PointerEventType::Up, 2)));

        // the first contact still owns the gesture
        assert_eq!(primary.0, Some(1));
        assert!(primary.admit(&event(PointerEventType::Move, 1)));
    }

    #[test]
    fn test_cancel_releases_contact() {
        let mut primary = PrimaryContact::default();

        primary.admit(&event(PointerEventType::Down, MOUSE_POINTER_ID));
        assert!(primary.admit(&event(PointerEventType::Cancel, MOUSE_POINTER_ID)));
        assert!(primary.admit(&event(PointerEventType::Down, 7)));
        assert_eq!(primary.0, Some(7));
    }

    #[test]
    fn test_events_without_contact_are_dropped() {
        let mut primary = PrimaryContact::default();

        assert!(!primary.admit(&event(PointerEventType::Move, 0)));
        assert!(!primary.admit(&event(PointerEventType::Up, 0)));
    }
}
