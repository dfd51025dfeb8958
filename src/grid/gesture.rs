use bevy::math::Vec2;

use super::container::{ChildId, FlowChild};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Following,
}

/// Answer given back to the host for every pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerResponse {
    /// Nothing to follow; the host may route the event elsewhere
    Unhandled,
    Handled,
    /// Handled, and following just started: the first tick must be scheduled
    Activated,
}

/// Turns down/move/up into the following state and owns the gesture snapshot
#[derive(Debug, Clone, Default)]
pub struct GestureMachine {
    state: GestureState,
    /// Visible children at pointer-down, in index order
    snapshot: Vec<ChildId>,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_following(&self) -> bool {
        self.state == GestureState::Following
    }

    pub fn snapshot(&self) -> &[ChildId] {
        &self.snapshot
    }

    pub fn pointer_down(&mut self, children: &mut [FlowChild], at: Vec2) -> PointerResponse {
        self.snapshot.clear();
        self.snapshot.extend(
            children
                .iter()
                .enumerate()
                .filter(|(_, child)| child.layout.visible)
                .map(|(i, _)| ChildId(i)),
        );

        if self.snapshot.is_empty() {
            self.state = GestureState::Idle;
            return PointerResponse::Unhandled;
        }
        log::trace!("gesture snapshot: {:?}", self.snapshot);

        self.state = GestureState::Following;
        self.center_first(children, at);
        PointerResponse::Activated
    }

    pub fn pointer_move(&mut self, children: &mut [FlowChild], at: Vec2) -> PointerResponse {
        if self.is_following() {
            self.center_first(children, at);
        }
        PointerResponse::Handled
    }

    pub fn pointer_up(&mut self, children: &mut [FlowChild]) -> PointerResponse {
        if self.is_following() {
            for id in &self.snapshot {
                if let Some(child) = children.get_mut(id.index()) {
                    child.offset = Vec2::ZERO;
                }
            }
        }
        self.state = GestureState::Idle;
        PointerResponse::Handled
    }

    /// Put the centre of the first snapshot child under the pointer.
    /// Half sizes are integer halves of the measured size.
    fn center_first(&self, children: &mut [FlowChild], at: Vec2) {
        let Some(first) = self.snapshot.first() else {
            return;
        };
        let Some(child) = children.get_mut(first.index()) else {
            return;
        };

        let size = child.layout.size;
        child.offset = Vec2::new(
            at.x - (size.width / 2) as f32,
            at.y - (size.height / 2) as f32,
        );
    }
}
