use bevy::math::Vec2;
use bevy::prelude::Resource;
use std::fmt;

use super::draw_order::drawing_order;
use super::follow::{TickOutcome, propagate};
use super::geometry::{self, CellSize, ChildLayout, FlowMetrics};
use super::gesture::{GestureMachine, PointerResponse};

/// Child identifier, equal to the child's insertion index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildId(pub usize);

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ChildId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// One grid cell: where layout put it, and how far the animation moved it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlowChild {
    pub layout: ChildLayout,
    /// Presentational translation added to the laid-out position
    pub offset: Vec2,
}

/// Flow container with the follow-the-finger gesture
#[derive(Debug, Clone, Resource)]
pub struct FlowContainer {
    metrics: FlowMetrics,
    /// Size from the last measure pass
    measured: CellSize,
    children: Vec<FlowChild>,
    gesture: GestureMachine,
    /// Set when the child set changed and the host should run a layout pass
    layout_requested: bool,
}

impl FlowContainer {
    pub fn new(metrics: FlowMetrics) -> Self {
        FlowContainer {
            metrics,
            measured: CellSize::default(),
            children: Vec::new(),
            gesture: GestureMachine::new(),
            layout_requested: false,
        }
    }

    /// Container with `count` visible children
    #[cfg(test)]
    pub fn with_children(metrics: FlowMetrics, count: usize) -> Self {
        let mut container = Self::new(metrics);
        for _ in 0..count {
            container.add_child(true);
        }
        container
    }

    // === Children ===

    pub fn add_child(&mut self, visible: bool) -> ChildId {
        let id = ChildId(self.children.len());
        self.children.push(FlowChild {
            layout: ChildLayout {
                visible,
                ..ChildLayout::default()
            },
            offset: Vec2::ZERO,
        });
        self.layout_requested = true;
        id
    }

    /// Show or hide (gone) a child. Returns true if visibility changed.
    pub fn set_visible(&mut self, id: ChildId, visible: bool) -> bool {
        let Some(child) = self.children.get_mut(id.index()) else {
            return false;
        };
        if child.layout.visible == visible {
            return false;
        }
        child.layout.visible = visible;
        self.layout_requested = true;
        true
    }

    pub fn child(&self, id: ChildId) -> Option<&FlowChild> {
        self.children.get(id.index())
    }

    pub fn children(&self) -> &[FlowChild] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn visible_count(&self) -> usize {
        self.children.iter().filter(|c| c.layout.visible).count()
    }

    pub fn measured_size(&self) -> CellSize {
        self.measured
    }

    // === Layout ===

    pub fn measure(&mut self, width: i32, height: i32) {
        self.measured = CellSize { width, height };
        geometry::measure(
            &self.metrics,
            width,
            self.children.iter_mut().map(|c| &mut c.layout),
        );
    }

    /// Arrange pass against the width of the last measure pass
    pub fn arrange(&mut self) {
        geometry::arrange(
            &self.metrics,
            self.measured.width,
            self.children.iter_mut().map(|c| &mut c.layout),
        );
    }

    /// Measure then arrange, clearing any pending layout request
    pub fn layout(&mut self, width: i32, height: i32) {
        self.measure(width, height);
        self.arrange();
        self.layout_requested = false;
    }

    /// Ask the host for a layout pass, e.g. after the available size changed
    pub fn request_layout(&mut self) {
        self.layout_requested = true;
    }

    /// Consume the pending layout request, if any
    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.layout_requested)
    }

    /// Index of the child drawn at position `i`
    pub fn drawing_order(&self, i: usize) -> usize {
        drawing_order(self.children.len(), i)
    }

    // === Gesture ===

    pub fn is_following(&self) -> bool {
        self.gesture.is_following()
    }

    pub fn snapshot(&self) -> &[ChildId] {
        self.gesture.snapshot()
    }

    pub fn pointer_down(&mut self, at: Vec2) -> PointerResponse {
        self.gesture.pointer_down(&mut self.children, at)
    }

    pub fn pointer_move(&mut self, at: Vec2) -> PointerResponse {
        self.gesture.pointer_move(&mut self.children, at)
    }

    pub fn pointer_up(&mut self) -> PointerResponse {
        self.gesture.pointer_up(&mut self.children)
    }

    /// One step of the follow animation
    pub fn follow_tick(&mut self) -> TickOutcome {
        if !self.gesture.is_following() {
            return TickOutcome::Stopped;
        }
        propagate(self.gesture.snapshot(), &mut self.children);
        TickOutcome::Continue
    }
}

impl Default for FlowContainer {
    fn default() -> Self {
        Self::new(FlowMetrics::default())
    }
}
