mod container;
mod draw_order;
mod follow;
mod geometry;
mod gesture;
mod scheduler;

pub use container::{ChildId, FlowChild, FlowContainer};
pub use follow::FollowLoop;
pub use geometry::{CellSize, ChildLayout, FlowMetrics, Insets, LayoutRect};
pub use gesture::PointerResponse;
