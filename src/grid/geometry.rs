use serde::Deserialize;

/// Measured size of a cell, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSize {
    pub width: i32,
    pub height: i32,
}

impl CellSize {
    pub const fn square(side: i32) -> Self {
        CellSize {
            width: side,
            height: side,
        }
    }
}

/// Laid-out rectangle of a cell, relative to the container's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl LayoutRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        LayoutRect {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Inner padding of the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
}

/// Fixed layout parameters of a flow container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowMetrics {
    /// How many cells share a row
    pub row_capacity: i32,
    /// Gap between neighbouring cells, both horizontally and between rows
    pub padding: i32,
    pub insets: Insets,
}

impl Default for FlowMetrics {
    fn default() -> Self {
        FlowMetrics {
            row_capacity: 7,
            padding: 10,
            insets: Insets::default(),
        }
    }
}

/// Per-child layout state written by the measure and arrange passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildLayout {
    /// Gone children are skipped by both passes
    pub visible: bool,
    pub size: CellSize,
    pub rect: LayoutRect,
}

impl Default for ChildLayout {
    fn default() -> Self {
        ChildLayout {
            visible: true,
            size: CellSize::default(),
            rect: LayoutRect::default(),
        }
    }
}

/// Side length of every cell for the given container width.
///
/// Integer division, so widths that do not divide evenly are truncated.
/// Degenerate widths are not rejected and yield zero or negative sides.
pub fn cell_side(metrics: &FlowMetrics, container_width: i32) -> i32 {
    (container_width - (metrics.row_capacity - 1) * metrics.padding) / metrics.row_capacity
}

/// Measure pass: give every visible child the same square size
pub fn measure<'a>(
    metrics: &FlowMetrics,
    container_width: i32,
    children: impl IntoIterator<Item = &'a mut ChildLayout>,
) {
    let side = cell_side(metrics, container_width);
    for child in children.into_iter().filter(|c| c.visible) {
        child.size = CellSize::square(side);
    }
}

/// Arrange pass: flow visible children left to right, wrapping into new rows.
///
/// The row advance uses the tallest child seen so far in the whole pass,
/// not the tallest child of the row being closed.
pub fn arrange<'a>(
    metrics: &FlowMetrics,
    container_width: i32,
    children: impl IntoIterator<Item = &'a mut ChildLayout>,
) {
    let insets = metrics.insets;
    let mut left = insets.left;
    let mut top = insets.top;
    let mut max_height = i32::MIN;

    for child in children.into_iter().filter(|c| c.visible) {
        let CellSize { width, height } = child.size;
        max_height = max_height.max(height);

        if left + width + insets.right > container_width {
            left = insets.left;
            top += max_height + metrics.padding;
        }

        child.rect = LayoutRect::new(left, top, left + width, top + height);
        left += width + metrics.padding;
    }
}
