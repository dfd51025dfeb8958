/// Index of the child drawn at position `i` of `child_count`.
///
/// Plain reversal, so the first child is drawn last and ends up on top.
pub fn drawing_order(child_count: usize, i: usize) -> usize {
    debug_assert!(i < child_count, "draw position {i} out of {child_count}");
    child_count - 1 - i
}
