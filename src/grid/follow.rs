use bevy::math::Vec2;
use bevy::prelude::Resource;
use std::time::Duration;

use super::container::{ChildId, FlowChild, FlowContainer};
use super::scheduler::TickScheduler;

/// Result of one follow tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Offsets moved; the next tick must be scheduled
    Continue,
    /// Following already ended; nothing moved and nothing is rescheduled
    Stopped,
}

/// Pull every snapshot child toward the previous-tick offset of its predecessor.
///
/// Walks from the last child down to the second one. Each child reads its
/// predecessor before that predecessor is updated in the same pass, which is
/// what makes the chain lag behind the pointer.
pub fn propagate(snapshot: &[ChildId], children: &mut [FlowChild]) {
    for i in (1..snapshot.len()).rev() {
        let (Some(prev), Some(next)) = (
            children.get(snapshot[i - 1].index()),
            children.get(snapshot[i].index()),
        ) else {
            continue;
        };

        // fixed distance between the two laid-out cells
        let delta = Vec2::new(
            (next.layout.rect.left - prev.layout.rect.left) as f32,
            (next.layout.rect.top - prev.layout.rect.top) as f32,
        );
        let offset = prev.offset - delta;

        children[snapshot[i].index()].offset = offset;
    }
}

/// Periodic follow animation, one tick every `interval` while following.
///
/// At most one tick is pending at any time. A tick that finds following
/// over runs its no-op branch and is not rescheduled, which ends the loop.
#[derive(Resource, Debug, Clone)]
pub struct FollowLoop {
    interval: Duration,
    scheduler: TickScheduler,
}

impl FollowLoop {
    pub fn new(interval: Duration) -> Self {
        FollowLoop {
            interval,
            scheduler: TickScheduler::new(),
        }
    }

    /// Schedule the first tick of a gesture, one full interval from now.
    ///
    /// A tick still queued from the previous gesture is dropped, so a quick
    /// re-grab neither fires early nor runs a second chain.
    pub fn start(&mut self) {
        self.scheduler.cancel_all();
        self.scheduler.schedule(self.interval);
    }

    /// Advance host time and run the ticks that became due.
    ///
    /// Returns how many ticks actually moved children.
    pub fn advance(&mut self, elapsed: Duration, container: &mut FlowContainer) -> usize {
        let due = self.scheduler.advance(elapsed);
        let mut moved = 0;

        for _ in 0..due {
            match container.follow_tick() {
                TickOutcome::Continue => {
                    self.scheduler.schedule(self.interval);
                    moved += 1;
                }
                TickOutcome::Stopped => {}
            }
        }

        moved
    }

    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }
}

impl Default for FollowLoop {
    fn default() -> Self {
        FollowLoop::new(Duration::from_millis(16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::geometry::{CellSize, ChildLayout, LayoutRect};

    fn cell(left: i32, top: i32, offset: Vec2) -> FlowChild {
        FlowChild {
            layout: ChildLayout {
                visible: true,
                size: CellSize::square(10),
                rect: LayoutRect::new(left, top, left + 10, top + 10),
            },
            offset,
        }
    }

    #[test]
    fn test_propagate_chaining_law() {
        let mut children = vec![
            cell(0, 0, Vec2::new(100.0, 50.0)),
            cell(20, 0, Vec2::new(1.0, 2.0)),
            cell(40, 0, Vec2::new(-3.0, 4.0)),
            cell(0, 20, Vec2::ZERO),
        ];
        let before: Vec<Vec2> = children.iter().map(|c| c.offset).collect();
        let snapshot = [ChildId(0), ChildId(1), ChildId(2), ChildId(3)];

        propagate(&snapshot, &mut children);

        assert_eq!(children[0].offset, before[0]);
        for i in 1..children.len() {
            let delta = Vec2::new(
                (children[i].layout.rect.left - children[i - 1].layout.rect.left) as f32,
                (children[i].layout.rect.top - children[i - 1].layout.rect.top) as f32,
            );
            assert_eq!(children[i].offset, before[i - 1] - delta, "child {i}");
        }
    }

    #[test]
    fn test_chain_reaches_pointer_one_child_per_tick() {
        let mut children = vec![
            cell(0, 0, Vec2::new(100.0, 100.0)),
            cell(20, 0, Vec2::ZERO),
            cell(40, 0, Vec2::ZERO),
        ];
        let snapshot = [ChildId(0), ChildId(1), ChildId(2)];

        propagate(&snapshot, &mut children);
        // child 1 now stacks on child 0, child 2 only copied child 1's old offset
        assert_eq!(children[1].offset, Vec2::new(80.0, 100.0));
        assert_eq!(children[2].offset, Vec2::new(-20.0, 0.0));

        propagate(&snapshot, &mut children);
        assert_eq!(children[2].offset, Vec2::new(60.0, 100.0));

        // every cell now sits on the same on-screen spot as child 0
        for child in &children {
            let screen = Vec2::new(child.layout.rect.left as f32, child.layout.rect.top as f32)
                + child.offset;
            assert_eq!(screen, Vec2::new(100.0, 100.0));
        }
    }

    #[test]
    fn test_propagate_follows_snapshot_not_child_index() {
        let mut children = vec![
            cell(0, 0, Vec2::new(10.0, 10.0)),
            cell(20, 0, Vec2::new(99.0, 99.0)),
            cell(40, 0, Vec2::ZERO),
        ];
        // child 1 is gone, so child 2 chases child 0 directly
        let snapshot = [ChildId(0), ChildId(2)];

        propagate(&snapshot, &mut children);

        assert_eq!(children[1].offset, Vec2::new(99.0, 99.0));
        assert_eq!(children[2].offset, Vec2::new(-30.0, 10.0));
    }

    #[test]
    fn test_propagate_single_child_is_noop() {
        let mut children = vec![cell(0, 0, Vec2::new(5.0, 5.0))];
        propagate(&[ChildId(0)], &mut children);
        assert_eq!(children[0].offset, Vec2::new(5.0, 5.0));
    }
}
