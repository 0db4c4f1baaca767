//! Budgeted flood-fill region queries.
//!
//! Finds the 6-connected region of cells sharing the start cell's material and
//! reports its bounding box. The traversal is an explicit breadth-first queue
//! with a visited set keyed by [`VoxelCoord::packed`]. Once more than `budget`
//! cells have been processed the query gives up and reports the start cell
//! alone.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::bounds::VoxelBox;
use crate::coord::VoxelCoord;
use crate::store::VoxelStore;

/// Default processing budget for hover queries.
pub const DEFAULT_FLOOD_FILL_BUDGET: usize = 6000;

/// Outcome of a region query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionQuery {
    /// The full connected region fit in the budget.
    Complete(VoxelBox),
    /// The budget ran out; the box covers only the start cell.
    Truncated(VoxelBox),
}

impl RegionQuery {
    pub fn bounds(self) -> VoxelBox {
        match self {
            RegionQuery::Complete(b) | RegionQuery::Truncated(b) => b,
        }
    }

    pub fn is_truncated(self) -> bool {
        matches!(self, RegionQuery::Truncated(_))
    }
}

/// Queries the connected same-material region containing `start`.
///
/// Returns `None` when `start` is empty.
pub fn query_region(store: &VoxelStore, start: VoxelCoord, budget: usize) -> Option<RegionQuery> {
    let material = store.get(start)?;

    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();
    visited.insert(start.packed());
    queue.push_back(start);

    let mut min = start;
    let mut max = start;
    let mut processed = 0usize;

    while let Some(cell) = queue.pop_front() {
        processed += 1;
        if processed > budget {
            tracing::debug!(%start, budget, "region query exceeded budget");
            return Some(RegionQuery::Truncated(VoxelBox::unit(start)));
        }

        min = min.min(cell);
        max = max.max(cell);

        for next in cell.neighbors() {
            if store.get(next) == Some(material) && visited.insert(next.packed()) {
                queue.push_back(next);
            }
        }
    }

    // A region wider than a box can describe reports like an exhausted budget.
    match VoxelBox::from_corners(min, max) {
        Some(bounds) => Some(RegionQuery::Complete(bounds)),
        None => Some(RegionQuery::Truncated(VoxelBox::unit(start))),
    }
}

/// Bounding box of the region containing `start`, degraded to the start cell
/// when the budget runs out.
pub fn region_bounds(store: &VoxelStore, start: VoxelCoord, budget: usize) -> Option<VoxelBox> {
    query_region(store, start, budget).map(RegionQuery::bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Size3;
    use crate::material::MaterialId;

    fn fill(store: &mut VoxelStore, b: VoxelBox, m: MaterialId) {
        for c in b.cells() {
            store.set(c, m);
        }
    }

    #[test]
    fn test_three_by_three_slab_from_center() {
        let mut store = VoxelStore::new();
        let slab = VoxelBox::new(VoxelCoord::new(4, 7, 0), Size3::new(3, 3, 1));
        fill(&mut store, slab, MaterialId::BrickRed);

        let b = region_bounds(&store, VoxelCoord::new(5, 8, 0), DEFAULT_FLOOD_FILL_BUDGET).unwrap();
        assert_eq!(b.min, VoxelCoord::new(4, 7, 0));
        assert_eq!(b.size, Size3::new(3, 3, 1));
    }

    #[test]
    fn test_empty_start_returns_none() {
        let store = VoxelStore::new();
        assert_eq!(query_region(&store, VoxelCoord::ORIGIN, 10), None);
    }

    #[test]
    fn test_other_material_and_diagonals_excluded() {
        let mut store = VoxelStore::new();
        store.set(VoxelCoord::new(0, 0, 0), MaterialId::BrickRed);
        store.set(VoxelCoord::new(1, 0, 0), MaterialId::BrickRed);
        // Different material, face-adjacent.
        store.set(VoxelCoord::new(2, 0, 0), MaterialId::MetalLight);
        // Same material, diagonal only.
        store.set(VoxelCoord::new(2, 1, 0), MaterialId::BrickRed);

        let q = query_region(&store, VoxelCoord::ORIGIN, 100).unwrap();
        assert!(!q.is_truncated());
        assert_eq!(
            q.bounds(),
            VoxelBox::new(VoxelCoord::ORIGIN, Size3::new(2, 1, 1))
        );
    }

    #[test]
    fn test_budget_exhaustion_degrades_to_start_cell() {
        let mut store = VoxelStore::new();
        let slab = VoxelBox::new(VoxelCoord::ORIGIN, Size3::new(10, 10, 1));
        fill(&mut store, slab, MaterialId::StoneGrayDark);
        let start = VoxelCoord::new(3, 3, 0);

        let q = query_region(&store, start, 99).unwrap();
        assert_eq!(q, RegionQuery::Truncated(VoxelBox::unit(start)));

        // Exactly enough budget succeeds.
        let q = query_region(&store, start, 100).unwrap();
        assert_eq!(q, RegionQuery::Complete(slab));
    }

    #[test]
    fn test_negative_coordinates() {
        let mut store = VoxelStore::new();
        let column = VoxelBox::new(VoxelCoord::new(-1, -1, -5), Size3::new(1, 1, 5));
        fill(&mut store, column, MaterialId::GlowYellow);
        let b = region_bounds(&store, VoxelCoord::new(-1, -1, -1), 6000).unwrap();
        assert_eq!(b, column);
    }

    #[test]
    fn test_regions_on_extreme_planes() {
        let mut store = VoxelStore::new();
        let high = VoxelCoord::new(i32::MAX, 0, 0);
        store.set(high, MaterialId::BrickRed);
        store.set(VoxelCoord::new(i32::MAX - 1, 0, 0), MaterialId::BrickRed);
        let low = VoxelCoord::new(0, i32::MIN, i32::MIN);
        store.set(low, MaterialId::GlowBlue);

        let q = query_region(&store, high, DEFAULT_FLOOD_FILL_BUDGET).unwrap();
        assert_eq!(
            q,
            RegionQuery::Complete(VoxelBox::new(
                VoxelCoord::new(i32::MAX - 1, 0, 0),
                Size3::new(2, 1, 1)
            ))
        );
        assert_eq!(
            region_bounds(&store, low, DEFAULT_FLOOD_FILL_BUDGET),
            Some(VoxelBox::unit(low))
        );
    }
}
