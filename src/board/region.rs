//! Region index over the board
//!
//! The board is split into `REGION_SIZE`-square regions. Each region keeps the
//! number of stones inside it and an activity reference count: the number of
//! stones in the region itself plus its eight neighbours. A region is active
//! while that count is non-zero, so every occupied region and its ring of
//! neighbours stays active and everything else can be skipped by scans.

use std::collections::TryReserveError;

use super::{try_filled, Pos, REGION_SIZE};

/// Coordinates of one region (in region units, not cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Region {
    pub row: usize,
    pub col: usize,
}

impl Region {
    /// Region containing `pos`
    #[inline]
    pub fn of(pos: Pos) -> Self {
        Self {
            row: pos.row as usize / REGION_SIZE,
            col: pos.col as usize / REGION_SIZE,
        }
    }

    /// Inclusive corner cells of the region, clipped to a board of side `size`
    pub fn cell_bounds(self, size: usize) -> (Pos, Pos) {
        let r0 = self.row * REGION_SIZE;
        let c0 = self.col * REGION_SIZE;
        let r1 = (r0 + REGION_SIZE).min(size) - 1;
        let c1 = (c0 + REGION_SIZE).min(size) - 1;
        (
            Pos::new(r0 as u8, c0 as u8),
            Pos::new(r1 as u8, c1 as u8),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionIndex {
    per_side: usize,
    stone_counts: Vec<u32>,
    active_refs: Vec<u32>,
}

impl RegionIndex {
    /// Empty index for a board of side `board_size`
    pub fn new(board_size: usize) -> Self {
        let per_side = board_size.div_ceil(REGION_SIZE);
        Self {
            per_side,
            stone_counts: vec![0; per_side * per_side],
            active_refs: vec![0; per_side * per_side],
        }
    }

    pub fn try_new(board_size: usize) -> Result<Self, TryReserveError> {
        let per_side = board_size.div_ceil(REGION_SIZE);
        Ok(Self {
            per_side,
            stone_counts: try_filled(per_side * per_side, 0)?,
            active_refs: try_filled(per_side * per_side, 0)?,
        })
    }

    /// Regions per board side
    #[inline]
    pub fn per_side(&self) -> usize {
        self.per_side
    }

    #[inline]
    fn slot(&self, region: Region) -> usize {
        region.row * self.per_side + region.col
    }

    /// Record a stone placed at `pos`
    pub fn add_stone(&mut self, pos: Pos) {
        let region = Region::of(pos);
        let slot = self.slot(region);
        self.stone_counts[slot] += 1;
        for n in self.neighbourhood(region) {
            let slot = self.slot(n);
            self.active_refs[slot] += 1;
        }
    }

    /// Record the removal of the stone at `pos`
    pub fn remove_stone(&mut self, pos: Pos) {
        let region = Region::of(pos);
        let slot = self.slot(region);
        debug_assert!(self.stone_counts[slot] > 0);
        self.stone_counts[slot] -= 1;
        for n in self.neighbourhood(region) {
            let slot = self.slot(n);
            self.active_refs[slot] -= 1;
        }
    }

    /// Reset and repopulate from a set of occupied cells
    pub fn rebuild(&mut self, occupied: impl IntoIterator<Item = Pos>) {
        self.stone_counts.iter_mut().for_each(|c| *c = 0);
        self.active_refs.iter_mut().for_each(|c| *c = 0);
        for pos in occupied {
            self.add_stone(pos);
        }
    }

    #[inline]
    pub fn stone_count(&self, region: Region) -> u32 {
        self.stone_counts[self.slot(region)]
    }

    #[inline]
    pub fn is_active(&self, region: Region) -> bool {
        self.active_refs[self.slot(region)] > 0
    }

    /// Active regions in row-major order
    pub fn active_regions(&self) -> Vec<Region> {
        self.all_regions().filter(|&r| self.is_active(r)).collect()
    }

    /// Regions holding at least one stone, in row-major order
    pub fn occupied_regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.all_regions().filter(move |&r| self.stone_count(r) > 0)
    }

    fn all_regions(&self) -> impl Iterator<Item = Region> + '_ {
        (0..self.per_side)
            .flat_map(move |row| (0..self.per_side).map(move |col| Region { row, col }))
    }

    /// The region and its (up to) eight neighbours
    fn neighbourhood(&self, region: Region) -> impl Iterator<Item = Region> {
        let per_side = self.per_side;
        let rows = region.row.saturating_sub(1)..=(region.row + 1).min(per_side - 1);
        rows.flat_map(move |row| {
            let cols = region.col.saturating_sub(1)..=(region.col + 1).min(per_side - 1);
            cols.map(move |col| Region { row, col })
        })
    }

    pub fn memory_usage(&self) -> usize {
        (self.stone_counts.capacity() + self.active_refs.capacity()) * std::mem::size_of::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_of() {
        assert_eq!(Region::of(Pos::new(0, 0)), Region { row: 0, col: 0 });
        assert_eq!(Region::of(Pos::new(9, 10)), Region { row: 0, col: 1 });
        assert_eq!(Region::of(Pos::new(99, 45)), Region { row: 9, col: 4 });
    }

    #[test]
    fn test_cell_bounds_clipped() {
        // 15x15 board: second region is only five cells wide
        let (tl, br) = Region { row: 1, col: 1 }.cell_bounds(15);
        assert_eq!(tl, Pos::new(10, 10));
        assert_eq!(br, Pos::new(14, 14));
    }

    #[test]
    fn test_add_stone_activates_neighbourhood() {
        let mut index = RegionIndex::new(50);
        assert_eq!(index.per_side(), 5);
        assert!(index.active_regions().is_empty());

        index.add_stone(Pos::new(25, 25));
        let active = index.active_regions();
        assert_eq!(active.len(), 9);
        assert!(active.contains(&Region { row: 1, col: 1 }));
        assert!(active.contains(&Region { row: 3, col: 3 }));
        assert!(!index.is_active(Region { row: 0, col: 0 }));
    }

    #[test]
    fn test_corner_stone_clips_neighbourhood() {
        let mut index = RegionIndex::new(100);
        index.add_stone(Pos::new(0, 0));
        assert_eq!(index.active_regions().len(), 4);
    }

    #[test]
    fn test_remove_stone_deactivates() {
        let mut index = RegionIndex::new(30);
        index.add_stone(Pos::new(5, 5));
        index.add_stone(Pos::new(15, 15));
        index.remove_stone(Pos::new(5, 5));

        assert_eq!(index.stone_count(Region { row: 0, col: 0 }), 0);
        // Still a neighbour of the stone at (15, 15)
        assert!(index.is_active(Region { row: 0, col: 0 }));

        index.remove_stone(Pos::new(15, 15));
        assert!(index.active_regions().is_empty());
    }

    #[test]
    fn test_rebuild_matches_incremental() {
        let stones = [Pos::new(3, 4), Pos::new(44, 12), Pos::new(70, 99)];
        let mut incremental = RegionIndex::new(100);
        for &p in &stones {
            incremental.add_stone(p);
        }
        let mut rebuilt = RegionIndex::new(100);
        rebuilt.add_stone(Pos::new(50, 50));
        rebuilt.rebuild(stones);
        assert_eq!(incremental, rebuilt);
    }
}
