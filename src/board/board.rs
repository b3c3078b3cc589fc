//! Board structure with move history and incremental indexes

use std::collections::TryReserveError;
use std::fmt;

use tracing::warn;

use super::bitboard::Bitboard;
use super::error::BoardError;
use super::region::{Region, RegionIndex};
use super::{is_in_range, try_filled, Pos, Stone, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};

/// Record of a move for undo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub pos: Pos,
    pub stone: Stone,
}

/// Game board
///
/// Invariants kept by every mutating method:
/// - `cells.len() == size * size`
/// - `history.len() == move_count ==` number of non-empty cells
/// - `occupied` has a bit set exactly for the non-empty cells
/// - `regions` matches the stones currently on the board
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Stone>,
    move_count: usize,
    history: Vec<MoveRecord>,
    occupied: Bitboard,
    regions: RegionIndex,
    last_move: Option<Pos>,
}

impl Board {
    /// Create an empty board of side `size`.
    ///
    /// Sizes outside `MIN_SIZE..=MAX_SIZE` are rejected. If the grid cannot be
    /// allocated the board falls back to `MIN_SIZE`.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        check_size(size)?;
        match Self::allocate(size) {
            Ok(board) => Ok(board),
            Err(err) => {
                warn!(size, %err, "falling back to minimum board size");
                Self::allocate(MIN_SIZE)
            }
        }
    }

    fn allocate(size: usize) -> Result<Self, BoardError> {
        let alloc_err = move |_: TryReserveError| BoardError::AllocationFailure { size };
        let cells = try_filled(size * size, Stone::Empty).map_err(alloc_err)?;
        let occupied = Bitboard::try_new(size * size).map_err(alloc_err)?;
        let regions = RegionIndex::try_new(size).map_err(alloc_err)?;
        let mut history = Vec::new();
        history.try_reserve(size * size).map_err(alloc_err)?;

        Ok(Self {
            size,
            cells,
            move_count: 0,
            history,
            occupied,
            regions,
            last_move: None,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get stone at position. `pos` must be on the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index(self.size)]
    }

    /// Bounds-checked read
    #[inline]
    pub fn cell_at(&self, row: i32, col: i32) -> Option<Stone> {
        self.pos_at(row, col).map(|p| self.get(p))
    }

    /// Position for signed coordinates, if on the board
    #[inline]
    pub fn pos_at(&self, row: i32, col: i32) -> Option<Pos> {
        is_in_range(row, col, self.size).then(|| Pos::new(row as u8, col as u8))
    }

    #[inline]
    pub fn is_in_bounds(&self, row: i32, col: i32) -> bool {
        is_in_range(row, col, self.size)
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.size && (pos.col as usize) < self.size
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone and update history and indexes.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> Result<(), BoardError> {
        if !stone.is_player() {
            return Err(BoardError::InvalidPlayer);
        }
        if !self.contains(pos) {
            return Err(BoardError::OutOfBounds {
                row: pos.row.into(),
                col: pos.col.into(),
            });
        }
        let idx = pos.to_index(self.size);
        if self.cells[idx] != Stone::Empty {
            return Err(BoardError::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }

        self.cells[idx] = stone;
        self.occupied.set(idx);
        self.regions.add_stone(pos);
        self.history.push(MoveRecord { pos, stone });
        self.move_count += 1;
        self.last_move = Some(pos);
        Ok(())
    }

    /// Revert the most recent move.
    pub fn undo_last(&mut self) -> Result<MoveRecord, BoardError> {
        let record = self.history.pop().ok_or(BoardError::NoHistory)?;
        let idx = record.pos.to_index(self.size);
        self.cells[idx] = Stone::Empty;
        self.occupied.clear(idx);
        self.regions.remove_stone(record.pos);
        self.move_count -= 1;
        self.last_move = self.history.last().map(|r| r.pos);
        Ok(record)
    }

    /// Revert the last `count` moves. Nothing is undone if fewer exist.
    pub fn undo_moves(&mut self, count: usize) -> Result<(), BoardError> {
        if count > self.history.len() {
            return Err(BoardError::NoHistory);
        }
        for _ in 0..count {
            self.undo_last()?;
        }
        Ok(())
    }

    /// Clear all stones, keeping the size
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Stone::Empty);
        self.occupied.clear_all();
        self.regions.rebuild(std::iter::empty());
        self.history.clear();
        self.move_count = 0;
        self.last_move = None;
    }

    /// Replace the board with an empty one of a new size
    pub fn reset_with_size(&mut self, size: usize) -> Result<(), BoardError> {
        check_size(size)?;
        *self = Self::allocate(size)?;
        Ok(())
    }

    /// Change the board side, keeping stones inside the overlapping square.
    ///
    /// Stones outside the new bounds are dropped together with their history
    /// records. On failure the board is left unchanged.
    pub fn resize(&mut self, new_size: usize) -> Result<(), BoardError> {
        check_size(new_size)?;
        if new_size == self.size {
            return Ok(());
        }

        let mut next = Self::allocate(new_size)?;
        let keep = self.size.min(new_size);
        for row in 0..keep {
            for col in 0..keep {
                let pos = Pos::new(row as u8, col as u8);
                let stone = self.get(pos);
                if stone.is_player() {
                    let idx = pos.to_index(new_size);
                    next.cells[idx] = stone;
                    next.occupied.set(idx);
                }
            }
        }
        let in_bounds = |r: &&MoveRecord| (r.pos.row as usize) < new_size && (r.pos.col as usize) < new_size;
        next.history.extend(self.history.iter().filter(in_bounds).copied());
        next.move_count = next.history.len();
        next.last_move = next.history.last().map(|r| r.pos);
        let occupied: Vec<Pos> = next.occupied_cells().collect();
        next.regions.rebuild(occupied);

        *self = next;
        Ok(())
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// Moves played so far, oldest first
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count == self.size * self.size
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.move_count == 0
    }

    /// Read-only view of the grid, row-major
    pub fn cells(&self) -> &[Stone] {
        &self.cells
    }

    /// Grid rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Stone]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn occupancy(&self) -> &Bitboard {
        &self.occupied
    }

    pub fn regions(&self) -> &RegionIndex {
        &self.regions
    }

    /// Occupied cells in row-major order
    pub fn occupied_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        self.occupied.iter_ones().map(move |idx| Pos::from_index(idx, size))
    }

    /// Cells holding `stone`, in row-major order
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        self.occupied_cells().filter(move |&p| self.get(p) == stone)
    }

    pub fn empty_cells(&self) -> Vec<Pos> {
        (0..self.cells.len())
            .filter(|&idx| !self.occupied.get(idx))
            .map(|idx| Pos::from_index(idx, self.size))
            .collect()
    }

    /// Empty cells in the inclusive rectangle `from..=to`, clipped to the board
    pub fn empty_cells_in_rect(&self, from: Pos, to: Pos) -> Vec<Pos> {
        let last = self.size - 1;
        let (r0, r1) = (from.row.min(to.row) as usize, (from.row.max(to.row) as usize).min(last));
        let (c0, c1) = (from.col.min(to.col) as usize, (from.col.max(to.col) as usize).min(last));
        let mut cells = Vec::new();
        for row in r0..=r1 {
            for col in c0..=c1 {
                let pos = Pos::new(row as u8, col as u8);
                if self.is_empty(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    /// Stones inside one region, row-major
    pub fn stones_in_region(&self, region: Region) -> Vec<Pos> {
        let (tl, br) = region.cell_bounds(self.size);
        let mut stones = Vec::new();
        for row in tl.row..=br.row {
            for col in tl.col..=br.col {
                let pos = Pos::new(row, col);
                if !self.is_empty(pos) {
                    stones.push(pos);
                }
            }
        }
        stones
    }

    /// Empty cells within Chebyshev distance `radius` of `pos`, centre excluded
    pub fn neighbors_within_radius(&self, pos: Pos, radius: usize) -> Vec<Pos> {
        let radius = radius as i32;
        let mut cells = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(p) = pos.offset(dr, dc, 1, self.size) {
                    if self.is_empty(p) {
                        cells.push(p);
                    }
                }
            }
        }
        cells
    }

    /// Empty cells within `radius` of any stone, without duplicates.
    ///
    /// Only regions that hold stones are visited.
    pub fn frontier(&self, radius: usize) -> Vec<Pos> {
        let mut seen = Bitboard::new(self.cells.len());
        let mut cells = Vec::new();
        for region in self.regions.occupied_regions() {
            for stone in self.stones_in_region(region) {
                for p in self.neighbors_within_radius(stone, radius) {
                    let idx = p.to_index(self.size);
                    if !seen.get(idx) {
                        seen.set(idx);
                        cells.push(p);
                    }
                }
            }
        }
        cells
    }

    pub fn active_regions(&self) -> Vec<Region> {
        self.regions.active_regions()
    }

    /// Smallest rectangle containing every stone, as (top-left, bottom-right).
    ///
    /// An empty board collapses to the centre cell.
    pub fn bounding_box(&self) -> (Pos, Pos) {
        let mut cells = self.occupied_cells();
        let Some(first) = cells.next() else {
            let c = self.center();
            return (c, c);
        };
        let (mut min_r, mut max_r, mut min_c, mut max_c) = (first.row, first.row, first.col, first.col);
        for p in cells {
            min_r = min_r.min(p.row);
            max_r = max_r.max(p.row);
            min_c = min_c.min(p.col);
            max_c = max_c.max(p.col);
        }
        (Pos::new(min_r, min_c), Pos::new(max_r, max_c))
    }

    #[inline]
    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    /// Fraction of occupied cells, in `0.0..=1.0`
    pub fn occupancy_rate(&self) -> f64 {
        self.move_count as f64 / (self.size * self.size) as f64
    }

    /// Approximate heap footprint in bytes
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.cells.capacity() * std::mem::size_of::<Stone>()
            + self.history.capacity() * std::mem::size_of::<MoveRecord>()
            + self.occupied.memory_usage()
            + self.regions.memory_usage()
    }

    /// Check every internal invariant. Intended for tests and debug assertions.
    pub fn validate_state(&self) -> bool {
        if self.cells.len() != self.size * self.size || self.occupied.len() != self.cells.len() {
            return false;
        }
        let stones = self.cells.iter().filter(|c| c.is_player()).count();
        if stones != self.move_count || self.history.len() != self.move_count {
            return false;
        }
        let index_matches = self
            .cells
            .iter()
            .enumerate()
            .all(|(idx, c)| c.is_player() == self.occupied.get(idx));
        if !index_matches {
            return false;
        }
        let history_matches = self.history.iter().all(|r| self.get(r.pos) == r.stone);
        if !history_matches || self.last_move != self.history.last().map(|r| r.pos) {
            return false;
        }
        let mut expected = RegionIndex::new(self.size);
        expected.rebuild(self.occupied_cells());
        expected == self.regions
    }
}

fn check_size(size: usize) -> Result<(), BoardError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(BoardError::InvalidSize { size })
    }
}

impl Default for Board {
    fn default() -> Self {
        let size = DEFAULT_SIZE;
        Self {
            size,
            cells: vec![Stone::Empty; size * size],
            move_count: 0,
            history: Vec::with_capacity(size * size),
            occupied: Bitboard::new(size * size),
            regions: RegionIndex::new(size),
            last_move: None,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    ")?;
        for col in 0..self.size {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;
        for (row, cells) in self.rows().enumerate() {
            write!(f, "{:>3} ", row)?;
            for (col, &cell) in cells.iter().enumerate() {
                if self.last_move == Some(Pos::new(row as u8, col as u8)) {
                    write!(f, "[{}]", cell.symbol())?;
                } else {
                    write!(f, " {} ", cell.symbol())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
