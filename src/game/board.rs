use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Player;
use crate::error::BoardError;

/// Default grid width and height in cells.
pub const DEFAULT_GRID_SIZE: usize = 6;

/// Index into a board's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(usize);

impl EdgeId {
    pub const fn new(index: usize) -> Self {
        EdgeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Grid coordinates of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        CellPos { row, col }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bottom,
    Left,
    Right,
    Top,
}

impl Side {
    /// All sides, in the order free sides are reported and point ties are broken.
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Top, Side::Left, Side::Right];

    /// The matching side of the neighbor across this side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Bottom => Side::Top,
            Side::Top => Side::Bottom,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Resolve a point inside a unit cell to the closest side.
    ///
    /// `x` grows rightwards and `y` grows downwards, both in `[0, 1]`.
    /// Equal distances resolve in the order bottom, top, left, right.
    pub fn nearest(x: f64, y: f64) -> Side {
        let distances = [
            (Side::Bottom, 1.0 - y),
            (Side::Top, y),
            (Side::Left, x),
            (Side::Right, 1.0 - x),
        ];

        let mut closest = distances[0];
        for candidate in &distances[1..] {
            if candidate.1 < closest.1 {
                closest = *candidate;
            }
        }
        closest.0
    }

    fn slot(self) -> usize {
        match self {
            Side::Bottom => 0,
            Side::Left => 1,
            Side::Right => 2,
            Side::Top => 3,
        }
    }
}

/// A claimable line between two grid dots, shared by up to two cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    owner: Option<Player>,
    /// Above/below for horizontal edges, left/right for vertical ones.
    borders: [Option<CellPos>; 2],
}

impl Edge {
    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }

    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    /// Cells bordering this edge (one on the boundary, two elsewhere).
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        self.borders.iter().flatten().copied()
    }

    pub fn is_boundary(&self) -> bool {
        self.borders.iter().any(Option::is_none)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pos: CellPos,
    edges: [EdgeId; 4],
    selected: u8,
    owner: Option<Player>,
}

impl Cell {
    pub fn pos(&self) -> CellPos {
        self.pos
    }

    /// The edge on the given side of this cell
    pub fn edge(&self, side: Side) -> EdgeId {
        self.edges[side.slot()]
    }

    /// Number of claimed sides (0..=4)
    pub fn selected_count(&self) -> u8 {
        self.selected
    }

    /// Player who claimed the fourth side, if any
    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    pub fn is_complete(&self) -> bool {
        self.selected == 4
    }
}

/// Outcome of a single edge claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimResult {
    pub edge: EdgeId,
    pub player: Player,
    /// Cells this claim completed (at most two).
    pub completed: Vec<CellPos>,
}

impl ClaimResult {
    pub fn completed_any(&self) -> bool {
        !self.completed.is_empty()
    }
}

/// Square grid of cells over a shared edge arena.
///
/// Horizontal edges come first in the arena, `size + 1` lines of `size`
/// edges, then vertical edges, `size` rows of `size + 1` edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    edges: Vec<Edge>,
}

impl Board {
    /// Create a new board with every edge unclaimed
    pub fn new(size: usize) -> Self {
        let horizontal = size * (size + 1);
        let mut edges = Vec::with_capacity(2 * horizontal);

        for line in 0..=size {
            for col in 0..size {
                let above = line.checked_sub(1).map(|row| CellPos::new(row, col));
                let below = (line < size).then(|| CellPos::new(line, col));
                edges.push(Edge {
                    owner: None,
                    borders: [above, below],
                });
            }
        }
        for row in 0..size {
            for line in 0..=size {
                let left = line.checked_sub(1).map(|col| CellPos::new(row, col));
                let right = (line < size).then(|| CellPos::new(row, line));
                edges.push(Edge {
                    owner: None,
                    borders: [left, right],
                });
            }
        }

        let horizontal_id = |line: usize, col: usize| EdgeId(line * size + col);
        let vertical_id = |row: usize, line: usize| EdgeId(horizontal + row * (size + 1) + line);

        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let mut ids = [EdgeId(0); 4];
                ids[Side::Top.slot()] = horizontal_id(row, col);
                ids[Side::Bottom.slot()] = horizontal_id(row + 1, col);
                ids[Side::Left.slot()] = vertical_id(row, col);
                ids[Side::Right.slot()] = vertical_id(row, col + 1);
                cells.push(Cell {
                    pos: CellPos::new(row, col),
                    edges: ids,
                    selected: 0,
                    owner: None,
                });
            }
        }

        Board { size, cells, edges }
    }

    /// Cells per side of the grid
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Bounds-checked cell accessor
    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell, BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok(&self.cells[row * self.size + col])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge, BoardError> {
        self.edges.get(id.0).ok_or(BoardError::UnknownEdge(id))
    }

    /// All edges with their ids
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, edge)| (EdgeId(i), edge))
    }

    /// Resolve a cell side to its shared edge
    pub fn edge_at(&self, row: usize, col: usize, side: Side) -> Result<EdgeId, BoardError> {
        Ok(self.cell_at(row, col)?.edge(side))
    }

    /// The cell across `side` of `pos`, if it is not on that boundary
    pub fn neighbor(&self, pos: CellPos, side: Side) -> Option<CellPos> {
        let CellPos { row, col } = pos;
        let (row, col) = match side {
            Side::Top => (row.checked_sub(1)?, col),
            Side::Bottom => (row + 1, col),
            Side::Left => (row, col.checked_sub(1)?),
            Side::Right => (row, col + 1),
        };
        (row < self.size && col < self.size).then_some(CellPos::new(row, col))
    }

    /// Unclaimed sides of a cell, in `Side::ALL` order
    pub fn free_sides(&self, row: usize, col: usize) -> Result<Vec<Side>, BoardError> {
        let cell = self.cell_at(row, col)?;
        Ok(Side::ALL
            .into_iter()
            .filter(|&side| !self.edges[cell.edge(side).0].is_claimed())
            .collect())
    }

    /// Unclaimed sides of a cell that leave the neighbor across them below
    /// three claimed sides.
    ///
    /// A side is safe when the cell sits on that boundary or the neighbor
    /// currently has fewer than two claimed sides. Reported in the order
    /// left, right, top, bottom.
    pub fn valid_edges_for(&self, row: usize, col: usize) -> Result<Vec<Side>, BoardError> {
        const SCAN: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

        let cell = self.cell_at(row, col)?;
        Ok(SCAN
            .into_iter()
            .filter(|&side| !self.edges[cell.edge(side).0].is_claimed())
            .filter(|&side| {
                self.neighbor(cell.pos, side)
                    .map_or(true, |n| self.cells[n.row * self.size + n.col].selected < 2)
            })
            .collect())
    }

    /// Claim an edge for `player`, completing any bordering cell that now
    /// has all four sides claimed.
    ///
    /// Rejects edges that are already claimed without touching any state.
    pub fn claim_edge(&mut self, id: EdgeId, player: Player) -> Result<ClaimResult, BoardError> {
        let edge = self.edges.get_mut(id.0).ok_or(BoardError::UnknownEdge(id))?;
        if edge.is_claimed() {
            return Err(BoardError::AlreadyClaimed(id));
        }
        edge.owner = Some(player);
        let borders = edge.borders;

        let mut completed = Vec::new();
        for pos in borders.into_iter().flatten() {
            let cell = &mut self.cells[pos.row * self.size + pos.col];
            cell.selected += 1;
            if cell.selected == 4 {
                cell.owner = Some(player);
                completed.push(pos);
            }
        }

        debug!(edge = %id, ?player, completed = completed.len(), "edge claimed");
        Ok(ClaimResult {
            edge: id,
            player,
            completed,
        })
    }

    /// Ids of every unclaimed edge, ascending
    pub fn unclaimed_edges(&self) -> Vec<EdgeId> {
        self.edges()
            .filter(|(_, edge)| !edge.is_claimed())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn claimed_edge_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.is_claimed()).count()
    }

    /// Number of cells completed by `player`
    pub fn owned_cell_count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.owner == Some(player))
            .count()
    }

    pub fn completed_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_complete()).count()
    }

    /// Check if every cell has an owner
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Cell::is_complete)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}
