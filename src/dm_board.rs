// Board model: mine placement, adjacency counts, flood-fill reveal and win detection
// Has no knowledge of input handling or rendering

use rand::Rng;
use tracing::warn;

/// A single cell on the minesweeper board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub mine: bool,     // Contains a mine (fixed once placed)
    pub revealed: bool, // Opened by the player or by flood fill
    pub flagged: bool,  // Marked by the player as a suspected mine
    pub adj: u8,        // Adjacent mine count (0-8), unused for mine cells
}

/// Square grid of cells
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,      // Board width and height
    mines: usize,     // Mine count requested for this board
    cells: Vec<Cell>, // Row-major cells
}

impl Board {
    /// Create an empty board (no mines, nothing revealed)
    /// The mine count is clamped so at least one safe cell remains
    pub fn new(size: usize, mines: usize) -> Self {
        let n = size * size;
        let max = n.saturating_sub(1);
        if mines > max {
            warn!(requested = mines, max, "too many mines for board, clamping");
        }
        Board {
            size,
            mines: mines.min(max),
            cells: vec![Cell::default(); n],
        }
    }

    /// Create a board ready for play: mines placed and numbers computed
    pub fn generate<R: Rng + ?Sized>(size: usize, mines: usize, rng: &mut R) -> Self {
        let mut board = Board::new(size, mines);
        board.place_mines(rng);
        board.calculate_numbers();
        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn mine_count(&self) -> usize {
        self.mines
    }

    /// Convert (x, y) coordinates to flat array index
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Cell at (x, y), or None when outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Neighbor coordinates of (x, y) clipped to the grid, the cell itself included
    fn neighborhood(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + use<> {
        let last = self.size - 1;
        let xs = x.saturating_sub(1)..=(x + 1).min(last);
        (y.saturating_sub(1)..=(y + 1).min(last))
            .flat_map(move |oy| xs.clone().map(move |ox| (ox, oy)))
    }

    /// Randomly mark `mines` distinct cells as mines
    /// Expects a freshly created board: existing mines are not cleared
    pub fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.size * self.size;
        let mut placed = 0;
        while placed < self.mines {
            let i = rng.gen_range(0..n);
            if !self.cells[i].mine {
                self.cells[i].mine = true;
                placed += 1;
            }
        }
    }

    /// Compute the adjacent mine count of every non-mine cell
    pub fn calculate_numbers(&mut self) {
        for y in 0..self.size {
            for x in 0..self.size {
                let idx = self.index(x, y);
                if self.cells[idx].mine {
                    continue;
                }
                let adj = self
                    .neighborhood(x, y)
                    .filter(|&(ox, oy)| self.cells[self.index(ox, oy)].mine)
                    .count();
                self.cells[idx].adj = adj as u8;
            }
        }
    }

    /// Reveal the cell at (x, y)
    /// - Out of bounds, already revealed or flagged cells are left alone
    /// - A mine is revealed like any other cell; the caller decides what a mine hit means
    /// - A safe cell with no adjacent mines opens its neighbors (flood fill)
    ///
    /// Returns the number of cells that were newly revealed.
    pub fn reveal(&mut self, x: usize, y: usize) -> usize {
        let mut opened = 0;
        let mut stack = vec![(x, y)];
        while let Some((cx, cy)) = stack.pop() {
            if !self.in_bounds(cx, cy) {
                continue;
            }
            let idx = self.index(cx, cy);
            let cell = &mut self.cells[idx];
            // the revealed flag doubles as the visited set
            if cell.revealed || cell.flagged {
                continue;
            }
            cell.revealed = true;
            opened += 1;
            if cell.adj == 0 && !cell.mine {
                stack.extend(self.neighborhood(cx, cy));
            }
        }
        opened
    }

    /// Toggle the flag on an unrevealed cell
    /// Returns true if the flag state changed
    pub fn toggle_flag(&mut self, x: usize, y: usize) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        if cell.revealed {
            return false;
        }
        cell.flagged = !cell.flagged;
        true
    }

    /// Check if all non-mine cells have been revealed (win condition)
    pub fn check_win(&self) -> bool {
        self.cells.iter().all(|c| c.mine || c.revealed)
    }

    pub fn flag_count(&self) -> usize {
        self.cells.iter().filter(|c| c.flagged).count()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.revealed).count()
    }

    /// Mine counter display value (total mines - flagged cells)
    /// Can be negative if player places too many flags
    pub fn remaining_mines(&self) -> isize {
        self.mines as isize - self.flag_count() as isize
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Build a numbered board with mines at the given coordinates
    pub(crate) fn layout(size: usize, mines: &[(usize, usize)]) -> Board {
        let mut board = Board::new(size, mines.len());
        for &(x, y) in mines {
            let idx = board.index(x, y);
            board.cells[idx].mine = true;
        }
        board.calculate_numbers();
        board
    }

    /// Count mines around (x, y) the slow way, with signed offsets
    fn brute_adjacent(board: &Board, x: usize, y: usize) -> u8 {
        let n = board.size() as i64;
        let mut count = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if nx >= 0 && ny >= 0 && nx < n && ny < n {
                    if board.cell(nx as usize, ny as usize).unwrap().mine {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    #[test]
    fn place_mines_places_exact_count() {
        for &(size, mines) in &[(2, 3), (5, 1), (10, 15), (10, 99), (16, 40)] {
            let mut rng = StdRng::seed_from_u64(7);
            let board = Board::generate(size, mines, &mut rng);
            let placed = board.cells.iter().filter(|c| c.mine).count();
            assert_eq!(placed, mines, "size {size}");
            assert_eq!(board.mine_count(), mines);
        }
    }

    #[test]
    fn too_many_mines_are_clamped() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::generate(3, 50, &mut rng);
        assert_eq!(board.mine_count(), 8);
        assert_eq!(board.cells.iter().filter(|c| !c.mine).count(), 1);
    }

    #[test]
    fn same_seed_same_board() {
        let a = Board::generate(10, 15, &mut StdRng::seed_from_u64(42));
        let b = Board::generate(10, 15, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.cells, b.cells);
    }

    #[test]
    fn numbers_match_neighbor_mines() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = Board::generate(10, 30, &mut rng);
        for y in 0..10 {
            for x in 0..10 {
                let cell = board.cell(x, y).unwrap();
                if !cell.mine {
                    assert_eq!(cell.adj, brute_adjacent(&board, x, y), "at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn numbers_clip_at_edges() {
        let board = layout(3, &[(0, 0), (2, 2)]);
        assert_eq!(board.cell(1, 1).unwrap().adj, 2);
        assert_eq!(board.cell(1, 0).unwrap().adj, 1);
        assert_eq!(board.cell(2, 0).unwrap().adj, 0);
        assert_eq!(board.cell(0, 2).unwrap().adj, 0);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut board = layout(4, &[(3, 3)]);
        let first = board.reveal(2, 2);
        let snapshot = board.cells.clone();
        assert_eq!(first, 1);
        assert_eq!(board.reveal(2, 2), 0);
        assert_eq!(board.cells, snapshot);
    }

    #[test]
    fn reveal_out_of_bounds_is_noop() {
        let mut board = layout(4, &[(3, 3)]);
        assert_eq!(board.reveal(4, 0), 0);
        assert_eq!(board.reveal(0, 17), 0);
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn flood_fill_opens_zero_region_and_border() {
        // mines in the right column; column 3 is numbered, columns 0..=2 are zero
        let mines = [(4, 0), (4, 1), (4, 2), (4, 3), (4, 4)];
        let mut board = layout(5, &mines);
        let opened = board.reveal(0, 0);
        assert_eq!(opened, 20);
        for y in 0..5 {
            for x in 0..5 {
                let cell = board.cell(x, y).unwrap();
                assert_eq!(cell.revealed, x < 4, "at ({x}, {y})");
            }
        }
        assert!(board.check_win());
    }

    #[test]
    fn flood_fill_never_reveals_mines() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mut board = Board::generate(10, 15, &mut rng);
            let zero = (0..10)
                .flat_map(|y| (0..10).map(move |x| (x, y)))
                .find(|&(x, y)| {
                    let c = board.cell(x, y).unwrap();
                    !c.mine && c.adj == 0
                });
            if let Some((x, y)) = zero {
                board.reveal(x, y);
                assert!(board.cells.iter().all(|c| !(c.mine && c.revealed)));
                // every revealed zero cell has all its neighbors revealed
                for cy in 0..10 {
                    for cx in 0..10 {
                        let c = *board.cell(cx, cy).unwrap();
                        if c.revealed && c.adj == 0 {
                            assert!(board.neighborhood(cx, cy).all(|(ox, oy)| board.cell(ox, oy).unwrap().revealed));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn flood_fill_stops_at_flags() {
        let mut board = layout(3, &[]);
        assert!(board.toggle_flag(2, 2));
        let opened = board.reveal(0, 0);
        assert_eq!(opened, 8);
        let corner = board.cell(2, 2).unwrap();
        assert!(corner.flagged && !corner.revealed);
        assert!(!board.check_win());
    }

    #[test]
    fn reveal_on_mine_sets_revealed() {
        let mut board = layout(3, &[(1, 1)]);
        assert_eq!(board.reveal(1, 1), 1);
        assert!(board.cell(1, 1).unwrap().revealed);
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut board = layout(3, &[(0, 0)]);
        board.toggle_flag(1, 1);
        assert_eq!(board.reveal(1, 1), 0);
        assert!(!board.cell(1, 1).unwrap().revealed);
        board.toggle_flag(1, 1);
        assert_eq!(board.reveal(1, 1), 1);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut board = layout(3, &[(0, 0)]);
        board.reveal(1, 1);
        assert!(!board.toggle_flag(1, 1));
        assert!(!board.cell(1, 1).unwrap().flagged);
        assert!(!board.toggle_flag(5, 5));
    }

    #[test]
    fn win_ignores_flags_and_revealed_mines() {
        let mut board = layout(3, &[(0, 0)]);
        board.toggle_flag(0, 0);
        assert!(!board.check_win());
        assert_eq!(board.reveal(2, 2), 8);
        assert!(board.check_win());

        let mut board = layout(3, &[(0, 0)]);
        board.reveal(0, 0);
        assert!(!board.check_win());
        board.reveal(2, 2);
        assert!(board.check_win());
    }

    #[test]
    fn remaining_mines_can_go_negative() {
        let mut board = layout(3, &[(0, 0)]);
        board.toggle_flag(1, 1);
        board.toggle_flag(2, 2);
        assert_eq!(board.flag_count(), 2);
        assert_eq!(board.remaining_mines(), -1);
    }
}
