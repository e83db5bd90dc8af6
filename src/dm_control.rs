// Interaction controller: maps clicks on the board surface to board operations
// Drives the menu/playing session state machine

use rand::Rng;
use tracing::{debug, info, trace};

use crate::dm_board::Board;

/// Coarse session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
}

/// Mouse button kind carried by a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

/// How the previous game ended, shown on the menu screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// What a click did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickEffect {
    Started,
    Restarted,
    Revealed(usize),
    Flagged,
    Unflagged,
    Lost,
    Won,
    Ignored,
}

/// Layout of the clickable surface: the grid followed by a control bar
/// All values are in surface units (pixels for a window, characters for a terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub cell_w: i32,                 // Width of one cell
    pub cell_h: i32,                 // Height of one cell
    pub bar_h: i32,                  // Height of the control bar below the grid
    pub restart_center: (i32, i32),  // Center of the circular restart control
    pub restart_radius: i32,
}

impl Geometry {
    /// Window layout: 40 px cells, 50 px bar, restart circle in the bar's left corner
    /// Reference layout for a pixel surface; the terminal UI uses `terminal`
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pixels(size: usize) -> Self {
        let n = size as i32;
        Geometry {
            cell_w: 40,
            cell_h: 40,
            bar_h: 50,
            restart_center: (25, n * 40 + 25),
            restart_radius: 20,
        }
    }

    /// Terminal layout: each cell is two columns by one row, one-row control bar
    pub fn terminal(size: usize) -> Self {
        Geometry {
            cell_w: 2,
            cell_h: 1,
            bar_h: 1,
            restart_center: (1, size as i32),
            restart_radius: 1,
        }
    }

    /// Total surface size (width, height) for a grid of `size` cells per side
    pub fn surface_size(&self, size: usize) -> (i32, i32) {
        let n = size as i32;
        (n * self.cell_w, n * self.cell_h + self.bar_h)
    }

    /// True if (x, y) falls inside the restart control
    pub fn hits_restart(&self, x: i32, y: i32) -> bool {
        let dx = (x - self.restart_center.0) as i64;
        let dy = (y - self.restart_center.1) as i64;
        let r = self.restart_radius as i64;
        dx * dx + dy * dy <= r * r
    }

    /// Map a surface point to grid indices; None when outside the grid
    pub fn cell_at(&self, x: i32, y: i32, size: usize) -> Option<(usize, usize)> {
        let cx = x.div_euclid(self.cell_w);
        let cy = y.div_euclid(self.cell_h);
        let n = size as i32;
        if (0..n).contains(&cx) && (0..n).contains(&cy) {
            Some((cx as usize, cy as usize))
        } else {
            None
        }
    }
}

/// The single active game: board, mode and random source
pub struct Session<R: Rng> {
    board: Board,
    mode: Mode,
    last_outcome: Option<Outcome>,
    rng: R,
    size: usize,
    mines: usize,
}

impl<R: Rng> Session<R> {
    /// Start in the menu with a board already generated (it is replaced on first click)
    pub fn new(size: usize, mines: usize, mut rng: R) -> Self {
        let board = Board::generate(size, mines, &mut rng);
        Session {
            board,
            mode: Mode::Menu,
            last_outcome: None,
            rng,
            size,
            mines,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Replace the board with a freshly generated one and enter play
    pub fn reset(&mut self) {
        self.board = Board::generate(self.size, self.mines, &mut self.rng);
        self.mode = Mode::Playing;
        info!(size = self.size, mines = self.board.mine_count(), "new board");
    }

    /// Apply a click at surface point (x, y)
    pub fn handle_click(&mut self, geometry: &Geometry, x: i32, y: i32, button: Button) -> ClickEffect {
        trace!(x, y, ?button, mode = ?self.mode, "click");
        match self.mode {
            Mode::Menu => {
                if button != Button::Primary {
                    return ClickEffect::Ignored;
                }
                self.reset();
                ClickEffect::Started
            }
            Mode::Playing => {
                let grid_h = self.size as i32 * geometry.cell_h;
                let (_, surface_h) = geometry.surface_size(self.size);
                let in_bar = (grid_h..surface_h).contains(&y);
                if button == Button::Primary && in_bar && geometry.hits_restart(x, y) {
                    self.reset();
                    return ClickEffect::Restarted;
                }
                match geometry.cell_at(x, y, self.size) {
                    Some((cx, cy)) => self.click_cell(cx, cy, button),
                    None => ClickEffect::Ignored,
                }
            }
        }
    }

    fn click_cell(&mut self, x: usize, y: usize, button: Button) -> ClickEffect {
        let Some(cell) = self.board.cell(x, y).copied() else {
            return ClickEffect::Ignored;
        };
        match button {
            Button::Secondary => {
                if !self.board.toggle_flag(x, y) {
                    return ClickEffect::Ignored;
                }
                debug!(x, y, flagged = !cell.flagged, "flag toggled");
                if cell.flagged { ClickEffect::Unflagged } else { ClickEffect::Flagged }
            }
            Button::Primary => {
                if cell.revealed || cell.flagged {
                    return ClickEffect::Ignored;
                }
                if cell.mine {
                    info!(x, y, "mine hit, game over");
                    self.mode = Mode::Menu;
                    self.last_outcome = Some(Outcome::Lost);
                    return ClickEffect::Lost;
                }
                let opened = self.board.reveal(x, y);
                debug!(x, y, opened, "revealed");
                if self.board.check_win() {
                    info!(revealed = self.board.revealed_count(), "all safe cells revealed, game won");
                    self.mode = Mode::Menu;
                    self.last_outcome = Some(Outcome::Won);
                    return ClickEffect::Won;
                }
                ClickEffect::Revealed(opened)
            }
        }
    }
}
