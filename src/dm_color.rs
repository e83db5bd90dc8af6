use ratatui::style::Color;
use term_color_support::ColorSupport;
use tracing::warn;

/// Terminal color capability, detected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    TrueColor,
    Indexed,
    Basic,
}

impl Depth {
    pub fn detect() -> Depth {
        let support = ColorSupport::stdout();
        if support.has_16m {
            Depth::TrueColor
        } else if support.has_256 {
            Depth::Indexed
        } else {
            warn!("terminal has no 256-color support, using basic ANSI colors");
            Depth::Basic
        }
    }
}

/// One palette entry: exact RGB, a stable 256-color index and a 16-color fallback
#[derive(Clone, Copy)]
struct Swatch((u8, u8, u8), u8, Color);

impl Swatch {
    fn pick(&self, depth: Depth) -> Color {
        let Swatch((r, g, b), index256, basic) = *self;
        match depth {
            Depth::TrueColor => Color::Rgb(r, g, b),
            Depth::Indexed => Color::Indexed(index256),
            Depth::Basic => basic,
        }
    }
}

const BACKGROUND: Swatch = Swatch((200, 200, 200), 251, Color::Gray);
const HIDDEN: Swatch = Swatch((100, 100, 100), 241, Color::DarkGray);
const FLAGGED: Swatch = Swatch((0, 0, 255), 21, Color::Blue);
const OPENED: Swatch = Swatch((150, 150, 150), 246, Color::Gray);
const MINE: Swatch = Swatch((255, 0, 0), 196, Color::Red);
const NUMBER: Swatch = Swatch((0, 0, 255), 21, Color::Blue);
const INK: Swatch = Swatch((0, 0, 0), 16, Color::Black);
const PAPER: Swatch = Swatch((255, 255, 255), 231, Color::White);
const BUTTON: Swatch = Swatch((180, 180, 180), 249, Color::Gray);

/// Board colors resolved for the current terminal
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color, // Board background
    pub hidden: Color,     // Unrevealed cell
    pub flagged: Color,    // Flagged cell
    pub opened: Color,     // Revealed safe cell
    pub mine: Color,       // Revealed mine
    pub number: Color,     // Adjacent mine digits
    pub ink: Color,        // Text on light backgrounds
    pub paper: Color,      // Menu screen background
    pub button: Color,     // Restart control face
}

impl Palette {
    pub fn new(depth: Depth) -> Palette {
        Palette {
            background: BACKGROUND.pick(depth),
            hidden: HIDDEN.pick(depth),
            flagged: FLAGGED.pick(depth),
            opened: OPENED.pick(depth),
            mine: MINE.pick(depth),
            number: NUMBER.pick(depth),
            ink: INK.pick(depth),
            paper: PAPER.pick(depth),
            button: BUTTON.pick(depth),
        }
    }
}
