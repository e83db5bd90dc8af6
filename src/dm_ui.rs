// Terminal UI: rendering of the menu and board, mouse/keyboard event handling

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use rand::Rng;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::io;
use std::time::Duration;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::dm_board::{Board, Cell};
use crate::dm_color::{Depth, Palette};
use crate::dm_config::Config;
use crate::dm_control::{Button, ClickEffect, Geometry, Mode, Outcome, Session};
use crate::dm_lang::{Assets, Lang};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Glyphs used to draw cells and the restart control
struct Glyphs {
    hidden: &'static str,
    flag: &'static str,
    mine: &'static str,
    restart: &'static str,
}

impl Glyphs {
    fn new(ascii: bool) -> Self {
        Glyphs {
            hidden: if ascii { "#" } else { "■" },
            flag: if ascii { "F" } else { "⚑" },
            mine: if ascii { "*" } else { "☼" },
            restart: if ascii { "(R)" } else { "(↻)" },
        }
    }
}

/// Set up the terminal, run the game loop and always restore the terminal afterwards
pub fn run<R: Rng>(session: &mut Session<R>, cfg: &Config, lang: &Lang) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnableMouseCapture, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, session, cfg, lang);

    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), DisableMouseCapture, terminal::LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

fn event_loop<B: Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    session: &mut Session<R>,
    cfg: &Config,
    lang: &Lang,
) -> io::Result<()> {
    let geometry = Geometry::terminal(cfg.size);
    let palette = Palette::new(Depth::detect());
    let glyphs = Glyphs::new(cfg.ascii_icons);
    let assets = &lang.assets;

    // top-left corner of the grid on screen, updated every frame
    let mut origin: Option<(u16, u16)> = None;

    loop {
        terminal.draw(|f| {
            origin = match session.mode() {
                Mode::Menu => {
                    draw_menu(f, session.last_outcome(), assets, &palette);
                    None
                }
                Mode::Playing => draw_game(f, session.board(), &geometry, assets, &palette, &glyphs),
            };
        })?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => match code {
                    KeyCode::Esc | KeyCode::Char('q') => break,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break,
                    _ => {}
                },
                Event::Mouse(me) => {
                    let button = match me.kind {
                        MouseEventKind::Down(MouseButton::Left) => Button::Primary,
                        MouseEventKind::Down(MouseButton::Right) => Button::Secondary,
                        _ => continue,
                    };
                    // the menu accepts a click anywhere; in play, points are relative to the grid
                    let (x, y) = match (session.mode(), origin) {
                        (Mode::Menu, _) => (me.column as i32, me.row as i32),
                        (Mode::Playing, Some((ox, oy))) => (me.column as i32 - ox as i32, me.row as i32 - oy as i32),
                        // board hidden behind the resize warning
                        (Mode::Playing, None) => continue,
                    };
                    let effect = session.handle_click(&geometry, x, y, button);
                    if effect != ClickEffect::Ignored {
                        debug!(?effect, "click handled");
                    }
                }
                _ => {}
            }
        }
    }

    info!("quit requested");
    Ok(())
}

/// Menu screen: start prompt plus the result of the previous game
fn draw_menu<B: Backend>(f: &mut Frame<B>, outcome: Option<Outcome>, assets: &Assets, palette: &Palette) {
    let size = f.size();
    let style = Style::default().bg(palette.paper).fg(palette.ink);
    f.render_widget(Block::default().style(style), size);

    let mut lines = vec![Spans::from(Span::styled(assets.title, style.add_modifier(Modifier::BOLD))), Spans::from("")];
    match outcome {
        Some(Outcome::Won) => lines.push(Spans::from(Span::styled(assets.menu_won, style.fg(palette.flagged)))),
        Some(Outcome::Lost) => lines.push(Spans::from(Span::styled(assets.menu_lost, style.fg(palette.mine)))),
        None => {}
    }
    lines.push(Spans::from(Span::styled(assets.menu_start, style)));

    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let area = center_rect(width.min(size.width), (lines.len() as u16).min(size.height), size);
    let text = Paragraph::new(Text::from(lines)).style(style).alignment(Alignment::Center);
    f.render_widget(text, area);
}

/// Playing screen: board with the restart control below it and a status bar
/// Returns the screen position of the grid's top-left cell
fn draw_game<B: Backend>(
    f: &mut Frame<B>,
    board: &Board,
    geometry: &Geometry,
    assets: &Assets,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Option<(u16, u16)> {
    let size = f.size();
    let (surface_w, surface_h) = geometry.surface_size(board.size());
    // one padding column on the right, plus borders
    let board_w = surface_w as u16 + 3;
    let board_h = surface_h as u16 + 2;
    let min_twidth = board_w.max(30);
    let min_theight = board_h + 3;

    // If terminal too small, render a centered warning and skip normal UI
    if size.width < min_twidth || size.height < min_theight {
        let warn_lines = vec![
            Spans::from(Span::raw(assets.tsmsg_line1)),
            Spans::from(Span::raw(Lang::fill(assets.tsmsg_line2_fmt, format!("{} x {}", min_twidth, min_theight)))),
        ];
        let warn = Paragraph::new(Text::from(warn_lines))
            .block(Block::default().borders(Borders::ALL).title(assets.tsmsg_title))
            .alignment(Alignment::Center);
        f.render_widget(Clear, size);
        let area = center_rect(36u16.min(size.width), 4u16.min(size.height), size);
        f.render_widget(warn, area);
        return None;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(board_h), Constraint::Length(3)].as_ref())
        .split(size);

    // grid rows followed by the control bar row
    let bg = Style::default().bg(palette.background);
    let mut lines = vec![];
    for y in 0..board.size() {
        let mut spans = vec![];
        for x in 0..board.size() {
            if let Some(cell) = board.cell(x, y) {
                let (s, style) = cell_face(cell, palette, glyphs);
                spans.push(Span::styled(format!(" {}", s), style));
            }
        }
        spans.push(Span::styled(" ", bg));
        lines.push(Spans::from(spans));
    }
    let button_style = Style::default().bg(palette.button).fg(palette.ink).add_modifier(Modifier::BOLD);
    let pad = (surface_w as usize + 1).saturating_sub(glyphs.restart.width() + 1 + assets.status_restart.width());
    lines.push(Spans::from(vec![
        Span::styled(glyphs.restart, button_style),
        Span::styled(format!(" {}{}", assets.status_restart, " ".repeat(pad)), bg.fg(palette.ink)),
    ]));

    let board_area = center_rect(board_w, board_h, chunks[0]);
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(assets.title).title_alignment(Alignment::Center))
        .style(bg)
        .alignment(Alignment::Left);
    f.render_widget(paragraph, board_area);

    // status row (left info + right-aligned exit hint)
    let left_text = format!(" {} ", Lang::fill(assets.status_mines_fmt, board.remaining_mines()));
    let inner_w = chunks[1].width.saturating_sub(2) as usize;
    let right_w = assets.status_quit.width() + 1;
    let mid_spaces = inner_w.saturating_sub(left_text.width() + right_w).max(1);
    let status = Paragraph::new(Spans::from(vec![
        Span::raw(left_text),
        Span::raw(" ".repeat(mid_spaces)),
        Span::styled(assets.status_quit, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    Some((board_area.x + 1, board_area.y + 1))
}

/// Text and style for one cell (the leading space is added by the caller)
fn cell_face(cell: &Cell, palette: &Palette, glyphs: &Glyphs) -> (String, Style) {
    let style = Style::default();
    if cell.revealed {
        if cell.mine {
            (glyphs.mine.to_string(), style.bg(palette.mine).fg(palette.ink))
        } else if cell.adj > 0 {
            (cell.adj.to_string(), style.bg(palette.opened).fg(palette.number).add_modifier(Modifier::BOLD))
        } else {
            (" ".to_string(), style.bg(palette.opened))
        }
    } else if cell.flagged {
        (glyphs.flag.to_string(), style.bg(palette.flagged).fg(palette.paper))
    } else {
        (glyphs.hidden.to_string(), style.bg(palette.hidden).fg(palette.background))
    }
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_faces() {
        let palette = Palette::new(Depth::TrueColor);
        let glyphs = Glyphs::new(true);
        let hidden = Cell::default();
        assert_eq!(cell_face(&hidden, &palette, &glyphs).0, "#");
        let flagged = Cell { flagged: true, ..Cell::default() };
        assert_eq!(cell_face(&flagged, &palette, &glyphs).0, "F");
        let three = Cell { revealed: true, adj: 3, ..Cell::default() };
        assert_eq!(cell_face(&three, &palette, &glyphs).0, "3");
        let zero = Cell { revealed: true, ..Cell::default() };
        assert_eq!(cell_face(&zero, &palette, &glyphs).0, " ");
        let mine = Cell { revealed: true, mine: true, ..Cell::default() };
        let (s, style) = cell_face(&mine, &palette, &glyphs);
        assert_eq!(s, "*");
        assert_eq!(style.bg, Some(palette.mine));
    }

    #[test]
    fn drawn_board_origin_maps_clicks_to_cells() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;
        use ratatui::backend::TestBackend;

        let geometry = Geometry::terminal(10);
        let palette = Palette::new(Depth::TrueColor);
        let glyphs = Glyphs::new(true);
        let assets = Lang::new("en").assets;
        let mut session = Session::new(10, 15, StdRng::seed_from_u64(9));
        assert_eq!(session.handle_click(&geometry, 0, 0, Button::Primary), ClickEffect::Started);

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        let mut origin = None;
        terminal
            .draw(|f| origin = draw_game(f, session.board(), &geometry, &assets, &palette, &glyphs))
            .unwrap();
        let (ox, oy) = origin.expect("board fits the terminal");
        let buffer = terminal.backend().buffer();

        // second column of cell (5, 4) carries its glyph
        let (col, row) = (ox + 11, oy + 4);
        let face = cell_face(session.board().cell(5, 4).unwrap(), &palette, &glyphs).0;
        assert_eq!(buffer.get(col, row).symbol, face);
        let (x, y) = (col as i32 - ox as i32, row as i32 - oy as i32);
        assert_eq!(geometry.cell_at(x, y, 10), Some((5, 4)));

        // the restart button occupies the three columns under the grid
        let button: String = (0..3).map(|dx| buffer.get(ox + dx, oy + 10).symbol.clone()).collect();
        assert_eq!(button, "(R)");
        for dx in 0..3 {
            assert!(geometry.hits_restart(dx as i32, 10));
        }
        assert_eq!(session.handle_click(&geometry, 2, 10, Button::Primary), ClickEffect::Restarted);
    }

    #[test]
    fn small_terminal_hides_board() {
        use ratatui::backend::TestBackend;

        let board = crate::dm_board::Board::new(10, 15);
        let assets = Lang::new("en").assets;
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        let mut origin = Some((0, 0));
        terminal
            .draw(|f| {
                origin = draw_game(f, &board, &Geometry::terminal(10), &assets, &Palette::new(Depth::Basic), &Glyphs::new(false))
            })
            .unwrap();
        assert_eq!(origin, None);
    }

    #[test]
    fn center_rect_clamps_to_area() {
        let r = center_rect(10, 4, Rect::new(0, 0, 20, 10));
        assert_eq!(r, Rect::new(5, 3, 10, 4));
        let r = center_rect(50, 50, Rect::new(2, 2, 20, 10));
        assert_eq!(r, Rect::new(2, 2, 20, 10));
    }
}
