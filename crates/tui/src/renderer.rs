use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lamp_grid_core::LampStore;
use lamp_grid_core::model::{COLUMNS, ROWS};
use lamp_grid_core::views::{Metrics, Scene, SceneLayout, render_scene};
use lamp_grid_protocol::{
    Color, GlobalAction, RenderCommand, Swatch, ThemeToken, Viewport, hit_test,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color as TermColor, Style},
    widgets::Paragraph,
};

use crate::canvas::{Canvas, ROW_UNITS, cell_at, cell_center, theme_color};

/// Longest wait between event polls while nothing is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

const KEY_HELP: &str =
    "←↑↓→ move  ⏎ toggle  b/d/r/x global  1-0 color  esc close  q quit";

fn term_color(c: Color) -> TermColor {
    let (r, g, b) = c.to_rgb8();
    TermColor::Rgb(r, g, b)
}

/// Terminal front end: owns the store plus the keyboard cursor.
pub struct TerminalApp {
    store: LampStore,
    cursor: (u32, u32),
    cache: Option<(u64, (u16, u16), Vec<RenderCommand>)>,
    quit: bool,
}

impl TerminalApp {
    pub fn new(store: LampStore) -> Self {
        Self {
            store,
            cursor: (COLUMNS / 2, ROWS / 2),
            cache: None,
            quit: false,
        }
    }

    pub fn store(&self) -> &LampStore {
        &self.store
    }

    pub fn cursor_id(&self) -> u32 {
        self.cursor.1 * COLUMNS + self.cursor.0
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn viewport(width: u16, height: u16) -> Viewport {
        Viewport::new(f64::from(width), f64::from(height) * ROW_UNITS)
    }

    /// Render commands for a canvas of `width` x `height` cells, rebuilt
    /// only when the store revision or the size changes.
    pub fn commands(&mut self, width: u16, height: u16) -> &[RenderCommand] {
        let revision = self.store.revision();
        let stale = !matches!(
            &self.cache,
            Some((rev, size, _)) if *rev == revision && *size == (width, height)
        );
        if stale {
            let cmds = render_scene(
                &Scene::of(&self.store),
                &Self::viewport(width, height),
                Metrics::CELLS,
            );
            self.cache = Some((revision, (width, height), cmds));
        }
        match &self.cache {
            Some((_, _, cmds)) => cmds,
            None => &[],
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let (col, row) = self.cursor;
        match code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Left => self.cursor.0 = col.saturating_sub(1),
            KeyCode::Right => self.cursor.0 = (col + 1).min(COLUMNS - 1),
            KeyCode::Up => self.cursor.1 = row.saturating_sub(1),
            KeyCode::Down => self.cursor.1 = (row + 1).min(ROWS - 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.store.toggle_lamp(self.cursor_id());
            }
            KeyCode::Esc => {
                self.store.hide_picker();
            }
            KeyCode::Char('b') => self.store.apply_global(GlobalAction::Brighten),
            KeyCode::Char('d') => self.store.apply_global(GlobalAction::Dim),
            KeyCode::Char('r') => self.store.apply_global(GlobalAction::Randomize),
            KeyCode::Char('x') => self.store.apply_global(GlobalAction::Reset),
            KeyCode::Char(c @ '0'..='9') => {
                // '1' is the first swatch, '0' the tenth.
                let index = c.to_digit(10).map_or(0, |d| (d as usize + 9) % 10);
                if let Some(swatch) = Swatch::from_index(index) {
                    self.store.set_selected_color(swatch);
                }
            }
            _ => {}
        }
    }

    /// Left click at a terminal cell inside a canvas of the given size.
    pub fn handle_click(&mut self, col: u16, row: u16, width: u16, height: u16) {
        let p = cell_center(col, row);
        let target = hit_test(self.commands(width, height), p);
        match target {
            Some(target) => {
                tracing::debug!(?target, col, row, "click");
                self.store.dispatch(target);
            }
            None => tracing::debug!(col, row, "click missed"),
        }
    }

    fn paint_cursor(&self, canvas: &mut Canvas) {
        let layout = SceneLayout::new(
            &Self::viewport(canvas.width(), canvas.height()),
            Metrics::CELLS,
        );
        let Some(lamp) = self.store.lamps().get(self.cursor_id()) else {
            return;
        };
        let (col, row) = cell_at(layout.lamp_center(lamp));
        let reach = layout.lamp_radius(lamp).floor() as i64 + 1;
        let fg = theme_color(ThemeToken::SelectionHighlight);
        canvas.put_str(col - reach, row, "[", fg);
        canvas.put_str(col + reach, row, "]", fg);
    }

    fn status_line(&self) -> String {
        let stats = self.store.stats();
        let saving = if self.store.pending_persist_ms().is_some() {
            "  saving…"
        } else {
            ""
        };
        format!(
            " {}/{} lit  mean {:.2}{saving}  │ {KEY_HELP}",
            stats.active, stats.total, stats.mean_intensity
        )
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let height = area.height.saturating_sub(1);
        let mut canvas = Canvas::new(area.width, height);
        canvas.paint(self.commands(area.width, height));
        self.paint_cursor(&mut canvas);

        let buf = frame.buffer_mut();
        for row in 0..canvas.height() {
            for col in 0..canvas.width() {
                if let Some(cell) = canvas.get(col, row) {
                    buf[(area.x + col, area.y + row)]
                        .set_char(cell.ch)
                        .set_fg(term_color(cell.fg))
                        .set_bg(term_color(cell.bg));
                }
            }
        }

        let status = Paragraph::new(self.status_line()).style(
            Style::default()
                .fg(term_color(theme_color(ThemeToken::ToolbarText)))
                .bg(term_color(theme_color(ThemeToken::ToolbarBackground))),
        );
        frame.render_widget(status, Rect::new(area.x, area.y + height, area.width, 1));
    }
}

/// Run the interactive terminal session until the user quits. Pending
/// state is flushed before returning.
pub fn run(store: LampStore) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = TerminalApp::new(store);
    let result = event_loop(&mut terminal, &mut app);
    app.store.flush();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut TerminalApp,
) -> Result<()> {
    while !app.should_quit() {
        app.store.poll();
        terminal.draw(|frame| app.draw(frame))?;

        let wait = app
            .store
            .pending_persist_ms()
            .map_or(IDLE_POLL, |ms| Duration::from_millis(ms).min(IDLE_POLL));
        if !event::poll(wait)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = terminal.size()?;
                app.handle_click(
                    mouse.column,
                    mouse.row,
                    size.width,
                    size.height.saturating_sub(1),
                );
            }
            _ => {}
        }
    }
    Ok(())
}
