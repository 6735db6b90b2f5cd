use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::StdRng;
use ratatui::{layout::Rect, style::Style, widgets::Block, Frame};

use crate::config::Config;
use crate::console::{Interpreter, VisibilityEvent};
use crate::keys::matches_any;
use crate::loader::LoadingScreen;
use crate::theme::Theme;
use crate::ui;

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub enum Screen {
    Loading(LoadingScreen),
    Home,
}

pub struct App {
    config: Config,
    theme: Theme,
    screen: Screen,
    console: Interpreter,
    loaded: Rc<Cell<bool>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, console: Interpreter, loader_rng: StdRng) -> Self {
        let loaded = Rc::new(Cell::new(false));
        let flag = Rc::clone(&loaded);
        let loading = LoadingScreen::new(&config.loader, loader_rng, move || flag.set(true));

        Self {
            theme: Theme::from_config(&config.colors),
            screen: Screen::Loading(loading),
            console,
            loaded,
            should_quit: false,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Loading(_))
    }

    pub fn console(&self) -> &Interpreter {
        &self.console
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Advances every clock-driven part of the app by `delta`.
    pub fn update(&mut self, delta: Duration) {
        if let Screen::Loading(loading) = &mut self.screen {
            loading.update(delta);
            if self.loaded.get() {
                loading.cancel();
                self.screen = Screen::Home;
            }
        }
        self.console.advance(delta);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let keys = &self.config.keys;

        if matches_any(&keys.force_quit, &key) {
            self.should_quit = true;
            return;
        }
        if matches_any(&keys.toggle, &key) {
            self.console.handle(VisibilityEvent::Toggle);
            return;
        }

        if !self.console.is_visible() {
            if matches_any(&keys.quit, &key) {
                self.should_quit = true;
            }
            return;
        }

        if matches_any(&keys.close, &key) {
            self.console.handle(VisibilityEvent::Escape);
        } else if matches_any(&keys.history_up, &key) {
            self.console.recall_previous();
        } else if matches_any(&keys.history_down, &key) {
            self.console.recall_next();
        } else if matches_any(&keys.submit, &key) {
            self.console.submit_input();
        } else {
            match key.code {
                KeyCode::Backspace => self.console.backspace(),
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.console.insert_char(c)
                }
                _ => {}
            }
        }
    }

    /// Pointer presses close the terminal when they land outside it or on
    /// its close button. `screen` is the full drawing area.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, screen: Rect) {
        if !self.console.is_visible() {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let layout = ui::console_layout(screen, &self.config.console);
            let event = if layout.on_close_button(mouse.column, mouse.row) {
                VisibilityEvent::CloseButton
            } else if layout.contains(mouse.column, mouse.row) {
                VisibilityEvent::ClickInside
            } else {
                VisibilityEvent::ClickOutside
            };
            self.console.handle(event);
        }
    }
}

// ============================================================================
// UI RENDERING
// ============================================================================

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();
    let config = &app.config;
    let theme = &app.theme;

    f.render_widget(Block::default().style(Style::default().bg(theme.background)), size);

    match &app.screen {
        Screen::Loading(loading) => ui::render_loader(f, size, loading, &config.loader, theme),
        Screen::Home => ui::render_home(f, size, &config.profile, &config.keys, theme),
    }

    if app.console.is_visible() {
        let layout = ui::console_layout(size, &config.console);
        ui::render_console(f, &layout, &app.console, &config.console, theme);
    }

    ui::render_dance(f, size, app.console.overlay(), theme);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{overlay, AudioPlayer};
    use crate::error::Result;
    use rand::SeedableRng;

    struct Mute;

    impl AudioPlayer for Mute {
        fn play(&mut self) -> Result<()> {
            Ok(())
        }
        fn is_playing(&mut self) -> bool {
            false
        }
        fn stop(&mut self) {}
    }

    fn app() -> App {
        let config = Config::default();
        let console = Interpreter::new(
            &config.profile,
            Interpreter::overlay_from_config(&config.console, overlay::builtin_frames()),
            Box::new(Mute),
            StdRng::seed_from_u64(0),
        );
        App::new(config, console, StdRng::seed_from_u64(1))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(app: &mut App, line: &str) {
        for c in line.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn switches_to_home_after_loading() {
        let mut app = app();
        assert!(app.is_loading());
        for _ in 0..10_000 {
            app.update(Duration::from_millis(16));
            if !app.is_loading() {
                break;
            }
        }
        assert!(!app.is_loading());
    }

    #[test]
    fn typing_goes_to_console_only_when_visible() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.console().input(), "");

        app.handle_key(key(KeyCode::Char('`')));
        assert!(app.console().is_visible());
        type_line(&mut app, "help");
        assert_eq!(app.console().results().len(), 1);
        assert_eq!(app.console().input(), "");
    }

    #[test]
    fn q_types_while_console_open_and_quits_when_closed() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('`')));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        assert_eq!(app.console().input(), "q");

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.console().is_visible());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('`')));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn arrows_recall_history() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('`')));
        type_line(&mut app, "fortune");
        type_line(&mut app, "credits");
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.console().input(), "fortune");
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.console().input(), "credits");
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.console().input(), "");
    }

    #[test]
    fn clicks_outside_or_on_close_hide_console() {
        let screen = Rect::new(0, 0, 100, 40);
        let mut app = app();

        app.handle_key(key(KeyCode::Char('`')));
        app.handle_mouse(click(50, 5), screen);
        assert!(app.console().is_visible());
        app.handle_mouse(click(50, 30), screen);
        assert!(!app.console().is_visible());

        app.handle_key(key(KeyCode::Char('`')));
        app.handle_mouse(click(77, 0), screen);
        assert!(!app.console().is_visible());
    }
}
