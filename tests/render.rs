//! Drawing the screens into ratatui's in-memory backend.

use std::time::Duration;

use folio::app::{draw, App};
use folio::config::{Config, ConsoleConfig, LoaderConfig};
use folio::console::{overlay, AudioPlayer, Interpreter};
use folio::loader::LoadingScreen;
use folio::theme::Theme;
use folio::ui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

struct Mute;

impl AudioPlayer for Mute {
    fn play(&mut self) -> folio::Result<()> {
        Ok(())
    }
    fn is_playing(&mut self) -> bool {
        false
    }
    fn stop(&mut self) {}
}

fn text_of(buffer: &Buffer) -> String {
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn interpreter(config: &Config) -> Interpreter {
    Interpreter::new(
        &config.profile,
        Interpreter::overlay_from_config(&config.console, overlay::builtin_frames()),
        Box::new(Mute),
        StdRng::seed_from_u64(11),
    )
}

#[test]
fn loading_screen_shows_title_and_percentage() {
    let config = LoaderConfig::default();
    let mut screen = LoadingScreen::new(&config, StdRng::seed_from_u64(2), || {});
    for _ in 0..30 {
        screen.update(Duration::from_millis(16));
    }

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal
        .draw(|f| ui::render_loader(f, f.area(), &screen, &config, &Theme::default()))
        .unwrap();

    let text = text_of(terminal.backend().buffer());
    assert!(text.contains("Loading Experience"));
    assert!(text.contains(&format!("{}%", screen.progress().percent())));
    // The ring leaves braille dots on the canvas.
    assert!(text.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
}

#[test]
fn tiny_area_draws_nothing() {
    let config = LoaderConfig::default();
    let mut screen = LoadingScreen::new(&config, StdRng::seed_from_u64(2), || {});
    screen.update(Duration::from_millis(16));

    let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
    terminal
        .draw(|f| {
            ui::render_ring(
                f,
                Rect::new(0, 0, 0, 0),
                &screen.render_state(),
                ui::parse_marker("braille"),
                &Theme::default(),
            )
        })
        .unwrap();

    assert!(text_of(terminal.backend().buffer()).trim().is_empty());
}

#[test]
fn console_shows_banner_results_and_prompt() {
    let config = Config::default();
    let mut console = interpreter(&config);
    console.submit("exit vim");
    console.submit("help");
    for c in "fort".chars() {
        console.insert_char(c);
    }

    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal
        .draw(|f| {
            let layout = ui::console_layout(f.area(), &config.console);
            ui::render_console(f, &layout, &console, &config.console, &Theme::default());
        })
        .unwrap();

    let text = text_of(terminal.backend().buffer());
    assert!(text.contains("Terminal"));
    assert!(text.contains("[x]"));
    assert!(text.contains("Welcome to the goofy aah terminal!"));
    assert!(text.contains("Cannot exit vim. You're stuck forever."));
    assert!(text.contains("Available commands:"));
    assert!(text.contains("$ fort"));
}

#[test]
fn console_scrolls_to_latest_result() {
    let config = Config {
        console: ConsoleConfig {
            height: 8,
            ..ConsoleConfig::default()
        },
        ..Config::default()
    };
    let mut console = interpreter(&config);
    for _ in 0..20 {
        console.submit("exit vim");
    }
    console.submit("credits");

    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal
        .draw(|f| {
            let layout = ui::console_layout(f.area(), &config.console);
            ui::render_console(f, &layout, &console, &config.console, &Theme::default());
        })
        .unwrap();

    let text = text_of(terminal.backend().buffer());
    assert!(text.contains("Inspired by my nerdy aah mind"));
    assert!(!text.contains("Welcome to the goofy aah terminal!"));
}

#[test]
fn wide_glyphs_do_not_clip_wrapped_results() {
    for seed in 0..6 {
        for screen_width in 40..=50 {
            let config = Config {
                console: ConsoleConfig {
                    width_percent: 100,
                    height: 24,
                    ..ConsoleConfig::default()
                },
                ..Config::default()
            };
            let mut console = Interpreter::new(
                &config.profile,
                Interpreter::overlay_from_config(&config.console, overlay::builtin_frames()),
                Box::new(Mute),
                StdRng::seed_from_u64(seed),
            );
            console.submit("fortune");
            let fortune = console.results()[0].content.clone();
            assert!(fortune.starts_with('\u{1F52E}'));

            let mut terminal = Terminal::new(TestBackend::new(screen_width, 24)).unwrap();
            terminal
                .draw(|f| {
                    let layout = ui::console_layout(f.area(), &config.console);
                    ui::render_console(f, &layout, &console, &config.console, &Theme::default());
                })
                .unwrap();

            let text = text_of(terminal.backend().buffer());
            let rendered: Vec<&str> = text
                .split(|c: char| c.is_whitespace() || c == '\u{2502}')
                .collect();
            for word in fortune.split_whitespace() {
                assert!(
                    rendered.contains(&word),
                    "{word:?} clipped at width {screen_width}"
                );
            }
        }
    }
}

#[test]
fn dance_overlay_renders_then_disappears() {
    let config = Config::default();
    let mut app = App::new(config.clone(), interpreter(&config), StdRng::seed_from_u64(5));
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    app.handle_key(crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Char('`'),
        crossterm::event::KeyModifiers::NONE,
    ));
    for c in "act dance".chars() {
        app.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char(c),
            crossterm::event::KeyModifiers::NONE,
        ));
    }
    app.handle_key(crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Enter,
        crossterm::event::KeyModifiers::NONE,
    ));

    terminal.draw(|f| draw(f, &app)).unwrap();
    assert!(text_of(terminal.backend().buffer()).contains("\\o/"));

    app.update(Duration::from_millis(5000));
    terminal.draw(|f| draw(f, &app)).unwrap();
    let text = text_of(terminal.backend().buffer());
    assert!(!text.contains("\\o/"));
    assert!(text.contains("Dance party initiated!"));
}

#[test]
fn home_screen_after_loading() {
    let config = Config::default();
    let mut app = App::new(config.clone(), interpreter(&config), StdRng::seed_from_u64(8));
    while app.is_loading() {
        app.update(Duration::from_millis(100));
    }

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| draw(f, &app)).unwrap();
    let text = text_of(terminal.backend().buffer());
    assert!(text.contains("Hi, I'm Fady Damak"));
    assert!(!text.contains("Loading Experience"));
}
