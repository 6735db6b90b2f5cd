use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        block::Title,
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Block, Borders, Clear, Gauge, Padding, Paragraph,
    },
    Frame,
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::{ConsoleConfig, KeyConfig, LoaderConfig, ProfileConfig};
use crate::console::{DanceOverlay, Interpreter, ResultKind, BANNER};
use crate::loader::{LoadingScreen, RenderState, Surface};
use crate::theme::{fade, mix, Theme};

const CLOSE_BUTTON: &str = "[x]";

pub fn parse_marker(marker: &str) -> Marker {
    match marker.to_lowercase().as_str() {
        "dot" => Marker::Dot,
        "block" => Marker::Block,
        "halfblock" | "half-block" => Marker::HalfBlock,
        _ => Marker::Braille,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// One full-width row of `area` at `y`, if it fits.
fn row(area: Rect, y: u16) -> Option<Rect> {
    (y >= area.y && y < area.bottom()).then(|| Rect {
        x: area.x,
        y,
        width: area.width,
        height: 1,
    })
}

// ============================================================================
// LOADING SCREEN
// ============================================================================

/// Terminal rows the ring asks for; denser surfaces get more rows.
pub fn canvas_rows(surface: &Surface) -> u16 {
    ((surface.device_size() / 20.0).round() as u16).max(1)
}

pub fn render_loader(
    f: &mut Frame,
    area: Rect,
    screen: &LoadingScreen,
    config: &LoaderConfig,
    theme: &Theme,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let state = screen.render_state();
    // gap, title, gauge, percentage
    let text_rows = 4;
    let rows = canvas_rows(&state.surface)
        .min(area.height.saturating_sub(text_rows))
        .min(area.width / 2);
    let top = area.y + area.height.saturating_sub(rows + text_rows) / 2;

    let ring_area = Rect {
        x: area.x + (area.width.saturating_sub(rows * 2)) / 2,
        y: top,
        width: rows * 2,
        height: rows,
    };
    render_ring(f, ring_area, &state, parse_marker(&config.marker), theme);

    let text_top = top + rows + 1;
    if let Some(title_row) = row(area, text_top) {
        let title = Paragraph::new(Line::from(Span::styled(
            config.title.clone(),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(theme.title_modifier),
        )))
        .alignment(Alignment::Center);
        f.render_widget(title, title_row);
    }

    if let Some(gauge_row) = row(area, text_top + 1) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.gauge).bg(Color::DarkGray))
            .ratio(screen.progress().ratio().clamp(0.0, 1.0))
            .label("");
        f.render_widget(gauge, centered(gauge_row, 32, 1));
    }

    if let Some(percent_row) = row(area, text_top + 2) {
        let percent = Paragraph::new(format!("{}%", screen.progress().percent()))
            .style(Style::default().fg(fade(theme.foreground, 0.7)))
            .alignment(Alignment::Center);
        f.render_widget(percent, percent_row);
    }
}

/// Draws one frame of the ring. A zero-sized area draws nothing.
pub fn render_ring(f: &mut Frame, area: Rect, state: &RenderState, marker: Marker, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let size = state.surface.logical_size;
    // Logical y grows downward, canvas y grows upward.
    let flip = |y: f64| size - y;

    let canvas = Canvas::default()
        .background_color(theme.background)
        .marker(marker)
        .x_bounds([0.0, size])
        .y_bounds([0.0, size])
        .paint(|ctx| {
            for dot in &state.dots {
                for segment in &dot.segments {
                    let color = fade(
                        mix(theme.trail, theme.trail_tail, 1.0 - segment.alpha),
                        segment.alpha * 0.8,
                    );
                    let (x1, y1) = (segment.from.x, flip(segment.from.y));
                    let (x2, y2) = (segment.to.x, flip(segment.to.y));
                    ctx.draw(&CanvasLine {
                        x1,
                        y1,
                        x2,
                        y2,
                        color,
                    });

                    // Fresh segments are wide enough to need a second stroke.
                    let (dx, dy) = (x2 - x1, y2 - y1);
                    let length = (dx * dx + dy * dy).sqrt();
                    if segment.width >= state.dot_radius && length > f64::EPSILON {
                        let nx = -dy / length * segment.width / 2.0;
                        let ny = dx / length * segment.width / 2.0;
                        ctx.draw(&CanvasLine {
                            x1: x1 + nx,
                            y1: y1 + ny,
                            x2: x2 + nx,
                            y2: y2 + ny,
                            color,
                        });
                    }
                }
            }

            ctx.layer();
            for dot in &state.dots {
                ctx.draw(&Circle {
                    x: dot.position.x,
                    y: flip(dot.position.y),
                    radius: state.glow_radius,
                    color: fade(theme.glow, 0.3),
                });
            }

            ctx.layer();
            for dot in &state.dots {
                let (x, y) = (dot.position.x, flip(dot.position.y));
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: state.dot_radius,
                    color: fade(theme.dot, 0.9),
                });
                let coords = [(x, y)];
                ctx.draw(&Points {
                    coords: &coords,
                    color: theme.dot,
                });
            }
        });

    f.render_widget(canvas, area);
}

// ============================================================================
// HOME SCREEN
// ============================================================================

pub fn render_home(
    f: &mut Frame,
    area: Rect,
    profile: &ProfileConfig,
    keys: &KeyConfig,
    theme: &Theme,
) {
    let toggle = keys.toggle.join("/");
    let quit = keys.quit.join("/");

    let lines = vec![
        Line::from(Span::styled(
            format!("Hi, I'm {}", profile.name),
            Style::default()
                .fg(theme.accent)
                .add_modifier(theme.title_modifier),
        )),
        Line::from(""),
        Line::from(Span::styled(
            profile.tagline.clone(),
            Style::default().fg(theme.foreground),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(toggle, Style::default().fg(theme.prompt)),
            Span::styled(" terminal", Style::default().fg(theme.banner)),
            Span::raw("  "),
            Span::styled(quit, Style::default().fg(theme.prompt)),
            Span::styled(" quit", Style::default().fg(theme.banner)),
        ]),
    ];

    let height = lines.len() as u16;
    let body = centered(area, area.width, height);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.background));
    f.render_widget(paragraph, body);
}

// ============================================================================
// CONSOLE OVERLAY
// ============================================================================

/// Where the terminal sits on screen, for drawing and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleLayout {
    pub area: Rect,
    pub close_button: Rect,
}

impl ConsoleLayout {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        contains(self.area, column, row)
    }

    pub fn on_close_button(&self, column: u16, row: u16) -> bool {
        contains(self.close_button, column, row)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Drops down from the top edge, horizontally centred.
pub fn console_layout(screen: Rect, config: &ConsoleConfig) -> ConsoleLayout {
    let percent = u32::from(config.width_percent.clamp(10, 100));
    let width = ((u32::from(screen.width) * percent) / 100) as u16;
    let width = width.max(screen.width.min(40));
    let height = config.height.min(screen.height);
    let area = Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y,
        width,
        height,
    };

    let button_width = CLOSE_BUTTON.len() as u16;
    let close_button = Rect {
        x: area.right().saturating_sub(button_width + 1).max(area.x),
        y: area.y,
        width: button_width.min(area.width),
        height: height.min(1),
    };

    ConsoleLayout { area, close_button }
}

/// Word-wraps `text` to `width` terminal columns, splitting words that do
/// not fit.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let used = current.width();
        if used > 0 && used + 1 + word.width() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);

        while current.width() > width {
            let split = split_at_column(&current, width);
            let tail = current.split_off(split);
            lines.push(std::mem::replace(&mut current, tail));
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Byte index of the longest prefix of `text` that fits in `columns`.
/// Always takes at least one char so a glyph wider than `columns` still
/// makes progress.
fn split_at_column(text: &str, columns: usize) -> usize {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if i > 0 && used + w > columns {
            return i;
        }
        used += w;
    }
    text.len()
}

/// Longest suffix of `text` that fits in `columns`.
fn tail_fitting(text: &str, columns: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > columns {
            break;
        }
        start = i;
    }
    &text[start..]
}

pub fn render_console(
    f: &mut Frame,
    layout: &ConsoleLayout,
    console: &Interpreter,
    config: &ConsoleConfig,
    theme: &Theme,
) {
    let area = layout.area;
    if area.width < 3 || area.height < 3 {
        return;
    }

    let traffic_lights = Line::from(vec![
        Span::styled("\u{25CF} ", Style::default().fg(Color::Red)),
        Span::styled("\u{25CF} ", Style::default().fg(Color::Yellow)),
        Span::styled("\u{25CF}", Style::default().fg(Color::Green)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.background))
        .title(traffic_lights)
        .title(
            Title::from(Span::styled(
                config.title.clone(),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(theme.title_modifier),
            ))
            .alignment(Alignment::Center),
        )
        .title(
            Title::from(Span::styled(CLOSE_BUTTON, Style::default().fg(theme.banner)))
                .alignment(Alignment::Right),
        );

    let inner = block.inner(area);
    let width = inner.width as usize;

    let mut lines: Vec<Line> = Vec::new();
    for banner in BANNER {
        for piece in wrap_text(banner, width) {
            lines.push(Line::from(Span::styled(
                piece,
                Style::default().fg(theme.banner),
            )));
        }
    }
    for result in console.results() {
        let color = match result.kind {
            ResultKind::Error => theme.error_result,
            ResultKind::Gif => theme.gif_result,
            ResultKind::Text => theme.text_result,
        };
        for piece in wrap_text(&result.content, width) {
            lines.push(Line::from(Span::styled(piece, Style::default().fg(color))));
        }
    }

    // Keep the tail of a long input visible next to the prompt.
    let prompt = format!("{} ", config.prompt);
    let room = width.saturating_sub(prompt.width() + 1);
    let visible_input = tail_fitting(console.input(), room).to_string();
    lines.push(Line::from(vec![
        Span::styled(prompt, Style::default().fg(theme.prompt)),
        Span::styled(visible_input, Style::default().fg(theme.foreground)),
        Span::styled("\u{2588}", Style::default().fg(theme.prompt)),
    ]));

    let scroll = (lines.len() as u16).saturating_sub(inner.height);
    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

// ============================================================================
// DANCE OVERLAY
// ============================================================================

pub fn render_dance(f: &mut Frame, screen: Rect, overlay: &DanceOverlay, theme: &Theme) {
    let Some(frame) = overlay.current_frame() else {
        return;
    };

    let art: Vec<&str> = frame.lines().collect();
    let art_width = art.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let box_area = centered(screen, art_width + 6, art.len() as u16 + 2);

    let lines: Vec<Line> = art
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(theme.gif_result))))
        .collect();
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.gif_result))
            .style(Style::default().bg(theme.background))
            .padding(Padding::horizontal(2)),
    );

    f.render_widget(Clear, box_area);
    f.render_widget(paragraph, box_area);
}
