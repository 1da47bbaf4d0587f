//! Rendering of the timer screen.
//!
//! The screen is a single centred column:
//!
//! ```text
//!        Work  |  Cycle: 2
//!
//!           ▶ Running
//!
//!             18:42
//!
//!   ███████████░░░░░░░░░░░░░░░░░░  25%
//!
//!   space: start/pause  |  r: reset ...
//! ```

use std::time::Duration;

use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::timer::{RunState, TimerEngine, TimerMode};

const TITLE: Color = Color::Indexed(205);
const TIME: Color = Color::Indexed(39);
const WORK: Color = Color::Indexed(82);
const BREAK: Color = Color::Indexed(214);
const BAR_EMPTY: Color = Color::Indexed(240);
const HINT: Color = Color::Indexed(241);
const STATE: Color = Color::Indexed(245);

const FILLED: &str = "█";
const EMPTY: &str = "░";

/// Columns left free around the progress bar.
const BAR_MARGIN: u16 = 10;
/// Bar width used when the terminal is too narrow for a sensible one.
const FALLBACK_BAR_WIDTH: usize = 20;

pub const HINTS: &str = "space: start/pause  |  r: reset  |  s: skip  |  c: config  |  q: quit";
pub const ADJUST_HINTS: &str = "shift+↑/↓: ±1 min  |  shift+→/←: ±10 min";

/// Draws the whole screen from the engine's current state.
pub fn render(frame: &mut Frame, engine: &TimerEngine) {
    let area = frame.area();
    let lines = screen_lines(engine, area.width);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}

fn screen_lines(engine: &TimerEngine, width: u16) -> Vec<Line<'static>> {
    vec![
        header_line(engine),
        Line::default(),
        state_line(engine.run_state()),
        Line::default(),
        Line::styled(
            format_remaining(engine.remaining()),
            Style::new().fg(TIME).add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        progress_line(engine.progress(), width.saturating_sub(BAR_MARGIN)),
        Line::default(),
        Line::styled(HINTS, Style::new().fg(HINT)),
        Line::styled(ADJUST_HINTS, Style::new().fg(HINT)),
    ]
}

fn header_line(engine: &TimerEngine) -> Line<'static> {
    let mode = engine.mode();
    let color = match mode {
        TimerMode::Work => WORK,
        TimerMode::ShortBreak | TimerMode::LongBreak => BREAK,
    };
    let bold = Style::new().add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled(mode.as_str(), bold.fg(color)),
        Span::styled(format!("  |  Cycle: {}", engine.cycle()), bold.fg(TITLE)),
    ])
}

fn state_line(state: RunState) -> Line<'static> {
    let label = match state {
        RunState::Running => "▶ Running",
        RunState::Paused => "⏸ Paused",
        RunState::Idle => "⏹ Ready",
    };
    Line::styled(label, Style::new().fg(STATE).add_modifier(Modifier::ITALIC))
}

fn progress_line(progress: f64, width: u16) -> Line<'static> {
    let (filled, empty) = bar_split(progress, width);
    Line::from(vec![
        Span::styled(FILLED.repeat(filled), Style::new().fg(WORK)),
        Span::styled(EMPTY.repeat(empty), Style::new().fg(BAR_EMPTY)),
        Span::raw(format_percent(progress)),
    ])
}

/// Number of filled and empty cells for a bar `width` cells wide.
fn bar_split(progress: f64, width: u16) -> (usize, usize) {
    let width = if width < 5 {
        FALLBACK_BAR_WIDTH
    } else {
        usize::from(width)
    };
    let progress = progress.clamp(0.0, 1.0);
    // truncates toward zero
    let filled = ((width as f64) * progress) as usize;
    (filled, width - filled.min(width))
}

fn format_percent(progress: f64) -> String {
    format!(" {:>3}%", (progress.clamp(0.0, 1.0) * 100.0).round() as u32)
}

/// Formats remaining time as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
