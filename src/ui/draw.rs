use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use super::controls::Control;
use super::fade::faded;
use super::view::ViewState;

const LYRIC_COLOR: (u8, u8, u8) = (240, 200, 90);
const OVERLAY_COLOR: (u8, u8, u8) = (120, 220, 255);

/// Render the whole screen for `view` at time `now` (used for fades and
/// button flashes).
pub fn draw(frame: &mut Frame, view: &ViewState, now: Instant) {
    let mut constraints = vec![Constraint::Length(8)];
    if view.show_playlist() {
        constraints.push(Constraint::Min(3));
    } else {
        constraints.push(Constraint::Min(0));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    draw_player(frame, view, now, chunks[0]);
    if view.show_playlist() {
        draw_playlist(frame, view, chunks[1]);
    }
    draw_controls(frame, view, now, chunks[2]);

    if view.show_overlay() {
        draw_overlay(frame, view, now, frame.area());
    }
}

fn draw_player(frame: &mut Frame, view: &ViewState, now: Instant, area: Rect) {
    let block = Block::bordered()
        .title(" lyricbox ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let state = if view.is_playing() { "▶" } else { "⏸" };
    let status = Paragraph::new(format!("{state} {}", view.status()))
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(status, rows[0]);

    let lyric_style = Style::default()
        .fg(faded(LYRIC_COLOR, view.lyric.opacity(now)))
        .add_modifier(Modifier::BOLD);
    let lyric = Paragraph::new(view.lyric())
        .style(lyric_style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(lyric, rows[2]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(view.progress_ratio())
        .label(view.elapsed().to_string());
    frame.render_widget(gauge, rows[3]);

    let info = Line::from(vec![
        Span::styled(view.shuffle_label().to_string(), Style::default().fg(Color::Magenta)),
        Span::raw(" • "),
        Span::raw(format!("vol {}%", view.volume())),
    ]);
    frame.render_widget(Paragraph::new(info), rows[4]);
}

fn draw_playlist(frame: &mut Frame, view: &ViewState, area: Rect) {
    let items: Vec<ListItem> = view
        .tracks
        .iter()
        .enumerate()
        .map(|(i, title)| {
            if view.current == Some(i) {
                ListItem::new(format!("♪ {title}"))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {title}"))
            }
        })
        .collect();

    let title = format!(" playlist ({}) ", view.tracks.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(view.cursor());
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_controls(frame: &mut Frame, view: &ViewState, now: Instant, area: Rect) {
    let mut spans = Vec::with_capacity(Control::ALL.len() * 2);
    for control in Control::ALL {
        let style = *control.visual().get(view.button_state(control, now));
        let label = if control == Control::PlayPause && view.is_playing() {
            "pause"
        } else {
            control.label()
        };
        spans.push(Span::styled(format!("[{}] {label}", control.key_hint()), style));
        spans.push(Span::raw("  "));
    }

    let bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(bar, area);
}

/// The floating lyric bar, drawn over the lower part of the screen.
fn draw_overlay(frame: &mut Frame, view: &ViewState, now: Instant, area: Rect) {
    let popup = overlay_rect(area);
    frame.render_widget(Clear, popup);

    let style = Style::default()
        .fg(faded(OVERLAY_COLOR, view.overlay.opacity(now)))
        .add_modifier(Modifier::BOLD);
    let overlay = Paragraph::new(view.overlay_lyric())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::bordered().title(" lyric "))
        .wrap(Wrap { trim: true });
    frame.render_widget(overlay, popup);
}

/// A 3-row bar, centered horizontally just above the control bar.
pub(super) fn overlay_rect(area: Rect) -> Rect {
    let width = (area.width / 4 * 3).max(10).min(area.width);
    let height = 3.min(area.height);
    let x = area.x + (area.width.saturating_sub(width) / 2);
    let y = area.y + area.height.saturating_sub(height + 4);
    Rect {
        x,
        y,
        width,
        height,
    }
}
