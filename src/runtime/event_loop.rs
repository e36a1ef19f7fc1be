use std::io::Stdout;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::audio::AudioPlayer;
use crate::playback::{PlaybackCoordinator, PlayerNotice};
use crate::playlist::dropped_paths;
use crate::ui::{self, Control, ViewState};

pub type Coordinator = PlaybackCoordinator<AudioPlayer, ViewState>;

/// Upper bound on how long the loop sleeps waiting for input.
const IDLE_FRAME: Duration = Duration::from_millis(50);
/// Redraw rate while a fade or button flash is running.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Main terminal event loop: applies audio notifications, runs the lyric
/// poller and seek commits, draws, then waits for input. Returns `Ok(())`
/// when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    coordinator: &mut Coordinator,
    events: &Receiver<PlayerNotice>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(notice) = events.try_recv() {
            coordinator.handle_notice(notice);
        }

        let now = Instant::now();
        coordinator.tick(now);

        terminal.draw(|f| ui::draw(f, coordinator.view(), now))?;

        if event::poll(poll_timeout(coordinator, now))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, coordinator)? {
                        break;
                    }
                }
                Event::Paste(text) => {
                    let paths = dropped_paths(&text);
                    let added = coordinator.add_paths(&paths);
                    debug!(offered = paths.len(), added, "handled dropped files");
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Sleep until the next input, poll or seek deadline, whichever is first.
fn poll_timeout(coordinator: &Coordinator, now: Instant) -> Duration {
    let frame = if coordinator.view().is_animating(now) {
        ANIMATION_FRAME
    } else {
        IDLE_FRAME
    };
    coordinator
        .next_deadline(now)
        .map_or(frame, |deadline| deadline.min(frame))
}

fn handle_key_event(
    key: KeyEvent,
    coordinator: &mut Coordinator,
) -> Result<bool, Box<dyn std::error::Error>> {
    let now = Instant::now();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Char(' ') => {
            coordinator.view_mut().press(Control::PlayPause, now);
            coordinator.toggle_play();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            coordinator.view_mut().press(Control::Next, now);
            let _ = coordinator.next();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            coordinator.view_mut().press(Control::Previous, now);
            let _ = coordinator.previous();
        }
        KeyCode::Char('L') => coordinator.seek_forward(now),
        KeyCode::Char('H') => coordinator.seek_backward(now),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            coordinator.view_mut().press(Control::VolumeUp, now);
            coordinator.volume_up();
        }
        KeyCode::Char('-') | KeyCode::Down => {
            coordinator.view_mut().press(Control::VolumeDown, now);
            coordinator.volume_down();
        }
        KeyCode::Char('s') => {
            coordinator.view_mut().press(Control::Shuffle, now);
            coordinator.toggle_shuffle();
        }
        KeyCode::Char('p') => {
            let view = coordinator.view_mut();
            view.press(Control::Playlist, now);
            view.toggle_playlist();
        }
        KeyCode::Char('o') => {
            let view = coordinator.view_mut();
            view.press(Control::Overlay, now);
            view.toggle_overlay();
        }
        KeyCode::Char('j') => coordinator.view_mut().cursor_down(),
        KeyCode::Char('k') => coordinator.view_mut().cursor_up(),
        KeyCode::Enter => {
            if let Some(index) = coordinator.view().cursor() {
                let _ = coordinator.select(index);
            }
        }
        _ => {}
    }

    Ok(false)
}
